//! Capability bit-sets queried from devices before opening them.

use bitflags::bitflags;

bitflags! {
    /// Device categories a list entry can be opened as.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DeviceKinds: u32 {
        const OSCILLOSCOPE = 1<<0;
        const GENERATOR    = 1<<1;
        const I2C_HOST     = 1<<2;
    }
}

bitflags! {
    /// Acquisition strategies an oscilloscope supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MeasureModes: u32 {
        const STREAM = 1<<0;
        const BLOCK  = 1<<1;
    }
}

bitflags! {
    /// Waveform shapes a generator can produce.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SignalTypes: u32 {
        const SINE      = 1<<0;
        const TRIANGLE  = 1<<1;
        const SQUARE    = 1<<2;
        const DC        = 1<<3;
        const NOISE     = 1<<4;
        const ARBITRARY = 1<<5;
        const PULSE     = 1<<6;
    }
}

bitflags! {
    /// Generation modes a generator supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GeneratorModes: u32 {
        const CONTINUOUS    = 1<<0;
        const BURST_COUNT   = 1<<1;
        const GATED_PERIODS = 1<<2;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::params::{DeviceKind, MeasureMode, SignalType};

    #[test]
    fn test_scalar_to_bit() {
        assert_eq!(DeviceKind::Generator.bit(), DeviceKinds::GENERATOR);
        assert_eq!(MeasureMode::Block.bit(), MeasureModes::BLOCK);
        assert_eq!(SignalType::Arbitrary.bit(), SignalTypes::ARBITRARY);
    }

    #[test]
    fn test_capability_check_reads_naturally() {
        let modes = MeasureModes::STREAM | MeasureModes::BLOCK;
        assert!(modes.contains(MeasureMode::Stream.bit()));
        let kinds = DeviceKinds::OSCILLOSCOPE;
        assert!(!kinds.contains(DeviceKind::I2cHost.bit()));
    }
}
