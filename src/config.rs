//! High-level acquisition and generation settings, applied to a device as an
//! ordered sequence of property-set calls.

use crate::params::{
    Coupling, FrequencyMode, GeneratorMode, MeasureMode, SignalType, TriggerInputId, TriggerKind,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelConfig {
    pub enabled: bool,
    /// Full scale range in volts.
    pub range: f64,
    pub coupling: Coupling,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        ChannelConfig {
            enabled: true,
            range: 8.0,
            coupling: Coupling::DcVolt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelTriggerConfig {
    pub channel: u16,
    pub kind: TriggerKind,
    /// Relative to full scale, 0.0 to 1.0.
    pub level: f64,
    /// Relative to full scale, 0.0 to 1.0.
    pub hysteresis: f64,
}

impl Default for ChannelTriggerConfig {
    fn default() -> Self {
        ChannelTriggerConfig {
            channel: 0,
            kind: TriggerKind::RisingEdge,
            level: 0.5,
            hysteresis: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopeConfig {
    pub measure_mode: MeasureMode,
    /// Samples per second.
    pub sample_frequency: f64,
    /// Samples requested per channel per acquisition. The driver may clamp
    /// this; the applied value is read back after configuration.
    pub record_length: u64,
    pub pre_sample_ratio: f64,
    /// More than one segment captures one buffer per trigger event.
    pub segment_count: Option<u32>,
    /// One entry per channel to configure; channels beyond this list keep
    /// their driver defaults.
    pub channels: Vec<ChannelConfig>,
    pub trigger: Option<ChannelTriggerConfig>,
    /// Device trigger input gating the acquisition, instead of (or next to)
    /// a channel trigger.
    pub trigger_input: Option<TriggerInputId>,
    /// Seconds the device waits for a trigger before forcing one.
    pub trigger_timeout: f64,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        ScopeConfig {
            measure_mode: MeasureMode::Block,
            sample_frequency: 1e6,
            record_length: 10_000,
            pre_sample_ratio: 0.0,
            segment_count: None,
            channels: vec![ChannelConfig::default()],
            trigger: Some(ChannelTriggerConfig::default()),
            trigger_input: None,
            trigger_timeout: 100e-3,
        }
    }
}

impl ScopeConfig {
    /// A configuration enabling `count` identical channels.
    pub fn all_channels(count: u16) -> ScopeConfig {
        ScopeConfig {
            channels: vec![ChannelConfig::default(); count as usize],
            ..ScopeConfig::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    pub signal_type: SignalType,
    pub frequency_mode: FrequencyMode,
    /// Hertz; signal or sample frequency depending on `frequency_mode`.
    pub frequency: f64,
    /// Volts.
    pub amplitude: f64,
    /// Volts.
    pub offset: f64,
    /// Fraction of each period the output is high (duty cycle for square
    /// waveforms).
    pub symmetry: f64,
    pub mode: GeneratorMode,
    /// Periods per burst, used when `mode` is `BurstCount`.
    pub burst_count: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            signal_type: SignalType::Sine,
            frequency_mode: FrequencyMode::Signal,
            frequency: 1e3,
            amplitude: 2.0,
            offset: 0.0,
            symmetry: 0.5,
            mode: GeneratorMode::Continuous,
            burst_count: 0,
        }
    }
}
