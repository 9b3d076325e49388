//! Scalar device parameters and the property sequences applied by
//! the configurators.

use crate::caps::{DeviceKinds, GeneratorModes, MeasureModes, SignalTypes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Oscilloscope,
    Generator,
    I2cHost,
}

impl DeviceKind {
    pub fn bit(self) -> DeviceKinds {
        match self {
            Self::Oscilloscope => DeviceKinds::OSCILLOSCOPE,
            Self::Generator => DeviceKinds::GENERATOR,
            Self::I2cHost => DeviceKinds::I2C_HOST,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasureMode {
    Stream,
    #[default]
    Block,
}

impl MeasureMode {
    pub fn bit(self) -> MeasureModes {
        match self {
            Self::Stream => MeasureModes::STREAM,
            Self::Block => MeasureModes::BLOCK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalType {
    #[default]
    Sine,
    Triangle,
    Square,
    Dc,
    Noise,
    Arbitrary,
    Pulse,
}

impl SignalType {
    pub fn bit(self) -> SignalTypes {
        match self {
            Self::Sine => SignalTypes::SINE,
            Self::Triangle => SignalTypes::TRIANGLE,
            Self::Square => SignalTypes::SQUARE,
            Self::Dc => SignalTypes::DC,
            Self::Noise => SignalTypes::NOISE,
            Self::Arbitrary => SignalTypes::ARBITRARY,
            Self::Pulse => SignalTypes::PULSE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorMode {
    #[default]
    Continuous,
    BurstCount,
    GatedPeriods,
}

impl GeneratorMode {
    pub fn bit(self) -> GeneratorModes {
        match self {
            Self::Continuous => GeneratorModes::CONTINUOUS,
            Self::BurstCount => GeneratorModes::BURST_COUNT,
            Self::GatedPeriods => GeneratorModes::GATED_PERIODS,
        }
    }
}

/// Whether the generator frequency setting refers to the signal frequency or
/// the sample frequency of a loaded waveform table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyMode {
    #[default]
    Signal,
    Sample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coupling {
    #[default]
    DcVolt,
    AcVolt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerKind {
    #[default]
    RisingEdge,
    FallingEdge,
    AnyEdge,
}

/// Device-level trigger input sources that can gate an acquisition or
/// a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerInputId {
    /// External trigger connectors.
    Ext1,
    Ext2,
    GeneratorStart,
    GeneratorStop,
    GeneratorNewPeriod,
}

/// State of one channel as reported by the oscilloscope connection test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Undefined,
    Connected,
    Disconnected,
}

// The configurators apply these in order; each variant is one idempotent
// property-set call on the driver.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScopeProperty {
    MeasureMode(MeasureMode),
    SampleFrequency(f64),
    RecordLength(u64),
    PreSampleRatio(f64),
    SegmentCount(u32),
    TriggerTimeout(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelProperty {
    Enabled(bool),
    Range(f64),
    Coupling(Coupling),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelTriggerProperty {
    Enabled(bool),
    Kind(TriggerKind),
    Level(f64),
    Hysteresis(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneratorProperty {
    SignalType(SignalType),
    FrequencyMode(FrequencyMode),
    Frequency(f64),
    Amplitude(f64),
    Offset(f64),
    Symmetry(f64),
    Mode(GeneratorMode),
    BurstCount(u64),
    OutputOn(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerInputProperty {
    Enabled(bool),
    Kind(TriggerKind),
}
