mod caps;
mod config;
mod driver;
mod generator;
mod i2c;
mod params;
mod scope;
mod status;

pub mod export;
pub mod locate;
pub mod mock;
pub mod poll;
pub mod session;
pub mod term;

#[derive(Debug)]
pub enum Error {
    NoDevice,
    DeviceGone,
    DataOverflow,
    TimedOut,
    Cancelled,
    Io(std::io::Error),
    Other(Box<dyn std::error::Error + Sync + Send + 'static>),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NoDevice =>
                write!(f, "no matching device available"),
            Self::DeviceGone =>
                write!(f, "device gone"),
            Self::DataOverflow =>
                write!(f, "data overflow"),
            Self::TimedOut =>
                write!(f, "wait timed out"),
            Self::Cancelled =>
                write!(f, "wait cancelled"),
            Self::Io(io_error) =>
                write!(f, "I/O error: {}", io_error),
            Self::Other(error) =>
                write!(f, "{}", error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(ref io_error) => Some(io_error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error)
    }
}

pub type Result<T> =
    core::result::Result<T, Error>;

pub use caps::{
    DeviceKinds,
    MeasureModes,
    SignalTypes,
    GeneratorModes,
};

pub use params::{
    DeviceKind,
    MeasureMode,
    SignalType,
    GeneratorMode,
    FrequencyMode,
    Coupling,
    TriggerKind,
    TriggerInputId,
    ConnectionState,
    ScopeProperty,
    ChannelProperty,
    ChannelTriggerProperty,
    GeneratorProperty,
    TriggerInputProperty,
};

pub use config::{
    ChannelConfig,
    ChannelTriggerConfig,
    ScopeConfig,
    GeneratorConfig,
};

pub use driver::{
    Driver,
    DeviceInfo,
    ScopeInfo,
    GeneratorInfo,
    ScopeHandle,
    GenHandle,
    I2cHandle,
    DeviceHandle,
};

pub use status::Status;

pub use scope::{Applied, Oscilloscope};
pub use generator::Generator;
pub use i2c::I2cHost;
pub use poll::{PollOutcome, PollStep, Poller};
