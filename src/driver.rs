//! The seam between this crate and the instrument driver. Everything behind
//! `Driver` (triggering, sampling, calibration, transfer) belongs to the
//! driver; this crate only sequences calls into it.

use crate::caps::{DeviceKinds, GeneratorModes, MeasureModes, SignalTypes};
use crate::params::{
    ChannelProperty, ChannelTriggerProperty, ConnectionState, DeviceKind, GeneratorProperty,
    ScopeProperty, TriggerInputId, TriggerInputProperty,
};
use crate::status::Status;

/// One entry of the driver's device list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: String,
    pub serial: u32,
    pub kinds: DeviceKinds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeInfo {
    pub channel_count: u16,
    pub measure_modes: MeasureModes,
    pub segment_count_max: u32,
    pub has_connection_test: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorInfo {
    pub signal_types: SignalTypes,
    pub modes: GeneratorModes,
    /// Device trigger inputs usable to trigger or gate generation.
    pub trigger_input_count: u16,
}

// Opaque per-kind handles. The driver owns all device state; a handle is only
// valid between a successful open and the matching close.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeHandle(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenHandle(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cHandle(pub(crate) u32);

/// Any open handle, for operations shared by all device kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceHandle {
    Scope(ScopeHandle),
    Generator(GenHandle),
    I2c(I2cHandle),
}

impl From<ScopeHandle> for DeviceHandle {
    fn from(handle: ScopeHandle) -> Self {
        Self::Scope(handle)
    }
}

impl From<GenHandle> for DeviceHandle {
    fn from(handle: GenHandle) -> Self {
        Self::Generator(handle)
    }
}

impl From<I2cHandle> for DeviceHandle {
    fn from(handle: I2cHandle) -> Self {
        Self::I2c(handle)
    }
}

/// The fixed C-style surface of the vendor library: list refresh and
/// enumeration, open/close by category, property sets, start/stop, readiness
/// polling and buffered retrieval.
///
/// All methods take `&self`; a driver is stateful behind the handle the same
/// way the C library is stateful behind a const pointer, and one driver must
/// be able to hand out an oscilloscope and a generator at the same time.
///
/// Setters return the call's `Status` explicitly instead of parking it in a
/// process-wide last-status slot. A setter may silently clamp an out-of-range
/// value; where the applied value matters, callers re-read it through the
/// matching getter.
pub trait Driver {
    // device list
    fn refresh(&self) -> Status;
    fn device_count(&self) -> u32;
    fn device_info(&self, index: u32) -> Option<DeviceInfo>;
    fn can_open(&self, index: u32, kind: DeviceKind) -> bool;
    /// `None` is the invalid handle: the device cannot currently be opened as
    /// an oscilloscope.
    fn open_oscilloscope(&self, index: u32) -> Option<ScopeHandle>;
    fn open_generator(&self, index: u32) -> Option<GenHandle>;
    fn open_i2c_host(&self, index: u32) -> Option<I2cHandle>;

    // any open object
    fn close(&self, handle: DeviceHandle) -> Status;
    fn is_removed(&self, handle: DeviceHandle) -> bool;
    fn trigger_input_index(&self, handle: DeviceHandle, id: TriggerInputId) -> Option<u16>;
    fn set_trigger_input(
        &self,
        handle: DeviceHandle,
        input: u16,
        property: TriggerInputProperty,
    ) -> Status;

    // oscilloscope
    fn scope_info(&self, handle: ScopeHandle) -> ScopeInfo;
    fn scope_set(&self, handle: ScopeHandle, property: ScopeProperty) -> Status;
    fn scope_set_channel(&self, handle: ScopeHandle, channel: u16, property: ChannelProperty)
        -> Status;
    fn scope_set_channel_trigger(
        &self,
        handle: ScopeHandle,
        channel: u16,
        property: ChannelTriggerProperty,
    ) -> Status;
    /// Record length actually in effect, after any clamping by the driver.
    fn scope_record_length(&self, handle: ScopeHandle) -> u64;
    /// Segment count actually in effect, after any clamping by the driver.
    fn scope_segment_count(&self, handle: ScopeHandle) -> u32;
    fn scope_start(&self, handle: ScopeHandle) -> Status;
    fn scope_stop(&self, handle: ScopeHandle) -> Status;
    fn scope_is_data_ready(&self, handle: ScopeHandle) -> bool;
    fn scope_is_data_overflow(&self, handle: ScopeHandle) -> bool;
    /// Fill one caller-allocated buffer per channel with the measured data
    /// and return the number of samples written per channel. In segmented
    /// block mode each call consumes the next pending segment.
    fn scope_read(&self, handle: ScopeHandle, buffers: &mut [&mut [f32]]) -> (u64, Status);
    fn scope_start_connection_test(&self, handle: ScopeHandle) -> Status;
    fn scope_is_connection_test_completed(&self, handle: ScopeHandle) -> bool;
    fn scope_connection_test_data(&self, handle: ScopeHandle, states: &mut [ConnectionState])
        -> (u16, Status);

    // generator
    fn generator_info(&self, handle: GenHandle) -> GeneratorInfo;
    fn generator_set(&self, handle: GenHandle, property: GeneratorProperty) -> Status;
    /// Load an arbitrary waveform table, one full-scale unit per value.
    fn generator_set_waveform(&self, handle: GenHandle, data: &[f32]) -> Status;
    fn generator_start(&self, handle: GenHandle) -> Status;
    fn generator_stop(&self, handle: GenHandle) -> Status;
    fn generator_is_burst_active(&self, handle: GenHandle) -> bool;

    // I2C host
    fn i2c_write(&self, handle: I2cHandle, address: u8, data: &[u8]) -> Status;
    fn i2c_write_byte_word(&self, handle: I2cHandle, address: u8, byte: u8, word: u16) -> Status;
}
