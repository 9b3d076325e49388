//! Simulated instruments implementing the driver seam, for tests and for
//! running the example programs without hardware.

use std::cell::RefCell;

use crate::caps::{DeviceKinds, GeneratorModes, MeasureModes, SignalTypes};
use crate::driver::{
    DeviceHandle, DeviceInfo, Driver, GenHandle, GeneratorInfo, I2cHandle, ScopeHandle, ScopeInfo,
};
use crate::params::{
    ChannelProperty, ChannelTriggerProperty, ConnectionState, DeviceKind, GeneratorProperty,
    MeasureMode, ScopeProperty, TriggerInputId, TriggerInputProperty,
};
use crate::status::Status;

/// Sample synthesizer: `(segment, channel, index) -> value`.
pub type FillFn = fn(u32, u16, u64) -> f32;

fn default_fill(_segment: u32, channel: u16, index: u64) -> f32 {
    channel as f32 * 1000.0 + index as f32
}

/// One I2C transaction captured by the mock host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cOp {
    Raw { address: u8, data: Vec<u8> },
    ByteWord { address: u8, byte: u8, word: u16 },
}

// Only the enable flag routes data; range and coupling are recorded in the
// applied-property log like every other set call.
#[derive(Debug, Clone, Copy, Default)]
struct ChannelState {
    enabled: bool,
}

#[derive(Debug, Default)]
struct ScopeState {
    channels: Vec<ChannelState>,
    streaming: bool,
    record_length: u64,
    segment_count: u32,
    started: bool,
    ready_polls_seen: u32,
    segments_pending: u32,
    reads_done: u32,
    test_running: bool,
    test_polls_seen: u32,
}

#[derive(Debug, Default)]
struct GenState {
    started: bool,
    burst_polls_seen: u32,
}

/// One simulated instrument. Construct with a kind-specific constructor and
/// adjust capabilities and scripted behavior with the builder methods.
#[derive(Debug)]
pub struct MockDevice {
    info: DeviceInfo,
    measure_modes: MeasureModes,
    channel_count: u16,
    segment_count_max: u32,
    max_record_length: u64,
    has_connection_test: bool,
    signal_types: SignalTypes,
    generator_modes: GeneratorModes,
    trigger_inputs: Vec<TriggerInputId>,
    fill: FillFn,
    ready_delay: u32,
    remove_after_ready_polls: Option<u32>,
    overflow_after_reads: Option<u32>,
    burst_poll_count: u32,
    // run state
    removed: bool,
    open: DeviceKinds,
    scope: ScopeState,
    generator: GenState,
    i2c_ops: Vec<I2cOp>,
    applied: Vec<String>,
}

impl MockDevice {
    fn new(name: &str, serial: u32, kinds: DeviceKinds) -> MockDevice {
        MockDevice {
            info: DeviceInfo {
                name: name.to_owned(),
                serial,
                kinds,
            },
            measure_modes: MeasureModes::empty(),
            channel_count: 0,
            segment_count_max: 1,
            max_record_length: 1 << 20,
            has_connection_test: false,
            signal_types: SignalTypes::empty(),
            generator_modes: GeneratorModes::empty(),
            trigger_inputs: Vec::new(),
            fill: default_fill,
            ready_delay: 0,
            remove_after_ready_polls: None,
            overflow_after_reads: None,
            burst_poll_count: 3,
            removed: false,
            open: DeviceKinds::empty(),
            scope: ScopeState::default(),
            generator: GenState::default(),
            i2c_ops: Vec::new(),
            applied: Vec::new(),
        }
    }

    pub fn oscilloscope(name: &str, serial: u32) -> MockDevice {
        let mut device = MockDevice::new(name, serial, DeviceKinds::OSCILLOSCOPE);
        device.channel_count = 2;
        device.measure_modes = MeasureModes::BLOCK;
        device
    }

    pub fn generator(name: &str, serial: u32) -> MockDevice {
        let mut device = MockDevice::new(name, serial, DeviceKinds::GENERATOR);
        device.signal_types = SignalTypes::SINE | SignalTypes::TRIANGLE | SignalTypes::SQUARE;
        device.generator_modes = GeneratorModes::CONTINUOUS;
        device
    }

    pub fn i2c_host(name: &str, serial: u32) -> MockDevice {
        MockDevice::new(name, serial, DeviceKinds::I2C_HOST)
    }

    /// A combined instrument that opens as both oscilloscope and generator,
    /// with the generator's trigger events wired to the oscilloscope.
    pub fn combined(name: &str, serial: u32) -> MockDevice {
        let mut device = MockDevice::new(
            name,
            serial,
            DeviceKinds::OSCILLOSCOPE | DeviceKinds::GENERATOR,
        );
        device.channel_count = 2;
        device.measure_modes = MeasureModes::BLOCK;
        device.signal_types = SignalTypes::SINE | SignalTypes::TRIANGLE | SignalTypes::SQUARE;
        device.generator_modes = GeneratorModes::CONTINUOUS;
        device.trigger_inputs = vec![
            TriggerInputId::GeneratorStart,
            TriggerInputId::GeneratorStop,
            TriggerInputId::GeneratorNewPeriod,
        ];
        device
    }

    pub fn channels(mut self, count: u16) -> MockDevice {
        self.channel_count = count;
        self
    }

    pub fn measure_modes(mut self, modes: MeasureModes) -> MockDevice {
        self.measure_modes = modes;
        self
    }

    pub fn segments(mut self, max: u32) -> MockDevice {
        self.segment_count_max = max;
        self
    }

    pub fn max_record_length(mut self, length: u64) -> MockDevice {
        self.max_record_length = length;
        self
    }

    pub fn connection_test(mut self) -> MockDevice {
        self.has_connection_test = true;
        self
    }

    pub fn signal_types(mut self, types: SignalTypes) -> MockDevice {
        self.signal_types = types;
        self
    }

    pub fn generator_modes(mut self, modes: GeneratorModes) -> MockDevice {
        self.generator_modes = modes;
        self
    }

    pub fn trigger_inputs(mut self, inputs: &[TriggerInputId]) -> MockDevice {
        self.trigger_inputs = inputs.to_vec();
        self
    }

    pub fn fill(mut self, fill: FillFn) -> MockDevice {
        self.fill = fill;
        self
    }

    /// Number of ready polls reporting false before data becomes ready.
    pub fn ready_delay(mut self, polls: u32) -> MockDevice {
        self.ready_delay = polls;
        self
    }

    /// Report the device as removed after this many ready polls, before any
    /// data becomes ready.
    pub fn removed_after(mut self, polls: u32) -> MockDevice {
        self.remove_after_ready_polls = Some(polls);
        self
    }

    /// In stream mode, report data overflow once this many chunks have been
    /// read.
    pub fn overflow_after(mut self, reads: u32) -> MockDevice {
        self.overflow_after_reads = Some(reads);
        self
    }
}

/// In-process driver over a table of [`MockDevice`]s. Handles encode the
/// device's list index.
#[derive(Debug, Default)]
pub struct MockDriver {
    devices: RefCell<Vec<MockDevice>>,
}

impl MockDriver {
    pub fn new() -> MockDriver {
        MockDriver::default()
    }

    pub fn with_device(device: MockDevice) -> MockDriver {
        let driver = MockDriver::new();
        driver.push(device);
        driver
    }

    pub fn push(&self, device: MockDevice) {
        self.devices.borrow_mut().push(device);
    }

    /// Mark a device as physically removed.
    pub fn remove(&self, index: u32) {
        self.devices.borrow_mut()[index as usize].removed = true;
    }

    /// Debug renderings of every property set applied to a device, in call
    /// order.
    pub fn applied(&self, index: u32) -> Vec<String> {
        self.devices.borrow()[index as usize].applied.clone()
    }

    /// I2C transactions performed on a device, in call order.
    pub fn i2c_ops(&self, index: u32) -> Vec<I2cOp> {
        self.devices.borrow()[index as usize].i2c_ops.clone()
    }

    fn handle_index(handle: DeviceHandle) -> u32 {
        match handle {
            DeviceHandle::Scope(ScopeHandle(index)) => index,
            DeviceHandle::Generator(GenHandle(index)) => index,
            DeviceHandle::I2c(I2cHandle(index)) => index,
        }
    }

    fn open_as(&self, index: u32, kind: DeviceKind) -> Option<u32> {
        let mut devices = self.devices.borrow_mut();
        let device = devices.get_mut(index as usize)?;
        if device.removed || !device.info.kinds.contains(kind.bit()) {
            return None;
        }
        if device.open.contains(kind.bit()) {
            return None; // already claimed
        }
        device.open.insert(kind.bit());
        match kind {
            DeviceKind::Oscilloscope => {
                device.scope = ScopeState {
                    channels: vec![ChannelState::default(); device.channel_count as usize],
                    record_length: 0,
                    segment_count: 1,
                    ..ScopeState::default()
                };
            }
            DeviceKind::Generator => device.generator = GenState::default(),
            DeviceKind::I2cHost => {}
        }
        Some(index)
    }
}

impl Driver for MockDriver {
    fn refresh(&self) -> Status {
        Status::SUCCESS
    }

    fn device_count(&self) -> u32 {
        self.devices.borrow().len() as u32
    }

    fn device_info(&self, index: u32) -> Option<DeviceInfo> {
        self.devices.borrow().get(index as usize).map(|device| device.info.clone())
    }

    fn can_open(&self, index: u32, kind: DeviceKind) -> bool {
        match self.devices.borrow().get(index as usize) {
            Some(device) => !device.removed && device.info.kinds.contains(kind.bit()),
            None => false,
        }
    }

    fn open_oscilloscope(&self, index: u32) -> Option<ScopeHandle> {
        self.open_as(index, DeviceKind::Oscilloscope).map(ScopeHandle)
    }

    fn open_generator(&self, index: u32) -> Option<GenHandle> {
        self.open_as(index, DeviceKind::Generator).map(GenHandle)
    }

    fn open_i2c_host(&self, index: u32) -> Option<I2cHandle> {
        self.open_as(index, DeviceKind::I2cHost).map(I2cHandle)
    }

    fn close(&self, handle: DeviceHandle) -> Status {
        let index = Self::handle_index(handle) as usize;
        let mut devices = self.devices.borrow_mut();
        let Some(device) = devices.get_mut(index) else {
            return Status::INVALID_HANDLE;
        };
        let kind = match handle {
            DeviceHandle::Scope(_) => DeviceKinds::OSCILLOSCOPE,
            DeviceHandle::Generator(_) => DeviceKinds::GENERATOR,
            DeviceHandle::I2c(_) => DeviceKinds::I2C_HOST,
        };
        if !device.open.contains(kind) {
            return Status::INVALID_HANDLE;
        }
        device.open.remove(kind);
        Status::SUCCESS
    }

    fn is_removed(&self, handle: DeviceHandle) -> bool {
        let index = Self::handle_index(handle) as usize;
        self.devices.borrow().get(index).map_or(true, |device| device.removed)
    }

    fn trigger_input_index(&self, handle: DeviceHandle, id: TriggerInputId) -> Option<u16> {
        let index = Self::handle_index(handle) as usize;
        let devices = self.devices.borrow();
        let device = devices.get(index)?;
        device
            .trigger_inputs
            .iter()
            .position(|&input| input == id)
            .map(|position| position as u16)
    }

    fn set_trigger_input(
        &self,
        handle: DeviceHandle,
        input: u16,
        property: TriggerInputProperty,
    ) -> Status {
        let index = Self::handle_index(handle) as usize;
        let mut devices = self.devices.borrow_mut();
        let Some(device) = devices.get_mut(index) else {
            return Status::INVALID_HANDLE;
        };
        if device.removed {
            return Status::DEVICE_GONE;
        }
        if input as usize >= device.trigger_inputs.len() {
            return Status::INVALID_TRIGGER_SOURCE;
        }
        device.applied.push(format!("trigger_input[{}] {:?}", input, property));
        Status::SUCCESS
    }

    fn scope_info(&self, handle: ScopeHandle) -> ScopeInfo {
        let devices = self.devices.borrow();
        let device = &devices[handle.0 as usize];
        ScopeInfo {
            channel_count: device.channel_count,
            measure_modes: device.measure_modes,
            segment_count_max: device.segment_count_max,
            has_connection_test: device.has_connection_test,
        }
    }

    fn scope_set(&self, handle: ScopeHandle, property: ScopeProperty) -> Status {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        if device.removed {
            return Status::DEVICE_GONE;
        }
        device.applied.push(format!("scope {:?}", property));
        match property {
            ScopeProperty::RecordLength(length) => {
                device.scope.record_length = length.min(device.max_record_length);
                if length > device.max_record_length {
                    return Status::VALUE_CLIPPED;
                }
            }
            ScopeProperty::SegmentCount(count) => {
                device.scope.segment_count = count.min(device.segment_count_max).max(1);
                if count > device.segment_count_max {
                    return Status::VALUE_CLIPPED;
                }
            }
            ScopeProperty::MeasureMode(mode) => {
                if !device.measure_modes.contains(mode.bit()) {
                    return Status::NOT_SUPPORTED;
                }
                device.scope.streaming = mode == MeasureMode::Stream;
            }
            _ => {}
        }
        Status::SUCCESS
    }

    fn scope_set_channel(
        &self,
        handle: ScopeHandle,
        channel: u16,
        property: ChannelProperty,
    ) -> Status {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        if device.removed {
            return Status::DEVICE_GONE;
        }
        device.applied.push(format!("ch{} {:?}", channel, property));
        let Some(state) = device.scope.channels.get_mut(channel as usize) else {
            return Status::INVALID_CHANNEL;
        };
        if let ChannelProperty::Enabled(enabled) = property {
            state.enabled = enabled;
        }
        Status::SUCCESS
    }

    fn scope_set_channel_trigger(
        &self,
        handle: ScopeHandle,
        channel: u16,
        property: ChannelTriggerProperty,
    ) -> Status {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        if device.removed {
            return Status::DEVICE_GONE;
        }
        device.applied.push(format!("ch{} trigger {:?}", channel, property));
        if channel >= device.channel_count {
            return Status::INVALID_CHANNEL;
        }
        Status::SUCCESS
    }

    fn scope_record_length(&self, handle: ScopeHandle) -> u64 {
        self.devices.borrow()[handle.0 as usize].scope.record_length
    }

    fn scope_segment_count(&self, handle: ScopeHandle) -> u32 {
        self.devices.borrow()[handle.0 as usize].scope.segment_count
    }

    fn scope_start(&self, handle: ScopeHandle) -> Status {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        if device.removed {
            return Status::DEVICE_GONE;
        }
        device.scope.started = true;
        device.scope.ready_polls_seen = 0;
        device.scope.reads_done = 0;
        device.scope.segments_pending = device.scope.segment_count;
        Status::SUCCESS
    }

    fn scope_stop(&self, handle: ScopeHandle) -> Status {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        device.scope.started = false;
        Status::SUCCESS
    }

    fn scope_is_data_ready(&self, handle: ScopeHandle) -> bool {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        if !device.scope.started || device.removed {
            return false;
        }
        let seen = device.scope.ready_polls_seen;
        device.scope.ready_polls_seen += 1;
        if let Some(limit) = device.remove_after_ready_polls {
            if seen >= limit {
                device.removed = true;
                return false;
            }
        }
        seen >= device.ready_delay && device.scope.segments_pending > 0
    }

    fn scope_is_data_overflow(&self, handle: ScopeHandle) -> bool {
        let devices = self.devices.borrow();
        let device = &devices[handle.0 as usize];
        match device.overflow_after_reads {
            Some(reads) => device.scope.started && device.scope.reads_done >= reads,
            None => false,
        }
    }

    fn scope_read(&self, handle: ScopeHandle, buffers: &mut [&mut [f32]]) -> (u64, Status) {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        if device.removed {
            return (0, Status::DEVICE_GONE);
        }
        if device.scope.segments_pending == 0 {
            return (0, Status::UNSUCCESSFUL);
        }
        let segment = device.scope.segment_count - device.scope.segments_pending;
        let enabled: Vec<u16> = device
            .scope
            .channels
            .iter()
            .enumerate()
            .filter(|(_, state)| state.enabled)
            .map(|(channel, _)| channel as u16)
            .collect();
        let mut samples = device.scope.record_length;
        for (buffer, &channel) in buffers.iter_mut().zip(enabled.iter()) {
            samples = samples.min(buffer.len() as u64);
            for (index, slot) in buffer.iter_mut().enumerate().take(samples as usize) {
                *slot = (device.fill)(segment, channel, index as u64);
            }
        }
        device.scope.segments_pending -= 1;
        device.scope.reads_done += 1;
        // stream mode rearms for the next chunk; block mode is done
        if device.scope.segments_pending == 0 && device.scope.streaming {
            device.scope.segments_pending = 1;
            device.scope.ready_polls_seen = 0;
        }
        (samples, Status::SUCCESS)
    }

    fn scope_start_connection_test(&self, handle: ScopeHandle) -> Status {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        if !device.has_connection_test {
            return Status::NOT_SUPPORTED;
        }
        device.scope.test_running = true;
        device.scope.test_polls_seen = 0;
        Status::SUCCESS
    }

    fn scope_is_connection_test_completed(&self, handle: ScopeHandle) -> bool {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        if !device.scope.test_running {
            return false;
        }
        let seen = device.scope.test_polls_seen;
        device.scope.test_polls_seen += 1;
        seen >= device.ready_delay
    }

    fn scope_connection_test_data(
        &self,
        handle: ScopeHandle,
        states: &mut [ConnectionState],
    ) -> (u16, Status) {
        let devices = self.devices.borrow();
        let device = &devices[handle.0 as usize];
        let count = (device.channel_count as usize).min(states.len());
        for state in states.iter_mut().take(count) {
            *state = ConnectionState::Connected;
        }
        (count as u16, Status::SUCCESS)
    }

    fn generator_info(&self, handle: GenHandle) -> GeneratorInfo {
        let devices = self.devices.borrow();
        let device = &devices[handle.0 as usize];
        GeneratorInfo {
            signal_types: device.signal_types,
            modes: device.generator_modes,
            trigger_input_count: device.trigger_inputs.len() as u16,
        }
    }

    fn generator_set(&self, handle: GenHandle, property: GeneratorProperty) -> Status {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        if device.removed {
            return Status::DEVICE_GONE;
        }
        device.applied.push(format!("gen {:?}", property));
        match property {
            GeneratorProperty::SignalType(signal) if !device.signal_types.contains(signal.bit()) => {
                Status::NOT_SUPPORTED
            }
            GeneratorProperty::Mode(mode) if !device.generator_modes.contains(mode.bit()) => {
                Status::NOT_SUPPORTED
            }
            _ => Status::SUCCESS,
        }
    }

    fn generator_set_waveform(&self, handle: GenHandle, data: &[f32]) -> Status {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        if !device.signal_types.contains(SignalTypes::ARBITRARY) {
            return Status::NOT_SUPPORTED;
        }
        device.applied.push(format!("gen waveform[{}]", data.len()));
        Status::SUCCESS
    }

    fn generator_start(&self, handle: GenHandle) -> Status {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        if device.removed {
            return Status::DEVICE_GONE;
        }
        device.generator.started = true;
        device.generator.burst_polls_seen = 0;
        Status::SUCCESS
    }

    fn generator_stop(&self, handle: GenHandle) -> Status {
        let mut devices = self.devices.borrow_mut();
        devices[handle.0 as usize].generator.started = false;
        Status::SUCCESS
    }

    fn generator_is_burst_active(&self, handle: GenHandle) -> bool {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        if !device.generator.started || device.removed {
            return false;
        }
        let seen = device.generator.burst_polls_seen;
        device.generator.burst_polls_seen += 1;
        seen < device.burst_poll_count
    }

    fn i2c_write(&self, handle: I2cHandle, address: u8, data: &[u8]) -> Status {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        if device.removed {
            return Status::DEVICE_GONE;
        }
        device.i2c_ops.push(I2cOp::Raw {
            address,
            data: data.to_vec(),
        });
        Status::SUCCESS
    }

    fn i2c_write_byte_word(&self, handle: I2cHandle, address: u8, byte: u8, word: u16) -> Status {
        let mut devices = self.devices.borrow_mut();
        let device = &mut devices[handle.0 as usize];
        if device.removed {
            return Status::DEVICE_GONE;
        }
        device.i2c_ops.push(I2cOp::ByteWord { address, byte, word });
        Status::SUCCESS
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::params::GeneratorMode;

    #[test]
    fn test_open_requires_kind() {
        let driver = MockDriver::with_device(MockDevice::generator("Gen", 1));
        assert!(!driver.can_open(0, DeviceKind::Oscilloscope));
        assert!(driver.open_oscilloscope(0).is_none());
        assert!(driver.open_generator(0).is_some());
    }

    #[test]
    fn test_second_open_is_invalid() {
        let driver = MockDriver::with_device(MockDevice::oscilloscope("Scope", 1));
        let first = driver.open_oscilloscope(0).unwrap();
        assert!(driver.open_oscilloscope(0).is_none());
        assert!(driver.close(first.into()).is_success());
        assert!(driver.open_oscilloscope(0).is_some());
    }

    #[test]
    fn test_record_length_clamps_with_warning() {
        let driver =
            MockDriver::with_device(MockDevice::oscilloscope("Scope", 1).max_record_length(100));
        let scope = driver.open_oscilloscope(0).unwrap();
        let status = driver.scope_set(scope, ScopeProperty::RecordLength(5000));
        assert_eq!(status, Status::VALUE_CLIPPED);
        assert_eq!(driver.scope_record_length(scope), 100);
    }

    #[test]
    fn test_ready_after_delay() {
        let driver = MockDriver::with_device(MockDevice::oscilloscope("Scope", 1).ready_delay(2));
        let scope = driver.open_oscilloscope(0).unwrap();
        driver.scope_set(scope, ScopeProperty::MeasureMode(MeasureMode::Block));
        driver.scope_set(scope, ScopeProperty::RecordLength(10));
        assert!(!driver.scope_is_data_ready(scope)); // not started yet
        driver.scope_start(scope);
        assert!(!driver.scope_is_data_ready(scope));
        assert!(!driver.scope_is_data_ready(scope));
        assert!(driver.scope_is_data_ready(scope));
    }

    #[test]
    fn test_read_fills_enabled_channels() {
        let driver = MockDriver::with_device(MockDevice::oscilloscope("Scope", 1));
        let scope = driver.open_oscilloscope(0).unwrap();
        driver.scope_set(scope, ScopeProperty::RecordLength(4));
        driver.scope_set_channel(scope, 0, ChannelProperty::Enabled(true));
        driver.scope_set_channel(scope, 1, ChannelProperty::Enabled(true));
        driver.scope_start(scope);
        assert!(driver.scope_is_data_ready(scope));
        let mut ch1 = vec![0.0f32; 4];
        let mut ch2 = vec![0.0f32; 4];
        let mut buffers = [ch1.as_mut_slice(), ch2.as_mut_slice()];
        let (samples, status) = driver.scope_read(scope, &mut buffers);
        assert!(status.is_success());
        assert_eq!(samples, 4);
        assert_eq!(ch1, [0.0, 1.0, 2.0, 3.0]);
        assert_eq!(ch2, [1000.0, 1001.0, 1002.0, 1003.0]);
    }

    #[test]
    fn test_scripted_removal() {
        let driver = MockDriver::with_device(MockDevice::oscilloscope("Scope", 1).removed_after(0));
        let scope = driver.open_oscilloscope(0).unwrap();
        driver.scope_start(scope);
        assert!(!driver.scope_is_data_ready(scope));
        assert!(driver.is_removed(scope.into()));
    }

    #[test]
    fn test_invalid_channel_is_reported_not_fatal() {
        let driver = MockDriver::with_device(MockDevice::oscilloscope("Scope", 1).channels(1));
        let scope = driver.open_oscilloscope(0).unwrap();
        let status = driver.scope_set_channel(scope, 5, ChannelProperty::Enabled(true));
        assert_eq!(status, Status::INVALID_CHANNEL);
        // the call is still recorded and the device remains usable
        assert!(driver.scope_set_channel(scope, 0, ChannelProperty::Enabled(true)).is_success());
        assert_eq!(driver.applied(0).len(), 2);
    }

    #[test]
    fn test_i2c_ops_recorded() {
        let driver = MockDriver::with_device(MockDevice::i2c_host("I2C", 1));
        let i2c = driver.open_i2c_host(0).unwrap();
        driver.i2c_write_byte_word(i2c, 12, 0x38, 1);
        assert_eq!(
            driver.i2c_ops(0),
            vec![I2cOp::ByteWord { address: 12, byte: 0x38, word: 1 }]
        );
    }

    #[test]
    fn test_trigger_input_lookup() {
        let driver = MockDriver::with_device(MockDevice::combined("Combi", 1));
        let scope = driver.open_oscilloscope(0).unwrap();
        assert_eq!(
            driver.trigger_input_index(scope.into(), TriggerInputId::GeneratorStart),
            Some(0)
        );
        assert_eq!(
            driver.trigger_input_index(scope.into(), TriggerInputId::GeneratorStop),
            Some(1)
        );
        assert_eq!(
            driver.trigger_input_index(scope.into(), TriggerInputId::GeneratorNewPeriod),
            Some(2)
        );
        assert_eq!(driver.trigger_input_index(scope.into(), TriggerInputId::Ext1), None);
    }

    #[test]
    fn test_gated_mode_requires_capability() {
        let driver = MockDriver::new();
        driver.push(MockDevice::generator("Plain", 1));
        driver.push(
            MockDevice::generator("Gated", 2)
                .generator_modes(GeneratorModes::CONTINUOUS | GeneratorModes::GATED_PERIODS),
        );
        let plain = driver.open_generator(0).unwrap();
        assert_eq!(
            driver.generator_set(plain, GeneratorProperty::Mode(GeneratorMode::GatedPeriods)),
            Status::NOT_SUPPORTED
        );
        let gated = driver.open_generator(1).unwrap();
        assert!(driver
            .generator_set(gated, GeneratorProperty::Mode(GeneratorMode::GatedPeriods))
            .is_success());
    }

    #[test]
    fn test_burst_completes_after_polls() {
        let driver = MockDriver::with_device(
            MockDevice::generator("Gen", 1).generator_modes(GeneratorModes::BURST_COUNT),
        );
        let generator = driver.open_generator(0).unwrap();
        driver.generator_start(generator);
        let mut polls = 0;
        while driver.generator_is_burst_active(generator) {
            polls += 1;
            assert!(polls < 100);
        }
        assert_eq!(polls, 3);
    }
}
