//! Signal generator wrapper.

use crate::config::GeneratorConfig;
use crate::driver::{Driver, GenHandle, GeneratorInfo};
use crate::params::{GeneratorMode, GeneratorProperty, TriggerInputId, TriggerInputProperty,
    TriggerKind};

/// An open generator. Closed when dropped.
#[derive(Debug)]
pub struct Generator<'d, D: Driver> {
    driver: &'d D,
    handle: GenHandle,
}

impl<'d, D: Driver> Generator<'d, D> {
    pub(crate) fn new(driver: &'d D, handle: GenHandle) -> Generator<'d, D> {
        Generator { driver, handle }
    }

    pub fn info(&self) -> GeneratorInfo {
        self.driver.generator_info(self.handle)
    }

    /// Apply `config` in order. As with the oscilloscope, statuses are
    /// reported but never stop the sequence.
    pub fn configure(&self, config: &GeneratorConfig) {
        log::debug!("configure({:?})", config);
        let driver = self.driver;
        let handle = self.handle;
        driver.generator_set(handle, GeneratorProperty::SignalType(config.signal_type)).report();
        driver
            .generator_set(handle, GeneratorProperty::FrequencyMode(config.frequency_mode))
            .report();
        driver.generator_set(handle, GeneratorProperty::Frequency(config.frequency)).report();
        driver.generator_set(handle, GeneratorProperty::Amplitude(config.amplitude)).report();
        driver.generator_set(handle, GeneratorProperty::Offset(config.offset)).report();
        driver.generator_set(handle, GeneratorProperty::Symmetry(config.symmetry)).report();
        driver.generator_set(handle, GeneratorProperty::Mode(config.mode)).report();
        if config.mode == GeneratorMode::BurstCount {
            driver
                .generator_set(handle, GeneratorProperty::BurstCount(config.burst_count))
                .report();
        }
    }

    #[track_caller]
    pub fn set_waveform(&self, data: &[f32]) {
        log::debug!("set_waveform({} samples)", data.len());
        self.driver.generator_set_waveform(self.handle, data).report();
    }

    #[track_caller]
    pub fn enable_output(&self) {
        self.driver.generator_set(self.handle, GeneratorProperty::OutputOn(true)).report();
    }

    #[track_caller]
    pub fn disable_output(&self) {
        self.driver.generator_set(self.handle, GeneratorProperty::OutputOn(false)).report();
    }

    /// Arm a device trigger input so generation is gated by `id`.
    #[track_caller]
    pub fn arm_trigger_input(&self, id: TriggerInputId, kind: Option<TriggerKind>) -> bool {
        match self.driver.trigger_input_index(self.handle.into(), id) {
            Some(input) => {
                self.driver
                    .set_trigger_input(self.handle.into(), input, TriggerInputProperty::Enabled(true))
                    .report();
                if let Some(kind) = kind {
                    self.driver
                        .set_trigger_input(
                            self.handle.into(),
                            input,
                            TriggerInputProperty::Kind(kind),
                        )
                        .report();
                }
                true
            }
            None => {
                log::warn!("device has no {:?} trigger input", id);
                false
            }
        }
    }

    #[track_caller]
    pub fn start(&self) {
        log::debug!("start()");
        self.driver.generator_start(self.handle).report();
    }

    #[track_caller]
    pub fn stop(&self) {
        log::debug!("stop()");
        self.driver.generator_stop(self.handle).report();
    }

    pub fn is_burst_active(&self) -> bool {
        self.driver.generator_is_burst_active(self.handle)
    }

    pub fn is_removed(&self) -> bool {
        self.driver.is_removed(self.handle.into())
    }
}

impl<D: Driver> Drop for Generator<'_, D> {
    fn drop(&mut self) {
        self.driver.close(self.handle.into()).report();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::caps::{GeneratorModes, SignalTypes};
    use crate::mock::{MockDevice, MockDriver};
    use crate::params::SignalType;

    #[test]
    fn test_configure_applies_burst_count_only_in_burst_mode() {
        let driver = MockDriver::with_device(
            MockDevice::generator("Gen", 3)
                .generator_modes(GeneratorModes::CONTINUOUS | GeneratorModes::BURST_COUNT),
        );
        let generator = Generator::new(&driver, driver.open_generator(0).unwrap());
        generator.configure(&GeneratorConfig::default());
        assert!(!driver.applied(0).iter().any(|entry| entry.contains("BurstCount(")));
        generator.configure(&GeneratorConfig {
            mode: GeneratorMode::BurstCount,
            burst_count: 100,
            ..GeneratorConfig::default()
        });
        assert!(driver.applied(0).iter().any(|entry| entry.contains("BurstCount(100)")));
    }

    #[test]
    fn test_unsupported_signal_type_does_not_abort() {
        let driver = MockDriver::with_device(
            MockDevice::generator("Gen", 3).signal_types(SignalTypes::SINE),
        );
        let generator = Generator::new(&driver, driver.open_generator(0).unwrap());
        generator.configure(&GeneratorConfig {
            signal_type: SignalType::Pulse,
            ..GeneratorConfig::default()
        });
        // the frequency set after the rejected signal type still happened
        assert!(driver.applied(0).iter().any(|entry| entry.contains("Frequency(1000.0)")));
    }

    #[test]
    fn test_arm_trigger_input_enables_and_sets_kind() {
        let driver = MockDriver::with_device(
            MockDevice::generator("Gen", 3)
                .trigger_inputs(&[TriggerInputId::Ext1, TriggerInputId::Ext2]),
        );
        let generator = Generator::new(&driver, driver.open_generator(0).unwrap());
        assert!(generator.arm_trigger_input(TriggerInputId::Ext1, Some(TriggerKind::FallingEdge)));
        let applied = driver.applied(0);
        assert!(applied.iter().any(|entry| entry.contains("trigger_input[0] Enabled(true)")));
        assert!(applied.iter().any(|entry| entry.contains("trigger_input[0] Kind(FallingEdge)")));
    }

    #[test]
    fn test_arm_trigger_input_without_kind() {
        let driver = MockDriver::with_device(
            MockDevice::generator("Gen", 3).trigger_inputs(&[TriggerInputId::Ext2]),
        );
        let generator = Generator::new(&driver, driver.open_generator(0).unwrap());
        assert!(!generator.arm_trigger_input(TriggerInputId::Ext1, None));
        assert!(generator.arm_trigger_input(TriggerInputId::Ext2, None));
        let applied = driver.applied(0);
        assert!(applied.iter().any(|entry| entry.contains("trigger_input[0] Enabled(true)")));
        assert!(!applied.iter().any(|entry| entry.contains("Kind(")));
    }

    #[test]
    fn test_missing_trigger_input() {
        let driver = MockDriver::with_device(MockDevice::generator("Gen", 3));
        let generator = Generator::new(&driver, driver.open_generator(0).unwrap());
        assert!(!generator.arm_trigger_input(TriggerInputId::GeneratorNewPeriod, None));
    }
}
