//! Oscilloscope wrapper: configuration sequencing, acquisition control and
//! buffered retrieval over the driver seam.

use crate::config::ScopeConfig;
use crate::driver::{Driver, ScopeHandle, ScopeInfo};
use crate::params::{ChannelProperty, ChannelTriggerProperty, ConnectionState, ScopeProperty,
    TriggerInputProperty};

/// Configuration values actually in effect after the driver had its say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub record_length: u64,
    pub segment_count: u32,
}

/// An open oscilloscope. Closed when dropped.
#[derive(Debug)]
pub struct Oscilloscope<'d, D: Driver> {
    driver: &'d D,
    handle: ScopeHandle,
}

impl<'d, D: Driver> Oscilloscope<'d, D> {
    pub(crate) fn new(driver: &'d D, handle: ScopeHandle) -> Oscilloscope<'d, D> {
        Oscilloscope { driver, handle }
    }

    pub fn info(&self) -> ScopeInfo {
        self.driver.scope_info(self.handle)
    }

    pub fn channel_count(&self) -> u16 {
        self.info().channel_count
    }

    /// Apply `config` as an ordered sequence of property-set calls. Statuses
    /// are fed to the reporter for diagnostics; a warning or error does not
    /// stop the sequence. The driver-clamped record length and segment count
    /// are read back and returned.
    pub fn configure(&self, config: &ScopeConfig) -> Applied {
        log::debug!("configure({:?})", config);
        let driver = self.driver;
        let handle = self.handle;
        driver.scope_set(handle, ScopeProperty::MeasureMode(config.measure_mode)).report();
        driver
            .scope_set(handle, ScopeProperty::SampleFrequency(config.sample_frequency))
            .report();
        driver.scope_set(handle, ScopeProperty::RecordLength(config.record_length)).report();
        driver
            .scope_set(handle, ScopeProperty::PreSampleRatio(config.pre_sample_ratio))
            .report();
        if let Some(segments) = config.segment_count {
            driver.scope_set(handle, ScopeProperty::SegmentCount(segments)).report();
        }
        for (channel, channel_config) in config.channels.iter().enumerate() {
            let channel = channel as u16;
            driver
                .scope_set_channel(handle, channel, ChannelProperty::Enabled(channel_config.enabled))
                .report();
            driver
                .scope_set_channel(handle, channel, ChannelProperty::Range(channel_config.range))
                .report();
            driver
                .scope_set_channel(
                    handle,
                    channel,
                    ChannelProperty::Coupling(channel_config.coupling),
                )
                .report();
        }
        driver
            .scope_set(handle, ScopeProperty::TriggerTimeout(config.trigger_timeout))
            .report();
        // leave exactly the requested trigger source enabled
        for channel in 0..self.channel_count() {
            driver
                .scope_set_channel_trigger(handle, channel, ChannelTriggerProperty::Enabled(false))
                .report();
        }
        if let Some(trigger) = &config.trigger {
            driver
                .scope_set_channel_trigger(
                    handle,
                    trigger.channel,
                    ChannelTriggerProperty::Enabled(true),
                )
                .report();
            driver
                .scope_set_channel_trigger(
                    handle,
                    trigger.channel,
                    ChannelTriggerProperty::Kind(trigger.kind),
                )
                .report();
            driver
                .scope_set_channel_trigger(
                    handle,
                    trigger.channel,
                    ChannelTriggerProperty::Level(trigger.level),
                )
                .report();
            driver
                .scope_set_channel_trigger(
                    handle,
                    trigger.channel,
                    ChannelTriggerProperty::Hysteresis(trigger.hysteresis),
                )
                .report();
        }
        if let Some(id) = config.trigger_input {
            match driver.trigger_input_index(handle.into(), id) {
                Some(input) => {
                    driver
                        .set_trigger_input(handle.into(), input, TriggerInputProperty::Enabled(true))
                        .report();
                }
                None => log::warn!("device has no {:?} trigger input", id),
            }
        }
        Applied {
            record_length: driver.scope_record_length(handle),
            segment_count: driver.scope_segment_count(handle),
        }
    }

    pub fn record_length(&self) -> u64 {
        self.driver.scope_record_length(self.handle)
    }

    pub fn segment_count(&self) -> u32 {
        self.driver.scope_segment_count(self.handle)
    }

    #[track_caller]
    pub fn start(&self) {
        log::debug!("start()");
        self.driver.scope_start(self.handle).report();
    }

    #[track_caller]
    pub fn stop(&self) {
        log::debug!("stop()");
        self.driver.scope_stop(self.handle).report();
    }

    pub fn is_data_ready(&self) -> bool {
        self.driver.scope_is_data_ready(self.handle)
    }

    pub fn is_data_overflow(&self) -> bool {
        self.driver.scope_is_data_overflow(self.handle)
    }

    pub fn is_removed(&self) -> bool {
        self.driver.is_removed(self.handle.into())
    }

    /// Fill one buffer per enabled channel; returns samples written per
    /// channel. In segmented block mode each call consumes one segment.
    #[track_caller]
    pub fn read(&self, buffers: &mut [&mut [f32]]) -> u64 {
        let (samples, status) = self.driver.scope_read(self.handle, buffers);
        status.report();
        log::debug!("read() = {} samples", samples);
        samples
    }

    #[track_caller]
    pub fn start_connection_test(&self) {
        log::debug!("start_connection_test()");
        self.driver.scope_start_connection_test(self.handle).report();
    }

    pub fn is_connection_test_completed(&self) -> bool {
        self.driver.scope_is_connection_test_completed(self.handle)
    }

    #[track_caller]
    pub fn connection_test_data(&self, states: &mut [ConnectionState]) -> u16 {
        let (count, status) = self.driver.scope_connection_test_data(self.handle, states);
        status.report();
        count
    }
}

impl<D: Driver> Drop for Oscilloscope<'_, D> {
    fn drop(&mut self) {
        self.driver.close(self.handle.into()).report();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::ChannelTriggerConfig;
    use crate::mock::{MockDevice, MockDriver};
    use crate::params::MeasureMode;

    fn scope_driver() -> MockDriver {
        MockDriver::with_device(MockDevice::oscilloscope("Scope", 7).max_record_length(5000))
    }

    #[test]
    fn test_configure_reads_back_clamped_length() {
        let driver = scope_driver();
        let scope = Oscilloscope::new(&driver, driver.open_oscilloscope(0).unwrap());
        let applied = scope.configure(&ScopeConfig {
            record_length: 100_000,
            ..ScopeConfig::all_channels(2)
        });
        assert_eq!(applied.record_length, 5000);
        assert_eq!(applied.segment_count, 1);
    }

    #[test]
    fn test_configure_continues_past_bad_channel() {
        let driver = scope_driver();
        let scope = Oscilloscope::new(&driver, driver.open_oscilloscope(0).unwrap());
        let mut config = ScopeConfig::all_channels(4); // only 2 exist
        config.trigger = Some(ChannelTriggerConfig::default());
        scope.configure(&config);
        let applied = driver.applied(0);
        // trigger setup still ran after the invalid channel sets
        assert!(applied.iter().any(|entry| entry.contains("ch3")));
        assert!(applied.iter().any(|entry| entry.contains("trigger Enabled(true)")));
    }

    #[test]
    fn test_trigger_sources_disabled_before_selection() {
        let driver = scope_driver();
        let scope = Oscilloscope::new(&driver, driver.open_oscilloscope(0).unwrap());
        scope.configure(&ScopeConfig {
            measure_mode: MeasureMode::Block,
            ..ScopeConfig::default()
        });
        let applied = driver.applied(0);
        let disable = applied
            .iter()
            .position(|entry| entry.contains("ch1 trigger Enabled(false)"))
            .unwrap();
        let enable = applied
            .iter()
            .position(|entry| entry.contains("ch0 trigger Enabled(true)"))
            .unwrap();
        assert!(disable < enable);
    }

    #[test]
    fn test_drop_closes_handle() {
        let driver = scope_driver();
        {
            let _scope = Oscilloscope::new(&driver, driver.open_oscilloscope(0).unwrap());
        }
        // the handle is free again
        assert!(driver.open_oscilloscope(0).is_some());
    }
}
