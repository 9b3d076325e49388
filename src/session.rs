//! The control loop every example shares: start the device, poll until a
//! terminal condition, retrieve what was captured, hand it on.

use crate::driver::Driver;
use crate::generator::Generator;
use crate::params::ConnectionState;
use crate::poll::{PollOutcome, PollStep, Poller};
use crate::scope::Oscilloscope;
use crate::{Error, Result};

/// One block acquisition: `channels[ch][i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockCapture {
    pub channels: Vec<Vec<f32>>,
}

/// One segmented acquisition of a single channel: `segments[seg][i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedCapture {
    pub segments: Vec<Vec<f32>>,
}

fn read_into(scope: &Oscilloscope<'_, impl Driver>, channels: u16) -> (Vec<Vec<f32>>, u64) {
    let record_length = scope.record_length();
    let mut buffers: Vec<Vec<f32>> = vec![vec![0.0; record_length as usize]; channels as usize];
    let mut slices: Vec<&mut [f32]> = buffers.iter_mut().map(Vec::as_mut_slice).collect();
    let samples = scope.read(&mut slices);
    for buffer in buffers.iter_mut() {
        buffer.truncate(samples as usize);
    }
    (buffers, samples)
}

/// Start a block measurement, wait for it to complete and retrieve one
/// buffer per channel. Device removal fails the session before anything is
/// retrieved or exported.
pub fn block_capture<D: Driver>(
    scope: &Oscilloscope<'_, D>,
    poller: &Poller,
    channels: u16,
) -> Result<BlockCapture> {
    scope.start();
    let outcome = poller.run(|| {
        Ok(if scope.is_removed() {
            PollStep::Done(PollOutcome::Removed)
        } else if scope.is_data_ready() {
            PollStep::Done(PollOutcome::Ready)
        } else {
            PollStep::Pending
        })
    })?;
    match outcome {
        PollOutcome::Removed => Err(Error::DeviceGone),
        _ => {
            let (channels, _) = read_into(scope, channels);
            Ok(BlockCapture { channels })
        }
    }
}

/// Start a segmented block measurement and drain every pending segment of
/// channel 1.
pub fn segmented_capture<D: Driver>(
    scope: &Oscilloscope<'_, D>,
    poller: &Poller,
) -> Result<SegmentedCapture> {
    scope.start();
    let outcome = poller.run(|| {
        Ok(if scope.is_removed() {
            PollStep::Done(PollOutcome::Removed)
        } else if scope.is_data_ready() {
            PollStep::Done(PollOutcome::Ready)
        } else {
            PollStep::Pending
        })
    })?;
    if outcome == PollOutcome::Removed {
        return Err(Error::DeviceGone);
    }
    let mut segments = Vec::new();
    loop {
        let (mut buffers, samples) = read_into(scope, 1);
        if samples == 0 {
            break;
        }
        segments.push(buffers.remove(0));
        if segments.len() >= scope.segment_count() as usize || !scope.is_data_ready() {
            break;
        }
    }
    Ok(SegmentedCapture { segments })
}

/// Run a stream measurement for `chunks` chunks, handing each retrieved
/// chunk to `sink` together with the running sample offset. The device is
/// stopped on every exit path.
pub fn stream_capture<D, S>(
    scope: &Oscilloscope<'_, D>,
    poller: &Poller,
    chunks: u32,
    channels: u16,
    mut sink: S,
) -> Result<()>
where
    D: Driver,
    S: FnMut(u64, &[Vec<f32>]) -> Result<()>,
{
    scope.start();
    let result = (|| {
        let mut offset = 0u64;
        for chunk in 0..chunks {
            log::info!("data chunk {}", chunk + 1);
            let outcome = poller.run(|| {
                Ok(if scope.is_removed() {
                    PollStep::Done(PollOutcome::Removed)
                } else if scope.is_data_overflow() {
                    PollStep::Done(PollOutcome::Overflow)
                } else if scope.is_data_ready() {
                    PollStep::Done(PollOutcome::Ready)
                } else {
                    PollStep::Pending
                })
            })?;
            match outcome {
                PollOutcome::Removed => return Err(Error::DeviceGone),
                PollOutcome::Overflow => return Err(Error::DataOverflow),
                PollOutcome::Ready => {
                    let (buffers, samples) = read_into(scope, channels);
                    sink(offset, &buffers)?;
                    offset += samples;
                }
            }
        }
        Ok(())
    })();
    scope.stop();
    result
}

/// Start a burst and wait until the generator reports it finished. The
/// generator is stopped afterwards; removal mid-burst fails the session.
pub fn burst_generate<D: Driver>(generator: &Generator<'_, D>, poller: &Poller) -> Result<()> {
    generator.start();
    let outcome = poller.run(|| {
        Ok(if generator.is_removed() {
            PollStep::Done(PollOutcome::Removed)
        } else if !generator.is_burst_active() {
            PollStep::Done(PollOutcome::Ready)
        } else {
            PollStep::Pending
        })
    })?;
    generator.stop();
    match outcome {
        PollOutcome::Removed => Err(Error::DeviceGone),
        _ => Ok(()),
    }
}

/// Run the oscilloscope's connection test and collect per-channel results.
pub fn connection_test<D: Driver>(
    scope: &Oscilloscope<'_, D>,
    poller: &Poller,
) -> Result<Vec<ConnectionState>> {
    scope.start_connection_test();
    let outcome = poller.run(|| {
        Ok(if scope.is_removed() {
            PollStep::Done(PollOutcome::Removed)
        } else if scope.is_connection_test_completed() {
            PollStep::Done(PollOutcome::Ready)
        } else {
            PollStep::Pending
        })
    })?;
    if outcome == PollOutcome::Removed {
        return Err(Error::DeviceGone);
    }
    let mut states = vec![ConnectionState::Undefined; scope.channel_count() as usize];
    let count = scope.connection_test_data(&mut states);
    states.truncate(count as usize);
    Ok(states)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::caps::MeasureModes;
    use crate::config::{ChannelConfig, ScopeConfig};
    use crate::locate::{find_generator, find_oscilloscope};
    use crate::mock::{MockDevice, MockDriver};
    use crate::params::{GeneratorMode, MeasureMode};
    use std::time::Duration;

    fn fast_poller() -> Poller {
        Poller::new().interval(Duration::from_millis(1))
    }

    #[test]
    fn test_block_capture_returns_synthetic_data() {
        let driver = MockDriver::with_device(
            MockDevice::oscilloscope("Scope", 1).channels(2).ready_delay(2),
        );
        let scope = find_oscilloscope(&driver, |_| true).unwrap();
        let applied = scope.configure(&ScopeConfig {
            record_length: 8,
            ..ScopeConfig::all_channels(2)
        });
        assert_eq!(applied.record_length, 8);
        let capture = block_capture(&scope, &fast_poller(), 2).unwrap();
        assert_eq!(capture.channels.len(), 2);
        assert_eq!(capture.channels[0].len(), 8);
        assert_eq!(capture.channels[1][3], 1003.0);
    }

    #[test]
    fn test_removed_device_aborts_before_retrieval() {
        let driver = MockDriver::with_device(
            MockDevice::oscilloscope("Scope", 1).ready_delay(10).removed_after(1),
        );
        let scope = find_oscilloscope(&driver, |_| true).unwrap();
        scope.configure(&ScopeConfig::default());
        let result = block_capture(&scope, &fast_poller(), 1);
        assert!(matches!(result, Err(Error::DeviceGone)));
    }

    #[test]
    fn test_segmented_capture_drains_all_segments() {
        let driver = MockDriver::with_device(MockDevice::oscilloscope("Scope", 1).segments(5));
        let scope = find_oscilloscope(&driver, |info| info.segment_count_max > 1).unwrap();
        let applied = scope.configure(&ScopeConfig {
            record_length: 16,
            segment_count: Some(5),
            channels: vec![ChannelConfig::default()],
            ..ScopeConfig::default()
        });
        assert_eq!(applied.segment_count, 5);
        let capture = segmented_capture(&scope, &fast_poller()).unwrap();
        assert_eq!(capture.segments.len(), 5);
        assert!(capture.segments.iter().all(|segment| segment.len() == 16));
    }

    #[test]
    fn test_stream_capture_delivers_chunks_then_overflow() {
        let driver = MockDriver::with_device(
            MockDevice::oscilloscope("Scope", 1)
                .measure_modes(MeasureModes::STREAM | MeasureModes::BLOCK)
                .overflow_after(2),
        );
        let scope = find_oscilloscope(&driver, |_| true).unwrap();
        scope.configure(&ScopeConfig {
            measure_mode: MeasureMode::Stream,
            record_length: 4,
            ..ScopeConfig::default()
        });
        let mut delivered = Vec::new();
        let result = stream_capture(&scope, &fast_poller(), 10, 1, |offset, buffers| {
            delivered.push((offset, buffers[0].clone()));
            Ok(())
        });
        assert!(matches!(result, Err(Error::DataOverflow)));
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[1].0, 4);
    }

    #[test]
    fn test_stream_capture_completes_without_overflow() {
        let driver = MockDriver::with_device(
            MockDevice::oscilloscope("Scope", 1)
                .measure_modes(MeasureModes::STREAM | MeasureModes::BLOCK),
        );
        let scope = find_oscilloscope(&driver, |_| true).unwrap();
        scope.configure(&ScopeConfig {
            measure_mode: MeasureMode::Stream,
            record_length: 4,
            ..ScopeConfig::default()
        });
        let mut chunks = 0;
        stream_capture(&scope, &fast_poller(), 3, 1, |_, _| {
            chunks += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(chunks, 3);
    }

    #[test]
    fn test_burst_generation_completes() {
        let driver = MockDriver::with_device(
            MockDevice::generator("Gen", 1)
                .generator_modes(crate::caps::GeneratorModes::BURST_COUNT),
        );
        let generator = find_generator(&driver, |_| true).unwrap();
        generator.configure(&crate::config::GeneratorConfig {
            mode: GeneratorMode::BurstCount,
            burst_count: 100,
            ..Default::default()
        });
        burst_generate(&generator, &fast_poller()).unwrap();
    }

    #[test]
    fn test_connection_test_reports_every_channel() {
        let driver = MockDriver::with_device(
            MockDevice::oscilloscope("Scope", 1).channels(4).connection_test(),
        );
        let scope = find_oscilloscope(&driver, |info| info.has_connection_test).unwrap();
        let states = connection_test(&scope, &fast_poller()).unwrap();
        assert_eq!(states, vec![ConnectionState::Connected; 4]);
    }
}
