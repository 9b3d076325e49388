//! Performs a block mode measurement of 5 segments and writes the data to
//! OscilloscopeBlockSegmented.csv.

use benchtop::mock::{MockDevice, MockDriver};
use benchtop::{export, locate, session};
use benchtop::{ChannelConfig, MeasureModes, Poller, ScopeConfig};

const FILENAME: &str = "OscilloscopeBlockSegmented.csv";
const SEGMENTS: u32 = 5;

fn ramp(segment: u32, _channel: u16, index: u64) -> f32 {
    segment as f32 + index as f32 * 0.001
}

fn main() -> benchtop::Result<()> {
    env_logger::init();

    let driver = MockDriver::with_device(
        MockDevice::oscilloscope("Benchtop MSO-6000D", 30114)
            .channels(4)
            .measure_modes(MeasureModes::BLOCK)
            .segments(8)
            .ready_delay(3)
            .fill(ramp),
    );

    let scope = match locate::find_oscilloscope(&driver, |info| {
        info.measure_modes.contains(MeasureModes::BLOCK) && info.segment_count_max > 1
    }) {
        Ok(scope) => scope,
        Err(error) => {
            eprintln!("No oscilloscope available with block measurement and segmented trigger support!");
            return Err(error);
        }
    };

    // only channel 1 is measured; one column per segment is exported
    let applied = scope.configure(&ScopeConfig {
        sample_frequency: 1e6, // 1 MHz
        record_length: 1000,   // 1 kS
        segment_count: Some(SEGMENTS),
        channels: vec![ChannelConfig::default()],
        ..ScopeConfig::default()
    });
    println!(
        "Measuring {} segments of {} samples",
        applied.segment_count, applied.record_length
    );

    let capture = session::segmented_capture(&scope, &Poller::new())?;
    export::write_segments(FILENAME, &capture.segments)?;
    println!("Data written to: {}", FILENAME);
    Ok(())
}
