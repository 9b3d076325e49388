//! Performs a block mode measurement and writes the data to
//! OscilloscopeBlock.csv.

use benchtop::mock::{MockDevice, MockDriver};
use benchtop::{export, locate, session};
use benchtop::{MeasureModes, Poller, ScopeConfig};

const FILENAME: &str = "OscilloscopeBlock.csv";

fn sine(_segment: u32, channel: u16, index: u64) -> f32 {
    (index as f32 * 0.005).sin() * (channel as f32 + 1.0)
}

fn main() -> benchtop::Result<()> {
    env_logger::init();

    let driver = MockDriver::with_device(
        MockDevice::oscilloscope("Benchtop MSO-5000", 28470)
            .channels(2)
            .measure_modes(MeasureModes::BLOCK | MeasureModes::STREAM)
            .ready_delay(3)
            .fill(sine),
    );

    let scope = match locate::find_oscilloscope(&driver, |info| {
        info.measure_modes.contains(MeasureModes::BLOCK)
    }) {
        Ok(scope) => scope,
        Err(error) => {
            eprintln!("No oscilloscope available with block measurement support!");
            return Err(error);
        }
    };

    let channel_count = scope.channel_count();
    let applied = scope.configure(&ScopeConfig {
        sample_frequency: 1e6,  // 1 MHz
        record_length: 10_000,  // 10 kS
        ..ScopeConfig::all_channels(channel_count)
    });
    println!(
        "Measuring {} samples on {} channels",
        applied.record_length, channel_count
    );

    let capture = session::block_capture(&scope, &Poller::new(), channel_count)?;
    export::write_channels(FILENAME, &capture.channels)?;
    println!("Data written to: {}", FILENAME);
    Ok(())
}
