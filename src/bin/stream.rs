//! Performs a stream mode measurement and writes the data to
//! OscilloscopeStream.csv.

use benchtop::mock::{MockDevice, MockDriver};
use benchtop::{export, locate, session};
use benchtop::{MeasureMode, MeasureModes, Poller, ScopeConfig};

const FILENAME: &str = "OscilloscopeStream.csv";
const CHUNKS: u32 = 10;

fn noise(_segment: u32, channel: u16, index: u64) -> f32 {
    // cheap deterministic pseudo-noise
    let word = index.wrapping_mul(6364136223846793005).wrapping_add(channel as u64);
    (word >> 33) as f32 / (1u64 << 31) as f32 - 1.0
}

fn main() -> benchtop::Result<()> {
    env_logger::init();

    let driver = MockDriver::with_device(
        MockDevice::oscilloscope("Benchtop MSO-5000", 28470)
            .channels(2)
            .measure_modes(MeasureModes::BLOCK | MeasureModes::STREAM)
            .ready_delay(2)
            .fill(noise),
    );

    let scope = match locate::find_oscilloscope(&driver, |info| {
        info.measure_modes.contains(MeasureModes::STREAM)
    }) {
        Ok(scope) => scope,
        Err(error) => {
            eprintln!("No oscilloscope available with stream measurement support!");
            return Err(error);
        }
    };

    let channel_count = scope.channel_count();
    scope.configure(&ScopeConfig {
        measure_mode: MeasureMode::Stream,
        sample_frequency: 1e3, // 1 kHz
        record_length: 1000,   // 1 kS per chunk
        trigger: None,
        ..ScopeConfig::all_channels(channel_count)
    });

    let mut columns: Vec<Vec<f32>> = vec![Vec::new(); channel_count as usize];
    let result = session::stream_capture(
        &scope,
        &Poller::new(),
        CHUNKS,
        channel_count,
        |_offset, buffers| {
            for (column, buffer) in columns.iter_mut().zip(buffers) {
                column.extend_from_slice(buffer);
            }
            Ok(())
        },
    );
    if let Err(error) = &result {
        eprintln!("{}", error);
    }

    // a best-effort dump of everything received, even after a failure
    export::write_channels(FILENAME, &columns)?;
    println!("Data written to: {}", FILENAME);
    result
}
