//! Sets up the generator to produce a 1 kHz triangle waveform, 4 Vpp, and
//! performs a block mode measurement triggered on "generator new period".
//! The data is written to OscilloscopeGeneratorTrigger.csv.

use benchtop::mock::{MockDevice, MockDriver};
use benchtop::{export, locate, session};
use benchtop::{GeneratorConfig, MeasureModes, Poller, ScopeConfig, SignalType, TriggerInputId};

const FILENAME: &str = "OscilloscopeGeneratorTrigger.csv";

fn triangle(_segment: u32, channel: u16, index: u64) -> f32 {
    let phase = (index % 1000) as f32 / 1000.0;
    let value = if phase < 0.5 { phase * 4.0 - 1.0 } else { 3.0 - phase * 4.0 };
    value * (channel as f32 + 1.0)
}

fn main() -> benchtop::Result<()> {
    env_logger::init();

    let driver = MockDriver::with_device(
        MockDevice::combined("Benchtop MSO-5000", 28470)
            .measure_modes(MeasureModes::BLOCK | MeasureModes::STREAM)
            .ready_delay(3)
            .fill(triangle),
    );

    let (scope, generator) = match locate::find_oscilloscope_with_generator(&driver, |info| {
        info.measure_modes.contains(MeasureModes::BLOCK)
    }) {
        Ok(devices) => devices,
        Err(error) => {
            eprintln!("No oscilloscope available with block measurement support and a generator!");
            return Err(error);
        }
    };

    let channel_count = scope.channel_count();
    let applied = scope.configure(&ScopeConfig {
        sample_frequency: 1e6,  // 1 MHz
        record_length: 10_000,  // 10 kS
        trigger_timeout: 1.0,   // 1 s
        trigger: None,
        trigger_input: Some(TriggerInputId::GeneratorNewPeriod),
        ..ScopeConfig::all_channels(channel_count)
    });
    println!("Measuring {} samples on the generator's new period", applied.record_length);

    generator.configure(&GeneratorConfig {
        signal_type: SignalType::Triangle,
        frequency: 1e3, // 1 kHz
        amplitude: 2.0, // 2 V
        offset: 0.0,    // 0 V
        ..GeneratorConfig::default()
    });
    generator.enable_output();
    generator.start();

    let capture = session::block_capture(&scope, &Poller::new(), channel_count);

    generator.stop();
    generator.disable_output();

    export::write_channels(FILENAME, &capture?.channels)?;
    println!("Data written to: {}", FILENAME);
    Ok(())
}
