//! Generates a 50 Hz sine waveform, 4 Vpp, 100 periods.

use benchtop::mock::{MockDevice, MockDriver};
use benchtop::{locate, session};
use benchtop::{GeneratorConfig, GeneratorMode, GeneratorModes, Poller, SignalTypes};

fn main() -> benchtop::Result<()> {
    env_logger::init();

    let driver = MockDriver::with_device(
        MockDevice::generator("Benchtop AWG-600", 31592)
            .signal_types(SignalTypes::SINE | SignalTypes::TRIANGLE | SignalTypes::SQUARE)
            .generator_modes(GeneratorModes::CONTINUOUS | GeneratorModes::BURST_COUNT),
    );

    let generator = match locate::find_generator(&driver, |info| {
        info.modes.contains(GeneratorModes::BURST_COUNT)
    }) {
        Ok(generator) => generator,
        Err(error) => {
            eprintln!("No generator available with burst support!");
            return Err(error);
        }
    };

    generator.configure(&GeneratorConfig {
        frequency: 50.0, // 50 Hz
        amplitude: 2.0,  // 2 V
        offset: 0.0,     // 0 V
        mode: GeneratorMode::BurstCount,
        burst_count: 100, // 100 periods
        ..GeneratorConfig::default()
    });
    generator.enable_output();

    println!("Generating burst...");
    session::burst_generate(&generator, &Poller::new())?;
    generator.disable_output();
    println!("Burst completed");
    Ok(())
}
