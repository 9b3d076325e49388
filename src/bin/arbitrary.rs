//! Generates an arbitrary waveform until a key is pressed.

use benchtop::mock::{MockDevice, MockDriver};
use benchtop::{locate, term};
use benchtop::{FrequencyMode, GeneratorConfig, GeneratorModes, SignalType, SignalTypes};

fn main() -> benchtop::Result<()> {
    env_logger::init();

    let driver = MockDriver::with_device(
        MockDevice::generator("Benchtop AWG-600", 31592)
            .signal_types(SignalTypes::SINE | SignalTypes::ARBITRARY)
            .generator_modes(GeneratorModes::CONTINUOUS),
    );

    let generator = match locate::find_generator(&driver, |info| {
        info.signal_types.contains(SignalTypes::ARBITRARY)
    }) {
        Ok(generator) => generator,
        Err(error) => {
            eprintln!("No generator available with arbitrary support!");
            return Err(error);
        }
    };

    generator.configure(&GeneratorConfig {
        signal_type: SignalType::Arbitrary,
        frequency_mode: FrequencyMode::Sample,
        frequency: 100e3, // 100 kHz sample rate
        amplitude: 2.0,   // 2 V
        offset: 0.0,      // 0 V
        ..GeneratorConfig::default()
    });

    // decaying sine, one full table
    let waveform: Vec<f32> = (0..8192)
        .map(|index| {
            let index = index as f32;
            (index / 100.0).sin() * (1.0 - index / 8192.0)
        })
        .collect();
    generator.set_waveform(&waveform);
    generator.enable_output();
    generator.start();

    println!("Press any key to stop signal generation...");
    term::wait_for_key()?;

    generator.stop();
    generator.disable_output();
    Ok(())
}
