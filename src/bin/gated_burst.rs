//! Generates a 10 kHz square waveform, 10 Vpp, while the external trigger
//! input is active.

use benchtop::mock::{MockDevice, MockDriver};
use benchtop::{locate, term};
use benchtop::{
    GeneratorConfig, GeneratorMode, GeneratorModes, SignalType, SignalTypes, TriggerInputId,
};

fn main() -> benchtop::Result<()> {
    env_logger::init();

    let driver = MockDriver::with_device(
        MockDevice::generator("Benchtop AWG-600", 31592)
            .signal_types(SignalTypes::SINE | SignalTypes::SQUARE)
            .generator_modes(GeneratorModes::CONTINUOUS | GeneratorModes::GATED_PERIODS)
            .trigger_inputs(&[TriggerInputId::Ext1]),
    );

    let generator = match locate::find_generator(&driver, |info| {
        info.modes.contains(GeneratorModes::GATED_PERIODS) && info.trigger_input_count > 0
    }) {
        Ok(generator) => generator,
        Err(error) => {
            eprintln!("No generator available with gated burst support!");
            return Err(error);
        }
    };

    generator.configure(&GeneratorConfig {
        signal_type: SignalType::Square,
        frequency: 10e3, // 10 kHz
        amplitude: 5.0,  // 5 V
        offset: 0.0,     // 0 V
        mode: GeneratorMode::GatedPeriods,
        ..GeneratorConfig::default()
    });

    // generation runs only while this input is held active
    if !generator.arm_trigger_input(TriggerInputId::Ext1, None) {
        eprintln!("Unknown trigger input!");
        std::process::exit(1);
    }

    generator.enable_output();
    generator.start();

    println!("Press any key to stop signal generation...");
    term::wait_for_key()?;

    generator.stop();
    generator.disable_output();
    Ok(())
}
