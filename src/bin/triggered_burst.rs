//! Generates a 100 kHz square waveform, 25% duty cycle, 0..5 V, 20 periods
//! per burst, triggered by the external trigger input.

use benchtop::mock::{MockDevice, MockDriver};
use benchtop::{locate, term};
use benchtop::{
    GeneratorConfig, GeneratorMode, GeneratorModes, SignalType, SignalTypes, TriggerInputId,
    TriggerKind,
};

fn main() -> benchtop::Result<()> {
    env_logger::init();

    let driver = MockDriver::with_device(
        MockDevice::generator("Benchtop AWG-600", 31592)
            .signal_types(SignalTypes::SINE | SignalTypes::SQUARE)
            .generator_modes(GeneratorModes::CONTINUOUS | GeneratorModes::BURST_COUNT)
            .trigger_inputs(&[TriggerInputId::Ext1, TriggerInputId::Ext2]),
    );

    let generator = match locate::find_generator(&driver, |info| {
        info.modes.contains(GeneratorModes::BURST_COUNT) && info.trigger_input_count > 0
    }) {
        Ok(generator) => generator,
        Err(error) => {
            eprintln!("No generator available with triggered burst support!");
            return Err(error);
        }
    };

    generator.configure(&GeneratorConfig {
        signal_type: SignalType::Square,
        frequency: 100e3, // 100 kHz
        amplitude: 2.5,   // 2.5 V
        offset: 2.5,      // 2.5 V
        symmetry: 0.25,   // 25 %
        mode: GeneratorMode::BurstCount,
        burst_count: 20, // 20 periods
        ..GeneratorConfig::default()
    });

    // one burst per falling edge on the first available external input
    let armed = generator.arm_trigger_input(TriggerInputId::Ext1, Some(TriggerKind::FallingEdge))
        || generator.arm_trigger_input(TriggerInputId::Ext2, Some(TriggerKind::FallingEdge));
    if !armed {
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
