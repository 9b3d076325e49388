//! Prints all devices in the driver's device list.

use benchtop::mock::{MockDevice, MockDriver};
use benchtop::{Driver, GeneratorModes, MeasureModes, SignalTypes};

fn main() -> benchtop::Result<()> {
    env_logger::init();

    let driver = MockDriver::new();
    driver.push(
        MockDevice::oscilloscope("Benchtop MSO-5000", 28470)
            .channels(2)
            .measure_modes(MeasureModes::BLOCK | MeasureModes::STREAM)
            .segments(4)
            .connection_test(),
    );
    driver.push(
        MockDevice::generator("Benchtop AWG-600", 31592)
            .signal_types(
                SignalTypes::SINE
                    | SignalTypes::TRIANGLE
                    | SignalTypes::SQUARE
                    | SignalTypes::ARBITRARY,
            )
            .generator_modes(GeneratorModes::CONTINUOUS | GeneratorModes::BURST_COUNT),
    );
    driver.push(MockDevice::i2c_host("Benchtop I2C bridge", 40022));

    driver.refresh().report();
    let count = driver.device_count();
    if count == 0 {
        eprintln!("No devices found!");
        return Ok(());
    }

    println!("Available devices:");
    for index in 0..count {
        let Some(info) = driver.device_info(index) else { continue };
        println!("  Name: {}", info.name);
        println!("    Serial Number  : {}", info.serial);
        println!("    Available types: {:?}", info.kinds);
    }
    Ok(())
}
