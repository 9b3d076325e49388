//! Controls an Analog Devices AD5667 dual 16-bit DAC behind an I2C host.

use benchtop::locate;
use benchtop::mock::{MockDevice, MockDriver};

// AD5667 address:
const AD5667_ADDRESS: u8 = 12;

// AD5667 registers:
const AD5667_REG_DAC_A: u8 = 0x00;

// AD5667 commands:
const AD5667_CMD_WRITE_UPDATE: u8 = 0x18;
const AD5667_CMD_REF_SETUP: u8 = 0x38;

fn main() -> benchtop::Result<()> {
    env_logger::init();

    let driver = MockDriver::with_device(MockDevice::i2c_host("Benchtop I2C bridge", 40022));

    let i2c = match locate::find_i2c_host(&driver) {
        Ok(i2c) => i2c,
        Err(error) => {
            eprintln!("No I2C host available!");
            return Err(error);
        }
    };

    // turn on the internal reference for DAC A
    i2c.write_byte_word(AD5667_ADDRESS, AD5667_CMD_REF_SETUP | AD5667_REG_DAC_A, 1);

    // set DAC A to mid level
    i2c.write_byte_word(AD5667_ADDRESS, AD5667_CMD_WRITE_UPDATE | AD5667_REG_DAC_A, 0x8000);

    println!("DAC A set to mid level");
    Ok(())
}
