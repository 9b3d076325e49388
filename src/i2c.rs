//! I2C host wrapper.

use crate::driver::{Driver, I2cHandle};

/// An open I2C host. Closed when dropped.
#[derive(Debug)]
pub struct I2cHost<'d, D: Driver> {
    driver: &'d D,
    handle: I2cHandle,
}

impl<'d, D: Driver> I2cHost<'d, D> {
    pub(crate) fn new(driver: &'d D, handle: I2cHandle) -> I2cHost<'d, D> {
        I2cHost { driver, handle }
    }

    #[track_caller]
    pub fn write(&self, address: u8, data: &[u8]) {
        log::debug!("write({:#04x}, {:02x?})", address, data);
        self.driver.i2c_write(self.handle, address, data).report();
    }

    /// Write a command byte followed by a 16-bit word, the shape most
    /// register-style I2C peripherals expect.
    #[track_caller]
    pub fn write_byte_word(&self, address: u8, byte: u8, word: u16) {
        log::debug!("write_byte_word({:#04x}, {:#04x}, {:#06x})", address, byte, word);
        self.driver.i2c_write_byte_word(self.handle, address, byte, word).report();
    }

    pub fn is_removed(&self) -> bool {
        self.driver.is_removed(self.handle.into())
    }
}

impl<D: Driver> Drop for I2cHost<'_, D> {
    fn drop(&mut self) {
        self.driver.close(self.handle.into()).report();
    }
}
