//! Device location: scan the driver's device list in index order and open
//! the first device that matches.

use crate::driver::Driver;
use crate::generator::Generator;
use crate::i2c::I2cHost;
use crate::params::DeviceKind;
use crate::scope::Oscilloscope;
use crate::{Error, Result};

/// Open the first oscilloscope whose capabilities satisfy `predicate`.
/// A device that opens but fails the predicate is closed again and skipped.
pub fn find_oscilloscope<D, P>(driver: &D, predicate: P) -> Result<Oscilloscope<'_, D>>
where
    D: Driver,
    P: Fn(&crate::driver::ScopeInfo) -> bool,
{
    driver.refresh().report();
    for index in 0..driver.device_count() {
        if !driver.can_open(index, DeviceKind::Oscilloscope) {
            continue;
        }
        if let Some(handle) = driver.open_oscilloscope(index) {
            let scope = Oscilloscope::new(driver, handle);
            if predicate(&scope.info()) {
                log::info!("opened oscilloscope at index {}", index);
                return Ok(scope);
            }
        }
    }
    Err(Error::NoDevice)
}

/// Open the first generator whose capabilities satisfy `predicate`.
pub fn find_generator<D, P>(driver: &D, predicate: P) -> Result<Generator<'_, D>>
where
    D: Driver,
    P: Fn(&crate::driver::GeneratorInfo) -> bool,
{
    driver.refresh().report();
    for index in 0..driver.device_count() {
        if !driver.can_open(index, DeviceKind::Generator) {
            continue;
        }
        if let Some(handle) = driver.open_generator(index) {
            let generator = Generator::new(driver, handle);
            if predicate(&generator.info()) {
                log::info!("opened generator at index {}", index);
                return Ok(generator);
            }
        }
    }
    Err(Error::NoDevice)
}

/// Open the first I2C host.
pub fn find_i2c_host<D: Driver>(driver: &D) -> Result<I2cHost<'_, D>> {
    driver.refresh().report();
    for index in 0..driver.device_count() {
        if !driver.can_open(index, DeviceKind::I2cHost) {
            continue;
        }
        if let Some(handle) = driver.open_i2c_host(index) {
            log::info!("opened I2C host at index {}", index);
            return Ok(I2cHost::new(driver, handle));
        }
    }
    Err(Error::NoDevice)
}

/// Open the first device that carries both an oscilloscope satisfying
/// `predicate` and a generator, as one combined instrument.
pub fn find_oscilloscope_with_generator<D, P>(
    driver: &D,
    predicate: P,
) -> Result<(Oscilloscope<'_, D>, Generator<'_, D>)>
where
    D: Driver,
    P: Fn(&crate::driver::ScopeInfo) -> bool,
{
    driver.refresh().report();
    for index in 0..driver.device_count() {
        if !driver.can_open(index, DeviceKind::Oscilloscope)
            || !driver.can_open(index, DeviceKind::Generator)
        {
            continue;
        }
        if let Some(scope_handle) = driver.open_oscilloscope(index) {
            let scope = Oscilloscope::new(driver, scope_handle);
            if !predicate(&scope.info()) {
                continue;
            }
            if let Some(gen_handle) = driver.open_generator(index) {
                log::info!("opened combined instrument at index {}", index);
                return Ok((scope, Generator::new(driver, gen_handle)));
            }
        }
    }
    Err(Error::NoDevice)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::caps::MeasureModes;
    use crate::mock::{MockDevice, MockDriver};

    #[test]
    fn test_first_match_in_list_order_wins() {
        let driver = MockDriver::new();
        driver.push(MockDevice::generator("Gen", 1));
        driver.push(MockDevice::oscilloscope("Scope A", 2));
        driver.push(MockDevice::oscilloscope("Scope B", 3));
        let scope = find_oscilloscope(&driver, |_| true).unwrap();
        drop(scope);
        // index 1 was taken, not index 2
        assert!(driver.open_oscilloscope(1).is_some());
    }

    #[test]
    fn test_predicate_failure_closes_and_skips() {
        let driver = MockDriver::new();
        driver.push(MockDevice::oscilloscope("Block only", 1));
        driver.push(
            MockDevice::oscilloscope("Streamer", 2)
                .measure_modes(MeasureModes::BLOCK | MeasureModes::STREAM),
        );
        let scope =
            find_oscilloscope(&driver, |info| info.measure_modes.contains(MeasureModes::STREAM))
                .unwrap();
        drop(scope);
        // the first scope was closed again when it failed the predicate
        assert!(driver.open_oscilloscope(0).is_some());
        assert!(driver.open_oscilloscope(1).is_some());
    }

    #[test]
    fn test_no_match_is_an_error() {
        let driver = MockDriver::with_device(MockDevice::generator("Gen", 1));
        assert!(matches!(find_oscilloscope(&driver, |_| true), Err(Error::NoDevice)));
        assert!(matches!(find_i2c_host(&driver), Err(Error::NoDevice)));
    }

    #[test]
    fn test_combined_open() {
        let driver = MockDriver::new();
        driver.push(MockDevice::oscilloscope("Scope", 1));
        driver.push(MockDevice::combined("Combi", 2));
        let (scope, generator) = find_oscilloscope_with_generator(&driver, |_| true).unwrap();
        assert!(!scope.is_removed());
        assert!(!generator.is_removed());
        drop((scope, generator));
        assert!(driver.open_generator(1).is_some());
    }
}
