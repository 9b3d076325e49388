//! Runs the oscilloscope connection test and prints the per-channel results.

use benchtop::mock::{MockDevice, MockDriver};
use benchtop::{locate, session};
use benchtop::Poller;

fn main() -> benchtop::Result<()> {
    env_logger::init();

    let driver = MockDriver::with_device(
        MockDevice::oscilloscope("Benchtop MSO-5000", 28470)
            .channels(2)
            .connection_test()
            .ready_delay(2),
    );

    let scope = match locate::find_oscilloscope(&driver, |info| info.has_connection_test) {
        Ok(scope) => scope,
        Err(error) => {
            eprintln!("No oscilloscope available with connection test support!");
            return Err(error);
        }
    };

    let states = session::connection_test(&scope, &Poller::new())?;
    for (channel, state) in states.iter().enumerate() {
        println!("Ch{}: {:?}", channel + 1, state);
    }
    Ok(())
}
