//! Blocking wait for user acknowledgement.

use std::io;

/// Block until any key is pressed, without echo or line buffering. The
/// previous terminal settings are restored on every exit path.
#[cfg(unix)]
pub fn wait_for_key() -> io::Result<()> {
    use std::io::Read;

    struct TermMode(libc::termios);

    impl TermMode {
        fn acquire() -> io::Result<TermMode> {
            // SAFETY: tcgetattr fully initializes `saved` on success.
            unsafe {
                let mut saved = std::mem::zeroed();
                if libc::tcgetattr(libc::STDIN_FILENO, &mut saved) == -1 {
                    return Err(io::Error::last_os_error());
                }
                let mut raw: libc::termios = saved;
                raw.c_lflag &= !(libc::ECHO | libc::ICANON);
                if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &raw) == -1 {
                    return Err(io::Error::last_os_error());
                }
                Ok(TermMode(saved))
            }
        }
    }

    impl Drop for TermMode {
        fn drop(&mut self) {
            // SAFETY: restores the settings read by `acquire`.
            unsafe {
                libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &self.0);
            }
        }
    }

    let _mode = TermMode::acquire()?;
    let mut byte = [0u8; 1];
    io::stdin().lock().read(&mut byte)?;
    Ok(())
}

/// Fallback for platforms without termios: wait for a full line instead.
#[cfg(not(unix))]
pub fn wait_for_key() -> io::Result<()> {
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(())
}
