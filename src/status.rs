//! Driver status codes and the diagnostic reporter.

use std::fmt;
use std::panic::Location;

/// Outcome code returned by every driver call. Zero is success, negative
/// values are errors, positive values are warnings.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Status(i32);

impl Status {
    pub const SUCCESS: Status = Status(0);
    // warnings
    pub const VALUE_CLIPPED: Status = Status(1);
    pub const VALUE_MODIFIED: Status = Status(2);
    // errors
    pub const UNSUCCESSFUL: Status = Status(-1);
    pub const NOT_SUPPORTED: Status = Status(-2);
    pub const INVALID_HANDLE: Status = Status(-3);
    pub const INVALID_VALUE: Status = Status(-4);
    pub const INVALID_CHANNEL: Status = Status(-5);
    pub const INVALID_TRIGGER_SOURCE: Status = Status(-6);
    pub const DEVICE_GONE: Status = Status(-14);

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 == 0
    }

    pub fn is_warning(self) -> bool {
        self.0 > 0
    }

    pub fn is_error(self) -> bool {
        self.0 < 0
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::SUCCESS => "success",
            Self::VALUE_CLIPPED => "value clipped",
            Self::VALUE_MODIFIED => "value modified",
            Self::UNSUCCESSFUL => "unsuccessful",
            Self::NOT_SUPPORTED => "not supported",
            Self::INVALID_HANDLE => "invalid handle",
            Self::INVALID_VALUE => "invalid value",
            Self::INVALID_CHANNEL => "invalid channel",
            Self::INVALID_TRIGGER_SOURCE => "invalid trigger source",
            Self::DEVICE_GONE => "device gone",
            _ => "unknown",
        }
    }

    /// Log this status with the caller's file and line, mirroring the
    /// severity split: errors at error level, warnings at warn level,
    /// success silently. Observational only; returns `self` unchanged so it
    /// can be chained onto a driver call.
    #[track_caller]
    pub fn report(self) -> Status {
        if let Some((level, line)) = self.render(Location::caller()) {
            log::log!(level, "{}", line);
        }
        self
    }

    /// The formatting step of `report`, separated so it can be checked
    /// without a logger installed.
    pub(crate) fn render(self, location: &Location) -> Option<(log::Level, String)> {
        let severity = if self.is_error() {
            log::Level::Error
        } else if self.is_warning() {
            log::Level::Warn
        } else {
            return None;
        };
        let label = if self.is_error() { "Error" } else { "Warning" };
        let line = format!(
            "{}:{} {}: {}",
            location.file(),
            location.line(),
            label,
            self.description()
        );
        Some((severity, line))
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Status({}: {})", self.0, self.description())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[track_caller]
    fn render_here(status: Status) -> Option<(log::Level, String)> {
        status.render(Location::caller())
    }

    #[test]
    fn test_success_is_silent() {
        assert_eq!(render_here(Status::SUCCESS), None);
    }

    #[test]
    fn test_error_line_has_call_site() {
        let (level, line) = render_here(Status::INVALID_VALUE).unwrap();
        assert_eq!(level, log::Level::Error);
        assert!(line.contains("status.rs"));
        assert!(line.contains("Error: invalid value"));
    }

    #[test]
    fn test_warning_line_has_call_site() {
        let (level, line) = render_here(Status::VALUE_CLIPPED).unwrap();
        assert_eq!(level, log::Level::Warn);
        assert!(line.contains("Warning: value clipped"));
    }

    #[test]
    fn test_severity_split() {
        assert!(Status::SUCCESS.is_success());
        assert!(!Status::SUCCESS.is_warning());
        assert!(Status::VALUE_CLIPPED.is_warning());
        assert!(Status::DEVICE_GONE.is_error());
    }
}
