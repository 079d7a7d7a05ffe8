//! Observers notified about every field a committed document wrote.

use log::debug;
use std::fmt;

/// Value written into the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppliedValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
}

impl fmt::Display for AppliedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppliedValue::Bool(value) => write!(f, "{value}"),
            AppliedValue::Integer(value) => write!(f, "{value}"),
            AppliedValue::Double(value) => write!(f, "{value}"),
        }
    }
}

/// Hook invoked for each field written, once the whole document has been
/// committed. Fields are reported in document order.
pub trait ApplyObserver {
    /// `path` is the dotted document path of the applied node.
    fn field_applied(&self, path: &str, value: AppliedValue);
}

/// Traces applied fields through the `log` facade at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ApplyObserver for LogObserver {
    fn field_applied(&self, path: &str, value: AppliedValue) {
        debug!("applied config field (path={}, value={})", path, value);
    }
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ApplyObserver for NoopObserver {
    fn field_applied(&self, _path: &str, _value: AppliedValue) {}
}
