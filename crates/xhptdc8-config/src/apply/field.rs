//! Leaf field application: find, coerce, validate, write.

use super::observer::{AppliedValue, ApplyObserver};
use crate::document::Node;
use crate::error::{ApplyError, CoercionError, ErrorCode};
use crate::model::{AlignmentSource, BlockMode, TriggerSources, VetoMode};

/// Types that can be read from a scalar node and written into a field.
pub(crate) trait FieldValue: Copy {
    fn coerce(node: &Node) -> Result<Self, CoercionError>;
    fn applied(self) -> AppliedValue;
}

impl FieldValue for bool {
    fn coerce(node: &Node) -> Result<Self, CoercionError> {
        node.coerce_to_bool()
    }

    fn applied(self) -> AppliedValue {
        AppliedValue::Bool(self)
    }
}

impl FieldValue for i64 {
    fn coerce(node: &Node) -> Result<Self, CoercionError> {
        node.coerce_to_integer()
    }

    fn applied(self) -> AppliedValue {
        AppliedValue::Integer(self)
    }
}

impl FieldValue for i32 {
    fn coerce(node: &Node) -> Result<Self, CoercionError> {
        let value = node.coerce_to_integer()?;
        i32::try_from(value).map_err(|_| CoercionError::OutOfRange(value))
    }

    fn applied(self) -> AppliedValue {
        AppliedValue::Integer(self.into())
    }
}

impl FieldValue for f64 {
    fn coerce(node: &Node) -> Result<Self, CoercionError> {
        node.coerce_to_double()
    }

    fn applied(self) -> AppliedValue {
        AppliedValue::Double(self)
    }
}

impl FieldValue for AlignmentSource {
    fn coerce(node: &Node) -> Result<Self, CoercionError> {
        Self::try_from(node.coerce_to_integer()?)
    }

    fn applied(self) -> AppliedValue {
        AppliedValue::Integer(self as i64)
    }
}

impl FieldValue for BlockMode {
    fn coerce(node: &Node) -> Result<Self, CoercionError> {
        Self::try_from(node.coerce_to_integer()?)
    }

    fn applied(self) -> AppliedValue {
        AppliedValue::Integer(self as i64)
    }
}

impl FieldValue for VetoMode {
    fn coerce(node: &Node) -> Result<Self, CoercionError> {
        Self::try_from(node.coerce_to_integer()?)
    }

    fn applied(self) -> AppliedValue {
        AppliedValue::Integer(self as i64)
    }
}

impl FieldValue for TriggerSources {
    fn coerce(node: &Node) -> Result<Self, CoercionError> {
        Self::try_from(node.coerce_to_integer()?)
    }

    fn applied(self) -> AppliedValue {
        AppliedValue::Integer(self.bits().into())
    }
}

/// Applies leaf fields and records every write for later notification.
#[derive(Debug, Default)]
pub(crate) struct FieldApplicator {
    applied: Vec<(String, AppliedValue)>,
}

impl FieldApplicator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Total number of fields written so far.
    pub(crate) fn writes(&self) -> usize {
        self.applied.len()
    }

    /// Report the recorded writes to `observer` in application order.
    pub(crate) fn notify(self, observer: &dyn ApplyObserver) {
        for (path, value) in self.applied {
            observer.field_applied(&path, value);
        }
    }

    /// Apply child `name` of `parent` onto `target` when present.
    ///
    /// A missing child leaves `target` untouched. A child that does not
    /// coerce to `T` or fails `valid` is reported with `code`.
    pub(crate) fn apply<T: FieldValue>(
        &mut self,
        parent: &Node,
        path: &str,
        name: &str,
        target: &mut T,
        code: ErrorCode,
        valid: impl Fn(T) -> bool,
    ) -> Result<(), ApplyError> {
        let Some(child) = parent.find_child(name) else {
            return Ok(());
        };
        let field_path = join_path(path, name);
        let value = T::coerce(child).map_err(|_| ApplyError::new(code, field_path.as_str()))?;
        if !valid(value) {
            return Err(ApplyError::new(code, field_path));
        }
        *target = value;
        self.applied.push((field_path, value.applied()));
        Ok(())
    }

    /// Apply a field whose only constraint is its type.
    pub(crate) fn apply_any<T: FieldValue>(
        &mut self,
        parent: &Node,
        path: &str,
        name: &str,
        target: &mut T,
        code: ErrorCode,
    ) -> Result<(), ApplyError> {
        self.apply(parent, path, name, target, code, |_| true)
    }
}

/// Reject a `stop` child earlier than its `start`.
///
/// The start comes from the same mapping when present, otherwise from
/// `current_start`. Children that do not coerce are left for the field
/// applicator to report with their own codes.
pub(crate) fn ensure_ordered<T: FieldValue + PartialOrd>(
    parent: &Node,
    path: &str,
    start_name: &str,
    stop_name: &str,
    current_start: T,
    code: ErrorCode,
) -> Result<(), ApplyError> {
    let Some(stop) = parent.find_child(stop_name).and_then(|node| T::coerce(node).ok()) else {
        return Ok(());
    };
    let start = match parent.find_child(start_name) {
        Some(node) => match T::coerce(node) {
            Ok(start) => start,
            Err(_) => return Ok(()),
        },
        None => current_start,
    };
    if stop < start {
        return Err(ApplyError::new(code, join_path(path, stop_name)));
    }
    Ok(())
}

/// Join nested paths for error messages and observer notifications.
pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
