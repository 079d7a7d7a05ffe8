//! Indexed array sections: sequences of mappings addressing fixed-size slots.

use super::field::{FieldApplicator, join_path};
use crate::document::Node;
use crate::error::{ApplyError, ErrorCode};
use crate::keys;

/// Structural codes of one indexed section.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SectionCodes {
    /// Not a sequence of mappings, or an element's index is missing or negative.
    pub(crate) invalid_struct: ErrorCode,
    /// Present with zero elements.
    pub(crate) empty: ErrorCode,
    /// Index beyond the array capacity.
    pub(crate) exceed_max: ErrorCode,
}

/// Apply section `name` of `parent` onto `slots`.
///
/// Returns the number of elements applied; an absent section applies none.
/// `apply_element` receives the element node, its path, the slot index and
/// the slot itself.
pub(crate) fn apply_indexed_section<T>(
    applicator: &mut FieldApplicator,
    parent: &Node,
    parent_path: &str,
    name: &str,
    slots: &mut [T],
    codes: SectionCodes,
    mut apply_element: impl FnMut(&mut FieldApplicator, &Node, &str, usize, &mut T) -> Result<(), ApplyError>,
) -> Result<usize, ApplyError> {
    let Some(section) = parent.find_child(name) else {
        return Ok(0);
    };
    let section_path = join_path(parent_path, name);
    let elements = match section {
        Node::Sequence(elements) if section.is_indexable_sequence() => elements,
        _ => return Err(ApplyError::new(codes.invalid_struct, section_path)),
    };
    if elements.is_empty() {
        return Err(ApplyError::new(codes.empty, section_path));
    }

    for (position, element) in elements.iter().enumerate() {
        let element_path = format!("{section_path}[{position}]");
        let index = slot_index(element, &element_path, slots.len(), codes)?;
        apply_element(applicator, element, &element_path, index, &mut slots[index])?;
    }
    Ok(elements.len())
}

/// Validate the declared `index` of an element against the capacity.
fn slot_index(
    element: &Node,
    element_path: &str,
    capacity: usize,
    codes: SectionCodes,
) -> Result<usize, ApplyError> {
    let index_path = join_path(element_path, keys::INDEX);
    let index = element
        .find_child(keys::INDEX)
        .and_then(|node| node.coerce_to_integer().ok())
        .ok_or_else(|| ApplyError::new(codes.invalid_struct, index_path.as_str()))?;
    if index < 0 {
        return Err(ApplyError::new(codes.invalid_struct, index_path));
    }
    match usize::try_from(index) {
        Ok(index) if index < capacity => Ok(index),
        _ => Err(ApplyError::new(codes.exceed_max, index_path)),
    }
}
