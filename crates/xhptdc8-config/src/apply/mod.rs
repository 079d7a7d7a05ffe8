//! Validation and application of configuration documents.
//!
//! Walks the document top-down against the fixed schema and stops at the first
//! violation. Application runs against a staged copy of the configuration that
//! is committed only when the whole document is valid.

mod device;
mod field;
mod grouping;
mod observer;
mod section;


pub use observer::{AppliedValue, ApplyObserver, LogObserver, NoopObserver};

use crate::document::Node;
use crate::error::{ApplyError, ErrorCode};
use crate::keys;
use crate::model::{MAX_DEVICES, ManagerConfig};
use field::{FieldApplicator, join_path};
use log::debug;
use section::{SectionCodes, apply_indexed_section};

const DEVICE_CONFIGS_SECTION: SectionCodes = SectionCodes {
    invalid_struct: ErrorCode::InvalidDeviceConfigsStruct,
    empty: ErrorCode::EmptyDeviceConfigs,
    exceed_max: ErrorCode::DeviceConfigsExceedMax,
};

impl ManagerConfig {
    /// Validate `root` and apply it onto this configuration.
    ///
    /// Returns the number of device slots that received at least one field.
    /// Fields absent from the document keep their current values. On error
    /// the configuration is left unchanged. Applied fields are traced with
    /// [`LogObserver`].
    pub fn apply_document(&mut self, root: &Node) -> Result<usize, ApplyError> {
        self.apply_document_with(root, &LogObserver)
    }

    /// Same as [`ManagerConfig::apply_document`], notifying `observer` about
    /// every field written once the document has been committed. A rejected
    /// document produces no notifications.
    pub fn apply_document_with(
        &mut self,
        root: &Node,
        observer: &dyn ApplyObserver,
    ) -> Result<usize, ApplyError> {
        let mut staged = self.clone();
        let mut applicator = FieldApplicator::new();
        let touched = apply_manager(&mut staged, root, &mut applicator)?;
        *self = staged;
        applicator.notify(observer);
        Ok(touched)
    }
}

fn apply_manager(
    config: &mut ManagerConfig,
    root: &Node,
    applicator: &mut FieldApplicator,
) -> Result<usize, ApplyError> {
    let manager = root
        .find_child(keys::MANAGER_CONFIG)
        .ok_or_else(|| ApplyError::new(ErrorCode::NoManagerConfig, keys::MANAGER_CONFIG))?;
    let path = keys::MANAGER_CONFIG;
    if manager.find_child(keys::DEVICE_CONFIGS).is_none() {
        return Err(ApplyError::new(
            ErrorCode::EmptyManagerConfig,
            join_path(path, keys::DEVICE_CONFIGS),
        ));
    }

    let mut touched = [false; MAX_DEVICES];
    let elements = apply_indexed_section(
        applicator,
        manager,
        path,
        keys::DEVICE_CONFIGS,
        &mut config.device_configs,
        DEVICE_CONFIGS_SECTION,
        |applicator, element, element_path, index, device| {
            let before = applicator.writes();
            device::apply_device(applicator, element, element_path, device)?;
            if applicator.writes() > before {
                touched[index] = true;
            }
            Ok(())
        },
    )?;

    if let Some(node) = manager.find_child(keys::GROUPING) {
        grouping::apply_grouping(
            applicator,
            node,
            &join_path(path, keys::GROUPING),
            &mut config.grouping,
        )?;
    }

    let touched = touched.iter().filter(|slot| **slot).count();
    debug!(
        "applied config document (device_elements={}, devices_touched={}, fields={})",
        elements,
        touched,
        applicator.writes()
    );
    Ok(touched)
}
