//! Reading documents from text and files, and applying them.

use crate::document::Node;
use crate::error::ConfigError;
use crate::model::ManagerConfig;
use crate::yaml::parse_yaml;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Parse YAML text into a document tree.
pub fn load_document_str(source: &str) -> Result<Node, ConfigError> {
    if source.trim().is_empty() {
        return Err(ConfigError::InvalidArgument(
            "document source is empty".to_string(),
        ));
    }
    debug!("parsing config document (len={})", source.len());
    parse_yaml(source)
}

/// Read a document from disk; `.json` files are parsed as JSON, everything
/// else as YAML.
pub fn load_document_file(path: impl AsRef<Path>) -> Result<Node, ConfigError> {
    let path = path.as_ref();
    info!("loading config document from path: {}", path.display());
    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Err(ConfigError::InvalidArgument(format!(
            "file {} is empty",
            path.display()
        )));
    }
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(&contents)?)
    } else {
        load_document_str(&contents)
    }
}

impl ManagerConfig {
    /// Parse YAML text and apply it. Returns the number of device slots touched.
    pub fn apply_yaml_str(&mut self, source: &str) -> Result<usize, ConfigError> {
        let document = load_document_str(source)?;
        Ok(self.apply_document(&document)?)
    }

    /// Load a document file and apply it.
    pub fn apply_file(&mut self, path: impl AsRef<Path>) -> Result<usize, ConfigError> {
        let document = load_document_file(path)?;
        Ok(self.apply_document(&document)?)
    }

    /// Apply several files in order; later files override earlier ones.
    ///
    /// Each file is committed on its own, so a failure keeps the files
    /// applied before it. Returns the touched-slot count of every file.
    pub fn apply_files<I, P>(&mut self, paths: I) -> Result<Vec<usize>, ConfigError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut counts = Vec::new();
        for path in paths {
            let touched = self.apply_file(path.as_ref())?;
            debug!(
                "applied config file (path={}, devices_touched={})",
                path.as_ref().display(),
                touched
            );
            counts.push(touched);
        }
        info!("applied config files (files={})", counts.len());
        Ok(counts)
    }
}

/// Apply YAML text and report the outcome as a single integer: the number of
/// device slots touched, or the negative code of the first violation.
pub fn apply_status(config: &mut ManagerConfig, source: &str) -> i32 {
    match config.apply_yaml_str(source) {
        Ok(touched) => i32::try_from(touched).unwrap_or(i32::MAX),
        Err(err) => err.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    /// Blank text reports the argument code.
    #[test]
    fn blank_source_is_an_argument_error() {
        let mut config = ManagerConfig::default();
        assert_eq!(
            apply_status(&mut config, "  \n"),
            ErrorCode::InvalidArgument.code()
        );
    }

    /// Unparseable YAML reports the argument code.
    #[test]
    fn malformed_yaml_is_an_argument_error() {
        let mut config = ManagerConfig::default();
        let err = config
            .apply_yaml_str("manager_config: [unclosed")
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed(_)));
        assert_eq!(err.code(), ErrorCode::InvalidArgument.code());
    }

    /// The status is the touched device count on success.
    #[test]
    fn status_reports_touched_devices() {
        let mut config = ManagerConfig::default();
        let source = "manager_config:\n  device_configs:\n    - index: 1\n      skip_alignment: true\n";
        assert_eq!(apply_status(&mut config, source), 1);
        assert!(config.device_configs[1].skip_alignment);
    }

    /// `.json` files are decoded as JSON.
    #[test]
    fn json_files_are_detected_by_extension() {
        let temp = TempDir::new().expect("tmp");
        let path = temp.path().join("config.json");
        fs::write(
            &path,
            r#"{"manager_config": {"device_configs": [{"index": 0, "auto_trigger_period": 250}]}}"#,
        )
        .expect("write");

        let mut config = ManagerConfig::default();
        assert_eq!(config.apply_file(&path).expect("apply"), 1);
        assert_eq!(config.device_configs[0].auto_trigger_period, 250);
    }

    /// Empty files are rejected before parsing.
    #[test]
    fn empty_file_is_rejected() {
        let temp = TempDir::new().expect("tmp");
        let path = temp.path().join("empty.yaml");
        fs::write(&path, "").expect("write");

        let mut config = ManagerConfig::default();
        let err = config.apply_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument(_)));
    }

    /// Files apply in order and later values win.
    #[test]
    fn later_files_override_earlier_ones() {
        let temp = TempDir::new().expect("tmp");
        let base = temp.path().join("base.yaml");
        let overlay = temp.path().join("overlay.yaml");
        fs::write(
            &base,
            "manager_config:\n  device_configs:\n    - index: 0\n      auto_trigger_period: 10\n      auto_trigger_random_exponent: 4\n",
        )
        .expect("write");
        fs::write(
            &overlay,
            "manager_config:\n  device_configs:\n    - index: 0\n      auto_trigger_period: 20\n",
        )
        .expect("write");

        let mut config = ManagerConfig::default();
        let counts = config.apply_files([&base, &overlay]).expect("apply");
        assert_eq!(counts, vec![1, 1]);
        assert_eq!(config.device_configs[0].auto_trigger_period, 20);
        assert_eq!(config.device_configs[0].auto_trigger_random_exponent, 4);
    }

    /// Missing files surface as read errors.
    #[test]
    fn missing_file_is_a_read_error() {
        let temp = TempDir::new().expect("tmp");
        let mut config = ManagerConfig::default();
        let err = config
            .apply_file(temp.path().join("missing.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed(_)));
    }
}
