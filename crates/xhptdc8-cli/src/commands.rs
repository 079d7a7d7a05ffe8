//! Subcommand implementations.

use anyhow::{Context, anyhow};
use clap::ValueEnum;
use log::debug;
use std::io;
use xhptdc8_config::{ErrorCode, ManagerConfig, Node, load_document_file, load_document_str};

/// Source name that reads the document from standard input.
const STDIN_SOURCE: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Yaml,
    Json,
}

/// Configuration after applying every source, with the touched-slot count
/// of each.
#[derive(Debug)]
pub(crate) struct ApplyOutcome {
    pub(crate) config: ManagerConfig,
    pub(crate) touched: Vec<usize>,
}

/// Apply `sources` in order onto the default configuration.
///
/// Stops at the first source that fails to load or validate; the error
/// carries the source name and its numeric status.
pub(crate) fn apply_sources(sources: &[String]) -> anyhow::Result<ApplyOutcome> {
    let mut config = ManagerConfig::default();
    let mut touched = Vec::with_capacity(sources.len());
    for source in sources {
        let document = read_document(source)?;
        let count = config.apply_document(&document).map_err(|err| {
            let status = err.code();
            anyhow!(err).context(format!("failed to apply {source} (status={status})"))
        })?;
        debug!("applied source (source={source}, devices_touched={count})");
        touched.push(count);
    }
    Ok(ApplyOutcome { config, touched })
}

fn read_document(source: &str) -> anyhow::Result<Node> {
    if source == STDIN_SOURCE {
        let text = io::read_to_string(io::stdin()).context("failed to read standard input")?;
        return load_document_str(&text).map_err(|err| {
            let status = err.code();
            anyhow!(err).context(format!("failed to load standard input (status={status})"))
        });
    }
    load_document_file(source).map_err(|err| {
        let status = err.code();
        anyhow!(err).context(format!("failed to load {source} (status={status})"))
    })
}

/// Render the full document of `config`.
pub(crate) fn render(config: &ManagerConfig, format: OutputFormat) -> anyhow::Result<String> {
    let document = config.to_document();
    match format {
        OutputFormat::Yaml => document.to_yaml().context("failed to render yaml"),
        OutputFormat::Json => {
            let mut text =
                serde_json::to_string_pretty(&document).context("failed to render json")?;
            text.push('\n');
            Ok(text)
        }
    }
}

/// One line per error code: the code followed by its message.
///
/// `include_ok` prepends the success code `0`. `fixed_length` right-aligns
/// the codes to a common width.
pub(crate) fn error_table(include_ok: bool, fixed_length: bool) -> String {
    let mut rows: Vec<(i32, &str)> = Vec::with_capacity(ErrorCode::ALL.len() + 1);
    if include_ok {
        rows.push((0, "OK"));
    }
    rows.extend(ErrorCode::ALL.iter().map(|code| (code.code(), code.message())));

    let width = if fixed_length {
        rows.iter()
            .map(|(code, _)| code.to_string().len())
            .max()
            .unwrap_or(0)
    } else {
        0
    };
    rows.iter()
        .map(|(code, message)| format!("{code:>width$}: {message}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    /// The table lists every code once.
    #[test]
    fn error_table_lists_every_code() {
        let table = error_table(false, false);
        assert_eq!(table.lines().count(), ErrorCode::ALL.len());
        assert_eq!(
            table.lines().next(),
            Some("-1: invalid argument")
        );
        assert!(table.contains("-40: \"trigger_threshold\" array index exceeds the channel count\n"));
    }

    /// The success row and padding are optional.
    #[test]
    fn error_table_can_include_ok_and_pad_codes() {
        let table = error_table(true, true);
        let mut lines = table.lines();
        assert_eq!(lines.next(), Some("   0: OK"));
        assert_eq!(lines.next(), Some("  -1: invalid argument"));
        assert!(table.lines().all(|line| line.as_bytes()[4] == b':'));
    }

    /// Sources apply in order with a count per source.
    #[test]
    fn apply_sources_reports_touched_counts() {
        let temp = TempDir::new().expect("tmp");
        let first = temp.path().join("first.yaml");
        let second = temp.path().join("second.json");
        fs::write(
            &first,
            "manager_config:\n  device_configs:\n    - index: 0\n      auto_trigger_period: 8\n    - index: 1\n      skip_alignment: true\n",
        )
        .expect("write");
        fs::write(
            &second,
            r#"{"manager_config": {"device_configs": [{"index": 0, "auto_trigger_period": 9}]}}"#,
        )
        .expect("write");

        let sources = [
            first.display().to_string(),
            second.display().to_string(),
        ];
        let outcome = apply_sources(&sources).expect("apply");
        assert_eq!(outcome.touched, vec![2, 1]);
        assert_eq!(outcome.config.device_configs[0].auto_trigger_period, 9);
        assert!(outcome.config.device_configs[1].skip_alignment);
    }

    /// A rejected source names its numeric status.
    #[test]
    fn apply_sources_reports_status_of_rejected_document() {
        let temp = TempDir::new().expect("tmp");
        let path = temp.path().join("bad.yaml");
        fs::write(&path, "manager_config:\n  grouping:\n    enabled: true\n").expect("write");

        let err = apply_sources(&[path.display().to_string()]).unwrap_err();
        assert!(err.to_string().contains("(status=-11)"), "{err:#}");
    }

    /// JSON output parses and reapplies to the same configuration.
    #[test]
    fn json_rendering_is_parseable() {
        let text = render(&ManagerConfig::default(), OutputFormat::Json).expect("render");
        let document: Node = serde_json::from_str(&text).expect("json");
        let mut config = ManagerConfig::default();
        config.device_configs[3].auto_trigger_period = 1;
        config.apply_document(&document).expect("apply");
        assert_eq!(config, ManagerConfig::default());
    }
}
