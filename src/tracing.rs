//! Logging setup and state snapshots for debugging the editor
//!
//! `RUST_LOG` picks what reaches stderr (default `warn`):
//!
//! - `RUST_LOG=term_filter::update=debug` commits, removals and focus moves
//! - `RUST_LOG=term_filter::grammar=trace` every continuation decision
//!
//! Everything at debug level also goes to `term-filter.log` in the logs dir,
//! rotated daily.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::messages::SlotId;
use crate::model::FilterModel;

const LOG_FILE: &str = "term-filter.log";

/// Install the stderr and log file subscribers
///
/// Without a writable logs dir only stderr logging is installed.
pub fn init() {
    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));

    let logs_dir = crate::config_paths::ensure_logs_dir();
    let file = logs_dir.as_ref().ok().map(|dir| {
        fmt::layer()
            .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE))
            .with_ansi(false)
            .with_line_number(true)
            .with_filter(EnvFilter::new("term_filter=debug"))
    });

    tracing_subscriber::registry().with(stderr).with(file).init();

    if let Err(e) = logs_dir {
        tracing::warn!("file logging disabled: {}", e);
    }
}

/// Lightweight snapshot of editor state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct TermSnapshot {
    pub serialized: String,
    pub term_count: usize,
    pub input: String,
    pub focus: SlotId,
    pub preview: Option<String>,
    pub selected: usize,
}

impl TermSnapshot {
    pub fn from_model(model: &FilterModel) -> Self {
        Self {
            serialized: model.serialized().to_string(),
            term_count: model.terms.len(),
            input: model.input.text().to_string(),
            focus: model.focus,
            preview: model.previewed.as_ref().map(|t| t.label.clone()),
            selected: model.selected.len(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &TermSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.serialized != other.serialized {
            changes.push(format!(
                "terms: {:?} → {:?} ({} → {})",
                self.serialized, other.serialized, self.term_count, other.term_count
            ));
        }
        if self.input != other.input {
            changes.push(format!("input: {:?} → {:?}", self.input, other.input));
        }
        if self.focus != other.focus {
            changes.push(format!("focus: {:?} → {:?}", self.focus, other.focus));
        }
        if self.preview != other.preview {
            changes.push(format!("preview: {:?} → {:?}", self.preview, other.preview));
        }
        if self.selected != other.selected {
            changes.push(format!("selected: {} → {}", self.selected, other.selected));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::filter::Filter;

    #[test]
    fn test_diff_reports_changed_fields() {
        let mut model = FilterModel::filter(EditorConfig::default());
        let before = TermSnapshot::from_model(&model);
        assert_eq!(before.diff(&before.clone()), None);

        model = FilterModel::from_filter(
            model.config.clone(),
            &Filter::condition("a", "=", "1"),
        );
        let after = TermSnapshot::from_model(&model);
        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("terms:"));
        assert!(diff.contains("preview:"));
        assert!(!diff.contains("focus:"));
    }
}
