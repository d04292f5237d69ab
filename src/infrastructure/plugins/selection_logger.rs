use crate::infrastructure::{ChangeContext, ChangeHook, ChangeKind};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

pub const SELECTION_LOG_FILE: &str = "selection_log.txt";

/// Plugin that appends every final selection to a log file
pub struct SelectionLoggerHook {
    log_path: PathBuf,
}

impl SelectionLoggerHook {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_path: data_dir.into().join(SELECTION_LOG_FILE),
        }
    }

    pub fn log_path(&self) -> &PathBuf {
        &self.log_path
    }
}

impl ChangeHook for SelectionLoggerHook {
    fn on_change(&self, context: &ChangeContext) -> Result<()> {
        // provisional single-day emits are noise in the log
        if context.kind == ChangeKind::Provisional {
            return Ok(());
        }

        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("opening {}", self.log_path.display()))?;

        writeln!(
            file,
            "[{}] Range selected: {} to {} ({} days)",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
            context.range.start(),
            context.range.end(),
            context.range.len_days()
        )?;

        Ok(())
    }

    fn name(&self) -> &str {
        "Selection Logger"
    }
}
