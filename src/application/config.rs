use crate::application::Theme;
use crate::domain::MAX_NOTIFICATION_CAPACITY;
use log::warn;
use std::path::PathBuf;

pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 3;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub theme: String,
    pub notification_capacity: usize,
    pub log_selections: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("RANGEPICK_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_local_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("rangepick")
            });

        let theme = match lookup("RANGEPICK_THEME").map(|v| v.to_lowercase()) {
            Some(name) if Theme::available_themes().contains(&name) => name,
            Some(name) => {
                warn!("unknown theme '{}', using dark", name);
                "dark".to_string()
            }
            None => "dark".to_string(),
        };

        let notification_capacity = lookup("RANGEPICK_TOASTS")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_NOTIFICATION_CAPACITY)
            .clamp(1, MAX_NOTIFICATION_CAPACITY);

        let log_selections = lookup("RANGEPICK_LOG_SELECTIONS")
            .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        Self {
            data_dir,
            theme,
            notification_capacity,
            log_selections,
        }
    }
}
