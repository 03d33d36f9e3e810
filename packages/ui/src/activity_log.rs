//! In-app notices: a running log of what the user's actions did, shown by
//! [`crate::ActivityLogPanel`].

use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
    /// Entries before this index have been dismissed from the banner.
    pub seen: usize,
}

impl ActivityLog {
    /// The newest warning or error not yet dismissed, shown by
    /// [`crate::ActivityBanner`].
    pub fn latest_problem(&self) -> Option<&LogEntry> {
        self.entries
            .iter()
            .skip(self.seen)
            .rev()
            .find(|e| matches!(e.level, LogLevel::Warning | LogLevel::Error))
    }

    pub fn dismiss(&mut self) {
        self.seen = self.entries.len();
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

pub fn log_activity(log: &mut Signal<ActivityLog>, level: LogLevel, message: &str) {
    if level == LogLevel::Error {
        tracing::error!("{}", message);
    }
    log.write().entries.push(LogEntry {
        timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        level,
        message: message.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: LogLevel, message: &str) -> LogEntry {
        LogEntry {
            timestamp: "12:00:00".into(),
            level,
            message: message.into(),
        }
    }

    #[test]
    fn test_latest_problem() {
        let mut log = ActivityLog::default();
        assert!(log.latest_problem().is_none());

        log.entries.push(entry(LogLevel::Warning, "bob has already been added"));
        log.entries.push(entry(LogLevel::Success, "Note saved"));
        assert_eq!(
            log.latest_problem().map(|e| e.message.as_str()),
            Some("bob has already been added")
        );

        log.dismiss();
        assert!(log.latest_problem().is_none());

        log.entries.push(entry(LogLevel::Error, "offline"));
        assert_eq!(log.latest_problem().map(|e| e.message.as_str()), Some("offline"));

        log.entries.clear();
        assert!(log.latest_problem().is_none());
    }
}
