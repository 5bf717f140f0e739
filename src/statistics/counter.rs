use std::fmt;

use serde::{Deserialize, Serialize};

use super::LogMessage;

/// Counts processed, added, deleted, succeeded and failed operations and keeps
/// an ordered log of messages describing them.
///
/// `total_processed` moves by exactly one for each recording call, whichever
/// specific counter that call also bumps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticsCounter {
    total_processed: u64,
    add: u64,
    delete: u64,
    successes: u64,
    failures: u64,
    messages: Vec<LogMessage>,
}

impl StatisticsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_processed(&self) -> u64 {
        self.total_processed
    }

    pub fn added_count(&self) -> u64 {
        self.add
    }

    pub fn deleted_count(&self) -> u64 {
        self.delete
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn messages(&self) -> &[LogMessage] {
        &self.messages
    }

    /// Records one processed operation and logs `message`, even when empty.
    pub fn add_processed(&mut self, message: impl Into<LogMessage>) {
        self.total_processed += 1;
        self.messages.push(message.into());
    }

    pub fn add_success(&mut self) {
        self.total_processed += 1;
        self.successes += 1;
    }

    pub fn add_success_with(&mut self, message: impl Into<LogMessage>) {
        self.add_success();
        self.messages.push(message.into());
    }

    pub fn add_failure(&mut self) {
        self.total_processed += 1;
        self.failures += 1;
    }

    pub fn add_failure_with(&mut self, message: impl Into<LogMessage>) {
        self.add_failure();
        self.messages.push(message.into());
    }

    pub fn added(&mut self) {
        self.total_processed += 1;
        self.add += 1;
    }

    pub fn added_with(&mut self, message: impl Into<LogMessage>) {
        self.added();
        self.messages.push(message.into());
    }

    pub fn deleted(&mut self) {
        self.total_processed += 1;
        self.delete += 1;
    }

    pub fn deleted_with(&mut self, message: impl Into<LogMessage>) {
        self.deleted();
        self.messages.push(message.into());
    }

    /// Renders the full report: the counter summary line, a `Messages:`
    /// header, then every logged message in insertion order.
    pub fn message_string(&self) -> String {
        let mut report = format!(
            "Processed {}, added {}, deleted {}, succeeded {}, failed {}.\nMessages:",
            self.total_processed, self.add, self.delete, self.successes, self.failures
        );
        for message in &self.messages {
            report.push('\n');
            report.push_str(&message.render());
        }
        report
    }
}

impl fmt::Display for StatisticsCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message_string())
    }
}
