//! Status/progress channel.
//!
//! The engine reports phase transitions and running counts as plain lines.
//! Callers choose where they go; nothing a sink does feeds back into the run.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
}

pub trait StatusSink {
    fn emit(&mut self, level: StatusLevel, line: &str);

    fn info(&mut self, line: &str) {
        self.emit(StatusLevel::Info, line);
    }

    fn warn(&mut self, line: &str) {
        self.emit(StatusLevel::Warn, line);
    }

    /// Start of a named phase ("Loading Files", "Matching Rows", ...).
    fn phase(&mut self, name: &str) {
        self.emit(StatusLevel::Info, &format!("=== {name} ==="));
    }
}

/// Forwards status lines to `tracing` under the `threadline::status` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn emit(&mut self, level: StatusLevel, line: &str) {
        match level {
            StatusLevel::Info => tracing::info!(target: "threadline::status", "{line}"),
            StatusLevel::Warn => tracing::warn!(target: "threadline::status", "{line}"),
        }
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub lines: Vec<(StatusLevel, String)>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|(level, _)| *level == StatusLevel::Warn)
            .map(|(_, line)| line.as_str())
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|(_, line)| line.contains(needle))
    }
}

impl StatusSink for CollectingSink {
    fn emit(&mut self, level: StatusLevel, line: &str) {
        self.lines.push((level, line.to_string()));
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn emit(&mut self, _level: StatusLevel, _line: &str) {}
}
