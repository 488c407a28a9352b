// src/report.rs

//! Flat label/value reports shown for file details and backup metadata

use std::fmt;

/// Label column width used by the plain-text rendering
pub const LABEL_WIDTH: usize = 25;

/// One line of a report
///
/// A line without a value is a standalone label (for example a class name
/// taken from an archived object graph).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub label: String,
    pub value: Option<String>,
}

impl ReportLine {
    pub fn pair(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Some(value.into()),
        }
    }

    pub fn standalone(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{:<width$} {}", self.label, value, width = LABEL_WIDTH),
            None => write!(f, "{}", self.label),
        }
    }
}

/// Ordered report with an optional title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub title: Option<String>,
    pub lines: Vec<ReportLine>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: ReportLine) {
        self.lines.push(line);
    }

    pub fn push_pair(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.lines.push(ReportLine::pair(label, value));
    }

    /// First value recorded for a label
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|l| l.label == label)
            .and_then(|l| l.value.as_deref())
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.lines.iter().any(|l| l.label == label)
    }

    /// Plain-text rendering: title, blank line, then one line per entry
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(title);
            out.push_str("\n\n");
        }
        for line in &self.lines {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
