//! Diagnostic channel for bootstrap failures.

use std::sync::RwLock;

/// Destination for human-readable bootstrap diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, line: &str);
}

/// Writes each line to standard output. The default.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutDiagnostics;

impl DiagnosticSink for StdoutDiagnostics {
    fn emit(&self, line: &str) {
        println!("{}", line);
    }
}

/// Keeps lines in memory, for tests and for hosts that render diagnostics
/// themselves.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    lines: RwLock<Vec<String>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .read()
            .map(|l| l.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.read().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.write() {
            lines.clear();
        }
    }
}

impl DiagnosticSink for MemoryDiagnostics {
    fn emit(&self, line: &str) {
        if let Ok(mut lines) = self.lines.write() {
            lines.push(line.to_string());
        }
    }
}
