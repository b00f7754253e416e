use std::sync::{Arc, Mutex};

use serde::Serialize;

/// Observability hook receiving non-fatal notes about an evaluation.
pub trait Diagnostics: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

impl<D: Diagnostics + ?Sized> Diagnostics for Arc<D> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn warn(&self, message: &str) {
        (**self).warn(message);
    }
}

/// Forwards diagnostics to the installed `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn info(&self, message: &str) {
        tracing::info!(target: "probe_model", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "probe_model", "{message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticLevel {
    Info,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticEvent {
    pub level: DiagnosticLevel,
    pub message: String,
}

/// Records diagnostics in memory so callers can inspect or replay them.
#[derive(Debug, Default, Clone)]
pub struct MemoryDiagnostics {
    events: Arc<Mutex<Vec<DiagnosticEvent>>>,
}

impl MemoryDiagnostics {
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().expect("diagnostics mutex poisoned").clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|event| event.level == DiagnosticLevel::Warn)
            .map(|event| event.message)
            .collect()
    }

    fn push(&self, level: DiagnosticLevel, message: &str) {
        self.events
            .lock()
            .expect("diagnostics mutex poisoned")
            .push(DiagnosticEvent {
                level,
                message: message.to_string(),
            });
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn info(&self, message: &str) {
        self.push(DiagnosticLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(DiagnosticLevel::Warn, message);
    }
}
