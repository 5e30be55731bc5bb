use geoformat_api::{Diagnostic, Diagnostics};
use std::sync::Mutex;

/// Forwards configuration diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::OverrideRejected { .. }
            | Diagnostic::TypeNameFallback { .. }
            | Diagnostic::IdentifierCollision { .. } => {
                tracing::warn!(target: "geoformat::config", "{}", diagnostic)
            }
            Diagnostic::AliasNotPublishable { .. } => {
                tracing::debug!(target: "geoformat::config", "{}", diagnostic)
            }
        }
    }
}

/// Keeps every reported diagnostic, in order.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    events: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().map(|e| e.is_empty()).unwrap_or(true)
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        if let Ok(mut events) = self.events.lock() {
            events.push(diagnostic);
        }
    }
}
