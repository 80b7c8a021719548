/// Diagnostic event for traceability.
///
/// Structured text for now; as the component evolves this can become a
/// stable, serializable event enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    pub kind: &'static str,
    pub message: String,
}

/// Append-only trail of session lifecycle transitions and failures.
///
/// Failures never propagate to a caller as errors; they land here (and in
/// the browser console) instead.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    events: Vec<DiagnosticEvent>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, kind: &'static str, message: impl Into<String>) {
        self.events.push(DiagnosticEvent {
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[DiagnosticEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<DiagnosticEvent> {
        std::mem::take(&mut self.events)
    }
}
