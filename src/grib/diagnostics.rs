//! Non-fatal findings collected while decoding one message.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// Counts or layouts that disagree between sections; decoding went on
    Inconsistency,
    /// Grid template not supported, geometry is a square approximation
    ApproximateGrid,
    UnknownParameter,
    InvalidTime,
    /// Optional section absent, treated as empty
    MissingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub(crate) fn push(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        warn!("{:?}: {}", kind, message);
        self.entries.push(Diagnostic { kind, message });
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }

    #[cfg(test)]
    pub(crate) fn has(&self, kind: DiagnosticKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }
}
