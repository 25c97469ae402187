//! Per-run diagnostics for recoverable anomalies.
//!
//! Fatal problems abort the run with a [`SimError`](crate::SimError);
//! everything here is the non-fatal remainder — events worth surfacing to the
//! harness without killing a long run over one bad raster cell.

use fa_core::{AgentId, Tick};

/// What went wrong for one agent at one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The depth provider returned `DataUnavailable` during a flood tick.
    /// The agent took no damage and made no decision that tick.
    DepthUnavailable,
}

/// One recorded anomaly.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticEvent {
    pub tick:  Tick,
    pub agent: AgentId,
    pub kind:  DiagnosticKind,
}

/// Append-only log of anomalies over a whole run.
#[derive(Debug, Default)]
pub struct RunDiagnostics {
    events: Vec<DiagnosticEvent>,
}

impl RunDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: Tick, agent: AgentId, kind: DiagnosticKind) {
        self.events.push(DiagnosticEvent { tick, agent, kind });
    }

    pub fn events(&self) -> &[DiagnosticEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
