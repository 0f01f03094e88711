//! Notification sink seam and the optional-sink slot.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{trace, warn};

/// The host bridge that receives named events.
///
/// Implementations forward events to whatever event-emission mechanism
/// the host framework provides. Delivery is fire-and-forget.
pub trait NotificationSink: Send + Sync {
    /// Emit a named event with a JSON payload.
    fn emit(&self, event: &str, payload: serde_json::Value);
}

/// A slot holding the sink, which may or may not be attached.
///
/// The host bridge comes and goes independently of this module's
/// lifecycle, so emission through an empty slot is a silent no-op,
/// never an error.
#[derive(Default)]
pub struct SinkHandle {
    slot: RwLock<Option<Arc<dyn NotificationSink>>>,
}

impl SinkHandle {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a sink, replacing any previous one.
    pub fn set(&self, sink: Arc<dyn NotificationSink>) {
        *self.slot.write() = Some(sink);
    }

    /// Detach the sink. Subsequent emissions no-op.
    pub fn clear(&self) {
        *self.slot.write() = None;
    }

    /// Whether a sink is currently attached.
    pub fn is_attached(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Serialize `payload` and emit it as a named event.
    ///
    /// No-ops when the slot is empty. The payload is not serialized in
    /// that case.
    pub fn emit_event<T: Serialize>(&self, event: &str, payload: &T) {
        let sink = match self.slot.read().as_ref() {
            Some(sink) => Arc::clone(sink),
            None => {
                trace!(event, "no notification sink attached, dropping event");
                return;
            }
        };

        match serde_json::to_value(payload) {
            Ok(value) => sink.emit(event, value),
            Err(e) => warn!(event, error = %e, "failed to serialize event payload"),
        }
    }
}
