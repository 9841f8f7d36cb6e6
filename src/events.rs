use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

/// Notifications emitted while an extraction runs.
///
/// `Progress` fires once per completed page, strictly in page order. `Data`
/// fires once, after the whole document succeeded, for listeners that prefer
/// event-driven consumption over the awaited return value.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ExtractionEvent {
    Progress {
        current_page: usize,
        total_pages: usize,
    },
    Data {
        text: String,
        /// Originating file when extraction started from a path, None for raw bytes
        source: Option<PathBuf>,
    },
}

/// Observer for extraction events. Delivery is fire-and-forget: the pipeline
/// never waits on a sink and sink behavior cannot fail an extraction.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ExtractionEvent);
}

/// Sink that drops every event
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: ExtractionEvent) {}
}

/// Adapter turning a closure into a sink
pub struct FnSink<F>(pub F);

impl<F> EventSink for FnSink<F>
where
    F: Fn(ExtractionEvent) + Send + Sync,
{
    fn emit(&self, event: ExtractionEvent) {
        (self.0)(event)
    }
}

/// Sink that forwards events into a tokio channel. A closed receiver is not an
/// error; remaining events are simply dropped.
pub struct ChannelSink {
    sender: UnboundedSender<ExtractionEvent>,
}

impl ChannelSink {
    pub fn new(sender: UnboundedSender<ExtractionEvent>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: ExtractionEvent) {
        let _ = self.sender.send(event);
    }
}
