use thiserror::Error;

use super::SubscriptionId;

/// Error a fallible handler returns to signal it could not process an event.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaultKind {
    /// The handler returned an error.
    Failed(String),
    /// The handler panicked.
    Panicked(String),
}

/// A handler that failed during `emit`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("handler {subscription} on channel {channel} {}", describe(.kind))]
pub struct HandlerFault {
    pub channel: String,
    pub subscription: SubscriptionId,
    pub kind: FaultKind,
}

fn describe(kind: &FaultKind) -> String {
    match kind {
        FaultKind::Failed(reason) => format!("failed: {}", reason),
        FaultKind::Panicked(reason) => format!("panicked: {}", reason),
    }
}
