//! Control-flow classification of decoded events.

use super::event::DiagnosticEvent;
use crate::utils::config::{FN_CALL_TOPIC, FN_RETURN_TOPIC};

/// Control label of an event, resolved once per event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind<'a> {
    /// Opens a frame for the named function
    Call(&'a str),
    /// Closes the nearest open frame of the named function
    Return(&'a str),
    /// Anything else, attributed to the active frame
    Other,
}

/// Classify an event by its leading topic
///
/// A `fn_call`/`fn_return` marker without a symbol function name in the
/// second topic degrades to `Other`.
pub fn classify(event: &DiagnosticEvent) -> EventKind<'_> {
    match (event.symbol_at(0), event.symbol_at(1)) {
        (Some(FN_CALL_TOPIC), Some(name)) => EventKind::Call(name),
        (Some(FN_RETURN_TOPIC), Some(name)) => EventKind::Return(name),
        _ => EventKind::Other,
    }
}

/// True when the leading topic is a framing marker, well-formed or not
pub fn is_framing_marker(event: &DiagnosticEvent) -> bool {
    matches!(event.symbol_at(0), Some(FN_CALL_TOPIC) | Some(FN_RETURN_TOPIC))
}
