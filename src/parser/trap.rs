//! Classification of runtime fault messages.
//!
//! An unbalanced trace usually ends in a fault. The simulator reports it
//! as free text; this turns the text into something a reader can act on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of failure ended the execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrapKind {
    Unreachable,
    OutOfBounds,
    IntegerOverflow,
    StackOverflow,
    DivisionByZero,
    UnknownVm,
    Host,
    Execution,
}

impl TrapKind {
    /// VM traps come from the WASM engine, the rest from the host
    pub fn is_vm(self) -> bool {
        !matches!(self, Self::Host | Self::Execution)
    }
}

/// A classified fault message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trap {
    pub kind: TrapKind,
    pub message: String,
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TrapKind::Unreachable => {
                write!(f, "VM Trap: Unreachable Instruction (Panic or invalid code path)")
            }
            TrapKind::OutOfBounds => {
                write!(f, "VM Trap: Out of Bounds Access (Invalid memory read/write)")
            }
            TrapKind::IntegerOverflow => write!(f, "VM Trap: Integer Overflow"),
            TrapKind::StackOverflow => {
                write!(f, "VM Trap: Stack Overflow (Recursion limit exceeded)")
            }
            TrapKind::DivisionByZero => write!(f, "VM Trap: Division by Zero"),
            TrapKind::UnknownVm => write!(f, "VM Trap: Unknown Wasm Trap ({})", self.message),
            TrapKind::Host => write!(f, "Host Trap: {}", self.message),
            TrapKind::Execution => write!(f, "Execution Error: {}", self.message),
        }
    }
}

/// Classify a fault message, case-insensitively
pub fn classify_trap(message: &str) -> Trap {
    let lower = message.to_lowercase();

    let kind = if lower.contains("wasm trap") || lower.contains("trapped") {
        if lower.contains("unreachable") {
            TrapKind::Unreachable
        } else if lower.contains("out of bounds") || lower.contains("memory access") {
            TrapKind::OutOfBounds
        } else if lower.contains("integer overflow") || lower.contains("arithmetic overflow") {
            TrapKind::IntegerOverflow
        } else if lower.contains("stack overflow") || lower.contains("call stack exhausted") {
            TrapKind::StackOverflow
        } else if lower.contains("divide by zero") || lower.contains("division by zero") {
            TrapKind::DivisionByZero
        } else {
            TrapKind::UnknownVm
        }
    } else if lower.contains("hosterror") || lower.contains("context") {
        TrapKind::Host
    } else {
        TrapKind::Execution
    };

    Trap {
        kind,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vm_traps() {
        let trap = classify_trap("Error: Wasm Trap: out of bounds memory access");
        assert_eq!(trap.kind, TrapKind::OutOfBounds);
        assert!(trap.to_string().contains("VM Trap: Out of Bounds Access"));

        assert_eq!(
            classify_trap("Error: trapped: integer overflow").kind,
            TrapKind::IntegerOverflow
        );
        assert_eq!(
            classify_trap("Wasm Trap: call stack exhausted").kind,
            TrapKind::StackOverflow
        );
        assert_eq!(classify_trap("Wasm Trap: unreachable").kind, TrapKind::Unreachable);
        assert_eq!(classify_trap("wasm trap: divide by zero").kind, TrapKind::DivisionByZero);
    }

    #[test]
    fn test_host_trap() {
        let trap = classify_trap("HostError: Error(Context, InvalidInput)");
        assert_eq!(trap.kind, TrapKind::Host);
        assert!(!trap.kind.is_vm());
        assert!(trap.to_string().starts_with("Host Trap"));
    }

    #[test]
    fn test_fallbacks() {
        let unknown = classify_trap("Wasm Trap: something weird happened");
        assert_eq!(unknown.kind, TrapKind::UnknownVm);
        assert!(unknown.to_string().contains("VM Trap: Unknown Wasm Trap"));

        let generic = classify_trap("budget exceeded");
        assert_eq!(generic.kind, TrapKind::Execution);
        assert_eq!(generic.to_string(), "Execution Error: budget exceeded");
    }
}
