//! Soroban Call Trace
//!
//! Rebuilds the nested call tree of a Soroban contract invocation from the
//! diagnostic events the host emits during simulation, then ranks the
//! contracts involved by estimated cost.
//!
//! This crate provides the core implementation for the
//! `soroban-trace` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! soroban-trace decode simulation.json --summary
//! soroban-trace stats simulation.json --top-n 10
//! ```
//!
//! As a library, the entry point is [`decoder::decode_events`]:
//!
//! ```no_run
//! use soroban_call_trace::decoder::decode_events;
//!
//! let records: Vec<String> = vec![/* base64 DiagnosticEvent XDR */];
//! let trace = decode_events(&records)?;
//! println!("{} frames", trace.tree.len());
//! # Ok::<(), soroban_call_trace::utils::DecodeError>(())
//! ```

pub mod aggregator;
pub mod commands;
pub mod decoder;
pub mod flamegraph;
pub mod output;
pub mod parser;
pub mod utils;
