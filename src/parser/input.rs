//! Loading of serialized record sequences.
//!
//! Accepts either a bare JSON array of base64 records or a simulation
//! response object carrying them under `events`.

use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Simulator output as captured by the replay harness
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationResponse {
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub events: Vec<String>,

    #[serde(default)]
    pub logs: Vec<String>,
}

/// Records ready for decoding, plus context from the simulator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceInput {
    pub records: Vec<String>,

    /// Runtime error reported alongside the events
    pub fault: Option<String>,

    pub logs: Vec<String>,
}

/// Parse trace input from JSON text
///
/// **Public** - used by commands and tests
///
/// # Errors
/// * `ParseError::JsonError` - Invalid JSON
/// * `ParseError::InvalidFormat` - Neither a record array nor a simulation response
pub fn parse_input(raw: &str) -> Result<TraceInput, ParseError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;

    match value {
        serde_json::Value::Array(items) => {
            debug!("Input is a bare record array ({} entries)", items.len());
            let records = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    serde_json::Value::String(s) => Ok(s),
                    other => Err(ParseError::InvalidFormat(format!(
                        "record {} must be a string, found {}",
                        index, other
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(TraceInput {
                records,
                ..Default::default()
            })
        }

        serde_json::Value::Object(obj) if obj.contains_key("events") => {
            let response: SimulationResponse =
                serde_json::from_value(serde_json::Value::Object(obj))?;
            debug!(
                "Input is a simulation response (status {:?}, {} events)",
                response.status,
                response.events.len()
            );

            if response.status.as_deref() == Some("error") && response.error.is_none() {
                warn!("Simulation reported an error without a message");
            }

            Ok(TraceInput {
                records: response.events,
                fault: response.error,
                logs: response.logs,
            })
        }

        _ => Err(ParseError::InvalidFormat(
            "Input must be an array of records or an object with an 'events' array".to_string(),
        )),
    }
}

/// Load trace input from a file, or stdin when the path is `-`
pub fn load_input(path: impl AsRef<Path>) -> Result<TraceInput, ParseError> {
    let path = path.as_ref();

    let raw = if path.as_os_str() == "-" {
        debug!("Reading trace input from stdin");
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        debug!("Reading trace input from: {}", path.display());
        fs::read_to_string(path)?
    };

    parse_input(&raw)
}
