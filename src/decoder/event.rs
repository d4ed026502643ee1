//! Raw diagnostic event decoding.
//!
//! A record is the base64 text of an XDR `DiagnosticEvent` as captured
//! from the host runtime. Only symbol topics are interpreted; every other
//! value is kept as its XDR type name plus a base64 re-encoding.

use crate::utils::config::UNKNOWN_EVENT_TYPE;
use crate::utils::error::RecordError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use stellar_xdr::curr::{
    self as xdr, ContractEventBody, ContractEventType, Limits, ReadXdr, ScVal, WriteXdr,
};

/// A scalar value this crate does not interpret
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpaqueValue {
    /// XDR type name, e.g. `U32` or `Address`
    pub kind: String,

    /// Base64 XDR encoding of the value
    pub xdr: String,
}

impl OpaqueValue {
    fn from_scval(val: &ScVal) -> Result<Self, RecordError> {
        let bytes = val.to_xdr(Limits::none())?;
        Ok(Self {
            kind: val.name().to_string(),
            xdr: STANDARD.encode(bytes),
        })
    }

    /// The `Void` value, used as default payload
    pub fn void() -> Self {
        Self {
            kind: "Void".to_string(),
            // discriminant 1 (SCV_VOID), no body
            xdr: "AAAAAQ==".to_string(),
        }
    }
}

/// One decoded topic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Topic {
    Symbol(String),
    Opaque(OpaqueValue),
}

impl Topic {
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Symbol text, `None` for opaque topics
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(s) => Some(s),
            Self::Opaque(_) => None,
        }
    }

    fn from_scval(val: &ScVal) -> Result<Self, RecordError> {
        match val {
            ScVal::Symbol(sym) => Ok(Self::Symbol(sym.0.to_utf8_string_lossy())),
            other => Ok(Self::Opaque(OpaqueValue::from_scval(other)?)),
        }
    }
}

impl PartialEq<str> for Topic {
    fn eq(&self, other: &str) -> bool {
        self.as_symbol() == Some(other)
    }
}

impl PartialEq<&str> for Topic {
    fn eq(&self, other: &&str) -> bool {
        self.as_symbol() == Some(*other)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(s) => write!(f, "{}", s),
            Self::Opaque(v) => write!(f, "<{}>", v.kind),
        }
    }
}

/// Event kind from the envelope metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractEventKind {
    Contract,
    System,
    #[default]
    Diagnostic,
}

impl From<ContractEventType> for ContractEventKind {
    fn from(value: ContractEventType) -> Self {
        match value {
            ContractEventType::Contract => Self::Contract,
            ContractEventType::System => Self::System,
            ContractEventType::Diagnostic => Self::Diagnostic,
        }
    }
}

/// One decoded trace record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEvent {
    /// Topics in wire order
    pub topics: Vec<Topic>,

    /// Payload, never inspected here
    pub data: OpaqueValue,

    /// Hex id of the emitting contract
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub contract_id: Option<String>,

    /// Whether the emitting call was part of a successful top-level invocation
    pub success: bool,

    #[serde(default)]
    pub kind: ContractEventKind,
}

impl DiagnosticEvent {
    /// Build an event directly from topics, with a void payload
    pub fn from_topics(topics: Vec<Topic>) -> Self {
        Self {
            topics,
            data: OpaqueValue::void(),
            contract_id: None,
            success: true,
            kind: ContractEventKind::Diagnostic,
        }
    }

    pub fn with_contract_id(mut self, contract_id: impl Into<String>) -> Self {
        self.contract_id = Some(contract_id.into());
        self
    }

    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    /// Topic at `index` if it is a symbol
    pub fn symbol_at(&self, index: usize) -> Option<&str> {
        self.topics.get(index).and_then(Topic::as_symbol)
    }

    /// Lowercased leading symbol topic, used as the event type tag
    pub fn event_type(&self) -> String {
        self.symbol_at(0)
            .map(str::to_lowercase)
            .unwrap_or_else(|| UNKNOWN_EVENT_TYPE.to_string())
    }
}

/// Decode one serialized record
///
/// **Public** - entry point of the raw decoder
///
/// # Errors
/// * `RecordError::Empty` - blank record text
/// * `RecordError::Base64` - text is not standard base64
/// * `RecordError::Xdr` - truncated envelope, unknown variant or trailing bytes
pub fn decode_record(record: &str) -> Result<DiagnosticEvent, RecordError> {
    let record = record.trim();
    if record.is_empty() {
        return Err(RecordError::Empty);
    }

    let bytes = STANDARD.decode(record)?;
    let raw = xdr::DiagnosticEvent::from_xdr(bytes, Limits::none())?;
    from_xdr_event(&raw)
}

fn from_xdr_event(raw: &xdr::DiagnosticEvent) -> Result<DiagnosticEvent, RecordError> {
    let event = &raw.event;
    let ContractEventBody::V0(body) = &event.body;

    let topics = body
        .topics
        .iter()
        .map(Topic::from_scval)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DiagnosticEvent {
        topics,
        data: OpaqueValue::from_scval(&body.data)?,
        contract_id: event.contract_id.as_ref().map(|hash| hex::encode(hash.0)),
        success: raw.in_successful_contract_call,
        kind: event.type_.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_xdr::curr::{
        ContractEvent, ContractEventV0, ExtensionPoint, Hash, ScSymbol, StringM,
    };

    fn sym(s: &str) -> ScVal {
        ScVal::Symbol(ScSymbol(StringM::try_from(s).unwrap()))
    }

    fn encode(topics: Vec<ScVal>, contract_id: Option<Hash>, success: bool) -> String {
        let raw = xdr::DiagnosticEvent {
            in_successful_contract_call: success,
            event: ContractEvent {
                ext: ExtensionPoint::V0,
                contract_id,
                type_: ContractEventType::Diagnostic,
                body: ContractEventBody::V0(ContractEventV0 {
                    topics: topics.try_into().unwrap(),
                    data: ScVal::Void,
                }),
            },
        };
        STANDARD.encode(raw.to_xdr(Limits::none()).unwrap())
    }

    #[test]
    fn test_decode_symbols_in_order() {
        let record = encode(vec![sym("fn_call"), sym("transfer")], None, true);
        let event = decode_record(&record).unwrap();

        assert_eq!(event.topics.len(), 2);
        assert_eq!(event.topics[0], "fn_call");
        assert_eq!(event.topics[1], "transfer");
        assert!(event.success);
        assert_eq!(event.contract_id, None);
        assert_eq!(event.kind, ContractEventKind::Diagnostic);
    }

    #[test]
    fn test_non_symbol_topics_stay_opaque() {
        let record = encode(vec![sym("log"), ScVal::U32(7)], None, false);
        let event = decode_record(&record).unwrap();

        assert_eq!(event.topics[0].as_symbol(), Some("log"));
        match &event.topics[1] {
            Topic::Opaque(v) => assert_eq!(v.kind, "U32"),
            other => panic!("expected opaque topic, got {:?}", other),
        }
        assert!(!event.success);
        assert_eq!(event.data, OpaqueValue::void());
    }

    #[test]
    fn test_contract_id_is_hex() {
        let record = encode(vec![sym("log")], Some(Hash([0xab; 32])), true);
        let event = decode_record(&record).unwrap();

        assert_eq!(event.contract_id, Some("ab".repeat(32)));
    }

    #[test]
    fn test_truncated_record() {
        let record = encode(vec![sym("fn_call"), sym("a")], None, true);
        let bytes = STANDARD.decode(&record).unwrap();
        let truncated = STANDARD.encode(&bytes[..bytes.len() - 6]);

        assert!(matches!(decode_record(&truncated), Err(RecordError::Xdr(_))));
    }

    #[test]
    fn test_unknown_body_variant() {
        let record = encode(vec![sym("log")], None, true);
        let mut bytes = STANDARD.decode(&record).unwrap();
        // bool (4) + ext (4) + contract_id option (4) + event type (4), then body discriminant
        bytes[16..20].copy_from_slice(&[0, 0, 0, 9]);

        assert!(matches!(
            decode_record(&STANDARD.encode(bytes)),
            Err(RecordError::Xdr(_))
        ));
    }

    #[test]
    fn test_bad_base64_and_empty() {
        assert!(matches!(decode_record("!!not base64!!"), Err(RecordError::Base64(_))));
        assert!(matches!(decode_record("   "), Err(RecordError::Empty)));
    }

    #[test]
    fn test_event_type_tag() {
        let event = DiagnosticEvent::from_topics(vec![Topic::symbol("Storage_Write")]);
        assert_eq!(event.event_type(), "storage_write");

        let empty = DiagnosticEvent::from_topics(vec![]);
        assert_eq!(empty.event_type(), UNKNOWN_EVENT_TYPE);
    }
}
