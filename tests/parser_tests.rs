use soroban_call_trace::parser::{classify_trap, load_input, parse_input, TrapKind};
use soroban_call_trace::utils::ParseError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_parse_empty_array() {
    let input = parse_input("[]").unwrap();
    assert!(input.records.is_empty());
}

#[test]
fn test_parse_response_without_optional_fields() {
    let input = parse_input(r#"{"events": ["AAAA"]}"#).unwrap();

    assert_eq!(input.records, vec!["AAAA"]);
    assert!(input.fault.is_none());
    assert!(input.logs.is_empty());
}

#[test]
fn test_parse_rejects_other_shapes() {
    assert!(matches!(
        parse_input(r#"{"result": 1}"#),
        Err(ParseError::InvalidFormat(_))
    ));
    assert!(matches!(parse_input("42"), Err(ParseError::InvalidFormat(_))));
    assert!(matches!(parse_input("{not json"), Err(ParseError::JsonError(_))));
}

#[test]
fn test_load_input_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"["AAAA", "BBBB"]"#).unwrap();

    let input = load_input(file.path()).unwrap();
    assert_eq!(input.records.len(), 2);
}

#[test]
fn test_load_input_missing_file() {
    assert!(matches!(
        load_input("/nonexistent/trace.json"),
        Err(ParseError::IoError(_))
    ));
}

#[test]
fn test_trap_classification_is_case_insensitive() {
    assert_eq!(classify_trap("WASM TRAP: UNREACHABLE").kind, TrapKind::Unreachable);
    assert_eq!(
        classify_trap("hosterror: Error(Storage, MissingValue)").kind,
        TrapKind::Host
    );
}

#[test]
fn test_trap_keeps_message() {
    let trap = classify_trap("Wasm Trap: out of bounds memory access");
    assert_eq!(trap.message, "Wasm Trap: out of bounds memory access");
    assert!(trap.kind.is_vm());
}
