//! Helpers shared by the integration tests: real XDR records, base64 encoded.

#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use stellar_xdr::curr::{
    ContractEvent, ContractEventBody, ContractEventType, ContractEventV0, DiagnosticEvent,
    ExtensionPoint, Hash, Limits, ScSymbol, ScVal, StringM, WriteXdr,
};

pub fn sym(s: &str) -> ScVal {
    ScVal::Symbol(ScSymbol(StringM::try_from(s).unwrap()))
}

pub fn record(topics: Vec<ScVal>, contract: Option<u8>, success: bool) -> String {
    let event = DiagnosticEvent {
        in_successful_contract_call: success,
        event: ContractEvent {
            ext: ExtensionPoint::V0,
            contract_id: contract.map(|b| Hash([b; 32])),
            type_: ContractEventType::Diagnostic,
            body: ContractEventBody::V0(ContractEventV0 {
                topics: topics.try_into().unwrap(),
                data: ScVal::Void,
            }),
        },
    };
    STANDARD.encode(event.to_xdr(Limits::none()).unwrap())
}

pub fn call(name: &str) -> String {
    record(vec![sym("fn_call"), sym(name)], None, true)
}

pub fn ret(name: &str) -> String {
    record(vec![sym("fn_return"), sym(name)], None, true)
}

pub fn log(msg: &str) -> String {
    record(vec![sym("log"), sym(msg)], None, true)
}

/// Event tagged `tag` emitted by the contract whose id is 32 copies of `contract`
pub fn tagged(tag: &str, contract: u8) -> String {
    record(vec![sym(tag)], Some(contract), true)
}

pub fn contract_hex(contract: u8) -> String {
    hex::encode([contract; 32])
}
