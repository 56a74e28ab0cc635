#![cfg(feature = "serde")]
use cardcrc::*;

#[test]
fn params_to_json() {
    let json = serde_json::to_value(CrcParameters::KERMIT).expect("Can't serialize params");
    assert_eq!(
        json,
        serde_json::json!({
            "polynomial": 0x1021,
            "initial_value": 0,
            "reflect_input": true,
            "reflect_output": true,
            "xor_out": 0
        })
    );
}

#[test]
fn reports_round_trip() {
    let body = hex::decode("3000100000000000000000590406").expect("Can't decode body");
    let reports = compare_variants(&body).expect("Can't compare variants");
    let json = serde_json::to_string(&reports).expect("Can't serialize reports");
    let back: Vec<VariantReport> = serde_json::from_str(&json).expect("Can't deserialize reports");
    assert_eq!(back, reports);
}

#[test]
fn record_round_trip() {
    let (record, _) = patch_and_checksum(&[0u8; 16], &[0x59, 0x04, 0x06]).expect("Can't patch");
    let json = serde_json::to_string(&record).expect("Can't serialize record");
    let back: CardRecord = serde_json::from_str(&json).expect("Can't deserialize record");
    assert_eq!(back, record);
    assert!(back.verify());
}
