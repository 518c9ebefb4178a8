use std::str::FromStr;
use std::sync::Arc;

use bankdoc_core::{
    normalize, AmountKind, DocumentParser, ExtractionRecord, FieldKey, GazetteerRecognizer,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn parser_with_ner() -> DocumentParser {
    DocumentParser::default().with_recognizer(Arc::new(GazetteerRecognizer::malaysian().unwrap()))
}

#[test]
fn maybank_letter_end_to_end() {
    let raw = "Maybank\nLetter of Offer\nEarnest Deposit of RM1,000.00\nDistrict of Petaling";
    let record = parser_with_ner().extract(raw);

    assert_eq!(record.text(FieldKey::BankName), Some("Maybank"));
    assert_eq!(record.decimal(FieldKey::EarnestDeposit), Some(dec("1000.00")));
    assert_eq!(record.text(FieldKey::District), Some("Petaling"));

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["bank_name"], "Maybank");
    assert_eq!(json["earnest_deposit"].as_f64(), Some(1000.0));
    assert_eq!(json["earnest_deposit_print_as"], "RM 1,000.00");
    assert_eq!(json["earnest_deposit_in_word"], "Ringgit Malaysia 1,000.00 only");
    assert_eq!(json["district"], "Petaling");
    assert!(json.get("_cleaned_text").is_none());
}

#[test]
fn rules_take_precedence_over_ner() {
    let raw = "Hong Leong Bank refinancing\nMaybank\nSelangor branch\nState of Johor";
    let record = parser_with_ner().extract(raw);

    assert_eq!(record.text(FieldKey::BankName), Some("Maybank"));
    assert_eq!(record.text(FieldKey::State), Some("Johor"));
}

#[test]
fn ner_fills_only_missing_fields() {
    let raw = "Hong Leong Bank\nProperty in Selangor";

    let without = DocumentParser::default().extract(raw);
    assert!(!without.contains(FieldKey::BankName));
    assert!(!without.contains(FieldKey::State));

    let with = parser_with_ner().extract(raw);
    assert_eq!(with.text(FieldKey::BankName), Some("Hong Leong Bank"));
    assert_eq!(with.text(FieldKey::State), Some("Selangor"));
}

#[test]
fn uob_layout_beats_labelled_amount() {
    let raw = "United Overseas Bank (Malaysia) Bhd\nAmount of RM 5,000\n1425000000 TOTAL";
    let record = DocumentParser::default().extract(raw);

    assert_eq!(
        record.text(FieldKey::BankName),
        Some("United Overseas Bank (Malaysia) Bhd")
    );
    let amount = record.amount(AmountKind::Amount).unwrap();
    assert_eq!(amount.value, dec("1425000000.00"));
    assert_eq!(amount.print_as, "RM 1,425,000,000.00");
}

#[test]
fn garbled_uob_term_loan_row() {
    let raw = "UOB\nApproved Limit\n\"7000,006:00\" Temtoanst(TL)";
    let record = DocumentParser::default().extract(raw);

    assert_eq!(record.text(FieldKey::BankName), Some("UOB"));
    assert_eq!(record.decimal(FieldKey::Amount), Some(dec("7000006.00")));
    assert!(record.contains(FieldKey::AmountPrintAs));
    assert!(record.contains(FieldKey::AmountInWord));
}

#[test]
fn term_loan_glued_to_figure() {
    let outcome = DocumentParser::default().parse("Approved\n7000,006:00Temtoanst(TL)");

    assert_eq!(outcome.normalized_text, "Approved\n7000006.00Term Loan(TL)");
    assert_eq!(outcome.record.decimal(FieldKey::Amount), Some(dec("7000006.00")));
}

#[test]
fn uob_term_loan_two_row() {
    let record = DocumentParser::default().extract("UOB\n5000000:00 Term Loan 2");

    let amount = record.amount(AmountKind::Amount).unwrap();
    assert_eq!(amount.value, dec("5000000.00"));
    assert_eq!(amount.print_as, "RM 5,000,000.00");
}

#[test]
fn uob_letterhead_address() {
    let raw = "UOB\nLevel 12, UOB Plaza 1\nNo. 7 Jalan Raja Laut\n50350 Kuala Lumpur\nDear Sir";
    let record = DocumentParser::default().extract(raw);

    assert_eq!(
        record.text(FieldKey::Address),
        Some("Level 12, UOB Plaza 1 No. 7 Jalan Raja Laut 50350 Kuala Lumpur")
    );
}

#[test]
fn full_document_fields() {
    let raw = "CamScanner\nPublic Bank Berhad\n\
Subject: Housing Loan for Lot 8. Dear Sir\n\
Deposit of RM 50,000\n\
Balance of RM 450,000.00\n\
HSD No. 12345\n\
Unit No: A-12-3\n\
Sub\u{2013}District of Bukit Raja, District of Petaling, State of Selangor\n\
Tenure: Freehold\n\
Vendor: Maju Jaya Sdn Bhd (654321)\n\
Company No. 654321-K";
    let record = DocumentParser::default().extract(raw);

    assert_eq!(record.text(FieldKey::BankName), Some("Public Bank Berhad"));
    assert_eq!(record.text(FieldKey::Description), Some("Housing Loan for Lot 8"));
    assert_eq!(record.decimal(FieldKey::Deposit), Some(dec("50000.00")));
    assert_eq!(record.text(FieldKey::DepositPrintAs), Some("RM 50,000"));
    assert_eq!(record.decimal(FieldKey::Balance), Some(dec("450000.00")));
    assert_eq!(record.text(FieldKey::HsdNo), Some("12345"));
    assert_eq!(record.text(FieldKey::UnitNo), Some("A"));
    assert_eq!(record.text(FieldKey::SubDistrict), Some("Bukit Raja"));
    assert_eq!(record.text(FieldKey::District), Some("Petaling"));
    assert_eq!(record.text(FieldKey::State), Some("Selangor"));
    assert_eq!(record.text(FieldKey::Tenure), Some("Freehold"));
    assert_eq!(record.text(FieldKey::CompanyName), Some("Maju Jaya Sdn Bhd (654321)"));
    assert_eq!(record.text(FieldKey::CompanyRegNo), Some("654321-K"));
}

#[test]
fn record_survives_json_round_trip() {
    let raw = "Maybank\nEarnest Deposit of RM1,000.00\nBalance of RM 12,345.67\nDistrict of Petaling";
    let record = DocumentParser::default().with_cleaned_text(true).extract(raw);

    let json = serde_json::to_string_pretty(&record).unwrap();
    let back: ExtractionRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn normalization_is_idempotent_on_documents() {
    let samples = [
        "UOB\nApproved Limit\n\"7000,006:00\" Temtoanst(TL)\nTOTAL 7,000,006.00",
        "Maybank\nEarnest Deposit of RM1,000.00\nDistrict of Petaling",
        "Level 12, UOB Plaza 1\n  No. 7 Jalan Raja Laut\n\n50350 Kuala Lumpur",
    ];
    for sample in samples {
        let once = normalize(sample);
        assert_eq!(normalize(&once), once);
    }
}
