//! End-to-end tests for the check command over snapshot files.

use prodcfg::cmd::check::collect_findings;
use prodcfg::snapshot::Snapshot;
use prodcfg_validate::{has_blocking, ErrorCode};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_snapshot(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

const VALID_SNAPSHOT: &str = r#"{
  "chartOfAccounts": [
    {"code": "2000", "name": "Customer Deposits", "accountType": "LIABILITY",
     "parentCode": null, "level": 1, "isActive": true},
    {"code": "2001", "name": "Current Account Deposits", "accountType": "LIABILITY",
     "parentCode": "2000", "level": 2, "isActive": true},
    {"code": "5000", "name": "Interest Expense", "accountType": "EXPENSE",
     "parentCode": null, "level": 1, "isActive": true}
  ],
  "ledgerAccounts": [
    {"code": "2001-01", "name": "Deposits EUR", "chartOfAccountCode": "2001",
     "accountType": "LIABILITY", "currency": "EUR", "balance": "0",
     "availableBalance": "0", "status": "ACTIVE"},
    {"code": "5000-01", "name": "Interest Paid EUR", "chartOfAccountCode": "5000",
     "accountType": "EXPENSE", "currency": "EUR", "balance": "0",
     "availableBalance": "0", "status": "ACTIVE"}
  ],
  "configuration": {
    "productId": 1,
    "category": "CURRENT_ACCOUNT",
    "glMappings": [
      {"id": 1, "mappingType": "LIABILITY_ACCOUNT", "ledgerAccountCode": "2001-01"},
      {"id": 2, "mappingType": "INTEREST_ACCOUNT", "ledgerAccountCode": "5000-01"}
    ],
    "fees": [
      {"id": 10, "feeType": "MAINTENANCE", "transactionType": null,
       "calculationBase": "FIXED", "feeAmount": "2.50", "feePercentage": null,
       "currency": "EUR", "effectiveFrom": "2024-01-01", "effectiveTo": null,
       "isActive": true}
    ]
  }
}"#;

#[test]
fn valid_snapshot_has_no_findings() {
    let file = write_snapshot(VALID_SNAPSHOT);
    let snapshot = Snapshot::load(file.path()).unwrap();
    let findings = collect_findings(&snapshot);
    assert!(findings.is_empty(), "expected no findings, got {findings:?}");
}

#[test]
fn child_chart_entry_with_wrong_type_is_flagged() {
    // Same snapshot, but the child chart entry claims to be an ASSET under
    // a LIABILITY parent.
    let broken = VALID_SNAPSHOT.replace(
        "{\"code\": \"2001\", \"name\": \"Current Account Deposits\", \"accountType\": \"LIABILITY\",",
        "{\"code\": \"2001\", \"name\": \"Current Account Deposits\", \"accountType\": \"ASSET\",",
    );
    let file = write_snapshot(&broken);
    let snapshot = Snapshot::load(file.path()).unwrap();
    let findings = collect_findings(&snapshot);
    let codes: Vec<_> = findings.iter().map(|f| f.code).collect();
    // The chart entry disagrees with its parent, and the ledger account
    // riding on it now disagrees with the chart entry.
    assert!(codes.contains(&ErrorCode::ChartTypeMismatch));
    assert!(has_blocking(&findings));
}

#[test]
fn duplicate_mapping_in_snapshot_is_flagged() {
    let broken = VALID_SNAPSHOT.replace(
        "{\"id\": 2, \"mappingType\": \"INTEREST_ACCOUNT\", \"ledgerAccountCode\": \"5000-01\"}",
        "{\"id\": 2, \"mappingType\": \"LIABILITY_ACCOUNT\", \"ledgerAccountCode\": \"2001-01\"}",
    );
    let file = write_snapshot(&broken);
    let snapshot = Snapshot::load(file.path()).unwrap();
    let findings = collect_findings(&snapshot);
    let codes: Vec<_> = findings.iter().map(|f| f.code).collect();
    assert!(codes.contains(&ErrorCode::DuplicateMapping));
    // Replacing the interest mapping also leaves the category incomplete.
    assert!(codes.contains(&ErrorCode::RequiredMappingMissing));
}

#[test]
fn missing_file_is_a_load_error() {
    let error = Snapshot::load(std::path::Path::new("/no/such/snapshot.json")).unwrap_err();
    assert!(error.to_string().contains("failed to read"));
}

#[test]
fn malformed_json_is_a_load_error() {
    let file = write_snapshot("{ not json");
    let error = Snapshot::load(file.path()).unwrap_err();
    assert!(error.to_string().contains("not a valid snapshot"));
}
