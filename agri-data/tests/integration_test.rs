//! End-to-end batch runs over the sample farm CSV.

use agri_data::{BatchEstimator, BatchSummary, FarmInputLoader, ReportRow, write_report};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal_macros::dec;

const FARMS_CSV: &str = include_str!("../test-data/farms.csv");

fn run_fixture(seed: u64) -> Vec<ReportRow> {
    let records = FarmInputLoader::parse(FARMS_CSV.as_bytes()).expect("Failed to parse fixture");
    BatchEstimator::new().run(&records, &mut StdRng::seed_from_u64(seed))
}

#[test]
fn test_every_record_gets_a_report_row() {
    let rows = run_fixture(1);

    let numbers: Vec<_> = rows.iter().map(|row| row.row).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_valid_rows_are_estimated() {
    let rows = run_fixture(1);

    assert_eq!(rows[0].predicted_yield_kg, Some(dec!(58500)));
    // 3 × 2500 × 0.90 × 0.90 × 0.85 × 1.00 = 5163.75
    assert_eq!(rows[1].predicted_yield_kg, Some(dec!(5164)));
    assert_eq!(
        rows[1].risk_factors,
        "Sandy soil may require more frequent irrigation; \
         Lack of fertilization may significantly reduce yield; \
         Excess rainfall may cause waterlogging issues"
    );
    // "1,250" acres × 2500 × 0.90 × 0.90 × 0.85 × 1.20
    assert_eq!(rows[4].predicted_yield_kg, Some(dec!(2581875)));
    assert_eq!(rows[4].risk_factors, "");
}

#[test]
fn test_invalid_rows_carry_their_error() {
    let rows = run_fixture(1);

    let errors: Vec<_> = rows.iter().map(|row| row.error.as_deref()).collect();
    assert_eq!(
        errors,
        vec![
            None,
            None,
            Some("Please enter a valid land size greater than 0."),
            Some("Please select a crop type."),
            None,
            Some("Please enter a valid annual rainfall."),
            Some("Please select an irrigation type."),
        ]
    );
}

#[test]
fn test_summary_over_fixture() {
    let rows = run_fixture(9);

    let summary = BatchSummary::from_rows(&rows);

    assert_eq!(summary.rows, 7);
    assert_eq!(summary.estimated, 3);
    assert_eq!(summary.rejected, 4);
    assert_eq!(summary.total_predicted_kg, dec!(2645539));
}

#[test]
fn test_predictions_do_not_depend_on_seed() {
    let first = run_fixture(1);
    let second = run_fixture(2);

    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.predicted_yield_kg, b.predicted_yield_kg);
        assert_eq!(a.recommendations, b.recommendations);
        assert_eq!(a.error, b.error);
    }
}

#[test]
fn test_report_is_valid_csv_with_one_line_per_row() {
    let rows = run_fixture(3);
    let mut out = Vec::new();

    write_report(&mut out, &rows).expect("Failed to write report");

    let mut reader = csv::Reader::from_reader(out.as_slice());
    let headers = reader.headers().expect("missing header").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "row",
            "crop_type",
            "predicted_yield_kg",
            "confidence_percent",
            "recommendations",
            "risk_factors",
            "error",
        ]
    );
    let records: Vec<_> = reader.records().collect::<Result<_, _>>().expect("bad report row");
    assert_eq!(records.len(), 7);
    assert_eq!(&records[3][1], "barley");
    assert_eq!(&records[3][2], "");
}
