use chrono::NaiveDate;
use escrow_core::schedule::{
    build_schedule, ChargeCategory, MortgageInsurance, PaymentFrequency, RecurringCharge,
    ScheduleInput,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Disbursement calendar tests
// ===========================================================================

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn charge(
    category: ChargeCategory,
    amount: Decimal,
    frequency: PaymentFrequency,
    due: Option<NaiveDate>,
) -> RecurringCharge {
    RecurringCharge {
        category,
        amount,
        frequency,
        next_due_date: due,
    }
}

fn input_with(charges: Vec<RecurringCharge>) -> ScheduleInput {
    ScheduleInput {
        analysis_start: ymd(2025, 9, 1),
        charges,
        mortgage_insurance: None,
    }
}

#[test]
fn test_semiannual_split_lands_in_months_one_and_seven() {
    // $600 per occurrence, semiannual, first due in the window start month.
    let input = input_with(vec![charge(
        ChargeCategory::Tax,
        dec!(600),
        PaymentFrequency::Semiannual,
        Some(ymd(2025, 9, 15)),
    )]);
    let output = build_schedule(&input).unwrap().result;

    assert_eq!(output.monthly_schedule.get(1), dec!(600.00));
    assert_eq!(output.monthly_schedule.get(7), dec!(600.00));
    for month in [2, 3, 4, 5, 6, 8, 9, 10, 11, 12] {
        assert_eq!(output.monthly_schedule.get(month), Decimal::ZERO);
    }
    assert_eq!(output.annual_total, dec!(1200.00));
}

#[test]
fn test_mortgage_insurance_with_end_date() {
    // $50/month from window month 1 through month 4 inclusive.
    let input = ScheduleInput {
        analysis_start: ymd(2025, 9, 1),
        charges: vec![],
        mortgage_insurance: Some(MortgageInsurance {
            monthly_premium: dec!(50),
            end_date: Some(ymd(2025, 12, 31)),
        }),
    };
    let output = build_schedule(&input).unwrap().result;

    for month in 1..=4 {
        assert_eq!(output.monthly_schedule.get(month), dec!(50.00));
    }
    for month in 5..=12 {
        assert_eq!(output.monthly_schedule.get(month), Decimal::ZERO);
    }
    assert_eq!(output.annual_total, dec!(200.00));
}

#[test]
fn test_mixed_portfolio_calendar() {
    // Semiannual tax, annual hazard, quarterly HOA, open-ended PMI.
    let input = ScheduleInput {
        analysis_start: ymd(2025, 9, 1),
        charges: vec![
            charge(
                ChargeCategory::Tax,
                dec!(1800),
                PaymentFrequency::Semiannual,
                Some(ymd(2026, 1, 1)),
            ),
            charge(
                ChargeCategory::HazardInsurance,
                dec!(1200),
                PaymentFrequency::Annual,
                Some(ymd(2026, 5, 1)),
            ),
            charge(
                ChargeCategory::HoaDues,
                dec!(75),
                PaymentFrequency::Quarterly,
                Some(ymd(2025, 10, 1)),
            ),
        ],
        mortgage_insurance: Some(MortgageInsurance {
            monthly_premium: dec!(75),
            end_date: None,
        }),
    };
    let output = build_schedule(&input).unwrap().result;

    // Tax due month 5 (Jan) and month 11 (Jul), stacked on HOA and PMI.
    assert_eq!(output.monthly_schedule.get(5), dec!(1950.00));
    assert_eq!(output.monthly_schedule.get(11), dec!(1950.00));
    // Hazard due month 9 (May), plus PMI.
    assert_eq!(output.monthly_schedule.get(9), dec!(1275.00));
    // HOA months 2 and 8, plus PMI.
    assert_eq!(output.monthly_schedule.get(2), dec!(150.00));
    assert_eq!(output.monthly_schedule.get(8), dec!(150.00));
    // PMI alone everywhere else.
    assert_eq!(output.monthly_schedule.get(1), dec!(75.00));
    assert_eq!(
        output.annual_total,
        dec!(1800) * dec!(2) + dec!(1200) + dec!(75) * dec!(4) + dec!(75) * dec!(12)
    );
}

#[test]
fn test_out_of_window_occurrences_dropped() {
    let input = input_with(vec![
        charge(
            ChargeCategory::Tax,
            dec!(900),
            PaymentFrequency::Annual,
            Some(ymd(2025, 6, 1)), // before the window
        ),
        charge(
            ChargeCategory::HazardInsurance,
            dec!(700),
            PaymentFrequency::Once,
            Some(ymd(2026, 10, 1)), // after the window
        ),
    ]);
    let output = build_schedule(&input).unwrap().result;
    assert_eq!(output.annual_total, Decimal::ZERO);
}

#[test]
fn test_unknown_frequency_treated_as_one_off() {
    let json = r#"{
        "analysis_start": "2025-09-01",
        "charges": [{
            "category": "tax",
            "amount": "450",
            "frequency": "fortnightly",
            "next_due_date": "2025-11-05"
        }]
    }"#;
    let input: ScheduleInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.charges[0].frequency, PaymentFrequency::Once);

    let output = build_schedule(&input).unwrap().result;
    assert_eq!(output.monthly_schedule.get(3), dec!(450.00));
    assert_eq!(output.annual_total, dec!(450.00));
}

#[test]
fn test_missing_frequency_defaults_to_annual() {
    let json = r#"{
        "analysis_start": "2025-09-01",
        "charges": [{
            "category": "hoa_dues",
            "amount": "300",
            "next_due_date": "2026-03-01"
        }]
    }"#;
    let input: ScheduleInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.charges[0].frequency, PaymentFrequency::Annual);

    let output = build_schedule(&input).unwrap().result;
    assert_eq!(output.monthly_schedule.get(7), dec!(300.00));
}

#[test]
fn test_unparseable_due_date_degrades_to_no_charge() {
    let json = r#"{
        "analysis_start": "2025-09-01",
        "charges": [{
            "category": "tax",
            "amount": "900",
            "frequency": "annual",
            "next_due_date": "01/15/2026"
        }]
    }"#;
    let input: ScheduleInput = serde_json::from_str(json).unwrap();
    assert!(input.charges[0].next_due_date.is_none());

    let output = build_schedule(&input).unwrap();
    assert_eq!(output.result.annual_total, Decimal::ZERO);
    assert!(output.warnings.iter().any(|w| w.contains("no next due date")));
}

#[test]
fn test_skipped_charges_do_not_fail_the_build() {
    let input = input_with(vec![
        charge(ChargeCategory::FloodInsurance, Decimal::ZERO, PaymentFrequency::Annual, Some(ymd(2026, 1, 1))),
        charge(ChargeCategory::Other, dec!(-5), PaymentFrequency::Annual, Some(ymd(2026, 1, 1))),
        charge(ChargeCategory::HoaDues, dec!(250), PaymentFrequency::Annual, None),
    ]);
    let output = build_schedule(&input).unwrap();
    assert_eq!(output.result.annual_total, Decimal::ZERO);
    assert_eq!(output.warnings.len(), 3);
}

#[test]
fn test_serialization_roundtrip() {
    let input = input_with(vec![charge(
        ChargeCategory::Tax,
        dec!(600),
        PaymentFrequency::Semiannual,
        Some(ymd(2025, 9, 15)),
    )]);
    let output = build_schedule(&input).unwrap();
    let json = serde_json::to_string(&output).unwrap();
    let _deserialized: serde_json::Value = serde_json::from_str(&json).unwrap();
}
