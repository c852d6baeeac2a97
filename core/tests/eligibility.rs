//! Loan eligibility estimator tests.

use loansim_core::eligibility::{
    default_credit_score_buckets, default_income_buckets, default_score_samples,
};
use loansim_core::{
    estimate_loan, heatmap_grid, sensitivity_curve, ApplicantProfile, CoreError,
    EmploymentStatus, LoanType, Occupation, RiskBand,
};

fn profile() -> ApplicantProfile {
    ApplicantProfile {
        monthly_income: 5_000.0,
        age: 30,
        loan_term_years: 20,
        credit_score: 650,
        employment_status: EmploymentStatus::Employed,
        loan_type: LoanType::Home,
        occupation: Occupation::Salaried,
    }
}

#[test]
fn reference_profile_estimate() {
    let estimate = estimate_loan(&profile()).unwrap();
    let expected = (5_000.0 * 10.0) * (650.0 / 850.0) * 1.0 * 1.2 / (20.0 / 10.0);
    assert_eq!(estimate.amount, expected);
    assert!((estimate.amount - 22_941.18).abs() < 0.01, "amount = {}", estimate.amount);
    assert!((estimate.approval_chance_percent - 76.47).abs() < 0.01);
}

#[test]
fn factors_follow_fixed_lookup() {
    assert_eq!(EmploymentStatus::Employed.factor(), 1.0);
    assert_eq!(EmploymentStatus::SelfEmployed.factor(), 0.8);
    assert_eq!(EmploymentStatus::Unemployed.factor(), 0.5);
    assert_eq!(LoanType::Home.factor(), 1.2);
    assert_eq!(LoanType::Car.factor(), 0.8);
    assert_eq!(LoanType::Education.factor(), 0.9);
    assert_eq!(LoanType::Personal.factor(), 0.7);
}

#[test]
fn estimate_increases_with_credit_score() {
    let mut p = profile();
    let mut last = f64::MIN;
    for score in 300..=850 {
        p.credit_score = score;
        let amount = estimate_loan(&p).unwrap().amount;
        assert!(amount > last, "score {score}: {amount} <= {last}");
        last = amount;
    }
}

#[test]
fn approval_chance_spans_credit_domain() {
    let mut p = profile();
    p.credit_score = 850;
    assert_eq!(estimate_loan(&p).unwrap().approval_chance_percent, 100.0);
    p.credit_score = 300;
    let low = estimate_loan(&p).unwrap().approval_chance_percent;
    assert!((low - 35.29).abs() < 0.01);
}

#[test]
fn out_of_range_inputs_rejected() {
    let cases: [(&str, fn(&mut ApplicantProfile)); 6] = [
        ("monthly_income", |p: &mut ApplicantProfile| p.monthly_income = 0.0),
        ("monthly_income", |p: &mut ApplicantProfile| p.monthly_income = f64::NAN),
        ("credit_score", |p: &mut ApplicantProfile| p.credit_score = 299),
        ("credit_score", |p: &mut ApplicantProfile| p.credit_score = 851),
        ("loan_term_years", |p: &mut ApplicantProfile| p.loan_term_years = 12),
        ("age", |p: &mut ApplicantProfile| p.age = 17),
    ];
    for (expected_field, mutate) in cases {
        let mut p = profile();
        mutate(&mut p);
        match estimate_loan(&p) {
            Err(CoreError::InvalidInput { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected InvalidInput for {expected_field}, got {other:?}"),
        }
    }
}

#[test]
fn labels_parse_and_unknown_labels_fail() {
    assert_eq!("Self-Employed".parse::<EmploymentStatus>().unwrap(), EmploymentStatus::SelfEmployed);
    assert_eq!("employed".parse::<EmploymentStatus>().unwrap(), EmploymentStatus::Employed);
    assert_eq!("Home Loan".parse::<LoanType>().unwrap(), LoanType::Home);
    assert_eq!("personal".parse::<LoanType>().unwrap(), LoanType::Personal);
    assert_eq!("Farmer".parse::<Occupation>().unwrap(), Occupation::Farmer);

    assert!(matches!("Retired-ish".parse::<EmploymentStatus>(), Err(CoreError::InvalidInput { .. })));
    assert!(matches!("Boat Loan".parse::<LoanType>(), Err(CoreError::InvalidInput { .. })));
    assert!(matches!("Loan".parse::<LoanType>(), Err(CoreError::InvalidInput { .. })));
    assert!(matches!("Astronaut".parse::<Occupation>(), Err(CoreError::InvalidInput { .. })));

    for o in Occupation::ALL {
        assert_eq!(o.label().parse::<Occupation>().unwrap(), o);
    }
}

#[test]
fn curve_applies_formula_per_sample() {
    let p = profile();
    let samples = default_score_samples();
    assert_eq!(samples.len(), 100);
    assert_eq!(samples[0], 300.0);
    assert_eq!(samples[99], 850.0);

    let curve = sensitivity_curve(&p, &samples).unwrap();
    assert_eq!(curve.len(), 100);
    for pair in curve.windows(2) {
        assert!(pair[1].amount > pair[0].amount);
    }

    let at_650 = sensitivity_curve(&p, &[650.0]).unwrap();
    assert_eq!(at_650[0].amount, estimate_loan(&p).unwrap().amount);
}

#[test]
fn heatmap_covers_bucket_cross_product() {
    let p = profile();
    let scores = default_credit_score_buckets();
    let incomes = default_income_buckets();
    assert_eq!(scores.len(), 12);
    assert_eq!(scores.first(), Some(&300));
    assert_eq!(scores.last(), Some(&850));
    assert_eq!(incomes.len(), 20);
    assert_eq!(incomes.first(), Some(&1_000.0));
    assert_eq!(incomes.last(), Some(&20_000.0));

    let grid = heatmap_grid(&p, &scores, &incomes).unwrap();
    assert_eq!(grid.amounts.len(), 20);
    assert!(grid.amounts.iter().all(|row| row.len() == 12));

    // Row = income 1000, column = score 300.
    let corner = grid.get(0, 0).unwrap();
    assert!((corner - 2_117.647).abs() < 0.001, "corner = {corner}");

    // Row income 5000, column score 650 is the reference estimate.
    let idx_5000 = incomes.iter().position(|&i| i == 5_000.0).unwrap();
    let idx_650 = scores.iter().position(|&s| s == 650).unwrap();
    assert_eq!(grid.get(idx_5000, idx_650).unwrap(), estimate_loan(&p).unwrap().amount);
    assert_eq!(grid.get(20, 0), None);

    assert_eq!(grid, heatmap_grid(&p, &scores, &incomes).unwrap());
}

#[test]
fn risk_band_thresholds() {
    assert_eq!(RiskBand::from_credit_score(751), RiskBand::Low);
    assert_eq!(RiskBand::from_credit_score(750), RiskBand::Moderate);
    assert_eq!(RiskBand::from_credit_score(601), RiskBand::Moderate);
    assert_eq!(RiskBand::from_credit_score(600), RiskBand::High);
}

#[test]
fn flat_installment_spreads_amount_over_term() {
    let estimate = estimate_loan(&profile()).unwrap();
    let monthly = estimate.flat_monthly_installment(20);
    assert!((monthly - estimate.amount / 240.0).abs() < 1e-12);
    assert_eq!(estimate.flat_monthly_installment(0), 0.0);
}
