//! Amortization calculator tests.

use loansim_core::amortization::{
    compute_debt_ratio, compute_emi, compute_net_savings, compute_term_series,
    cumulative_savings_schedule, payment_count, sensitivity_max_term, Affordability,
    SimulationParameters, MAX_SCHEDULE_MONTHS,
};
use loansim_core::{estimate_loan, ApplicantProfile, EmploymentStatus, LoanType, Occupation};

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

#[test]
fn emi_matches_annuity_formula() {
    // 100k at 12% over one year: r = 1%, n = 12.
    let emi = compute_emi(100_000.0, 12.0, 1);
    assert!(close(emi, 8_884.88, 0.01), "emi = {emi}");
}

#[test]
fn zero_rate_or_zero_term_gives_zero_emi() {
    for principal in [0.0, 1_000.0, 250_000.0] {
        assert_eq!(compute_emi(principal, 0.0, 20), 0.0);
        assert_eq!(compute_emi(principal, 8.0, 0), 0.0);
    }
}

#[test]
fn emi_strictly_decreases_with_term() {
    for rate in [5.0, 8.0, 15.0] {
        let emis: Vec<f64> = (1..=30).map(|t| compute_emi(50_000.0, rate, t)).collect();
        for pair in emis.windows(2) {
            assert!(pair[1] < pair[0], "rate {rate}: {} !< {}", pair[1], pair[0]);
        }
    }
}

#[test]
fn debt_ratio_guards_zero_income() {
    assert_eq!(compute_debt_ratio(500.0, 0.0), 0.0);
    assert!(close(compute_debt_ratio(1_500.0, 5_000.0), 30.0, 1e-12));
}

#[test]
fn net_savings_can_go_negative() {
    assert_eq!(compute_net_savings(5_000.0, 1_000.0, 12), 48_000.0);
    assert_eq!(compute_net_savings(1_000.0, 1_500.0, 10), -5_000.0);
}

#[test]
fn term_series_covers_each_year() {
    let series = compute_term_series(100_000.0, 8.0, 5_000.0, 25);
    assert_eq!(series.len(), 25);
    assert_eq!(series[0].term_years, 1);
    assert_eq!(series[24].term_years, 25);

    for point in &series {
        let emi = compute_emi(100_000.0, 8.0, point.term_years);
        assert_eq!(point.emi, emi);
        assert_eq!(point.debt_ratio, compute_debt_ratio(emi, 5_000.0));
        assert_eq!(point.net_savings, compute_net_savings(5_000.0, emi, payment_count(point.term_years)));
    }

    // Restartable: the same inputs give the same series.
    assert_eq!(series, compute_term_series(100_000.0, 8.0, 5_000.0, 25));
    assert!(compute_term_series(100_000.0, 8.0, 5_000.0, 0).is_empty());
}

#[test]
fn affordability_bands() {
    assert_eq!(Affordability::from_debt_ratio(0.0), Affordability::Comfortable);
    assert_eq!(Affordability::from_debt_ratio(29.99), Affordability::Comfortable);
    assert_eq!(Affordability::from_debt_ratio(30.0), Affordability::Stretched);
    assert_eq!(Affordability::from_debt_ratio(49.99), Affordability::Stretched);
    assert_eq!(Affordability::from_debt_ratio(50.0), Affordability::HighRisk);
}

#[test]
fn cumulative_schedule_accumulates_monthly_surplus() {
    let schedule = cumulative_savings_schedule(3_000.0, 1_000.0, 4);
    assert_eq!(schedule, vec![2_000.0, 4_000.0, 6_000.0, 8_000.0]);
}

#[test]
fn sensitivity_range_caps_at_thirty_years() {
    assert_eq!(sensitivity_max_term(10), 15);
    assert_eq!(sensitivity_max_term(25), 30);
    assert_eq!(sensitivity_max_term(28), 30);
}

#[test]
fn simulator_seeds_from_prediction() {
    let profile = ApplicantProfile {
        monthly_income: 5_000.0,
        age: 30,
        loan_term_years: 20,
        credit_score: 650,
        employment_status: EmploymentStatus::Employed,
        loan_type: LoanType::Home,
        occupation: Occupation::Salaried,
    };
    let estimate = estimate_loan(&profile).unwrap();
    let params = SimulationParameters::seeded_from(&profile, &estimate);

    assert_eq!(params.loan_amount, estimate.amount);
    assert_eq!(params.income, 5_000.0);
    assert_eq!(params.term_years, 20);
    assert_eq!(params.annual_interest_percent, 8.0);
    assert_eq!(params.n_payments(), 240);

    let impact = params.analyze();
    assert_eq!(impact.emi, compute_emi(estimate.amount, 8.0, 20));
    assert_eq!(impact.affordability, Affordability::Comfortable);
    assert_eq!(params.savings_schedule().len(), 240);
    assert_eq!(params.term_series().len(), 25);
}

#[test]
fn huge_terms_stay_finite() {
    // 100k at 8%: the installment tends to principal * monthly rate.
    let limit = 100_000.0 * 8.0 / 1200.0;
    for term in [i32::MAX as u32 / 12 + 1, 200_000_000, 400_000_000, u32::MAX] {
        let emi = compute_emi(100_000.0, 8.0, term);
        assert!(emi.is_finite(), "term {term}: emi = {emi}");
        assert!(close(emi, limit, 1e-6), "term {term}: emi = {emi}");
    }
    assert_eq!(payment_count(u32::MAX), u32::MAX as u64 * 12);
}

#[test]
fn huge_term_parameters_do_not_panic() {
    let params = SimulationParameters {
        loan_amount: 100_000.0,
        income: 5_000.0,
        term_years: u32::MAX,
        annual_interest_percent: 8.0,
    };
    assert_eq!(params.n_payments(), u32::MAX as u64 * 12);

    let impact = params.analyze();
    assert!(impact.emi.is_finite());
    assert!(impact.net_savings.is_finite() && impact.net_savings > 0.0);
    assert_eq!(params.savings_schedule().len() as u64, MAX_SCHEDULE_MONTHS);
    assert_eq!(params.term_series().len(), 30);
    assert_eq!(sensitivity_max_term(u32::MAX), 30);

    let estimate = loansim_core::LoanEstimate { amount: 120_000.0, approval_chance_percent: 80.0 };
    let flat = estimate.flat_monthly_installment(u32::MAX);
    assert!(flat.is_finite() && flat > 0.0);
}
