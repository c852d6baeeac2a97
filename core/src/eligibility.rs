//! Loan eligibility estimator.
//!
//! A heuristic scoring formula, not a trained model. The coefficients
//! and the evaluation order are fixed so that report and chart outputs
//! stay reproducible bit-for-bit.

use crate::{
    error::{CoreError, CoreResult},
    types::{Money, LOAN_TERMS_YEARS, MAX_CREDIT_SCORE, MIN_CREDIT_SCORE},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 70;

/// Number of points in the default credit-score sensitivity curve.
pub const SCORE_SAMPLE_COUNT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
}

impl EmploymentStatus {
    pub fn factor(&self) -> f64 {
        match self {
            Self::Employed     => 1.0,
            Self::SelfEmployed => 0.8,
            Self::Unemployed   => 0.5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Employed     => "Employed",
            Self::SelfEmployed => "Self-Employed",
            Self::Unemployed   => "Unemployed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanType {
    Home,
    Car,
    Education,
    Personal,
}

impl LoanType {
    pub fn factor(&self) -> f64 {
        match self {
            Self::Home      => 1.2,
            Self::Car       => 0.8,
            Self::Education => 0.9,
            Self::Personal  => 0.7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Home      => "Home Loan",
            Self::Car       => "Car Loan",
            Self::Education => "Education Loan",
            Self::Personal  => "Personal Loan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Occupation {
    Salaried,
    Entrepreneur,
    Farmer,
    Student,
    Retired,
}

impl Occupation {
    pub const ALL: [Occupation; 5] = [
        Self::Salaried,
        Self::Entrepreneur,
        Self::Farmer,
        Self::Student,
        Self::Retired,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Salaried     => "Salaried",
            Self::Entrepreneur => "Entrepreneur",
            Self::Farmer       => "Farmer",
            Self::Student      => "Student",
            Self::Retired      => "Retired",
        }
    }
}

/// Normalise a user-facing label: case-insensitive, ignoring spaces,
/// hyphens, underscores and a trailing "loan".
fn normalize_label(s: &str) -> String {
    let compact: String = s
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect();
    match compact.strip_suffix("loan") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => compact,
    }
}

impl FromStr for EmploymentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match normalize_label(s).as_str() {
            "employed"     => Ok(Self::Employed),
            "selfemployed" => Ok(Self::SelfEmployed),
            "unemployed"   => Ok(Self::Unemployed),
            _ => Err(CoreError::invalid_input(
                "employment_status",
                format!("unrecognized employment status '{s}'"),
            )),
        }
    }
}

impl FromStr for LoanType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match normalize_label(s).as_str() {
            "home"      => Ok(Self::Home),
            "car"       => Ok(Self::Car),
            "education" => Ok(Self::Education),
            "personal"  => Ok(Self::Personal),
            _ => Err(CoreError::invalid_input(
                "loan_type",
                format!("unrecognized loan type '{s}'"),
            )),
        }
    }
}

impl FromStr for Occupation {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let wanted = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|o| normalize_label(o.label()) == wanted)
            .ok_or_else(|| {
                CoreError::invalid_input("occupation", format!("unrecognized occupation '{s}'"))
            })
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Applicant attributes as submitted for a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub monthly_income:    Money,
    pub age:               u32,
    pub loan_term_years:   u32,
    pub credit_score:      u32,
    pub employment_status: EmploymentStatus,
    pub loan_type:         LoanType,
    pub occupation:        Occupation,
}

impl ApplicantProfile {
    pub fn validate(&self) -> CoreResult<()> {
        if !self.monthly_income.is_finite() || self.monthly_income <= 0.0 {
            return Err(CoreError::invalid_input(
                "monthly_income",
                format!("must be a positive amount, got {}", self.monthly_income),
            ));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(CoreError::invalid_input(
                "age",
                format!("must be between {MIN_AGE} and {MAX_AGE}, got {}", self.age),
            ));
        }
        if !LOAN_TERMS_YEARS.contains(&self.loan_term_years) {
            return Err(CoreError::invalid_input(
                "loan_term_years",
                format!("must be one of {LOAN_TERMS_YEARS:?}, got {}", self.loan_term_years),
            ));
        }
        if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&self.credit_score) {
            return Err(CoreError::invalid_input(
                "credit_score",
                format!(
                    "must be between {MIN_CREDIT_SCORE} and {MAX_CREDIT_SCORE}, got {}",
                    self.credit_score
                ),
            ));
        }
        Ok(())
    }

    /// The scoring formula at an arbitrary credit score and income.
    /// Operand order matches the published reports.
    fn amount_at(&self, credit_score: f64, income: Money) -> Money {
        (income * 10.0)
            * (credit_score / MAX_CREDIT_SCORE as f64)
            * self.employment_status.factor()
            * self.loan_type.factor()
            / (self.loan_term_years as f64 / 10.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanEstimate {
    pub amount:                  Money,
    pub approval_chance_percent: f64,
}

impl LoanEstimate {
    /// Interest-free "monthly EMI" quick metric: amount spread evenly.
    pub fn flat_monthly_installment(&self, term_years: u32) -> Money {
        let months = crate::amortization::payment_count(term_years);
        if months == 0 {
            return 0.0;
        }
        self.amount / months as f64
    }
}

pub fn estimate_loan(profile: &ApplicantProfile) -> CoreResult<LoanEstimate> {
    profile.validate()?;
    let score = profile.credit_score as f64;
    let estimate = LoanEstimate {
        amount: profile.amount_at(score, profile.monthly_income),
        approval_chance_percent: score / MAX_CREDIT_SCORE as f64 * 100.0,
    };
    log::debug!(
        "estimate: income={:.0} score={} term={} -> amount={:.2} approval={:.1}%",
        profile.monthly_income,
        profile.credit_score,
        profile.loan_term_years,
        estimate.amount,
        estimate.approval_chance_percent
    );
    Ok(estimate)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub credit_score: f64,
    pub amount:       Money,
}

/// Loan amount as a function of credit score, profile otherwise fixed.
pub fn sensitivity_curve(
    profile: &ApplicantProfile,
    score_samples: &[f64],
) -> CoreResult<Vec<CurvePoint>> {
    profile.validate()?;
    Ok(score_samples
        .iter()
        .map(|&credit_score| CurvePoint {
            credit_score,
            amount: profile.amount_at(credit_score, profile.monthly_income),
        })
        .collect())
}

/// Loan amounts over income (rows) × credit score (columns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    pub credit_scores: Vec<u32>,
    pub incomes:       Vec<Money>,
    pub amounts:       Vec<Vec<Money>>,
}

impl HeatmapGrid {
    pub fn get(&self, income_idx: usize, score_idx: usize) -> Option<Money> {
        self.amounts.get(income_idx)?.get(score_idx).copied()
    }
}

pub fn heatmap_grid(
    profile: &ApplicantProfile,
    credit_score_buckets: &[u32],
    income_buckets: &[Money],
) -> CoreResult<HeatmapGrid> {
    profile.validate()?;
    let amounts = income_buckets
        .iter()
        .map(|&income| {
            credit_score_buckets
                .iter()
                .map(|&score| profile.amount_at(score as f64, income))
                .collect::<Vec<_>>()
        })
        .collect();
    Ok(HeatmapGrid {
        credit_scores: credit_score_buckets.to_vec(),
        incomes: income_buckets.to_vec(),
        amounts,
    })
}

/// Evenly spaced scores from 300 to 850 inclusive.
pub fn default_score_samples() -> Vec<f64> {
    let lo = MIN_CREDIT_SCORE as f64;
    let hi = MAX_CREDIT_SCORE as f64;
    let step = (hi - lo) / (SCORE_SAMPLE_COUNT - 1) as f64;
    (0..SCORE_SAMPLE_COUNT)
        .map(|i| if i == SCORE_SAMPLE_COUNT - 1 { hi } else { lo + step * i as f64 })
        .collect()
}

pub fn default_credit_score_buckets() -> Vec<u32> {
    (MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).step_by(50).collect()
}

pub fn default_income_buckets() -> Vec<Money> {
    (1_000..=20_000u32).step_by(1_000).map(f64::from).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub fn from_credit_score(credit_score: u32) -> Self {
        match credit_score {
            s if s > 750 => Self::Low,
            s if s > 600 => Self::Moderate,
            _ => Self::High,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Low      => "Low Risk: Great Credit Score!",
            Self::Moderate => "Moderate Risk: Improve your Credit Score for better rates.",
            Self::High     => "High Risk: Loan approval may be difficult. Consider credit repair steps.",
        }
    }
}
