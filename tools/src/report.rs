//! Plain-text rendering for the runner: the loan report, the term
//! breakdown table and the journey summary.

use chrono::{DateTime, Local};
use loansim_core::{
    amortization::LoanImpact, ApplicantProfile, JourneySummary, LiteracyQuiz, LoanEstimate,
    RiskBand, TermPoint,
};
use std::fmt::Write;

/// "1234567.891" -> "1,234,567.89"
pub fn format_money(amount: f64) -> String {
    let rendered = format!("{:.2}", amount.abs());
    let (whole, frac) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && rendered != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

pub fn loan_report(
    profile: &ApplicantProfile,
    estimate: &LoanEstimate,
    schemes: &[String],
    generated_at: DateTime<Local>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Loan Prediction Report ({})", generated_at.format("%Y-%m-%d %H:%M"));
    let _ = writeln!(out, "- Income: ${}", profile.monthly_income);
    let _ = writeln!(out, "- Age: {}", profile.age);
    let _ = writeln!(out, "- Employment Status: {}", profile.employment_status);
    let _ = writeln!(out, "- Loan Type: {}", profile.loan_type);
    let _ = writeln!(out, "- Predicted Loan Amount: ${}", format_money(estimate.amount));
    let _ = writeln!(out, "- Approval Chance: {:.1}%", estimate.approval_chance_percent);
    let _ = writeln!(out, "- Recommended Schemes: {}", schemes.join(", "));
    out
}

pub fn insights(profile: &ApplicantProfile, estimate: &LoanEstimate) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  Monthly EMI (Estimate): ${:.2}",
        estimate.flat_monthly_installment(profile.loan_term_years)
    );
    let _ = writeln!(out, "  Loan Term (Years):      {} Years", profile.loan_term_years);
    let _ = writeln!(out, "  Predicted Approval:     {:.1}%", estimate.approval_chance_percent);
    let _ = writeln!(out, "  Risk Meter:             {}", RiskBand::from_credit_score(profile.credit_score).message());
    out
}

pub fn loan_impact(impact: &LoanImpact) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Estimated EMI:                ${}", format_money(impact.emi));
    let _ = writeln!(out, "  Debt-to-Income Ratio:         {:.2}%", impact.debt_ratio);
    let _ = writeln!(out, "  Net Savings After Loan Term:  ${}", format_money(impact.net_savings));
    let _ = writeln!(out, "  Verdict: {}", impact.affordability.advice());
    out
}

pub fn term_table(series: &[TermPoint]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>6} {:>14} {:>10} {:>18}", "Term", "EMI ($)", "DTI (%)", "Net Savings ($)");
    let _ = writeln!(out, "{}", "-".repeat(51));
    for p in series {
        let _ = writeln!(
            out,
            "{:>6} {:>14} {:>10.2} {:>18}",
            p.term_years,
            format_money(p.emi),
            p.debt_ratio,
            format_money(p.net_savings)
        );
    }
    out
}

pub fn journey_summary(summary: &JourneySummary) -> String {
    let mut out = String::new();
    let c = &summary.decision_counts;
    let _ = writeln!(out, "  Final Net Worth:  ${}", format_money(summary.final_net_worth));
    let _ = writeln!(out, "  Total Growth:     {:.2}%", summary.total_growth_percent);
    let _ = writeln!(out, "  Decisions:        invest={} save={} borrow={}", c.invest, c.save, c.borrow);
    let _ = writeln!(out, "  Personality:      {}", summary.personality.label());
    let _ = writeln!(out, "  Risk Score:       {:.1}/100", summary.risk_score);
    out
}

/// Every level with its options and the correct answer revealed.
pub fn literacy_quiz(quiz: &LiteracyQuiz) -> String {
    let mut out = String::new();
    for (i, level) in quiz.levels.iter().enumerate() {
        let _ = writeln!(out, "  Level {}: {}", i + 1, level.title);
        let _ = writeln!(out, "    {}", level.question);
        for (n, option) in level.options.iter().enumerate() {
            let _ = writeln!(out, "      {}) {option}", n + 1);
        }
        let _ = writeln!(out, "    Answer: {}. {}", level.correct_answer(), level.explanation);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use loansim_core::{estimate_loan, EmploymentStatus, LoanType, Occupation};

    #[test]
    fn money_grouping() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(999.999), "1,000.00");
        assert_eq!(format_money(22_941.176), "22,941.18");
        assert_eq!(format_money(-1_234_567.0), "-1,234,567.00");
    }

    #[test]
    fn report_lists_profile_estimate_and_schemes() {
        let profile = ApplicantProfile {
            monthly_income: 5000.0,
            age: 30,
            loan_term_years: 20,
            credit_score: 650,
            employment_status: EmploymentStatus::Employed,
            loan_type: LoanType::Home,
            occupation: Occupation::Farmer,
        };
        let estimate = estimate_loan(&profile).unwrap();
        let when = Local.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let text = loan_report(&profile, &estimate, &["A".into(), "B".into(), "C".into()], when);

        assert!(text.starts_with("Loan Prediction Report (2026-03-01 09:30)"));
        assert!(text.contains("- Employment Status: Employed"));
        assert!(text.contains("- Loan Type: Home Loan"));
        assert!(text.contains("- Predicted Loan Amount: $22,941.18"));
        assert!(text.contains("- Approval Chance: 76.5%"));
        assert!(text.contains("- Recommended Schemes: A, B, C"));
    }

    #[test]
    fn quiz_reveals_answers_per_level() {
        let text = literacy_quiz(&LiteracyQuiz::builtin());
        assert!(text.starts_with("  Level 1: What's a Good Credit Score?"));
        assert!(text.contains("      2) No, it's poor"));
        assert!(text.contains("    Answer: Check hidden charges. There may be hidden"));
        assert_eq!(text.matches("Answer:").count(), 3);
    }
}
