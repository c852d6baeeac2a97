//! Scheme recommender: maps an occupation to subsidised loan programs.

use crate::{
    eligibility::{LoanType, Occupation},
    error::{CoreError, CoreResult},
    rng::RandomSource,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Schemes listed per occupation, and schemes recommended per call.
pub const SCHEMES_PER_OCCUPATION: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeCatalog {
    pub schemes: BTreeMap<Occupation, Vec<String>>,
}

impl SchemeCatalog {
    pub fn builtin() -> Self {
        let entry = |occupation: Occupation, names: [&str; SCHEMES_PER_OCCUPATION]| {
            (occupation, names.iter().map(|s| s.to_string()).collect::<Vec<_>>())
        };
        Self {
            schemes: BTreeMap::from([
                entry(Occupation::Student, [
                    "Vidya Lakshmi Education Loan (Interest Subsidy)",
                    "National Overseas Scholarship for Higher Education",
                    "Central Sector Interest Subsidy Scheme (CSIS)",
                ]),
                entry(Occupation::Entrepreneur, [
                    "MUDRA Loans under PMMY",
                    "Stand Up India Scheme",
                    "Startup India Seed Fund Scheme",
                ]),
                entry(Occupation::Farmer, [
                    "Kisan Credit Card (KCC) Scheme",
                    "PM-KISAN Credit Subsidy",
                    "Agriculture Infrastructure Fund Loan",
                ]),
                entry(Occupation::Salaried, [
                    "PMAY Subsidized Home Loan",
                    "Affordable Housing Interest Subsidy Scheme",
                    "Subsidized Auto Loan for E-Vehicles",
                ]),
                entry(Occupation::Retired, [
                    "Senior Citizen Savings Scheme (SCSS)",
                    "Reverse Mortgage Loan Subsidy",
                    "Pension Loan Facility by Nationalized Banks",
                ]),
            ]),
        }
    }

    /// Every listed occupation must carry exactly three distinct schemes.
    pub fn validate(&self) -> CoreResult<()> {
        for (occupation, names) in &self.schemes {
            let distinct: HashSet<&String> = names.iter().collect();
            if names.len() != SCHEMES_PER_OCCUPATION || distinct.len() != names.len() {
                return Err(CoreError::Config(format!(
                    "occupation '{occupation}' must list {SCHEMES_PER_OCCUPATION} distinct schemes, found {:?}",
                    names
                )));
            }
        }
        Ok(())
    }

    pub fn schemes_for(&self, occupation: Occupation) -> Option<&[String]> {
        self.schemes.get(&occupation).map(Vec::as_slice)
    }

    /// Pick three schemes without replacement, in random order.
    /// With a three-item catalog this is a shuffle of the full list.
    pub fn recommend(
        &self,
        occupation: Occupation,
        rng: &mut impl RandomSource,
    ) -> CoreResult<Vec<String>> {
        let pool = self.schemes_for(occupation).ok_or_else(|| {
            log::warn!("schemes: no catalog entry for {occupation}");
            CoreError::invalid_input("occupation", format!("no schemes listed for '{occupation}'"))
        })?;
        if pool.len() < SCHEMES_PER_OCCUPATION {
            return Err(CoreError::invalid_input(
                "occupation",
                format!("only {} schemes listed for '{occupation}'", pool.len()),
            ));
        }

        // Partial Fisher-Yates over a scratch copy.
        let mut picks = pool.to_vec();
        for i in 0..SCHEMES_PER_OCCUPATION {
            let j = i + rng.next_u64_below((picks.len() - i) as u64) as usize;
            picks.swap(i, j);
        }
        picks.truncate(SCHEMES_PER_OCCUPATION);
        Ok(picks)
    }
}

impl Default for SchemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Recommend schemes from the shipped catalog.
pub fn recommend_schemes(
    occupation: Occupation,
    rng: &mut impl RandomSource,
) -> CoreResult<Vec<String>> {
    SchemeCatalog::builtin().recommend(occupation, rng)
}

/// Paperwork an applicant should prepare.
pub fn suggested_documents(loan_type: LoanType, occupation: Occupation) -> Vec<&'static str> {
    let mut docs = vec![
        "Identity Proof (Aadhar / Passport / Driving License)",
        "Address Proof (Utility Bills / Rent Agreement)",
        "Income Proof (Salary Slips / IT Returns)",
        "Bank Statements (Last 6 months)",
    ];
    if loan_type == LoanType::Education {
        docs.push("Educational Proof (admission letter / fee structure)");
    }
    if occupation == Occupation::Farmer {
        docs.push("Land Ownership Proof (for agriculture loans)");
    }
    docs
}
