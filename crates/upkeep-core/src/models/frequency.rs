//! Recurrence frequency of a maintenance plan.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Length of one recurrence period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// A fixed number of days
    Days(i32),
    /// A number of calendar months, with native day rollover
    Months(i32),
}

/// How often a plan recurs.
///
/// Every variant maps to a strictly positive [`Period`], so advancing a date
/// by one period always moves it forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[serde(alias = "Semanal")]
    Weekly,
    #[serde(alias = "Mensal")]
    Monthly,
    #[serde(alias = "Bimestral", alias = "bi-monthly")]
    Bimonthly,
    #[serde(alias = "Trimestral")]
    Quarterly,
    #[serde(alias = "Semestral", alias = "semi-annual")]
    Semiannual,
    #[serde(alias = "Anual")]
    Annual,
}

impl Frequency {
    /// All frequencies, shortest period first.
    pub const ALL: [Frequency; 6] = [
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Bimonthly,
        Frequency::Quarterly,
        Frequency::Semiannual,
        Frequency::Annual,
    ];

    /// The period added on each advance.
    pub fn period(&self) -> Period {
        match self {
            Frequency::Weekly => Period::Days(7),
            Frequency::Monthly => Period::Months(1),
            Frequency::Bimonthly => Period::Months(2),
            Frequency::Quarterly => Period::Months(3),
            Frequency::Semiannual => Period::Months(6),
            Frequency::Annual => Period::Months(12),
        }
    }

    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Bimonthly => "bimonthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Semiannual => "semiannual",
            Frequency::Annual => "annual",
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" | "semanal" => Ok(Frequency::Weekly),
            "monthly" | "mensal" => Ok(Frequency::Monthly),
            "bimonthly" | "bi-monthly" | "bimestral" => Ok(Frequency::Bimonthly),
            "quarterly" | "trimestral" => Ok(Frequency::Quarterly),
            "semiannual" | "semi-annual" | "semestral" => Ok(Frequency::Semiannual),
            "annual" | "yearly" | "anual" => Ok(Frequency::Annual),
            _ => Err(format!("Invalid frequency: {s}")),
        }
    }
}
