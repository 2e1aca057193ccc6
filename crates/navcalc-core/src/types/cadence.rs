//! Investment cadence for systematic plans.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NavError;

/// How often a systematic investment plan invests.
///
/// Every cadence steps in whole calendar months from the plan's start date,
/// so the day-of-month is preserved wherever the target month allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Cadence {
    /// One installment per month (12 per year)
    #[default]
    Monthly,
    /// One installment per quarter (4 per year)
    Quarterly,
    /// One installment every six months (2 per year)
    HalfYearly,
    /// One installment per year
    Yearly,
}

impl Cadence {
    /// Returns the number of installments per year.
    #[must_use]
    pub fn installments_per_year(&self) -> u32 {
        12 / self.months_per_step()
    }

    /// Returns the number of calendar months between installments.
    #[must_use]
    pub fn months_per_step(&self) -> u32 {
        match self {
            Cadence::Monthly => 1,
            Cadence::Quarterly => 3,
            Cadence::HalfYearly => 6,
            Cadence::Yearly => 12,
        }
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Monthly => "monthly",
            Cadence::Quarterly => "quarterly",
            Cadence::HalfYearly => "half-yearly",
            Cadence::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cadence::Monthly => "Monthly",
            Cadence::Quarterly => "Quarterly",
            Cadence::HalfYearly => "Half-Yearly",
            Cadence::Yearly => "Yearly",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Cadence {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "1m" => Ok(Cadence::Monthly),
            "quarterly" | "quarter" | "3m" => Ok(Cadence::Quarterly),
            "half-yearly" | "halfyearly" | "semi-annual" | "6m" => Ok(Cadence::HalfYearly),
            "yearly" | "annual" | "annually" | "12m" => Ok(Cadence::Yearly),
            _ => Err(NavError::invalid_cadence(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cadence_steps() {
        assert_eq!(Cadence::Monthly.months_per_step(), 1);
        assert_eq!(Cadence::Quarterly.months_per_step(), 3);
        assert_eq!(Cadence::HalfYearly.months_per_step(), 6);
        assert_eq!(Cadence::Yearly.months_per_step(), 12);
        assert_eq!(Cadence::Quarterly.installments_per_year(), 4);
    }

    #[test]
    fn test_cadence_parse() {
        assert_eq!("monthly".parse::<Cadence>().unwrap(), Cadence::Monthly);
        assert_eq!("Monthly".parse::<Cadence>().unwrap(), Cadence::Monthly);
        assert_eq!("3m".parse::<Cadence>().unwrap(), Cadence::Quarterly);
        assert_eq!("half-yearly".parse::<Cadence>().unwrap(), Cadence::HalfYearly);
        assert!("weekly".parse::<Cadence>().is_err());
    }

    #[test]
    fn test_cadence_serde_name_round_trips_through_parse() {
        for cadence in [
            Cadence::Monthly,
            Cadence::Quarterly,
            Cadence::HalfYearly,
            Cadence::Yearly,
        ] {
            assert_eq!(cadence.as_str().parse::<Cadence>().unwrap(), cadence);
        }
        assert_eq!(Cadence::default(), Cadence::Monthly);
    }
}
