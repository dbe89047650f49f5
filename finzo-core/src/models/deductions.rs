use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::clamp_amount;

/// Salary and rent details used for the house rent allowance exemption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HraDetails {
    pub basic_salary: Decimal,
    pub dearness_allowance: Decimal,
    pub hra_received: Decimal,
    pub rent_paid: Decimal,
    pub is_metro_city: bool,
}

impl HraDetails {
    /// Salary for HRA purposes: basic pay plus dearness allowance.
    pub fn salary_for_hra(&self) -> Decimal {
        self.basic_salary.saturating_add(self.dearness_allowance)
    }
}

/// Chapter VI-A and related deduction claims. Only the old regime honours these.
///
/// Values are the amounts claimed; caps are applied by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionInputs {
    /// Section 80C investments (PPF, ELSS, life insurance, ...).
    pub section_80c: Decimal,
    /// Section 80D health insurance premiums.
    pub section_80d: Decimal,
    /// Section 80CCD(1B) additional NPS contribution.
    pub nps_contribution: Decimal,
    /// Section 80E education loan interest.
    pub section_80e: Decimal,
    /// Section 80G donations.
    pub section_80g: Decimal,
    pub hra: HraDetails,
}

impl DeductionInputs {
    /// Returns a copy with every amount clamped into
    /// `0..=`[`MAX_AMOUNT`](crate::calculations::common::MAX_AMOUNT).
    pub fn normalized(&self) -> Self {
        Self {
            section_80c: clamp_amount(self.section_80c),
            section_80d: clamp_amount(self.section_80d),
            nps_contribution: clamp_amount(self.nps_contribution),
            section_80e: clamp_amount(self.section_80e),
            section_80g: clamp_amount(self.section_80g),
            hra: HraDetails {
                basic_salary: clamp_amount(self.hra.basic_salary),
                dearness_allowance: clamp_amount(self.hra.dearness_allowance),
                hra_received: clamp_amount(self.hra.hra_received),
                rent_paid: clamp_amount(self.hra.rent_paid),
                is_metro_city: self.hra.is_metro_city,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::MAX_AMOUNT;

    #[test]
    fn normalized_clamps_negatives_and_keeps_metro_flag() {
        let inputs = DeductionInputs {
            section_80c: dec!(-5),
            section_80d: dec!(25000),
            hra: HraDetails {
                rent_paid: dec!(-1000),
                is_metro_city: true,
                ..HraDetails::default()
            },
            ..DeductionInputs::default()
        };

        let normalized = inputs.normalized();

        assert_eq!(normalized.section_80c, dec!(0));
        assert_eq!(normalized.section_80d, dec!(25000));
        assert_eq!(normalized.hra.rent_paid, dec!(0));
        assert!(normalized.hra.is_metro_city);
    }

    #[test]
    fn normalized_caps_huge_claims() {
        let inputs = DeductionInputs {
            section_80g: Decimal::MAX,
            hra: HraDetails {
                basic_salary: Decimal::MAX,
                ..HraDetails::default()
            },
            ..DeductionInputs::default()
        };

        let normalized = inputs.normalized();

        assert_eq!(normalized.section_80g, MAX_AMOUNT);
        assert_eq!(normalized.hra.basic_salary, MAX_AMOUNT);
    }

    #[test]
    fn salary_for_hra_includes_dearness_allowance() {
        let hra = HraDetails {
            basic_salary: dec!(600000),
            dearness_allowance: dec!(60000),
            ..HraDetails::default()
        };

        assert_eq!(hra.salary_for_hra(), dec!(660000));
    }
}
