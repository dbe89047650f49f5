//! Old-regime deduction stacking.
//!
//! Every deduction is capped on its own and the results are summed; no cap
//! depends on another deduction.

use rust_decimal::Decimal;

use crate::calculations::common::clamp_amount;

use crate::models::{
    DeductionInputs, DeductionLimits, DeductionSummary, HomeLoanInterest, HraRules,
};

/// `min(claimed, cap)`, clamped into `0..=MAX_AMOUNT`.
pub fn capped(
    claimed: Decimal,
    cap: Decimal,
) -> Decimal {
    clamp_amount(claimed.min(cap))
}

/// Interest deduction on home loans: self-occupied interest is capped,
/// let-out interest is not.
pub fn home_loan_interest_deduction(
    limits: &DeductionLimits,
    interest: &HomeLoanInterest,
) -> Decimal {
    capped(
        interest.self_occupied,
        limits.self_occupied_home_loan_interest,
    ) + clamp_amount(interest.let_out)
}

/// Applies caps to each claimed deduction and totals them.
///
/// `deductions` may be `None` when the taxpayer claimed nothing beyond home
/// loan interest.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use finzo_core::{DeductionInputs, DeductionLimits, HomeLoanInterest, HraRules};
/// use finzo_core::calculations::deductions::old_regime_deductions;
///
/// let claims = DeductionInputs {
///     section_80c: dec!(1000000),
///     section_80d: dec!(30000),
///     ..DeductionInputs::default()
/// };
///
/// let summary = old_regime_deductions(
///     &DeductionLimits::default(),
///     &HraRules::default(),
///     Some(&claims),
///     &HomeLoanInterest::default(),
/// );
///
/// assert_eq!(summary.section_80c, dec!(150000));
/// assert_eq!(summary.total, dec!(180000));
/// ```
pub fn old_regime_deductions(
    limits: &DeductionLimits,
    hra_rules: &HraRules,
    deductions: Option<&DeductionInputs>,
    home_loan: &HomeLoanInterest,
) -> DeductionSummary {
    let home_loan_interest = home_loan_interest_deduction(limits, home_loan);

    let Some(claims) = deductions else {
        return DeductionSummary {
            home_loan_interest,
            total: home_loan_interest,
            ..DeductionSummary::default()
        };
    };
    let claims = claims.normalized();

    let section_80c = capped(claims.section_80c, limits.section_80c);
    let section_80d = capped(claims.section_80d, limits.section_80d);
    let nps_contribution = capped(claims.nps_contribution, limits.nps_contribution);
    let section_80e = claims.section_80e;
    let section_80g = claims.section_80g;
    let hra_exemption = hra_rules.exemption_for(&claims.hra);

    let total = section_80c
        + section_80d
        + nps_contribution
        + section_80e
        + section_80g
        + hra_exemption
        + home_loan_interest;

    DeductionSummary {
        section_80c,
        section_80d,
        nps_contribution,
        section_80e,
        section_80g,
        hra_exemption,
        home_loan_interest,
        total,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::MAX_AMOUNT;
    use crate::models::HraDetails;

    fn limits() -> DeductionLimits {
        DeductionLimits::default()
    }

    #[test]
    fn capped_applies_cap() {
        assert_eq!(capped(dec!(1000000), dec!(150000)), dec!(150000));
        assert_eq!(capped(dec!(90000), dec!(150000)), dec!(90000));
        assert_eq!(capped(dec!(-10), dec!(150000)), dec!(0));
    }

    #[test]
    fn home_loan_interest_stays_bounded_for_huge_claims() {
        let limits = DeductionLimits {
            self_occupied_home_loan_interest: Decimal::MAX,
            ..limits()
        };
        let interest = HomeLoanInterest {
            self_occupied: Decimal::MAX,
            let_out: Decimal::MAX,
        };

        let result = home_loan_interest_deduction(&limits, &interest);

        assert_eq!(result, MAX_AMOUNT + MAX_AMOUNT);
    }

    #[test]
    fn home_loan_self_occupied_is_capped_let_out_is_not() {
        let interest = HomeLoanInterest {
            self_occupied: dec!(350000),
            let_out: dec!(400000),
        };

        let result = home_loan_interest_deduction(&limits(), &interest);

        assert_eq!(result, dec!(600000));
    }

    #[test]
    fn no_claims_counts_only_home_loan() {
        let interest = HomeLoanInterest {
            self_occupied: dec!(150000),
            let_out: dec!(0),
        };

        let summary = old_regime_deductions(&limits(), &HraRules::default(), None, &interest);

        assert_eq!(summary.home_loan_interest, dec!(150000));
        assert_eq!(summary.section_80c, dec!(0));
        assert_eq!(summary.total, dec!(150000));
    }

    #[test]
    fn every_cap_is_independent() {
        let claims = DeductionInputs {
            section_80c: dec!(1000000),
            section_80d: dec!(100000),
            nps_contribution: dec!(80000),
            section_80e: dec!(120000),
            section_80g: dec!(20000),
            hra: HraDetails::default(),
        };

        let summary = old_regime_deductions(
            &limits(),
            &HraRules::default(),
            Some(&claims),
            &HomeLoanInterest::default(),
        );

        assert_eq!(summary.section_80c, dec!(150000));
        assert_eq!(summary.section_80d, dec!(75000));
        assert_eq!(summary.nps_contribution, dec!(50000));
        assert_eq!(summary.section_80e, dec!(120000));
        assert_eq!(summary.section_80g, dec!(20000));
        assert_eq!(summary.hra_exemption, dec!(0));
        assert_eq!(summary.total, dec!(415000));
    }

    #[test]
    fn includes_hra_exemption() {
        let claims = DeductionInputs {
            hra: HraDetails {
                basic_salary: dec!(600000),
                dearness_allowance: dec!(0),
                hra_received: dec!(240000),
                rent_paid: dec!(180000),
                is_metro_city: true,
            },
            ..DeductionInputs::default()
        };

        let summary = old_regime_deductions(
            &limits(),
            &HraRules::default(),
            Some(&claims),
            &HomeLoanInterest::default(),
        );

        assert_eq!(summary.hra_exemption, dec!(120000));
        assert_eq!(summary.total, dec!(120000));
    }

    #[test]
    fn negative_claims_contribute_nothing() {
        let claims = DeductionInputs {
            section_80e: dec!(-50000),
            section_80g: dec!(-1),
            ..DeductionInputs::default()
        };

        let summary = old_regime_deductions(
            &limits(),
            &HraRules::default(),
            Some(&claims),
            &HomeLoanInterest::default(),
        );

        assert_eq!(summary.total, dec!(0));
    }
}
