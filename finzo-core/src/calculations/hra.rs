//! House rent allowance exemption.
//!
//! The exempt portion of HRA is the least of:
//!
//! | # | Candidate |
//! |---|-----------|
//! | 1 | HRA actually received |
//! | 2 | 50% of salary in a metro city, 40% elsewhere |
//! | 3 | Rent paid in excess of 10% of salary (never below zero) |
//!
//! "Salary" here is basic pay plus dearness allowance.

use rust_decimal::Decimal;

use crate::calculations::common::{clamp_amount, non_negative, percent_of};
use crate::models::{HraDetails, HraRules};

/// HRA exemption with the standard 50% / 40% / 10% percentages.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use finzo_core::hra_exemption;
///
/// // min(240000, 300000, 300000 - 60000)
/// let exempt = hra_exemption(dec!(600000), dec!(240000), dec!(300000), true);
///
/// assert_eq!(exempt, dec!(240000));
/// ```
pub fn hra_exemption(
    basic: Decimal,
    hra_received: Decimal,
    rent_paid: Decimal,
    is_metro_city: bool,
) -> Decimal {
    HraRules::default().exemption(basic, hra_received, rent_paid, is_metro_city)
}

impl HraRules {
    /// HRA exemption using this rule set's percentages.
    pub fn exemption(
        &self,
        basic: Decimal,
        hra_received: Decimal,
        rent_paid: Decimal,
        is_metro_city: bool,
    ) -> Decimal {
        let city_percent = if is_metro_city {
            self.metro_percent
        } else {
            self.non_metro_percent
        };

        let basic = clamp_amount(basic);
        let received = clamp_amount(hra_received);
        let rent_paid = clamp_amount(rent_paid);
        let salary_share = percent_of(basic, city_percent);
        let rent_excess = non_negative(rent_paid - percent_of(basic, self.rent_excess_percent));

        non_negative(received.min(salary_share).min(rent_excess))
    }

    /// HRA exemption for a full set of HRA details.
    pub fn exemption_for(
        &self,
        details: &HraDetails,
    ) -> Decimal {
        self.exemption(
            details.salary_for_hra(),
            details.hra_received,
            details.rent_paid,
            details.is_metro_city,
        )
    }
}
