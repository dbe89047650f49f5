use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::clamp_amount;

/// Interest paid on home loans during the year.
///
/// This is a deduction under the old regime, not an income component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeLoanInterest {
    /// Interest on a self-occupied property (capped).
    pub self_occupied: Decimal,
    /// Interest on a let-out property (uncapped).
    pub let_out: Decimal,
}

/// Annual income of the taxpayer, in rupees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeComponents {
    pub salary: Decimal,
    pub other_sources: Decimal,
    pub rental_income: Decimal,
    pub home_loan_interest: HomeLoanInterest,
}

impl IncomeComponents {
    /// Salary-only income, the most common calculator input.
    pub fn from_salary(salary: Decimal) -> Self {
        Self {
            salary,
            ..Self::default()
        }
    }

    /// Returns a copy with every negative amount replaced by zero and every
    /// amount above [`MAX_AMOUNT`](crate::calculations::common::MAX_AMOUNT)
    /// lowered to it.
    pub fn normalized(&self) -> Self {
        Self {
            salary: clamp_amount(self.salary),
            other_sources: clamp_amount(self.other_sources),
            rental_income: clamp_amount(self.rental_income),
            home_loan_interest: HomeLoanInterest {
                self_occupied: clamp_amount(self.home_loan_interest.self_occupied),
                let_out: clamp_amount(self.home_loan_interest.let_out),
            },
        }
    }

    /// Salary + other sources + rental income, saturating at `Decimal::MAX`.
    pub fn gross_income(&self) -> Decimal {
        self.salary
            .saturating_add(self.other_sources)
            .saturating_add(self.rental_income)
    }
}
