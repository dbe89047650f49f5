pub mod calculations;
pub mod format;
pub mod models;
pub mod rules;

pub use calculations::comparison::{RegimeComparison, compare_regimes};
pub use calculations::hra::hra_exemption;
pub use calculations::income_tax::{IncomeTaxCalculator, compute_tax};
pub use calculations::slabs::{SlabTax, resolve_slabs, tax_by_slabs};
pub use format::{ParseAmountError, format_inr, format_percent, format_rupees, parse_inr};
pub use models::*;
pub use rules::{RegistryError, RuleSetRegistry};
