pub mod common;
pub mod comparison;
pub mod deductions;
pub mod hra;
pub mod income_tax;
pub mod slabs;
