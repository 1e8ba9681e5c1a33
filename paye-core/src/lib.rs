pub mod calculations;
pub mod categories;
pub mod db;
pub mod models;
pub mod rates;
pub mod services;
pub mod tier;
pub mod validation;

pub use calculations::{PayeCalculator, compute, compute_checked};
pub use categories::{COMMON_EXPENSES, CategoryTable, CustomCategory};
pub use db::{DbConfig, KeyValueStore, RepositoryError, RepositoryFactory, RepositoryRegistry};
pub use models::*;
pub use rates::{SPECIALIZED_TAX_RATES, SpecializedRate, TaxMode, UnknownRateError};
pub use tier::SalaryTier;
pub use validation::{ValidationError, validate_request};
