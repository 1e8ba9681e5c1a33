pub mod aggregate;
pub mod common;
pub mod period;
pub mod schedule;

pub use aggregate::{PayeCalculator, compute, compute_checked};
pub use period::{AnnualFigures, PeriodAnnualizer, PeriodContribution, SPECIALIZED_RATE_LABEL};
pub use schedule::{BandTax, STATUTORY_BANDS, progressive_tax};
