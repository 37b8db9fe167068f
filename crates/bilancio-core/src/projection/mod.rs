pub mod assumptions;
pub mod balance;
pub mod engine;
pub mod income;
pub mod line_table;

pub use assumptions::{FixedShareField, GrowthAssumption, GrowthField};
pub use balance::{trade_payables, turnover_days, ProjectedBalanceSheet, TurnoverDays};
pub use engine::{project, project_multi_year, ProjectionOutput};
pub use income::{ProjectedIncomeStatement, ProjectedLine};
pub use line_table::{LineDriver, LineKind, LineRule, LineSource, PROJECTION_LINES};
