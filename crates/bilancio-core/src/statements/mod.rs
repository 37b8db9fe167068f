pub mod codes;
pub mod layout;
pub mod snapshot;

pub use codes::{BalanceSheetCode, BalanceSide, IncomeStatementCode, LineCode};
pub use layout::{balance_sheet_layout, income_statement_layout, StatementRow};
pub use snapshot::{BalanceSheetSnapshot, DebtBreakdown, FinancialStatements, IncomeStatementPeriod};
