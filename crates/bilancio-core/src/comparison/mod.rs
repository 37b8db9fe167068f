pub mod assembler;

pub use assembler::{
    build_comparison, ColumnKind, Comparison, ComparisonColumn, ComparisonInput, ComparisonRow,
    CurrentPeriod,
};
