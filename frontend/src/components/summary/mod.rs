pub mod balances;
pub mod expense_summary;
pub mod income_summary;
pub mod kpis;
pub mod pivot_table;
pub mod transfer_summary;

pub use balances::BalancesView;
pub use expense_summary::ExpenseSummaryView;
pub use income_summary::IncomeSummaryView;
pub use kpis::KpiCard;
pub use pivot_table::PivotTableView;
pub use transfer_summary::TransferSummaryView;
