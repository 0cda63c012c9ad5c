//! UI Components
//!
//! Leptos components for the budget grid.

mod budget_table;
mod table_row;
mod toolbar;

pub use budget_table::BudgetTable;
pub use table_row::TableRow;
pub use toolbar::Toolbar;
