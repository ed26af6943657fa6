//! Browse a spreadsheet published as CSV: parse it, infer the column that holds
//! the main count, then filter, search, sort, page, total and re-export it.
//!
//! The data pipeline (`csv`, `numeric`, `metric`, `query`, `sort`, `paginate`,
//! `kpi`, `state`, `pipeline`) is pure and synchronous. `source`, `model`,
//! `controller` and `ui` wrap it into a terminal application.

pub mod collate;
pub mod controller;
pub mod csv;
pub mod domain;
pub mod inputter;
pub mod kpi;
pub mod metric;
pub mod model;
pub mod numeric;
pub mod paginate;
pub mod pipeline;
pub mod query;
pub mod sort;
pub mod source;
pub mod state;
pub mod ui;
