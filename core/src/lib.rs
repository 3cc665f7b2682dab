//! Core library for the daybook personal planner: typed records, the SQLite
//! store, the meal spinner, and the calendar grid. The CLI crate layers
//! presentation on top of [`service::DaybookService`].

pub mod calendar;
pub mod db;
pub mod error;
pub mod models;
pub mod selector;
pub mod service;
pub mod session;

pub use error::{Error, Result};
