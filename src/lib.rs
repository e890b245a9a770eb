//! Interactive employee attrition dashboard.
//!
//! Loads an attrition table once, filters it by department, gender and
//! education field, and charts the visible rows across five topic tabs.

pub mod app;
pub mod charts;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
