//! The terminal form, the chart and the notifications shown after each run.

pub mod chart;
pub mod form;
pub mod notify;
