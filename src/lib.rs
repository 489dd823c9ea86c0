//! Financial Freedom Point projection.
//!
//! Projects a savings trajectory and an inflation-adjusted required-capital
//! trajectory over a staged life plan and locates where the two curves cross.

pub mod api;
pub mod core;
