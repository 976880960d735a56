//! Placement of the repeated word stamps.

pub mod placement;
