//! Systems - the per-substance transition rules

pub mod behaviors;
