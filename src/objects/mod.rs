//! Per-kind desired-state builders for the objects an instance owns.

pub mod rolebinding;
