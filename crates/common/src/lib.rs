//! Utilities shared by the root chain binaries.

pub mod logging;
