//! CLI library components for the hiring statistics tools.

pub mod logging;
pub mod pipeline;
