//! CLI library components for the pinmap address map renderer.

pub mod logging;
pub mod pipeline;
