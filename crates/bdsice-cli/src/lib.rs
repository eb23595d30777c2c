//! Library side of the `bdsice` binary.

pub mod logging;
pub mod render;
pub mod settings;
