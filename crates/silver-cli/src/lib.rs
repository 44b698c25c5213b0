//! Library side of the `silver` command line tool.

pub mod logging;
pub mod pipeline;
pub mod types;
