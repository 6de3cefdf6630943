//! Library components of the `cog` command line tool.

pub mod logging;
pub mod output;
