//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod dump;
mod output;

pub use dump::{DumpReport, DumpResult, PreviewFile, WrittenFile};
pub use output::{Report, TerminalOutput};
