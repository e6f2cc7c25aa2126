// src/readers/summary.rs

//! Implements `Summary` statistics tracking struct.

use crate::common::{FPath, RunMode};
use crate::readers::fweventreader::SummaryFwEventReader;
use crate::readers::fwlogprocessor::SummaryFwLogProcessor;

/// Accumulated statistics about querying and printing activity of one run.
///
/// For CLI option `--summary`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    /// the `FPath` of the store file
    pub path: FPath,
    pub mode: RunMode,
    pub fweventreader: SummaryFwEventReader,
    pub fwlogprocessor: SummaryFwLogProcessor,
}

impl Summary {
    pub fn new(
        path: FPath,
        mode: RunMode,
        fweventreader: SummaryFwEventReader,
        fwlogprocessor: SummaryFwLogProcessor,
    ) -> Summary {
        Summary {
            path,
            mode,
            fweventreader,
            fwlogprocessor,
        }
    }
}
