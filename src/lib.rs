// src/lib.rs

//! _tclib_ is the library of the _tail-comodo_ program, which tails the event
//! log of the Comodo Firewall, a SQLite store named `cislogs.sdb`.
//!
//! The [`FwLogProcessor`] drives a [`FwEventReader`] which queries the store
//! using queries built by [`FwQuery`]. Rows are decoded into [`FwEvent`s]
//! and printed by a [`PrinterFwEvent`].
//!
//! [`FwLogProcessor`]: crate::readers::fwlogprocessor::FwLogProcessor
//! [`FwEventReader`]: crate::readers::fweventreader::FwEventReader
//! [`FwQuery`]: crate::readers::fwquery::FwQuery
//! [`FwEvent`s]: crate::data::fwevent::FwEvent
//! [`PrinterFwEvent`]: crate::printer::printers::PrinterFwEvent

pub mod common;
pub mod data;
pub mod debug;
pub mod error;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
