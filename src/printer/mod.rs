// src/printer/mod.rs

//! The `printer` module is for printing user-facing firewall events
//! ([`FwEvent`s]) with an optionally colored action column, and the
//! `--summary`.
//!
//! [`FwEvent`s]: crate::data::fwevent::FwEvent

pub mod printers;
pub mod summary;
