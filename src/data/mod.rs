// src/data/mod.rs

//! The `data` module is specialized data containers for the decoded
//! firewall events ([`FwEvent`s]) and the tailing position ([`Cursor`]).
//!
//! [`FwEvent`s]: crate::data::fwevent::FwEvent
//! [`Cursor`]: crate::data::cursor::Cursor

pub mod cursor;
pub mod fwevent;
