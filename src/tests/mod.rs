// src/tests/mod.rs

//! Tests for _tclib_.
//!
//! Tests are placed at `src/tests/`, inside the `tclib`. This keeps them
//! apart from the implementation while keeping crate-internal visibility,
//! e.g. the `Summary*` counters.
//!
//! Tests placed at top-level path `tests/` do not have crate-internal
//! visibility.

pub mod common;
pub mod fwevent_tests;
pub mod fwquery_tests;
