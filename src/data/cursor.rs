// src/data/cursor.rs

//! Implement [`Cursor`], the id of the last firewall event handed to the
//! output.

use std::fmt;

use crate::common::RowId;

/// The [`RowId`] of the most recently emitted row, or unset if no row has
/// been emitted yet.
///
/// Once set, a `Cursor` never regresses. [`Cursor::advance`] with a smaller
/// id is ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    last: Option<RowId>,
}

impl Cursor {
    /// An unset `Cursor`.
    pub const fn new() -> Cursor {
        Cursor { last: None }
    }

    pub const fn get(&self) -> Option<RowId> {
        self.last
    }

    pub const fn is_set(&self) -> bool {
        self.last.is_some()
    }

    /// Record that row `id` was emitted.
    pub fn advance(&mut self, id: RowId) {
        self.last = match self.last {
            Some(last) if last >= id => Some(last),
            _ => Some(id),
        };
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last {
            Some(id) => write!(f, "{}", id),
            None => write!(f, "unset"),
        }
    }
}
