// src/readers/fwquery.rs

//! Build the SQL query for a [`RunMode`] and [`Cursor`] position.
//!
//! Rows are always returned in ascending `id` order. "Most recent N" is
//! found by descending `id` with a `LIMIT`, so that subset is re-sorted
//! ascending by an outer `SELECT`.

use std::fmt;

use ::const_format::concatcp;

use crate::common::{RowCount, RunMode};
use crate::data::cursor::Cursor;

/// Table of firewall events.
pub const TABLE: &str = "fwevents";

/// Columns read for every row, in the order [`FwEventReader`] reads them.
///
/// [`FwEventReader`]: crate::readers::fweventreader::FwEventReader
pub const SELECT_FIELDS: &str =
    "id,datetime(logdate),path,pid,protocol,direction,srcport,dstport,action,srcaddr,dstaddr";

/// Column indexes into [`SELECT_FIELDS`].
pub mod col {
    pub const ID: usize = 0;
    pub const LOGDATE: usize = 1;
    pub const PATH: usize = 2;
    pub const PID: usize = 3;
    pub const PROTOCOL: usize = 4;
    pub const DIRECTION: usize = 5;
    pub const SRCPORT: usize = 6;
    pub const DSTPORT: usize = 7;
    pub const ACTION: usize = 8;
    pub const SRCADDR: usize = 9;
    pub const DSTADDR: usize = 10;
}

/// Every row, oldest first.
pub const SQL_ALL: &str = concatcp!("SELECT ", SELECT_FIELDS, " FROM ", TABLE, " ORDER BY id ASC");

/// The `?` rows with the largest ids, oldest first.
pub const SQL_LAST_N: &str = concatcp!(
    "SELECT * FROM (SELECT ", SELECT_FIELDS, " FROM ", TABLE, " ORDER BY id DESC LIMIT ?) ORDER BY id ASC"
);

/// Rows with an id greater than `?`, oldest first.
pub const SQL_AFTER_ID: &str = concatcp!(
    "SELECT ", SELECT_FIELDS, " FROM ", TABLE, " WHERE id > ? ORDER BY id ASC"
);

/// A query ready to be passed to [`FwEventReader::query`].
///
/// [`FwEventReader::query`]: crate::readers::fweventreader::FwEventReader::query
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FwQuery {
    pub sql: &'static str,
    /// Value bound to the single `?` parameter, if the query has one.
    pub bind: Option<i64>,
}

impl FwQuery {
    /// The query for `mode`.
    ///
    /// `window` is the row count for `ShowLastN` and for the first `Follow`
    /// poll (when `cursor` is unset).
    pub fn build(
        mode: RunMode,
        window: RowCount,
        cursor: &Cursor,
    ) -> FwQuery {
        match mode {
            RunMode::ShowAll => FwQuery::all(),
            RunMode::ShowLastN => FwQuery::last_n(window),
            RunMode::Follow => match cursor.get() {
                None => FwQuery::last_n(window),
                Some(id) => FwQuery {
                    sql: SQL_AFTER_ID,
                    bind: Some(id),
                },
            },
        }
    }

    pub const fn all() -> FwQuery {
        FwQuery {
            sql: SQL_ALL,
            bind: None,
        }
    }

    pub const fn last_n(n: RowCount) -> FwQuery {
        FwQuery {
            sql: SQL_LAST_N,
            bind: Some(n as i64),
        }
    }
}

impl fmt::Display for FwQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bind {
            Some(value) => write!(f, "{} [{}]", self.sql, value),
            None => write!(f, "{}", self.sql),
        }
    }
}
