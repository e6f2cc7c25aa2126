// src/readers/fweventreader.rs

//! Implements a [`FwEventReader`],
//! the driver of deriving [`FwEvent`s] from the Comodo Firewall SQLite store
//! using [`rusqlite`].
//!
//! The store connection is opened read-only on the first query and reused
//! for every later query until [`FwEventReader::close`].
//!
//! [`FwEvent`s]: crate::data::fwevent::FwEvent
//! [`rusqlite`]: https://docs.rs/rusqlite/0.31.0/rusqlite/

use std::borrow::Cow;
use std::fmt;

#[allow(unused_imports)]
use ::more_asserts::{debug_assert_le, debug_assert_lt};
use ::rusqlite::types::ValueRef;
use ::rusqlite::{Connection, OpenFlags, Row};
#[allow(unused_imports)]
use ::si_trace_print::{
    def1n,
    def1o,
    def1x,
    defn,
    defo,
    defx,
    defñ,
};

use crate::common::{Count, FPath, RowId};
use crate::data::cursor::Cursor;
use crate::data::fwevent::{FwEvent, RawFwEvent};
use crate::error::{TailError, TailResult};
use crate::readers::fwquery::{col, FwQuery};
use crate::v_out;

/// Decoded rows of one query, in ascending id order.
pub type FwEvents = Vec<FwEvent>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// EventRows
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Iterator over the rows of one [`FwEventReader::query`].
///
/// Each call to `next` advances the borrowed [`Cursor`] to the yielded row's
/// id before returning the row, so the cursor is always the last row the
/// caller received. Finite and not restartable.
pub struct EventRows<'c> {
    rows: std::vec::IntoIter<FwEvent>,
    cursor: &'c mut Cursor,
}

impl<'c> EventRows<'c> {
    /// Rows not yet yielded.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl<'c> Iterator for EventRows<'c> {
    type Item = FwEvent;

    fn next(&mut self) -> Option<FwEvent> {
        let fwevent = self.rows.next()?;
        self.cursor.advance(fwevent.id);

        Some(fwevent)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl<'c> ExactSizeIterator for EventRows<'c> {}

impl<'c> fmt::Debug for EventRows<'c> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EventRows")
            .field("remaining", &self.rows.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// FwEventReader
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A `FwEventReader` runs queries against the firewall store and decodes
/// the result rows into [`FwEvent`s].
///
/// Owns the single [`Connection`] for the process lifetime. Not for use
/// across threads.
///
/// [`FwEvent`s]: crate::data::fwevent::FwEvent
pub struct FwEventReader {
    /// The [`FPath`] of the store file.
    path: FPath,
    /// Read-only connection, opened by the first `query`.
    conn: Option<Connection>,
    /// Print diagnostics to stdout.
    verbose: bool,
    /// `Count` of connections opened. Never more than one.
    pub(super) connections_opened: Count,
    /// `Count` of queries executed.
    pub(super) queries: Count,
    /// `Count` of rows read and decoded.
    pub(super) rows_read: Count,
    /// Largest id read.
    pub(super) id_last_read: Option<RowId>,
}

impl fmt::Debug for FwEventReader {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("FwEventReader")
            .field("Path", &self.path)
            .field("open", &self.conn.is_some())
            .field("queries", &self.queries)
            .field("rows_read", &self.rows_read)
            .finish()
    }
}

#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct SummaryFwEventReader {
    pub fweventreader_connections_opened: Count,
    pub fweventreader_queries: Count,
    pub fweventreader_rows_read: Count,
    pub fweventreader_id_last_read: Option<RowId>,
}

/// Integer value of a column, coerced the way `sqlite3_column_int64` does.
///
/// Text is parsed for a leading integer, e.g. `"42abc"` is `42` and
/// `"n/a"` is `0`. Reals are truncated. NULL and blobs are `0`.
pub fn value_to_int(value: ValueRef) -> i64 {
    match value {
        ValueRef::Integer(v) => v,
        ValueRef::Real(f) => f as i64,
        ValueRef::Text(t) => text_to_int(t),
        ValueRef::Null | ValueRef::Blob(_) => 0,
    }
}

/// Leading optionally signed decimal integer of `text`, saturating.
fn text_to_int(text: &[u8]) -> i64 {
    let mut iter = text
        .iter()
        .copied()
        .skip_while(|b| b.is_ascii_whitespace())
        .peekable();
    let negative: bool = match iter.peek() {
        Some(&b'-') => {
            iter.next();
            true
        }
        Some(&b'+') => {
            iter.next();
            false
        }
        _ => false,
    };
    let mut value: i64 = 0;
    for b in iter.take_while(|b| b.is_ascii_digit()) {
        value = value
            .saturating_mul(10)
            .saturating_add((b - b'0') as i64);
    }

    match negative {
        true => value.saturating_neg(),
        false => value,
    }
}

/// Text value of a column, coerced the way `sqlite3_column_text` does.
///
/// Invalid UTF-8 is replaced with `U+FFFD`. NULL is empty.
pub fn value_to_text(value: ValueRef) -> String {
    match value {
        ValueRef::Text(b) | ValueRef::Blob(b) => String::from_utf8_lossy(b).into_owned(),
        ValueRef::Integer(v) => v.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Null => String::new(),
    }
}

/// Read one row of [`SELECT_FIELDS`] into a [`RawFwEvent`].
///
/// Only reading the `id` can fail on a value; every other column is coerced.
///
/// [`SELECT_FIELDS`]: crate::readers::fwquery::SELECT_FIELDS
fn row_to_raw(row: &Row) -> rusqlite::Result<RawFwEvent> {
    let int = |i: usize| -> rusqlite::Result<i64> { Ok(value_to_int(row.get_ref(i)?)) };
    let text = |i: usize| -> rusqlite::Result<String> { Ok(value_to_text(row.get_ref(i)?)) };
    let blob = |i: usize| -> rusqlite::Result<Option<Vec<u8>>> {
        Ok(match row.get_ref(i)? {
            ValueRef::Blob(b) | ValueRef::Text(b) => Some(b.to_vec()),
            ValueRef::Null | ValueRef::Integer(_) | ValueRef::Real(_) => None,
        })
    };

    Ok(RawFwEvent {
        id: row.get::<_, RowId>(col::ID)?,
        logdate: text(col::LOGDATE)?,
        path: text(col::PATH)?,
        pid: int(col::PID)?,
        protocol: int(col::PROTOCOL)?,
        direction: int(col::DIRECTION)?,
        srcport: int(col::SRCPORT)?,
        dstport: int(col::DSTPORT)?,
        action: int(col::ACTION)?,
        srcaddr: blob(col::SRCADDR)?,
        dstaddr: blob(col::DSTADDR)?,
    })
}

/// The path passed to SQLite for the store at `path`.
///
/// The bundled SQLite parses any file name starting with `file:` as a URI.
/// Such a path is made explicitly relative so it names the same file that
/// [`readable`] checked.
///
/// [`readable`]: crate::readers::storelocator::readable
pub fn store_open_path(path: &str) -> Cow<'_, str> {
    match path.starts_with("file:") {
        true => Cow::Owned(format!("./{}", path)),
        false => Cow::Borrowed(path),
    }
}

impl FwEventReader {
    /// Create a new `FwEventReader`.
    ///
    /// Does not open the store; the first `query` does.
    pub fn new(
        path: FPath,
        verbose: bool,
    ) -> FwEventReader {
        defñ!("({:?}, {:?})", path, verbose);

        FwEventReader {
            path,
            conn: None,
            verbose,
            connections_opened: 0,
            queries: 0,
            rows_read: 0,
            id_last_read: None,
        }
    }

    pub fn path(&self) -> &FPath {
        &self.path
    }

    pub const fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Open the connection if not already open.
    fn open(&mut self) -> TailResult<&Connection> {
        if self.conn.is_none() {
            def1n!("({:?})", self.path);
            v_out!(self.verbose, "Opening store connection");
            let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
            let open_path = store_open_path(&self.path);
            let conn = match Connection::open_with_flags(&*open_path, flags) {
                Ok(val) => val,
                Err(err) => {
                    def1x!("open_with_flags({:?}) error {}", self.path, err);
                    return Err(TailError::StoreOpen {
                        path: self.path.clone(),
                        source: err,
                    });
                }
            };
            self.connections_opened += 1;
            self.conn = Some(conn);
            def1x!();
        }
        match self.conn.as_ref() {
            Some(conn) => Ok(conn),
            None => Err(TailError::Internal(String::from("store connection missing after open"))),
        }
    }

    /// Run `query` and return its rows.
    ///
    /// The statement is executed and every row decoded before returning;
    /// the statement is finalized here for any row count, including zero.
    /// Iterating the returned [`EventRows`] advances `cursor`.
    pub fn query<'c>(
        &mut self,
        query: &FwQuery,
        cursor: &'c mut Cursor,
    ) -> TailResult<EventRows<'c>> {
        defn!("({})", query);
        let verbose = self.verbose;
        let sql: &'static str = query.sql;
        let conn: &Connection = self.open()?;

        v_out!(verbose, "Preparing statement");
        let mut stmt = match conn.prepare(sql) {
            Ok(val) => val,
            Err(err) => {
                defx!("prepare error {}", err);
                return Err(TailError::StorePrepare { sql, source: err });
            }
        };
        if let Some(value) = query.bind {
            if let Err(err) = stmt.raw_bind_parameter(1, value) {
                defx!("bind error {}", err);
                return Err(TailError::StoreBind { value, sql, source: err });
            }
        }

        v_out!(verbose, "Processing rows");
        let mut fwevents: FwEvents = FwEvents::new();
        {
            let mut rows = stmt.raw_query();
            loop {
                let row = match rows.next() {
                    Ok(Some(row)) => row,
                    Ok(None) => break,
                    Err(err) => {
                        defx!("step error {}", err);
                        return Err(TailError::StoreQuery { sql, source: err });
                    }
                };
                let raw = match row_to_raw(row) {
                    Ok(val) => val,
                    Err(err) => {
                        defx!("column error {}", err);
                        return Err(TailError::StoreQuery { sql, source: err });
                    }
                };
                if let Some(last) = fwevents.last() {
                    debug_assert_lt!(last.id, raw.id, "rows out of order");
                }
                fwevents.push(FwEvent::decode(raw));
            }
        }
        v_out!(verbose, "Recycling statement");
        drop(stmt);

        self.queries += 1;
        self.rows_read += fwevents.len() as Count;
        if let Some(last) = fwevents.last() {
            self.id_last_read = Some(last.id);
        }
        defx!("return {} rows", fwevents.len());

        Ok(EventRows {
            rows: fwevents.into_iter(),
            cursor,
        })
    }

    /// Close the connection, if open. Closing twice is harmless.
    pub fn close(&mut self) -> TailResult<()> {
        match self.conn.take() {
            Some(conn) => {
                defn!("({:?})", self.path);
                v_out!(self.verbose, "Closing store connection");
                let ret = conn.close().map_err(|(_conn, err)| TailError::StoreClose(err));
                defx!("{:?}", ret);
                ret
            }
            None => {
                defñ!("already closed");
                Ok(())
            }
        }
    }

    pub fn summary(&self) -> SummaryFwEventReader {
        SummaryFwEventReader {
            fweventreader_connections_opened: self.connections_opened,
            fweventreader_queries: self.queries,
            fweventreader_rows_read: self.rows_read,
            fweventreader_id_last_read: self.id_last_read,
        }
    }
}
