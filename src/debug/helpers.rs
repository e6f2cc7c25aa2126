// src/debug/helpers.rs

//! Miscellaneous helper functions for testing: temporary firewall stores.

use crate::common::{FPath, RowId};

use ::rusqlite::{params, Connection};

extern crate si_trace_print;
#[allow(unused_imports)]
use si_trace_print::{defn, defo, defx, defñ};

extern crate tempfile;

#[doc(hidden)]
pub use tempfile::NamedTempFile;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary store helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile instances default to this file name prefix.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-tail-comodo-test-";

/// Schema of the Comodo Firewall `fwevents` table, only the columns that
/// are read.
pub const FWEVENTS_SCHEMA: &str = "\
CREATE TABLE fwevents (
    id INTEGER PRIMARY KEY,
    logdate REAL,
    path TEXT,
    pid INTEGER,
    protocol INTEGER,
    direction INTEGER,
    srcaddr BLOB,
    srcport INTEGER,
    dstaddr BLOB,
    dstport INTEGER,
    action INTEGER
)";

/// Small helper function for copying `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    FPath::from(ntf.path().to_str().unwrap())
}

/// Address blob as the firewall stores it; the first four bytes are noise.
pub fn addr_blob(o: [u8; 4]) -> Vec<u8> {
    vec![0xAA, 0xBB, 0xCC, 0xDD, o[0], o[1], o[2], o[3]]
}

/// One row to insert into a temporary store.
#[derive(Clone, Debug)]
pub struct TestRow {
    pub id: RowId,
    /// `logdate` as a string accepted by SQLite `datetime()`
    pub logdate: &'static str,
    pub path: &'static str,
    pub pid: i64,
    pub protocol: i64,
    pub direction: i64,
    pub srcaddr: Option<Vec<u8>>,
    pub srcport: i64,
    pub dstaddr: Option<Vec<u8>>,
    pub dstport: i64,
    pub action: i64,
}

impl TestRow {
    /// A plausible outbound TCP connection that was asked about.
    pub fn new(id: RowId) -> TestRow {
        TestRow {
            id,
            logdate: "2013-04-01 12:00:00",
            path: "C:\\Program Files\\app\\app.exe",
            pid: 1000 + id,
            protocol: 6,
            direction: 1,
            srcaddr: Some(addr_blob([192, 168, 1, 10])),
            srcport: 50000,
            dstaddr: Some(addr_blob([10, 0, 0, 1])),
            dstport: 443,
            action: 8,
        }
    }
}

/// Insert `rows` into the `fwevents` table of the store at `path`.
pub fn insert_rows(path: &FPath, rows: &[TestRow]) {
    defn!("({:?}, {} rows)", path, rows.len());
    let conn = match Connection::open(path) {
        Ok(val) => val,
        Err(err) => {
            panic!("Connection::open({:?}) return Err {}", path, err);
        }
    };
    for row in rows.iter() {
        match conn.execute(
            "INSERT INTO fwevents (id, logdate, path, pid, protocol, direction, srcaddr, srcport, dstaddr, dstport, action) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                row.id,
                row.logdate,
                row.path,
                row.pid,
                row.protocol,
                row.direction,
                row.srcaddr,
                row.srcport,
                row.dstaddr,
                row.dstport,
                row.action,
            ],
        ) {
            Ok(_) => {}
            Err(err) => {
                panic!("INSERT id {} return Err {}", row.id, err);
            }
        }
    }
    defx!();
}

/// Testing helper function to create a temporary store file with an empty
/// `fwevents` table.
pub fn create_temp_store() -> NamedTempFile {
    let ntf = match tempfile::Builder::new()
        // use known prefix for easier cleanup
        .prefix(STR_TEMPFILE_PREFIX)
        .suffix(".sdb")
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("NamedTempFile::new() return Err {}", err);
        }
    };
    let fpath = ntf_fpath(&ntf);
    let conn = match Connection::open(&fpath) {
        Ok(val) => val,
        Err(err) => {
            panic!("Connection::open({:?}) return Err {}", fpath, err);
        }
    };
    if let Err(err) = conn.execute_batch(FWEVENTS_SCHEMA) {
        panic!("CREATE TABLE return Err {}", err);
    }

    ntf
}

/// Testing helper function to create a temporary store holding rows with
/// the given ids, inserted in the order given.
pub fn create_temp_store_ids(ids: &[RowId]) -> NamedTempFile {
    let ntf = create_temp_store();
    let rows: Vec<TestRow> = ids.iter().map(|id| TestRow::new(*id)).collect();
    insert_rows(&ntf_fpath(&ntf), &rows);

    ntf
}
