// src/tests/fwquery_tests.rs

//! tests for `fwquery.rs`

#![allow(non_snake_case)]

use crate::common::{RowCount, RunMode};
use crate::data::cursor::Cursor;
use crate::readers::fwquery::{FwQuery, SQL_AFTER_ID, SQL_ALL, SQL_LAST_N};

use ::test_case::test_case;

fn cursor_at(id: Option<i64>) -> Cursor {
    let mut cursor = Cursor::new();
    if let Some(id) = id {
        cursor.advance(id);
    }

    cursor
}

#[test_case(RunMode::ShowAll, 10, None, SQL_ALL, None)]
#[test_case(RunMode::ShowAll, 10, Some(5), SQL_ALL, None; "all ignores cursor")]
#[test_case(RunMode::ShowLastN, 10, None, SQL_LAST_N, Some(10))]
#[test_case(RunMode::ShowLastN, 999, None, SQL_LAST_N, Some(999))]
#[test_case(RunMode::Follow, 10, None, SQL_LAST_N, Some(10); "follow first poll")]
#[test_case(RunMode::Follow, 10, Some(42), SQL_AFTER_ID, Some(42); "follow later poll")]
#[test_case(RunMode::Follow, 10, Some(0), SQL_AFTER_ID, Some(0); "follow cursor zero is bound")]
fn test_FwQuery_build(
    mode: RunMode,
    window: RowCount,
    cursor: Option<i64>,
    sql: &str,
    bind: Option<i64>,
) {
    let query = FwQuery::build(mode, window, &cursor_at(cursor));
    assert_eq!(query.sql, sql);
    assert_eq!(query.bind, bind);
}

#[test]
fn test_sql_ordering() {
    assert!(SQL_ALL.ends_with("ORDER BY id ASC"), "{}", SQL_ALL);
    assert!(SQL_LAST_N.contains("ORDER BY id DESC LIMIT ?"), "{}", SQL_LAST_N);
    assert!(SQL_LAST_N.ends_with("ORDER BY id ASC"), "{}", SQL_LAST_N);
    assert!(SQL_AFTER_ID.contains("WHERE id > ?"), "{}", SQL_AFTER_ID);
    assert!(SQL_AFTER_ID.ends_with("ORDER BY id ASC"), "{}", SQL_AFTER_ID);
}

#[test]
fn test_FwQuery_display() {
    assert_eq!(FwQuery::all().to_string(), SQL_ALL);
    assert_eq!(FwQuery::last_n(3).to_string(), format!("{} [3]", SQL_LAST_N));
}
