// tests/tail_tests.rs
//
// tests of the public `tclib` API against a temporary store

#![allow(non_snake_case)]

extern crate tclib;

use std::io;
use std::time::Duration;

use ::rusqlite::{params, Connection};
use ::tempfile::NamedTempFile;
use ::termcolor::Buffer;

use tclib::common::{FPath, RowId, RunMode, ENV_VAR_FWDB};
use tclib::data::fwevent::FwEvent;
use tclib::printer::printers::{ColorChoice, PrinterFwEvent};
use tclib::readers::fweventreader::FwEventReader;
use tclib::readers::fwlogprocessor::{cancel_channel, FwLogProcessor, TailConfig};
use tclib::readers::storelocator::locate_store_with;

const SCHEMA: &str = "\
CREATE TABLE fwevents (
    id INTEGER PRIMARY KEY, logdate REAL, path TEXT, pid INTEGER,
    protocol INTEGER, direction INTEGER, srcaddr BLOB, srcport INTEGER,
    dstaddr BLOB, dstport INTEGER, action INTEGER
)";

fn store_with_ids(ids: &[RowId]) -> (NamedTempFile, FPath) {
    let ntf = tempfile::Builder::new()
        .prefix("tmp-tail-comodo-itest-")
        .suffix(".sdb")
        .tempfile()
        .unwrap();
    let path = FPath::from(ntf.path().to_str().unwrap());
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    for id in ids.iter() {
        let action: i64 = if id % 2 == 0 { 2 } else { 8 };
        conn.execute(
            "INSERT INTO fwevents VALUES (?1, julianday('2013-04-01 12:00:00'), ?2, ?3, 17, 0, ?4, 53, ?5, 5353, ?6)",
            params![
                id,
                "C:\\svchost.exe",
                4 + id,
                vec![0u8, 0, 0, 0, 10, 0, 0, *id as u8],
                vec![0u8, 0, 0, 0, 224, 0, 0, 251],
                action,
            ],
        )
        .unwrap();
    }

    (ntf, path)
}

fn run_to_lines(
    path: &FPath,
    mode: RunMode,
    window: u32,
) -> Vec<String> {
    let (send, recv) = cancel_channel();
    let config = TailConfig {
        mode,
        window,
        interval: Duration::from_millis(10),
        verbose: false,
    };
    let mut processor = FwLogProcessor::new(config, FwEventReader::new(path.clone(), false), recv);
    let mut printer = PrinterFwEvent::new(Buffer::no_color(), ColorChoice::Never, false);
    if mode == RunMode::Follow {
        send.send(()).unwrap();
    }
    {
        let mut sink = |fwevent: &FwEvent| -> io::Result<()> { printer.print_fwevent(fwevent) };
        processor.run(&mut sink).unwrap();
    }
    let out = String::from_utf8(printer.into_inner().into_inner()).unwrap();

    out.lines().map(String::from).collect()
}

#[test]
fn test_show_last_n_lines() {
    let (_ntf, path) = store_with_ids(&[1, 2, 3, 4, 5]);
    let lines = run_to_lines(&path, RunMode::ShowLastN, 2);
    assert_eq!(
        lines,
        vec![
            "2013-04-01 12:00:00 Blocked IN  UDP         10.0.0.4 53    ->     224.0.0.251 5353      8 C:\\svchost.exe",
            "2013-04-01 12:00:00 Asked   IN  UDP         10.0.0.5 53    ->     224.0.0.251 5353      9 C:\\svchost.exe",
        ]
    );
}

#[test]
fn test_show_all_lines() {
    let (_ntf, path) = store_with_ids(&[3, 1, 2]);
    let lines = run_to_lines(&path, RunMode::ShowAll, 1);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(" 10.0.0.1 "), "{}", lines[0]);
    assert!(lines[1].starts_with("2013-04-01 12:00:00 Blocked IN  UDP"), "{}", lines[1]);
    assert!(lines[2].contains(" 10.0.0.3 "), "{}", lines[2]);
}

#[test]
fn test_follow_cancelled() {
    let (_ntf, path) = store_with_ids(&[1, 2, 3]);
    let lines = run_to_lines(&path, RunMode::Follow, 10);
    assert_eq!(lines.len(), 1);
}

#[test]
fn test_locate_store_override() {
    let (_ntf, path) = store_with_ids(&[]);
    let found = locate_store_with(|name| match name {
        ENV_VAR_FWDB => Some(path.clone()),
        _ => None,
    })
    .unwrap();
    assert_eq!(found, path);
}
