// src/printer/summary.rs

//! Print the `--summary` of a run to stderr.

use std::io::{Result, Write};

use crate::common::RowId;
use crate::printer::printers::{print_colored_stderr, Color, ColorChoice};
use crate::readers::summary::Summary;

/// Indentation of `--summary` entries.
pub const OPT_SUMMARY_PRINT_INDENT1: &str = "  ";

fn rowid_opt_to_string(id: &Option<RowId>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => String::from("unset"),
    }
}

/// Write the summary text of `summary` to `out`.
pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &Summary,
) -> Result<()> {
    let i1 = OPT_SUMMARY_PRINT_INDENT1;
    let r = &summary.fweventreader;
    let p = &summary.fwlogprocessor;
    writeln!(out, "Store: {:?}", summary.path)?;
    writeln!(out, "{}Mode            : {}", i1, summary.mode)?;
    writeln!(out, "{}Connections     : {}", i1, r.fweventreader_connections_opened)?;
    writeln!(out, "{}Queries         : {}", i1, r.fweventreader_queries)?;
    writeln!(out, "{}Rows read       : {}", i1, r.fweventreader_rows_read)?;
    writeln!(out, "{}Last id read    : {}", i1, rowid_opt_to_string(&r.fweventreader_id_last_read))?;
    writeln!(out, "{}Polls           : {} ({} empty)", i1, p.fwlogprocessor_polls, p.fwlogprocessor_polls_empty)?;
    writeln!(out, "{}Sleeps          : {}", i1, p.fwlogprocessor_sleeps)?;
    writeln!(out, "{}Rows printed    : {}", i1, p.fwlogprocessor_rows_emitted)?;
    writeln!(out, "{}Cursor          : {}", i1, p.fwlogprocessor_cursor)?;

    Ok(())
}

/// Print `summary` to stderr.
pub fn print_summary(
    summary: &Summary,
    color_choice: ColorChoice,
) -> Result<()> {
    let mut buffer: Vec<u8> = Vec::with_capacity(512);
    write_summary(&mut buffer, summary)?;

    print_colored_stderr(Color::White, color_choice, &buffer)
}
