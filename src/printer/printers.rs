// src/printer/printers.rs

//! Specialized printer struct [`PrinterFwEvent`] and helper functions
//! for printing [`FwEvent`s].
//!
//! One line per event:
//!
//! ```text
//! 2013-04-01 12:00:00 Asked   OUT TCP     192.168.1.10 50000 ->        10.0.0.1 443    1001 C:\app.exe
//! ```
//!
//! [`FwEvent`s]: crate::data::fwevent::FwEvent

use std::fmt::Display;
use std::io::{Result, Write};

use ::chrono::{Local, NaiveDateTime, TimeZone, Utc};
#[doc(hidden)]
pub use ::termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::data::fwevent::{Action, FwEvent};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// globals and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`Color`] for printing some user-facing error messages.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_ERROR: Color = Color::Red;

/// [`Color`] of the action column of a blocked event.
pub const COLOR_BLOCKED: Color = Color::Red;

/// [`Color`] of the action column of an asked event.
pub const COLOR_ASKED: Color = Color::Yellow;

/// `strftime` format of `datetime(logdate)`.
pub const LOGDATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Convert a UTC `logdate` string (`YYYY-MM-DD HH:MM:SS`) into the
/// timezone `tz`. Returns `None` if `logdate` does not parse.
pub fn logdate_to_tz<Tz>(
    logdate: &str,
    tz: &Tz,
) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let naive = NaiveDateTime::parse_from_str(logdate, LOGDATE_FORMAT).ok()?;
    let dt = Utc.from_utc_datetime(&naive).with_timezone(tz);

    Some(dt.format(LOGDATE_FORMAT).to_string())
}

/// The text following the action column.
pub fn fwevent_tail_to_string(fwevent: &FwEvent) -> String {
    format!(
        "{:<3} {:<4} {:>15} {:<5} -> {:>15} {:<5} {:>5} {}",
        fwevent.direction,
        fwevent.protocol,
        fwevent.srcaddr_string(),
        fwevent.srcport,
        fwevent.dstaddr_string(),
        fwevent.dstport,
        fwevent.pid,
        fwevent.path,
    )
}

/// The complete printed line of `fwevent`, without trailing newline and
/// without color.
pub fn fwevent_to_string(
    fwevent: &FwEvent,
    logdate: &str,
) -> String {
    format!("{} {:<7} {}", logdate, fwevent.action, fwevent_tail_to_string(fwevent))
}

/// The action column color, if any.
pub const fn action_color(action: &Action) -> Option<Color> {
    match action {
        Action::Blocked => Some(COLOR_BLOCKED),
        Action::Asked => Some(COLOR_ASKED),
        Action::Unknown => None,
    }
}

/// Print colored output to terminal on stderr.
pub fn print_colored_stderr(
    color: Color,
    color_choice: ColorChoice,
    value: &[u8],
) -> Result<()> {
    let mut stderr = StandardStream::stderr(color_choice);
    stderr.set_color(ColorSpec::new().set_fg(Some(color)))?;
    stderr.write_all(value)?;
    stderr.reset()?;

    stderr.flush()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PrinterFwEvent
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A printer specialized for [`FwEvent`s].
///
/// [`FwEvent`s]: crate::data::fwevent::FwEvent
pub struct PrinterFwEvent<W: WriteColor> {
    /// where lines are written, usually stdout
    out: W,
    /// should the action column be colored?
    do_color: bool,
    /// convert `logdate` from UTC to the local system timezone?
    local_time: bool,
}

impl PrinterFwEvent<StandardStream> {
    /// A `PrinterFwEvent` writing to stdout.
    pub fn new_stdout(
        color_choice: ColorChoice,
        local_time: bool,
    ) -> PrinterFwEvent<StandardStream> {
        PrinterFwEvent::new(StandardStream::stdout(color_choice), color_choice, local_time)
    }
}

impl<W: WriteColor> PrinterFwEvent<W> {
    pub fn new(
        out: W,
        color_choice: ColorChoice,
        local_time: bool,
    ) -> PrinterFwEvent<W> {
        let do_color: bool = match color_choice {
            ColorChoice::Never => false,
            ColorChoice::Always | ColorChoice::AlwaysAnsi | ColorChoice::Auto => out.supports_color(),
        };

        PrinterFwEvent {
            out,
            do_color,
            local_time,
        }
    }

    /// The displayed timestamp of `fwevent`.
    fn logdate(
        &self,
        fwevent: &FwEvent,
    ) -> String {
        if self.local_time {
            if let Some(s) = logdate_to_tz(&fwevent.logdate, &Local) {
                return s;
            }
        }

        fwevent.logdate.clone()
    }

    /// Print one line for `fwevent`. Flushes so that lines appear
    /// immediately when following.
    pub fn print_fwevent(
        &mut self,
        fwevent: &FwEvent,
    ) -> Result<()> {
        let logdate: String = self.logdate(fwevent);
        write!(self.out, "{} ", logdate)?;
        match (self.do_color, action_color(&fwevent.action)) {
            (true, Some(color)) => {
                self.out.set_color(ColorSpec::new().set_fg(Some(color)))?;
                write!(self.out, "{:<7}", fwevent.action)?;
                self.out.reset()?;
            }
            _ => {
                write!(self.out, "{:<7}", fwevent.action)?;
            }
        }
        writeln!(self.out, " {}", fwevent_tail_to_string(fwevent))?;

        self.out.flush()
    }

    /// Consume the printer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
