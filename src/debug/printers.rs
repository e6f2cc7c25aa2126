// src/debug/printers.rs

//! User-facing and debug printer macros.
//!
//! Errors and warnings go to stderr. Verbose diagnostics go to stdout.

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `d`ebug `e`println! an `err`or
#[macro_export]
macro_rules! de_err {
    (
        $($args:tt)*
    ) => {
        {
            #[cfg(any(debug_assertions,test))]
            eprint!("ERROR: ");
            #[cfg(any(debug_assertions,test))]
            eprintln!($($args)*)
        }
    }
}
pub use de_err;

/// `d`ebug `e`println! an `warn`ing
#[macro_export]
macro_rules! de_wrn {
    (
        $($args:tt)*
    ) => {
        {
            #[cfg(any(debug_assertions,test))]
            eprint!("WARNING: ");
            #[cfg(any(debug_assertions,test))]
            eprintln!($($args)*)
        }
    }
}
pub use de_wrn;

/// `e`println! an `err`or
#[macro_export]
macro_rules! e_err {
    (
        $($args:tt)*
    ) => {
        {
            eprint!("ERROR: ");
            eprintln!($($args)*)
        }
    }
}
pub use e_err;

/// `e`println! a `warn`ing
#[macro_export]
macro_rules! e_wrn {
    (
        $($args:tt)*
    ) => {
        {
            eprint!("WARNING: ");
            eprintln!($($args)*)
        }
    }
}
pub use e_wrn;

/// Write one line to `out`.
///
/// Used by [`v_out!`]. The caller decides what to do with a failed write;
/// `v_out!` ignores it, so a closed stdout is reported by the next printed
/// event instead of a panic.
pub fn write_line<W: std::io::Write>(
    out: &mut W,
    args: std::fmt::Arguments,
) -> std::io::Result<()> {
    writeln!(out, "{}", args)
}

/// `v`erbose line to stdout, only if the first argument is `true`.
///
/// For the `-v` option. Unlike `println!` this never panics on a closed
/// stdout.
#[macro_export]
macro_rules! v_out {
    (
        $verbose:expr, $($args:tt)*
    ) => {
        {
            if $verbose {
                let _ = $crate::debug::printers::write_line(
                    &mut ::std::io::stdout(),
                    format_args!($($args)*),
                );
            }
        }
    }
}
pub use v_out;
