//! Execution tracing for the `debug` feature: printing a line per
//! activation/resolution when enabled, compiled out entirely otherwise.

#[cfg(feature = "debug")]
pub(crate) fn event(callback: &str, what: &str) {
    use anstyle::{AnsiColor, Style};
    let label = Style::new().fg_color(Some(AnsiColor::Cyan.into()));
    anstream::eprintln!("{label}{callback}{label:#}: {what}");
}

#[cfg(not(feature = "debug"))]
#[inline(always)]
pub(crate) fn event(_callback: &str, _what: &str) {}
