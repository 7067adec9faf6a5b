//! Console output: styled progress lines and profile tables.
//!
//! Progress goes to stdout, one line per completed step. Good steps are
//! green, informational ones magenta; fatal errors are rendered by miette
//! on stderr.

use std::io::{self, IsTerminal, Write};

use owo_colors::{OwoColorize, Style};
use tabled::{Table, Tabled, settings::Style as TableStyle};

use meraki_rma_core::{Progress, RmaEvent, Tone};

use crate::cli::ColorMode;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Good => Style::new().green(),
        Tone::Info => Style::new().magenta(),
    }
}

/// Bold red line on stderr announcing that a run stopped.
pub fn print_failure(message: &str, color: bool) {
    let mut stderr = io::stderr().lock();
    if color {
        let _ = writeln!(stderr, "{}", message.red().bold());
    } else {
        let _ = writeln!(stderr, "{message}");
    }
}

// ── Progress sink ────────────────────────────────────────────────────

/// Prints each workflow event as a styled line on stdout.
pub struct ConsoleProgress {
    color: bool,
}

impl ConsoleProgress {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn render(&self, event: &RmaEvent) -> String {
        let line = event.to_string();
        if self.color {
            line.style(tone_style(event.tone())).to_string()
        } else {
            line
        }
    }
}

impl Progress for ConsoleProgress {
    fn report(&self, event: RmaEvent) {
        tracing::debug!(?event, "step completed");
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", self.render(&event));
    }
}

// ── Tables ───────────────────────────────────────────────────────────

pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(TableStyle::rounded()).to_string()
}
