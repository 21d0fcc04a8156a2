//! Terminal rendering of advisor turns.
//!
//! `TerminalRenderer` is the [`TurnSink`] the chat loop hands to the turn
//! engine. It owns the analysis spinner and the word-by-word presentation:
//! partial frames are printed as plain deltas with a trailing cursor glyph
//! and a fixed per-frame delay, and the completed frame repaints the block
//! with signal highlighting applied.

use std::io::Write;
use std::time::Duration;

use console::style;
use crossterm::cursor::MoveToPreviousLine;
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};
use indicatif::{ProgressBar, ProgressStyle};

use marketeer_core::advisor::turn::TurnSink;
use marketeer_types::error::TurnError;

/// Delay after each streamed frame. This, not the engine, sets the
/// typewriter cadence.
const FRAME_DELAY: Duration = Duration::from_millis(30);

/// Cursor glyph shown at the end of the partial text while streaming.
const CURSOR_GLYPH: &str = "\u{258c}";

/// Terminal width assumed when the real width cannot be queried.
const FALLBACK_COLUMNS: usize = 80;

/// Streams advisor turns to the terminal.
pub struct TerminalRenderer {
    spinner: Option<ProgressBar>,
    printed: usize,
    // Visual cursor model for the in-place repaint: rows below the label
    // line (logical newlines plus soft wraps), current column, and the
    // terminal width sampled at turn start.
    rows: usize,
    column: usize,
    columns: usize,
    glyph_shown: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            spinner: None,
            printed: 0,
            rows: 0,
            column: 0,
            columns: FALLBACK_COLUMNS,
            glyph_shown: false,
        }
    }

    /// Show the analysis spinner. It is torn down by the first streamed
    /// frame, or by the failure callback if no frame ever arrives.
    pub fn begin_turn(&mut self) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message("📊 Analyzing market data...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
        self.printed = 0;
        self.rows = 0;
        self.column = 0;
        self.columns = terminal::size()
            .map(|(width, _)| width.max(1) as usize)
            .unwrap_or(FALLBACK_COLUMNS);
        self.glyph_shown = false;
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Erase the cursor glyph sitting immediately before the cursor.
    fn erase_glyph(&mut self) {
        if self.glyph_shown {
            print!("\u{0008} \u{0008}");
            self.glyph_shown = false;
        }
    }

    /// Advance the visual cursor model by `text`, assuming one column per
    /// char. Soft-wrapped rows count toward the repaint distance.
    fn track(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.rows = self.rows.saturating_add(1);
                self.column = 0;
            } else {
                if self.column >= self.columns {
                    self.rows = self.rows.saturating_add(1);
                    self.column = 0;
                }
                self.column += 1;
            }
        }
    }

    /// Print the dim stats footer after a completed turn.
    ///
    /// Format: `| {elapsed}s . {model}` plus the attempt count when the
    /// turn needed more than one provider call.
    pub fn print_turn_footer(&self, elapsed: Duration, model: &str, attempts: u32) {
        let seconds = elapsed.as_secs_f64();
        let mut footer = format!("| {seconds:.1}s \u{00b7} {model}");
        if attempts > 1 {
            footer.push_str(&format!(" \u{00b7} {attempts} attempts"));
        }
        println!("  {}", style(footer).dim());
        println!();
    }

    fn print_advisor_label(&mut self) {
        let label = format!("  {} ", style("Advisor >").cyan().bold());
        self.column = console::measure_text_width(&label);
        print!("{label}");
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnSink for TerminalRenderer {
    async fn partial(&mut self, text: &str) {
        if self.printed == 0 {
            self.clear_spinner();
            println!();
            self.print_advisor_label();
        } else {
            self.erase_glyph();
        }

        // Frames are cumulative; print only the new suffix.
        let delta = &text[self.printed..];
        self.printed = text.len();
        self.track(delta);
        print!("{delta}");
        // No glyph on a full line: a soft-wrapped glyph would leave the
        // real cursor one row below the model.
        if self.column < self.columns {
            print!("{CURSOR_GLYPH}");
            self.glyph_shown = true;
        }
        let _ = std::io::stdout().flush();
        tokio::time::sleep(FRAME_DELAY).await;
    }

    async fn completed(&mut self, text: &str) {
        if self.printed > 0 {
            // Replace the plain partial block with the highlighted text.
            // The last frame always ends in a newline, so the cursor sits
            // on the line below the block.
            self.erase_glyph();
            let rows = u16::try_from(self.rows).unwrap_or(u16::MAX);
            let mut stdout = std::io::stdout();
            let _ = execute!(
                stdout,
                MoveToPreviousLine(rows),
                Clear(ClearType::FromCursorDown)
            );
        } else {
            self.clear_spinner();
            println!();
        }
        self.print_advisor_label();
        // The text is newline-terminated; the loop prints the footer next.
        print!("{text}");
        let _ = std::io::stdout().flush();
    }

    async fn failed(&mut self, error: &TurnError, placeholder: &str) {
        self.clear_spinner();
        println!();
        match error {
            TurnError::Transport(detail) => {
                println!(
                    "  {}",
                    style(format!("🌐 Market Data Connection Error: {detail}"))
                        .red()
                        .bold()
                );
                println!("  {}", style(placeholder).dim());
            }
            TurnError::Unexpected(detail) => {
                println!(
                    "  {}",
                    style(format!("❌ Portfolio Analysis Failed: {detail}"))
                        .red()
                        .bold()
                );
                println!("  {}", style(placeholder).dim());
            }
            TurnError::MissingCredential => {
                // The placeholder carries its own headline and setup steps.
                let mut lines = placeholder.lines();
                if let Some(first) = lines.next() {
                    println!("  🔑 {}", style(first).red().bold());
                }
                for line in lines {
                    println!("  {}", style(line).dim());
                }
            }
            TurnError::DecodeExhausted { .. } => {
                let mut lines = placeholder.lines();
                if let Some(first) = lines.next() {
                    println!("  ⚠️ {}", style(first).yellow().bold());
                }
                for line in lines {
                    println!("  {}", style(line).dim());
                }
            }
        }
        println!();
    }
}
