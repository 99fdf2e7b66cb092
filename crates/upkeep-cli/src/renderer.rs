//! Terminal rendering for markdown and JSON output
//!
//! Markdown from the core display types is rendered with termimad, or printed
//! verbatim when colors are disabled.

use anyhow::{Context, Result};
use serde::Serialize;
use termimad::{crossterm::style::Color, MadSkin};

const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Renders core output either through termimad or as plain text
pub struct TerminalRenderer {
    color: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(color: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_fg(Color::DarkGrey);

        Self { color, skin }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.color {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match line_color(line) {
                // Headers and ticked items keep their markers so ids stay copyable
                Some(color) => println!("{color}{line}{RESET}"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }

    /// Print a value as pretty JSON
    pub fn render_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{json}");
        Ok(())
    }
}

fn line_color(line: &str) -> Option<&'static str> {
    if line.starts_with('#') {
        Some(BLUE)
    } else if line.trim_start().starts_with("- [x]") {
        Some(GREEN)
    } else if line.ends_with("(overdue)") {
        Some(RED)
    } else {
        None
    }
}
