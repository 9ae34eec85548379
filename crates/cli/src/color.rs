// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use dash_core::{AlertVariant, StepGlyph};
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Muted / secondary text: darker grey
    pub const MUTED: u8 = 240;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Same rules as [`should_colorize`], for text written to stderr.
pub fn should_colorize_stderr() -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    std::io::stderr().is_terminal()
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

pub(crate) fn apply_header(text: &str) -> String {
    format!("{}{}{}", fg256(codes::HEADER), text, RESET)
}

/// Format text with the context color (medium grey).
pub fn context(text: &str) -> String {
    if should_colorize() {
        format!("{}{}{}", fg256(codes::CONTEXT), text, RESET)
    } else {
        text.to_string()
    }
}

pub(crate) fn apply_muted(text: &str) -> String {
    format!("{}{}{}", fg256(codes::MUTED), text, RESET)
}

/// Colorize a workspace status by meaning.
///
/// - Green: running
/// - Yellow: starting, stopping, stopped, paused
/// - Red: error
/// - Default (no color): anything else
pub fn status(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }
    apply_status(text)
}

pub(crate) fn apply_status(text: &str) -> String {
    let lower = text.trim_start().to_lowercase();
    let first_word = lower
        .split(|c: char| !c.is_alphabetic())
        .next()
        .unwrap_or("");
    let code = match first_word {
        "running" | "done" => GREEN,
        "starting" | "stopping" | "stopped" | "paused" => YELLOW,
        "error" | "failed" => RED,
        _ => return text.to_string(),
    };
    format!("{code}{text}{RESET}")
}

/// Step glyph, colored by progress.
pub fn glyph(glyph: StepGlyph, colorize: bool) -> String {
    let text = glyph.to_string();
    if !colorize {
        return text;
    }
    let code = match glyph {
        StepGlyph::Done => GREEN,
        StepGlyph::InProgress => YELLOW,
        StepGlyph::Failed => RED,
        StepGlyph::Pending => return text,
    };
    format!("{code}{text}{RESET}")
}

/// Alert label, colored by severity.
pub fn alert(variant: AlertVariant, colorize: bool) -> String {
    let text = variant.to_string();
    if !colorize {
        return text;
    }
    let code = match variant {
        AlertVariant::Success => GREEN,
        AlertVariant::Info => return fg256(codes::CONTEXT) + &text + RESET,
        AlertVariant::Warning => YELLOW,
        AlertVariant::Danger => RED,
    };
    format!("{code}{text}{RESET}")
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
