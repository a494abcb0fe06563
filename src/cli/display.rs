// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the derivate CLI.
//!
//! OneDark colors on dark terminals, One Light on light ones. `DERIVATE_THEME`
//! ("dark" or "light") wins over the `COLORFGBG` hint; the default is dark.
//! `NO_COLOR` and non-TTY output turn colors off entirely.

use std::io::IsTerminal;
use std::sync::OnceLock;

use derivate::{DerivateGroup, DictionarySummary, WordClass};

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("DERIVATE_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": background colors 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

mod onedark {
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221); // #c678dd
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
}

mod onelight {
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164); // #a626a4
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            match theme() {
                Theme::Dark => rgb(onedark::$name),
                Theme::Light => rgb(onelight::$name),
            }
        }
    };
}

theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, ignoring ANSI escapes
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) {
    let border = themed(GRAY, &[], "│");
    println!("{}{}{}", border, pad_right(content, BOX_WIDTH), border);
}

fn labelled_rule(left: &str, right: &str, label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        themed(GRAY, &[], left),
        label_part,
        themed(GRAY, &[], &format!("{}{}", "─".repeat(remaining), right))
    );
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    labelled_rule("┌", "┐", label);
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    labelled_rule("├", "┤", label);
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}", themed(GRAY, &[], &format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

/// │ key            value │
pub fn field(key: &str, value: &str) {
    row(&format!(" {} {}", pad_right(&themed(GRAY, &[], key), 20), value));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Short part-of-speech label for a word class
pub fn class_label(class: WordClass) -> String {
    let names = class.names();
    if names.is_empty() {
        return themed(GRAY, &[], "-");
    }
    let color = if class.is_adjective() {
        GREEN
    } else if class.is_noun() {
        BLUE
    } else if class.is_verb() {
        MAGENTA
    } else {
        GRAY
    };
    themed(color, &[], &names.join(","))
}

/// `[gen]` / `[dummy]` markers for a group
pub fn group_badges(group: &DerivateGroup) -> String {
    let mut badges = Vec::new();
    if group.is_generated {
        badges.push(themed(YELLOW, &[], "[gen]"));
    }
    if group.is_dummy {
        badges.push(themed(GRAY, &[], "[dummy]"));
    }
    if group.not_generate {
        badges.push(themed(GRAY, &[], "[no-gen]"));
    }
    badges.join(" ")
}

pub fn print_summary(path: &str, raw_len: usize, compression: &str, summary: &DictionarySummary) {
    section_top("RESOURCE");
    field("file", path);
    field("container", &format!("{} ({})", compression, format_size(raw_len)));
    field("body", &format_size(summary.buffer_bytes));
    section_mid("GROUPS");
    field("groups", &summary.groups.to_string());
    field("pending", &summary.pending_groups.to_string());
    section_mid("TRIE");
    field("nodes", &summary.materialized_nodes.to_string());
    field("terminal nodes", &summary.terminal_nodes.to_string());
    field("pending nodes", &summary.pending_nodes.to_string());
    field("max depth", &summary.max_depth.to_string());
    section_bot();
}

/// One block per looked-up word.
pub fn print_groups(word: &str, groups: Option<&[std::sync::Arc<DerivateGroup>]>) {
    section_top(word);
    match groups {
        None => row(&format!(" {}", themed(GRAY, &[], "no derivates"))),
        Some(groups) => {
            for group in groups {
                let prefix = group
                    .prefix
                    .as_deref()
                    .map(|p| format!(" prefix {}", p))
                    .unwrap_or_default();
                row(&format!(
                    " {} {} {}{}",
                    themed(CYAN, &[BOLD], &format!("#{}", group.id)),
                    group.lang,
                    group_badges(group),
                    prefix
                ));
                for word in &group.words {
                    row(&format!(
                        "    {} {}",
                        pad_right(&word.spelling, 24),
                        class_label(word.class)
                    ));
                }
            }
        }
    }
    section_bot();
}
