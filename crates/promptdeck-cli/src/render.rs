//! Terminal presentation layer
//!
//! Subscribes to store changes and prints the prompt list along with the
//! category and group option lists.

use chrono::{DateTime, Utc};
use colored::Colorize;
use std::fmt::Write;

use promptdeck::{ChangeListener, Prompt, StoreSnapshot};

/// Prints the panel to stdout on every change
pub struct TerminalRenderer {
    preview_chars: usize,
}

impl TerminalRenderer {
    pub fn new(preview_chars: usize) -> Self {
        Self { preview_chars }
    }
}

impl ChangeListener for TerminalRenderer {
    fn prompts_changed(&self, snapshot: &StoreSnapshot) {
        print!("{}", render_panel(snapshot, Utc::now(), self.preview_chars));
    }
}

/// Render the whole panel as text
pub fn render_panel(snapshot: &StoreSnapshot, now: DateTime<Utc>, preview_chars: usize) -> String {
    let mut out = String::new();

    if snapshot.visible.is_empty() {
        if snapshot.total == 0 {
            let _ = writeln!(out, "No prompts yet.");
            let _ = writeln!(out, "\n{}", "Add one with:".dimmed());
            let _ = writeln!(out, "  promptdeck add <title> -c <content>");
        } else {
            let _ = writeln!(out, "No prompts match the current filter.");
        }
    } else {
        let _ = writeln!(
            out,
            "{} ({} of {}):",
            "Prompts".bold(),
            snapshot.visible.len().to_string().green(),
            snapshot.total
        );
        for prompt in &snapshot.visible {
            out.push_str(&render_prompt(prompt, now, preview_chars));
        }
    }

    let filter = &snapshot.filter;
    if !filter.is_empty() {
        let mut active = Vec::new();
        if !filter.search.is_empty() {
            active.push(format!("search={:?}", filter.search));
        }
        if !filter.category.is_empty() {
            active.push(format!("category={}", filter.category));
        }
        if !filter.group.is_empty() {
            active.push(format!("group={}", filter.group));
        }
        let _ = writeln!(out, "\n{} {}", "Filter:".dimmed(), active.join(" "));
    }

    let _ = writeln!(out, "\n{} {}", "Categories:".dimmed(), option_list(&snapshot.categories));
    let _ = writeln!(out, "{} {}", "Groups:".dimmed(), option_list(&snapshot.groups));

    out
}

fn render_prompt(prompt: &Prompt, now: DateTime<Utc>, preview_chars: usize) -> String {
    let short_id = prompt.id.to_string()[..8].to_string();
    let groups = if prompt.groups.is_empty() {
        String::new()
    } else {
        format!(" #{}", prompt.groups.join(" #"))
    };

    format!(
        "  {} {} [{}]{} {}\n    {}\n",
        short_id.dimmed(),
        prompt.title.cyan().bold(),
        prompt.category.yellow(),
        groups.blue(),
        format_relative(prompt.updated_at, now).dimmed(),
        truncate_string(&single_line(&prompt.content), preview_chars)
    )
}

fn option_list(options: &[String]) -> String {
    if options.is_empty() {
        "-".to_string()
    } else {
        options.join(", ")
    }
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Human-friendly age of a timestamp
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    match secs {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s if s < 7 * 86_400 => format!("{}d ago", s / 86_400),
        _ => then.format("%Y-%m-%d").to_string(),
    }
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}
