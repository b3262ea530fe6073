//! Plain-text help rendering. Pure string building, so re-rendering the
//! same state twice is byte-identical.

use std::fmt::Write;

use itertools::Itertools;

use crate::registry::Registry;
use crate::signature::BoundArgs;
use crate::value::Value;

const DOC_FRAME: &str = "----------------------------------------";

/// The global listing: optional banner, optional error line, then commands
/// grouped by category in first-seen order. The fallback command renders
/// bracketed.
pub fn global_help(
    registry: &Registry,
    banner: Option<&str>,
    error: Option<&str>,
    main: Option<&str>,
) -> String {
    let mut out = String::new();
    if let Some(banner) = banner {
        let _ = writeln!(out, "{}\n", banner.trim_end());
    }
    if let Some(error) = error {
        let _ = writeln!(out, "{}\n", error);
    }
    for (category, commands) in registry.grouped() {
        let _ = writeln!(out, "{} Commands:", category.unwrap_or("General"));
        for command in commands {
            let shown = if main == Some(command.name.as_str()) {
                format!("[{}]", command.name)
            } else {
                command.name.clone()
            };
            match command.docs.as_deref().and_then(first_paragraph) {
                Some(summary) => {
                    let _ = writeln!(out, "  {} - {}", shown, summary);
                }
                None => {
                    let _ = writeln!(out, "  {}", shown);
                }
            }
        }
    }
    out
}

/// Help for one command: optional error line, optional current-options
/// dump, the documentation block, then the option-parser usage block.
pub fn command_help(
    name: &str,
    docs: Option<&str>,
    usage: &str,
    error: Option<&str>,
    current: Option<&BoundArgs>,
) -> String {
    let mut out = String::new();
    if let Some(error) = error {
        let _ = writeln!(out, "{}\n", error);
    }
    if let Some(args) = current {
        out.push_str(&current_options(args));
        out.push('\n');
    }
    match docs {
        Some(docs) => {
            let _ = writeln!(out, "Documentation for command '{}':", name);
            let _ = writeln!(out, "{}", DOC_FRAME);
            let _ = writeln!(out, "{}", docs.trim_end());
            let _ = writeln!(out, "{}", DOC_FRAME);
        }
        None => {
            let _ = writeln!(out, "No documentation for command '{}'.", name);
        }
    }
    out.push('\n');
    out.push_str(usage.trim_end());
    out.push('\n');
    out
}

/// The `Current Options:` dump, one line per parameter in declaration
/// order. List values repeat the flag per element; this exact format is an
/// output contract.
pub fn current_options(args: &BoundArgs) -> String {
    let mut out = String::from("Current Options:\n");
    for (name, value) in args.iter() {
        match value {
            Value::List(items) if !items.is_empty() => {
                let joined = items
                    .iter()
                    .map(|item| format!("--{}={}", name, item))
                    .join(" ");
                let _ = writeln!(out, " {}", joined);
            }
            Value::List(_) => {
                let _ = writeln!(out, " --{}=", name);
            }
            other => {
                let _ = writeln!(out, " --{}={}", name, other);
            }
        }
    }
    out
}

/// First paragraph of a documentation block: everything up to the first
/// blank line, folded onto one line.
fn first_paragraph(docs: &str) -> Option<String> {
    let paragraph = docs
        .trim()
        .split("\n\n")
        .next()?
        .lines()
        .map(str::trim)
        .join(" ");
    if paragraph.is_empty() {
        None
    } else {
        Some(paragraph)
    }
}
