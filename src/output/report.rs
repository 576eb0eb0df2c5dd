//! Console report rendering

use crate::model::CrawlResult;
use crate::output::sink::Emitted;
use colored::{Color, ColoredString, Colorize};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::Path;

const RULE_WIDTH: usize = 40;

/// Prints the start-of-crawl banner
pub fn print_banner() {
    println!("{}", "★ Website Crawler".bright_yellow().bold());
    println!("{}\n", "~~~ Initiating Crawling Process ~~~".bright_cyan().bold());
}

/// Prints the message shown when no report could be produced
pub fn print_no_data() {
    println!("{}", "No data crawled or error occurred.".red());
}

/// Prints the rendered report to stdout
pub fn print_report(emitted: &Emitted) {
    print!("{}", render_report(emitted));
}

/// Renders the display result and spill file locations as colored text
pub fn render_report(emitted: &Emitted) -> String {
    let result = &emitted.display;
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", rule.yellow()));
    push_line(
        &mut out,
        format!("~~~ Crawling Result for {} ~~~", result.url).yellow(),
    );
    out.push_str(&format!("{}\n\n", rule.yellow()));

    push_line(&mut out, format!("Title: {}", result.title).cyan());
    push_line(&mut out, format!("URL: {}", result.url).cyan());
    push_line(
        &mut out,
        format!("Description: {}", result.description).cyan(),
    );
    push_line(
        &mut out,
        format!(
            "Crawled at: {} ({} ms)",
            result.crawled_at.format("%Y-%m-%d %H:%M:%S UTC"),
            result.elapsed_ms
        )
        .cyan(),
    );

    push_line(&mut out, "☆ Meta Data:".cyan().bold());
    for (key, value) in &result.meta_data {
        push_line(&mut out, format!("  • {}: {}", key, value).cyan());
    }

    push_section(
        &mut out,
        "Internal Links:",
        &result.internal_links,
        emitted.internal_links_file.as_deref(),
        Color::Green,
    );
    push_section(
        &mut out,
        "External Links:",
        &result.external_links,
        emitted.external_links_file.as_deref(),
        Color::Red,
    );
    push_section(&mut out, "Emails Found:", &result.emails, None, Color::Yellow);

    if !result.ip_info.is_empty() {
        out.push('\n');
        push_line(&mut out, "IP Information:".blue().bold());
        for (key, value) in &result.ip_info {
            push_line(
                &mut out,
                format!("  • {}: {}", key, display_value(value)).blue(),
            );
        }
    }

    out.push_str(&format!("\n{}\n\n", rule));
    out
}

fn push_line(out: &mut String, text: ColoredString) {
    out.push_str(&format!("{}\n", text));
}

/// Appends a bulleted list, skipped entirely when empty
fn push_section<T: Display>(
    out: &mut String,
    heading: &str,
    entries: &BTreeSet<T>,
    spill_file: Option<&Path>,
    color: Color,
) {
    if entries.is_empty() {
        return;
    }

    out.push('\n');
    push_line(out, heading.color(color).bold());
    for entry in entries {
        push_line(out, format!("  • {}", entry).color(color));
    }
    if let Some(path) = spill_file {
        push_line(
            out,
            format!("  (full list in {})", path.display()).color(color),
        );
    }
}

/// Renders the display result as pretty JSON
pub fn render_json(result: &CrawlResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Strings print without quotes, everything else as JSON
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
