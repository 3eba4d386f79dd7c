use chrono::{DateTime, Utc};
use colored::*;
use reportdash::commands::{CmdMessage, MessageLevel};
use reportdash::config::{DashConfig, CONFIG_KEYS};
use reportdash::index::ViewEntry;
use reportdash::model::{Priority, Record, Status};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const STATUS_WIDTH: usize = 11;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One line per view entry: position, status, title and patient, age.
pub fn print_records(entries: &[ViewEntry]) {
    for entry in entries {
        let record = &entry.record;
        let idx_str = format!("{:>3}. ", entry.view_index + 1);
        let status = format!("{:<width$}", record.status.as_str(), width = STATUS_WIDTH);
        let time_ago = format_time_ago(record.date_modified);

        let line = format!(
            "{} · {} [{}]",
            record.title, record.patient_name, record.category
        );
        let fixed = idx_str.width() + STATUS_WIDTH + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let line = truncate_to_width(&line, available);
        let padding = available.saturating_sub(line.width());

        let title_colored = if record.priority == Priority::High {
            line.bold()
        } else {
            line.normal()
        };

        println!(
            "{}{}  {}{}{}",
            idx_str,
            color_status(record.status, &status),
            title_colored,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

pub fn print_full_record(record: &Record) {
    println!("{} {}", record.id.as_str().yellow(), record.title.bold());
    println!(
        "{} ({})  {}  {}  priority {}",
        record.patient_name,
        record.patient_id,
        record.category,
        color_status(record.status, record.status.as_str()),
        record.priority
    );
    println!(
        "created {}  modified {}",
        record.date_created.format("%Y-%m-%d %H:%M"),
        record.date_modified.format("%Y-%m-%d %H:%M")
    );
    println!("--------------------------------");
    println!("{}", strip_tags(&record.content));
}

pub fn print_config(config: &DashConfig) {
    for key in CONFIG_KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", key.bold(), value);
    }
}

fn color_status(status: Status, text: &str) -> ColoredString {
    match status {
        Status::Draft => text.yellow(),
        Status::Completed => text.green(),
        Status::Reviewed => text.blue(),
    }
}

/// Renders report HTML as plain text: block tags become line breaks,
/// list items get a bullet, other tags are dropped.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            out.push_str(&rest[start..]);
            return out.trim().to_string();
        };
        let tag = rest[start + 1..start + end].trim().to_ascii_lowercase();
        let name = tag.trim_start_matches('/');
        let name = name.split_whitespace().next().unwrap_or("");
        match name {
            "li" if !tag.starts_with('/') => out.push_str("\n  • "),
            "p" | "h1" | "h2" | "h3" | "h4" | "ul" | "ol" | "br" | "br/" => {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => {}
        }
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);

    out.lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
