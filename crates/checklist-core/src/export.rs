//! Plain-text rendering of a list, suitable for pasting into a message.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::item::{self, ItemRecord};
use crate::list::ListRecord;

const MISSING_DATE: &str = "\u{2014}";
const UNCHECKED_BOX: char = '\u{2610}';
const CHECKED_BOX: char = '\u{2611}';

/// Render `list` and its `items` as text.
///
/// Items are written in display order regardless of the order they are
/// passed in. Quantities of 1 are omitted.
pub fn render_plain_text(list: &ListRecord, items: &[ItemRecord]) -> String {
    let mut out = String::new();
    out.push_str(&list.name);
    if let Some(country) = &list.country {
        let _ = write!(out, " {} {}", country.flag_emoji(), country);
    }
    out.push('\n');
    out.push_str(&date_range_line(list.start_date, list.end_date));
    out.push_str("\n\n");

    let mut sorted: Vec<&ItemRecord> = items.iter().collect();
    sorted.sort_by(|a, b| item::display_order(a, b));
    let lines: Vec<String> = sorted.iter().map(|it| item_line(it)).collect();
    out.push_str(&lines.join("\n"));
    out
}

/// `📅 dd/mm/yyyy → dd/mm/yyyy`, with a dash for a missing date.
pub fn date_range_line(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    format!("\u{1F4C5} {} \u{2192} {}", fmt_date(start), fmt_date(end))
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| MISSING_DATE.to_string())
}

fn item_line(item: &ItemRecord) -> String {
    let box_char = if item.checked { CHECKED_BOX } else { UNCHECKED_BOX };
    if item.quantity != 1 {
        format!("{box_char} {} x{}", item.label, item.quantity)
    } else {
        format!("{box_char} {}", item.label)
    }
}
