use std::io::{self, Write};

use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};
use tracing::warn;
use unicode_width::UnicodeWidthStr;
use whereis_client::{Error, Result};
use whereis_models::{Page, Record};

const HEADER: [&str; 4] = ["PLACE", "NAME", "DATE", "WHERE TO"];
const NO_RESULTS: &str = "No search results";
const COLUMN_GAP: &str = "  ";

/// Compact form of `absenceDate` as sent by the server.
const COMPACT_DATE: &str = "%Y%m%d";
/// Long form shown in the DATE column, e.g. `2019-01-07 Mon`.
const LONG_DATE: &str = "%Y-%m-%d %a";

/// Renders a page as a summary line plus a table.
#[derive(Debug, Default)]
pub struct Presenter {
    filter: Option<Regex>,
}

impl Presenter {
    /// `grep` keeps only rows whose rendered text matches, ignoring case.
    /// `None` or an empty pattern keeps every row.
    pub fn new(grep: Option<&str>) -> Result<Self> {
        let filter = match grep {
            None | Some("") => None,
            Some(pattern) => Some(
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| Error::Pattern(e.to_string()))?,
            ),
        };
        Ok(Self { filter })
    }

    pub fn render(&self, page: &Page, out: &mut impl Write) -> io::Result<()> {
        if page.is_empty() {
            return writeln!(out, "{NO_RESULTS}");
        }
        writeln!(out, "{}", summary(page))?;
        let rows: Vec<[String; 4]> = page
            .content
            .iter()
            .map(row)
            .filter(|cells| self.keeps(cells))
            .collect();
        write!(out, "{}", table(&rows))
    }

    fn keeps(&self, cells: &[String; 4]) -> bool {
        match &self.filter {
            Some(re) => re.is_match(&cells.join(" ")),
            None => true,
        }
    }
}

/// Server-reported position of this page. Only meaningful for a non-empty page.
pub fn summary(page: &Page) -> String {
    format!(
        "Showing {} to {} of {} items, {} of {} pages.",
        page.first_item(),
        page.last_item(),
        page.total_elements,
        page.current_page(),
        page.total_pages
    )
}

/// PLACE, NAME, DATE and WHERE TO cells for one record.
pub fn row(record: &Record) -> [String; 4] {
    [
        record.work_place.clone(),
        record.emp_name.clone(),
        date_cell(record),
        format!("{} {}", record.absence_type, record.absence_desc).trim_end().to_string(),
    ]
}

fn date_cell(record: &Record) -> String {
    let date = match NaiveDate::parse_from_str(&record.absence_date, COMPACT_DATE) {
        Ok(date) => date.format(LONG_DATE).to_string(),
        Err(e) => {
            warn!("unexpected absence date '{}': {e}", record.absence_date);
            record.absence_date.clone()
        }
    };
    format!("{date} {}", record.absence_time).trim_end().to_string()
}

fn table(rows: &[[String; 4]]) -> String {
    let mut widths = HEADER.map(|h| h.width());
    for cells in rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    let header = HEADER.map(str::to_string);
    for cells in std::iter::once(&header).chain(rows) {
        let mut line = String::new();
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            if i > 0 {
                line.push_str(COLUMN_GAP);
            }
            line.push_str(cell);
            line.push_str(&" ".repeat(width - cell.width()));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
