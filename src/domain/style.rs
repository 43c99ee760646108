//! Conditional styling of percentage columns.
//!
//! Styling attaches a [`CellStyle`] next to each displayed value. Records
//! are only borrowed, so exported data keeps the stored values.

use crate::domain::record::{Cell, Record};

pub const HIGHLIGHT_COLUMNS: [&str; 5] = ["%_of_curr", "3m_%", "6m_%", "9m_%", "12m_%"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Positive,
    Negative,
    Neutral,
}

impl CellStyle {
    pub fn css_class(&self) -> &'static str {
        match self {
            CellStyle::Positive => "positive",
            CellStyle::Negative => "negative",
            CellStyle::Neutral => "",
        }
    }
}

/// Parses `"-3.5%"`, `"7.2"` and the like. `None` when not a number.
pub fn parse_percentage(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    number.parse::<f64>().ok()
}

pub fn style_for(cell: &Cell) -> CellStyle {
    let value = match cell {
        Cell::Number(n) => Some(*n),
        Cell::Integer(i) => Some(*i as f64),
        Cell::Text(s) => parse_percentage(s),
        Cell::Null | Cell::Bool(_) => None,
    };
    match value {
        Some(v) if v > 0.0 => CellStyle::Positive,
        Some(v) if v < 0.0 => CellStyle::Negative,
        _ => CellStyle::Neutral,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledCell {
    pub text: String,
    pub style: CellStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyledTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<StyledCell>>,
}

impl StyledTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Styles `records` for display; only `highlight` columns get a style.
pub fn style_records<'a, I>(records: I, columns: &[String], highlight: &[String]) -> StyledTable
where
    I: IntoIterator<Item = &'a Record>,
{
    let highlighted: Vec<bool> = columns.iter().map(|c| highlight.contains(c)).collect();
    let rows = records
        .into_iter()
        .map(|record| {
            columns
                .iter()
                .zip(&highlighted)
                .map(|(column, &styled)| match record.value(column) {
                    Some(cell) => StyledCell {
                        text: cell.to_string(),
                        style: if styled {
                            style_for(&cell)
                        } else {
                            CellStyle::Neutral
                        },
                    },
                    None => StyledCell {
                        text: String::new(),
                        style: CellStyle::Neutral,
                    },
                })
                .collect()
        })
        .collect();

    StyledTable {
        columns: columns.to_vec(),
        rows,
    }
}

pub fn default_highlight_columns() -> Vec<String> {
    HIGHLIGHT_COLUMNS.iter().map(|c| c.to_string()).collect()
}
