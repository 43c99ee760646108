//! HTML templates using Askama.

use askama::Template;

use crate::domain::options::FilterOptions;
use crate::domain::selection::FilterSelection;
use crate::domain::style::StyledTable;
use crate::domain::view::{ViewBody, ViewOutput};

use super::form::selection_fields;

pub const NO_DATA_MESSAGE: &str = "No data found for the selected filters.";

pub struct OptionView {
    pub value: String,
    pub selected: bool,
}

pub struct HiddenField {
    pub name: &'static str,
    pub value: String,
}

pub struct CellView {
    pub text: String,
    pub class: &'static str,
}

/// Everything the explorer page draws for one interaction.
pub struct ExplorerView {
    pub years: Vec<OptionView>,
    pub months: Vec<OptionView>,
    pub days: Vec<OptionView>,
    pub client_names: Vec<OptionView>,
    pub security_names: Vec<OptionView>,
    pub buy_sell: Vec<OptionView>,
    pub kinds: Vec<OptionView>,
    pub show_months: bool,
    pub show_days: bool,
    pub message: String,
    pub has_table: bool,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellView>>,
    pub exportable: bool,
    pub export_fields: Vec<HiddenField>,
}

impl ExplorerView {
    pub fn new(output: &ViewOutput<'_>) -> Self {
        let options = &output.options;
        let selection = &output.selection;

        let (message, table, exportable) = match &output.body {
            ViewBody::Preview { table } => (
                format!(
                    "Showing initial {} entries (use filters to refine results):",
                    table.len()
                ),
                Some(table),
                false,
            ),
            ViewBody::Results { table, .. } => (
                format!("Showing {} filtered results:", table.len()),
                Some(table),
                true,
            ),
            ViewBody::NoMatches => (NO_DATA_MESSAGE.to_string(), None, false),
        };

        let (columns, rows) = table.map(table_cells).unwrap_or_default();

        let (years, months, days) = date_options(options, selection);
        Self {
            years,
            months,
            days,
            client_names: text_options(&options.client_names, |v| {
                selection.client_names.contains(v)
            }),
            security_names: text_options(&options.security_names, |v| {
                selection.security_names.contains(v)
            }),
            buy_sell: text_options(&options.buy_sell, |v| {
                selection.buy_sell.as_deref() == Some(v)
            }),
            kinds: text_options(&options.kinds, |v| selection.kind.as_deref() == Some(v)),
            show_months: selection.date.year().is_some(),
            show_days: selection.date.month().is_some(),
            message,
            has_table: table.is_some(),
            columns,
            rows,
            exportable,
            export_fields: if exportable {
                selection_fields(selection)
                    .into_iter()
                    .map(|(name, value)| HiddenField { name, value })
                    .collect()
            } else {
                Vec::new()
            },
        }
    }
}

fn date_options(
    options: &FilterOptions,
    selection: &FilterSelection,
) -> (Vec<OptionView>, Vec<OptionView>, Vec<OptionView>) {
    let pick = |labels: Vec<String>, selected: Option<String>| {
        labels
            .into_iter()
            .map(|value| OptionView {
                selected: selected.as_ref() == Some(&value),
                value,
            })
            .collect::<Vec<_>>()
    };
    (
        pick(
            options.year_labels(),
            selection.date.year().map(|y| format!("{y:04}")),
        ),
        pick(
            options.month_labels(),
            selection.date.month().map(|m| format!("{m:02}")),
        ),
        pick(
            options.day_labels(),
            selection.date.day().map(|d| format!("{d:02}")),
        ),
    )
}

fn text_options<F>(values: &[String], is_selected: F) -> Vec<OptionView>
where
    F: Fn(&str) -> bool,
{
    values
        .iter()
        .map(|v| OptionView {
            value: v.clone(),
            selected: is_selected(v),
        })
        .collect()
}

fn table_cells(table: &StyledTable) -> (Vec<String>, Vec<Vec<CellView>>) {
    let rows = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| CellView {
                    text: cell.text.clone(),
                    class: cell.style.css_class(),
                })
                .collect()
        })
        .collect();
    (table.columns.clone(), rows)
}

#[derive(Template)]
#[template(path = "explorer.html")]
pub struct ExplorerPage<'a> {
    pub view: &'a ExplorerView,
}

/// The swappable `#explorer` block, returned to htmx requests.
#[derive(Template)]
#[template(path = "explorer_body.html")]
pub struct ExplorerFragment<'a> {
    pub view: &'a ExplorerView,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub message: &'a str,
    pub status: u16,
}
