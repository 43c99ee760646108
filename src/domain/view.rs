//! View controller: preview vs. filtered display.
//!
//! [`ExplorerState::on`] is the transition function over user
//! interactions, [`render`] turns a state into what the UI shows. Neither
//! touches anything outside its arguments.

use crate::domain::dataset::Session;
use crate::domain::options::{FilterOptions, derive_options};
use crate::domain::predicate::filter_records;
use crate::domain::record::Record;
use crate::domain::selection::FilterSelection;
use crate::domain::style::{StyledTable, style_records};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Preview,
    Filtered,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// A filter control changed; the table stays on the preview.
    Select(FilterSelection),
    Apply(FilterSelection),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplorerState {
    pub mode: ViewMode,
    pub selection: FilterSelection,
}

impl ExplorerState {
    pub fn on(self, interaction: Interaction) -> Self {
        match interaction {
            Interaction::Select(selection) => Self {
                mode: ViewMode::Preview,
                selection,
            },
            Interaction::Apply(selection) => Self {
                mode: ViewMode::Filtered,
                selection,
            },
            Interaction::Clear => Self::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody<'a> {
    Preview {
        table: StyledTable,
    },
    Results {
        table: StyledTable,
        /// Raw rows offered for export.
        export: Vec<&'a Record>,
    },
    NoMatches,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewOutput<'a> {
    pub options: FilterOptions,
    pub selection: FilterSelection,
    pub body: ViewBody<'a>,
}

pub fn render<'a>(
    session: &'a Session,
    state: &ExplorerState,
    highlight: &[String],
) -> ViewOutput<'a> {
    let options = derive_options(&session.full, &state.selection);

    let body = match state.mode {
        ViewMode::Preview => ViewBody::Preview {
            table: style_records(&session.preview.records, &session.preview.columns, highlight),
        },
        ViewMode::Filtered => {
            let rows = filter_records(&session.full, &state.selection);
            if rows.is_empty() {
                ViewBody::NoMatches
            } else {
                ViewBody::Results {
                    table: style_records(rows.iter().copied(), &session.full.columns, highlight),
                    export: rows,
                }
            }
        }
    };

    ViewOutput {
        options,
        selection: state.selection.clone(),
        body,
    }
}
