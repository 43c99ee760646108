//! Filter option derivation.
//!
//! Year, name, buy/sell and type choices come from the whole dataset.
//! Months exist only once a year is chosen, days only once a month is
//! chosen, and both are narrowed to records of the chosen period.
//! Client and security names are deliberately not narrowed by other
//! selections.

use crate::domain::dataset::Dataset;
use crate::domain::selection::FilterSelection;
use std::collections::BTreeSet;

/// Selectable values per control, each sorted ascending and de-duplicated.
/// The "unselected" choice is implicit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub years: Vec<i32>,
    pub months: Vec<u32>,
    pub days: Vec<u32>,
    pub client_names: Vec<String>,
    pub security_names: Vec<String>,
    pub buy_sell: Vec<String>,
    pub kinds: Vec<String>,
}

impl FilterOptions {
    pub fn year_labels(&self) -> Vec<String> {
        self.years.iter().map(|y| format!("{y:04}")).collect()
    }

    pub fn month_labels(&self) -> Vec<String> {
        self.months.iter().map(|m| format!("{m:02}")).collect()
    }

    pub fn day_labels(&self) -> Vec<String> {
        self.days.iter().map(|d| format!("{d:02}")).collect()
    }
}

pub fn derive_options(dataset: &Dataset, selection: &FilterSelection) -> FilterOptions {
    let years: BTreeSet<i32> = dataset.iter().map(|r| r.date.year).collect();

    let months: BTreeSet<u32> = match selection.date.year() {
        Some(year) => dataset
            .iter()
            .filter(|r| r.date.year == year)
            .map(|r| r.date.month)
            .collect(),
        None => BTreeSet::new(),
    };

    let days: BTreeSet<u32> = match (selection.date.year(), selection.date.month()) {
        (Some(year), Some(month)) => dataset
            .iter()
            .filter(|r| r.date.year == year && r.date.month == month)
            .map(|r| r.date.day)
            .collect(),
        _ => BTreeSet::new(),
    };

    FilterOptions {
        years: years.into_iter().collect(),
        months: months.into_iter().collect(),
        days: days.into_iter().collect(),
        client_names: distinct(dataset, |r| &r.client_name),
        security_names: distinct(dataset, |r| &r.security_name),
        buy_sell: distinct(dataset, |r| &r.buy_sell),
        kinds: distinct(dataset, |r| &r.kind),
    }
}

fn distinct<F>(dataset: &Dataset, field: F) -> Vec<String>
where
    F: Fn(&crate::domain::record::Record) -> &String,
{
    dataset
        .iter()
        .map(field)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect()
}
