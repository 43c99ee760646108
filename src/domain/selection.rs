//! User filter selections.
//!
//! The date filter cascades year -> month -> day. [`DateFilter`] can only
//! hold a month together with its year and a day together with its month,
//! so a selection never carries a dangling downstream component.

use crate::domain::record::TradeDate;
use std::collections::BTreeSet;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFilter {
    #[default]
    Any,
    Year(i32),
    Month(i32, u32),
    Day(i32, u32, u32),
}

impl DateFilter {
    /// Builds the longest valid prefix of the given components.
    pub fn from_parts(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Self {
        match (year, month, day) {
            (None, _, _) => DateFilter::Any,
            (Some(y), None, _) => DateFilter::Year(y),
            (Some(y), Some(m), None) => DateFilter::Month(y, m),
            (Some(y), Some(m), Some(d)) => DateFilter::Day(y, m, d),
        }
    }

    pub fn year(&self) -> Option<i32> {
        match *self {
            DateFilter::Any => None,
            DateFilter::Year(y) | DateFilter::Month(y, _) | DateFilter::Day(y, _, _) => Some(y),
        }
    }

    pub fn month(&self) -> Option<u32> {
        match *self {
            DateFilter::Month(_, m) | DateFilter::Day(_, m, _) => Some(m),
            _ => None,
        }
    }

    pub fn day(&self) -> Option<u32> {
        match *self {
            DateFilter::Day(_, _, d) => Some(d),
            _ => None,
        }
    }

    pub fn matches(&self, date: &TradeDate) -> bool {
        match *self {
            DateFilter::Any => true,
            DateFilter::Year(y) => date.year == y,
            DateFilter::Month(y, m) => date.year == y && date.month == m,
            DateFilter::Day(y, m, d) => date.year == y && date.month == m && date.day == d,
        }
    }
}

/// One filter control of the explorer sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Year,
    Month,
    Day,
    ClientName,
    SecurityName,
    BuySell,
    Type,
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(Dimension::Year),
            "month" => Ok(Dimension::Month),
            "day" => Ok(Dimension::Day),
            "client_name" => Ok(Dimension::ClientName),
            "security_name" => Ok(Dimension::SecurityName),
            "buy_sell" => Ok(Dimension::BuySell),
            "type" => Ok(Dimension::Type),
            other => Err(format!("unknown filter control: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub date: DateFilter,
    pub client_names: BTreeSet<String>,
    pub security_names: BTreeSet<String>,
    pub buy_sell: Option<String>,
    pub kind: Option<String>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.date == DateFilter::Any
            && self.client_names.is_empty()
            && self.security_names.is_empty()
            && self.buy_sell.is_none()
            && self.kind.is_none()
    }

    /// Drops the date components below a control that just changed.
    pub fn reset_below(&mut self, changed: Dimension) {
        self.date = match (changed, self.date) {
            (Dimension::Year, date) => DateFilter::from_parts(date.year(), None, None),
            (Dimension::Month, date) => DateFilter::from_parts(date.year(), date.month(), None),
            (_, date) => date,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> TradeDate {
        TradeDate { year, month, day }
    }

    #[test]
    fn from_parts_keeps_only_valid_prefix() {
        assert_eq!(DateFilter::from_parts(None, Some(1), Some(5)), DateFilter::Any);
        assert_eq!(
            DateFilter::from_parts(Some(2023), None, Some(5)),
            DateFilter::Year(2023)
        );
        assert_eq!(
            DateFilter::from_parts(Some(2023), Some(1), Some(5)),
            DateFilter::Day(2023, 1, 5)
        );
    }

    #[test]
    fn date_filter_matches_by_component() {
        let d = date(2023, 1, 5);
        assert!(DateFilter::Any.matches(&d));
        assert!(DateFilter::Year(2023).matches(&d));
        assert!(!DateFilter::Year(2024).matches(&d));
        assert!(DateFilter::Month(2023, 1).matches(&d));
        assert!(!DateFilter::Month(2023, 2).matches(&d));
        assert!(DateFilter::Day(2023, 1, 5).matches(&d));
        assert!(!DateFilter::Day(2023, 1, 6).matches(&d));
    }

    #[test]
    fn reset_below_year_clears_month_and_day() {
        let mut sel = FilterSelection {
            date: DateFilter::Day(2024, 1, 5),
            ..Default::default()
        };
        sel.reset_below(Dimension::Year);
        assert_eq!(sel.date, DateFilter::Year(2024));
    }

    #[test]
    fn reset_below_month_clears_day() {
        let mut sel = FilterSelection {
            date: DateFilter::Day(2024, 1, 5),
            ..Default::default()
        };
        sel.reset_below(Dimension::Month);
        assert_eq!(sel.date, DateFilter::Month(2024, 1));
    }

    #[test]
    fn reset_below_other_controls_keeps_date() {
        let mut sel = FilterSelection {
            date: DateFilter::Day(2024, 1, 5),
            ..Default::default()
        };
        sel.reset_below(Dimension::ClientName);
        assert_eq!(sel.date, DateFilter::Day(2024, 1, 5));
    }

    #[test]
    fn dimension_parses_form_names() {
        assert_eq!("year".parse::<Dimension>(), Ok(Dimension::Year));
        assert_eq!("type".parse::<Dimension>(), Ok(Dimension::Type));
        assert!("colour".parse::<Dimension>().is_err());
    }

    #[test]
    fn default_selection_is_empty() {
        assert!(FilterSelection::default().is_empty());
        let sel = FilterSelection {
            buy_sell: Some("Sell".into()),
            ..Default::default()
        };
        assert!(!sel.is_empty());
    }
}
