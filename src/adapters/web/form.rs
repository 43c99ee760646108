//! Sidebar form fields to and from [`FilterSelection`].
//!
//! Fields: `year`, `month`, `day`, `client_name` (repeated),
//! `security_name` (repeated), `buy_sell`, `type`. An empty value is the
//! "unselected" choice.

use crate::domain::selection::{DateFilter, FilterSelection};

use super::WebError;

pub fn selection_from_form(pairs: &[(String, String)]) -> Result<FilterSelection, WebError> {
    let mut selection = FilterSelection::default();
    let (mut year, mut month, mut day) = (None, None, None);

    for (key, value) in pairs {
        if value.trim().is_empty() {
            continue;
        }
        match key.as_str() {
            "year" => year = Some(parse_number::<i32>(key, value, 0, 9999)?),
            "month" => month = Some(parse_number::<u32>(key, value, 1, 12)?),
            "day" => day = Some(parse_number::<u32>(key, value, 1, 31)?),
            "client_name" => {
                selection.client_names.insert(value.clone());
            }
            "security_name" => {
                selection.security_names.insert(value.clone());
            }
            "buy_sell" => selection.buy_sell = Some(value.clone()),
            "type" => selection.kind = Some(value.clone()),
            _ => {}
        }
    }

    selection.date = DateFilter::from_parts(year, month, day);
    Ok(selection)
}

fn parse_number<T>(key: &str, value: &str, min: T, max: T) -> Result<T, WebError>
where
    T: std::str::FromStr + PartialOrd,
{
    match value.trim().parse::<T>() {
        Ok(n) if n >= min && n <= max => Ok(n),
        _ => Err(WebError::bad_request(format!("Invalid {key}: {value}"))),
    }
}

/// Form fields that reproduce `selection`, in form order.
pub fn selection_fields(selection: &FilterSelection) -> Vec<(&'static str, String)> {
    let mut fields = Vec::new();
    if let Some(y) = selection.date.year() {
        fields.push(("year", format!("{y:04}")));
    }
    if let Some(m) = selection.date.month() {
        fields.push(("month", format!("{m:02}")));
    }
    if let Some(d) = selection.date.day() {
        fields.push(("day", format!("{d:02}")));
    }
    fields.extend(
        selection
            .client_names
            .iter()
            .map(|v| ("client_name", v.clone())),
    );
    fields.extend(
        selection
            .security_names
            .iter()
            .map(|v| ("security_name", v.clone())),
    );
    if let Some(v) = &selection.buy_sell {
        fields.push(("buy_sell", v.clone()));
    }
    if let Some(v) = &selection.kind {
        fields.push(("type", v.clone()));
    }
    fields
}
