//! Filter predicate engine.

use crate::domain::dataset::Dataset;
use crate::domain::record::Record;
use crate::domain::selection::FilterSelection;

/// AND across dimensions, set membership within the multi-selects. Empty
/// dimensions do not constrain.
pub fn matches(record: &Record, selection: &FilterSelection) -> bool {
    selection.date.matches(&record.date)
        && (selection.client_names.is_empty()
            || selection.client_names.contains(&record.client_name))
        && (selection.security_names.is_empty()
            || selection.security_names.contains(&record.security_name))
        && selection
            .buy_sell
            .as_ref()
            .is_none_or(|v| *v == record.buy_sell)
        && selection.kind.as_ref().is_none_or(|v| *v == record.kind)
}

/// Records of `dataset` matching `selection`, in dataset order.
pub fn filter_records<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> Vec<&'a Record> {
    dataset
        .iter()
        .filter(|record| matches(record, selection))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::TradeDate;
    use crate::domain::selection::DateFilter;
    use proptest::prelude::*;

    fn record(date: (i32, u32, u32), client: &str, security: &str, buy_sell: &str) -> Record {
        Record {
            date: TradeDate {
                year: date.0,
                month: date.1,
                day: date.2,
            },
            client_name: client.into(),
            security_name: security.into(),
            buy_sell: buy_sell.into(),
            kind: "Equity".into(),
            metrics: Vec::new(),
        }
    }

    fn sample() -> Dataset {
        Dataset {
            columns: Vec::new(),
            records: vec![
                record((2023, 1, 5), "Acme", "BHP", "Buy"),
                record((2023, 2, 10), "Globex", "CBA", "Buy"),
                record((2024, 1, 1), "Acme", "RIO", "Sell"),
            ],
        }
    }

    #[test]
    fn empty_selection_returns_everything() {
        let dataset = sample();
        let out = filter_records(&dataset, &FilterSelection::default());
        assert_eq!(out.len(), 3);
        assert!(out.iter().zip(dataset.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn buy_sell_selects_single_record() {
        let dataset = sample();
        let sel = FilterSelection {
            buy_sell: Some("Sell".into()),
            ..Default::default()
        };
        let out = filter_records(&dataset, &sel);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0], &dataset.records[2]);
    }

    #[test]
    fn date_cascade_narrows() {
        let dataset = sample();
        let by_year = FilterSelection {
            date: DateFilter::Year(2023),
            ..Default::default()
        };
        assert_eq!(filter_records(&dataset, &by_year).len(), 2);

        let by_month = FilterSelection {
            date: DateFilter::Month(2023, 2),
            ..Default::default()
        };
        let out = filter_records(&dataset, &by_month);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].client_name, "Globex");

        let by_day = FilterSelection {
            date: DateFilter::Day(2023, 2, 11),
            ..Default::default()
        };
        assert!(filter_records(&dataset, &by_day).is_empty());
    }

    #[test]
    fn multi_select_is_or_within_and_across() {
        let dataset = sample();
        let sel = FilterSelection {
            client_names: ["Acme", "Globex"].iter().map(|s| s.to_string()).collect(),
            security_names: ["BHP", "RIO"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        let out = filter_records(&dataset, &sel);
        let securities: Vec<&str> = out.iter().map(|r| r.security_name.as_str()).collect();
        assert_eq!(securities, vec!["BHP", "RIO"]);
    }

    #[test]
    fn unknown_value_matches_nothing() {
        let dataset = sample();
        let sel = FilterSelection {
            kind: Some("Bond".into()),
            ..Default::default()
        };
        assert!(filter_records(&dataset, &sel).is_empty());
    }

    fn arb_record() -> impl Strategy<Value = Record> {
        (
            2020i32..2023,
            1u32..4,
            1u32..4,
            prop::sample::select(vec!["Acme", "Globex", "Initech"]),
            prop::sample::select(vec!["BHP", "CBA"]),
            prop::sample::select(vec!["Buy", "Sell"]),
        )
            .prop_map(|(y, m, d, c, s, b)| record((y, m, d), c, s, b))
    }

    fn arb_selection() -> impl Strategy<Value = FilterSelection> {
        (
            prop::option::of(2020i32..2023),
            prop::option::of(1u32..4),
            prop::option::of(1u32..4),
            prop::collection::btree_set(
                prop::sample::select(vec!["Acme".to_string(), "Globex".to_string()]),
                0..2,
            ),
            prop::option::of(prop::sample::select(vec!["Buy".to_string(), "Sell".to_string()])),
        )
            .prop_map(|(y, m, d, clients, buy_sell)| FilterSelection {
                date: DateFilter::from_parts(y, m, d),
                client_names: clients,
                buy_sell,
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn empty_selection_is_identity(records in prop::collection::vec(arb_record(), 0..40)) {
            let dataset = Dataset { columns: Vec::new(), records };
            let out: Vec<Record> = filter_records(&dataset, &FilterSelection::default())
                .into_iter()
                .cloned()
                .collect();
            prop_assert_eq!(out, dataset.records.clone());
        }

        #[test]
        fn filtering_is_idempotent(
            records in prop::collection::vec(arb_record(), 0..40),
            sel in arb_selection(),
        ) {
            let dataset = Dataset { columns: Vec::new(), records };
            let once: Vec<Record> = filter_records(&dataset, &sel).into_iter().cloned().collect();
            let again = Dataset { columns: Vec::new(), records: once.clone() };
            let twice: Vec<Record> = filter_records(&again, &sel).into_iter().cloned().collect();
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.iter().all(|r| matches(r, &sel)));
        }
    }
}
