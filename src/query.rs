use std::cmp::Ordering;

use crate::models::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Ledger order.
    #[default]
    Unsorted,
    ProfitDesc,
    ProfitAsc,
}

impl SortMode {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Unsorted => "default",
            Self::ProfitDesc => "profit-desc",
            Self::ProfitAsc => "profit-asc",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        [Self::Unsorted, Self::ProfitDesc, Self::ProfitAsc]
            .into_iter()
            .find(|m| m.key() == key)
    }
}

fn contains_ci(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

/// Records whose item name or purchase platform contains `term`,
/// ignoring case. An empty term matches everything.
pub fn search<'a>(records: &'a [Record], term: &str) -> Vec<&'a Record> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|r| {
            contains_ci(Some(r.item_name.as_str()), &needle)
                || contains_ci(r.buy_platform.as_deref(), &needle)
        })
        .collect()
}

// Records without a profit go last in either direction.
fn compare_profit(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.total_cmp(&y);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Order records for display. The sort is stable, so ties keep ledger order.
pub fn sort(mut records: Vec<&Record>, mode: SortMode) -> Vec<&Record> {
    match mode {
        SortMode::Unsorted => {}
        SortMode::ProfitDesc => records.sort_by(|a, b| compare_profit(a.profit, b.profit, true)),
        SortMode::ProfitAsc => records.sort_by(|a, b| compare_profit(a.profit, b.profit, false)),
    }
    records
}

/// Sum of present profits; records without one are skipped.
pub fn total_profit<'a>(records: impl IntoIterator<Item = &'a Record>) -> f64 {
    records.into_iter().filter_map(|r| r.profit).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewRecord, RecordId};

    fn rec(id: u64, item: &str, platform: Option<&str>, profit: Option<f64>) -> Record {
        let mut r = Record::new(
            RecordId(id),
            NewRecord {
                item_name: item.to_string(),
                buy_platform: platform.map(str::to_string),
                ..Default::default()
            },
        );
        r.profit = profit;
        r
    }

    #[test]
    fn test_search_matches_item_or_platform() {
        let records = vec![
            rec(0, "AK-47", Some("BUFF"), None),
            rec(1, "AWP", Some("C5"), None),
        ];
        let hits = search(&records, "buff");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item_name, "AK-47");

        let hits = search(&records, "aw");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item_name, "AWP");
    }

    #[test]
    fn test_empty_term_returns_all() {
        let records = vec![rec(0, "AK-47", None, None), rec(1, "AWP", None, None)];
        assert_eq!(search(&records, "").len(), 2);
    }

    #[test]
    fn test_missing_platform_does_not_match() {
        let records = vec![rec(0, "Glove", None, None)];
        assert!(search(&records, "buff").is_empty());
    }

    #[test]
    fn test_search_non_latin() {
        let records = vec![rec(0, "蝴蝶刀 | 渐变", Some("悠悠有品"), None)];
        assert_eq!(search(&records, "悠悠").len(), 1);
    }

    #[test]
    fn test_sort_desc_puts_absent_last() {
        let records = vec![
            rec(0, "a", None, Some(10.0)),
            rec(1, "b", None, None),
            rec(2, "c", None, Some(-5.0)),
        ];
        let sorted = sort(records.iter().collect(), SortMode::ProfitDesc);
        let profits: Vec<Option<f64>> = sorted.iter().map(|r| r.profit).collect();
        assert_eq!(profits, vec![Some(10.0), Some(-5.0), None]);
    }

    #[test]
    fn test_sort_asc_puts_absent_last() {
        let records = vec![
            rec(0, "a", None, None),
            rec(1, "b", None, Some(10.0)),
            rec(2, "c", None, Some(-5.0)),
        ];
        let sorted = sort(records.iter().collect(), SortMode::ProfitAsc);
        let profits: Vec<Option<f64>> = sorted.iter().map(|r| r.profit).collect();
        assert_eq!(profits, vec![Some(-5.0), Some(10.0), None]);
    }

    #[test]
    fn test_unsorted_keeps_ledger_order() {
        let records = vec![rec(0, "a", None, Some(1.0)), rec(1, "b", None, Some(9.0))];
        let sorted = sort(records.iter().collect(), SortMode::Unsorted);
        assert_eq!(sorted[0].item_name, "a");
    }

    #[test]
    fn test_total_profit_skips_absent() {
        let records = vec![
            rec(0, "a", None, Some(10.0)),
            rec(1, "b", None, None),
            rec(2, "c", None, Some(-5.0)),
        ];
        assert_eq!(total_profit(&records), 5.0);
        assert_eq!(total_profit(&[]), 0.0);
    }

    #[test]
    fn test_sort_mode_keys() {
        assert_eq!(SortMode::from_key("profit-desc"), Some(SortMode::ProfitDesc));
        assert_eq!(SortMode::from_key("default"), Some(SortMode::Unsorted));
        assert_eq!(SortMode::from_key("price"), None);
    }
}
