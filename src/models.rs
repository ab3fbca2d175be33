use chrono::NaiveDate;

use crate::grader::{grade, WearGrade};

/// Session-scoped record handle. Assigned by the ledger on load and on
/// create, never reused, never written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub u64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One item's purchase-to-sale lifecycle.
///
/// `wear_grade` and `profit` are derived; they are only ever set by
/// [`Record::recompute`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub item_name: String,
    pub buy_platform: Option<String>,
    pub wear: Option<f64>,
    pub wear_grade: Option<WearGrade>,
    pub buy_price: Option<f64>,
    pub buy_date: Option<NaiveDate>,
    pub sell_price: Option<f64>,
    pub sell_platform: Option<String>,
    pub sell_date: Option<NaiveDate>,
    pub actual_price: Option<f64>,
    pub profit: Option<f64>,
}

/// Fields supplied when a record is created.
#[derive(Debug, Clone, Default)]
pub struct NewRecord {
    pub item_name: String,
    pub buy_platform: Option<String>,
    pub wear: Option<f64>,
    pub buy_price: Option<f64>,
    pub buy_date: Option<NaiveDate>,
    pub sell_price: Option<f64>,
    pub sell_platform: Option<String>,
    pub sell_date: Option<NaiveDate>,
    pub actual_price: Option<f64>,
}

/// The mutable fields of a record. An update overwrites all of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    pub wear: Option<f64>,
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
    pub sell_platform: Option<String>,
    pub sell_date: Option<NaiveDate>,
    pub actual_price: Option<f64>,
}

impl RecordUpdate {
    /// Current values of a record, for callers that change only a few fields.
    pub fn from_record(record: &Record) -> Self {
        Self {
            wear: record.wear,
            buy_price: record.buy_price,
            sell_price: record.sell_price,
            sell_platform: record.sell_platform.clone(),
            sell_date: record.sell_date,
            actual_price: record.actual_price,
        }
    }
}

/// Profit exists only once a sale is both listed and finalized.
/// A missing price counts as zero.
pub fn derive_profit(
    buy_price: Option<f64>,
    sell_price: Option<f64>,
    actual_price: Option<f64>,
) -> Option<f64> {
    let sell = sell_price.unwrap_or(0.0);
    let actual = actual_price.unwrap_or(0.0);
    if sell == 0.0 || actual == 0.0 {
        return None;
    }
    Some(actual - buy_price.unwrap_or(0.0))
}

// A blank platform is no platform; the ledger file cannot tell them apart.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Record {
    pub fn new(id: RecordId, fields: NewRecord) -> Self {
        let mut record = Self {
            id,
            item_name: fields.item_name,
            buy_platform: non_blank(fields.buy_platform),
            wear: fields.wear,
            wear_grade: None,
            buy_price: fields.buy_price,
            buy_date: fields.buy_date,
            sell_price: fields.sell_price,
            sell_platform: non_blank(fields.sell_platform),
            sell_date: fields.sell_date,
            actual_price: fields.actual_price,
            profit: None,
        };
        record.recompute();
        record
    }

    pub fn apply(&mut self, update: RecordUpdate) {
        self.wear = update.wear;
        self.buy_price = update.buy_price;
        self.sell_price = update.sell_price;
        self.sell_platform = non_blank(update.sell_platform);
        self.sell_date = update.sell_date;
        self.actual_price = update.actual_price;
        self.recompute();
    }

    /// Rebuild derived fields from source fields, discarding old values.
    pub fn recompute(&mut self) {
        self.wear_grade = grade(self.wear);
        self.profit = derive_profit(self.buy_price, self.sell_price, self.actual_price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sold(buy: f64, sell: f64, actual: f64) -> NewRecord {
        NewRecord {
            item_name: "AK-47 | Redline".to_string(),
            wear: Some(0.2),
            buy_price: Some(buy),
            sell_price: Some(sell),
            actual_price: Some(actual),
            ..Default::default()
        }
    }

    #[test]
    fn test_profit_requires_sell_and_actual() {
        assert_eq!(derive_profit(Some(100.0), Some(130.0), Some(125.0)), Some(25.0));
        assert_eq!(derive_profit(Some(100.0), Some(0.0), Some(125.0)), None);
        assert_eq!(derive_profit(Some(100.0), Some(130.0), Some(0.0)), None);
        assert_eq!(derive_profit(Some(100.0), None, Some(125.0)), None);
        assert_eq!(derive_profit(Some(100.0), Some(130.0), None), None);
    }

    #[test]
    fn test_profit_can_be_negative() {
        assert_eq!(derive_profit(Some(100.0), Some(90.0), Some(88.0)), Some(-12.0));
    }

    #[test]
    fn test_missing_buy_price_counts_as_zero() {
        assert_eq!(derive_profit(None, Some(10.0), Some(9.5)), Some(9.5));
    }

    #[test]
    fn test_new_record_derives_fields() {
        let r = Record::new(RecordId(0), sold(100.0, 130.0, 125.0));
        assert_eq!(r.wear_grade, Some(WearGrade::FieldTested));
        assert_eq!(r.profit, Some(25.0));
    }

    #[test]
    fn test_apply_clears_stale_profit() {
        let mut r = Record::new(RecordId(0), sold(100.0, 130.0, 125.0));
        let mut update = RecordUpdate::from_record(&r);
        update.actual_price = Some(0.0);
        update.wear = None;
        r.apply(update);
        assert_eq!(r.profit, None);
        assert_eq!(r.wear_grade, None);
    }

    #[test]
    fn test_apply_keeps_immutable_fields() {
        let mut r = Record::new(RecordId(3), sold(100.0, 130.0, 125.0));
        r.buy_platform = Some("BUFF".to_string());
        r.apply(RecordUpdate::default());
        assert_eq!(r.item_name, "AK-47 | Redline");
        assert_eq!(r.buy_platform.as_deref(), Some("BUFF"));
        assert_eq!(r.id, RecordId(3));
    }

    #[test]
    fn test_blank_platforms_are_absent() {
        let mut r = Record::new(
            RecordId(0),
            NewRecord {
                item_name: "P250".to_string(),
                buy_platform: Some(String::new()),
                sell_platform: Some(" ".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(r.buy_platform, None);
        assert_eq!(r.sell_platform, None);

        let mut update = RecordUpdate::from_record(&r);
        update.sell_platform = Some(String::new());
        r.apply(update);
        assert_eq!(r.sell_platform, None);
    }
}
