use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::grader::{grade, WearGrade};

/// A cell as read from a CSV or spreadsheet, before typing.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Other,
}

impl RawCell {
    pub fn from_text(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(raw.to_string())
        }
    }
}

fn leading_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9.]+").expect("static pattern"))
}

/// Extract a wear value from one legacy cell.
///
/// Text that is a whole number (`0.25`, `1e-05`, `-0.1`) is read as that
/// number, same as a numeric spreadsheet cell. Older ledgers also stored
/// composites such as `0.12 略有磨损`; those keep only their leading
/// `[0-9.]+` run. Anything that does not yield a number becomes `None`;
/// a bad cell never fails a load.
pub fn parse_wear_cell(cell: &RawCell) -> Option<f64> {
    match cell {
        RawCell::Number(n) if !n.is_nan() => Some(*n),
        RawCell::Text(s) => {
            let parsed = s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| !n.is_nan())
                .or_else(|| {
                    leading_number()
                        .find(s.trim_start())
                        .and_then(|m| m.as_str().parse::<f64>().ok())
                });
            if parsed.is_none() {
                tracing::debug!(cell = %s, "unparseable legacy wear value");
            }
            parsed
        }
        _ => None,
    }
}

/// Split a raw wear column into clean wear values and their grades.
///
/// Idempotent: feeding the cleaned values back in yields the same output.
pub fn migrate_wear_column(cells: &[RawCell]) -> (Vec<Option<f64>>, Vec<Option<WearGrade>>) {
    let wear: Vec<Option<f64>> = cells.iter().map(parse_wear_cell).collect();
    let grades = wear.iter().map(|w| grade(*w)).collect();
    (wear, grades)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawCell {
        RawCell::Text(s.to_string())
    }

    #[test]
    fn test_composite_cell_keeps_leading_number() {
        assert_eq!(parse_wear_cell(&text("0.12 xxx")), Some(0.12));
        assert_eq!(parse_wear_cell(&text("0.2543久经沙场")), Some(0.2543));
        assert_eq!(parse_wear_cell(&text("0.05")), Some(0.05));
    }

    #[test]
    fn test_plain_numeric_text_is_read_whole() {
        // Exponent notation must not be cut down to its leading digit.
        assert_eq!(parse_wear_cell(&text("1e-05")), Some(1e-5));
        assert_eq!(parse_wear_cell(&text(" 0.4 ")), Some(0.4));
        assert_eq!(parse_wear_cell(&text("-0.1")), Some(-0.1));
        let (_, grades) = migrate_wear_column(&[text("1e-05"), text("2.5E-1")]);
        assert_eq!(grades, vec![Some(WearGrade::FactoryNew), Some(WearGrade::FieldTested)]);
    }

    #[test]
    fn test_unparseable_cells_become_absent() {
        assert_eq!(parse_wear_cell(&text("abc")), None);
        assert_eq!(parse_wear_cell(&text("nan")), None);
        assert_eq!(parse_wear_cell(&text("0.1.2")), None);
        assert_eq!(parse_wear_cell(&text(".")), None);
        assert_eq!(parse_wear_cell(&RawCell::Empty), None);
        assert_eq!(parse_wear_cell(&RawCell::Other), None);
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(parse_wear_cell(&RawCell::Date(d)), None);
    }

    #[test]
    fn test_numeric_cells_pass_through() {
        assert_eq!(parse_wear_cell(&RawCell::Number(0.33)), Some(0.33));
        assert_eq!(parse_wear_cell(&RawCell::Number(f64::NAN)), None);
    }

    #[test]
    fn test_abc_has_empty_grade() {
        let (wear, grades) = migrate_wear_column(&[text("abc")]);
        assert_eq!(wear, vec![None]);
        assert_eq!(grades, vec![None]);
    }

    #[test]
    fn test_migrate_aligns_columns() {
        let cells = vec![
            text("0.12 略有磨损"),
            RawCell::Number(0.5),
            RawCell::Empty,
            text("0.03"),
        ];
        let (wear, grades) = migrate_wear_column(&cells);
        assert_eq!(wear, vec![Some(0.12), Some(0.5), None, Some(0.03)]);
        assert_eq!(
            grades,
            vec![
                Some(WearGrade::MinimalWear),
                Some(WearGrade::BattleScarred),
                None,
                Some(WearGrade::FactoryNew),
            ]
        );
    }

    #[test]
    fn test_migration_is_idempotent() {
        let cells = vec![
            text("0.12 well-worn"),
            text("abc"),
            RawCell::Number(0.39),
            RawCell::Empty,
            text("0.07"),
            text("3e-4"),
        ];
        let first = migrate_wear_column(&cells);
        let cleaned: Vec<RawCell> = first
            .0
            .iter()
            .map(|w| w.map(RawCell::Number).unwrap_or(RawCell::Empty))
            .collect();
        assert_eq!(migrate_wear_column(&cleaned), first);

        // Same again through the text path, as happens on a CSV reload.
        let as_text: Vec<RawCell> = first
            .0
            .iter()
            .map(|w| w.map(|v| RawCell::Text(v.to_string())).unwrap_or(RawCell::Empty))
            .collect();
        assert_eq!(migrate_wear_column(&as_text), first);
    }
}
