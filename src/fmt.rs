use chrono::NaiveDate;

use crate::grader::WearGrade;

const PLACEHOLDER: &str = "\u{2014}";

/// Yuan amount rounded to the fen, grouped in thousands: `¥1,234.56`.
pub fn money(val: f64) -> String {
    let fen = (val.abs() * 100.0).round() as u64;
    let sign = if val < 0.0 && fen > 0 { "-" } else { "" };
    format!("{sign}¥{}.{:02}", group_thousands(fen / 100), fen % 100)
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = vec![];
    while n >= 1000 {
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.push(n.to_string());
    groups.reverse();
    groups.join(",")
}

pub fn opt_money(val: Option<f64>) -> String {
    val.map(money).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Wear to three places with its grade, e.g. `0.123（略有磨损）`.
pub fn wear(val: Option<f64>, grade: Option<WearGrade>) -> String {
    match (val, grade) {
        (Some(w), Some(g)) => format!("{w:.3}（{g}）"),
        (Some(w), None) => format!("{w:.3}"),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn date(val: Option<NaiveDate>) -> String {
    val.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn text(val: Option<&str>) -> String {
    match val {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}
