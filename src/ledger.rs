use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{LedgerError, Result};
use crate::migrator::{migrate_wear_column, RawCell};
use crate::models::{Record, RecordId};

/// Canonical column order of the ledger file.
pub const COLUMNS: [&str; 11] = [
    "purchase_item",
    "purchase_platform",
    "wear",
    "wear_grade",
    "buy_price",
    "buy_date",
    "sell_price",
    "sell_platform",
    "sell_date",
    "actual_price",
    "profit",
];

// Headers used by earlier ledgers, same order as COLUMNS.
const LEGACY_COLUMNS: [&str; 11] = [
    "购买物品",
    "购买平台",
    "磨损",
    "磨损等级",
    "购入价格",
    "购入时间",
    "卖出价格",
    "卖出平台",
    "卖出时间",
    "实际到手价格",
    "毛利",
];

const COL_ITEM: usize = 0;
const COL_BUY_PLATFORM: usize = 1;
const COL_WEAR: usize = 2;
const COL_BUY_PRICE: usize = 4;
const COL_BUY_DATE: usize = 5;
const COL_SELL_PRICE: usize = 6;
const COL_SELL_PLATFORM: usize = 7;
const COL_SELL_DATE: usize = 8;
const COL_ACTUAL_PRICE: usize = 9;

const BOM: &[u8] = b"\xEF\xBB\xBF";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// ---------------------------------------------------------------------------
// Upload formats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UploadFormat {
    Csv,
    #[cfg(feature = "xlsx")]
    Xlsx,
}

impl UploadFormat {
    pub fn from_key(key: &str) -> Result<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            #[cfg(feature = "xlsx")]
            "xlsx" => Ok(Self::Xlsx),
            _ => Err(LedgerError::UnsupportedFormat(key.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| LedgerError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_key(ext)
            .map_err(|_| LedgerError::UnsupportedFormat(path.display().to_string()))
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

type RawTable = (Vec<String>, Vec<Vec<RawCell>>);

fn read_csv(bytes: &[u8]) -> Result<RawTable> {
    let bytes = bytes.strip_prefix(BOM).unwrap_or(bytes);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers = rdr
        .headers()
        .map_err(|e| LedgerError::Parse(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| LedgerError::Parse(e.to_string()))?;
        rows.push(record.iter().map(RawCell::from_text).collect());
    }
    Ok((headers, rows))
}

#[cfg(feature = "xlsx")]
fn read_xlsx(bytes: &[u8]) -> Result<RawTable> {
    use calamine::{Reader, Xlsx};

    let mut workbook: Xlsx<_> = Xlsx::new(std::io::Cursor::new(bytes.to_vec()))
        .map_err(|e| LedgerError::Parse(format!("Failed to open XLSX: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LedgerError::Parse("workbook has no sheets".to_string()))?
        .map_err(|e| LedgerError::Parse(format!("Failed to read sheet: {e}")))?;

    Ok(sheet_table(&range))
}

/// First row is the header; every later row is typed cell by cell.
#[cfg(feature = "xlsx")]
fn sheet_table(range: &calamine::Range<calamine::Data>) -> RawTable {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return (Vec::new(), Vec::new());
    };
    let headers = header_row.iter().map(|c| c.to_string().trim().to_string()).collect();
    let body = rows.map(|row| row.iter().map(xlsx_cell).collect()).collect();
    (headers, body)
}

#[cfg(feature = "xlsx")]
fn xlsx_cell(cell: &calamine::Data) -> RawCell {
    use calamine::Data;
    match cell {
        Data::Empty => RawCell::Empty,
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::String(s) | Data::DateTimeIso(s) => RawCell::from_text(s),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64())
            .map(RawCell::Date)
            .unwrap_or(RawCell::Other),
        _ => RawCell::Other,
    }
}

fn column_index(header: &str) -> Option<usize> {
    COLUMNS
        .iter()
        .position(|c| *c == header)
        .or_else(|| LEGACY_COLUMNS.iter().position(|c| *c == header))
}

/// Lay rows out in canonical column order. Unknown columns are dropped,
/// absent ones come back empty.
fn reindex(headers: &[String], rows: Vec<Vec<RawCell>>) -> Vec<Vec<RawCell>> {
    let mapping: Vec<Option<usize>> = headers.iter().map(|h| column_index(h)).collect();
    rows.into_iter()
        .map(|row| {
            let mut out = vec![RawCell::Empty; COLUMNS.len()];
            for (cell, target) in row.into_iter().zip(&mapping) {
                if let Some(idx) = target {
                    out[*idx] = cell;
                }
            }
            out
        })
        .collect()
}

// Serial of 9999-12-31, the last day a spreadsheet can hold.
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Convert a spreadsheet day serial to a date. Serials outside
/// `0..=MAX_EXCEL_SERIAL` are not dates and come back `None`.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !(0.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(chrono::Duration::try_days(serial.floor() as i64)?)
}

/// Coerce a cell into a date; anything unrecognised is `None`.
pub fn parse_date(cell: &RawCell) -> Option<NaiveDate> {
    match cell {
        RawCell::Date(d) => Some(*d),
        RawCell::Number(n) if n.is_finite() => excel_serial_to_date(*n),
        RawCell::Text(s) => {
            let s = s.trim();
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .or_else(|| {
                    DATETIME_FORMATS
                        .iter()
                        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                        .map(|dt| dt.date())
                })
        }
        _ => None,
    }
}

fn parse_number(cell: &RawCell) -> Option<f64> {
    let value = match cell {
        RawCell::Number(n) => *n,
        RawCell::Text(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (!value.is_nan()).then_some(value)
}

fn parse_text(cell: &RawCell) -> Option<String> {
    match cell {
        RawCell::Text(s) => Some(s.clone()),
        RawCell::Number(n) => Some(n.to_string()),
        RawCell::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        RawCell::Empty | RawCell::Other => None,
    }
}

/// Turn a raw table into records: reindex, migrate wear, type every
/// field, and derive grade and profit.
fn build_records(table: RawTable, first_id: u64) -> Vec<Record> {
    let (headers, rows) = table;
    let rows = reindex(&headers, rows);
    let wear_cells: Vec<RawCell> = rows.iter().map(|r| r[COL_WEAR].clone()).collect();
    let (wear, _) = migrate_wear_column(&wear_cells);

    rows.iter()
        .zip(wear)
        .enumerate()
        .map(|(i, (row, wear))| {
            let mut record = Record {
                id: RecordId(first_id + i as u64),
                item_name: parse_text(&row[COL_ITEM]).unwrap_or_default(),
                buy_platform: parse_text(&row[COL_BUY_PLATFORM]),
                wear,
                wear_grade: None,
                buy_price: parse_number(&row[COL_BUY_PRICE]),
                buy_date: parse_date(&row[COL_BUY_DATE]),
                sell_price: parse_number(&row[COL_SELL_PRICE]),
                sell_platform: parse_text(&row[COL_SELL_PLATFORM]),
                sell_date: parse_date(&row[COL_SELL_DATE]),
                actual_price: parse_number(&row[COL_ACTUAL_PRICE]),
                profit: None,
            };
            record.recompute();
            record
        })
        .collect()
}

/// Read the ledger file. A missing file is an empty ledger.
pub fn load(path: &Path) -> Result<Vec<Record>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no ledger file, starting empty");
        return Ok(Vec::new());
    }
    let bytes = std::fs::read(path)?;
    let records = build_records(read_csv(&bytes)?, 0);
    tracing::debug!(path = %path.display(), count = records.len(), "loaded ledger");
    Ok(records)
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

fn fmt_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn fmt_date(value: Option<NaiveDate>) -> String {
    value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn to_row(r: &Record) -> [String; 11] {
    [
        r.item_name.clone(),
        r.buy_platform.clone().unwrap_or_default(),
        fmt_number(r.wear),
        r.wear_grade.map(|g| g.label().to_string()).unwrap_or_default(),
        fmt_number(r.buy_price),
        fmt_date(r.buy_date),
        fmt_number(r.sell_price),
        r.sell_platform.clone().unwrap_or_default(),
        fmt_date(r.sell_date),
        fmt_number(r.actual_price),
        fmt_number(r.profit),
    ]
}

fn to_csv_bytes(records: &[Record]) -> Result<Vec<u8>> {
    let mut buf = BOM.to_vec();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        wtr.write_record(COLUMNS)?;
        for record in records {
            wtr.write_record(&to_row(record))?;
        }
        wtr.flush()?;
    }
    Ok(buf)
}

/// Overwrite `path` with the full collection, UTF-8 with BOM.
pub fn save(records: &[Record], path: &Path) -> Result<()> {
    let bytes = to_csv_bytes(records)?;
    let persist_err = |source: std::io::Error| LedgerError::Persist {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(persist_err)?;
    }
    std::fs::write(path, bytes).map_err(persist_err)?;
    tracing::debug!(path = %path.display(), count = records.len(), "saved ledger");
    Ok(())
}

// ---------------------------------------------------------------------------
// Ledger context
// ---------------------------------------------------------------------------

/// The open ledger: records in file order plus the file they live in.
pub struct Ledger {
    path: PathBuf,
    records: Vec<Record>,
    next_id: u64,
}

impl Ledger {
    pub fn open(path: &Path) -> Result<Self> {
        let records = load(path)?;
        let next_id = records.len() as u64;
        Ok(Self {
            path: path.to_path_buf(),
            records,
            next_id,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Id of the record currently shown at `index`.
    pub fn resolve(&self, index: usize) -> Result<RecordId> {
        self.records
            .get(index)
            .map(|r| r.id)
            .ok_or_else(|| LedgerError::NotFound(format!("index {index}")))
    }

    pub fn save(&self) -> Result<()> {
        save(&self.records, &self.path)
    }

    pub(crate) fn allocate_id(&mut self) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Apply a change and persist it. If either step fails the in-memory
    /// records are restored, so memory and disk stay in step.
    pub(crate) fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut Vec<Record>) -> Result<T>,
    ) -> Result<T> {
        let snapshot = self.records.clone();
        let outcome = change(&mut self.records).and_then(|value| {
            self.save()?;
            Ok(value)
        });
        if outcome.is_err() {
            self.records = snapshot;
        }
        outcome
    }

    /// Replace the ledger with an uploaded file. Nothing changes unless the
    /// file parses and the result is saved.
    pub fn load_from_upload(&mut self, bytes: &[u8], format: UploadFormat) -> Result<usize> {
        let table = match format {
            UploadFormat::Csv => read_csv(bytes)?,
            #[cfg(feature = "xlsx")]
            UploadFormat::Xlsx => read_xlsx(bytes)?,
        };
        let first_id = self.next_id;
        let incoming = build_records(table, first_id);
        let count = incoming.len();
        self.commit(|records| {
            *records = incoming;
            Ok(())
        })?;
        self.next_id = first_id + count as u64;
        tracing::info!(count, ?format, "imported ledger");
        Ok(count)
    }
}
