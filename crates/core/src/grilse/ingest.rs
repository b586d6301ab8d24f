//! Two-pass ingestion of uploaded grilse probability tables.
//!
//! The first row names the columns: exactly one `Weight` column and one or
//! more calendar months (full names or three-letter abbreviations, any
//! case). Each following row gives a whole-pound weight and, per month, the
//! probability that a fish of that weight is a grilse.
//!
//! Pass one checks the header row and pass two checks every data row. Each
//! pass collects all of its violations before failing, and pass two never
//! runs when pass one found anything.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::Month;
use indexmap::IndexMap;
use rust_decimal::Decimal;

use super::{ProbabilityRecord, TableErrorCode, TableViolation};
use crate::error::CoreError;
use crate::types::DbId;

/// Reserved header naming the weight column.
pub const WEIGHT_HEADER: &str = "weight";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Raw cells of an uploaded table, as read from delimited text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ParsedTable {
    /// Read comma-delimited text. Rows may have differing cell counts; that is
    /// reported later as a row defect rather than rejected here.
    pub fn read(input: &[u8]) -> Result<Self, CoreError> {
        let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let mut records = reader.records();
        let headers = match records.next() {
            Some(record) => cells(&record.map_err(unreadable)?),
            None => Vec::new(),
        };
        let rows = records
            .map(|record| record.map(|r| cells(&r)).map_err(unreadable))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { headers, rows })
    }
}

fn cells(record: &csv::StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

fn unreadable(err: csv::Error) -> CoreError {
    CoreError::Validation(format!("Unreadable table: {err}"))
}

/// Where each recognised column lives, produced by a clean header pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    /// Month number to 0-based column index, in header order.
    pub months: IndexMap<i32, usize>,
    /// 0-based index of the weight column.
    pub weight: usize,
    /// Number of header cells; every data row must have exactly this many.
    pub width: usize,
}

/// What a header cell names. Two cells naming the same thing are duplicates,
/// so `Jan` and `January` collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum HeaderKind {
    Weight,
    Month(i32),
    Other(String),
}

impl HeaderKind {
    fn of(header: &str) -> Self {
        let header = header.trim();
        if header.eq_ignore_ascii_case(WEIGHT_HEADER) {
            return Self::Weight;
        }
        match Month::from_str(header) {
            Ok(month) => Self::Month(month.number_from_month() as i32),
            Err(_) => Self::Other(header.to_lowercase()),
        }
    }
}

/// Pass one: map header cells to columns.
pub fn map_headers(headers: &[String]) -> Result<ColumnMap, Vec<TableViolation>> {
    let mut months = IndexMap::new();
    let mut weight = None;
    let mut seen = HashSet::new();
    let mut violations = Vec::new();

    for (index, header) in headers.iter().enumerate() {
        let column = index + 1;
        let kind = HeaderKind::of(header);
        match &kind {
            HeaderKind::Month(month) => {
                months.entry(*month).or_insert(index);
            }
            HeaderKind::Weight => {
                weight.get_or_insert(index);
            }
            HeaderKind::Other(_) => {
                violations.push(TableViolation::new(
                    TableErrorCode::ColumnDisallowed,
                    0,
                    column,
                ));
            }
        }
        if !seen.insert(kind) {
            violations.push(TableViolation::new(
                TableErrorCode::DuplicateHeaders,
                0,
                column,
            ));
        }
    }

    if weight.is_none() {
        violations.push(TableViolation::new(
            TableErrorCode::MissingWeightHeader,
            0,
            headers.len(),
        ));
    }
    if months.is_empty() {
        violations.push(TableViolation::new(
            TableErrorCode::MissingMonthHeader,
            0,
            headers.len(),
        ));
    }

    match weight {
        Some(weight) if violations.is_empty() => Ok(ColumnMap {
            months,
            weight,
            width: headers.len(),
        }),
        _ => Err(violations),
    }
}

/// Pass two: check every data row and build the sparse record list, sorted
/// by weight then month.
pub fn read_rows(
    rows: &[Vec<String>],
    columns: &ColumnMap,
    season: i32,
    gate_id: DbId,
) -> Result<Vec<ProbabilityRecord>, Vec<TableViolation>> {
    let header_count = columns.width;
    let mut records = Vec::new();
    let mut violations = Vec::new();
    let mut weights_seen = HashSet::new();

    for (index, cells) in rows.iter().enumerate() {
        let row = index + 1;

        if cells.len() != header_count {
            violations.push(TableViolation::new(
                TableErrorCode::RowHeaderDiscrepancy,
                row,
                header_count.min(cells.len()),
            ));
            continue;
        }

        let weight_column = columns.weight + 1;
        let mass_lbs = match parse_whole_number(&cells[columns.weight]) {
            Some(weight) => {
                if !weights_seen.insert(weight) {
                    violations.push(TableViolation::new(
                        TableErrorCode::DuplicateWeight,
                        row,
                        weight_column,
                    ));
                }
                weight
            }
            None => {
                violations.push(TableViolation::new(
                    TableErrorCode::NotWholeNumber,
                    row,
                    weight_column,
                ));
                0
            }
        };

        for (&month, &col) in &columns.months {
            match parse_probability(&cells[col]) {
                Some(probability) if is_probability_ratio(probability) => {
                    if probability > Decimal::ZERO {
                        records.push(ProbabilityRecord {
                            season,
                            gate_id,
                            month,
                            mass_lbs,
                            probability,
                        });
                    }
                }
                _ => violations.push(TableViolation::new(
                    TableErrorCode::InvalidProbability,
                    row,
                    col + 1,
                )),
            }
        }
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    records.sort_by_key(|r| (r.mass_lbs, r.month));
    Ok(records)
}

/// Validate and normalize an already-read table.
pub fn validate_table(
    table: &ParsedTable,
    season: i32,
    gate_id: DbId,
) -> Result<Vec<ProbabilityRecord>, Vec<TableViolation>> {
    let columns = map_headers(&table.headers)?;
    read_rows(&table.rows, &columns, season, gate_id)
}

/// Read, validate and normalize an uploaded table for `(season, gate)`.
pub fn ingest_table(
    input: &[u8],
    season: i32,
    gate_id: DbId,
) -> Result<Vec<ProbabilityRecord>, CoreError> {
    let table = ParsedTable::read(input)?;
    match validate_table(&table, season, gate_id) {
        Ok(records) => {
            tracing::debug!(
                season,
                gate_id,
                rows = table.rows.len(),
                records = records.len(),
                "Ingested grilse probability table",
            );
            Ok(records)
        }
        Err(violations) => {
            tracing::debug!(
                season,
                gate_id,
                violations = violations.len(),
                "Rejected grilse probability table",
            );
            Err(CoreError::InvalidTable(violations))
        }
    }
}

fn parse_whole_number(cell: &str) -> Option<i32> {
    if cell.is_empty() || !cell.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    cell.parse().ok()
}

/// Empty cells mean "no data", i.e. zero. Values that cannot be held
/// without rounding are rejected rather than rounded.
fn parse_probability(cell: &str) -> Option<Decimal> {
    if cell.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str_exact(cell)
        .ok()
        .or_else(|| parse_scientific_exact(cell))
}

/// Largest power of ten a decimal holds exactly.
const MAX_DECIMAL_EXPONENT: u32 = 28;

fn parse_scientific_exact(cell: &str) -> Option<Decimal> {
    let (mantissa, exponent) = cell.split_once(['e', 'E'])?;
    let mut value = Decimal::from_str_exact(mantissa).ok()?;
    let exponent: i32 = exponent.parse().ok()?;
    let magnitude = exponent.unsigned_abs();
    if magnitude > MAX_DECIMAL_EXPONENT {
        return None;
    }
    if exponent < 0 {
        value.set_scale(value.scale() + magnitude).ok()?;
        Some(value)
    } else {
        value.checked_mul(Decimal::from_i128_with_scale(10_i128.pow(magnitude), 0))
    }
}

fn is_probability_ratio(value: Decimal) -> bool {
    value >= Decimal::ZERO && value < Decimal::ONE
}
