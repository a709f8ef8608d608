//! Tabular input for the importer.
//!
//! A [`Sheet`] is a header row plus data rows, every cell already reduced to its text
//! form. Absent cells carry the missing-value marker `nan` rather than an `Option`, so
//! that a cell literally containing "NaN" is treated exactly like an empty one.

use crate::errors::{Error, Result};
use calamine::{Data, Reader};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

/// Text standing in for an absent cell
pub const MISSING_VALUE_MARKER: &str = "nan";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Returns true when `text` is the missing-value marker, ignoring ASCII case.
#[must_use]
pub fn is_missing(text: &str) -> bool {
    text.eq_ignore_ascii_case(MISSING_VALUE_MARKER)
}

/// A parsed table: unique column labels and rows padded to the header width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Builds a sheet from a raw header and rows.
    ///
    /// Blank header cells become `Unnamed: {index}` and repeated names get a `.{n}`
    /// suffix. Rows are padded with the missing-value marker (or cut) to the header width.
    #[must_use]
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let columns = label_columns(header);
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, MISSING_VALUE_MARKER.to_string());
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Column labels, in file order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows, each exactly `columns().len()` cells wide
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Parses an uploaded file, choosing the reader from the file extension.
    ///
    /// # Errors
    /// `UnsupportedFile` for unknown extensions, `EmptySheet` when there is no header
    /// row, `SheetParse` when the bytes are not a readable workbook or CSV.
    pub fn from_upload(file_name: &str, bytes: &[u8]) -> Result<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Self::from_csv(bytes),
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Self::from_workbook(bytes),
            _ => Err(Error::UnsupportedFile {
                file_name: file_name.to_string(),
            }),
        }
    }

    /// Reads the first worksheet of an Excel or `OpenDocument` workbook.
    ///
    /// Columns left of the used range are kept as blank columns, so column A is always
    /// the product-name column even when it is empty.
    pub fn from_workbook(bytes: &[u8]) -> Result<Self> {
        let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let range = workbook.worksheet_range_at(0).ok_or(Error::EmptySheet)??;
        let offset = range.start().map_or(0, |(_, column)| column as usize);

        let mut rows = range.rows();
        let header_cells = rows.next().ok_or(Error::EmptySheet)?;
        let body: Vec<&[Data]> = rows.collect();
        let float_columns = float_columns(&body, header_cells.len());

        let header: Vec<String> = std::iter::repeat_n(String::new(), offset)
            .chain(header_cells.iter().map(|cell| match cell {
                Data::Empty => String::new(),
                other => cell_text(other, false),
            }))
            .collect();
        let rows: Vec<Vec<String>> = body
            .iter()
            .map(|row| {
                std::iter::repeat_n(MISSING_VALUE_MARKER.to_string(), offset)
                    .chain(
                        row.iter()
                            .zip(&float_columns)
                            .map(|(cell, &as_float)| cell_text(cell, as_float)),
                    )
                    .collect()
            })
            .collect();

        tracing::debug!(
            "Read workbook sheet with {} columns and {} rows",
            header.len(),
            rows.len()
        );
        Ok(Self::new(header, rows))
    }

    /// Reads comma-separated text whose first record is the header.
    pub fn from_csv(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes);

        let header: Vec<String> = reader.headers()?.iter().map(ToString::to_string).collect();
        if header.is_empty() {
            return Err(Error::EmptySheet);
        }

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > header.len() {
                return Err(Error::SheetParse {
                    message: format!(
                        "row {} has {} fields, expected {}",
                        index + 2,
                        record.len(),
                        header.len()
                    ),
                });
            }
            rows.push(
                record
                    .iter()
                    .map(|field| {
                        if field.is_empty() {
                            MISSING_VALUE_MARKER.to_string()
                        } else {
                            field.to_string()
                        }
                    })
                    .collect(),
            );
        }

        tracing::debug!(
            "Read CSV with {} columns and {} rows",
            header.len(),
            rows.len()
        );
        Ok(Self::new(header, rows))
    }
}

fn label_columns(raw: Vec<String>) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut labels = Vec::with_capacity(raw.len());

    for (index, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {index}")
        } else {
            name
        };

        let mut label = base.clone();
        let mut suffix = 0;
        while taken.contains(&label) {
            suffix += 1;
            label = format!("{base}.{suffix}");
        }
        taken.insert(label.clone());
        labels.push(label);
    }

    labels
}

// A numeric column holding any blank or fractional cell is a float column: its whole
// numbers keep one decimal ("3.0"). Otherwise whole numbers read back as integers ("3").
fn float_columns(rows: &[&[Data]], width: usize) -> Vec<bool> {
    (0..width)
        .map(|column| {
            let mut numeric = false;
            let mut blank = false;
            let mut fractional = false;
            for cell in rows.iter().filter_map(|row| row.get(column)) {
                match cell {
                    Data::Int(_) => numeric = true,
                    Data::Float(f) => {
                        numeric = true;
                        fractional |= !is_whole(*f);
                    }
                    Data::Empty | Data::Error(_) => blank = true,
                    Data::String(s) if s.is_empty() => blank = true,
                    _ => return false,
                }
            }
            numeric && (blank || fractional)
        })
        .collect()
}

fn cell_text(cell: &Data, as_float: bool) -> String {
    match cell {
        Data::Empty | Data::Error(_) => MISSING_VALUE_MARKER.to_string(),
        Data::String(s) if s.is_empty() => MISSING_VALUE_MARKER.to_string(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) if as_float => format!("{i}.0"),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => float_text(*f, as_float),
        Data::Bool(b) => (if *b { "True" } else { "False" }).to_string(),
        Data::DateTime(dt) => excel_serial_text(dt.as_f64()),
    }
}

fn is_whole(value: f64) -> bool {
    value.is_finite() && value.fract().abs() < f64::EPSILON && value.abs() < 1e15
}

#[allow(clippy::cast_possible_truncation)]
fn float_text(value: f64, as_float: bool) -> String {
    match (is_whole(value), as_float) {
        (true, true) => format!("{value:.1}"),
        (true, false) => (value as i64).to_string(),
        _ => value.to_string(),
    }
}

// Excel serials count days from 1899-12-30 (1900 date system).
#[allow(clippy::cast_possible_truncation)]
fn excel_serial_text(serial: f64) -> String {
    let millis = (serial * 86_400_000.0).round() as i64;
    chrono::NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .zip(chrono::TimeDelta::try_milliseconds(millis))
        .and_then(|(epoch, offset)| epoch.checked_add_signed(offset))
        .map_or_else(
            || float_text(serial, true),
            |datetime| datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        )
}
