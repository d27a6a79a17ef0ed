//! Addressable cell grids: the raw tabular input before it becomes a [`Hierarchy`].
//!
//! Columns and rows use spreadsheet conventions: columns are letters (`A`, `N`,
//! `AB`), rows start at 1.
//!
//! [`Hierarchy`]: crate::domain::model::Hierarchy

use crate::domain::ports::CellGrid;
use crate::utils::error::{ReconError, Result};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static CELL_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$?([A-Za-z]{1,3})\$?([1-9][0-9]*)$").unwrap());

/// Zero-based column index, written as letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Column(u32);

impl Column {
    pub fn from_index(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

impl FromStr for Column {
    type Err = ReconError;

    fn from_str(s: &str) -> Result<Self> {
        let letters = s.trim();
        if letters.is_empty() || letters.len() > 3 || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ReconError::InvalidColumn {
                value: s.to_string(),
            });
        }

        let number = letters
            .chars()
            .fold(0u32, |acc, c| acc * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1));
        Ok(Self(number - 1))
    }
}

impl TryFrom<String> for Column {
    type Error = ReconError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Column> for String {
    fn from(column: Column) -> Self {
        column.to_string()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut n = self.0 + 1;
        let mut letters = Vec::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        let text: String = letters.into_iter().rev().collect();
        write!(f, "{}", text)
    }
}

/// One cell position, e.g. `C3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub column: Column,
    pub row: u32,
}

impl CellAddress {
    pub fn new(column: Column, row: u32) -> Self {
        Self { column, row }
    }
}

impl FromStr for CellAddress {
    type Err = ReconError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = CELL_ADDRESS
            .captures(s.trim())
            .ok_or_else(|| ReconError::InvalidRange {
                value: s.to_string(),
            })?;
        let column = caps[1].parse()?;
        let row = caps[2].parse().map_err(|_| ReconError::InvalidRange {
            value: s.to_string(),
        })?;
        Ok(Self { column, row })
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

/// Rectangular occupied range, e.g. `A1:N500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl SheetRange {
    pub fn last_row(&self) -> u32 {
        self.end.row
    }

    fn include(&mut self, address: CellAddress) {
        self.start.row = self.start.row.min(address.row);
        self.start.column = self.start.column.min(address.column);
        self.end.row = self.end.row.max(address.row);
        self.end.column = self.end.column.max(address.column);
    }
}

impl FromStr for SheetRange {
    type Err = ReconError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((start, end)) => Ok(Self {
                start: start.parse()?,
                end: end.parse()?,
            }),
            None => {
                let single: CellAddress = s.parse()?;
                Ok(Self {
                    start: single,
                    end: single,
                })
            }
        }
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// A single named sheet. Empty strings are never stored; an unset cell and an
/// empty cell read the same.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    cells: HashMap<CellAddress, String>,
    used: Option<SheetRange>,
    declared: Option<SheetRange>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builds a sheet from rows of values laid out from column `A`, the first
    /// slice landing on `first_row`.
    pub fn from_rows(name: impl Into<String>, first_row: u32, rows: &[&[&str]]) -> Self {
        let mut sheet = Self::new(name);
        for (offset, values) in rows.iter().enumerate() {
            let row = first_row + offset as u32;
            for (col, value) in values.iter().enumerate() {
                sheet.set_value(CellAddress::new(Column::from_index(col as u32), row), *value);
            }
        }
        sheet
    }

    /// Overrides the range computed from the stored cells, like a workbook's
    /// own dimension record does.
    pub fn with_declared_range(mut self, range: SheetRange) -> Self {
        self.declared = Some(range);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_value(&mut self, address: CellAddress, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&address);
            return;
        }

        match self.used.as_mut() {
            Some(range) => range.include(address),
            None => {
                self.used = Some(SheetRange {
                    start: address,
                    end: address,
                })
            }
        }
        self.cells.insert(address, value);
    }

    /// Sets a cell by its A1-style address.
    pub fn set(&mut self, address: &str, value: impl Into<String>) -> Result<()> {
        self.set_value(address.parse()?, value);
        Ok(())
    }

    pub fn value(&self, address: CellAddress) -> Option<&str> {
        self.cells.get(&address).map(String::as_str)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl CellGrid for Sheet {
    fn occupied_range(&self) -> Option<SheetRange> {
        self.declared.or(self.used)
    }

    fn cell(&self, column: Column, row: u32) -> Option<&str> {
        self.value(CellAddress::new(column, row))
    }
}

/// Sheets keyed by name, in workbook order.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: IndexMap<String, Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sheet: Sheet) {
        self.sheets.insert(sheet.name().to_string(), sheet);
    }

    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.insert(sheet);
        self
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
