use crate::domain::model::RecordKind;
use crate::utils::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DELIMITER: u8 = b';';

/// One tokenized input line: a kind tag followed by the record's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvEntry {
    pub kind: String,
    pub fields: Vec<String>,
}

impl CsvEntry {
    pub fn new(kind: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            kind: kind.into(),
            fields,
        }
    }

    /// Tokenizes a single line. Blank lines yield `None`.
    pub fn parse_line(line: &str, delimiter: u8) -> Result<Option<Self>> {
        let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
        if line.trim().is_empty() {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(line.as_bytes());

        let mut record = csv::StringRecord::new();
        if !reader.read_record(&mut record)? {
            return Ok(None);
        }

        let mut tokens = record.iter().map(str::to_string);
        let kind = tokens.next().unwrap_or_default();
        Ok(Some(Self {
            kind,
            fields: tokens.collect(),
        }))
    }

    /// Writes the entry back as one delimited line, quoting fields where needed.
    pub fn to_line(&self, delimiter: u8) -> Result<String> {
        let tokens = std::iter::once(self.kind.as_str()).chain(self.fields.iter().map(String::as_str));
        write_record(tokens, delimiter)
    }

    /// Like [`CsvEntry::to_line`] without the kind tag.
    pub fn fields_line(&self, delimiter: u8) -> Result<String> {
        write_record(self.fields.iter().map(String::as_str), delimiter)
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn record_kind(&self) -> Option<RecordKind> {
        RecordKind::from_tag(&self.kind)
    }

    /// Fails with `InvalidEntryType` unless the tag matches `kind`.
    pub fn expect_kind(&self, kind: RecordKind) -> Result<()> {
        if self.kind != kind.tag() {
            return Err(CatalogError::InvalidEntryType(self.kind.clone()));
        }
        Ok(())
    }

    pub fn expect_fields(&self, count: usize) -> Result<()> {
        if self.fields.len() != count {
            return Err(CatalogError::invalid_format(
                "entry",
                self.kind.clone(),
                format!("expected {} fields, found {}", count, self.fields.len()),
            ));
        }
        Ok(())
    }

    pub fn field(&self, pos: usize) -> Result<&str> {
        self.fields.get(pos).map(String::as_str).ok_or_else(|| {
            CatalogError::invalid_format("entry", self.kind.clone(), format!("missing field {}", pos))
        })
    }

    pub fn integer_field(&self, pos: usize, name: &str) -> Result<i64> {
        let raw = self.field(pos)?;
        raw.trim()
            .parse::<i64>()
            .map_err(|e| CatalogError::invalid_format(name, raw, e.to_string()))
    }

    pub fn real_field(&self, pos: usize, name: &str) -> Result<f64> {
        let raw = self.field(pos)?;
        raw.trim()
            .parse::<f64>()
            .map_err(|e| CatalogError::invalid_format(name, raw, e.to_string()))
    }
}

fn write_record<'a>(tokens: impl Iterator<Item = &'a str>, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(tokens)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| CatalogError::IoError(e.into_error()))?;
    let line = String::from_utf8(bytes)
        .map_err(|e| CatalogError::invalid_format("entry", "<line>", e.to_string()))?;

    Ok(line.trim_end_matches(|c| c == '\r' || c == '\n').to_string())
}
