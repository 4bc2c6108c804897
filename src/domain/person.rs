use crate::adapters::csv_entry::{CsvEntry, DEFAULT_DELIMITER};
use crate::domain::model::{format_date, parse_date, RecordKind};
use crate::utils::error::Result;
use crate::utils::validation::{validate_max_length, validate_non_empty_string};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PERSON_FIELDS: usize = 8;
pub const MAX_DOCUMENT: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub document: String,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub postal_code: String,
    pub birthday: NaiveDate,
}

impl Person {
    pub fn parse(entry: &CsvEntry) -> Result<Self> {
        entry.expect_kind(RecordKind::Person)?;
        entry.expect_fields(PERSON_FIELDS)?;

        let document = entry.field(0)?;
        validate_non_empty_string("document", document)?;
        validate_max_length("document", document, MAX_DOCUMENT)?;

        let name = entry.field(1)?;
        validate_non_empty_string("name", name)?;

        Ok(Self {
            document: document.to_string(),
            name: name.to_string(),
            surname: entry.field(2)?.to_string(),
            phone: entry.field(3)?.to_string(),
            email: entry.field(4)?.to_string(),
            address: entry.field(5)?.to_string(),
            postal_code: entry.field(6)?.to_string(),
            birthday: parse_date("birthday", entry.field(7)?)?,
        })
    }

    pub fn fields(&self) -> Vec<String> {
        vec![
            self.document.clone(),
            self.name.clone(),
            self.surname.clone(),
            self.phone.clone(),
            self.email.clone(),
            self.address.clone(),
            self.postal_code.clone(),
            format_date(self.birthday),
        ]
    }

    pub fn to_entry(&self) -> CsvEntry {
        CsvEntry::new(RecordKind::Person.tag(), self.fields())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self
            .to_entry()
            .fields_line(DEFAULT_DELIMITER)
            .map_err(|_| fmt::Error)?;
        f.write_str(&line)
    }
}
