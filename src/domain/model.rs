use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::validate_exact_length;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const DATE_LENGTH: usize = 10;
pub const TIME_LENGTH: usize = 5;

/// Record kinds accepted in the input file, keyed by their leading tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Person,
    Subscription,
    Film,
}

impl RecordKind {
    pub fn tag(self) -> &'static str {
        match self {
            RecordKind::Person => "PERSON",
            RecordKind::Subscription => "SUBSCRIPTION",
            RecordKind::Film => "FILM",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "PERSON" => Some(RecordKind::Person),
            "SUBSCRIPTION" => Some(RecordKind::Subscription),
            "FILM" => Some(RecordKind::Film),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Person => "person",
            RecordKind::Subscription => "subscription",
            RecordKind::Film => "film",
        };
        f.write_str(name)
    }
}

/// Film categories. The discriminant is the numeric code used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Genre {
    Action = 0,
    Adventure = 1,
    Animation = 2,
    Comedy = 3,
    Documentary = 4,
    Drama = 5,
    Fantasy = 6,
    Horror = 7,
    Romance = 8,
    ScienceFiction = 9,
    Thriller = 10,
}

impl Genre {
    pub const ALL: [Genre; 11] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Comedy,
        Genre::Documentary,
        Genre::Drama,
        Genre::Fantasy,
        Genre::Horror,
        Genre::Romance,
        Genre::ScienceFiction,
        Genre::Thriller,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: i64) -> Result<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Genre::ALL.get(idx).copied())
            .ok_or_else(|| {
                CatalogError::invalid_format(
                    "genre",
                    code.to_string(),
                    format!("Value must be between 0 and {}", Genre::ALL.len() - 1),
                )
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Comedy => "Comedy",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Romance => "Romance",
            Genre::ScienceFiction => "Science fiction",
            Genre::Thriller => "Thriller",
        }
    }
}

/// Running time in hours and minutes, written `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runtime {
    pub hours: u32,
    pub minutes: u32,
}

impl Runtime {
    pub const MAX_HOURS: u32 = 99;

    pub fn new(hours: u32, minutes: u32) -> Result<Self> {
        if hours > Self::MAX_HOURS || minutes >= 60 {
            return Err(CatalogError::invalid_format(
                "duration",
                format!("{}:{}", hours, minutes),
                "hours must be below 100 and minutes below 60",
            ));
        }
        Ok(Self { hours, minutes })
    }
}

impl FromStr for Runtime {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        validate_exact_length("duration", s, TIME_LENGTH)?;
        let invalid = || CatalogError::invalid_format("duration", s, "expected HH:MM");

        let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;
        if hours.len() != 2 || !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hours = hours.parse().map_err(|_| invalid())?;
        let minutes = minutes.parse().map_err(|_| invalid())?;
        Self::new(hours, minutes)
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

pub fn parse_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    validate_exact_length(field_name, value, DATE_LENGTH)?;
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| CatalogError::invalid_format(field_name, value, e.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
