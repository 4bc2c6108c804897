use crate::adapters::csv_entry::{CsvEntry, DEFAULT_DELIMITER};
use crate::domain::model::{format_date, parse_date, Genre, RecordKind, Runtime};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FILM_FIELDS: usize = 6;
pub const RATING_MIN: f32 = 0.0;
pub const RATING_MAX: f32 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub name: String,
    pub duration: Runtime,
    pub genre: Genre,
    pub release: NaiveDate,
    pub rating: f32,
    pub is_free: bool,
}

impl Film {
    pub fn new(
        name: impl Into<String>,
        duration: Runtime,
        genre: Genre,
        release: NaiveDate,
        rating: f32,
        is_free: bool,
    ) -> Result<Self> {
        let name = name.into();
        validate_non_empty_string("name", &name)?;
        validate_range("rating", rating, RATING_MIN, RATING_MAX)?;
        // Ratings keep one decimal, the precision they are written with.
        let rating = (rating * 10.0).round() / 10.0;

        Ok(Self {
            name,
            duration,
            genre,
            release,
            rating,
            is_free,
        })
    }

    /// Builds a film from a `FILM` entry, checking every field before anything is kept.
    pub fn parse(entry: &CsvEntry) -> Result<Self> {
        entry.expect_kind(RecordKind::Film)?;
        entry.expect_fields(FILM_FIELDS)?;

        let name = entry.field(0)?;
        let duration: Runtime = entry.field(1)?.parse()?;
        let genre = Genre::from_code(entry.integer_field(2, "genre")?)?;
        let release = parse_date("release", entry.field(3)?)?;
        let rating = entry.real_field(4, "rating")? as f32;
        let is_free = match entry.integer_field(5, "is_free")? {
            0 => false,
            1 => true,
            other => {
                return Err(CatalogError::invalid_format(
                    "is_free",
                    other.to_string(),
                    "Value must be 0 or 1",
                ))
            }
        };

        Self::new(name, duration, genre, release, rating, is_free)
    }

    pub fn fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.duration.to_string(),
            self.genre.code().to_string(),
            format_date(self.release),
            format!("{:.1}", self.rating),
            u8::from(self.is_free).to_string(),
        ]
    }

    pub fn to_entry(&self) -> CsvEntry {
        CsvEntry::new(RecordKind::Film.tag(), self.fields())
    }
}

/// `name;HH:MM;genre;DD/MM/YYYY;rating;isFree`
impl fmt::Display for Film {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self
            .to_entry()
            .fields_line(DEFAULT_DELIMITER)
            .map_err(|_| fmt::Error)?;
        f.write_str(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(line: &str) -> CsvEntry {
        CsvEntry::parse_line(line, DEFAULT_DELIMITER).unwrap().unwrap()
    }

    #[test]
    fn test_parse_film_entry() {
        let film = Film::parse(&entry("FILM;Alpha;01:30;5;01/01/2020;7.5;1")).unwrap();

        assert_eq!(film.name, "Alpha");
        assert_eq!(film.duration, Runtime::new(1, 30).unwrap());
        assert_eq!(film.genre, Genre::Drama);
        assert_eq!(film.release, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(film.rating, 7.5);
        assert!(film.is_free);
    }

    #[test]
    fn test_render_format() {
        let film = Film::new(
            "Beta",
            Runtime::new(2, 0).unwrap(),
            Genre::Comedy,
            NaiveDate::from_ymd_opt(2021, 2, 2).unwrap(),
            8.0,
            false,
        )
        .unwrap();

        assert_eq!(film.to_string(), "Beta;02:00;3;02/02/2021;8.0;0");
    }

    #[test]
    fn test_render_then_parse_yields_equal_film() {
        let film = Film::new(
            "Gamma",
            Runtime::new(1, 45).unwrap(),
            Genre::ScienceFiction,
            NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
            6.5,
            true,
        )
        .unwrap();

        let reparsed = Film::parse(&entry(&format!("FILM;{}", film))).unwrap();
        assert_eq!(reparsed, film);
    }

    #[test]
    fn test_rating_is_kept_to_one_decimal() {
        let film = Film::new(
            "Delta",
            Runtime::new(1, 0).unwrap(),
            Genre::Drama,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            7.25,
            false,
        )
        .unwrap();

        assert_eq!(film.to_string(), "Delta;01:00;5;01/01/2020;7.3;0");
        let reparsed = Film::parse(&entry(&format!("FILM;{}", film))).unwrap();
        assert_eq!(reparsed, film);

        let loaded = Film::parse(&entry("FILM;Delta;01:00;5;01/01/2020;7.25;0")).unwrap();
        assert_eq!(loaded, film);
    }

    #[test]
    fn test_name_with_delimiter_round_trips() {
        let film = Film::new(
            "A;B",
            Runtime::new(1, 0).unwrap(),
            Genre::Drama,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            7.5,
            true,
        )
        .unwrap();

        assert_eq!(film.to_string(), "\"A;B\";01:00;5;01/01/2020;7.5;1");
        let reparsed = Film::parse(&entry(&format!("FILM;{}", film))).unwrap();
        assert_eq!(reparsed, film);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(Film::parse(&entry("FILM;Alpha;01:30;5;01/01/2020;10.5;1")).is_err());
        assert!(Film::parse(&entry("FILM;Alpha;01:30;11;01/01/2020;7.5;1")).is_err());
        assert!(Film::parse(&entry("FILM;Alpha;01:30;5;01/01/2020;7.5;2")).is_err());
        assert!(Film::parse(&entry("FILM;Alpha;1:30;5;01/01/2020;7.5;1")).is_err());
        assert!(Film::parse(&entry("FILM; ;01:30;5;01/01/2020;7.5;1")).is_err());
    }

    #[test]
    fn test_rejects_wrong_shape() {
        assert!(matches!(
            Film::parse(&entry("FILM;Alpha;01:30;5;01/01/2020;7.5")),
            Err(CatalogError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Film::parse(&entry("PERSON;Alpha;01:30;5;01/01/2020;7.5;1")),
            Err(CatalogError::InvalidEntryType(_))
        ));
    }
}
