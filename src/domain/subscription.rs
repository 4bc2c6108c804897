use crate::adapters::csv_entry::{CsvEntry, DEFAULT_DELIMITER};
use crate::domain::model::{format_date, parse_date, RecordKind};
use crate::domain::person::MAX_DOCUMENT;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_max_length, validate_non_empty_string, validate_range};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SUBSCRIPTION_FIELDS: usize = 7;
pub const MAX_PLAN: usize = 250;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: u32,
    pub document: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub plan: String,
    pub price: f32,
    pub num_devices: u32,
}

impl Subscription {
    pub fn parse(entry: &CsvEntry) -> Result<Self> {
        entry.expect_kind(RecordKind::Subscription)?;
        entry.expect_fields(SUBSCRIPTION_FIELDS)?;

        let raw_id = entry.integer_field(0, "id")?;
        let id = u32::try_from(raw_id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| CatalogError::invalid_format("id", raw_id.to_string(), "Value must be a positive integer"))?;

        let document = entry.field(1)?;
        validate_non_empty_string("document", document)?;
        validate_max_length("document", document, MAX_DOCUMENT)?;

        let start_date = parse_date("start_date", entry.field(2)?)?;
        let end_date = parse_date("end_date", entry.field(3)?)?;
        if end_date < start_date {
            return Err(CatalogError::invalid_format(
                "end_date",
                format_date(end_date),
                "End date is before the start date",
            ));
        }

        let plan = entry.field(4)?;
        validate_non_empty_string("plan", plan)?;
        validate_max_length("plan", plan, MAX_PLAN)?;

        let price = entry.real_field(5, "price")? as f32;
        validate_range("price", price, 0.0, f32::MAX)?;

        let raw_devices = entry.integer_field(6, "num_devices")?;
        let num_devices = u32::try_from(raw_devices)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| {
                CatalogError::invalid_format("num_devices", raw_devices.to_string(), "Value must be at least 1")
            })?;

        Ok(Self {
            id,
            document: document.to_string(),
            start_date,
            end_date,
            plan: plan.to_string(),
            price,
            num_devices,
        })
    }

    /// Whole prices print without decimals, anything else with two.
    pub fn formatted_price(&self) -> String {
        if self.price.fract() == 0.0 {
            format!("{}", self.price as i64)
        } else {
            format!("{:.2}", self.price)
        }
    }

    pub fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.document.clone(),
            format_date(self.start_date),
            format_date(self.end_date),
            self.plan.clone(),
            self.formatted_price(),
            self.num_devices.to_string(),
        ]
    }

    pub fn to_entry(&self) -> CsvEntry {
        CsvEntry::new(RecordKind::Subscription.tag(), self.fields())
    }
}

impl fmt::Display for Subscription {
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

    fn parse(line: &str) -> Result<Subscription> {
        let entry = CsvEntry::parse_line(line, DEFAULT_DELIMITER).unwrap().unwrap();
        Subscription::parse(&entry)
    }

    #[test]
    fn test_parse_subscription() {
        let sub = parse("SUBSCRIPTION;1;98765432J;01/01/2025;31/12/2025;Premium;29.95;3").unwrap();

        assert_eq!(sub.id, 1);
        assert_eq!(sub.plan, "Premium");
        assert_eq!(sub.num_devices, 3);
        assert_eq!(sub.to_string(), "1;98765432J;01/01/2025;31/12/2025;Premium;29.95;3");
    }

    #[test]
    fn test_whole_price_renders_without_decimals() {
        let sub = parse("SUBSCRIPTION;2;98765432J;01/01/2025;31/12/2025;Free;0;1").unwrap();
        assert_eq!(sub.formatted_price(), "0");

        let sub = parse("SUBSCRIPTION;3;98765432J;01/01/2025;31/12/2025;Standard;10.0;2").unwrap();
        assert_eq!(sub.formatted_price(), "10");
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(parse("SUBSCRIPTION;0;98765432J;01/01/2025;31/12/2025;Premium;29.95;3").is_err());
        assert!(parse("SUBSCRIPTION;1;98765432J;01/01/2025;31/12/2024;Premium;29.95;3").is_err());
        assert!(parse("SUBSCRIPTION;1;98765432J;01/01/2025;31/12/2025;Premium;-1;3").is_err());
        assert!(parse("SUBSCRIPTION;1;98765432J;01/01/2025;31/12/2025;Premium;29.95;0").is_err());
        assert!(parse("SUBSCRIPTION;1;98765432J;01/01/2025;31/12/2025;;29.95;3").is_err());
    }
}
