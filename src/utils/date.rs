use chrono::NaiveDate;
use crate::core::library::{LibraryError, LibraryResult};

pub const DATE_FMT: &str = "%Y-%m-%d";

// Parses an ISO calendar date (YYYY-MM-DD) from caller input.
pub fn parse_date(s: &str) -> LibraryResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).map_err(|err| {
        LibraryError::validation(
            format!("invalid date '{}' {:?}", s, err).as_str(), None)
    })
}

pub mod serializer {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        date.format(DATE_FMT).to_string().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let str_date: String = Deserialize::deserialize(deserializer)?;
        let date = NaiveDate::parse_from_str(&str_date, DATE_FMT).map_err(D::Error::custom)?;
        Ok(date)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::utils::date::parse_date;

    #[test]
    fn test_should_parse_iso_date() {
        let date = parse_date("2023-05-01").expect("should parse");
        assert_eq!(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(), date);
    }

    #[test]
    fn test_should_reject_malformed_date() {
        assert!(parse_date("05/01/2023").is_err());
        assert!(parse_date("not-a-date").is_err());
    }
}
