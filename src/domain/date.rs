use chrono::NaiveDate;
use thiserror::Error;

/// Dates arrive from callers as `YYYY/MM/DD`.
pub const INPUT_DATE_FORMAT: &str = "%Y/%m/%d";

/// Dates leave the ledger (and sit in the store) as `YYYY-MM-DD`.
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date '{0}', expected YYYY/MM/DD")]
pub struct ParseDateError(pub String);

/// Parse a caller-supplied date. Only the zero-padded slash-separated form
/// is accepted; out-of-range components and trailing characters are rejected.
pub fn parse_input_date(text: &str) -> Result<NaiveDate, ParseDateError> {
    if !has_input_date_shape(text) {
        return Err(ParseDateError(text.to_string()));
    }
    NaiveDate::parse_from_str(text, INPUT_DATE_FORMAT).map_err(|_| ParseDateError(text.to_string()))
}

// chrono accepts short, signed and unpadded fields, so check `DDDD/DD/DD` first.
fn has_input_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'/',
            _ => b.is_ascii_digit(),
        })
}

/// Parse an optional creation date: absent or empty text means "no date".
pub fn parse_optional_input_date(text: Option<&str>) -> Result<Option<NaiveDate>, ParseDateError> {
    match text {
        Some(text) if !text.is_empty() => parse_input_date(text).map(Some),
        _ => Ok(None),
    }
}

pub fn format_output_date(date: NaiveDate) -> String {
    date.format(OUTPUT_DATE_FORMAT).to_string()
}

pub fn parse_output_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text, OUTPUT_DATE_FORMAT)
}

/// Serde adapter for `NaiveDate` fields in the hyphenated output format.
pub mod output_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_output_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_output_date(&text).map_err(serde::de::Error::custom)
    }

    /// Same as the parent module, for `Option<NaiveDate>` (`null` when unset).
    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.serialize_some(&super::super::format_output_date(*date)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|text| super::super::parse_output_date(&text))
                .transpose()
                .map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slash_date() {
        let date = parse_input_date("2024/03/15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_rejects_out_of_range_components() {
        assert!(parse_input_date("2024/13/40").is_err());
        assert!(parse_input_date("2023/02/29").is_err());
    }

    #[test]
    fn test_rejects_other_layouts() {
        assert!(parse_input_date("2024-03-15").is_err());
        assert!(parse_input_date("15/03/2024").is_err());
        assert!(parse_input_date("2024/03/15 10:00").is_err());
        assert!(parse_input_date("").is_err());
        assert!(parse_input_date("yesterday").is_err());
    }

    #[test]
    fn test_rejects_unpadded_and_signed_fields() {
        assert!(parse_input_date("24/03/15").is_err());
        assert!(parse_input_date("2024/3/5").is_err());
        assert!(parse_input_date("+2024/03/15").is_err());
        assert!(parse_input_date(" 2024/03/15").is_err());
        assert!(parse_input_date("2024/03/15 ").is_err());
        assert!(parse_input_date("0024/03/15").is_ok());
    }

    #[test]
    fn test_optional_date_empty_means_unset() {
        assert_eq!(parse_optional_input_date(None), Ok(None));
        assert_eq!(parse_optional_input_date(Some("")), Ok(None));
        assert!(parse_optional_input_date(Some("2024/3")).is_err());
    }

    #[test]
    fn test_input_and_output_formats_differ() {
        let date = parse_input_date("2024/03/15").unwrap();
        assert_eq!(format_output_date(date), "2024-03-15");
        assert_eq!(parse_output_date("2024-03-15").unwrap(), date);
    }
}
