use crate::constants::US_COUNTRY;
use crate::types::InputRecord;

/// Builds the one-line mailing address used as the geocoding query.
///
/// Returns `None` when the record has no usable street address: the cell was
/// empty, or it holds the text `nan` left behind by earlier exports.
pub fn format_address(record: &InputRecord) -> Option<String> {
    let street = record.street.as_deref()?;
    if street.eq_ignore_ascii_case("nan") {
        return None;
    }

    let city = record.city.as_deref().unwrap_or("");
    let state = record.state.as_deref().unwrap_or("");
    let postal = record.postal_code.as_deref().unwrap_or("");
    let country = record.country.as_deref().unwrap_or("").to_uppercase();

    if country == US_COUNTRY.to_uppercase() {
        Some(format!("{street}, {city}, {state} {postal}"))
    } else {
        Some(format!("{street}, {city} {postal}, {country}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> InputRecord {
        InputRecord {
            name: "Acme Advisors".to_string(),
            street: Some("123 Main St".to_string()),
            city: Some("Springfield".to_string()),
            state: Some("IL".to_string()),
            postal_code: Some("62701".to_string()),
            country: Some("United States".to_string()),
            website: Some("acme.com".to_string()),
        }
    }

    #[test]
    fn test_us_layout() {
        assert_eq!(
            format_address(&acme()).as_deref(),
            Some("123 Main St, Springfield, IL 62701")
        );
    }

    #[test]
    fn test_us_country_is_case_insensitive() {
        let mut record = acme();
        record.country = Some("UNITED STATES".to_string());
        assert_eq!(
            format_address(&record).as_deref(),
            Some("123 Main St, Springfield, IL 62701")
        );
    }

    #[test]
    fn test_foreign_layout() {
        let record = InputRecord {
            name: "Maple Wealth".to_string(),
            street: Some("100 King St W".to_string()),
            city: Some("Toronto".to_string()),
            state: Some("ON".to_string()),
            postal_code: Some("M5X 1A9".to_string()),
            country: Some("Canada".to_string()),
            website: None,
        };
        assert_eq!(
            format_address(&record).as_deref(),
            Some("100 King St W, Toronto M5X 1A9, CANADA")
        );
    }

    #[test]
    fn test_missing_postal_code_becomes_empty() {
        let mut record = acme();
        record.postal_code = None;
        assert_eq!(
            format_address(&record).as_deref(),
            Some("123 Main St, Springfield, IL ")
        );

        record.country = Some("Bermuda".to_string());
        record.city = Some("Hamilton".to_string());
        assert_eq!(
            format_address(&record).as_deref(),
            Some("123 Main St, Hamilton , BERMUDA")
        );
    }

    #[test]
    fn test_nan_street_has_no_address() {
        let mut record = acme();
        record.street = Some("nan".to_string());
        assert_eq!(format_address(&record), None);
        record.street = Some("NaN".to_string());
        assert_eq!(format_address(&record), None);
        record.street = None;
        assert_eq!(format_address(&record), None);
    }

    #[test]
    fn test_formatting_is_repeatable() {
        let record = acme();
        assert_eq!(format_address(&record), format_address(&record));
    }
}
