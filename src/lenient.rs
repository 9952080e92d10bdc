//! Lenient numeric deserializers for scraped unit data.
//! Anything that does not read as a number becomes `None`, never an error.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Parse a money/size string: `"$1,250"`, `"1250.00/mo"`, `"850 sq ft"`.
/// Takes the leading numeric run after an optional `$` and drops thousands separators.
pub fn parse_amount(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_prefix('$').unwrap_or(s).trim_start();
    let digits: String = s
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .filter(|c| *c != ',')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawNumber::Number(n)) if n.is_finite() => Some(n),
        Some(RawNumber::Text(s)) => parse_amount(&s),
        _ => None,
    })
}

pub fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(amount(deserializer)?
        .filter(|n| *n >= 0.0 && *n <= u32::MAX as f64)
        .map(|n| n.floor() as u32))
}

/// Range floor: anything unreadable falls back to 0.
pub fn lower_bound<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(amount(deserializer)?.unwrap_or(0.0))
}

/// Range ceiling: anything unreadable leaves the range open.
pub fn upper_bound<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(amount(deserializer)?.unwrap_or_else(crate::types::unbounded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FilterCriteria, NumericRange, UnitRecord};

    #[test]
    fn parses_money_strings() {
        assert_eq!(parse_amount("$1,250"), Some(1250.0));
        assert_eq!(parse_amount(" 1250.50/mo"), Some(1250.5));
        assert_eq!(parse_amount("850 sq ft"), Some(850.0));
    }

    #[test]
    fn unparsable_strings_are_missing() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("Call for pricing"), None);
        assert_eq!(parse_amount("N/A"), None);
        assert_eq!(parse_amount("1.2.3"), None);
    }

    #[test]
    fn unit_record_accepts_mixed_numeric_shapes() {
        let unit: UnitRecord = serde_json::from_str(
            r#"{"bedrooms":"2","bathrooms":1.5,"squareFootage":"900 sqft","rent":"$1,400","isSubject":true}"#,
        )
        .unwrap();
        assert_eq!(unit.bedrooms, Some(2));
        assert_eq!(unit.bathrooms, Some(1.5));
        assert_eq!(unit.square_footage, Some(900.0));
        assert_eq!(unit.rent, Some(1400.0));
        assert!(unit.is_subject);
    }

    #[test]
    fn malformed_and_null_fields_become_none() {
        let unit: UnitRecord = serde_json::from_str(
            r#"{"bedrooms":"studio","rent":null,"squareFootage":"unknown","bathrooms":true}"#,
        )
        .unwrap();
        assert_eq!(unit.bedrooms, None);
        assert_eq!(unit.rent, None);
        assert_eq!(unit.square_footage, None);
        assert_eq!(unit.bathrooms, None);
    }

    #[test]
    fn absent_fields_default() {
        let unit: UnitRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(unit, UnitRecord::default());
    }

    #[test]
    fn range_bounds_tolerate_null_and_strings() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"priceRange":{"min":null,"max":2000}}"#).unwrap();
        assert_eq!(criteria.price_range, Some(NumericRange { min: 0.0, max: 2000.0 }));

        let criteria: FilterCriteria = serde_json::from_str(
            r#"{"priceRange":{"min":"1000","max":"$2,500"},"squareFootageRange":{"min":600,"max":"any"}}"#,
        )
        .unwrap();
        assert_eq!(criteria.price_range, Some(NumericRange { min: 1000.0, max: 2500.0 }));
        let sqft = criteria.square_footage_range.unwrap();
        assert_eq!(sqft.min, 600.0);
        assert!(sqft.contains(1_000_000.0));
    }

    #[test]
    fn absent_range_bounds_keep_defaults() {
        let range: NumericRange = serde_json::from_str("{}").unwrap();
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, f64::MAX);
    }
}
