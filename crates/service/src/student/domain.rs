use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ServiceError;

/// Incoming student payload (a stored record minus its id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub major: Option<String>,
}

impl StudentInput {
    pub fn new(first_name: &str, last_name: &str, date_of_birth: NaiveDate, major: Option<&str>) -> Self {
        Self {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            date_of_birth,
            major: major.map(str::to_string),
        }
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        models::student::validate_fields(
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.major.as_deref(),
        )?;
        Ok(())
    }

    pub fn full_name(&self) -> FullName {
        FullName { first_name: self.first_name.clone(), last_name: self.last_name.clone() }
    }
}

/// The name pair used for duplicate detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullName {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl FullName {
    /// Absent names take part in comparisons as the empty string.
    pub fn parts(&self) -> (&str, &str) {
        (self.first_name.as_deref().unwrap_or(""), self.last_name.as_deref().unwrap_or(""))
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, last) = self.parts();
        write!(f, "{first} {last}")
    }
}

/// Optional exact-match filters; an absent filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
}

impl SearchFilter {
    /// Blank query values (`?major=`) count as absent.
    pub fn normalized(self) -> Self {
        fn keep(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.trim().is_empty())
        }
        Self { first_name: keep(self.first_name), last_name: keep(self.last_name), major: keep(self.major) }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.major.is_none()
    }

    /// Case-sensitive equality on every supplied field.
    pub fn matches(&self, s: &models::student::Model) -> bool {
        fn eq(filter: &Option<String>, value: &Option<String>) -> bool {
            match filter {
                Some(f) => value.as_deref() == Some(f.as_str()),
                None => true,
            }
        }
        eq(&self.first_name, &s.first_name) && eq(&self.last_name, &s.last_name) && eq(&self.major, &s.major)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(first: &str, last: &str, major: Option<&str>) -> models::student::Model {
        models::student::Model {
            id: 1,
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            major: major.map(Into::into),
        }
    }

    #[test]
    fn input_deserializes_camel_case_without_optional_fields() {
        let input: StudentInput = serde_json::from_str(r#"{"firstName":"Ann","dateOfBirth":"2000-01-01"}"#).unwrap();
        assert_eq!(input.first_name.as_deref(), Some("Ann"));
        assert_eq!(input.last_name, None);
        assert_eq!(input.major, None);
    }

    #[test]
    fn input_requires_date_of_birth() {
        assert!(serde_json::from_str::<StudentInput>(r#"{"firstName":"Ann"}"#).is_err());
    }

    #[test]
    fn search_filter_is_case_sensitive() {
        let s = record("Ann", "Lee", Some("CS"));
        assert!(SearchFilter::default().matches(&s));
        assert!(SearchFilter { first_name: Some("Ann".into()), ..Default::default() }.matches(&s));
        assert!(!SearchFilter { first_name: Some("ann".into()), ..Default::default() }.matches(&s));
        assert!(!SearchFilter { major: Some("Math".into()), ..Default::default() }.matches(&s));
    }

    #[test]
    fn blank_filters_are_dropped() {
        let f = SearchFilter { first_name: Some(" ".into()), last_name: Some("Lee".into()), major: Some(String::new()) }.normalized();
        assert_eq!(f, SearchFilter { last_name: Some("Lee".into()), ..Default::default() });
        assert!(!f.is_empty());
    }
}
