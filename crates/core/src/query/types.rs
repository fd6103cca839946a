use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::QueryError;

/// Years offered by the year filter picker.
pub const YEAR_OPTIONS: RangeInclusive<u16> = 1900..=2021;

/// Kind of title to search for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleType {
    #[default]
    Movie,
    Series,
    Episode,
}

impl TitleType {
    /// Value sent as the `type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleType::Movie => "movie",
            TitleType::Series => "series",
            TitleType::Episode => "episode",
        }
    }
}

impl fmt::Display for TitleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TitleType {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(TitleType::Movie),
            "series" => Ok(TitleType::Series),
            "episode" => Ok(TitleType::Episode),
            _ => Err(QueryError::UnknownTitleType(s.to_string())),
        }
    }
}

/// A four-digit release year filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Year(String);

impl Year {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Year {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Year(trimmed.to_string()))
        } else {
            Err(QueryError::InvalidYear(s.to_string()))
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse an optional year filter where an empty string means "any year".
pub fn parse_year_filter(s: &str) -> Result<Option<Year>, QueryError> {
    if s.trim().is_empty() {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}

/// Current search term and filters.
///
/// Only the latest value matters: the debounced trigger reads whatever is
/// current when it fires, and responses are matched against it when they
/// settle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct QueryParameters {
    pub search_term: String,
    pub year: Option<Year>,
    pub title_type: TitleType,
}

impl QueryParameters {
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            ..Default::default()
        }
    }

    pub fn with_year(mut self, year: Year) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_title_type(mut self, title_type: TitleType) -> Self {
        self.title_type = title_type;
        self
    }

    /// An empty term never reaches the network.
    pub fn has_term(&self) -> bool {
        !self.search_term.is_empty()
    }

    /// Year as sent upstream (`y=` is empty when unfiltered).
    pub fn year_param(&self) -> &str {
        self.year.as_ref().map(Year::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_type_round_trips_through_str() {
        for title_type in [TitleType::Movie, TitleType::Series, TitleType::Episode] {
            assert_eq!(title_type.as_str().parse::<TitleType>(), Ok(title_type));
        }
        assert_eq!("Series".parse::<TitleType>(), Ok(TitleType::Series));
    }

    #[test]
    fn test_title_type_rejects_unknown() {
        assert_eq!(
            "documentary".parse::<TitleType>(),
            Err(QueryError::UnknownTitleType("documentary".to_string()))
        );
    }

    #[test]
    fn test_year_requires_four_digits() {
        assert_eq!("1999".parse::<Year>().unwrap().as_str(), "1999");
        assert!("99".parse::<Year>().is_err());
        assert!("19a9".parse::<Year>().is_err());
        assert!("20011".parse::<Year>().is_err());
    }

    #[test]
    fn test_parse_year_filter_empty_is_none() {
        assert_eq!(parse_year_filter("").unwrap(), None);
        assert_eq!(parse_year_filter("  ").unwrap(), None);
        assert_eq!(
            parse_year_filter("2001").unwrap(),
            Some("2001".parse().unwrap())
        );
    }

    #[test]
    fn test_default_parameters() {
        let params = QueryParameters::default();
        assert!(!params.has_term());
        assert_eq!(params.title_type, TitleType::Movie);
        assert_eq!(params.year_param(), "");
    }

    #[test]
    fn test_builder_sets_filters() {
        let params = QueryParameters::new("alien")
            .with_year("1979".parse().unwrap())
            .with_title_type(TitleType::Series);
        assert!(params.has_term());
        assert_eq!(params.year_param(), "1979");
        assert_eq!(params.title_type.to_string(), "series");
    }

    #[test]
    fn test_year_options_match_picker() {
        assert_eq!(*YEAR_OPTIONS.start(), 1900);
        assert_eq!(YEAR_OPTIONS.count(), 122);
    }
}
