use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A movie as stored in a table: the composite key and nothing else.
///
/// Deserializes from the getting-started data set shape
/// (`{"year": 2013, "title": "Rush", "info": {...}}`); extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movie {
    pub year: i32,
    pub title: String,
}

impl Movie {
    pub fn new(year: i32, title: impl Into<String>) -> Self {
        Self {
            year,
            title: title.into(),
        }
    }

    /// The key that addresses this movie.
    pub fn key(&self) -> MovieKey {
        MovieKey {
            year: self.year,
            title: self.title.clone(),
        }
    }
}

/// Composite key of a movie item: `Year` partition, `Title` sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieKey {
    pub year: i32,
    pub title: String,
}

impl MovieKey {
    pub fn new(year: i32, title: impl Into<String>) -> Self {
        Self {
            year,
            title: title.into(),
        }
    }
}

impl std::fmt::Display for MovieKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.year, self.title)
    }
}

/// Non-key attributes of a movie. Used as an update patch: `None` fields
/// are left untouched by the update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
}

impl MovieInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plot(mut self, plot: impl Into<String>) -> Self {
        self.plot = Some(plot.into());
        self
    }

    pub fn with_rank(mut self, rank: i64) -> Self {
        self.rank = Some(rank);
        self
    }

    /// True when the patch would not touch any attribute.
    pub fn is_empty(&self) -> bool {
        self.plot.is_none() && self.rank.is_none()
    }
}

/// A movie together with whatever non-key attributes are stored for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    pub info: MovieInfo,
}

/// Errors that can occur when constructing a year range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum YearRangeError {
    #[error("Invalid year range: {low} is after {high}")]
    Inverted { low: i32, high: i32 },
}

/// An inclusive range of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub low: i32,
    pub high: i32,
}

impl YearRange {
    /// Creates a new range, validating that low <= high.
    pub fn new(low: i32, high: i32) -> Result<Self, YearRangeError> {
        if low > high {
            return Err(YearRangeError::Inverted { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.low..=self.high).contains(&year)
    }
}
