//! Trip request model and validation

use crate::TravelAiError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trip budget, either a concrete amount or a qualitative range like "mid-range"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TripBudget {
    Amount(f64),
    Qualitative(String),
}

impl TripBudget {
    /// Render the budget for prompt embedding
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            TripBudget::Amount(amount) => format!("{amount:.0} total"),
            TripBudget::Qualitative(range) => range.clone(),
        }
    }
}

impl Default for TripBudget {
    fn default() -> Self {
        TripBudget::Qualitative("mid-range".to_string())
    }
}

/// How densely the day plans should be packed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TripPace {
    Relaxed,
    #[default]
    Moderate,
    Packed,
}

impl TripPace {
    /// Activities requested per day for this pace
    #[must_use]
    pub fn activities_per_day(self) -> u32 {
        match self {
            TripPace::Relaxed => 2,
            TripPace::Moderate => 3,
            TripPace::Packed => 4,
        }
    }
}

/// A single itinerary generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    /// Destination name (city, region)
    pub destination: String,
    /// First day of the trip
    pub start_date: NaiveDate,
    /// Last day of the trip, inclusive
    pub end_date: NaiveDate,
    /// Party size
    pub travelers: u32,
    /// Budget constraint
    #[serde(default)]
    pub budget: TripBudget,
    /// Traveler interests ("art", "street food", ...)
    #[serde(default)]
    pub interests: Vec<String>,
    /// Dietary constraints ("vegetarian", ...)
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    /// Preferred accommodation style ("boutique hotel", ...)
    #[serde(default)]
    pub accommodation_preference: Option<String>,
    /// Day plan density
    #[serde(default)]
    pub trip_pace: TripPace,
}

impl TripRequest {
    /// Trip length in days, inclusive of both endpoints, never less than 1
    #[must_use]
    pub fn duration_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        u32::try_from(days.max(1)).unwrap_or(1)
    }

    /// Date of the given zero-based trip day
    #[must_use]
    pub fn date_of_day(&self, day_offset: u32) -> NaiveDate {
        self.start_date + chrono::Duration::days(i64::from(day_offset))
    }

    /// Validate the request before spending any provider calls
    pub fn validate(&self) -> Result<(), TravelAiError> {
        if self.destination.trim().is_empty() {
            return Err(TravelAiError::validation("Destination cannot be empty"));
        }

        if self.end_date < self.start_date {
            return Err(TravelAiError::validation(format!(
                "End date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }

        if self.travelers == 0 {
            return Err(TravelAiError::validation("Travelers must be at least 1"));
        }

        Ok(())
    }
}
