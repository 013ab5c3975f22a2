//! Weather payload attached to the final response

use serde::{Deserialize, Serialize};

/// Current weather at the destination
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    /// Temperature in Celsius
    pub temperature: f32,
    /// Human-readable description ("Partly cloudy")
    pub description: String,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f32,
    /// Packing or planning hints derived by the provider
    #[serde(default)]
    pub recommendations: Vec<String>,
}
