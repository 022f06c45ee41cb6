use jsonrpc_swagger::Describe;
use serde::{Deserialize, Serialize};

pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

#[derive(Debug, Clone, Serialize, Deserialize, Describe)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    /// Days from today
    pub day_offset: u32,
    pub temperature_c: i32,
    pub temperature_f: i32,
    pub summary: Option<String>,
}

impl WeatherForecast {
    pub fn new(day_offset: u32, temperature_c: i32, summary: Option<&str>) -> Self {
        Self {
            day_offset,
            temperature_c,
            temperature_f: 32 + temperature_c * 9 / 5,
            summary: summary.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Describe)]
pub struct Service {
    pub name: String,
    pub description: String,
}

/// Signed credentials sent to the storing actions.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
    pub crc: String,
    pub time: i64,
}
