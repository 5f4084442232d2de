//! Weather lookup tool.
//!
//! Performs no real lookup: it formats a fixed sentence around the
//! inputs and always reports 22 degrees. It exists to exercise the
//! tool-calling path end to end.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use salamgate_core::Tool;

/// Input for get_weather.
#[derive(Debug, Deserialize)]
pub struct WeatherInput {
    /// Location to report on. Not validated or geocoded.
    pub location: String,
    /// Temperature unit, "C" unless the model says otherwise.
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "C".to_string()
}

pub struct WeatherTool;

impl WeatherTool {
    /// Pure formatting core, callable without going through the trait.
    pub fn report(location: &str, unit: &str) -> String {
        format!("The weather is {location} is 22 degrees {unit}")
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get the weather for a given location, return the weather"
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "Location to get the weather for"
                },
                "unit": {
                    "type": "string",
                    "description": "Temperature unit",
                    "default": "C"
                }
            },
            "required": ["location"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<String> {
        let input: WeatherInput = serde_json::from_value(args)?;
        Ok(Self::report(&input.location, &input.unit))
    }
}
