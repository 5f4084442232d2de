//! Tool implementations and the registry agents resolve them from.

pub mod registry;
pub mod weather;

pub use registry::ToolRegistry;
pub use weather::WeatherTool;
