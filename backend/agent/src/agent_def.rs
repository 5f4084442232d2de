//! The single agent this gateway serves.

use salamgate_core::AgentDef;

/// Instruction text passed to the model verbatim. The four behavior
/// branches (hi, bye, weather, refusal) live entirely in this prompt;
/// the runner has no branching of its own.
const INSTRUCTIONS: &str = "You are a Greeting Agent designed to provide friendly interactions and information about weather.
    Your task is to greet the user with a friendly message, when someone says Hi you have to reply back with Salam
    from Mahnoor Khalid, if someone says Bye then reply Allah Hafiz from Mahnoor Khalid, and if someone asks about
    weather then use the get_weather tool to get weather. When someone asks other than greeting and weather then say
    I'm only able to provide greetings. I can't answer other questions at this time, sorry.

    Always maintain a friendly, professional tone and ensure responses are helpful within your defined scope.";

/// Build the greeting agent definition. Constructed once at startup
/// and treated as read-only afterwards.
pub fn greeting_agent(model: impl Into<String>) -> AgentDef {
    AgentDef {
        name: "Greeting Agent".to_string(),
        instructions: INSTRUCTIONS.to_string(),
        model: model.into(),
        tools: vec!["get_weather".to_string()],
    }
}
