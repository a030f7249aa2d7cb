use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// MCP protocol revision this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "MealMCP";

pub const SUGGEST_MEAL_TOOL: &str = "suggest_meal";

/// A tool as advertised by `tools/list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Every tool this server exposes
pub fn get_tools() -> Vec<ToolSchema> {
    vec![ToolSchema {
        name: SUGGEST_MEAL_TOOL.to_string(),
        description: "Suggest a meal based on a 'context' string containing ingredients. \
                      Returns recipe name, category, area, instructions, links and the \
                      requested ingredients the recipe uses."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "context": {
                    "type": "string",
                    "description": "Free text listing ingredients, e.g. 'I have chicken, rice, tomato'"
                }
            },
            "required": ["context"]
        }),
    }]
}

/// Result body of `initialize`
pub fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

/// Wrap a structured tool payload the way `tools/call` returns it
pub fn tool_result(payload: Value) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": payload.to_string()
        }],
        "structuredContent": payload,
        "isError": false
    })
}
