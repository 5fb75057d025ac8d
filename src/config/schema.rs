use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "server": {
                "type": "object",
                "properties": {
                    "host": { "type": "string" },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 }
                }
            },
            "database": {
                "type": "object",
                "properties": {
                    "path": { "type": "string" }
                }
            },
            "llm": {
                "type": "object",
                "properties": {
                    "provider": { "type": "string", "enum": ["gemini", "openai", "demo"] },
                    "model": { "type": "string" },
                    "api_key": { "type": "string" },
                    "base_url": { "type": "string", "format": "uri" },
                    "timeout_secs": { "type": "integer", "minimum": 1 },
                    "max_retries": { "type": "integer", "minimum": 0, "maximum": 1 },
                    "prompts_dir": { "type": "string" }
                }
            }
        }
    })
});
