//! Read-only snapshot of a configured parser.
//!
//! This is the contract an external help/usage renderer consumes: the full
//! ordered argument list with everything needed to describe the command
//! line, decoupled from the parser's internal storage. The types serialize
//! to JSON so the snapshot can cross process or component boundaries.

use serde::{Deserialize, Serialize};

use crate::argument::{ArgKind, ArgValue};

/// Declaration-time description of one argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArgMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
    pub kind: ArgKind,
    #[serde(default)]
    pub positional: bool,
    #[serde(default)]
    pub multi_value: bool,
    #[serde(default)]
    pub min_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ArgValue>,
    #[serde(default)]
    pub required: bool,
}

/// Full parser description: program name, help blurb, ordered arguments.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ParserMetadata {
    pub program: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgMetadata>,
}

impl ParserMetadata {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip() {
        let meta = ParserMetadata {
            program: "demo".to_string(),
            description: "a demo".to_string(),
            args: vec![ArgMetadata {
                name: "count".to_string(),
                short: Some('c'),
                help: "how many".to_string(),
                kind: ArgKind::Int,
                positional: false,
                multi_value: true,
                min_count: 2,
                default_value: Some(ArgValue::Int(1)),
                required: false,
            }],
        };

        let json = meta.to_json().expect("serialize");
        assert!(json.contains("\"kind\":\"int\""));
        assert!(json.contains("\"min-count\":2"));

        let back = ParserMetadata::from_json(&json).expect("deserialize");
        assert_eq!(back.args.len(), 1);
        assert_eq!(back.args[0].name, "count");
        assert_eq!(back.args[0].default_value, Some(ArgValue::Int(1)));
    }
}
