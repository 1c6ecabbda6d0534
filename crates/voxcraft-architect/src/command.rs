//! Commands returned by the architect service.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{ArchitectError, Result};

/// One placement proposed by the model.
///
/// Kept loosely typed: the tag and the position are validated when the
/// command is applied, so one bad entry does not spoil the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectCommand {
    #[serde(default)]
    pub pos: Vec<f64>,
    #[serde(default)]
    pub texture: String,
}

impl ArchitectCommand {
    pub fn new(pos: [f64; 3], texture: impl Into<String>) -> Self {
        Self {
            pos: pos.to_vec(),
            texture: texture.into(),
        }
    }
}

/// Parse the model's text answer into commands.
///
/// The answer must be a JSON array, optionally wrapped in a Markdown code
/// fence. Entries that are not command objects are skipped with a warning.
pub fn parse_commands(text: &str) -> Result<Vec<ArchitectCommand>> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(ArchitectError::EmptyResponse);
    }
    let entries: Vec<Value> = serde_json::from_str(body)?;
    let commands = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(command) => Some(command),
            Err(err) => {
                warn!(index, %err, "skipping malformed architect entry");
                None
            }
        })
        .collect();
    Ok(commands)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. "json") on the opening line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_array() {
        let text = r#"[
            {"pos": [0, 0, 0], "texture": "stone"},
            {"pos": [0.4, 1, -2.6], "texture": "glass"}
        ]"#;
        let commands = parse_commands(text).unwrap();
        assert_eq!(
            commands,
            vec![
                ArchitectCommand::new([0.0, 0.0, 0.0], "stone"),
                ArchitectCommand::new([0.4, 1.0, -2.6], "glass"),
            ]
        );
    }

    #[test]
    fn strips_code_fence() {
        let text = "```json\n[{\"pos\": [1, 2, 3], \"texture\": \"log\"}]\n```\n";
        assert_eq!(
            parse_commands(text).unwrap(),
            vec![ArchitectCommand::new([1.0, 2.0, 3.0], "log")]
        );
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let text = r#"[{"pos": [1, 2, 3], "texture": "log"}, 7, {"pos": "up", "texture": "dirt"}, {"texture": "dirt"}]"#;
        let commands = parse_commands(text).unwrap();
        assert_eq!(commands.len(), 2);
        // Missing fields default and are rejected later.
        assert!(commands[1].pos.is_empty());
    }

    #[test]
    fn non_array_is_an_error() {
        assert!(matches!(
            parse_commands(r#"{"pos": [1, 2, 3]}"#),
            Err(ArchitectError::Parse(_))
        ));
        assert!(matches!(parse_commands("   "), Err(ArchitectError::EmptyResponse)));
        assert!(matches!(parse_commands("sorry, I can't"), Err(ArchitectError::Parse(_))));
    }
}
