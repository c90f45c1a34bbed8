use serde::{Deserialize, Serialize};

/// A named input, deserialized from a `presets/**/*.toml` file.
///
/// ```toml
/// input = "abcabcbb"
/// expected = 3
/// description = "Window restarts after each repeat"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// The text to scan.
    pub input: String,

    /// Known answer, checked by `lsw verify`.
    pub expected: Option<usize>,

    /// Short note shown by `lsw ls --verbose`.
    pub description: Option<String>,
}

/// User settings, deserialized from `config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Delay between auto-play ticks, in milliseconds.
    pub delay_ms: u64,

    /// Print the last-seen index map under each frame.
    pub show_seen: bool,

    /// Stop auto-play after this many steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delay_ms: 400,
            show_seen: false,
            max_steps: None,
        }
    }
}
