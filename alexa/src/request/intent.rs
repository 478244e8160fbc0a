use indexmap::IndexMap;
use serde::Deserialize;

use crate::serialization::null_as_default;

const BUILT_IN_PREFIX: &str = "AMAZON.";
const INTENT_SUFFIX: &str = "Intent";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    pub confirmation_status: Option<ConfirmationStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slots: IndexMap<String, Slot>,
}

impl Intent {
    /// The platform sends slots that were not filled without a value, those do not count.
    pub fn slot_exists(&self, name: &str) -> bool {
        self.slot_value(name).is_some()
    }

    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|slot| slot.value.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(default)]
    pub name: String,
    pub value: Option<String>,
    pub confirmation_status: Option<ConfirmationStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfirmationStatus {
    None,
    Confirmed,
    Denied,
}

/// Intents reserved by the platform, named `AMAZON.<Name>Intent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuiltInIntent {
    Cancel,
    Help,
    Stop,
    Yes,
    No,
    Fallback,
    NavigateHome,
    StartOver,
    Pause,
    Resume,
    Next,
    Previous,
    Repeat,
    LoopOn,
    LoopOff,
    ShuffleOn,
    ShuffleOff,
    /// Any other reserved intent, holds the lower-cased name
    Other(String),
}

impl BuiltInIntent {
    /// Returns `None` when the intent is not in the reserved namespace.
    pub fn from_intent_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix(BUILT_IN_PREFIX)?;
        let name = name.strip_suffix(INTENT_SUFFIX).unwrap_or(name);

        Some(Self::from_key(&name.to_lowercase()))
    }

    fn from_key(key: &str) -> Self {
        match key {
            "cancel" => Self::Cancel,
            "help" => Self::Help,
            "stop" => Self::Stop,
            "yes" => Self::Yes,
            "no" => Self::No,
            "fallback" => Self::Fallback,
            "navigatehome" => Self::NavigateHome,
            "startover" => Self::StartOver,
            "pause" => Self::Pause,
            "resume" => Self::Resume,
            "next" => Self::Next,
            "previous" => Self::Previous,
            "repeat" => Self::Repeat,
            "loopon" => Self::LoopOn,
            "loopoff" => Self::LoopOff,
            "shuffleon" => Self::ShuffleOn,
            "shuffleoff" => Self::ShuffleOff,
            other => Self::Other(other.into()),
        }
    }

    /// Lower-cased name without namespace and suffix, e.g. `stop` for `AMAZON.StopIntent`.
    pub fn key(&self) -> &str {
        match self {
            Self::Cancel => "cancel",
            Self::Help => "help",
            Self::Stop => "stop",
            Self::Yes => "yes",
            Self::No => "no",
            Self::Fallback => "fallback",
            Self::NavigateHome => "navigatehome",
            Self::StartOver => "startover",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Repeat => "repeat",
            Self::LoopOn => "loopon",
            Self::LoopOff => "loopoff",
            Self::ShuffleOn => "shuffleon",
            Self::ShuffleOff => "shuffleoff",
            Self::Other(key) => key,
        }
    }
}
