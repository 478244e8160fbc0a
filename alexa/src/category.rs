use std::fmt;

use crate::errors::ClassificationError;
use crate::request::{BuiltInIntent, Request, SystemEvent};

const INTENT_REQUEST: &str = "IntentRequest";
const LAUNCH_REQUEST: &str = "LaunchRequest";
const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";

/// What kind of request the platform sent, decides which handler gets called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Launch,
    SessionEnded,
    Intent(IntentKind),
    SystemEvent(SystemEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentKind {
    BuiltIn(BuiltInIntent),
    /// Intent defined by the skill itself, holds the lower-cased intent name
    Custom(String),
}

impl Category {
    pub fn classify(request: &Request) -> Result<Self, ClassificationError> {
        match request.request_type.as_str() {
            INTENT_REQUEST => {
                let name = request
                    .intent_name()
                    .ok_or_else(|| ClassificationError::MissingIntent(request.request_id.clone()))?;

                Ok(Self::Intent(IntentKind::from_intent_name(name)))
            }
            LAUNCH_REQUEST => Ok(Self::Launch),
            SESSION_ENDED_REQUEST => Ok(Self::SessionEnded),
            other => SystemEvent::parse(other).map(Self::SystemEvent),
        }
    }

    pub fn handler_name(&self) -> HandlerName {
        match self {
            Self::Launch => HandlerName::new("on_launch"),
            Self::SessionEnded => HandlerName::new("on_session_ended"),
            Self::Intent(intent) => intent.handler_name(),
            Self::SystemEvent(event) => match event.parts() {
                (namespace, None) => HandlerName(format!("on_{}", namespace.to_lowercase())),
                (namespace, Some(name)) => HandlerName(format!(
                    "on_{}_{}",
                    namespace.to_lowercase(),
                    name.to_lowercase()
                )),
            },
        }
    }
}

impl IntentKind {
    pub fn from_intent_name(name: &str) -> Self {
        match BuiltInIntent::from_intent_name(name) {
            Some(intent) => Self::BuiltIn(intent),
            None => Self::Custom(name.to_lowercase()),
        }
    }

    pub fn handler_name(&self) -> HandlerName {
        match self {
            Self::BuiltIn(intent) => HandlerName(format!("on_{}_intent", intent.key())),
            Self::Custom(name) => HandlerName(format!("on_{name}_intent")),
        }
    }
}

/// The name a handler is known by in logs and errors, e.g. `on_stop_intent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerName(String);

impl HandlerName {
    pub const SESSION_STARTED: &'static str = "on_session_started";
    pub const PROCESSING_ERROR: &'static str = "on_processing_error";

    pub fn new(name: &str) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
