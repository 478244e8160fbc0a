pub mod event;
pub mod intent;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::attributes::Attributes;
use crate::serialization::{invalid_as_default, null_as_default};

pub use self::event::SystemEvent;
pub use self::intent::{BuiltInIntent, ConfirmationStatus, Intent, Slot};

/// The message sent by the platform for every invocation of the skill.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: String,
    // Playback events are sent without a session
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Option<Value>,
    pub request: Request,
}

impl RequestEnvelope {
    /// The identity of the skill this envelope was addressed to.
    ///
    /// Looked up in the session first and in the platform context when the envelope does not
    /// carry a session.
    pub fn application_id(&self) -> Option<&str> {
        match &self.session {
            Some(session) => session.application.application_id.as_deref(),
            None => self
                .context
                .as_ref()
                .and_then(|context| context.pointer("/System/application/applicationId"))
                .and_then(Value::as_str),
        }
    }

    pub fn is_new_session(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.new)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub new: bool,
    pub session_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attributes: Attributes,
    // A malformed identity is treated as a missing one, which fails authorization later on
    #[serde(deserialize_with = "invalid_as_default")]
    pub application: Application,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub access_token: Option<String>,
}

/// The request payload, its shape depends on the declared type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub request_id: String,
    pub timestamp: Option<String>,
    pub locale: Option<String>,
    pub intent: Option<Intent>,
    pub reason: Option<String>,
    pub token: Option<String>,
    pub offset_in_milliseconds: Option<u64>,
    pub error: Option<RequestError>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Request {
    pub fn intent_name(&self) -> Option<&str> {
        self.intent.as_ref().map(|intent| intent.name.as_str())
    }

    pub fn is_intent(&self, name: &str) -> bool {
        self.intent_name() == Some(name)
    }

    pub fn slot_exists(&self, name: &str) -> bool {
        self.intent
            .as_ref()
            .is_some_and(|intent| intent.slot_exists(name))
    }

    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.intent.as_ref().and_then(|intent| intent.slot_value(name))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}
