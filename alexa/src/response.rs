pub mod directive;

use serde::Serialize;

use crate::attributes::Attributes;

pub use self::directive::{AudioItem, ClearBehavior, Directive, PlayBehavior, Stream};

const VERSION: &str = "1.0";

/// The message returned to the platform.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    version: String,
    pub session_attributes: Attributes,
    pub response: Response,
}

impl ResponseEnvelope {
    pub fn new(session_attributes: Attributes, response: Response) -> Self {
        Self {
            version: VERSION.into(),
            session_attributes,
            response,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// Speech response with an optional card and reprompt.
    ///
    /// The card is only included when both the title and the content are given, the reprompt
    /// only when it is not empty.
    pub fn speechlet(
        card_title: &str,
        card_content: &str,
        speech: &str,
        reprompt: &str,
        should_end_session: bool,
    ) -> Self {
        let mut response = Self::new()
            .set_speech(speech)
            .set_should_end_session(should_end_session);

        if !card_title.is_empty() && !card_content.is_empty() {
            response = response.set_card(card_title, card_content);
        }

        if !reprompt.is_empty() {
            response = response.set_reprompt(reprompt);
        }

        response
    }

    /// Start playback of the given stream and end the session.
    pub fn play(behavior: PlayBehavior, stream: Stream) -> Self {
        Self::new()
            .add_directive(Directive::Play {
                play_behavior: behavior,
                audio_item: AudioItem { stream },
            })
            .set_should_end_session(true)
    }

    pub fn stop() -> Self {
        Self::new()
            .add_directive(Directive::Stop)
            .set_should_end_session(true)
    }

    pub fn clear_queue(behavior: ClearBehavior) -> Self {
        Self::new()
            .add_directive(Directive::ClearQueue {
                clear_behavior: behavior,
            })
            .set_should_end_session(true)
    }

    pub fn set_speech(mut self, text: &str) -> Self {
        self.output_speech = Some(OutputSpeech::PlainText { text: text.into() });
        self
    }

    pub fn set_ssml(mut self, ssml: &str) -> Self {
        self.output_speech = Some(OutputSpeech::Ssml { ssml: ssml.into() });
        self
    }

    pub fn set_card(mut self, title: &str, content: &str) -> Self {
        self.card = Some(Card::Simple {
            title: title.into(),
            content: content.into(),
        });
        self
    }

    pub fn set_reprompt(mut self, text: &str) -> Self {
        self.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::PlainText { text: text.into() },
        });
        self
    }

    pub fn set_should_end_session(mut self, should_end_session: bool) -> Self {
        self.should_end_session = Some(should_end_session);
        self
    }

    pub fn add_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Card {
    Simple { title: String, content: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}
