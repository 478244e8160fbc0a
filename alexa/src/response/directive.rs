use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Directive {
    #[serde(rename = "AudioPlayer.Play", rename_all = "camelCase")]
    Play {
        play_behavior: PlayBehavior,
        audio_item: AudioItem,
    },
    #[serde(rename = "AudioPlayer.Stop")]
    Stop,
    #[serde(rename = "AudioPlayer.ClearQueue", rename_all = "camelCase")]
    ClearQueue { clear_behavior: ClearBehavior },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayBehavior {
    ReplaceAll,
    Enqueue,
    ReplaceEnqueued,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClearBehavior {
    ClearEnqueued,
    ClearAll,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioItem {
    pub stream: Stream,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub token: String,
    pub url: String,
    pub offset_in_milliseconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_previous_token: Option<String>,
}

impl Stream {
    pub fn new(token: &str, url: &str) -> Self {
        Self {
            token: token.into(),
            url: url.into(),
            offset_in_milliseconds: 0,
            expected_previous_token: None,
        }
    }

    pub fn set_offset(mut self, offset_in_milliseconds: u64) -> Self {
        self.offset_in_milliseconds = offset_in_milliseconds;
        self
    }

    /// Required by the platform when enqueueing.
    pub fn set_expected_previous_token(mut self, token: &str) -> Self {
        self.expected_previous_token = Some(token.into());
        self
    }
}
