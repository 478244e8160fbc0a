use std::sync::Mutex;

use alexa::category::IntentKind;
use alexa::errors::DispatchError;
use alexa::request::event::{AudioPlayerEvent, PlaybackControllerEvent};
use alexa::request::{BuiltInIntent, Request, RequestEnvelope, Session, SystemEvent};
use alexa::response::{ClearBehavior, PlayBehavior, Stream};
use alexa::{Response, Skill};
use anyhow::{Context, anyhow};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, error, warn};

const PLAYBACK: &str = "playback";
const PLAYBACK_TOKEN: &str = "playback.token";
const PLAYBACK_OFFSET: &str = "playback.offset";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub name: String,
    pub url: String,
    pub token: String,
}

/// Where the player was when it last reported in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub token: String,
    pub offset_in_milliseconds: u64,
}

/// Plays a fixed list of tracks, one after another.
///
/// Playback events arrive without a session, the position they report is kept in the skill so
/// that pausing can store it in the session attributes and resuming can continue from there.
#[derive(Debug)]
pub struct AudioSkill {
    title: String,
    tracks: Vec<Track>,
    position: Mutex<Option<Position>>,
}

impl AudioSkill {
    pub fn new(title: &str, tracks: Vec<Track>) -> anyhow::Result<Self> {
        if tracks.is_empty() {
            return Err(anyhow!("Audio skill '{title}' needs at least one track"));
        }

        Ok(Self {
            title: title.into(),
            tracks,
            position: Mutex::new(None),
        })
    }

    pub fn position(&self) -> anyhow::Result<Option<Position>> {
        Ok(self
            .position
            .lock()
            .map_err(|_| anyhow!("Player position lock poisoned"))?
            .clone())
    }

    fn remember(&self, position: Position) -> anyhow::Result<()> {
        debug!(
            token = %position.token,
            offset = position.offset_in_milliseconds,
            "Player position updated"
        );

        *self
            .position
            .lock()
            .map_err(|_| anyhow!("Player position lock poisoned"))? = Some(position);

        Ok(())
    }

    fn index_of(&self, token: Option<&str>) -> Option<usize> {
        let token = token?;
        self.tracks.iter().position(|track| track.token == token)
    }

    fn first(&self) -> &Track {
        &self.tracks[0]
    }

    fn current(&self, token: Option<&str>) -> &Track {
        self.index_of(token)
            .map_or_else(|| self.first(), |index| &self.tracks[index])
    }

    fn next(&self, token: Option<&str>) -> &Track {
        match self.index_of(token) {
            Some(index) => &self.tracks[(index + 1) % self.tracks.len()],
            None => self.first(),
        }
    }

    fn previous(&self, token: Option<&str>) -> &Track {
        match self.index_of(token) {
            Some(index) => &self.tracks[(index + self.tracks.len() - 1) % self.tracks.len()],
            None => self.first(),
        }
    }

    /// The token of the track that is playing, as far as this session knows.
    fn session_token(&self, session: &Session) -> anyhow::Result<Option<String>> {
        if let Some(token) = session.attributes.lookup(PLAYBACK_TOKEN).and_then(Value::as_str) {
            return Ok(Some(token.to_owned()));
        }

        Ok(self.position()?.map(|position| position.token))
    }

    fn play(
        &self,
        track: &Track,
        offset: u64,
        announce: bool,
        session: &mut Session,
    ) -> anyhow::Result<Response> {
        debug!(name = %track.name, offset, "Playing track");

        session.attributes.set(PLAYBACK_TOKEN, json!(track.token))?;
        session.attributes.set(PLAYBACK_OFFSET, json!(offset))?;

        let stream = Stream::new(&track.token, &track.url).set_offset(offset);
        let response = Response::play(PlayBehavior::ReplaceAll, stream);

        if announce {
            let text = format!("Playing {}", track.name);
            Ok(response.set_speech(&text).set_card(&self.title, &text))
        } else {
            Ok(response)
        }
    }

    fn pause(&self, session: &mut Session) -> anyhow::Result<Response> {
        if let Some(position) = self.position()? {
            session.attributes.set(PLAYBACK_TOKEN, json!(position.token))?;
            session
                .attributes
                .set(PLAYBACK_OFFSET, json!(position.offset_in_milliseconds))?;
        }

        Ok(Response::stop())
    }

    fn resume(&self, session: &mut Session) -> anyhow::Result<Response> {
        let token = session.attributes.lookup(PLAYBACK_TOKEN).and_then(Value::as_str);
        let offset = session.attributes.lookup(PLAYBACK_OFFSET).and_then(Value::as_u64);

        let position = match (token, offset) {
            (Some(token), Some(offset)) => Some(Position {
                token: token.to_owned(),
                offset_in_milliseconds: offset,
            }),
            _ => self.position()?,
        };

        match position {
            Some(position) => {
                let track = self.current(Some(&position.token));
                self.play(track, position.offset_in_milliseconds, false, session)
            }
            None => self.play(self.first(), 0, false, session),
        }
    }

    fn not_supported(&self, feature: &str) -> Response {
        let text = format!("{feature} is not yet supported");
        Response::speechlet(&self.title, &text, &text, "", true)
    }

    /// The position reported by a playback event, the platform context is used when the request
    /// itself does not carry it.
    fn reported_position(envelope: &RequestEnvelope) -> Option<Position> {
        let request = &envelope.request;
        let player = envelope
            .context
            .as_ref()
            .and_then(|context| context.get("AudioPlayer"));

        let token = request
            .token
            .clone()
            .or_else(|| Some(player?.get("token")?.as_str()?.to_owned()))?;
        let offset_in_milliseconds = request
            .offset_in_milliseconds
            .or_else(|| player?.get("offsetInMilliseconds")?.as_u64())
            .unwrap_or_default();

        Some(Position {
            token,
            offset_in_milliseconds,
        })
    }
}

impl Skill for AudioSkill {
    type Context = ();

    fn on_launch(&self, _request: &Request, session: &mut Session) -> anyhow::Result<Response> {
        self.play(self.first(), 0, true, session)
    }

    fn on_intent(
        &self,
        intent: &IntentKind,
        _request: &Request,
        session: &mut Session,
    ) -> anyhow::Result<Option<Response>> {
        let intent = match intent {
            IntentKind::BuiltIn(intent) => intent,
            IntentKind::Custom(name) if name == "playaudiointent" => {
                return self.play(self.first(), 0, true, session).map(Some);
            }
            IntentKind::Custom(_) => return Ok(None),
        };

        let token = self.session_token(session)?;
        let response = match intent {
            BuiltInIntent::Next => self.play(self.next(token.as_deref()), 0, true, session)?,
            BuiltInIntent::Previous => {
                self.play(self.previous(token.as_deref()), 0, false, session)?
            }
            BuiltInIntent::Repeat | BuiltInIntent::StartOver => {
                self.play(self.current(token.as_deref()), 0, true, session)?
            }
            BuiltInIntent::Pause => self.pause(session)?,
            BuiltInIntent::Resume => self.resume(session)?,
            BuiltInIntent::Stop | BuiltInIntent::Cancel => {
                session.attributes.remove(PLAYBACK);
                Response::stop()
            }
            BuiltInIntent::Help => {
                let text = format!("You can listen to {} by saying, play", self.title);
                Response::speechlet(
                    &self.title,
                    &text,
                    &text,
                    &format!("I did not hear you, {text}"),
                    false,
                )
            }
            BuiltInIntent::LoopOn => self.not_supported("Loop on"),
            BuiltInIntent::LoopOff => self.not_supported("Loop off"),
            BuiltInIntent::ShuffleOn => self.not_supported("Shuffle on"),
            BuiltInIntent::ShuffleOff => self.not_supported("Shuffle off"),
            _ => return Ok(None),
        };

        Ok(Some(response))
    }

    fn on_session_ended(&self, _request: &Request, _session: &mut Session) -> anyhow::Result<Response> {
        Ok(Response::new())
    }

    fn on_system_event(
        &self,
        event: &SystemEvent,
        envelope: &RequestEnvelope,
        _context: &Self::Context,
    ) -> anyhow::Result<Option<Response>> {
        let request = &envelope.request;
        let mut session = Session::default();

        let response = match event {
            SystemEvent::AudioPlayer(
                AudioPlayerEvent::PlaybackStarted | AudioPlayerEvent::PlaybackStopped,
            )
            | SystemEvent::PlaybackController(PlaybackControllerEvent::PauseCommandIssued) => {
                if let Some(position) = Self::reported_position(envelope) {
                    self.remember(position)?;
                }
                Response::new()
            }
            SystemEvent::AudioPlayer(AudioPlayerEvent::PlaybackNearlyFinished) => {
                let token = request
                    .token
                    .as_deref()
                    .context("Playback nearly finished without a token")?;
                let next = self.next(Some(token));

                Response::play(
                    PlayBehavior::Enqueue,
                    Stream::new(&next.token, &next.url).set_expected_previous_token(token),
                )
            }
            SystemEvent::AudioPlayer(AudioPlayerEvent::PlaybackFinished) => Response::new(),
            SystemEvent::AudioPlayer(AudioPlayerEvent::PlaybackFailed) => {
                if let Some(error) = &request.error {
                    warn!(
                        error_type = %error.error_type,
                        message = %error.message,
                        "Playback failed"
                    );
                }
                Response::clear_queue(ClearBehavior::ClearEnqueued)
            }
            SystemEvent::PlaybackController(PlaybackControllerEvent::NextCommandIssued) => {
                let token = Self::reported_position(envelope).map(|position| position.token);
                self.play(self.next(token.as_deref()), 0, false, &mut session)?
            }
            SystemEvent::PlaybackController(PlaybackControllerEvent::PreviousCommandIssued) => {
                let token = Self::reported_position(envelope).map(|position| position.token);
                self.play(self.previous(token.as_deref()), 0, false, &mut session)?
            }
            SystemEvent::PlaybackController(PlaybackControllerEvent::PlayCommandIssued) => {
                if let Some(position) = Self::reported_position(envelope) {
                    self.remember(position)?;
                }
                self.resume(&mut session)?
            }
            SystemEvent::ExceptionEncountered => {
                if let Some(error) = &request.error {
                    error!(
                        error_type = %error.error_type,
                        message = %error.message,
                        "Platform reported an exception"
                    );
                }
                return Ok(None);
            }
            SystemEvent::Other { .. } => return Ok(None),
        };

        Ok(Some(response))
    }

    fn on_processing_error(
        &self,
        _envelope: &RequestEnvelope,
        _context: &Self::Context,
        _error: &DispatchError,
    ) -> anyhow::Result<Response> {
        let text = "I am having difficulty fulfilling your request";
        Ok(Response::speechlet(
            &format!("{} Error", self.title),
            text,
            text,
            "",
            true,
        ))
    }
}
