use crate::errors::ClassificationError;

/// Request types that report platform state instead of user speech, e.g.
/// `AudioPlayer.PlaybackStarted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemEvent {
    AudioPlayer(AudioPlayerEvent),
    PlaybackController(PlaybackControllerEvent),
    ExceptionEncountered,
    /// Events without a dedicated variant, these are passed through by name
    Other {
        namespace: String,
        name: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioPlayerEvent {
    PlaybackStarted,
    PlaybackFinished,
    PlaybackStopped,
    PlaybackNearlyFinished,
    PlaybackFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackControllerEvent {
    NextCommandIssued,
    PauseCommandIssued,
    PlayCommandIssued,
    PreviousCommandIssued,
}

impl SystemEvent {
    pub fn parse(request_type: &str) -> Result<Self, ClassificationError> {
        let segments: Vec<_> = request_type.split('.').collect();

        match segments.as_slice() {
            [namespace] if !namespace.is_empty() => Ok(Self::Other {
                namespace: (*namespace).into(),
                name: None,
            }),
            [namespace, name] if !namespace.is_empty() && !name.is_empty() => {
                Ok(Self::from_parts(namespace, name))
            }
            _ => Err(ClassificationError::UnexpectedRequestType(
                request_type.into(),
            )),
        }
    }

    fn from_parts(namespace: &str, name: &str) -> Self {
        match (namespace, name) {
            ("AudioPlayer", "PlaybackStarted") => {
                Self::AudioPlayer(AudioPlayerEvent::PlaybackStarted)
            }
            ("AudioPlayer", "PlaybackFinished") => {
                Self::AudioPlayer(AudioPlayerEvent::PlaybackFinished)
            }
            ("AudioPlayer", "PlaybackStopped") => {
                Self::AudioPlayer(AudioPlayerEvent::PlaybackStopped)
            }
            ("AudioPlayer", "PlaybackNearlyFinished") => {
                Self::AudioPlayer(AudioPlayerEvent::PlaybackNearlyFinished)
            }
            ("AudioPlayer", "PlaybackFailed") => Self::AudioPlayer(AudioPlayerEvent::PlaybackFailed),
            ("PlaybackController", "NextCommandIssued") => {
                Self::PlaybackController(PlaybackControllerEvent::NextCommandIssued)
            }
            ("PlaybackController", "PauseCommandIssued") => {
                Self::PlaybackController(PlaybackControllerEvent::PauseCommandIssued)
            }
            ("PlaybackController", "PlayCommandIssued") => {
                Self::PlaybackController(PlaybackControllerEvent::PlayCommandIssued)
            }
            ("PlaybackController", "PreviousCommandIssued") => {
                Self::PlaybackController(PlaybackControllerEvent::PreviousCommandIssued)
            }
            ("System", "ExceptionEncountered") => Self::ExceptionEncountered,
            (namespace, name) => Self::Other {
                namespace: namespace.into(),
                name: Some(name.into()),
            },
        }
    }

    /// The namespace and name as they appear in the declared request type.
    pub fn parts(&self) -> (&str, Option<&str>) {
        match self {
            Self::AudioPlayer(event) => ("AudioPlayer", Some(event.name())),
            Self::PlaybackController(event) => ("PlaybackController", Some(event.name())),
            Self::ExceptionEncountered => ("System", Some("ExceptionEncountered")),
            Self::Other { namespace, name } => (namespace.as_str(), name.as_deref()),
        }
    }
}

impl AudioPlayerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlaybackStarted => "PlaybackStarted",
            Self::PlaybackFinished => "PlaybackFinished",
            Self::PlaybackStopped => "PlaybackStopped",
            Self::PlaybackNearlyFinished => "PlaybackNearlyFinished",
            Self::PlaybackFailed => "PlaybackFailed",
        }
    }
}

impl PlaybackControllerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NextCommandIssued => "NextCommandIssued",
            Self::PauseCommandIssued => "PauseCommandIssued",
            Self::PlayCommandIssued => "PlayCommandIssued",
            Self::PreviousCommandIssued => "PreviousCommandIssued",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known() {
        assert_eq!(
            SystemEvent::parse("AudioPlayer.PlaybackNearlyFinished"),
            Ok(SystemEvent::AudioPlayer(
                AudioPlayerEvent::PlaybackNearlyFinished
            ))
        );
        assert_eq!(
            SystemEvent::parse("PlaybackController.PauseCommandIssued"),
            Ok(SystemEvent::PlaybackController(
                PlaybackControllerEvent::PauseCommandIssued
            ))
        );
        assert_eq!(
            SystemEvent::parse("System.ExceptionEncountered"),
            Ok(SystemEvent::ExceptionEncountered)
        );
    }

    #[test]
    fn parse_other() {
        let event = SystemEvent::parse("Display.ElementSelected").unwrap();
        assert_eq!(event.parts(), ("Display", Some("ElementSelected")));

        let event = SystemEvent::parse("Messaging").unwrap();
        assert_eq!(event.parts(), ("Messaging", None));
    }

    #[test]
    fn parse_round_trips_known_names() {
        for request_type in [
            "AudioPlayer.PlaybackStarted",
            "AudioPlayer.PlaybackFailed",
            "PlaybackController.NextCommandIssued",
            "System.ExceptionEncountered",
        ] {
            let event = SystemEvent::parse(request_type).unwrap();
            let (namespace, name) = event.parts();
            assert_eq!(format!("{namespace}.{}", name.unwrap()), request_type);
        }
    }

    #[test]
    fn parse_invalid() {
        for request_type in ["A.B.C", "", "AudioPlayer.", ".PlaybackStarted"] {
            assert_eq!(
                SystemEvent::parse(request_type),
                Err(ClassificationError::UnexpectedRequestType(
                    request_type.into()
                ))
            );
        }
    }
}
