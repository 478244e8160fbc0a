use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use crate::audio::Track;
use crate::secret::EnvironmentSecretFile;

#[derive(Debug, Deserialize)]
pub struct Setup {
    /// Requests addressed to any other skill are rejected, when not set every request is accepted
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub fulfillment: FulfillmentConfig,
    #[serde(default)]
    pub skill: SkillConfig,
    /// The audio skill is only served when it is configured
    #[serde(default)]
    pub audio: Option<AudioConfig>,
}

impl Setup {
    /// Reads the optional config file, overridden by the environment.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::default()
                    .prefix(std::env!("CARGO_PKG_NAME"))
                    .separator("__"),
            )
            .add_source(EnvironmentSecretFile::default())
            .build()?
            .try_deserialize()
    }

    /// Log sink for the host and the dispatcher, `RUST_LOG` overrides the configured level.
    pub fn logger(&self) -> anyhow::Result<Dispatch> {
        let filter = EnvFilter::builder()
            .with_default_directive(self.log_level.parse::<Directive>()?)
            .from_env_lossy();

        Ok(Dispatch::new(
            tracing_subscriber::fmt().with_env_filter(filter).finish(),
        ))
    }
}

fn default_log_level() -> String {
    "info".into()
}

#[derive(Debug, Deserialize)]
pub struct FulfillmentConfig {
    #[serde(default = "default_fulfillment_ip")]
    pub ip: Ipv4Addr,
    #[serde(default = "default_fulfillment_port")]
    pub port: u16,
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            ip: default_fulfillment_ip(),
            port: default_fulfillment_port(),
        }
    }
}

impl From<FulfillmentConfig> for SocketAddr {
    fn from(fulfillment: FulfillmentConfig) -> Self {
        (fulfillment.ip, fulfillment.port).into()
    }
}

fn default_fulfillment_ip() -> Ipv4Addr {
    [0, 0, 0, 0].into()
}

fn default_fulfillment_port() -> u16 {
    7878
}

#[derive(Debug, Deserialize)]
pub struct SkillConfig {
    #[serde(default = "default_skill_name")]
    pub name: String,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            name: default_skill_name(),
        }
    }
}

fn default_skill_name() -> String {
    "Deployment Test".into()
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_audio_title")]
    pub title: String,
    pub tracks: Vec<Track>,
}

fn default_audio_title() -> String {
    "Audio".into()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn defaults() {
        let dir = tempfile::tempdir().unwrap();
        let setup = Setup::load(&dir.path().join("missing.toml")).unwrap();

        assert_eq!(setup.log_level, "info");
        assert_eq!(setup.skill.name, "Deployment Test");
        assert!(setup.audio.is_none());
        assert!(setup.logger().is_ok());

        let addr: SocketAddr = setup.fulfillment.into();
        assert_eq!(addr, SocketAddr::from(([0, 0, 0, 0], 7878)));
    }

    #[test]
    fn from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alexa_skill.toml");
        fs::write(
            &path,
            r#"
application_id = "amzn1.ask.skill.1234"
log_level = "debug"

[fulfillment]
port = 8080

[skill]
name = "Train Times"

[audio]

[[audio.tracks]]
name = "the first episode"
url = "https://example.com/1.mp3"
token = "1"
"#,
        )
        .unwrap();

        let setup = Setup::load(&path).unwrap();

        assert_eq!(setup.application_id.as_deref(), Some("amzn1.ask.skill.1234"));
        assert_eq!(setup.log_level, "debug");
        assert_eq!(setup.fulfillment.ip, Ipv4Addr::UNSPECIFIED);
        assert_eq!(setup.fulfillment.port, 8080);
        assert_eq!(setup.skill.name, "Train Times");

        let audio = setup.audio.unwrap();
        assert_eq!(audio.title, "Audio");
        assert_eq!(audio.tracks[0].url, "https://example.com/1.mp3");
    }

    #[test]
    fn invalid_log_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alexa_skill.toml");
        fs::write(&path, "log_level = \"alexa_skill=verbose\"\n").unwrap();

        let setup = Setup::load(&path).unwrap();
        assert!(setup.logger().is_err());
    }

    #[test]
    fn invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alexa_skill.toml");
        fs::write(&path, "[fulfillment]\nport = \"not a port\"\n").unwrap();

        assert!(Setup::load(&path).is_err());
    }
}
