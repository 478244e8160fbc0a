use std::fs;

use config::{ConfigError, Map, Source, Value, ValueKind};

/// Reads values from the files that `<prefix>__<key>__file` environment variables point to.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentSecretFile {}

const SUFFIX: &str = "__file";
const PREFIX: &str = concat!(std::env!("CARGO_PKG_NAME"), "__");

impl Source for EnvironmentSecretFile {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        collect_secrets(std::env::vars())
    }
}

fn collect_secrets(
    vars: impl IntoIterator<Item = (String, String)>,
) -> Result<Map<String, Value>, ConfigError> {
    vars.into_iter()
        .filter_map(|(key, path)| {
            let key = key.to_lowercase();
            let key = key.strip_prefix(PREFIX)?.strip_suffix(SUFFIX)?.replace("__", ".");

            if key.is_empty() {
                return None;
            }

            Some(read_secret(&path).map(|content| {
                (key, Value::new(Some(&path), ValueKind::String(content)))
            }))
        })
        .collect()
}

fn read_secret(path: &str) -> Result<String, ConfigError> {
    let content = fs::read(path).map_err(|err| ConfigError::Foreign(err.into()))?;
    let content = String::from_utf8(content).map_err(|err| ConfigError::Foreign(err.into()))?;

    // Files written by editors usually end with a newline
    Ok(content.trim_end().to_owned())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn reads_secret_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("application_id");
        fs::write(&path, "amzn1.ask.skill.1234\n").unwrap();
        let path = path.to_string_lossy().into_owned();

        let secrets = collect_secrets([
            ("ALEXA_SKILL__APPLICATION_ID__FILE".to_owned(), path.clone()),
            ("ALEXA_SKILL__SKILL__NAME__FILE".to_owned(), path.clone()),
            ("ALEXA_SKILL__LOG_LEVEL".to_owned(), "debug".to_owned()),
            ("OTHER__APPLICATION_ID__FILE".to_owned(), path.clone()),
            ("ALEXA_SKILL____FILE".to_owned(), path),
        ])
        .unwrap();

        assert_eq!(secrets.len(), 2);
        assert_eq!(
            secrets["application_id"].clone().into_string().unwrap(),
            "amzn1.ask.skill.1234"
        );
        assert!(secrets.contains_key("skill.name"));
    }

    #[test]
    fn missing_secret_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").to_string_lossy().into_owned();

        let result = collect_secrets([("ALEXA_SKILL__APPLICATION_ID__FILE".to_owned(), path)]);

        assert!(matches!(result, Err(ConfigError::Foreign(_))));
    }
}
