use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AttributeError;

/// Conversation state that is round-tripped through the platform.
///
/// Nested values can be addressed with a dotted path, e.g. `app_context.stations.origin`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let segments = split(path).ok()?;
        lookup(&self.0, &segments)
    }

    /// Returns the value at `path`, if it does not exist `default` is stored at that path first.
    pub fn get_or_insert(&mut self, path: &str, default: Value) -> Result<Value, AttributeError> {
        if let Some(value) = self.lookup(path) {
            return Ok(value.clone());
        }

        self.set(path, default.clone())?;
        Ok(default)
    }

    /// Updates the value at `path`, missing levels along the way are created.
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), AttributeError> {
        let segments = split(path)?;
        insert(&mut self.0, path, &segments, value)
    }

    /// Removes a top level attribute, including everything nested below it.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

fn split(path: &str) -> Result<Vec<&str>, AttributeError> {
    let segments: Vec<_> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(AttributeError::InvalidPath(path.into()));
    }

    Ok(segments)
}

fn lookup<'a>(map: &'a Map<String, Value>, segments: &[&str]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let value = map.get(*first)?;

    if rest.is_empty() {
        Some(value)
    } else {
        lookup(value.as_object()?, rest)
    }
}

fn insert(
    map: &mut Map<String, Value>,
    path: &str,
    segments: &[&str],
    value: Value,
) -> Result<(), AttributeError> {
    match segments {
        [] => Err(AttributeError::InvalidPath(path.into())),
        [last] => {
            map.insert((*last).into(), value);
            Ok(())
        }
        [first, rest @ ..] => {
            let child = map
                .entry(*first)
                .or_insert_with(|| Value::Object(Map::new()));

            match child {
                Value::Object(child) => insert(child, path, rest, value),
                _ => Err(AttributeError::NotAnObject {
                    path: path.into(),
                    segment: (*first).into(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn attributes(value: Value) -> Attributes {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn lookup_nested() {
        let attributes = attributes(json!({
            "app_context": {
                "stations": {
                    "origin": "Utrecht"
                }
            },
            "counter": 1
        }));

        assert_eq!(
            attributes.lookup("app_context.stations.origin"),
            Some(&json!("Utrecht"))
        );
        assert_eq!(attributes.lookup("counter"), Some(&json!(1)));
        assert_eq!(attributes.lookup("app_context.stations.destination"), None);
        assert_eq!(attributes.lookup("counter.value"), None);
        assert_eq!(attributes.lookup("app_context..origin"), None);
    }

    #[test]
    fn set_creates_levels() {
        let mut attributes = Attributes::new();

        attributes
            .set("app_context.stations.origin", json!("Utrecht"))
            .unwrap();
        attributes
            .set("app_context.stations.destination", json!("Delft"))
            .unwrap();
        attributes
            .set("app_context.stations.origin", json!("Eindhoven"))
            .unwrap();

        assert_eq!(
            serde_json::to_value(&attributes).unwrap(),
            json!({
                "app_context": {
                    "stations": {
                        "origin": "Eindhoven",
                        "destination": "Delft"
                    }
                }
            })
        );
    }

    #[test]
    fn set_through_value() {
        let mut attributes = attributes(json!({ "counter": 1 }));

        assert_eq!(
            attributes.set("counter.value", json!(2)),
            Err(AttributeError::NotAnObject {
                path: "counter.value".into(),
                segment: "counter".into()
            })
        );
        assert_eq!(attributes.lookup("counter"), Some(&json!(1)));

        assert_eq!(
            attributes.set("", json!(2)),
            Err(AttributeError::InvalidPath("".into()))
        );
    }

    #[test]
    fn get_or_insert_applies_default() {
        let mut attributes = attributes(json!({ "history": { "plays": 4 } }));

        assert_eq!(
            attributes.get_or_insert("history.plays", json!(0)),
            Ok(json!(4))
        );
        assert_eq!(
            attributes.get_or_insert("history.skips", json!(0)),
            Ok(json!(0))
        );
        assert_eq!(attributes.lookup("history.skips"), Some(&json!(0)));

        assert_eq!(
            attributes.get_or_insert("settings.loop", json!(false)),
            Ok(json!(false))
        );
        assert_eq!(
            attributes.into_inner().get("settings"),
            Some(&json!({ "loop": false }))
        );
    }

    #[test]
    fn remove_top_level() {
        let mut attributes = attributes(json!({
            "playback": { "token": "1", "offset": 1500 },
            "counter": 1
        }));

        assert_eq!(
            attributes.remove("playback"),
            Some(json!({ "token": "1", "offset": 1500 }))
        );
        assert_eq!(attributes.remove("playback"), None);
        assert_eq!(attributes.lookup("playback.token"), None);
        assert_eq!(attributes.lookup("counter"), Some(&json!(1)));
    }
}
