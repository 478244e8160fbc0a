use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// The platform sometimes sends `null` instead of leaving a field out.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Falls back to the default when the value has an unexpected shape, the envelope as a whole
/// still has to be valid JSON.
pub fn invalid_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;

    Ok(T::deserialize(value).unwrap_or_else(|err| {
        debug!("Ignoring malformed value: {err}");
        T::default()
    }))
}
