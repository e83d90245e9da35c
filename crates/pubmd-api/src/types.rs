//! Remote listing types.

use serde::{Deserialize, Deserializer};

/// Entry of the remote article listing.
///
/// Only the fields the lookup needs are decoded. Everything else the API
/// returns is ignored, whatever its shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteArticle {
    /// Remote identity.
    #[serde(default)]
    pub id: Option<u64>,
    /// Article title.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
