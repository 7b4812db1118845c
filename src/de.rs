//! Deserialization helpers for Slack's `ok` discriminator. See
//! [crate::slack::api::APIResult].

use serde::de::{Deserialize, Deserializer, Error, Unexpected};

fn exactly<'a, D>(deserializer: D, expected: bool) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    let b = bool::deserialize(deserializer)?;

    if b == expected {
        Ok(b)
    } else {
        let exp = if expected { "true" } else { "false" };
        Err(Error::invalid_value(Unexpected::Bool(b), &exp))
    }
}

pub fn only_true<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    exactly(deserializer, true)
}

pub fn only_false<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    exactly(deserializer, false)
}
