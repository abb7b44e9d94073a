//! Forgiving field decoders for advisor JSON
//!
//! The model is not a strict serializer: lists come back as `null`, ids as
//! numbers, minutes as floats. These accept what is usable and only fail on
//! values that have no sensible reading.

use serde::{Deserialize, Deserializer};
use serde_json::Number;

/// `null` decodes as the type's default
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(Number),
}

impl From<IdRepr> for String {
    fn from(id: IdRepr) -> Self {
        match id {
            IdRepr::Text(s) => s,
            IdRepr::Number(n) => n.to_string(),
        }
    }
}

/// Id given as a string or a number
pub(crate) fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(IdRepr::deserialize(deserializer)?.into())
}

pub(crate) fn opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<IdRepr>::deserialize(deserializer)?.map(String::from))
}

pub(crate) fn opt_id_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<String>>, D::Error> {
    let ids = Option::<Vec<IdRepr>>::deserialize(deserializer)?;
    Ok(ids.map(|ids| ids.into_iter().map(String::from).collect()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MinutesRepr {
    Whole(u64),
    Fractional(f64),
    Text(String),
}

/// Minutes as an integer, float or numeric string; rounded, clamped at zero
///
/// Text that is not a number reads as absent.
pub(crate) fn opt_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let minutes = match Option::<MinutesRepr>::deserialize(deserializer)? {
        None => None,
        Some(MinutesRepr::Whole(m)) => Some(m.min(u64::from(u32::MAX)) as u32),
        Some(MinutesRepr::Fractional(m)) => Some(round_minutes(m)),
        Some(MinutesRepr::Text(s)) => s.trim().parse::<f64>().ok().map(round_minutes),
    };
    Ok(minutes)
}

fn round_minutes(m: f64) -> u32 {
    if m.is_finite() { m.round().clamp(0.0, f64::from(u32::MAX)) as u32 } else { 0 }
}
