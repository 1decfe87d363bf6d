//! Frame action payloads and the state carried between frames.
//!
//! A client posts `{ untrustedData, trustedData }` when a button is pressed.
//! The button only tells us its 1-based index, so each rendered frame stores
//! its buttons' values in `fc:frame:state` and the next request maps the
//! index back to a value.
//!
//! Every field is decoded on its own: a malformed value becomes `None`
//! without discarding the fields around it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use gate_types::Fid;

use crate::views::FrameButton;

/// Body of a frame action POST
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameActionPayload {
    #[serde(deserialize_with = "lenient_or_default")]
    pub untrusted_data: UntrustedData,
    #[serde(deserialize_with = "lenient")]
    pub trusted_data: Option<TrustedData>,
}

/// Client-reported fields of a frame action.
///
/// Not signature-checked here; the hub message in `trusted_data` is the
/// concern of whatever identity layer sits in front of the gate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UntrustedData {
    #[serde(deserialize_with = "lenient")]
    pub fid: Option<Fid>,
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub message_hash: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub timestamp: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub network: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub button_index: Option<u8>,
    #[serde(deserialize_with = "lenient")]
    pub input_text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub cast_id: Option<CastId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastId {
    pub fid: Fid,
    pub hash: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedData {
    pub message_bytes: String,
}

/// Decode a field as `T`, mapping a value of the wrong shape to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

impl FrameActionPayload {
    pub fn actor(&self) -> Option<Fid> {
        self.untrusted_data.fid
    }

    /// Value of the pressed button, resolved through the echoed frame state.
    pub fn previous_action(&self) -> Option<String> {
        let index = self.untrusted_data.button_index?;
        let state = FrameState::decode(self.untrusted_data.state.as_deref()?)?;
        state.value_at(index).map(str::to_string)
    }
}

/// Button values of the frame that was shown, by position.
///
/// Link buttons never post back, so their slot is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameState {
    pub buttons: Vec<Option<String>>,
}

impl FrameState {
    pub fn from_buttons(buttons: &[FrameButton]) -> Self {
        Self {
            buttons: buttons
                .iter()
                .map(|button| button.value().map(str::to_string))
                .collect(),
        }
    }

    pub fn encode(&self) -> String {
        // Vec<Option<String>> always serializes
        serde_json::to_string(self).unwrap_or_else(|_| "{\"buttons\":[]}".to_string())
    }

    /// Parse echoed state; anything malformed is ignored.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Value of the button at 1-based `index`
    pub fn value_at(&self, index: u8) -> Option<&str> {
        let slot = usize::from(index).checked_sub(1)?;
        self.buttons.get(slot)?.as_deref()
    }
}
