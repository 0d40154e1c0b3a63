use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// Body the service answers with, tagged by `status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ServiceResponse {
    Error { text: String },
    RateLimit { text: String },
    Redirect { url: String },
    Stream { url: String },
    Success { text: String },
    Picker(Picker),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerType {
    Images,
    Various,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Picker {
    #[serde(default)]
    pub text: String,
    pub picker_type: PickerType,
    pub picker: Vec<PickerItem>,
    #[serde(default)]
    pub audio: PickerAudio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerItemKind {
    Video,
    Photo,
    Gif,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerItem {
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PickerItemKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
}

/// Audio track that goes with an image picker, `false` when there is none
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PickerAudio {
    Track(String),
    None(bool),
}

impl PickerAudio {
    #[must_use]
    pub fn track(&self) -> Option<&str> {
        match self {
            Self::Track(url) if !url.is_empty() => Some(url.as_str()),
            _ => None,
        }
    }
}

impl Default for PickerAudio {
    fn default() -> Self {
        Self::None(false)
    }
}

/// What to do with a successful answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Open the media link
    Open(String),
    /// Show the text to the user
    Message(String),
    /// Let the user pick one of several media items
    Pick {
        text: String,
        items: Vec<PickerItem>,
        audio: Option<String>,
    },
}

impl ServiceResponse {
    pub fn from_json(body: &str) -> Result<Self, ServiceError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn into_outcome(self) -> Result<Outcome, ServiceError> {
        match self {
            Self::Stream { url } | Self::Redirect { url } => Ok(Outcome::Open(url)),
            Self::Success { text } => Ok(Outcome::Message(text)),
            Self::Picker(picker) => Ok(Outcome::Pick {
                audio: picker.audio.track().map(String::from),
                text: picker.text,
                items: picker.picker,
            }),
            Self::Error { text } => Err(ServiceError::Remote(text)),
            Self::RateLimit { text } => Err(ServiceError::RateLimited(text)),
        }
    }
}

/// Turn a raw response body into what the user should see next.
pub fn interpret(body: &str) -> Result<Outcome, ServiceError> {
    let response = ServiceResponse::from_json(body)?;
    app_logger::debug!(?response, "Got response from media service");

    response.into_outcome()
}
