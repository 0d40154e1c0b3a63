use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::ServiceError;

pub const API_PATH: &str = "api/json";

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    H264,
    Av1,
    Vp9,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoQuality {
    #[serde(rename = "144")]
    P144,
    #[serde(rename = "360")]
    P360,
    #[serde(rename = "480")]
    P480,
    #[serde(rename = "720")]
    P720,
    #[serde(rename = "1080")]
    P1080,
    #[serde(rename = "1440")]
    P1440,
    #[serde(rename = "2160")]
    P2160,
    #[serde(rename = "max")]
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Best,
    Mp3,
    Ogg,
    Wav,
    Opus,
}

/// User preferences that end up in every request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    pub audio_only: bool,
    pub keep_tiktok_watermark: bool,
    pub tiktok_full_audio: bool,
    pub mute_audio: bool,
}

/// Body of `POST <endpoint>/api/json`.
///
/// Unset options are left out so the service falls back to its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_codec: Option<VideoCodec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_quality: Option<VideoQuality>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a_format: Option<AudioFormat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_audio_only: Option<bool>,

    #[serde(
        rename = "isNoTTWatermark",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_no_tt_watermark: Option<bool>,

    #[serde(
        rename = "isTTFullAudio",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_tt_full_audio: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_audio_muted: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dub_lang: Option<bool>,
}

impl ServiceRequest {
    /// The request for the page at `page_url`.
    ///
    /// The URL is sent component-encoded, the way the service expects it.
    #[must_use]
    pub fn for_url(page_url: &str, options: &RequestOptions) -> Self {
        Self {
            url: utf8_percent_encode(page_url, URI_COMPONENT).to_string(),
            is_audio_only: Some(options.audio_only),
            is_no_tt_watermark: Some(!options.keep_tiktok_watermark),
            is_tt_full_audio: options.tiktok_full_audio.then_some(true),
            is_audio_muted: options.mute_audio.then_some(true),
            dub_lang: Some(false),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_video_codec(mut self, codec: VideoCodec) -> Self {
        self.v_codec = Some(codec);
        self
    }

    #[must_use]
    pub fn with_video_quality(mut self, quality: VideoQuality) -> Self {
        self.v_quality = Some(quality);
        self
    }

    #[must_use]
    pub fn with_audio_format(mut self, format: AudioFormat) -> Self {
        self.a_format = Some(format);
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Where requests for the service at `base` go
pub fn endpoint_url(base: &str) -> Result<Url, ServiceError> {
    let parsed = Url::parse(base)?;

    if parsed.cannot_be_a_base() {
        return Err(ServiceError::RelativeEndpoint(base.to_string()));
    }

    let joined = format!("{}/{API_PATH}", parsed.as_str().trim_end_matches('/'));

    Ok(Url::parse(&joined)?)
}
