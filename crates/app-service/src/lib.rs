//! The JSON contract of the media-processing service.
//!
//! Only the shapes of what goes over the wire live here, sending the request
//! is left to the caller.

pub mod error;
pub mod request;
pub mod response;

pub use error::ServiceError;
pub use request::{
    endpoint_url, AudioFormat, RequestOptions, ServiceRequest, VideoCodec, VideoQuality,
};
pub use response::{
    interpret, Outcome, Picker, PickerAudio, PickerItem, PickerItemKind, PickerType,
    ServiceResponse,
};
