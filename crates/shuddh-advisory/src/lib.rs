//! The Shuddh actions: health advisory, chat, tips, news, reverse geocoding
//! and health-report extraction.
//!
//! [`AdvisoryService`] owns the upstream clients and exposes one async method
//! per action. None of them return a Rust error; failures come back as an
//! [`ActionResponse`] with `error` set.

pub mod error;
pub mod requests;
pub mod response;
pub mod service;

pub use error::{
    ActionErrorKind, AdvisoryError, NETWORK_FAILURE_MESSAGE, NO_CURRENT_DATA_MESSAGE,
};
pub use requests::{
    AgeInput, ChatRequest, HealthForm, HealthReportRequest, NewsRequest, ReverseGeocodeRequest,
    TipsRequest, ValidHealthForm,
};
pub use response::{ActionResponse, ChatReply, CityReply, HealthReportText, NewsDigest, TipsReply};
pub use service::{
    AdvisoryService, FALLBACK_ADVISORY, FALLBACK_CHAT_REPLY, FALLBACK_COORDINATES,
    FALLBACK_NEWS_SUMMARY, FALLBACK_TIPS, HEALTH_REPORT_FAILED, REVERSE_GEOCODE_FAILED,
};
