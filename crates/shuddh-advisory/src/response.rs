use serde::Serialize;
use shuddh_core::NewsItem;

use crate::error::{ActionErrorKind, AdvisoryError};

/// What every action returns: exactly one of `data` or `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResponse<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    #[serde(skip)]
    pub kind: Option<ActionErrorKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TipsReply {
    pub tips: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDigest {
    pub news_items: Vec<NewsItem>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityReply {
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReportText {
    pub extracted_text: String,
}

impl<T> ActionResponse<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            kind: None,
        }
    }

    #[must_use]
    pub fn fail(kind: ActionErrorKind, message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
            kind: Some(kind),
        }
    }

    #[must_use]
    pub fn from_error(error: &AdvisoryError) -> Self {
        Self::fail(error.kind(), error.user_message())
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }
}
