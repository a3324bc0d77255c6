use contextor::{Citation, QaAnswer};
use serde::{Deserialize, Serialize};

/// Request payload for /query.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Natural language question.
    pub question: String,
    /// Optional base64 image. Accepted for client compatibility, not used.
    #[serde(default)]
    pub image: Option<String>,
}

/// Response payload for /query.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub answer: String,
    pub links: Vec<LinkInfo>,
}

#[derive(Debug, Serialize)]
pub struct LinkInfo {
    pub url: String,
    pub text: String,
}

impl From<QaAnswer> for QueryResponse {
    fn from(qa: QaAnswer) -> Self {
        Self {
            answer: qa.answer,
            links: qa
                .links
                .into_iter()
                .map(|Citation { url, text }| LinkInfo { url, text })
                .collect(),
        }
    }
}
