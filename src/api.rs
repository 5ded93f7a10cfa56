use crate::models::{Question, QuizResult};
use crate::table::{CellValue, Row};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

pub const BASE_URL_ENV: &str = "COURSEVAULT_API_URL";
pub const TOKEN_ENV: &str = "COURSEVAULT_TOKEN";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("the server returned no usable data")]
    NotFound,
    #[error("could not decode the server response: {0}")]
    InvalidResponse(String),
    #[error("no API base URL configured (set {BASE_URL_ENV})")]
    Config,
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

/// The remote generate/submit capability, kept behind a trait so the
/// quiz worker can run against a mock in tests.
#[async_trait]
pub trait QuizBackend: Send {
    async fn generate_quiz(
        &self,
        document_id: &str,
        num_questions: usize,
    ) -> Result<Vec<Question>, ApiError>;

    async fn submit_quiz(
        &self,
        document_id: &str,
        answers: &HashMap<u64, String>,
        time_taken_secs: u64,
    ) -> Result<QuizResult, ApiError>;
}

#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            http: reqwest::Client::new(),
        }
    }

    /// Configuration comes from the environment only, read once at
    /// startup.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = std::env::var(BASE_URL_ENV).map_err(|_| ApiError::Config)?;
        let token = std::env::var(TOKEN_ENV).ok();
        Ok(Self::new(&base_url, token))
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}/{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn post_json(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Network(error_detail(&payload).unwrap_or_else(
                || format!("server responded with status {}", status),
            )));
        }
        Ok(payload)
    }

    /// Fetch a generic listing and decode it into table rows. The
    /// backend returns either a bare array or `{"results": [...]}`.
    pub async fn fetch_rows(&self, listing: &str) -> Result<Vec<Row>, ApiError> {
        let payload: Value = self
            .request(reqwest::Method::GET, &format!("{}/", listing))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        parse_rows(payload)
    }
}

#[async_trait]
impl QuizBackend for ApiClient {
    async fn generate_quiz(
        &self,
        document_id: &str,
        num_questions: usize,
    ) -> Result<Vec<Question>, ApiError> {
        let payload = self
            .post_json(
                &format!("documents/{}/generate-quiz/", document_id),
                serde_json::json!({ "num_questions": num_questions }),
            )
            .await?;
        parse_questions(payload)
    }

    async fn submit_quiz(
        &self,
        document_id: &str,
        answers: &HashMap<u64, String>,
        time_taken_secs: u64,
    ) -> Result<QuizResult, ApiError> {
        let payload = self
            .post_json(
                &format!("documents/{}/submit-quiz/", document_id),
                serde_json::json!({ "answers": answers, "time_taken": time_taken_secs }),
            )
            .await?;
        parse_quiz_result(payload)
    }
}

/// Pull a human-readable message out of an error body, if the server
/// provided one.
fn error_detail(payload: &Value) -> Option<String> {
    for key in ["detail", "error", "message"] {
        if let Some(s) = payload.get(key).and_then(Value::as_str) {
            return Some(s.to_string());
        }
    }
    None
}

/// Decode a generated question set. Accepts `{"questions": [...]}` or
/// a bare array; an empty set means the generator had nothing for us.
pub fn parse_questions(payload: Value) -> Result<Vec<Question>, ApiError> {
    let list = match payload.get("questions") {
        Some(inner) => inner.clone(),
        None => payload,
    };
    let questions: Vec<Question> =
        serde_json::from_value(list).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(questions)
}

pub fn parse_quiz_result(payload: Value) -> Result<QuizResult, ApiError> {
    serde_json::from_value(payload).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Decode a listing payload into rows. Non-object entries are
/// skipped; nulls become empty cells and anything non-scalar is
/// stringified.
pub fn parse_rows(payload: Value) -> Result<Vec<Row>, ApiError> {
    let list = match payload.get("results") {
        Some(inner) => inner.clone(),
        None => payload,
    };
    let Value::Array(items) = list else {
        return Err(ApiError::InvalidResponse(
            "expected an array of records".to_string(),
        ));
    };

    let rows = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(fields) => Some(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, cell_from_value(value)))
                    .collect::<Row>(),
            ),
            _ => None,
        })
        .collect();
    Ok(rows)
}

fn cell_from_value(value: Value) -> CellValue {
    match value {
        Value::Number(n) => CellValue::Number(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => CellValue::Text(s),
        Value::Bool(b) => CellValue::Text(b.to_string()),
        Value::Null => CellValue::Text(String::new()),
        other => CellValue::Text(other.to_string()),
    }
}

/// Mock backend standing in for the network in tests.
#[cfg(test)]
pub struct MockBackend {
    pub questions: Result<Vec<Question>, ApiError>,
    pub verdict: Result<QuizResult, ApiError>,
}

#[cfg(test)]
impl MockBackend {
    pub fn succeeding(questions: Vec<Question>, verdict: QuizResult) -> Self {
        Self {
            questions: Ok(questions),
            verdict: Ok(verdict),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl QuizBackend for MockBackend {
    async fn generate_quiz(
        &self,
        _document_id: &str,
        _num_questions: usize,
    ) -> Result<Vec<Question>, ApiError> {
        match &self.questions {
            Ok(qs) => Ok(qs.clone()),
            Err(e) => Err(ApiError::Network(e.to_string())),
        }
    }

    async fn submit_quiz(
        &self,
        _document_id: &str,
        _answers: &HashMap<u64, String>,
        _time_taken_secs: u64,
    ) -> Result<QuizResult, ApiError> {
        match &self.verdict {
            Ok(r) => Ok(r.clone()),
            Err(e) => Err(ApiError::Network(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_questions_wrapped() {
        let payload = json!({
            "questions": [{
                "id": 1,
                "question": "Q?",
                "options": ["A", "B"],
                "correct_answer": "A"
            }]
        });
        let questions = parse_questions(payload).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "Q?");
    }

    #[test]
    fn test_parse_questions_bare_array() {
        let payload = json!([{
            "id": 2,
            "question": "Q2?",
            "options": ["A", "B"],
            "correct_answer": "B",
            "explanation": "exp",
            "difficulty": "hard"
        }]);
        let questions = parse_questions(payload).unwrap();
        assert_eq!(questions[0].difficulty, "hard");
    }

    #[test]
    fn test_parse_questions_empty_is_not_found() {
        let payload = json!({ "questions": [] });
        assert!(matches!(parse_questions(payload), Err(ApiError::NotFound)));
    }

    #[test]
    fn test_parse_questions_garbage_is_invalid_response() {
        let payload = json!({ "questions": "nope" });
        assert!(matches!(
            parse_questions(payload),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_quiz_result() {
        let payload = json!({
            "score": 3,
            "total": 5,
            "percentage": 60.0,
            "results": [{
                "question": "Q?",
                "user_answer": "A",
                "correct_answer": "B",
                "is_correct": false,
                "explanation": "exp"
            }]
        });
        let result = parse_quiz_result(payload).unwrap();
        assert_eq!(result.score, 3);
        assert_eq!(result.results.len(), 1);
        assert!(!result.results[0].is_correct);
    }

    #[test]
    fn test_parse_rows_bare_array() {
        let payload = json!([
            { "id": 1, "name": "intro.pdf", "size": 1024 },
            { "id": 2, "name": "notes.pdf", "size": 2048 }
        ]);
        let rows = parse_rows(payload).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], CellValue::from("intro.pdf"));
        assert_eq!(rows[1]["size"], CellValue::from(2048i64));
    }

    #[test]
    fn test_parse_rows_results_wrapper() {
        let payload = json!({ "results": [{ "id": 7, "active": true, "note": null }] });
        let rows = parse_rows(payload).unwrap();
        assert_eq!(rows[0]["active"], CellValue::from("true"));
        assert_eq!(rows[0]["note"], CellValue::from(""));
    }

    #[test]
    fn test_parse_rows_rejects_non_array() {
        let payload = json!({ "results": 42 });
        assert!(matches!(
            parse_rows(payload),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_rows_skips_non_object_entries() {
        let payload = json!([{ "id": 1 }, "stray", 9]);
        let rows = parse_rows(payload).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_error_detail_prefers_detail_field() {
        let payload = json!({ "detail": "quiz generation failed" });
        assert_eq!(
            error_detail(&payload),
            Some("quiz generation failed".to_string())
        );
        assert_eq!(error_detail(&json!({ "other": 1 })), None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/", None);
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
