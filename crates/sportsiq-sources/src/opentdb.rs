//! Open Trivia Database (opentdb.com) source.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::instrument;

use sportsiq_core::model::Question;
use sportsiq_core::traits::{QuestionRequest, QuestionSource};

use crate::error::SourceError;

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Response code the API uses when too many requests arrive from one IP.
const RATE_LIMIT_CODE: u8 = 5;

/// Open Trivia Database HTTP source.
pub struct OpenTdbSource {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenTdbSource {
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SourceError::NetworkError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    fn url_for(&self, request: &QuestionRequest) -> String {
        format!(
            "{}/api.php?amount={}&category={}&difficulty={}&type={}&encode=base64",
            self.base_url,
            request.amount,
            request.category,
            request.difficulty.api_name(),
            request.answer_type.api_name(),
        )
    }
}

#[derive(Deserialize)]
struct OpenTdbResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<OpenTdbQuestion>,
}

#[derive(Deserialize)]
struct OpenTdbQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    fn name(&self) -> &str {
        "opentdb"
    }

    #[instrument(skip(self, request), fields(difficulty = %request.difficulty, amount = request.amount))]
    async fn fetch_questions(&self, request: &QuestionRequest) -> anyhow::Result<Vec<Question>> {
        let url = self.url_for(request);
        tracing::debug!("fetching questions from {url}");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                SourceError::NetworkError(format!(
                    "could not reach the trivia service at {}",
                    self.base_url
                ))
            } else {
                SourceError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 429 {
            return Err(SourceError::RateLimited.into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let api_response: OpenTdbResponse =
            response.json().await.map_err(|e| SourceError::ApiError {
                status,
                message: format!("failed to parse response: {e}"),
            })?;

        match api_response.response_code {
            0 => {}
            RATE_LIMIT_CODE => return Err(SourceError::RateLimited.into()),
            code => return Err(SourceError::NoResults { code }.into()),
        }
        if api_response.results.is_empty() {
            return Err(SourceError::NoResults { code: 0 }.into());
        }

        let questions = api_response
            .results
            .into_iter()
            .map(|q| {
                assemble_question(
                    decode_field(&q.question),
                    decode_field(&q.correct_answer),
                    q.incorrect_answers.iter().map(|a| decode_field(a)).collect(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = questions.len(), "fetched questions");
        Ok(questions)
    }
}

/// Decode a base64 UTF-8 field, falling back to the raw text.
pub fn decode_field(raw: &str) -> String {
    match STANDARD
        .decode(raw)
        .map_err(|e| e.to_string())
        .and_then(|bytes| String::from_utf8(bytes).map_err(|e| e.to_string()))
    {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("failed to decode field {raw:?}: {e}");
            raw.to_string()
        }
    }
}

/// Build a question whose options are the correct answer and the distractors
/// in a random order. The order is fixed from here on.
pub(crate) fn assemble_question(
    prompt: String,
    correct: String,
    incorrect: Vec<String>,
) -> Result<Question, SourceError> {
    let mut options = Vec::with_capacity(incorrect.len() + 1);
    options.push(correct.clone());
    options.extend(incorrect);
    options.shuffle(&mut rand::thread_rng());

    Question::new(prompt, options, correct).map_err(|e| SourceError::InvalidQuestion(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sportsiq_core::model::Difficulty;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn b64(s: &str) -> String {
        STANDARD.encode(s)
    }

    fn encoded_question(prompt: &str, correct: &str, wrong: &[&str]) -> serde_json::Value {
        serde_json::json!({
            "type": b64("multiple"),
            "difficulty": b64("hard"),
            "category": b64("Sports"),
            "question": b64(prompt),
            "correct_answer": b64(correct),
            "incorrect_answers": wrong.iter().map(|w| b64(w)).collect::<Vec<_>>(),
        })
    }

    #[tokio::test]
    async fn successful_fetch_decodes_and_shuffles() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "response_code": 0,
            "results": [
                encoded_question("Who won the 2010 FIFA World Cup?", "Spain", &["Netherlands", "Germany", "Uruguay"]),
                encoded_question("Which sport uses a shuttlecock?", "Badminton", &["Squash", "Tennis", "Pelota"]),
            ]
        });

        Mock::given(method("GET"))
            .and(path("/api.php"))
            .and(query_param("amount", "2"))
            .and(query_param("category", "21"))
            .and(query_param("difficulty", "hard"))
            .and(query_param("type", "multiple"))
            .and(query_param("encode", "base64"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let source = OpenTdbSource::new(&server.uri(), 5).unwrap();
        let request = QuestionRequest::sports(Difficulty::Hard).with_amount(2);
        let questions = source.fetch_questions(&request).await.unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].prompt(), "Who won the 2010 FIFA World Cup?");
        assert_eq!(questions[0].correct_answer(), "Spain");
        assert_eq!(questions[0].options().len(), 4);
        assert!(questions[0].options().contains(&"Uruguay".to_string()));
        assert_eq!(questions[1].correct_answer(), "Badminton");
    }

    #[tokio::test]
    async fn non_zero_response_code_is_no_results() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api.php"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"response_code": 1, "results": []})),
            )
            .mount(&server)
            .await;

        let source = OpenTdbSource::new(&server.uri(), 5).unwrap();
        let err = source
            .fetch_questions(&QuestionRequest::sports(Difficulty::Hard))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SourceError>(),
            Some(SourceError::NoResults { code: 1 })
        ));
        assert!(err.to_string().contains("couldn't provide questions"));
    }

    #[tokio::test]
    async fn rate_limit_response_code() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api.php"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"response_code": 5, "results": []})),
            )
            .mount(&server)
            .await;

        let source = OpenTdbSource::new(&server.uri(), 5).unwrap();
        let err = source
            .fetch_questions(&QuestionRequest::sports(Difficulty::Easy))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SourceError>(),
            Some(SourceError::RateLimited)
        ));
    }

    #[tokio::test]
    async fn http_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api.php"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let source = OpenTdbSource::new(&server.uri(), 5).unwrap();
        let err = source
            .fetch_questions(&QuestionRequest::sports(Difficulty::Medium))
            .await
            .unwrap_err();
        match err.downcast_ref::<SourceError>() {
            Some(SourceError::ApiError { status, message }) => {
                assert_eq!(*status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        // Nothing listens on port 9 (discard) in the test environment.
        let source = OpenTdbSource::new("http://127.0.0.1:9", 2).unwrap();
        let err = source
            .fetch_questions(&QuestionRequest::sports(Difficulty::Easy))
            .await
            .unwrap_err();
        let source_err = err.downcast_ref::<SourceError>().unwrap();
        assert!(source_err.is_connectivity());
    }

    #[test]
    fn decode_field_handles_utf8_and_garbage() {
        assert_eq!(decode_field(&b64("Pelé")), "Pelé");
        assert_eq!(decode_field("not base64!"), "not base64!");
    }

    #[test]
    fn assembled_question_keeps_every_option() {
        let q = assemble_question(
            "Q".into(),
            "A".into(),
            vec!["B".into(), "C".into(), "D".into()],
        )
        .unwrap();
        let mut options = q.options().to_vec();
        options.sort();
        assert_eq!(options, vec!["A", "B", "C", "D"]);
        assert_eq!(q.correct_answer(), "A");
    }

    #[test]
    fn url_uses_lowercase_parameters() {
        let source = OpenTdbSource::new("https://example.test/", 5).unwrap();
        let url = source.url_for(&QuestionRequest::sports(Difficulty::Medium));
        assert_eq!(
            url,
            "https://example.test/api.php?amount=10&category=21&difficulty=medium&type=multiple&encode=base64"
        );
    }
}
