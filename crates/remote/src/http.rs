use std::env;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use assess_core::model::{
    AssessmentReport, BatchKind, BinaryQuestion, ChoiceQuestion, OptionId, PassageQuestion,
    Question, QuestionBatch, QuestionId, QuestionOption, Tier,
};

use crate::repository::{QuestionSource, RemoteError, ResultSink};

/// Connection settings for the assessment backend.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: Url,
    pub auth_token: Option<String>,
}

impl ApiConfig {
    /// Read the backend endpoint from the environment.
    ///
    /// Returns `None` when `ASSESS_API_BASE_URL` is unset or unparseable, so
    /// callers can fall back to an offline source.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("ASSESS_API_BASE_URL").ok()?;
        let base_url = Url::parse(&base_url).ok()?;
        let auth_token = env::var("ASSESS_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        Some(Self {
            base_url,
            auth_token,
        })
    }
}

/// HTTP client for the level-test endpoints.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
}

impl HttpApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.config
            .base_url
            .join(path)
            .map_err(|e| RemoteError::Connection(e.to_string()))
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

fn check_status(status: StatusCode) -> Result<(), RemoteError> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::NOT_FOUND {
        return Err(RemoteError::NotFound);
    }
    Err(RemoteError::Status(status.as_u16()))
}

#[async_trait]
impl QuestionSource for HttpApi {
    async fn fetch_batch(&self, kind: BatchKind) -> Result<QuestionBatch, RemoteError> {
        let url = self.endpoint(&format!("level-test/questions/{kind}"))?;
        debug!(%kind, "fetching question batch");

        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| RemoteError::Connection(e.to_string()))?;

        if let Err(err) = check_status(response.status()) {
            warn!(%kind, status = response.status().as_u16(), "question fetch rejected");
            return Err(err);
        }

        let body: BatchDto = response
            .json()
            .await
            .map_err(|e| RemoteError::Payload(e.to_string()))?;
        body.into_batch(kind)
    }
}

#[async_trait]
impl ResultSink for HttpApi {
    async fn submit_report(&self, report: &AssessmentReport) -> Result<(), RemoteError> {
        let url = self.endpoint("level-test/result")?;
        debug!(attempt = %report.attempt_id(), "submitting assessment result");

        let response = self
            .authorized(self.client.post(url))
            .json(&ReportDto::from_report(report))
            .send()
            .await
            .map_err(|e| RemoteError::Connection(e.to_string()))?;

        // One-way call: the response body, if any, is dropped.
        if let Err(err) = check_status(response.status()) {
            warn!(
                attempt = %report.attempt_id(),
                status = response.status().as_u16(),
                "result submission rejected"
            );
            return Err(err);
        }
        Ok(())
    }
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct BatchDto {
    questions: Vec<QuestionDto>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum QuestionDto {
    MultipleChoice {
        id: u64,
        label: String,
        prompt: String,
        options: Vec<OptionDto>,
        answer_option_id: u64,
    },
    Binary {
        id: u64,
        label: String,
        prompt: String,
        answer: bool,
    },
    PassageMultipleChoice {
        id: u64,
        label: String,
        prompt: String,
        passage: String,
        options: Vec<OptionDto>,
        answer_option_id: u64,
    },
}

#[derive(Debug, Deserialize)]
struct OptionDto {
    id: u64,
    text: String,
}

impl BatchDto {
    fn into_batch(self, kind: BatchKind) -> Result<QuestionBatch, RemoteError> {
        let questions = self
            .questions
            .into_iter()
            .map(QuestionDto::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        QuestionBatch::new(kind, questions).map_err(|e| RemoteError::Payload(e.to_string()))
    }
}

impl QuestionDto {
    fn into_question(self) -> Result<Question, RemoteError> {
        let question = match self {
            QuestionDto::MultipleChoice {
                id,
                label,
                prompt,
                options,
                answer_option_id,
            } => ChoiceQuestion::new(
                QuestionId::new(id),
                label,
                prompt,
                options.into_iter().map(OptionDto::into_option).collect(),
                OptionId::new(answer_option_id),
            )
            .map(Question::MultipleChoice),
            QuestionDto::Binary {
                id,
                label,
                prompt,
                answer,
            } => BinaryQuestion::new(QuestionId::new(id), label, prompt, answer)
                .map(Question::BinaryChoice),
            QuestionDto::PassageMultipleChoice {
                id,
                label,
                prompt,
                passage,
                options,
                answer_option_id,
            } => PassageQuestion::new(
                QuestionId::new(id),
                label,
                prompt,
                passage,
                options.into_iter().map(OptionDto::into_option).collect(),
                OptionId::new(answer_option_id),
            )
            .map(Question::PassageMultipleChoice),
        };
        question.map_err(|e| RemoteError::Payload(e.to_string()))
    }
}

impl OptionDto {
    fn into_option(self) -> QuestionOption {
        QuestionOption::new(OptionId::new(self.id), self.text)
    }
}

#[derive(Debug, Serialize)]
struct ReportDto {
    attempt_id: String,
    nickname: &'static str,
    vocabulary_tier: Tier,
    reading_tier: Tier,
    vocabulary_correct: u32,
    reading_correct: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl ReportDto {
    fn from_report(report: &AssessmentReport) -> Self {
        Self {
            attempt_id: report.attempt_id().to_string(),
            nickname: report.nickname().text(),
            vocabulary_tier: report.vocabulary_tier(),
            reading_tier: report.reading_tier(),
            vocabulary_correct: report.vocabulary_correct(),
            reading_correct: report.reading_correct(),
            started_at: report.started_at(),
            completed_at: report.completed_at(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use assess_core::model::{AttemptId, Nickname};
    use assess_core::time::fixed_now;

    #[test]
    fn batch_payload_parses_into_domain_questions() {
        let payload = serde_json::json!({
            "questions": [
                {
                    "type": "multiple_choice",
                    "id": 1,
                    "label": "Q1",
                    "prompt": "다음 중 '말뭉치'의 뜻은?",
                    "options": [
                        { "id": 1, "text": "글자들의 묶음" },
                        { "id": 2, "text": "언어 자료의 집합" }
                    ],
                    "answer_option_id": 2
                }
            ]
        });

        let dto: BatchDto = serde_json::from_value(payload).unwrap();
        let batch = dto.into_batch(BatchKind::Vocabulary).unwrap();

        assert_eq!(batch.len(), 1);
        let question = &batch.questions()[0];
        assert_eq!(question.id(), QuestionId::new(1));
        assert!(question.is_correct(&assess_core::model::Selection::Choice(OptionId::new(2))));
    }

    #[test]
    fn malformed_answer_reference_is_a_payload_error() {
        let payload = serde_json::json!({
            "questions": [
                {
                    "type": "multiple_choice",
                    "id": 1,
                    "label": "Q1",
                    "prompt": "뜻은?",
                    "options": [ { "id": 1, "text": "가" } ],
                    "answer_option_id": 7
                }
            ]
        });

        let dto: BatchDto = serde_json::from_value(payload).unwrap();
        let err = dto.into_batch(BatchKind::Vocabulary).unwrap_err();
        assert!(matches!(err, RemoteError::Payload(_)));
    }

    #[test]
    fn binary_payload_parses() {
        let payload = serde_json::json!({
            "questions": [
                { "type": "binary", "id": 10, "label": "Q10", "prompt": "맞으면 O", "answer": false }
            ]
        });

        let dto: BatchDto = serde_json::from_value(payload).unwrap();
        let batch = dto.into_batch(BatchKind::Binary).unwrap();
        assert!(batch.questions()[0].is_correct(&assess_core::model::Selection::Binary(false)));
    }

    #[test]
    fn report_serializes_with_wire_names() {
        let report = AssessmentReport::from_parts(
            AttemptId::generate(),
            Nickname::MeaningInterpreter,
            Tier::High,
            Tier::Mid,
            7,
            6,
            fixed_now(),
            fixed_now(),
        )
        .unwrap();

        let value = serde_json::to_value(ReportDto::from_report(&report)).unwrap();
        assert_eq!(value["nickname"], "의미해석가");
        assert_eq!(value["vocabulary_tier"], "high");
        assert_eq!(value["reading_tier"], "mid");
        assert_eq!(value["vocabulary_correct"], 7);
    }
}
