//! Mock tag generator for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use curio_inference::mock::MockTagGenerator;
//!
//! let generator = MockTagGenerator::new().with_fixed_response("Biology, Genetics");
//! let raw = generator.generate_tags("summary", "url").await.unwrap();
//! assert_eq!(raw, "Biology, Genetics");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use curio_core::{Error, Result, TagGenerator};

/// Mock tag generator for testing.
#[derive(Clone)]
pub struct MockTagGenerator {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    default_response: String,
    mapped_responses: HashMap<String, String>,
    fail: bool,
}

/// One recorded generate_tags invocation.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub summary: String,
    pub url: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_response: "Mock Tag A, Mock Tag B".to_string(),
            mapped_responses: HashMap::new(),
            fail: false,
        }
    }
}

impl MockTagGenerator {
    /// Create a new mock generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response returned for any unmapped input.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Map a specific summary to a specific response.
    pub fn with_response_mapping(
        mut self,
        summary: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .mapped_responses
            .insert(summary.into(), response.into());
        self
    }

    /// Make every call fail, for provider-failure paths.
    pub fn failing(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail = true;
        self
    }

    /// All recorded calls, for assertions.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of generate_tags calls made.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

impl Default for MockTagGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagGenerator for MockTagGenerator {
    async fn generate_tags(&self, summary: &str, url: &str) -> Result<String> {
        self.call_log.lock().unwrap().push(MockCall {
            summary: summary.to_string(),
            url: url.to_string(),
        });

        if self.config.fail {
            return Err(Error::Inference("Simulated provider failure".to_string()));
        }

        if let Some(response) = self.config.mapped_responses.get(summary) {
            return Ok(response.clone());
        }

        Ok(self.config.default_response.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fixed_response() {
        let generator = MockTagGenerator::new().with_fixed_response("Biology, Genetics");
        let raw = generator.generate_tags("s", "u").await.unwrap();
        assert_eq!(raw, "Biology, Genetics");
    }

    #[tokio::test]
    async fn test_mock_response_mapping() {
        let generator = MockTagGenerator::new()
            .with_response_mapping("dna summary", "Genetics, Biochemistry")
            .with_fixed_response("Fallback");

        assert_eq!(
            generator.generate_tags("dna summary", "u").await.unwrap(),
            "Genetics, Biochemistry"
        );
        assert_eq!(generator.generate_tags("other", "u").await.unwrap(), "Fallback");
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let generator = MockTagGenerator::new().failing();
        assert!(generator.generate_tags("s", "u").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_call_logging() {
        let generator = MockTagGenerator::new();
        generator.generate_tags("s1", "u1").await.unwrap();
        generator.generate_tags("s2", "u2").await.unwrap();

        assert_eq!(generator.call_count(), 2);
        let calls = generator.get_calls();
        assert_eq!(calls[0].summary, "s1");
        assert_eq!(calls[1].url, "u2");
    }
}
