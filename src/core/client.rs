use crate::core::{EndpointProvider, FormRecord, PredictionService};
use crate::utils::error::{PredictError, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// 依瀏覽器的 truthy/falsy 規則解讀回應值；`null` 視為沒有回應
pub fn interpret_truthy(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan())),
        Value::String(s) => Some(!s.is_empty()),
        Value::Array(_) | Value::Object(_) => Some(true),
    }
}

/// POST 到固定端點的預測服務客戶端。只送一次，不重試
pub struct HttpPredictionClient<C: EndpointProvider> {
    config: C,
    client: Client,
    timeout: Option<Duration>,
}

impl<C: EndpointProvider> HttpPredictionClient<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        self.config.endpoint()
    }
}

#[async_trait::async_trait]
impl<C: EndpointProvider> PredictionService for HttpPredictionClient<C> {
    async fn predict(&self, record: &FormRecord) -> Result<bool> {
        let body = record.to_json()?;
        tracing::debug!("📡 POST {} ({} bytes)", self.config.endpoint(), body.len());

        let mut request = self
            .client
            .post(self.config.endpoint())
            .header("Content-Type", "application/json")
            .body(body);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 Prediction service status: {}", status);

        if !status.is_success() {
            return Err(PredictError::HttpStatusError {
                status: status.as_u16(),
            });
        }

        // 先取文字再解析，格式錯誤時才能歸到 SerializationError
        let text = response.text().await?;
        let json: Value = serde_json::from_str(&text)?;

        let field = self.config.response_field();
        json.get(field)
            .and_then(interpret_truthy)
            .ok_or_else(|| PredictError::MissingFieldError {
                field: field.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Variant;
    use crate::utils::error::FailureKind;
    use httpmock::prelude::*;
    use serde_json::json;

    struct MockEndpoint {
        endpoint: String,
        response_field: String,
    }

    impl MockEndpoint {
        fn new(endpoint: String, response_field: &str) -> Self {
            Self {
                endpoint,
                response_field: response_field.to_string(),
            }
        }
    }

    impl EndpointProvider for MockEndpoint {
        fn endpoint(&self) -> &str {
            &self.endpoint
        }

        fn response_field(&self) -> &str {
            &self.response_field
        }
    }

    #[test]
    fn test_interpret_truthy() {
        assert_eq!(interpret_truthy(&json!(true)), Some(true));
        assert_eq!(interpret_truthy(&json!(false)), Some(false));
        assert_eq!(interpret_truthy(&json!(1)), Some(true));
        assert_eq!(interpret_truthy(&json!(0)), Some(false));
        assert_eq!(interpret_truthy(&json!(0.73)), Some(true));
        assert_eq!(interpret_truthy(&json!("")), Some(false));
        assert_eq!(interpret_truthy(&json!("yes")), Some(true));
        assert_eq!(interpret_truthy(&json!([])), Some(true));
        assert_eq!(interpret_truthy(&Value::Null), None);
    }

    #[tokio::test]
    async fn test_predict_posts_record_as_json() {
        let server = MockServer::start();
        let record = FormRecord::new(Variant::Churn);

        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/predict")
                .header("content-type", "application/json")
                .json_body(serde_json::to_value(&record).unwrap());
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"prediction": 1, "churn_probability": true}));
        });

        let client = HttpPredictionClient::new(MockEndpoint::new(
            server.url("/predict"),
            "churn_probability",
        ));

        let result = client.predict(&record).await.unwrap();

        api_mock.assert();
        assert!(result);
    }

    #[tokio::test]
    async fn test_predict_non_success_status() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/predict");
            then.status(400)
                .json_body(json!({"error": "'callFailure'"}));
        });

        let client = HttpPredictionClient::new(MockEndpoint::new(
            server.url("/predict"),
            "churn_probability",
        ));

        let err = client
            .predict(&FormRecord::new(Variant::Churn))
            .await
            .unwrap_err();

        api_mock.assert();
        assert!(matches!(err, PredictError::HttpStatusError { status: 400 }));
        assert_eq!(err.failure_kind(), Some(FailureKind::RequestFailure));
    }

    #[tokio::test]
    async fn test_predict_missing_or_null_field() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/missing");
            then.status(200).json_body(json!({"churn_probability": true}));
        });
        server.mock(|when, then| {
            when.method(POST).path("/null");
            then.status(200).json_body(json!({"hired_probability": null}));
        });

        let missing = HttpPredictionClient::new(MockEndpoint::new(
            server.url("/missing"),
            "hired_probability",
        ));
        let null = HttpPredictionClient::new(MockEndpoint::new(
            server.url("/null"),
            "hired_probability",
        ));
        let record = FormRecord::new(Variant::Hiring);

        assert!(matches!(
            missing.predict(&record).await,
            Err(PredictError::MissingFieldError { .. })
        ));
        assert!(matches!(
            null.predict(&record).await,
            Err(PredictError::MissingFieldError { .. })
        ));
    }

    #[tokio::test]
    async fn test_predict_malformed_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/predict");
            then.status(200).body("<html>oops</html>");
        });

        let client = HttpPredictionClient::new(MockEndpoint::new(
            server.url("/predict"),
            "churn_probability",
        ));

        let err = client
            .predict(&FormRecord::new(Variant::Churn))
            .await
            .unwrap_err();
        assert!(matches!(err, PredictError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_predict_connection_refused() {
        // 沒有服務在聽的 port
        let client = HttpPredictionClient::new(MockEndpoint::new(
            "http://127.0.0.1:9/predict".to_string(),
            "churn_probability",
        ))
        .with_timeout(Duration::from_secs(2));

        let err = client
            .predict(&FormRecord::new(Variant::Churn))
            .await
            .unwrap_err();
        assert!(matches!(err, PredictError::ApiError(_)));
        assert_eq!(err.failure_kind(), Some(FailureKind::RequestFailure));
    }
}
