use crate::domain::model::FormRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 外部預測服務。回傳的布林值已經依 truthy/falsy 規則轉換過
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, record: &FormRecord) -> Result<bool>;
}

pub trait EndpointProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn response_field(&self) -> &str;
}
