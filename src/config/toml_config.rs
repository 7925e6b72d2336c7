use crate::domain::kind::FormKind;
use crate::domain::model::Variant;
use crate::domain::ports::EndpointProvider;
use crate::domain::presets::{ExampleRecord, PresetCatalog};
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::{validate_endpoint, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// 部署設定檔。端點在啟動時決定，執行期間不可更改
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploymentConfig {
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub presets: Vec<PresetConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointsConfig {
    pub churn: Option<String>,
    pub hiring: Option<String>,
    pub hiring_examples: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetConfig {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub data: BTreeMap<String, f64>,
}

/// 一張表單實際使用的端點
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEndpoint {
    pub kind: FormKind,
    pub url: String,
}

impl EndpointProvider for FormEndpoint {
    fn endpoint(&self) -> &str {
        &self.url
    }

    fn response_field(&self) -> &str {
        self.kind.response_field()
    }
}

impl DeploymentConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PredictError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| PredictError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn endpoint_for(&self, kind: FormKind) -> FormEndpoint {
        let configured = match kind {
            FormKind::Churn => self.endpoints.churn.as_deref(),
            FormKind::Hiring => self.endpoints.hiring.as_deref(),
            FormKind::HiringExamples => self.endpoints.hiring_examples.as_deref(),
        };

        FormEndpoint {
            kind,
            url: configured.unwrap_or(kind.default_endpoint()).to_string(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.client.timeout_seconds.map(Duration::from_secs)
    }

    /// 內建範例加上設定檔中的範例
    pub fn preset_catalog(&self) -> Result<PresetCatalog> {
        let mut catalog = PresetCatalog::builtin()?;
        let extra = self
            .presets
            .iter()
            .map(|preset| {
                ExampleRecord::from_values(
                    preset.name.clone(),
                    preset.image.clone(),
                    Variant::Hiring,
                    preset.data.iter().map(|(field, value)| (field.as_str(), *value)),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        catalog.extend(extra);
        Ok(catalog)
    }
}

impl Validate for DeploymentConfig {
    fn validate(&self) -> Result<()> {
        for kind in FormKind::ALL {
            let endpoint = self.endpoint_for(kind);
            validate_endpoint(&format!("endpoints.{}", kind.config_key()), &endpoint.url)?;
        }

        if let Some(timeout) = self.client.timeout_seconds {
            validate_positive_number("client.timeout_seconds", timeout, 1)?;
        }

        // 範例資料在建立時會檢查欄位名稱與 one-hot 規則
        self.preset_catalog()?;
        Ok(())
    }
}
