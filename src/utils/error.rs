use thiserror::Error;

/// 給使用者看的固定訊息，所有請求失敗都顯示這一句
pub const REQUEST_FAILURE_MESSAGE: &str = "Failed to get prediction. Please try again.";

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Prediction service returned status {status}")]
    HttpStatusError { status: u16 },

    #[error("Response is missing field '{field}'")]
    MissingFieldError { field: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unknown field '{field}' for {variant} form")]
    UnknownFieldError { variant: String, field: String },

    #[error("Field '{field}' is encoded from the '{group}' selection")]
    EncodedFieldError { field: String, group: String },

    #[error("Invalid selection '{value}' for '{group}'")]
    InvalidSelectionError { group: String, value: String },

    #[error("Unknown preset '{name}'")]
    UnknownPresetError { name: String },

    #[error("The {form} form has no example records")]
    PresetsUnavailableError { form: String },

    #[error("Preset '{preset}' targets the {expected} form, not {actual}")]
    VariantMismatchError {
        preset: String,
        expected: String,
        actual: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 請求失敗的種類。目前刻意收斂成一種，之後要細分時只需要加 variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    RequestFailure,
}

impl FailureKind {
    pub fn message(&self) -> &'static str {
        match self {
            FailureKind::RequestFailure => REQUEST_FAILURE_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PredictError {
    /// 請求相關錯誤一律對應到 `FailureKind::RequestFailure`，其他錯誤回傳 None
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            PredictError::ApiError(_)
            | PredictError::HttpStatusError { .. }
            | PredictError::MissingFieldError { .. }
            | PredictError::SerializationError(_) => Some(FailureKind::RequestFailure),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PredictError::ApiError(_)
            | PredictError::HttpStatusError { .. }
            | PredictError::MissingFieldError { .. }
            | PredictError::SerializationError(_) => ErrorCategory::Network,
            PredictError::UnknownFieldError { .. }
            | PredictError::EncodedFieldError { .. }
            | PredictError::InvalidSelectionError { .. }
            | PredictError::UnknownPresetError { .. }
            | PredictError::PresetsUnavailableError { .. }
            | PredictError::VariantMismatchError { .. } => ErrorCategory::Input,
            PredictError::ConfigError { .. } | PredictError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            PredictError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the prediction service is running, then submit again",
            ErrorCategory::Input => "Run `prediction-form fields <form>` to see the accepted fields and choices",
            ErrorCategory::Configuration => "Fix the deployment config file and try again",
            ErrorCategory::System => "Check file permissions and paths",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.failure_kind() {
            Some(kind) => kind.message().to_string(),
            None => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;
