use crate::domain::model::Variant;
use std::fmt;
use std::str::FromStr;

pub const CHURN_ENDPOINT: &str = "http://localhost:5000/predict";
pub const HIRING_ENDPOINT: &str = "http://127.0.0.1:8080/predict";
pub const HIRING_PRODUCTION_ENDPOINT: &str = "https://hiring-prediction.example.com/predict";

pub const LOADING_LABEL: &str = "Predicting...";

/// 已部署的表單頁面。每一種都綁定固定的端點與回應欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum FormKind {
    Churn,
    Hiring,
    HiringExamples,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Churn, FormKind::Hiring, FormKind::HiringExamples];

    pub fn variant(&self) -> Variant {
        match self {
            FormKind::Churn => Variant::Churn,
            FormKind::Hiring | FormKind::HiringExamples => Variant::Hiring,
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            FormKind::Churn => CHURN_ENDPOINT,
            FormKind::Hiring => HIRING_ENDPOINT,
            FormKind::HiringExamples => HIRING_PRODUCTION_ENDPOINT,
        }
    }

    pub fn response_field(&self) -> &'static str {
        match self.variant() {
            Variant::Churn => "churn_probability",
            Variant::Hiring => "hired_probability",
        }
    }

    pub fn title(&self) -> &'static str {
        match self.variant() {
            Variant::Churn => "Churn Prediction",
            Variant::Hiring => "Hiring Prediction",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self.variant() {
            Variant::Churn => "Enter customer data to predict churn probability",
            Variant::Hiring => "Enter applicant data to predict the hiring decision",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.variant() {
            Variant::Churn => "Predict Churn",
            Variant::Hiring => "Predict Hiring",
        }
    }

    pub fn outcome_message(&self, positive: bool) -> &'static str {
        match (self.variant(), positive) {
            (Variant::Churn, true) => "Customer is likely to churn",
            (Variant::Churn, false) => "Customer is likely to stay",
            (Variant::Hiring, true) => "Applicant should be hired",
            (Variant::Hiring, false) => "Applicant should not be hired",
        }
    }

    pub fn has_presets(&self) -> bool {
        matches!(self, FormKind::HiringExamples)
    }

    /// 設定檔 `[endpoints]` 表中的 key
    pub fn config_key(&self) -> &'static str {
        match self {
            FormKind::Churn => "churn",
            FormKind::Hiring => "hiring",
            FormKind::HiringExamples => "hiring_examples",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormKind::Churn => write!(f, "churn"),
            FormKind::Hiring => write!(f, "hiring"),
            FormKind::HiringExamples => write!(f, "hiring-examples"),
        }
    }
}

impl FromStr for FormKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        FormKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == normalized)
            .ok_or_else(|| format!("unknown form '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages() {
        assert_eq!(FormKind::Churn.outcome_message(true), "Customer is likely to churn");
        assert_eq!(FormKind::Churn.outcome_message(false), "Customer is likely to stay");
        assert_eq!(FormKind::Hiring.outcome_message(true), "Applicant should be hired");
        assert_eq!(
            FormKind::HiringExamples.outcome_message(false),
            "Applicant should not be hired"
        );
    }

    #[test]
    fn test_kind_bindings() {
        assert_eq!(FormKind::Churn.default_endpoint(), "http://localhost:5000/predict");
        assert_eq!(FormKind::Hiring.default_endpoint(), "http://127.0.0.1:8080/predict");
        assert!(FormKind::HiringExamples.default_endpoint().starts_with("https://"));
        assert_eq!(FormKind::Churn.response_field(), "churn_probability");
        assert_eq!(FormKind::HiringExamples.response_field(), "hired_probability");
        assert!(!FormKind::Hiring.has_presets());
        assert!(FormKind::HiringExamples.has_presets());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("hiring_examples".parse::<FormKind>().unwrap(), FormKind::HiringExamples);
        assert_eq!("Churn".parse::<FormKind>().unwrap(), FormKind::Churn);
        assert!("loans".parse::<FormKind>().is_err());
    }
}
