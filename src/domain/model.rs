use crate::domain::onehot::Group;
use crate::utils::error::{PredictError, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// 表單的欄位結構。churn 與 hiring 兩種
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Churn,
    Hiring,
}

impl Variant {
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Variant::Churn => CHURN_FIELDS,
            Variant::Hiring => HIRING_FIELDS,
        }
    }

    /// 這個結構有哪些 one-hot 群組
    pub fn groups(&self) -> &'static [Group] {
        match self {
            Variant::Churn => &[],
            Variant::Hiring => &Group::ALL,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|spec| spec.name == name)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Churn => write!(f, "churn"),
            Variant::Hiring => write!(f, "hiring"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Flag,
    /// one-hot 群組中的第 n 個編碼欄位
    Encoded(Group, usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// None 表示畫面標籤由 key 推導
    pub label: Option<&'static str>,
    pub kind: FieldKind,
    pub default: f64,
}

const fn numeric(name: &'static str, default: f64) -> FieldSpec {
    FieldSpec {
        name,
        label: None,
        kind: FieldKind::Numeric,
        default,
    }
}

const fn labelled(name: &'static str, label: &'static str, kind: FieldKind, default: f64) -> FieldSpec {
    FieldSpec {
        name,
        label: Some(label),
        kind,
        default,
    }
}

pub const CHURN_FIELDS: &[FieldSpec] = &[
    numeric("callFailure", 0.0),
    numeric("complains", 0.0),
    numeric("subscriptionLength", 0.0),
    numeric("chargeAmount", 0.0),
    numeric("secondsOfUse", 0.0),
    numeric("frequencyOfUse", 0.0),
    numeric("frequencyOfSMS", 0.0),
    numeric("distinctCalledNumbers", 0.0),
    numeric("ageGroup", 1.0),
    numeric("tariffPlan", 1.0),
    numeric("status", 1.0),
    numeric("age", 18.0),
    numeric("customerValue", 0.0),
];

pub const HIRING_FIELDS: &[FieldSpec] = &[
    labelled("motivation", "Motivation", FieldKind::Numeric, 0.0),
    labelled("age", "Age", FieldKind::Numeric, 18.0),
    labelled("university_degree", "University Degree", FieldKind::Flag, 0.0),
    labelled("previous_experience", "Previous Experience", FieldKind::Flag, 0.0),
    labelled("technical_skills", "Technical Skills", FieldKind::Flag, 0.0),
    labelled(
        "productivity_unproductive",
        "Productivity",
        FieldKind::Encoded(Group::Productivity, 0),
        0.0,
    ),
    labelled(
        "productivity_productive",
        "Productivity",
        FieldKind::Encoded(Group::Productivity, 1),
        0.0,
    ),
    labelled(
        "willingness_to_learn_ready",
        "Willingness To Learn",
        FieldKind::Encoded(Group::WillingnessToLearn, 0),
        0.0,
    ),
    labelled(
        "willingness_to_learn_very_ready",
        "Willingness To Learn",
        FieldKind::Encoded(Group::WillingnessToLearn, 1),
        0.0,
    ),
    labelled(
        "temporal_availability_low",
        "Temporal Availability",
        FieldKind::Encoded(Group::TemporalAvailability, 0),
        0.0,
    ),
    labelled(
        "temporal_availability_medium",
        "Temporal Availability",
        FieldKind::Encoded(Group::TemporalAvailability, 1),
        0.0,
    ),
];

/// 瀏覽器 number input 的轉換規則：空字串為 0，無法解析為 NaN
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// 扁平的「欄位名稱 → 數值」對應，順序固定為 schema 順序
#[derive(Debug, Clone, PartialEq)]
pub struct FormRecord {
    variant: Variant,
    values: Vec<f64>,
}

impl FormRecord {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            values: variant.fields().iter().map(|spec| spec.default).collect(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.variant
            .fields()
            .iter()
            .position(|spec| spec.name == name)
            .ok_or_else(|| PredictError::UnknownFieldError {
                variant: self.variant.to_string(),
                field: name.to_string(),
            })
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.index_of(name).ok().map(|i| self.values[i])
    }

    /// 回傳新的 record，只改動 `name` 這一欄
    pub fn with_value(&self, name: &str, value: f64) -> Result<Self> {
        let index = self.index_of(name)?;
        let mut values = self.values.clone();
        values[index] = value;
        Ok(Self {
            variant: self.variant,
            values,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldSpec, f64)> + '_ {
        self.variant.fields().iter().zip(self.values.iter().copied())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// JSON 輸出規則：整數值寫成整數，非有限值寫成 null
struct PayloadNumber(f64);

impl Serialize for PayloadNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let value = self.0;
        if !value.is_finite() {
            serializer.serialize_none()
        } else if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

impl Serialize for FormRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (spec, value) in self.iter() {
            map.serialize_entry(spec.name, &PayloadNumber(value))?;
        }
        map.end()
    }
}
