use crate::domain::model::{FormRecord, Variant};
use crate::domain::onehot::{decode_selections, Group};
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_one_hot_pair, Validate};

/// 具名的範例資料，一次填滿整張表單
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleRecord {
    pub name: String,
    pub image: String,
    pub record: FormRecord,
}

impl ExampleRecord {
    /// 未列出的欄位沿用表單預設值
    pub fn from_values<'a>(
        name: impl Into<String>,
        image: impl Into<String>,
        variant: Variant,
        values: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self> {
        let mut record = FormRecord::new(variant);
        for (field, value) in values {
            record = record.with_value(field, value)?;
        }

        let example = Self {
            name: name.into(),
            image: image.into(),
            record,
        };
        example.validate()?;
        Ok(example)
    }

    /// 由 one-hot 欄位反查出每個群組的邏輯值
    pub fn selections(&self) -> Vec<(Group, usize)> {
        decode_selections(&self.record).into_iter().collect()
    }
}

impl Validate for ExampleRecord {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("presets.name", &self.name)?;
        for group in self.record.variant().groups() {
            let [first, second] = group.fields();
            validate_one_hot_pair(
                group.name(),
                self.record.get(first).unwrap_or(0.0),
                self.record.get(second).unwrap_or(0.0),
            )?;
        }
        Ok(())
    }
}

const HOMER: &[(&str, f64)] = &[
    ("motivation", 1.0),
    ("age", 39.0),
    ("productivity_unproductive", 1.0),
    ("willingness_to_learn_ready", 1.0),
    ("temporal_availability_low", 1.0),
];

const LISA: &[(&str, f64)] = &[
    ("motivation", 5.0),
    ("age", 24.0),
    ("university_degree", 1.0),
    ("technical_skills", 1.0),
    ("willingness_to_learn_very_ready", 1.0),
];

const NED: &[(&str, f64)] = &[
    ("motivation", 4.0),
    ("age", 45.0),
    ("previous_experience", 1.0),
    ("productivity_productive", 1.0),
    ("willingness_to_learn_ready", 1.0),
    ("temporal_availability_medium", 1.0),
];

/// 範例清單；內建三筆，部署設定檔可再追加
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    examples: Vec<ExampleRecord>,
}

impl PresetCatalog {
    pub fn builtin() -> Result<Self> {
        let examples = vec![
            ExampleRecord::from_values("Homer Simpson", "/images/homer.png", Variant::Hiring, HOMER.iter().copied())?,
            ExampleRecord::from_values("Lisa Simpson", "/images/lisa.png", Variant::Hiring, LISA.iter().copied())?,
            ExampleRecord::from_values("Ned Flanders", "/images/ned.png", Variant::Hiring, NED.iter().copied())?,
        ];
        Ok(Self { examples })
    }

    /// 同名時以新加入的為準
    pub fn extend(&mut self, extra: impl IntoIterator<Item = ExampleRecord>) {
        for example in extra {
            self.examples
                .retain(|existing| !existing.name.eq_ignore_ascii_case(&example.name));
            self.examples.push(example);
        }
    }

    pub fn find(&self, name: &str) -> Result<&ExampleRecord> {
        self.examples
            .iter()
            .find(|example| example.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| PredictError::UnknownPresetError {
                name: name.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExampleRecord> {
        self.examples.iter()
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}
