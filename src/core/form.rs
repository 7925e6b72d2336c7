use crate::domain::model::{parse_number, FieldKind, FormRecord, Variant};
use crate::domain::onehot::{decode_selections, Group};
use crate::domain::presets::ExampleRecord;
use crate::utils::error::{PredictError, Result};
use std::collections::BTreeMap;

/// 表單狀態：record 加上每個 one-hot 群組目前選到的邏輯值。
///
/// 每個轉換都回傳新的 `FormState`，舊值不會被就地修改。
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    record: FormRecord,
    selections: BTreeMap<Group, usize>,
}

impl FormState {
    pub fn new(variant: Variant) -> Self {
        let record = FormRecord::new(variant);
        let selections = decode_selections(&record);
        Self { record, selections }
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn variant(&self) -> Variant {
        self.record.variant()
    }

    pub fn selection(&self, group: Group) -> Option<usize> {
        self.selections.get(&group).copied()
    }

    pub fn selections(&self) -> impl Iterator<Item = (Group, usize)> + '_ {
        self.selections.iter().map(|(group, value)| (*group, *value))
    }

    /// 只替換 `name` 一欄；不做範圍檢查，無法解析的輸入會變成 NaN
    pub fn update_field(&self, name: &str, raw: &str) -> Result<Self> {
        let spec = self
            .variant()
            .field(name)
            .ok_or_else(|| PredictError::UnknownFieldError {
                variant: self.variant().to_string(),
                field: name.to_string(),
            })?;

        if let FieldKind::Encoded(group, _) = spec.kind {
            return Err(PredictError::EncodedFieldError {
                field: name.to_string(),
                group: group.name().to_string(),
            });
        }

        let value = parse_number(raw);
        tracing::debug!("✏️ {} = {} (raw '{}')", name, value, raw);

        Ok(Self {
            record: self.record.with_value(name, value)?,
            selections: self.selections.clone(),
        })
    }

    pub fn update_categorical(&self, group: Group, value: usize) -> Result<Self> {
        if !self.variant().groups().contains(&group) {
            return Err(PredictError::UnknownFieldError {
                variant: self.variant().to_string(),
                field: group.name().to_string(),
            });
        }

        let encoded = group.encode(value)?;
        let [first, second] = group.fields();
        let record = self
            .record
            .with_value(first, encoded[0])?
            .with_value(second, encoded[1])?;

        let mut selections = self.selections.clone();
        selections.insert(group, value);

        tracing::debug!(
            "🔀 {} → {} ({}={}, {}={})",
            group,
            group.choice_label(value).unwrap_or("?"),
            first,
            encoded[0],
            second,
            encoded[1]
        );

        Ok(Self { record, selections })
    }

    /// 整張 record 換成範例資料，並由 one-hot 欄位反查所有群組的選擇
    pub fn apply_preset(&self, example: &ExampleRecord) -> Result<Self> {
        if example.record.variant() != self.variant() {
            return Err(PredictError::VariantMismatchError {
                preset: example.name.clone(),
                expected: example.record.variant().to_string(),
                actual: self.variant().to_string(),
            });
        }

        tracing::debug!("📋 Applying preset '{}'", example.name);
        let record = example.record.clone();
        let selections = decode_selections(&record);
        Ok(Self { record, selections })
    }
}
