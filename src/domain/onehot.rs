//! Categorical selections that the prediction service receives as pairs of 0/1 fields.
//!
//! Every group has three logical values. The third one has no field of its own and is sent
//! as both fields set to 0, so the selected value is kept next to the record.

use crate::domain::model::FormRecord;
use crate::utils::error::{PredictError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// logical index → (field[0], field[1])
pub const ENCODING: [[f64; 2]; 3] = [[1.0, 0.0], [0.0, 1.0], [0.0, 0.0]];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Group {
    Productivity,
    WillingnessToLearn,
    TemporalAvailability,
}

impl Group {
    pub const ALL: [Group; 3] = [
        Group::Productivity,
        Group::WillingnessToLearn,
        Group::TemporalAvailability,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Group::Productivity => "productivity",
            Group::WillingnessToLearn => "willingness_to_learn",
            Group::TemporalAvailability => "temporal_availability",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Group::Productivity => "Productivity",
            Group::WillingnessToLearn => "Willingness To Learn",
            Group::TemporalAvailability => "Temporal Availability",
        }
    }

    pub fn fields(&self) -> [&'static str; 2] {
        match self {
            Group::Productivity => ["productivity_unproductive", "productivity_productive"],
            Group::WillingnessToLearn => [
                "willingness_to_learn_ready",
                "willingness_to_learn_very_ready",
            ],
            Group::TemporalAvailability => [
                "temporal_availability_low",
                "temporal_availability_medium",
            ],
        }
    }

    /// 下拉選單的選項，索引即邏輯值，順序對齊 `ENCODING`
    pub fn choices(&self) -> [&'static str; 3] {
        match self {
            Group::Productivity => ["unproductive", "productive", "highly productive"],
            Group::WillingnessToLearn => ["ready", "very ready", "not ready"],
            Group::TemporalAvailability => ["low", "medium", "high"],
        }
    }

    pub fn choice_label(&self, value: usize) -> Option<&'static str> {
        self.choices().get(value).copied()
    }

    pub fn encode(&self, value: usize) -> Result<[f64; 2]> {
        ENCODING
            .get(value)
            .copied()
            .ok_or_else(|| PredictError::InvalidSelectionError {
                group: self.name().to_string(),
                value: value.to_string(),
            })
    }

    /// 反查：第一欄為 1 → 0，第二欄為 1 → 1，其餘 → 2
    pub fn decode(&self, encoded: [f64; 2]) -> usize {
        ENCODING
            .iter()
            .position(|row| (row[0] == 1.0 && encoded[0] == 1.0) || (row[1] == 1.0 && encoded[1] == 1.0))
            .unwrap_or(ENCODING.len() - 1)
    }

    /// 接受索引 (`0`..`2`) 或選項名稱，名稱中的 `_`、`-` 視為空白
    pub fn parse_choice(&self, raw: &str) -> Result<usize> {
        let normalized = raw.trim().to_lowercase().replace(['_', '-'], " ");
        if let Ok(index) = normalized.parse::<usize>() {
            self.encode(index)?;
            return Ok(index);
        }
        self.choices()
            .iter()
            .position(|choice| *choice == normalized)
            .ok_or_else(|| PredictError::InvalidSelectionError {
                group: self.name().to_string(),
                value: raw.to_string(),
            })
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Group {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Group::ALL
            .into_iter()
            .find(|group| group.name() == normalized)
            .ok_or_else(|| PredictError::UnknownFieldError {
                variant: "hiring".to_string(),
                field: s.to_string(),
            })
    }
}

/// 由 record 的編碼欄位反查每個群組的選擇
pub fn decode_selections(record: &FormRecord) -> BTreeMap<Group, usize> {
    record
        .variant()
        .groups()
        .iter()
        .map(|group| {
            let [first, second] = group.fields();
            let encoded = [
                record.get(first).unwrap_or(0.0),
                record.get(second).unwrap_or(0.0),
            ];
            (*group, group.decode(encoded))
        })
        .collect()
}
