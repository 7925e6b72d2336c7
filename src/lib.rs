pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::app::runner::{apply_edits, build_controller, run_prediction, FormEdits};
pub use crate::config::{DeploymentConfig, FormEndpoint};
pub use crate::core::{
    client::HttpPredictionClient,
    controller::{FormController, Phase, Snapshot, ViewState},
    form::FormState,
};
pub use crate::domain::{
    kind::FormKind,
    model::{FormRecord, Variant},
    onehot::Group,
    ports::PredictionService,
    presets::{ExampleRecord, PresetCatalog},
};
pub use crate::utils::error::{FailureKind, PredictError, Result};
