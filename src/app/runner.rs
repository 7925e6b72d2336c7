use crate::config::{DeploymentConfig, FormEndpoint};
use crate::core::client::HttpPredictionClient;
use crate::core::controller::{FormController, Snapshot};
use crate::core::{PredictionService, Result};
use crate::domain::kind::FormKind;
use crate::domain::onehot::Group;
use crate::domain::presets::PresetCatalog;
use crate::utils::error::PredictError;

pub type HttpFormController = FormController<HttpPredictionClient<FormEndpoint>>;

/// 一次操作要套用的所有編輯。順序：範例 → 欄位 → 類別選擇
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormEdits {
    pub preset: Option<String>,
    pub set: Vec<(String, String)>,
    pub choose: Vec<(String, String)>,
}

pub fn build_controller(kind: FormKind, config: &DeploymentConfig) -> HttpFormController {
    let endpoint = config.endpoint_for(kind);
    tracing::debug!("🔧 {} form bound to {}", kind, endpoint.url);

    let mut client = HttpPredictionClient::new(endpoint);
    if let Some(timeout) = config.timeout() {
        client = client.with_timeout(timeout);
    }
    FormController::new(kind, client)
}

pub async fn apply_edits<S: PredictionService>(
    controller: &FormController<S>,
    edits: &FormEdits,
    catalog: &PresetCatalog,
) -> Result<()> {
    if let Some(name) = &edits.preset {
        if !controller.kind().has_presets() {
            return Err(PredictError::PresetsUnavailableError {
                form: controller.kind().to_string(),
            });
        }
        controller.apply_preset(catalog.find(name)?).await?;
    }

    for (field, raw) in &edits.set {
        controller.update_field(field, raw).await?;
    }

    for (group, choice) in &edits.choose {
        let group: Group = group.parse()?;
        let value = group.parse_choice(choice)?;
        controller.update_categorical(group, value).await?;
    }

    Ok(())
}

/// 套用編輯後送出一次，回傳送出後的快照
pub async fn run_prediction<S: PredictionService>(
    controller: &FormController<S>,
    edits: &FormEdits,
    catalog: &PresetCatalog,
) -> Result<Snapshot> {
    apply_edits(controller, edits, catalog).await?;
    controller.submit().await;
    Ok(controller.snapshot().await)
}
