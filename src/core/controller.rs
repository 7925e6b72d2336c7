use crate::core::form::FormState;
use crate::core::{PredictionService, Result};
use crate::domain::kind::FormKind;
use crate::domain::onehot::Group;
use crate::domain::presets::ExampleRecord;
use crate::utils::error::FailureKind;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Result(bool),
    Error(FailureKind),
}

/// 畫面狀態三個旗標。每次轉換都產生新值
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub loading: bool,
    pub prediction: Option<bool>,
    pub error: Option<FailureKind>,
}

impl ViewState {
    /// 開始送出：清掉錯誤，保留上一次的預測
    pub fn begin_submit(&self) -> Self {
        Self {
            loading: true,
            prediction: self.prediction,
            error: None,
        }
    }

    pub fn resolve(&self, outcome: &Result<bool>) -> Self {
        match outcome {
            Ok(prediction) => Self {
                loading: false,
                prediction: Some(*prediction),
                error: self.error,
            },
            Err(e) => Self {
                loading: false,
                prediction: self.prediction,
                error: Some(e.failure_kind().unwrap_or(FailureKind::RequestFailure)),
            },
        }
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Submitting
        } else if let Some(kind) = self.error {
            Phase::Error(kind)
        } else if let Some(prediction) = self.prediction {
            Phase::Result(prediction)
        } else {
            Phase::Idle
        }
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(|kind| kind.message())
    }

    /// 有錯誤時不顯示預測結果
    pub fn visible_prediction(&self) -> Option<bool> {
        match self.error {
            Some(_) => None,
            None => self.prediction,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub form: FormState,
    pub view: ViewState,
}

/// 一張表單的控制器，擁有表單與畫面狀態。
///
/// 送出期間不持有鎖；重疊的送出各自完成，最後回來的結果覆蓋畫面狀態。
pub struct FormController<S: PredictionService> {
    kind: FormKind,
    service: S,
    state: Mutex<Snapshot>,
    sequence: AtomicU64,
}

impl<S: PredictionService> FormController<S> {
    pub fn new(kind: FormKind, service: S) -> Self {
        Self {
            kind,
            service,
            state: Mutex::new(Snapshot {
                form: FormState::new(kind.variant()),
                view: ViewState::default(),
            }),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.state.lock().await.clone()
    }

    pub async fn update_field(&self, name: &str, raw: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let form = state.form.update_field(name, raw)?;
        *state = Snapshot {
            form,
            view: state.view,
        };
        Ok(())
    }

    pub async fn update_categorical(&self, group: Group, value: usize) -> Result<()> {
        let mut state = self.state.lock().await;
        let form = state.form.update_categorical(group, value)?;
        *state = Snapshot {
            form,
            view: state.view,
        };
        Ok(())
    }

    pub async fn apply_preset(&self, example: &ExampleRecord) -> Result<()> {
        let mut state = self.state.lock().await;
        let form = state.form.apply_preset(example)?;
        *state = Snapshot {
            form,
            view: state.view,
        };
        Ok(())
    }

    /// 送出目前的 record，回傳這次送出完成後的畫面狀態
    pub async fn submit(&self) -> ViewState {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        let record = {
            let mut state = self.state.lock().await;
            *state = Snapshot {
                form: state.form.clone(),
                view: state.view.begin_submit(),
            };
            state.form.record().clone()
        };

        tracing::info!("🚀 Submission #{} to the {} prediction service", id, self.kind);
        let outcome = self.service.predict(&record).await;

        match &outcome {
            Ok(prediction) => {
                tracing::info!("✅ Submission #{} resolved: {}", id, prediction)
            }
            Err(e) => tracing::warn!(
                "⚠️ Submission #{} failed: {} (Category: {:?})",
                id,
                e,
                e.category()
            ),
        }

        let mut state = self.state.lock().await;
        let view = state.view.resolve(&outcome);
        *state = Snapshot {
            form: state.form.clone(),
            view,
        };
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FormRecord;
    use crate::utils::error::{PredictError, REQUEST_FAILURE_MESSAGE};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    /// 依序回傳預先排好的結果，並記錄收到的 record
    struct ScriptedService {
        outcomes: std::sync::Mutex<VecDeque<Result<bool>>>,
        received: std::sync::Mutex<Vec<FormRecord>>,
    }

    impl ScriptedService {
        fn new(outcomes: Vec<Result<bool>>) -> Self {
            Self {
                outcomes: std::sync::Mutex::new(outcomes.into()),
                received: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PredictionService for ScriptedService {
        async fn predict(&self, record: &FormRecord) -> Result<bool> {
            self.received.lock().unwrap().push(record.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(PredictError::HttpStatusError { status: 503 }))
        }
    }

    /// 每次呼叫都等待測試端透過 oneshot 放行
    struct GatedService {
        gates: std::sync::Mutex<VecDeque<oneshot::Receiver<Result<bool>>>>,
        started: AtomicU64,
    }

    impl GatedService {
        fn new(gates: Vec<oneshot::Receiver<Result<bool>>>) -> Self {
            Self {
                gates: std::sync::Mutex::new(gates.into()),
                started: AtomicU64::new(0),
            }
        }
    }

    #[async_trait]
    impl PredictionService for GatedService {
        async fn predict(&self, _record: &FormRecord) -> Result<bool> {
            let gate = self.gates.lock().unwrap().pop_front();
            self.started.fetch_add(1, Ordering::SeqCst);
            match gate {
                Some(rx) => rx
                    .await
                    .unwrap_or(Err(PredictError::HttpStatusError { status: 499 })),
                None => Err(PredictError::HttpStatusError { status: 503 }),
            }
        }
    }

    #[test]
    fn test_view_state_transitions() {
        let idle = ViewState::default();
        assert_eq!(idle.phase(), Phase::Idle);

        let submitting = idle.begin_submit();
        assert_eq!(submitting.phase(), Phase::Submitting);

        let result = submitting.resolve(&Ok(true));
        assert_eq!(result.phase(), Phase::Result(true));

        let failed = result
            .begin_submit()
            .resolve(&Err(PredictError::HttpStatusError { status: 500 }));
        assert_eq!(failed.phase(), Phase::Error(FailureKind::RequestFailure));
        assert_eq!(failed.prediction, Some(true));
        assert_eq!(failed.visible_prediction(), None);

        // 再次送出會清掉錯誤
        let retried = failed.begin_submit();
        assert_eq!(retried.error, None);
        assert_eq!(retried.resolve(&Ok(false)).visible_prediction(), Some(false));
    }

    #[tokio::test]
    async fn test_submit_sends_current_record() {
        let service = ScriptedService::new(vec![Ok(true)]);
        let controller = FormController::new(FormKind::Churn, service);

        controller.update_field("age", "42").await.unwrap();
        let view = controller.submit().await;

        assert_eq!(view.phase(), Phase::Result(true));
        let received = controller.service.received.lock().unwrap().clone();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].get("age"), Some(42.0));
    }

    #[tokio::test]
    async fn test_submit_error_keeps_form_usable() {
        let service = ScriptedService::new(vec![
            Err(PredictError::HttpStatusError { status: 500 }),
            Ok(false),
        ]);
        let controller = FormController::new(FormKind::Churn, service);

        let failed = controller.submit().await;
        assert!(!failed.loading);
        assert_eq!(failed.prediction, None);
        assert_eq!(failed.error_message(), Some(REQUEST_FAILURE_MESSAGE));

        controller.update_field("complains", "1").await.unwrap();
        let recovered = controller.submit().await;
        assert_eq!(recovered.error, None);
        assert_eq!(recovered.visible_prediction(), Some(false));
    }

    #[tokio::test]
    async fn test_loading_while_in_flight() {
        let (tx, rx) = oneshot::channel();
        let service = GatedService::new(vec![rx]);
        let controller = Arc::new(FormController::new(FormKind::Hiring, service));

        let pending = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.submit().await }
        });

        // 等到送出真的開始
        while !controller.snapshot().await.view.loading {
            tokio::task::yield_now().await;
        }
        assert_eq!(controller.snapshot().await.view.phase(), Phase::Submitting);

        tx.send(Ok(true)).unwrap();
        let view = pending.await.unwrap();
        assert_eq!(view.phase(), Phase::Result(true));
        assert!(!controller.snapshot().await.view.loading);
    }

    #[tokio::test]
    async fn test_overlapping_submissions_last_resolved_wins() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let service = GatedService::new(vec![first_rx, second_rx]);
        let controller = Arc::new(FormController::new(FormKind::Churn, service));

        let first = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.submit().await }
        });
        while controller.service.started.load(Ordering::SeqCst) < 1 {
            tokio::task::yield_now().await;
        }
        let second = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.submit().await }
        });
        while controller.service.started.load(Ordering::SeqCst) < 2 {
            tokio::task::yield_now().await;
        }

        // 第二次先回來 (A)，第一次後回來 (B)
        second_tx.send(Ok(true)).unwrap();
        assert_eq!(second.await.unwrap().prediction, Some(true));
        first_tx.send(Ok(false)).unwrap();
        first.await.unwrap();

        let view = controller.snapshot().await.view;
        assert_eq!(view.prediction, Some(false));
        assert!(!view.loading);
    }
}
