use std::sync::Arc;

use quiz_core::model::SubjectCatalog;
use quiz_core::{SessionAction, SessionEffect, SessionError, SessionState, Transition};
use tracing::{debug, info};

use crate::Clock;
use crate::camera::ProctorCamera;

/// Runs session transitions against the catalog and carries out their effects.
///
/// `apply` is synchronous so the UI can show the next screen at once;
/// `run_effects` does the slow camera work afterwards.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    catalog: Arc<SubjectCatalog>,
    camera: Arc<ProctorCamera>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<SubjectCatalog>, camera: Arc<ProctorCamera>) -> Self {
        Self {
            clock,
            catalog,
            camera,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<SubjectCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn camera(&self) -> Arc<ProctorCamera> {
        Arc::clone(&self.camera)
    }

    /// Apply one action to `state`.
    ///
    /// # Errors
    ///
    /// Returns the reducer's `SessionError`; `state` is left as it was.
    pub fn apply(
        &self,
        state: &SessionState,
        action: SessionAction,
    ) -> Result<Transition, SessionError> {
        let name = action.name();
        let transition = state
            .apply(&self.catalog, action, self.clock.now())
            .inspect_err(|err| debug!(action = name, error = %err, "action rejected"))?;

        let next = &transition.state;
        if next.phase() != state.phase() {
            info!(
                action = name,
                from = %state.phase(),
                to = %next.phase(),
                subject = next.selected_subject().map(|id| id.as_str()),
                "session phase changed"
            );
        }
        if next.is_completed() && !state.is_completed() {
            let report = next.score_report();
            info!(
                score = report.score(),
                total = report.total(),
                reason = ?next.completion_reason(),
                "assessment completed"
            );
        }
        Ok(transition)
    }

    /// Carry out the side effects of a transition, in order.
    ///
    /// Camera failures are logged and swallowed; the quiz never waits on them.
    pub async fn run_effects(&self, effects: &[SessionEffect]) {
        for effect in effects {
            match effect {
                SessionEffect::AcquireCamera => {
                    // Failure was already logged by the camera.
                    let _ = self.camera.acquire().await;
                }
                SessionEffect::ReleaseCamera => self.camera.release().await,
                SessionEffect::TimeExpired => info!("time limit reached"),
                SessionEffect::Celebrate => debug!("celebration requested"),
                SessionEffect::ShowWelcome | SessionEffect::ShowInstructions => {}
            }
        }
    }

    /// `apply` followed by `run_effects`.
    ///
    /// # Errors
    ///
    /// Returns the reducer's `SessionError`; no effect runs in that case.
    pub async fn dispatch(
        &self,
        state: &SessionState,
        action: SessionAction,
    ) -> Result<SessionState, SessionError> {
        let transition = self.apply(state, action)?;
        self.run_effects(&transition.effects).await;
        Ok(transition.state)
    }
}
