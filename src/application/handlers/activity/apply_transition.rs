//! ApplyTransitionHandler - Command handler for lifecycle transitions.

use std::sync::Arc;
use tracing::info;

use super::{load_expecting, publish_change};
use crate::domain::activity::{
    Activity, ActivityChanged, ActivityError, ActivityVersion, LifecycleEngine, StatusEvent,
    TransitionKind, TransitionParams,
};
use crate::domain::foundation::{ActivityId, CommandMetadata};
use crate::ports::{ActivityRepository, Clock, EventPublisher};

/// Command to move an activity through its lifecycle.
#[derive(Debug, Clone)]
pub struct ApplyTransitionCommand {
    pub activity_id: ActivityId,
    /// Version the caller last read.
    pub expected_version: ActivityVersion,
    pub transition: TransitionKind,
    pub params: TransitionParams,
}

/// Result of an accepted transition.
#[derive(Debug, Clone)]
pub struct ApplyTransitionResult {
    pub activity: Activity,
    pub event: StatusEvent,
    pub change: ActivityChanged,
}

/// Handler for lifecycle transitions.
pub struct ApplyTransitionHandler {
    repository: Arc<dyn ActivityRepository>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
    engine: LifecycleEngine,
}

impl ApplyTransitionHandler {
    pub fn new(
        repository: Arc<dyn ActivityRepository>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
        engine: LifecycleEngine,
    ) -> Self {
        Self {
            repository,
            clock,
            event_publisher,
            engine,
        }
    }

    pub async fn handle(
        &self,
        cmd: ApplyTransitionCommand,
        metadata: CommandMetadata,
    ) -> Result<ApplyTransitionResult, ActivityError> {
        // 1. Load at the caller's version
        let activity =
            load_expecting(self.repository.as_ref(), &cmd.activity_id, cmd.expected_version)
                .await?;

        // 2. Validate and apply
        let outcome = self.engine.apply_transition(
            &activity,
            cmd.transition,
            cmd.params,
            self.clock.today(),
            self.clock.now(),
        )?;

        // 3. Persist record and ledger row together
        self.repository
            .commit(&outcome.activity, cmd.expected_version, outcome.entry())
            .await?;

        info!(
            activity_id = %cmd.activity_id,
            transition = %cmd.transition,
            from = %outcome.event.prior_status,
            to = %outcome.event.new_status,
            version = %outcome.activity.version(),
            actor = %metadata.actor.as_str(),
            "Activity transitioned"
        );

        // 4. Notify
        publish_change(self.event_publisher.as_ref(), &outcome.change, &metadata).await;

        Ok(ApplyTransitionResult {
            activity: outcome.activity,
            event: outcome.event,
            change: outcome.change,
        })
    }
}
