//! SubmitDailyReportHandler - Command handler for daily progress reports.

use std::sync::Arc;
use tracing::info;

use super::{load_expecting, publish_change};
use crate::domain::activity::{
    Activity, ActivityChanged, ActivityError, ActivityVersion, DailyProgressReport,
    LifecycleEngine, ProgressInput,
};
use crate::domain::foundation::{ActivityId, CommandMetadata};
use crate::ports::{ActivityRepository, Clock, EventPublisher, HistoryStore};

/// Command to file today's progress for an activity.
#[derive(Debug, Clone)]
pub struct SubmitDailyReportCommand {
    pub activity_id: ActivityId,
    /// Version the caller last read.
    pub expected_version: ActivityVersion,
    pub input: ProgressInput,
}

/// Result of an accepted report.
#[derive(Debug, Clone)]
pub struct SubmitDailyReportResult {
    pub activity: Activity,
    pub report: DailyProgressReport,
    pub change: ActivityChanged,
}

/// Handler for daily progress reports.
pub struct SubmitDailyReportHandler {
    repository: Arc<dyn ActivityRepository>,
    history: Arc<dyn HistoryStore>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
    engine: LifecycleEngine,
}

impl SubmitDailyReportHandler {
    pub fn new(
        repository: Arc<dyn ActivityRepository>,
        history: Arc<dyn HistoryStore>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
        engine: LifecycleEngine,
    ) -> Self {
        Self {
            repository,
            history,
            clock,
            event_publisher,
            engine,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitDailyReportCommand,
        metadata: CommandMetadata,
    ) -> Result<SubmitDailyReportResult, ActivityError> {
        let activity =
            load_expecting(self.repository.as_ref(), &cmd.activity_id, cmd.expected_version)
                .await?;
        let history = self.history.list_for_activity(&cmd.activity_id).await?;

        let outcome = self.engine.submit_daily_report(
            &activity,
            &history,
            cmd.input,
            self.clock.today(),
            self.clock.now(),
        )?;

        self.repository
            .commit(&outcome.activity, cmd.expected_version, outcome.entry())
            .await?;

        info!(
            activity_id = %cmd.activity_id,
            progress = %outcome.report.progress_value,
            mode = %outcome.report.computation_mode,
            date = %outcome.report.report_date,
            version = %outcome.activity.version(),
            "Daily progress recorded"
        );

        publish_change(self.event_publisher.as_ref(), &outcome.change, &metadata).await;

        Ok(SubmitDailyReportResult {
            activity: outcome.activity,
            report: outcome.report,
            change: outcome.change,
        })
    }
}
