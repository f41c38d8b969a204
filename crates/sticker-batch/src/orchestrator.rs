use crate::error::{BatchError, Result};
use crate::report::{BatchPlan, BatchReport};
use jiff::Timestamp;
use std::path::PathBuf;
use std::sync::Arc;
use sticker_core::{Code, Registry, SinkError, StickerJob, StickerSink};
use sticker_generator::{Generator, ModerationFilter};
use tracing::{debug, error, info, trace, warn};

/// What happened to one reservation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    /// The code was reserved and its sticker written to `path`.
    Issued { job: StickerJob, path: PathBuf },
    /// The code had already been issued; the registry is unchanged.
    Conflict { code: Code },
}

/// Drives the generate, moderate, reserve, render loop for a batch.
///
/// The orchestrator keeps no record of taken codes. The registry is asked on
/// every attempt, so several orchestrators may share one registry.
///
/// A sticker is only rendered after its code is durably reserved. A
/// reservation conflict consumes an attempt and the loop carries on with a
/// fresh code until either the target is met or the attempt ceiling is hit.
#[derive(Debug)]
pub struct BatchOrchestrator<G, F, R, S> {
    generator: G,
    filter: F,
    registry: R,
    sink: Arc<S>,
    link_base: String,
}

impl<G, F, R, S> BatchOrchestrator<G, F, R, S>
where
    G: Generator,
    F: ModerationFilter,
    R: Registry,
    S: StickerSink,
{
    pub fn new(generator: G, filter: F, registry: R, sink: S, link_base: impl Into<String>) -> Self {
        Self {
            generator,
            filter,
            registry,
            sink: Arc::new(sink),
            link_base: link_base.into(),
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Runs the batch described by `plan`.
    ///
    /// Conflicts are recovered locally. Registry failures, moderation
    /// exhaustion and a sticker that cannot be produced after reservation
    /// abort the batch.
    pub async fn run(&self, plan: &BatchPlan) -> Result<BatchReport> {
        let started = Timestamp::now();
        let max_attempts = plan.max_attempts();
        let mut report = BatchReport::default();

        info!(
            target_count = plan.target_count,
            max_attempts,
            code_length = plan.code_length.get(),
            "starting sticker batch"
        );

        while report.succeeded < plan.target_count && report.attempted < max_attempts {
            let (code, rejections) = self.next_clean_code(plan)?;
            report.moderation_rejections += rejections;

            let outcome = self.run_slot(code).await;
            report.attempted += 1;

            match outcome? {
                SlotOutcome::Issued { job, path } => {
                    debug!(link = %job.link, path = %path.display(), "generated sticker");
                    report.succeeded += 1;
                    report.issued.push(job.code);
                }
                SlotOutcome::Conflict { code } => {
                    debug!(code = %code, "generation failed: code already issued");
                    report.conflicts += 1;
                }
            }
        }

        report.elapsed = Timestamp::now().duration_since(started);

        if !report.is_complete(plan) {
            warn!(
                succeeded = report.succeeded,
                target_count = plan.target_count,
                attempted = report.attempted,
                "attempt ceiling reached before the batch was complete"
            );
        }

        Ok(report)
    }

    /// Reserves `code` and, only if that succeeded, produces its sticker.
    async fn run_slot(&self, code: Code) -> Result<SlotOutcome> {
        if !self.registry.reserve(&code).await? {
            return Ok(SlotOutcome::Conflict { code });
        }

        let job = StickerJob::new(code, &self.link_base);
        match self.emit(job.clone()).await {
            Ok(path) => Ok(SlotOutcome::Issued { job, path }),
            Err(source) => {
                error!(
                    code = %job.code,
                    error = %source,
                    "code reserved but sticker not produced; reservation is orphaned"
                );
                Err(BatchError::OrphanedReservation {
                    code: job.code,
                    source,
                })
            }
        }
    }

    /// Draws candidates until one passes moderation. Returns the code and
    /// the number of candidates rejected on the way.
    fn next_clean_code(&self, plan: &BatchPlan) -> Result<(Code, u64)> {
        let mut rejections = 0;
        loop {
            let code = self.generator.generate(plan.code_length);
            if self.filter.is_clean(&code) {
                return Ok((code, rejections));
            }

            rejections += 1;
            trace!(rejections, "candidate rejected by moderation");
            if rejections >= plan.max_moderation_rejections {
                error!(rejections, "moderation rejected every candidate");
                return Err(BatchError::GenerationExhausted { rejections });
            }
        }
    }

    /// Rendering is CPU bound, so it runs on the blocking pool.
    async fn emit(&self, job: StickerJob) -> std::result::Result<PathBuf, SinkError> {
        let sink = Arc::clone(&self.sink);
        tokio::task::spawn_blocking(move || sink.emit(&job))
            .await
            .map_err(|e| SinkError::Render(format!("sticker task failed: {e}")))?
    }
}
