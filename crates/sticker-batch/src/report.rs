use jiff::SignedDuration;
use sticker_core::{Code, CodeLength};
use typed_builder::TypedBuilder;

/// What a batch should produce and how much work it may spend doing so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct BatchPlan {
    /// Number of stickers requested.
    pub target_count: u64,
    #[builder(default)]
    pub code_length: CodeLength,
    /// Reservation attempts are capped at `target_count * max_attempt_multiplier`.
    #[builder(default = 2)]
    pub max_attempt_multiplier: u64,
    /// Consecutive moderation rejections tolerated while looking for one code.
    #[builder(default = 10_000)]
    pub max_moderation_rejections: u64,
}

impl BatchPlan {
    pub fn max_attempts(&self) -> u64 {
        self.target_count.saturating_mul(self.max_attempt_multiplier)
    }
}

/// Outcome of a completed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Stickers whose code was reserved and whose file was written.
    pub succeeded: u64,
    /// Reservation attempts, successful or not.
    pub attempted: u64,
    /// Attempts that lost because the code was already issued.
    pub conflicts: u64,
    /// Candidates discarded by moderation; these never count as attempts.
    pub moderation_rejections: u64,
    /// Codes issued by this batch, in order.
    pub issued: Vec<Code>,
    pub elapsed: SignedDuration,
}

impl BatchReport {
    /// Average time per produced sticker, if any were produced.
    pub fn per_sticker(&self) -> Option<SignedDuration> {
        if self.succeeded == 0 {
            return None;
        }
        SignedDuration::try_from_secs_f64(self.elapsed.as_secs_f64() / self.succeeded as f64).ok()
    }

    pub fn is_complete(&self, plan: &BatchPlan) -> bool {
        self.succeeded == plan.target_count
    }
}
