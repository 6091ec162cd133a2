use crate::models::domain::MasteryState;
use crate::services::attempt_evaluator::AttemptResult;

pub struct MasteryTracker;

impl MasteryTracker {
    /// Fold one scored attempt into the per-question counters. Counters are
    /// monotonic: a reattempt accumulates on top of prior history, nothing is
    /// reset or decremented.
    ///
    /// `last_unsolved` is rebuilt from scratch over the whole quiz rather
    /// than patched incrementally, so a corrupted prior list heals on the
    /// next fold.
    pub fn fold(state: &mut MasteryState, result: &AttemptResult, quiz_len: usize) {
        for detail in &result.per_question_detail {
            let stats = state.stats_mut(detail.index);
            stats.attempts += 1;
            if detail.selected_answer.is_none() {
                stats.skipped += 1;
            } else if detail.is_correct {
                stats.correct += 1;
            }
        }

        state.last_unsolved = (0..quiz_len)
            .filter(|&idx| {
                let stats = state.stats(idx);
                stats.attempts > 0 && stats.correct == 0
            })
            .collect();
    }
}
