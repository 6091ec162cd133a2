use crate::models::domain::MasteryState;

pub const DEFAULT_REVISION_LIMIT: usize = 10;

pub struct RevisionSelector;

impl RevisionSelector {
    /// Pick the question indices worth re-practicing: anything attempted but
    /// never answered correctly, or attempted at least three times with an
    /// accuracy below 50%. Candidates come out in ascending index order and
    /// the list is capped at `limit` with no further ranking.
    pub fn select(state: &MasteryState, quiz_len: usize, limit: usize) -> Vec<usize> {
        (0..quiz_len)
            .filter(|&idx| {
                let stats = state.stats(idx);
                (stats.attempts >= 1 && stats.correct == 0)
                    || (stats.attempts >= 3 && stats.accuracy() < 0.5)
            })
            .take(limit)
            .collect()
    }
}
