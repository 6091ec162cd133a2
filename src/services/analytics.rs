use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{AttemptMode, AttemptRow};

/// Dashboard read-models. All of these are recomputed from the flat
/// `AttemptRow` history on every read and never persisted. Accuracies are
/// rendered as percentages rounded to two decimals; the underlying rows keep
/// fractions.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaterialOverview {
    pub material_id: String,
    pub total_attempts: u32,
    pub avg_accuracy: f64,
    pub last_attempt_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GlobalStats {
    pub total_materials: u32,
    pub total_attempts: u32,
    pub avg_accuracy: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OverviewReport {
    pub materials: Vec<MaterialOverview>,
    pub global_stats: GlobalStats,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub attempt_number: u32,
    pub created_at: DateTime<Utc>,
    pub accuracy: f64,
    pub correct: u32,
    pub wrong: u32,
    pub skipped: u32,
    pub mode: AttemptMode,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UserSummary {
    pub total_attempts: u32,
    pub distinct_materials: u32,
    pub overall_accuracy: f64,
    pub avg_score: f64,
    pub avg_accuracy: f64,
    pub best_score: f64,
    pub best_accuracy: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserAttemptEntry {
    pub attempt_number: u32,
    pub material_id: String,
    pub created_at: DateTime<Utc>,
    pub score: f64,
    pub accuracy: f64,
    pub correct: u32,
    pub wrong: u32,
    pub skipped: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DateBucket {
    pub date: String,
    pub attempts: u32,
    pub avg_score: f64,
    pub avg_accuracy: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UserReport {
    pub summary: UserSummary,
    pub attempts: Vec<UserAttemptEntry>,
    pub by_date: Vec<DateBucket>,
}

fn round_pct(fraction: f64) -> f64 {
    (fraction * 10_000.0).round() / 100.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub struct AnalyticsAggregator;

impl AnalyticsAggregator {
    /// Per-material rollup. Materials keep their first-appearance order so
    /// the output is deterministic for a given row order.
    ///
    /// `avg_accuracy` is the mean of per-attempt answered accuracies;
    /// attempts where nothing was answered still count toward
    /// `total_attempts` but are excluded from the mean rather than dragging
    /// it down as 0%.
    pub fn overview(rows: &[AttemptRow]) -> OverviewReport {
        struct Acc {
            total_attempts: u32,
            accuracies: Vec<f64>,
            last_attempt_at: Option<DateTime<Utc>>,
        }

        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Acc> = HashMap::new();

        for row in rows {
            let acc = groups.entry(row.material_id.clone()).or_insert_with(|| {
                order.push(row.material_id.clone());
                Acc {
                    total_attempts: 0,
                    accuracies: Vec::new(),
                    last_attempt_at: None,
                }
            });

            acc.total_attempts += 1;
            if row.correct + row.wrong > 0 {
                acc.accuracies.push(row.answered_accuracy());
            }
            if acc.last_attempt_at.is_none_or(|prev| row.created_at > prev) {
                acc.last_attempt_at = Some(row.created_at);
            }
        }

        let mut materials = Vec::with_capacity(order.len());
        let mut material_averages = Vec::with_capacity(order.len());

        for material_id in order {
            let acc = &groups[&material_id];
            let avg = if acc.accuracies.is_empty() {
                0.0
            } else {
                acc.accuracies.iter().sum::<f64>() / acc.accuracies.len() as f64
            };
            material_averages.push(avg);
            materials.push(MaterialOverview {
                material_id,
                total_attempts: acc.total_attempts,
                avg_accuracy: round_pct(avg),
                last_attempt_at: acc.last_attempt_at,
            });
        }

        let global_avg = if material_averages.is_empty() {
            0.0
        } else {
            material_averages.iter().sum::<f64>() / material_averages.len() as f64
        };

        OverviewReport {
            global_stats: GlobalStats {
                total_materials: materials.len() as u32,
                total_attempts: rows.len() as u32,
                avg_accuracy: round_pct(global_avg),
            },
            materials,
        }
    }

    /// Attempt-by-attempt trend for one material, ascending attempt number.
    pub fn material_history(rows: &[AttemptRow]) -> Vec<HistoryEntry> {
        let mut sorted: Vec<&AttemptRow> = rows.iter().collect();
        sorted.sort_by_key(|row| row.attempt_number);

        sorted
            .into_iter()
            .map(|row| HistoryEntry {
                attempt_number: row.attempt_number,
                created_at: row.created_at,
                accuracy: round_pct(row.answered_accuracy()),
                correct: row.correct,
                wrong: row.wrong,
                skipped: row.skipped,
                mode: row.mode,
            })
            .collect()
    }

    /// User-level rollup across all materials.
    ///
    /// `overall_accuracy` is a ratio of sums while `avg_accuracy` is a mean
    /// of per-attempt ratios. They answer different questions (volume-weighted
    /// vs attempt-weighted) and the dashboard displays both; do not collapse
    /// them into one formula.
    pub fn user_summary(rows: &[AttemptRow]) -> UserReport {
        if rows.is_empty() {
            return UserReport::default();
        }

        let mut material_ids: HashSet<&str> = HashSet::new();
        let mut overall_correct: u64 = 0;
        let mut overall_answered: u64 = 0;
        let mut sum_scores = 0.0;
        let mut sum_accuracy = 0.0;
        let mut best_score: f64 = 0.0;
        let mut best_accuracy: f64 = 0.0;

        let mut attempts = Vec::with_capacity(rows.len());
        let mut by_date: BTreeMap<String, (u32, f64, f64)> = BTreeMap::new();

        for row in rows {
            material_ids.insert(&row.material_id);

            let answered = row.correct + row.wrong;
            let accuracy = row.answered_accuracy();

            overall_correct += u64::from(row.correct);
            overall_answered += u64::from(answered);
            sum_scores += row.score;
            sum_accuracy += accuracy;
            best_score = best_score.max(row.score);
            best_accuracy = best_accuracy.max(accuracy);

            let date_key = row.created_at.format("%Y-%m-%d").to_string();
            let bucket = by_date.entry(date_key).or_insert((0, 0.0, 0.0));
            bucket.0 += 1;
            bucket.1 += row.score;
            bucket.2 += accuracy;

            attempts.push(UserAttemptEntry {
                attempt_number: row.attempt_number,
                material_id: row.material_id.clone(),
                created_at: row.created_at,
                score: row.score,
                accuracy: round_pct(accuracy),
                correct: row.correct,
                wrong: row.wrong,
                skipped: row.skipped,
            });
        }

        let total_attempts = rows.len() as u32;
        let overall_accuracy = if overall_answered == 0 {
            0.0
        } else {
            overall_correct as f64 / overall_answered as f64
        };

        let by_date = by_date
            .into_iter()
            .map(|(date, (count, score_sum, acc_sum))| DateBucket {
                date,
                attempts: count,
                avg_score: round2(score_sum / f64::from(count)),
                avg_accuracy: round_pct(acc_sum / f64::from(count)),
            })
            .collect();

        UserReport {
            summary: UserSummary {
                total_attempts,
                distinct_materials: material_ids.len() as u32,
                overall_accuracy: round_pct(overall_accuracy),
                avg_score: round2(sum_scores / f64::from(total_attempts)),
                avg_accuracy: round_pct(sum_accuracy / f64::from(total_attempts)),
                best_score,
                best_accuracy: round_pct(best_accuracy),
            },
            attempts,
            by_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::attempt_row;
    use chrono::TimeZone;

    #[test]
    fn empty_input_yields_zeroed_reports() {
        let overview = AnalyticsAggregator::overview(&[]);
        assert!(overview.materials.is_empty());
        assert_eq!(overview.global_stats, GlobalStats::default());

        assert!(AnalyticsAggregator::material_history(&[]).is_empty());

        let report = AnalyticsAggregator::user_summary(&[]);
        assert_eq!(report.summary, UserSummary::default());
        assert!(report.attempts.is_empty());
        assert!(report.by_date.is_empty());
    }

    #[test]
    fn overview_groups_by_material_preserving_first_appearance() {
        let rows = vec![
            attempt_row("m-1", "u-1", 8, 2, 0, 1, "2026-03-01T10:00:00Z"),
            attempt_row("m-2", "u-1", 5, 5, 0, 1, "2026-03-02T10:00:00Z"),
            attempt_row("m-1", "u-1", 6, 4, 0, 2, "2026-03-03T10:00:00Z"),
        ];

        let report = AnalyticsAggregator::overview(&rows);
        assert_eq!(report.materials.len(), 2);
        assert_eq!(report.materials[0].material_id, "m-1");
        assert_eq!(report.materials[0].total_attempts, 2);
        // mean(0.8, 0.6) = 70%
        assert_eq!(report.materials[0].avg_accuracy, 70.0);
        assert_eq!(
            report.materials[0].last_attempt_at,
            Some(Utc.with_ymd_and_hms(2026, 3, 3, 10, 0, 0).unwrap())
        );

        assert_eq!(report.global_stats.total_materials, 2);
        assert_eq!(report.global_stats.total_attempts, 3);
        // mean(0.70, 0.50) = 60%
        assert_eq!(report.global_stats.avg_accuracy, 60.0);
    }

    #[test]
    fn overview_excludes_all_skipped_attempts_from_the_mean() {
        let rows = vec![
            attempt_row("m-1", "u-1", 0, 0, 10, 1, "2026-03-01T10:00:00Z"),
            attempt_row("m-1", "u-1", 9, 1, 0, 2, "2026-03-02T10:00:00Z"),
        ];

        let report = AnalyticsAggregator::overview(&rows);
        // The all-skipped attempt still counts as an attempt but does not
        // pull the average toward zero
        assert_eq!(report.materials[0].total_attempts, 2);
        assert_eq!(report.materials[0].avg_accuracy, 90.0);
    }

    #[test]
    fn overview_material_with_only_skipped_attempts_averages_zero() {
        let rows = vec![attempt_row("m-1", "u-1", 0, 0, 4, 1, "2026-03-01T10:00:00Z")];

        let report = AnalyticsAggregator::overview(&rows);
        assert_eq!(report.materials[0].avg_accuracy, 0.0);
    }

    #[test]
    fn material_history_sorts_by_attempt_number() {
        let rows = vec![
            attempt_row("m-1", "u-1", 1, 1, 0, 3, "2026-03-03T10:00:00Z"),
            attempt_row("m-1", "u-1", 2, 0, 0, 1, "2026-03-01T10:00:00Z"),
            attempt_row("m-1", "u-1", 0, 2, 0, 2, "2026-03-02T10:00:00Z"),
        ];

        let history = AnalyticsAggregator::material_history(&rows);
        let numbers: Vec<u32> = history.iter().map(|h| h.attempt_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(history[0].accuracy, 100.0);
        assert_eq!(history[1].accuracy, 0.0);
        assert_eq!(history[2].accuracy, 50.0);
    }

    #[test]
    fn material_history_zero_answered_attempt_reads_as_zero_accuracy() {
        let rows = vec![attempt_row("m-1", "u-1", 0, 0, 5, 1, "2026-03-01T10:00:00Z")];
        let history = AnalyticsAggregator::material_history(&rows);
        assert_eq!(history[0].accuracy, 0.0);
        assert_eq!(history[0].skipped, 5);
    }

    #[test]
    fn user_summary_keeps_ratio_of_sums_and_mean_of_ratios_distinct() {
        let rows = vec![
            attempt_row("m-1", "u-1", 8, 2, 0, 1, "2026-03-01T10:00:00Z"),
            attempt_row("m-2", "u-1", 3, 7, 0, 1, "2026-03-02T10:00:00Z"),
        ];

        let report = AnalyticsAggregator::user_summary(&rows);
        // ratio of sums: 11/20
        assert_eq!(report.summary.overall_accuracy, 55.0);
        // mean of ratios: (0.8 + 0.3) / 2 — coincidentally also 55 here
        assert_eq!(report.summary.avg_accuracy, 55.0);
        assert_eq!(report.summary.total_attempts, 2);
        assert_eq!(report.summary.distinct_materials, 2);
        assert_eq!(report.summary.avg_score, 5.5);
        assert_eq!(report.summary.best_score, 8.0);
        assert_eq!(report.summary.best_accuracy, 80.0);
    }

    #[test]
    fn user_summary_formulas_diverge_on_uneven_volumes() {
        // 1/1 and 10/100 answered: mean-of-ratios is dominated by the tiny
        // attempt, ratio-of-sums by the big one
        let rows = vec![
            attempt_row("m-1", "u-1", 1, 0, 0, 1, "2026-03-01T10:00:00Z"),
            attempt_row("m-1", "u-1", 10, 90, 0, 2, "2026-03-02T10:00:00Z"),
        ];

        let report = AnalyticsAggregator::user_summary(&rows);
        // (1 + 10) / (1 + 100)
        assert_eq!(report.summary.overall_accuracy, 10.89);
        // (1.0 + 0.1) / 2
        assert_eq!(report.summary.avg_accuracy, 55.0);
    }

    #[test]
    fn user_summary_buckets_by_utc_day_ascending() {
        let rows = vec![
            attempt_row("m-1", "u-1", 4, 0, 0, 1, "2026-03-05T23:59:00Z"),
            attempt_row("m-1", "u-1", 2, 2, 0, 2, "2026-03-04T08:00:00Z"),
            attempt_row("m-1", "u-1", 0, 4, 0, 3, "2026-03-05T00:01:00Z"),
        ];

        let report = AnalyticsAggregator::user_summary(&rows);
        assert_eq!(report.by_date.len(), 2);
        assert_eq!(report.by_date[0].date, "2026-03-04");
        assert_eq!(report.by_date[0].attempts, 1);
        assert_eq!(report.by_date[0].avg_accuracy, 50.0);
        assert_eq!(report.by_date[1].date, "2026-03-05");
        assert_eq!(report.by_date[1].attempts, 2);
        // mean(1.0, 0.0) on that day
        assert_eq!(report.by_date[1].avg_accuracy, 50.0);
        assert_eq!(report.by_date[1].avg_score, 2.0);
    }

    #[test]
    fn user_summary_attempts_stay_in_input_order() {
        let rows = vec![
            attempt_row("m-2", "u-1", 1, 1, 0, 5, "2026-03-02T10:00:00Z"),
            attempt_row("m-1", "u-1", 2, 0, 0, 1, "2026-03-01T10:00:00Z"),
        ];

        let report = AnalyticsAggregator::user_summary(&rows);
        assert_eq!(report.attempts[0].material_id, "m-2");
        assert_eq!(report.attempts[1].material_id, "m-1");
    }
}
