use std::collections::HashMap;

use crate::config::CandidateConfig;
use crate::domain::{PollObservation, RawPollRecord};

/// Running arithmetic mean over the values that were actually present.
#[derive(Debug, Default, Clone)]
struct MeanAccumulator {
    sum: f64,
    count: u32,
}

impl MeanAccumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn push_opt(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.push(v);
        }
    }

    /// `None` when no values were seen, never zero.
    fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / f64::from(self.count))
        }
    }
}

#[derive(Debug, Default, Clone)]
struct PollAccumulator {
    target_pct: MeanAccumulator,
    comparison_pct: MeanAccumulator,
    numeric_grade: MeanAccumulator,
    sample_size: MeanAccumulator,
    pollscore: MeanAccumulator,
}

/// Groups raw rows into one observation per distinct `poll_id` in a single
/// pass. Candidate percentage means are restricted to rows matching the
/// configured label; the three quality predictors are averaged over every
/// row of the poll. Emission order is first-seen order of each poll id,
/// which keeps reruns over the same input deterministic.
pub struct PollAggregator {
    target_label: String,
    comparison_label: String,
    groups: HashMap<u64, PollAccumulator>,
    order: Vec<u64>,
}

impl PollAggregator {
    pub fn new(candidates: &CandidateConfig) -> Self {
        Self {
            target_label: candidates.target.clone(),
            comparison_label: candidates.comparison.clone(),
            groups: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn push(&mut self, record: &RawPollRecord) {
        let group = match self.groups.entry(record.poll_id) {
            std::collections::hash_map::Entry::Occupied(e) => e.into_mut(),
            std::collections::hash_map::Entry::Vacant(e) => {
                self.order.push(record.poll_id);
                e.insert(PollAccumulator::default())
            }
        };

        if record.candidate_name == self.target_label {
            group.target_pct.push_opt(record.pct);
        } else if record.candidate_name == self.comparison_label {
            group.comparison_pct.push_opt(record.pct);
        }

        group.numeric_grade.push_opt(record.numeric_grade);
        group.sample_size.push_opt(record.sample_size);
        group.pollscore.push_opt(record.pollscore);
    }

    pub fn into_observations(mut self) -> Vec<PollObservation> {
        self.order
            .iter()
            .map(|poll_id| {
                // Every id in `order` has a group entry by construction
                let group = self.groups.remove(poll_id).unwrap_or_default();
                PollObservation {
                    poll_id: *poll_id,
                    target_pct: group.target_pct.mean(),
                    comparison_pct: group.comparison_pct.mean(),
                    numeric_grade: group.numeric_grade.mean(),
                    sample_size: group.sample_size.mean(),
                    pollscore: group.pollscore.mean(),
                }
            })
            .collect()
    }
}

/// Convenience wrapper over the accumulator for a whole batch.
pub fn aggregate_polls(
    records: &[RawPollRecord],
    candidates: &CandidateConfig,
) -> Vec<PollObservation> {
    let mut aggregator = PollAggregator::new(candidates);
    for record in records {
        aggregator.push(record);
    }
    aggregator.into_observations()
}
