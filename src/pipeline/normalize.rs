use crate::domain::PollObservation;

/// Rescales the two tracked candidate percentages so the pair sums to 1,
/// returning the target candidate's share. Undefined (`None`) when either
/// mean is missing or the ratio is non-finite (both means zero divides
/// 0 by 0). Values outside [0, 1] are passed through unclamped: a poll
/// whose raw percentages do not sum near 100 is reported as-is.
pub fn scaled_share(target_pct: Option<f64>, comparison_pct: Option<f64>) -> Option<f64> {
    let target = target_pct?;
    let comparison = comparison_pct?;
    let ratio = target / (target + comparison);
    ratio.is_finite().then_some(ratio)
}

/// Normalized target for one poll observation.
pub fn normalize_observation(observation: &PollObservation) -> Option<f64> {
    scaled_share(observation.target_pct, observation.comparison_pct)
}
