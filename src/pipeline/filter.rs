/// Mean values of the three poll-quality predictors for one poll, in
/// whatever state of completeness aggregation left them.
pub type RawPredictors = [Option<f64>; 3];

/// Fully defined predictor triple, post-filtering.
pub type Predictors = [f64; 3];

/// Drops every index whose target or any predictor is missing or
/// non-finite. No imputation: a single missing field disqualifies the
/// whole observation, since the regression needs a fully numeric design
/// matrix. The filter preserves the relative order of retained indices.
pub fn retain_valid(
    targets: &[Option<f64>],
    predictors: &[RawPredictors],
) -> (Vec<f64>, Vec<Predictors>) {
    let mut kept_targets = Vec::new();
    let mut kept_predictors = Vec::new();

    for (target, triple) in targets.iter().zip(predictors.iter()) {
        let target = match target {
            Some(t) if t.is_finite() => *t,
            _ => continue,
        };
        let defined: Option<Predictors> = match triple {
            [Some(a), Some(b), Some(c)]
                if a.is_finite() && b.is_finite() && c.is_finite() =>
            {
                Some([*a, *b, *c])
            }
            _ => None,
        };
        if let Some(triple) = defined {
            kept_targets.push(target);
            kept_predictors.push(triple);
        }
    }

    (kept_targets, kept_predictors)
}
