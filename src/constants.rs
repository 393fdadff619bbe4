/// Candidate labels and column-name constants shared across the pipeline.
/// The cleaned-dataset column names are a persisted contract: the model
/// fitter and the predictor select predictors by these exact names.

// Tracked candidate labels as they appear in the raw polling file
pub const DEFAULT_TARGET_CANDIDATE: &str = "Donald Trump";
pub const DEFAULT_COMPARISON_CANDIDATE: &str = "Kamala Harris";

// Cleaned dataset schema, in column order
pub const COL_NUMERIC_GRADE: &str = "numeric_grade";
pub const COL_SAMPLE_SIZE: &str = "sample_size";
pub const COL_POLLSCORE: &str = "pollscore";
pub const COL_SCALED_TRUMP_PCT: &str = "scaled_trump_pct";

pub const CLEANED_COLUMNS: [&str; 4] = [
    COL_NUMERIC_GRADE,
    COL_SAMPLE_SIZE,
    COL_POLLSCORE,
    COL_SCALED_TRUMP_PCT,
];

// Coefficient name for the intercept term in the model artifact
pub const COEF_INTERCEPT: &str = "const";
