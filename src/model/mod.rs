// Linear model: OLS fitting, k-fold cross-validation, and the persisted
// model artifact.

pub mod artifact;
pub mod cross_validation;
pub mod ols;

pub use artifact::ModelArtifact;
pub use cross_validation::{cross_validate, CrossValidationReport, FoldScore};
pub use ols::{fit, Coefficients, OlsFit};
