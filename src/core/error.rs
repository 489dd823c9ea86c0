use thiserror::Error;

/// Reasons a plan is rejected before it reaches the projection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("plan range is invalid: begin {begin}, end {end} (both must be non-zero and end > begin)")]
    InvalidPlanRange { begin: u32, end: u32 },

    #[error("stage #{index} is missing its {field}")]
    MissingStageField { index: usize, field: &'static str },

    #[error("stage '{name}': to age {to_age} must be larger than from age {from_age}")]
    InvalidStageRange {
        name: String,
        from_age: u32,
        to_age: u32,
    },

    #[error("stage name '{0}' is already used")]
    DuplicateStageName(String),

    #[error("stage '{name}' starts at {actual}, expected {expected}")]
    NonContiguousStage {
        name: String,
        expected: u32,
        actual: u32,
    },

    #[error("stages cover {covered} years but the plan is {plan_length} years long")]
    InvalidPlanShape { covered: u32, plan_length: u32 },

    #[error("plan spans {plan_length} years, at most {max} are supported")]
    PlanTooLong { plan_length: u64, max: u32 },

    #[error("{field} must be a finite number")]
    NonFiniteValue { field: String },
}

pub type Result<T> = std::result::Result<T, PlanError>;
