mod engine;
mod error;
mod flow;
mod intersection;
mod types;
mod validation;

pub use engine::{
    compute_required_capital_trajectory, compute_savings_trajectory, net_worth,
    net_worth_appreciation, planned_points, run_projection,
};
pub use error::PlanError;
pub use flow::{ExpenseWeights, ExpensesModel, NetFlowModel, RevenueModel, RevenueWeights};
pub use intersection::{
    financial_freedom_point, find_all_crossings, segment_intersection, to_polyline,
};
pub use types::{
    BalanceSheet, FreedomPoint, Point, ProjectionResult, Stage, StageSummary, Trajectory,
};
pub use validation::{MAX_PLAN_YEARS, check_plan_size, validate_plan};
