use tracing::debug;

use super::intersection::{find_all_crossings, first_crossing, to_polyline};
use super::types::{BalanceSheet, ProjectionResult, Stage, StageSummary, Trajectory};

// Pre-sizing cap. Longer walks still complete, they just grow the vector.
const PREALLOCATED_POINTS: u64 = 256;

/// Points each trajectory will hold: `Σ stage_length + 1`, saturating.
pub fn planned_points(stages: &[Stage]) -> u64 {
    stages
        .iter()
        .fold(1u64, |total, stage| total.saturating_add(u64::from(stage.stage_length())))
}

fn trajectory_buffer(stages: &[Stage]) -> Trajectory {
    Vec::with_capacity(planned_points(stages).min(PREALLOCATED_POINTS) as usize)
}

/// Assets minus liabilities and provisions at the start of the plan.
pub fn net_worth(sheet: &BalanceSheet) -> f64 {
    let liquid = sheet.cash + sheet.stock + sheet.bond + sheet.precious_metal + sheet.other_assets;
    let real_estate = sheet.property_value + sheet.other_real_estate;
    let liabilities = sheet.liability_value + sheet.provision;
    liquid + real_estate - liabilities
}

/// Yearly appreciation of real estate net of interest on liabilities. Display only.
pub fn net_worth_appreciation(sheet: &BalanceSheet) -> f64 {
    (sheet.property_value + sheet.other_real_estate) * sheet.property_value_ir
        - sheet.liability_value * sheet.liability_value_ir
}

/// Linear accrual of each stage's net flow on top of the starting net worth.
///
/// Yields `Σ stage_length + 1` points; the last one adds a final year of the
/// last stage's revenue with no expense.
pub fn compute_savings_trajectory(sheet: &BalanceSheet, stages: &[Stage]) -> Trajectory {
    let mut points = trajectory_buffer(stages);

    let carried = stages.iter().fold(net_worth(sheet), |carried, stage| {
        let flow = stage.stage_of_life();
        let length = stage.stage_length();
        points.extend((1..=length).map(|i| carried + flow * f64::from(i)));
        if length == 0 {
            carried
        } else {
            points[points.len() - 1]
        }
    });

    let closing_revenue = stages.last().map(Stage::revenue).unwrap_or(0.0);
    points.push(carried + closing_revenue);
    points
}

/// Capital needed at each age to fund every remaining expense, grown by inflation.
///
/// Accumulated backwards from the end of the plan and then reversed, so the
/// last point is the zero seed and the first is the full requirement.
pub fn compute_required_capital_trajectory(sheet: &BalanceSheet, stages: &[Stage]) -> Trajectory {
    let growth = 1.0 + sheet.expected_inflation / 100.0;
    let plan_length = i64::from(sheet.plan_length());

    let mut points = trajectory_buffer(stages);
    points.push(0.0);

    let mut carried = 0.0;
    let mut prior_years: i64 = 0;
    for stage in stages.iter().rev() {
        let expense = stage.expense();
        let length = stage.stage_length();
        for i in 1..=i64::from(length) {
            let exponent = plan_length - (i + prior_years) + 1;
            carried += expense * inflation_factor(growth, exponent);
            points.push(carried);
        }
        prior_years += i64::from(length);
    }

    points.reverse();
    points
}

fn inflation_factor(growth: f64, exponent: i64) -> f64 {
    match i32::try_from(exponent) {
        Ok(exponent) => growth.powi(exponent),
        Err(_) => growth.powf(exponent as f64),
    }
}

/// Runs both trajectories and the crossing search for one plan.
pub fn run_projection(sheet: &BalanceSheet, stages: &[Stage]) -> ProjectionResult {
    let savings = compute_savings_trajectory(sheet, stages);
    let required_capital = compute_required_capital_trajectory(sheet, stages);

    let crossings = find_all_crossings(
        &to_polyline(sheet.begin, &savings),
        &to_polyline(sheet.begin, &required_capital),
    );
    let freedom_point = first_crossing(&crossings);

    debug!(
        begin = sheet.begin,
        end = sheet.end,
        stages = stages.len(),
        points = savings.len(),
        crossings = crossings.len(),
        reached = freedom_point.is_reached(),
        "projection complete"
    );

    ProjectionResult {
        begin: sheet.begin,
        end: sheet.end,
        net_worth: net_worth(sheet),
        net_worth_appreciation: net_worth_appreciation(sheet),
        savings,
        required_capital,
        crossings,
        freedom_point,
        stage_summaries: stages.iter().map(StageSummary::from).collect(),
    }
}
