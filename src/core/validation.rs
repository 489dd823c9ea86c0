use std::collections::HashSet;

use super::engine::planned_points;
use super::error::{PlanError, Result};
use super::types::{BalanceSheet, Stage};

/// Longest horizon, in years, a plan may span.
pub const MAX_PLAN_YEARS: u32 = 150;

/// Bounds the work a projection will do, even for plans that skip validation.
pub fn check_plan_size(sheet: &BalanceSheet, stages: &[Stage]) -> Result<()> {
    let stage_years = planned_points(stages) - 1;
    let plan_length = stage_years.max(u64::from(sheet.plan_length()));
    if plan_length > u64::from(MAX_PLAN_YEARS) {
        return Err(PlanError::PlanTooLong {
            plan_length,
            max: MAX_PLAN_YEARS,
        });
    }
    Ok(())
}

/// Checks a plan the way the input screens do before showing results.
///
/// The projection itself never calls this and accepts any shape.
pub fn validate_plan(sheet: &BalanceSheet, stages: &[Stage]) -> Result<()> {
    validate_balance_sheet(sheet)?;
    check_plan_size(sheet, stages)?;

    let mut seen = HashSet::with_capacity(stages.len());
    let mut expected_from = sheet.begin;
    let mut covered = 0u32;

    for (index, stage) in stages.iter().enumerate() {
        if stage.name.trim().is_empty() {
            return Err(PlanError::MissingStageField {
                index,
                field: "name",
            });
        }
        if stage.description.trim().is_empty() {
            return Err(PlanError::MissingStageField {
                index,
                field: "description",
            });
        }
        if !seen.insert(stage.name.to_lowercase()) {
            return Err(PlanError::DuplicateStageName(stage.name.clone()));
        }
        if stage.to_age <= stage.from_age {
            return Err(PlanError::InvalidStageRange {
                name: stage.name.clone(),
                from_age: stage.from_age,
                to_age: stage.to_age,
            });
        }
        if stage.from_age != expected_from {
            return Err(PlanError::NonContiguousStage {
                name: stage.name.clone(),
                expected: expected_from,
                actual: stage.from_age,
            });
        }
        for (field, value) in stage.flows().iter().flat_map(|flow| flow.fields()) {
            if !value.is_finite() {
                return Err(PlanError::NonFiniteValue {
                    field: format!("{}.{field}", stage.name),
                });
            }
        }

        expected_from = stage.to_age;
        covered += stage.stage_length();
    }

    if covered != sheet.plan_length() || expected_from != sheet.end {
        return Err(PlanError::InvalidPlanShape {
            covered,
            plan_length: sheet.plan_length(),
        });
    }
    Ok(())
}

fn validate_balance_sheet(sheet: &BalanceSheet) -> Result<()> {
    if sheet.begin == 0 || sheet.end == 0 || sheet.end <= sheet.begin {
        return Err(PlanError::InvalidPlanRange {
            begin: sheet.begin,
            end: sheet.end,
        });
    }
    if sheet.plan_length() > MAX_PLAN_YEARS {
        return Err(PlanError::PlanTooLong {
            plan_length: u64::from(sheet.plan_length()),
            max: MAX_PLAN_YEARS,
        });
    }
    for (field, value) in sheet.monetary_fields() {
        if !value.is_finite() {
            return Err(PlanError::NonFiniteValue {
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::flow::{ExpensesModel, RevenueModel};

    fn sheet() -> BalanceSheet {
        BalanceSheet {
            begin: 30,
            end: 60,
            cash: 10_000.0,
            ..BalanceSheet::default()
        }
    }

    fn stage(name: &str, from_age: u32, to_age: u32) -> Stage {
        Stage::new(
            name,
            "desc",
            from_age,
            to_age,
            RevenueModel::default(),
            ExpensesModel::default(),
        )
    }

    #[test]
    fn accepts_contiguous_plan_covering_the_horizon() {
        let stages = [stage("career", 30, 45), stage("retired", 45, 60)];
        assert_eq!(validate_plan(&sheet(), &stages), Ok(()));
    }

    #[test]
    fn rejects_zero_or_inverted_range() {
        let mut bad = sheet();
        bad.begin = 0;
        assert!(matches!(
            validate_plan(&bad, &[]),
            Err(PlanError::InvalidPlanRange { .. })
        ));

        let mut inverted = sheet();
        inverted.end = 20;
        assert!(matches!(
            validate_plan(&inverted, &[]),
            Err(PlanError::InvalidPlanRange { begin: 30, end: 20 })
        ));
    }

    #[test]
    fn rejects_case_insensitive_duplicate_names() {
        let stages = [stage("Career", 30, 45), stage("career", 45, 60)];
        assert_eq!(
            validate_plan(&sheet(), &stages),
            Err(PlanError::DuplicateStageName("career".to_string()))
        );
    }

    #[test]
    fn rejects_stage_with_non_positive_length() {
        let stages = [stage("career", 30, 30)];
        assert!(matches!(
            validate_plan(&sheet(), &stages),
            Err(PlanError::InvalidStageRange { .. })
        ));
    }

    #[test]
    fn rejects_gap_between_stages() {
        let stages = [stage("career", 30, 45), stage("retired", 46, 60)];
        assert_eq!(
            validate_plan(&sheet(), &stages),
            Err(PlanError::NonContiguousStage {
                name: "retired".to_string(),
                expected: 45,
                actual: 46,
            })
        );
    }

    #[test]
    fn rejects_plan_not_reaching_the_end() {
        let stages = [stage("career", 30, 45)];
        assert_eq!(
            validate_plan(&sheet(), &stages),
            Err(PlanError::InvalidPlanShape {
                covered: 15,
                plan_length: 30,
            })
        );
        assert!(matches!(
            validate_plan(&sheet(), &[]),
            Err(PlanError::InvalidPlanShape { covered: 0, .. })
        ));
    }

    #[test]
    fn rejects_missing_name_and_description() {
        let mut unnamed = stage("  ", 30, 60);
        assert!(matches!(
            validate_plan(&sheet(), std::slice::from_ref(&unnamed)),
            Err(PlanError::MissingStageField { field: "name", .. })
        ));

        unnamed.name = "career".to_string();
        unnamed.description.clear();
        assert!(matches!(
            validate_plan(&sheet(), &[unnamed]),
            Err(PlanError::MissingStageField {
                field: "description",
                ..
            })
        ));
    }

    #[test]
    fn rejects_horizon_beyond_the_cap() {
        let huge = BalanceSheet {
            begin: 1,
            end: 4_000_000_000,
            ..BalanceSheet::default()
        };
        assert_eq!(
            validate_plan(&huge, &[stage("forever", 1, 4_000_000_000)]),
            Err(PlanError::PlanTooLong {
                plan_length: 3_999_999_999,
                max: MAX_PLAN_YEARS,
            })
        );

        let longest = BalanceSheet {
            begin: 1,
            end: 1 + MAX_PLAN_YEARS,
            ..BalanceSheet::default()
        };
        assert_eq!(
            validate_plan(&longest, &[stage("whole", 1, 1 + MAX_PLAN_YEARS)]),
            Ok(())
        );
    }

    #[test]
    fn plan_size_counts_overlapping_stage_years() {
        let stages = [stage("a", 30, 130), stage("b", 30, 130)];
        assert_eq!(
            check_plan_size(&sheet(), &stages),
            Err(PlanError::PlanTooLong {
                plan_length: 200,
                max: MAX_PLAN_YEARS,
            })
        );

        let huge = [stage("a", 0, 3_000_000_000), stage("b", 0, 3_000_000_000)];
        assert!(matches!(
            check_plan_size(&sheet(), &huge),
            Err(PlanError::PlanTooLong {
                plan_length: 6_000_000_000,
                ..
            })
        ));

        assert_eq!(check_plan_size(&sheet(), &[stage("career", 30, 60)]), Ok(()));
    }

    #[test]
    fn rejects_non_finite_amounts() {
        let mut bad_sheet = sheet();
        bad_sheet.stock = f64::NAN;
        let err = validate_plan(&bad_sheet, &[stage("all", 30, 60)]).expect_err("nan stock");
        assert_eq!(err.to_string(), "stock must be a finite number");

        let mut bad_stage = stage("all", 30, 60);
        bad_stage.expenses_model = ExpensesModel {
            purchase_fund: f64::INFINITY,
            ..ExpensesModel::default()
        };
        let err = validate_plan(&sheet(), &[bad_stage]).expect_err("infinite expense");
        assert_eq!(err.to_string(), "all.purchaseFund must be a finite number");
    }
}
