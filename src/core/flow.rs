use serde::{Deserialize, Serialize};

/// Per-field multipliers applied by [`RevenueModel::calculate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevenueWeights {
    pub net_salary: f64,
    pub capital_assets: f64,
    pub passive_income: f64,
    pub occasional_income: f64,
    pub other_income: f64,
    pub dependents: f64,
}

impl Default for RevenueWeights {
    fn default() -> Self {
        Self {
            net_salary: 1.0,
            capital_assets: 1.0,
            passive_income: 1.0,
            occasional_income: 1.0,
            other_income: 1.0,
            // Headcount, not money.
            dependents: 0.0,
        }
    }
}

/// Per-field multipliers applied by [`ExpensesModel::calculate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExpenseWeights {
    pub living_cost_per_month: f64,
    pub dependents: f64,
    pub purchase_fund: f64,
    pub occasional_cost: f64,
    pub maintenance_cost: f64,
    pub interest_and_repayment: f64,
    pub other_expenses: f64,
}

impl Default for ExpenseWeights {
    fn default() -> Self {
        Self {
            living_cost_per_month: 12.0,
            dependents: 0.0,
            purchase_fund: 1.0,
            occasional_cost: 1.0,
            maintenance_cost: 1.0,
            interest_and_repayment: 1.0,
            other_expenses: 1.0,
        }
    }
}

/// Annual income line items of one stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevenueModel {
    pub net_salary: f64,
    pub capital_assets: f64,
    pub passive_income: f64,
    pub occasional_income: f64,
    pub other_income: f64,
    pub dependents: f64,
    pub weights: RevenueWeights,
}

impl RevenueModel {
    pub fn calculate(&self) -> f64 {
        let w = &self.weights;
        self.net_salary * w.net_salary
            + self.capital_assets * w.capital_assets
            + self.passive_income * w.passive_income
            + self.occasional_income * w.occasional_income
            + self.other_income * w.other_income
            + self.dependents * w.dependents
    }

    pub(crate) fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("netSalary", self.net_salary),
            ("capitalAssets", self.capital_assets),
            ("passiveIncome", self.passive_income),
            ("occasionalIncome", self.occasional_income),
            ("otherIncome", self.other_income),
            ("dependents", self.dependents),
        ]
    }
}

/// Cost line items of one stage. `living_cost_per_month` is monthly, the rest are annual.
///
/// With default weights the monthly living cost is annualized (×12) and
/// `dependents` is a headcount that contributes nothing:
///
/// ```
/// use ffp::core::ExpensesModel;
///
/// let model = ExpensesModel {
///     living_cost_per_month: 1_000.0,
///     dependents: 2.0,
///     other_expenses: 500.0,
///     ..ExpensesModel::default()
/// };
/// assert_eq!(model.calculate(), 12_500.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExpensesModel {
    pub living_cost_per_month: f64,
    pub dependents: f64,
    pub purchase_fund: f64,
    pub occasional_cost: f64,
    pub maintenance_cost: f64,
    pub interest_and_repayment: f64,
    pub other_expenses: f64,
    pub weights: ExpenseWeights,
}

impl ExpensesModel {
    pub fn calculate(&self) -> f64 {
        let w = &self.weights;
        self.living_cost_per_month * w.living_cost_per_month
            + self.dependents * w.dependents
            + self.purchase_fund * w.purchase_fund
            + self.occasional_cost * w.occasional_cost
            + self.maintenance_cost * w.maintenance_cost
            + self.interest_and_repayment * w.interest_and_repayment
            + self.other_expenses * w.other_expenses
    }

    pub(crate) fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("livingCostPerMonth", self.living_cost_per_month),
            ("dependents", self.dependents),
            ("purchaseFund", self.purchase_fund),
            ("occasionalCost", self.occasional_cost),
            ("maintenanceCost", self.maintenance_cost),
            ("interestAndRepayment", self.interest_and_repayment),
            ("otherExpenses", self.other_expenses),
        ]
    }
}

/// A stage's flow in one direction. The projection only ever asks it for one number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NetFlowModel<'a> {
    Revenue(&'a RevenueModel),
    Expense(&'a ExpensesModel),
}

impl NetFlowModel<'_> {
    /// Net annual magnitude of the flow. Pure, never fails.
    pub fn calculate(&self) -> f64 {
        match self {
            NetFlowModel::Revenue(model) => model.calculate(),
            NetFlowModel::Expense(model) => model.calculate(),
        }
    }

    pub(crate) fn fields(&self) -> Vec<(&'static str, f64)> {
        match self {
            NetFlowModel::Revenue(model) => model.fields().to_vec(),
            NetFlowModel::Expense(model) => model.fields().to_vec(),
        }
    }
}

impl<'a> From<&'a RevenueModel> for NetFlowModel<'a> {
    fn from(value: &'a RevenueModel) -> Self {
        NetFlowModel::Revenue(value)
    }
}

impl<'a> From<&'a ExpensesModel> for NetFlowModel<'a> {
    fn from(value: &'a ExpensesModel) -> Self {
        NetFlowModel::Expense(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn default_models_calculate_to_zero() {
        assert_approx(RevenueModel::default().calculate(), 0.0);
        assert_approx(ExpensesModel::default().calculate(), 0.0);
    }

    #[test]
    fn revenue_sums_monetary_fields_and_ignores_dependents() {
        let model = RevenueModel {
            net_salary: 40_000.0,
            capital_assets: 1_000.0,
            passive_income: 2_000.0,
            occasional_income: 500.0,
            other_income: 250.0,
            dependents: 3.0,
            ..RevenueModel::default()
        };
        assert_approx(model.calculate(), 43_750.0);
    }

    #[test]
    fn expenses_annualize_monthly_living_cost() {
        let model = ExpensesModel {
            living_cost_per_month: 1_500.0,
            dependents: 2.0,
            purchase_fund: 1_000.0,
            occasional_cost: 300.0,
            maintenance_cost: 200.0,
            interest_and_repayment: 6_000.0,
            other_expenses: 100.0,
            ..ExpensesModel::default()
        };
        assert_approx(model.calculate(), 18_000.0 + 7_600.0);
    }

    #[test]
    fn custom_weights_are_honored() {
        let model = ExpensesModel {
            living_cost_per_month: 1_000.0,
            dependents: 2.0,
            weights: ExpenseWeights {
                living_cost_per_month: 1.0,
                dependents: 5_000.0,
                ..ExpenseWeights::default()
            },
            ..ExpensesModel::default()
        };
        assert_approx(model.calculate(), 11_000.0);
    }

    #[test]
    fn net_flow_model_delegates_to_variant() {
        let revenue = RevenueModel {
            net_salary: 10.0,
            ..RevenueModel::default()
        };
        let expense = ExpensesModel {
            other_expenses: 4.0,
            ..ExpensesModel::default()
        };
        assert_approx(NetFlowModel::from(&revenue).calculate(), 10.0);
        assert_approx(NetFlowModel::from(&expense).calculate(), 4.0);
        assert_eq!(NetFlowModel::from(&expense).fields().len(), 7);
    }

    #[test]
    fn missing_json_fields_default_to_zero_and_default_weights() {
        let model: ExpensesModel =
            serde_json::from_str(r#"{"livingCostPerMonth": 100}"#).expect("valid json");
        assert_eq!(model.weights, ExpenseWeights::default());
        assert_approx(model.calculate(), 1_200.0);

        let revenue: RevenueModel =
            serde_json::from_str(r#"{"netSalary": 7, "weights": {"netSalary": 2}}"#)
                .expect("valid json");
        assert_approx(revenue.weights.passive_income, 1.0);
        assert_approx(revenue.calculate(), 14.0);
    }
}
