use serde::{Deserialize, Serialize};

use super::flow::{ExpensesModel, NetFlowModel, RevenueModel};

/// Age-indexed projected values: index 0 is `begin`, index k is `begin + k`.
pub type Trajectory = Vec<f64>;

/// Starting financial snapshot of a plan. Rates on property and liabilities are
/// fractional, `expected_inflation` is in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BalanceSheet {
    pub begin: u32,
    pub end: u32,
    pub cash: f64,
    pub stock: f64,
    pub bond: f64,
    pub precious_metal: f64,
    pub other_assets: f64,
    pub property_value: f64,
    pub other_real_estate: f64,
    pub liability_value: f64,
    pub provision: f64,
    #[serde(rename = "propertyValueIR")]
    pub property_value_ir: f64,
    #[serde(rename = "liabilityValueIR")]
    pub liability_value_ir: f64,
    pub expected_inflation: f64,
}

impl BalanceSheet {
    pub fn plan_length(&self) -> u32 {
        self.end.saturating_sub(self.begin)
    }

    pub(crate) fn monetary_fields(&self) -> [(&'static str, f64); 12] {
        [
            ("cash", self.cash),
            ("stock", self.stock),
            ("bond", self.bond),
            ("preciousMetal", self.precious_metal),
            ("otherAssets", self.other_assets),
            ("propertyValue", self.property_value),
            ("otherRealEstate", self.other_real_estate),
            ("liabilityValue", self.liability_value),
            ("provision", self.provision),
            ("propertyValueIR", self.property_value_ir),
            ("liabilityValueIR", self.liability_value_ir),
            ("expectedInflation", self.expected_inflation),
        ]
    }
}

/// One contiguous segment of the life plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub from_age: u32,
    pub to_age: u32,
    #[serde(default)]
    pub revenue_model: RevenueModel,
    #[serde(default)]
    pub expenses_model: ExpensesModel,
}

impl Stage {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        from_age: u32,
        to_age: u32,
        revenue: RevenueModel,
        expenses: ExpensesModel,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            from_age,
            to_age,
            revenue_model: revenue,
            expenses_model: expenses,
        }
    }

    /// Years covered. An inverted range covers none.
    pub fn stage_length(&self) -> u32 {
        self.to_age.saturating_sub(self.from_age)
    }

    /// Both flows, revenue first, as the projection sees them.
    pub fn flows(&self) -> [NetFlowModel<'_>; 2] {
        [
            NetFlowModel::from(&self.revenue_model),
            NetFlowModel::from(&self.expenses_model),
        ]
    }

    pub fn revenue(&self) -> f64 {
        NetFlowModel::from(&self.revenue_model).calculate()
    }

    pub fn expense(&self) -> f64 {
        NetFlowModel::from(&self.expenses_model).calculate()
    }

    /// Net annual flow: revenue minus expense.
    pub fn stage_of_life(&self) -> f64 {
        self.revenue() - self.expense()
    }
}

/// A point on an (age, money) chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where savings first meet the required capital, if they ever do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FreedomPoint {
    Reached { age: f64, value: f64 },
    NotReached,
}

impl FreedomPoint {
    pub fn is_reached(&self) -> bool {
        matches!(self, FreedomPoint::Reached { .. })
    }
}

/// Income/expense/earning triple shown per stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSummary {
    pub name: String,
    pub from_age: u32,
    pub to_age: u32,
    pub income: f64,
    pub expense: f64,
    pub earning: f64,
}

impl From<&Stage> for StageSummary {
    fn from(stage: &Stage) -> Self {
        let income = stage.revenue();
        let expense = stage.expense();
        Self {
            name: stage.name.clone(),
            from_age: stage.from_age,
            to_age: stage.to_age,
            income,
            expense,
            earning: income - expense,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub begin: u32,
    pub end: u32,
    pub net_worth: f64,
    pub net_worth_appreciation: f64,
    pub savings: Trajectory,
    pub required_capital: Trajectory,
    pub crossings: Vec<Point>,
    pub freedom_point: FreedomPoint,
    pub stage_summaries: Vec<StageSummary>,
}
