use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    BalanceSheet, ExpensesModel, ProjectionResult, RevenueModel, Stage, check_plan_size,
    run_projection, validate_plan,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BalanceSheetPayload {
    begin: Option<u32>,
    end: Option<u32>,
    cash: Option<f64>,
    stock: Option<f64>,
    bond: Option<f64>,
    precious_metal: Option<f64>,
    other_assets: Option<f64>,
    property_value: Option<f64>,
    other_real_estate: Option<f64>,
    #[serde(alias = "liablityValue")]
    liability_value: Option<f64>,
    provision: Option<f64>,
    #[serde(rename = "propertyValueIR", alias = "propertyValueIr")]
    property_value_ir: Option<f64>,
    #[serde(rename = "liabilityValueIR", alias = "liabilityValueIr")]
    liability_value_ir: Option<f64>,
    expected_inflation: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StagePayload {
    name: Option<String>,
    description: Option<String>,
    from_age: Option<u32>,
    to_age: Option<u32>,
    #[serde(alias = "revenueModel")]
    revenue: Option<RevenueModel>,
    #[serde(alias = "expense", alias = "expensesModel")]
    expenses: Option<ExpensesModel>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlanPayload {
    #[serde(alias = "assets")]
    balance_sheet: BalanceSheetPayload,
    stages: Vec<StagePayload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectOptions {
    skip_validation: bool,
}

#[derive(Debug)]
struct ApiRequest {
    sheet: BalanceSheet,
    stages: Vec<Stage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse<'a> {
    plan_length: u32,
    validated: bool,
    #[serde(flatten)]
    result: &'a ProjectionResult,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

fn api_request_from_payload(payload: PlanPayload) -> ApiRequest {
    let b = payload.balance_sheet;
    let sheet = BalanceSheet {
        begin: b.begin.unwrap_or(0),
        end: b.end.unwrap_or(0),
        cash: b.cash.unwrap_or(0.0),
        stock: b.stock.unwrap_or(0.0),
        bond: b.bond.unwrap_or(0.0),
        precious_metal: b.precious_metal.unwrap_or(0.0),
        other_assets: b.other_assets.unwrap_or(0.0),
        property_value: b.property_value.unwrap_or(0.0),
        other_real_estate: b.other_real_estate.unwrap_or(0.0),
        liability_value: b.liability_value.unwrap_or(0.0),
        provision: b.provision.unwrap_or(0.0),
        property_value_ir: b.property_value_ir.unwrap_or(0.0),
        liability_value_ir: b.liability_value_ir.unwrap_or(0.0),
        expected_inflation: b.expected_inflation.unwrap_or(0.0),
    };

    let stages = payload
        .stages
        .into_iter()
        .map(|s| {
            Stage::new(
                s.name.unwrap_or_default(),
                s.description.unwrap_or_default(),
                s.from_age.unwrap_or(0),
                s.to_age.unwrap_or(0),
                s.revenue.unwrap_or_default(),
                s.expenses.unwrap_or_default(),
            )
        })
        .collect();

    ApiRequest { sheet, stages }
}

fn project_request(request: &ApiRequest, validate: bool) -> Result<ProjectionResult, String> {
    if validate {
        validate_plan(&request.sheet, &request.stages).map_err(|e| e.to_string())?;
    } else {
        check_plan_size(&request.sheet, &request.stages).map_err(|e| e.to_string())?;
    }
    Ok(run_projection(&request.sheet, &request.stages))
}

/// Parses a JSON plan, normalizes absent amounts to zero and projects it.
pub fn project_plan_json(json: &str, validate: bool) -> Result<ProjectionResult, String> {
    let payload = serde_json::from_str::<PlanPayload>(json)
        .map_err(|e| format!("Invalid plan JSON: {e}"))?;
    let request = api_request_from_payload(payload);
    project_request(&request, validate)
}

pub fn router() -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/project", post(project_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("FFP HTTP API listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{port}/api/health");

    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_handler(
    Query(options): Query<ProjectOptions>,
    Json(payload): Json<PlanPayload>,
) -> Response {
    let request = api_request_from_payload(payload);
    let validate = !options.skip_validation;
    debug!(
        begin = request.sheet.begin,
        end = request.sheet.end,
        stages = request.stages.len(),
        validate,
        "project request"
    );

    let result = match project_request(&request, validate) {
        Ok(result) => result,
        Err(msg) => {
            warn!(error = %msg, "rejected plan");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    json_response(
        StatusCode::OK,
        ProjectResponse {
            plan_length: request.sheet.plan_length(),
            validated: validate,
            result: &result,
        },
    )
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
