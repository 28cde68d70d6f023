use crate::{auth::CurrentUser, error::AppError, AppState};
use analytics::DashboardReport;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use core_types::{Company, FinancialRecord, FinancialSubmission};
use ledger::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::sync::Arc;

type JsonBody<T> = WithRejection<Json<T>, AppError>;
type CompanyPath = WithRejection<Path<i64>, AppError>;
type RecordPath = WithRejection<Path<(i64, String)>, AppError>;

#[derive(Debug, Deserialize)]
pub struct NewCompany {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    skip: u32,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// # POST /financial/companies
pub async fn create_company(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    WithRejection(Json(body), _): JsonBody<NewCompany>,
) -> Result<(StatusCode, Json<Company>), AppError> {
    let company = state.ledger.create_company(&body.name, caller).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// # GET /financial/companies?skip&limit
pub async fn list_companies(
    State(state): State<Arc<AppState>>,
    _caller: CurrentUser,
    WithRejection(Query(page), _): WithRejection<Query<Pagination>, AppError>,
) -> Result<Json<Vec<Company>>, AppError> {
    let companies = state.ledger.list_companies(page.skip, page.limit).await?;
    Ok(Json(companies))
}

/// # GET /financial/companies/:company_id
pub async fn get_company(
    State(state): State<Arc<AppState>>,
    _caller: CurrentUser,
    WithRejection(Path(company_id), _): CompanyPath,
) -> Result<Json<Company>, AppError> {
    Ok(Json(state.ledger.get_company(company_id).await?))
}

/// # DELETE /financial/companies/:company_id
/// Deletes the company and every financial record it owns.
pub async fn delete_company(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    WithRejection(Path(company_id), _): CompanyPath,
) -> Result<StatusCode, AppError> {
    state.ledger.delete_company(company_id, caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// # POST /financial/companies/:company_id/financial-data
/// Creates the record for the payload's fiscal year, or replaces the existing one.
pub async fn submit_financial_data(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    WithRejection(Path(company_id), _): CompanyPath,
    WithRejection(Json(submission), _): JsonBody<FinancialSubmission>,
) -> Result<Json<FinancialRecord>, AppError> {
    let record = state.ledger.submit(company_id, submission, caller).await?;
    Ok(Json(record))
}

/// # GET /financial/companies/:company_id/financial-data
pub async fn list_financial_data(
    State(state): State<Arc<AppState>>,
    _caller: CurrentUser,
    WithRejection(Path(company_id), _): CompanyPath,
) -> Result<Json<Vec<FinancialRecord>>, AppError> {
    Ok(Json(state.ledger.list_records(company_id).await?))
}

/// # GET /financial/companies/:company_id/financial-data/:fiscal_year
pub async fn get_financial_data(
    State(state): State<Arc<AppState>>,
    _caller: CurrentUser,
    WithRejection(Path((company_id, fiscal_year)), _): RecordPath,
) -> Result<Json<FinancialRecord>, AppError> {
    Ok(Json(state.ledger.get_record(company_id, &fiscal_year).await?))
}

/// # PUT /financial/companies/:company_id/financial-data/:fiscal_year
pub async fn update_financial_data(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    WithRejection(Path((company_id, fiscal_year)), _): RecordPath,
    WithRejection(Json(submission), _): JsonBody<FinancialSubmission>,
) -> Result<Json<FinancialRecord>, AppError> {
    let record = state
        .ledger
        .update(company_id, &fiscal_year, submission, caller)
        .await?;
    Ok(Json(record))
}

/// # DELETE /financial/companies/:company_id/financial-data/:fiscal_year
pub async fn delete_financial_data(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    WithRejection(Path((company_id, fiscal_year)), _): RecordPath,
) -> Result<StatusCode, AppError> {
    state
        .ledger
        .delete_record(company_id, &fiscal_year, caller)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// # GET /financial/companies/:company_id/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    _caller: CurrentUser,
    WithRejection(Path(company_id), _): CompanyPath,
) -> Result<Json<DashboardReport>, AppError> {
    Ok(Json(state.ledger.dashboard(company_id).await?))
}
