use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use civicdesk_core::ActorIdentity;
use civicdesk_domain::ReportId;

use crate::dto::{
    AssignReportRequest, FileReportRequest, RejectResolutionRequest, ReportResponse,
    SubmitProofRequest, UpdateRecordResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn file_report_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Json(payload): Json<FileReportRequest>,
) -> ApiResult<(StatusCode, Json<ReportResponse>)> {
    let report = state
        .report_service
        .file_report(&actor, payload.into_input()?)
        .await?;

    Ok((StatusCode::CREATED, Json(ReportResponse::from(report))))
}

pub async fn get_report_handler(
    State(state): State<AppState>,
    Path(report_id): Path<uuid::Uuid>,
) -> ApiResult<Json<ReportResponse>> {
    let report = state
        .report_service
        .get_report(ReportId::from_uuid(report_id))
        .await?;

    Ok(Json(ReportResponse::from(report)))
}

pub async fn list_report_updates_handler(
    State(state): State<AppState>,
    Path(report_id): Path<uuid::Uuid>,
) -> ApiResult<Json<Vec<UpdateRecordResponse>>> {
    let updates = state
        .report_service
        .list_updates(ReportId::from_uuid(report_id))
        .await?
        .into_iter()
        .map(UpdateRecordResponse::from)
        .collect();

    Ok(Json(updates))
}

pub async fn assign_report_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(report_id): Path<uuid::Uuid>,
    Json(payload): Json<AssignReportRequest>,
) -> ApiResult<Json<ReportResponse>> {
    let report = state
        .report_service
        .assign_to_staff(
            &actor,
            ReportId::from_uuid(report_id),
            civicdesk_domain::StaffId::from_uuid(payload.staff_id),
        )
        .await?;

    Ok(Json(ReportResponse::from(report)))
}

pub async fn resolve_report_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(report_id): Path<uuid::Uuid>,
    Json(payload): Json<SubmitProofRequest>,
) -> ApiResult<Json<ReportResponse>> {
    let claim = payload.position_claim()?;

    let report = state
        .report_service
        .submit_resolution_proof(
            &actor,
            ReportId::from_uuid(report_id),
            claim,
            payload.proof_image_ref.as_str(),
        )
        .await?;

    Ok(Json(ReportResponse::from(report)))
}

pub async fn verify_report_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(report_id): Path<uuid::Uuid>,
) -> ApiResult<Json<ReportResponse>> {
    let report = state
        .report_service
        .confirm_resolution(&actor, ReportId::from_uuid(report_id))
        .await?;

    Ok(Json(ReportResponse::from(report)))
}

pub async fn reject_report_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(report_id): Path<uuid::Uuid>,
    Json(payload): Json<RejectResolutionRequest>,
) -> ApiResult<Json<ReportResponse>> {
    let report = state
        .report_service
        .reject_resolution(&actor, ReportId::from_uuid(report_id), payload.comment)
        .await?;

    Ok(Json(ReportResponse::from(report)))
}

pub async fn close_report_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Path(report_id): Path<uuid::Uuid>,
) -> ApiResult<Json<ReportResponse>> {
    let report = state
        .report_service
        .force_close(&actor, ReportId::from_uuid(report_id))
        .await?;

    Ok(Json(ReportResponse::from(report)))
}
