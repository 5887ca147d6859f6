use crate::models::*;
use crate::services::HandoverService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use chrono::NaiveDate;
use serde_json::json;

#[utoipa::path(
    post,
    path = "/api/handover/start",
    tag = "handover",
    request_body = StartHandoverRequest,
    responses(
        (status = 200, description = "当日交接初始化/重算成功")
    )
)]
pub async fn start_handover(
    handover_service: web::Data<HandoverService>,
    req: web::Json<StartHandoverRequest>,
) -> Result<HttpResponse> {
    match handover_service.start_handover(req.date).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rows
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/handover/dates",
    tag = "handover",
    responses(
        (status = 200, description = "4 种支付方式齐全的完整业务日列表")
    )
)]
pub async fn available_dates(
    handover_service: web::Data<HandoverService>,
) -> Result<HttpResponse> {
    match handover_service.available_dates().await {
        Ok(dates) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": dates
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/handover/{date}",
    tag = "handover",
    params(("date" = String, Path, description = "业务日 YYYY-MM-DD")),
    responses(
        (status = 200, description = "该日对账行")
    )
)]
pub async fn get_day(
    handover_service: web::Data<HandoverService>,
    path: web::Path<NaiveDate>,
) -> Result<HttpResponse> {
    match handover_service.get_day(path.into_inner()).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rows
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/handover/{date}/{payment_type}",
    tag = "handover",
    params(
        ("date" = String, Path, description = "业务日 YYYY-MM-DD"),
        ("payment_type" = String, Path, description = "支付方式")
    ),
    request_body = UpdateHandoverRequest,
    responses(
        (status = 200, description = "人工项更新成功"),
        (status = 404, description = "该日无对应交接记录")
    )
)]
pub async fn update_manual(
    handover_service: web::Data<HandoverService>,
    path: web::Path<(NaiveDate, String)>,
    req: web::Json<UpdateHandoverRequest>,
) -> Result<HttpResponse> {
    let (date, payment_type) = path.into_inner();
    match handover_service
        .update_manual(date, &payment_type, req.into_inner())
        .await
    {
        Ok(row) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": row
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn handover_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/handover")
            .route("/start", web::post().to(start_handover))
            .route("/dates", web::get().to(available_dates))
            .route("/{date}", web::get().to(get_day))
            .route("/{date}/{payment_type}", web::put().to(update_manual)),
    );
}
