use crate::models::*;
use crate::services::BillService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/bills",
    tag = "bill",
    params(
        ("page" = Option<u64>, Query, description = "页码"),
        ("page_size" = Option<u64>, Query, description = "每页数量"),
        ("stay_date" = Option<String>, Query, description = "归属日"),
        ("order_id" = Option<String>, Query, description = "订单号")
    ),
    responses(
        (status = 200, description = "获取账单列表成功")
    )
)]
pub async fn list_bills(
    bill_service: web::Data<BillService>,
    query: web::Query<BillQuery>,
) -> Result<HttpResponse> {
    match bill_service.list_bills(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn bill_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/bills").route("", web::get().to(list_bills)));
}
