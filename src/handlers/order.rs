use crate::models::*;
use crate::services::{BillService, OrderService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "order",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "建单成功"),
        (status = 400, description = "字段或房价校验失败"),
        (status = 409, description = "重复订单/房间冲突/房间已关闭")
    )
)]
pub async fn create_order(
    order_service: web::Data<OrderService>,
    req: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse> {
    match order_service.create_order(req.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "order",
    params(
        ("page" = Option<u64>, Query, description = "页码"),
        ("page_size" = Option<u64>, Query, description = "每页数量"),
        ("status" = Option<String>, Query, description = "订单状态"),
        ("room_number" = Option<String>, Query, description = "房间号"),
        ("guest_name" = Option<String>, Query, description = "客人姓名模糊匹配"),
        ("start_date" = Option<String>, Query, description = "入住开始日期"),
        ("end_date" = Option<String>, Query, description = "入住结束日期")
    ),
    responses(
        (status = 200, description = "获取订单列表成功")
    )
)]
pub async fn list_orders(
    order_service: web::Data<OrderService>,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse> {
    match order_service.list_orders(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/orders/{order_id}",
    tag = "order",
    params(("order_id" = String, Path, description = "订单号")),
    responses(
        (status = 200, description = "获取订单成功"),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn get_order(
    order_service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match order_service.get_order(&path).await {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/orders/{order_id}",
    tag = "order",
    params(("order_id" = String, Path, description = "订单号")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "更新成功"),
        (status = 404, description = "订单不存在"),
        (status = 409, description = "终态订单不可修改")
    )
)]
pub async fn update_order(
    order_service: web::Data<OrderService>,
    path: web::Path<String>,
    req: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse> {
    match order_service.update_order(&path, req.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/orders/{order_id}/status",
    tag = "order",
    params(("order_id" = String, Path, description = "订单号")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "状态变更成功"),
        (status = 409, description = "非法状态流转")
    )
)]
pub async fn update_order_status(
    order_service: web::Data<OrderService>,
    path: web::Path<String>,
    req: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse> {
    match order_service.update_status(&path, &req.status).await {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/orders/{order_id}/deposit",
    tag = "order",
    params(("order_id" = String, Path, description = "订单号")),
    responses(
        (status = 200, description = "押金现状", body = DepositStatusResponse),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn get_deposit_status(
    order_service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match order_service.get_deposit_status(&path).await {
        Ok(status) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": status
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/orders/{order_id}/refund",
    tag = "order",
    params(("order_id" = String, Path, description = "订单号")),
    request_body = RefundDepositRequest,
    responses(
        (status = 200, description = "退押成功"),
        (status = 409, description = "退押超限或订单未退房")
    )
)]
pub async fn refund_deposit(
    bill_service: web::Data<BillService>,
    path: web::Path<String>,
    req: web::Json<RefundDepositRequest>,
) -> Result<HttpResponse> {
    match bill_service.refund_deposit(&path, req.into_inner()).await {
        Ok(bill) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": bill
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(create_order))
            .route("", web::get().to(list_orders))
            .route("/{order_id}", web::get().to(get_order))
            .route("/{order_id}", web::put().to(update_order))
            .route("/{order_id}/status", web::post().to(update_order_status))
            .route("/{order_id}/deposit", web::get().to(get_deposit_status))
            .route("/{order_id}/refund", web::post().to(refund_deposit)),
    );
}
