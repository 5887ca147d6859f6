use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::order::create_order,
        handlers::order::list_orders,
        handlers::order::get_order,
        handlers::order::update_order,
        handlers::order::update_order_status,
        handlers::order::get_deposit_status,
        handlers::order::refund_deposit,
        handlers::bill::list_bills,
        handlers::handover::start_handover,
        handlers::handover::available_dates,
        handlers::handover::get_day,
        handlers::handover::update_manual,
        handlers::room::list_rooms,
        handlers::room::create_room,
        handlers::room::set_room_closed,
        handlers::room::list_room_types,
    ),
    components(
        schemas(
            CreateOrderRequest,
            UpdateOrderRequest,
            UpdateOrderStatusRequest,
            OrderResponse,
            DepositStatusResponse,
            PriceInput,
            RefundDepositRequest,
            BillResponse,
            StartHandoverRequest,
            UpdateHandoverRequest,
            HandoverRowResponse,
            CreateRoomRequest,
            SetRoomClosedRequest,
            RoomResponse,
            RoomTypeResponse,
            ApiError,
        )
    ),
    tags(
        (name = "order", description = "订单台账"),
        (name = "bill", description = "账单与退押"),
        (name = "handover", description = "交接班对账"),
        (name = "room", description = "房间参照数据")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
