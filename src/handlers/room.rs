use crate::models::*;
use crate::services::RoomService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/rooms",
    tag = "room",
    responses(
        (status = 200, description = "房间列表")
    )
)]
pub async fn list_rooms(room_service: web::Data<RoomService>) -> Result<HttpResponse> {
    match room_service.list_rooms().await {
        Ok(rooms) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rooms
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/rooms",
    tag = "room",
    request_body = CreateRoomRequest,
    responses(
        (status = 200, description = "新增房间成功"),
        (status = 404, description = "房型不存在")
    )
)]
pub async fn create_room(
    room_service: web::Data<RoomService>,
    req: web::Json<CreateRoomRequest>,
) -> Result<HttpResponse> {
    match room_service.create_room(req.into_inner()).await {
        Ok(room) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": room
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/rooms/{room_number}/closed",
    tag = "room",
    params(("room_number" = String, Path, description = "房间号")),
    request_body = SetRoomClosedRequest,
    responses(
        (status = 200, description = "关房/开房成功"),
        (status = 404, description = "房间不存在")
    )
)]
pub async fn set_room_closed(
    room_service: web::Data<RoomService>,
    path: web::Path<String>,
    req: web::Json<SetRoomClosedRequest>,
) -> Result<HttpResponse> {
    match room_service.set_closed(&path, req.closed).await {
        Ok(room) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": room
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/room-types",
    tag = "room",
    responses(
        (status = 200, description = "房型列表")
    )
)]
pub async fn list_room_types(room_service: web::Data<RoomService>) -> Result<HttpResponse> {
    match room_service.list_room_types().await {
        Ok(types) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": types
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn room_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rooms")
            .route("", web::get().to(list_rooms))
            .route("", web::post().to(create_room))
            .route("/{room_number}/closed", web::post().to(set_room_closed)),
    );
    cfg.service(web::scope("/room-types").route("", web::get().to(list_room_types)));
}
