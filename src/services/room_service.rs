use crate::entities::{room_entity, room_type_entity};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

/// 房间与房型参照数据
#[derive(Clone)]
pub struct RoomService {
    pool: DatabaseConnection,
}

impl RoomService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_rooms(&self) -> AppResult<Vec<RoomResponse>> {
        let rooms = room_entity::Entity::find()
            .order_by_asc(room_entity::Column::RoomNumber)
            .all(&self.pool)
            .await?;
        Ok(rooms.into_iter().map(RoomResponse::from).collect())
    }

    pub async fn create_room(&self, req: CreateRoomRequest) -> AppResult<RoomResponse> {
        let room_type = room_type_entity::Entity::find_by_id(req.room_type.clone())
            .one(&self.pool)
            .await?;
        if room_type.is_none() {
            return Err(AppError::not_found(
                "INVALID_ROOM_TYPE",
                format!("房型不存在: {}", req.room_type),
            ));
        }
        let room = room_entity::ActiveModel {
            room_number: Set(req.room_number),
            room_type: Set(req.room_type),
            is_closed: Set(false),
        }
        .insert(&self.pool)
        .await?;
        Ok(room.into())
    }

    /// 关房/开房；关闭的房间不可预订
    pub async fn set_closed(&self, room_number: &str, closed: bool) -> AppResult<RoomResponse> {
        let room = room_entity::Entity::find_by_id(room_number)
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "INVALID_ROOM_NUMBER",
                    format!("房间不存在: {room_number}"),
                )
            })?;
        let mut active = room.into_active_model();
        active.is_closed = Set(closed);
        let updated = active.update(&self.pool).await?;
        Ok(updated.into())
    }

    pub async fn list_room_types(&self) -> AppResult<Vec<RoomTypeResponse>> {
        let types = room_type_entity::Entity::find()
            .order_by_asc(room_type_entity::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(types.into_iter().map(RoomTypeResponse::from).collect())
    }
}
