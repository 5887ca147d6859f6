use crate::entities::{room_entity, room_type_entity};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRoomRequest {
    pub room_number: String,
    pub room_type: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetRoomClosedRequest {
    pub closed: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomResponse {
    pub room_number: String,
    pub room_type: String,
    pub is_closed: bool,
}

impl From<room_entity::Model> for RoomResponse {
    fn from(m: room_entity::Model) -> Self {
        Self {
            room_number: m.room_number,
            room_type: m.room_type,
            is_closed: m.is_closed,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomTypeResponse {
    pub name: String,
    pub default_price: f64,
}

impl From<room_type_entity::Model> for RoomTypeResponse {
    fn from(m: room_type_entity::Model) -> Self {
        Self {
            name: m.name,
            default_price: m.default_price,
        }
    }
}
