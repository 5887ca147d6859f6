use crate::entities::order_entity;
use crate::ledger::pricing::{self, PriceMap};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 房价既可以传单一价格，也可以传按日房价表；
/// 单一价格在校验前会被展开到每个应计费夜晚
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PriceInput {
    Scalar(f64),
    PerNight(PriceMap),
}

impl PriceInput {
    pub fn into_price_map(self, check_in: NaiveDate, check_out: NaiveDate) -> PriceMap {
        match self {
            PriceInput::Scalar(price) => pricing::expand_scalar(price, check_in, check_out),
            PriceInput::PerNight(map) => map,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub order_id: String,
    pub guest_name: String,
    pub phone: String,
    #[serde(default)]
    pub id_number: Option<String>,
    pub room_type: String,
    pub room_number: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    /// 缺省为待入住
    #[serde(default)]
    pub status: Option<String>,
    pub payment_method: String,
    pub price: PriceInput,
    #[serde(default)]
    pub deposit: Option<f64>,
    /// 客户端可传但不被信任，与日期推导不符时只记警告
    #[serde(default)]
    pub stay_type: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub guest_name: Option<String>,
    pub phone: Option<String>,
    pub id_number: Option<String>,
    pub room_type: Option<String>,
    pub room_number: Option<String>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub price: Option<PriceInput>,
    pub deposit: Option<f64>,
    pub remarks: Option<String>,
    /// 修改原因，写入审计流水
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub status: Option<String>,
    pub room_number: Option<String>,
    pub guest_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub order_id: String,
    pub guest_name: String,
    pub phone: String,
    pub id_number: String,
    pub room_type: String,
    pub room_number: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: String,
    pub payment_method: String,
    pub price_map: PriceMap,
    pub deposit: f64,
    pub stay_type: String,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<order_entity::Model> for OrderResponse {
    fn from(m: order_entity::Model) -> Self {
        let price_map: PriceMap = serde_json::from_value(m.price_map).unwrap_or_default();
        Self {
            order_id: m.order_id,
            guest_name: m.guest_name,
            phone: m.phone,
            id_number: m.id_number,
            room_type: m.room_type,
            room_number: m.room_number,
            check_in_date: m.check_in_date,
            check_out_date: m.check_out_date,
            status: m.status,
            payment_method: m.payment_method,
            price_map,
            deposit: m.deposit,
            stay_type: m.stay_type,
            remarks: m.remarks,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// 押金现状：{押金, 已退, 剩余}
#[derive(Debug, Serialize, ToSchema)]
pub struct DepositStatusResponse {
    pub deposit: f64,
    pub refunded: f64,
    pub remaining: f64,
}
