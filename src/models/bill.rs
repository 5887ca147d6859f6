use crate::entities::bill_entity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RefundDepositRequest {
    pub amount: f64,
    pub method: String,
    /// 缺省为当前时间
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BillQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub stay_date: Option<NaiveDate>,
    pub order_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BillResponse {
    pub id: i64,
    pub order_id: String,
    pub room_number: String,
    pub guest_name: String,
    pub change_type: String,
    pub change_price: f64,
    pub deposit: f64,
    pub refund_deposit: f64,
    pub room_fee: f64,
    pub total_income: f64,
    pub pay_way: String,
    pub stay_date: NaiveDate,
    pub stay_type: String,
    pub create_time: DateTime<Utc>,
    pub refund_time: Option<DateTime<Utc>>,
    pub refund_method: Option<String>,
}

impl From<bill_entity::Model> for BillResponse {
    fn from(m: bill_entity::Model) -> Self {
        Self {
            id: m.id,
            order_id: m.order_id,
            room_number: m.room_number,
            guest_name: m.guest_name,
            change_type: m.change_type,
            change_price: m.change_price,
            deposit: m.deposit,
            refund_deposit: m.refund_deposit,
            room_fee: m.room_fee,
            total_income: m.total_income,
            pay_way: m.pay_way,
            stay_date: m.stay_date,
            stay_type: m.stay_type,
            create_time: m.create_time,
            refund_time: m.refund_time,
            refund_method: m.refund_method,
        }
    }
}
