use crate::entities::handover_record_entity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StartHandoverRequest {
    pub date: NaiveDate,
}

/// 人工录入项：房租收入、会员卡数、交办事项与备注
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateHandoverRequest {
    pub rent_income: Option<f64>,
    pub vip_card: Option<i32>,
    pub task_list: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HandoverRowResponse {
    pub record_date: NaiveDate,
    pub payment_type: String,
    pub reserve_cash: f64,
    pub room_income: f64,
    pub rest_income: f64,
    pub rent_income: f64,
    pub total_income: f64,
    pub room_refund: f64,
    pub rest_refund: f64,
    pub retained: f64,
    pub handover: f64,
    pub vip_card: i32,
    pub task_list: Option<String>,
    pub remarks: Option<String>,
}

impl From<handover_record_entity::Model> for HandoverRowResponse {
    fn from(m: handover_record_entity::Model) -> Self {
        Self {
            record_date: m.record_date,
            payment_type: m.payment_type,
            reserve_cash: m.reserve_cash,
            room_income: m.room_income,
            rest_income: m.rest_income,
            rent_income: m.rent_income,
            total_income: m.total_income,
            room_refund: m.room_refund,
            rest_refund: m.rest_refund,
            retained: m.retained,
            handover: m.handover,
            vip_card: m.vip_card,
            task_list: m.task_list,
            remarks: m.remarks,
        }
    }
}
