use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub order_id: String,
    pub room_number: String,
    pub guest_name: String,
    /// "订单账单" 结算 / "退押" 退押变动行
    pub change_type: String,
    pub change_price: f64,
    pub deposit: f64,
    /// 累计已退押金，历史符号约定为负数
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
