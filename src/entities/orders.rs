use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 外部分配的订单号，全局唯一
    #[sea_orm(unique)]
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
    /// 按日房价 {"YYYY-MM-DD": price}
    pub price_map: Json,
    pub deposit: f64,
    pub stay_type: String,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
