use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "handover_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub record_date: NaiveDate,
    /// 支付方式；"0" 为当日初始化哨兵行，不参与账目
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
