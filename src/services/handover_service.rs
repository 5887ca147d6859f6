use crate::config::HandoverConfig;
use crate::entities::{bill_entity, handover_record_entity, order_entity};
use crate::error::{AppError, AppResult};
use crate::ledger::handover::{self, BillEntry, ChangeType};
use crate::ledger::stay::{OrderStatus, PaymentMethod};
use crate::models::*;
use chrono::{Duration, NaiveDate};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, IntoActiveModel, QueryFilter, QuerySelect, Set,
    Statement, TransactionTrait,
};
use std::collections::{BTreeMap, HashSet};

/// 当日初始化哨兵行的 payment_type 值
const SENTINEL_PAYMENT_TYPE: &str = "0";

/// 交接班对账：按日按支付方式汇总，备用金与前一日交接金额日日相扣
#[derive(Clone)]
pub struct HandoverService {
    pool: DatabaseConnection,
    config: HandoverConfig,
}

impl HandoverService {
    pub fn new(pool: DatabaseConnection, config: HandoverConfig) -> Self {
        Self { pool, config }
    }

    /// 重算并落库某业务日的 4 行对账。幂等：按 (日期, 支付方式) upsert，
    /// 可安全重试；4 行写入在同一事务内，避免半写的日期被当成"完整日"。
    pub async fn compute_day(&self, date: NaiveDate) -> AppResult<Vec<HandoverRowResponse>> {
        let txn = self.pool.begin().await?;
        self.compute_day_in(&txn, date).await?;
        txn.commit().await?;
        self.get_day(date).await
    }

    /// 初始化某日交接：重算 4 行，并写入哨兵行标记该日已初始化。
    /// 重复调用只是再次 upsert，不会重复初始化。
    pub async fn start_handover(&self, date: NaiveDate) -> AppResult<Vec<HandoverRowResponse>> {
        let txn = self.pool.begin().await?;
        self.compute_day_in(&txn, date).await?;

        let sentinel = handover_record_entity::ActiveModel {
            record_date: Set(date),
            payment_type: Set(SENTINEL_PAYMENT_TYPE.to_string()),
            ..Default::default()
        };
        let insert = handover_record_entity::Entity::insert(sentinel).on_conflict(
            OnConflict::columns([
                handover_record_entity::Column::RecordDate,
                handover_record_entity::Column::PaymentType,
            ])
            .do_nothing()
            .to_owned(),
        );
        match insert.exec(&txn).await {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e.into()),
        }

        txn.commit().await?;
        self.get_day(date).await
    }

    /// 某日的 4 行对账（不含哨兵行），按固定支付方式顺序返回
    pub async fn get_day(&self, date: NaiveDate) -> AppResult<Vec<HandoverRowResponse>> {
        let mut rows = handover_record_entity::Entity::find()
            .filter(handover_record_entity::Column::RecordDate.eq(date))
            .filter(handover_record_entity::Column::PaymentType.ne(SENTINEL_PAYMENT_TYPE))
            .all(&self.pool)
            .await?;
        rows.sort_by_key(|r| {
            PaymentMethod::ALL
                .iter()
                .position(|m| m.as_str() == r.payment_type)
                .unwrap_or(PaymentMethod::ALL.len())
        });
        Ok(rows.into_iter().map(HandoverRowResponse::from).collect())
    }

    /// 可选日期列表：4 种支付方式都有行的日期才算完整业务日
    pub async fn available_dates(&self) -> AppResult<Vec<NaiveDate>> {
        let rows = self
            .pool
            .query_all(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT record_date FROM handover_records
                   WHERE payment_type <> $1
                   GROUP BY record_date
                   HAVING COUNT(DISTINCT payment_type) >= 4
                   ORDER BY record_date DESC"#,
                [SENTINEL_PAYMENT_TYPE.into()],
            ))
            .await?;
        let mut dates = Vec::with_capacity(rows.len());
        for row in rows {
            dates.push(row.try_get::<NaiveDate>("", "record_date")?);
        }
        Ok(dates)
    }

    /// 修改人工录入项并按存量分项重算合计与交接金额
    pub async fn update_manual(
        &self,
        date: NaiveDate,
        payment_type: &str,
        req: UpdateHandoverRequest,
    ) -> AppResult<HandoverRowResponse> {
        let method = PaymentMethod::parse(payment_type).ok_or_else(|| {
            AppError::validation(
                "INVALID_PAYMENT_METHOD",
                format!("无效的支付方式: {payment_type}"),
            )
        })?;

        let txn = self.pool.begin().await?;
        let row = handover_record_entity::Entity::find()
            .filter(handover_record_entity::Column::RecordDate.eq(date))
            .filter(handover_record_entity::Column::PaymentType.eq(method.as_str()))
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "HANDOVER_NOT_FOUND",
                    format!("{date} 无 {} 交接记录", method.as_str()),
                )
            })?;

        let rent_income = req.rent_income.unwrap_or(row.rent_income);
        let total_income = row.reserve_cash + row.room_income + row.rest_income + rent_income;
        let handover = total_income - row.room_refund - row.rest_refund - row.retained;

        let mut active = row.clone().into_active_model();
        active.rent_income = Set(rent_income);
        active.total_income = Set(total_income);
        active.handover = Set(handover);
        if let Some(vip_card) = req.vip_card {
            active.vip_card = Set(vip_card);
        }
        if let Some(task_list) = req.task_list {
            active.task_list = Set(Some(task_list));
        }
        if let Some(remarks) = req.remarks {
            active.remarks = Set(Some(remarks));
        }
        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated.into())
    }

    async fn compute_day_in(&self, txn: &DatabaseTransaction, date: NaiveDate) -> AppResult<()> {
        // 1. 备用金 = 前一日同方式的交接金额；前一日无记录则为 0
        let prev_rows = handover_record_entity::Entity::find()
            .filter(handover_record_entity::Column::RecordDate.eq(date - Duration::days(1)))
            .filter(handover_record_entity::Column::PaymentType.ne(SENTINEL_PAYMENT_TYPE))
            .all(txn)
            .await?;
        let mut prev_handover = BTreeMap::new();
        for row in &prev_rows {
            if let Some(method) = PaymentMethod::parse(&row.payment_type) {
                prev_handover.insert(method, row.handover);
            }
        }

        // 当日已有行的人工录入项原样保留
        let existing = handover_record_entity::Entity::find()
            .filter(handover_record_entity::Column::RecordDate.eq(date))
            .filter(handover_record_entity::Column::PaymentType.ne(SENTINEL_PAYMENT_TYPE))
            .all(txn)
            .await?;
        let mut rent_income = BTreeMap::new();
        for row in &existing {
            if let Some(method) = PaymentMethod::parse(&row.payment_type) {
                rent_income.insert(method, row.rent_income);
            }
        }

        // 2. 归属当日的全部账单行；取消订单的结算行剔除，退押行保留
        let bills = bill_entity::Entity::find()
            .filter(bill_entity::Column::StayDate.eq(date))
            .all(txn)
            .await?;
        let order_ids: Vec<String> = bills.iter().map(|b| b.order_id.clone()).collect();
        let mut cancelled = HashSet::new();
        if !order_ids.is_empty() {
            let rows = order_entity::Entity::find()
                .filter(order_entity::Column::OrderId.is_in(order_ids))
                .filter(order_entity::Column::Status.eq(OrderStatus::Cancelled.as_str()))
                .all(txn)
                .await?;
            for o in rows {
                cancelled.insert(o.order_id);
            }
        }
        let entries: Vec<BillEntry> = bills
            .iter()
            .filter(|b| {
                ChangeType::parse(&b.change_type)
                    .map(|c| handover::counts_for_day(c, cancelled.contains(&b.order_id)))
                    .unwrap_or(false)
            })
            .filter_map(BillEntry::from_model)
            .collect();

        // 3–7. 纯计算
        let days = handover::compute_day(&prev_handover, &entries, &rent_income, &self.config);

        // 8. 逐方式 upsert
        for (method, day) in days {
            let active = handover_record_entity::ActiveModel {
                record_date: Set(date),
                payment_type: Set(method.as_str().to_string()),
                reserve_cash: Set(day.reserve),
                room_income: Set(day.room_income),
                rest_income: Set(day.rest_income),
                rent_income: Set(day.rent_income),
                total_income: Set(day.total_income()),
                room_refund: Set(day.room_refund),
                rest_refund: Set(day.rest_refund),
                retained: Set(day.retained),
                handover: Set(day.handover()),
                ..Default::default()
            };
            handover_record_entity::Entity::insert(active)
                .on_conflict(
                    OnConflict::columns([
                        handover_record_entity::Column::RecordDate,
                        handover_record_entity::Column::PaymentType,
                    ])
                    .update_columns([
                        handover_record_entity::Column::ReserveCash,
                        handover_record_entity::Column::RoomIncome,
                        handover_record_entity::Column::RestIncome,
                        handover_record_entity::Column::RentIncome,
                        handover_record_entity::Column::TotalIncome,
                        handover_record_entity::Column::RoomRefund,
                        handover_record_entity::Column::RestRefund,
                        handover_record_entity::Column::Retained,
                        handover_record_entity::Column::Handover,
                    ])
                    .to_owned(),
                )
                .exec(txn)
                .await?;
        }
        Ok(())
    }
}
