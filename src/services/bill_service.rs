use crate::entities::{bill_entity, order_entity};
use crate::error::{AppError, AppResult};
use crate::ledger::deposit::{self, RefundError};
use crate::ledger::handover::ChangeType;
use crate::ledger::stay::OrderStatus;
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 退押台账：对账单押金做累计部分退还，上限为已收押金
#[derive(Clone)]
pub struct BillService {
    pool: DatabaseConnection,
}

impl BillService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 单次部分退押。同一账单上的并发退押必须串行：
    /// 整个读-改-写在一个事务里并对账单行加排他锁。
    pub async fn refund_deposit(
        &self,
        order_id: &str,
        req: RefundDepositRequest,
    ) -> AppResult<BillResponse> {
        if !req.amount.is_finite() || req.amount <= 0.0 {
            return Err(AppError::validation(
                "INVALID_REFUND_AMOUNT",
                format!("退押金额必须大于 0: {}", req.amount),
            ));
        }

        let refund_time = req.time.unwrap_or_else(Utc::now);

        let txn = self.pool.begin().await?;

        // 状态检查与退押同一事务，并锁订单行，
        // 否则检查通过后订单可能被并发改回在住
        let order = order_entity::Entity::find()
            .filter(order_entity::Column::OrderId.eq(order_id))
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::not_found("ORDER_NOT_FOUND", format!("订单不存在: {order_id}"))
            })?;
        let status = OrderStatus::parse(&order.status).ok_or_else(|| {
            AppError::InternalError(format!("订单 {order_id} 状态无法识别: {}", order.status))
        })?;
        if !matches!(status, OrderStatus::CheckedOut | OrderStatus::Cancelled) {
            return Err(AppError::state(
                "REFUND_ON_ACTIVE_STAY",
                format!("订单 {order_id} 尚未退房或取消，不能退押"),
            ));
        }

        // 约定：押金挂在订单最早一张带押金的结算账单上
        let bill = bill_entity::Entity::find()
            .filter(bill_entity::Column::OrderId.eq(order_id))
            .filter(bill_entity::Column::ChangeType.eq(ChangeType::Settlement.as_str()))
            .filter(bill_entity::Column::Deposit.gt(0.0))
            .order_by_asc(bill_entity::Column::CreateTime)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::not_found("BILL_NOT_FOUND", format!("订单 {order_id} 无押金账单"))
            })?;

        let new_column = deposit::apply_refund(bill.deposit, bill.refund_deposit, req.amount)
            .map_err(|e| match e {
                RefundError::NonPositiveAmount(_) => {
                    AppError::validation("INVALID_REFUND_AMOUNT", e.to_string())
                }
                RefundError::ExceedsDeposit { .. } => {
                    AppError::conflict("REFUND_EXCEEDS_DEPOSIT", e.to_string())
                }
            })?;

        let stay_type = bill.stay_type.clone();
        let room_number = bill.room_number.clone();
        let guest_name = bill.guest_name.clone();
        // 首次退押记录时间戳，后续部分退押保持原值；
        // 退押方式记最近一次渠道，逐笔渠道看各自的退押变动行
        let first_refund_time = bill.refund_time.unwrap_or(refund_time);

        let mut active = bill.into_active_model();
        active.refund_deposit = Set(new_column);
        active.refund_time = Set(Some(first_refund_time));
        active.refund_method = Set(Some(req.method.clone()));
        let updated = active.update(&txn).await?;

        // 同事务写入退押变动行，交接班按退押发生日扣账
        bill_entity::ActiveModel {
            order_id: Set(order_id.to_string()),
            room_number: Set(room_number),
            guest_name: Set(guest_name),
            change_type: Set(ChangeType::DepositRefund.as_str().to_string()),
            change_price: Set(-req.amount),
            deposit: Set(0.0),
            refund_deposit: Set(0.0),
            room_fee: Set(0.0),
            total_income: Set(0.0),
            pay_way: Set(req.method.clone()),
            stay_date: Set(refund_time.date_naive()),
            stay_type: Set(stay_type),
            create_time: Set(refund_time),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        log::info!(
            "订单 {order_id} 退押 {} 元（{}），累计 {}",
            req.amount,
            req.method,
            new_column.abs()
        );
        Ok(updated.into())
    }

    pub async fn list_bills(&self, query: &BillQuery) -> AppResult<PaginatedResponse<BillResponse>> {
        let params = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };
        let (page, page_size) = (params.page(), params.page_size());

        let mut find = bill_entity::Entity::find();
        if let Some(stay_date) = query.stay_date {
            find = find.filter(bill_entity::Column::StayDate.eq(stay_date));
        }
        if let Some(order_id) = &query.order_id {
            find = find.filter(bill_entity::Column::OrderId.eq(order_id.clone()));
        }

        let paginator = find
            .order_by_desc(bill_entity::Column::CreateTime)
            .paginate(&self.pool, page_size);
        let total = paginator.num_items().await?;
        let bills = paginator.fetch_page(page - 1).await?;

        Ok(PaginatedResponse::new(
            bills.into_iter().map(BillResponse::from).collect(),
            page,
            page_size,
            total,
        ))
    }
}
