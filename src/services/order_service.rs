use crate::entities::{bill_entity, order_audit_entity, order_entity, room_entity, room_type_entity};
use crate::error::{AppError, AppResult};
use crate::ledger::availability::{ConflictKind, StaySpan, Unavailable, check_room};
use crate::ledger::handover::ChangeType;
use crate::ledger::pricing::{self, PriceMap, PricingError};
use crate::ledger::stay::{OrderStatus, StayType};
use crate::models::*;
use crate::utils::validate_cn_phone;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    Set, Statement, TransactionTrait,
};

/// 订单台账：建单、修改、状态机流转，是整个系统的事务边界
#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create_order(&self, req: CreateOrderRequest) -> AppResult<OrderResponse> {
        // 1. 字段与格式校验，全部通过后才碰数据库
        for (name, value) in [
            ("order_id", &req.order_id),
            ("guest_name", &req.guest_name),
            ("phone", &req.phone),
            ("room_type", &req.room_type),
            ("room_number", &req.room_number),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::validation(
                    "MISSING_REQUIRED_FIELDS",
                    format!("缺少必填字段: {name}"),
                ));
            }
        }
        validate_cn_phone(&req.phone)?;

        let status = match &req.status {
            None => OrderStatus::Pending,
            Some(s) => OrderStatus::parse(s).ok_or_else(|| {
                AppError::validation("INVALID_ORDER_STATUS", format!("无效的订单状态: {s}"))
            })?,
        };

        if req.check_in_date > req.check_out_date {
            return Err(AppError::validation(
                "INVALID_DATE_RANGE",
                "入住日期不能晚于退房日期",
            ));
        }

        // stay_type 由日期推导，客户端传值只做比对告警
        let stay_type = StayType::of_dates(req.check_in_date, req.check_out_date);
        if let Some(claimed) = &req.stay_type {
            if claimed != stay_type.as_str() {
                log::warn!(
                    "订单 {} 客户端 stay_type={claimed} 与日期推导 {} 不符，以推导为准",
                    req.order_id,
                    stay_type.as_str()
                );
            }
        }

        let price_map = req
            .price
            .clone()
            .into_price_map(req.check_in_date, req.check_out_date);
        pricing::validate(&price_map, req.check_in_date, req.check_out_date)
            .map_err(pricing_error)?;

        let deposit = req.deposit.unwrap_or(0.0);
        if !deposit.is_finite() || deposit < 0.0 {
            return Err(AppError::validation("INVALID_DEPOSIT", "押金不能为负数"));
        }

        // 冲突检查与插入必须在同一事务内，并以房间号为键取 advisory lock，
        // 否则两个并发请求会同时通过检查
        let txn = self.pool.begin().await?;
        txn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT pg_advisory_xact_lock(hashtext($1))",
            [req.room_number.clone().into()],
        ))
        .await?;

        // 2. 同客同房型同日期的在途订单视为重复提交
        let duplicate = order_entity::Entity::find()
            .filter(order_entity::Column::GuestName.eq(req.guest_name.clone()))
            .filter(order_entity::Column::RoomType.eq(req.room_type.clone()))
            .filter(order_entity::Column::CheckInDate.eq(req.check_in_date))
            .filter(order_entity::Column::CheckOutDate.eq(req.check_out_date))
            .filter(order_entity::Column::Status.is_in(non_terminal_statuses()))
            .one(&txn)
            .await?;
        if let Some(dup) = duplicate {
            return Err(AppError::conflict(
                "DUPLICATE_ORDER",
                format!("已存在相同的在途订单: {}", dup.order_id),
            ));
        }

        // 3. 参照数据
        let room_type = room_type_entity::Entity::find_by_id(req.room_type.clone())
            .one(&txn)
            .await?;
        if room_type.is_none() {
            return Err(AppError::not_found(
                "INVALID_ROOM_TYPE",
                format!("房型不存在: {}", req.room_type),
            ));
        }
        let room = room_entity::Entity::find_by_id(req.room_number.clone())
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "INVALID_ROOM_NUMBER",
                    format!("房间不存在: {}", req.room_number),
                )
            })?;

        // 4. 可订性：关闭状态与占用冲突
        let candidate = StaySpan::new(req.check_in_date, req.check_out_date);
        let occupied = order_entity::Entity::find()
            .filter(order_entity::Column::RoomNumber.eq(req.room_number.clone()))
            .filter(order_entity::Column::Status.is_in(non_terminal_statuses()))
            .all(&txn)
            .await?;
        check_room(&room, candidate, &occupied).map_err(|e| unavailable_error(&req.room_number, candidate, e))?;

        // 5. 落单并同时生成结算账单
        let now = Utc::now();
        let room_fee = pricing::room_fee(&price_map);
        let stay_date = pricing::stay_date(&price_map, req.check_in_date);

        let order = order_entity::ActiveModel {
            order_id: Set(req.order_id.clone()),
            guest_name: Set(req.guest_name.clone()),
            phone: Set(req.phone.clone()),
            id_number: Set(req.id_number.clone().unwrap_or_default()),
            room_type: Set(req.room_type.clone()),
            room_number: Set(req.room_number.clone()),
            check_in_date: Set(req.check_in_date),
            check_out_date: Set(req.check_out_date),
            status: Set(status.as_str().to_string()),
            payment_method: Set(req.payment_method.clone()),
            price_map: Set(serde_json::to_value(&price_map)?),
            deposit: Set(deposit),
            stay_type: Set(stay_type.as_str().to_string()),
            remarks: Set(req.remarks.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        bill_entity::ActiveModel {
            order_id: Set(req.order_id.clone()),
            room_number: Set(req.room_number.clone()),
            guest_name: Set(req.guest_name.clone()),
            change_type: Set(ChangeType::Settlement.as_str().to_string()),
            change_price: Set(0.0),
            deposit: Set(deposit),
            refund_deposit: Set(0.0),
            room_fee: Set(room_fee),
            total_income: Set(room_fee + deposit),
            pay_way: Set(req.payment_method.clone()),
            stay_date: Set(stay_date),
            stay_type: Set(stay_type.as_str().to_string()),
            create_time: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        log::info!(
            "订单 {} 已创建: 房间 {} {} ~ {}",
            order.order_id,
            order.room_number,
            order.check_in_date,
            order.check_out_date
        );
        Ok(order.into())
    }

    pub async fn list_orders(&self, query: &OrderQuery) -> AppResult<PaginatedResponse<OrderResponse>> {
        let params = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };
        let (page, page_size) = (params.page(), params.page_size());

        let mut find = order_entity::Entity::find();
        if let Some(status) = &query.status {
            find = find.filter(order_entity::Column::Status.eq(status.clone()));
        }
        if let Some(room) = &query.room_number {
            find = find.filter(order_entity::Column::RoomNumber.eq(room.clone()));
        }
        if let Some(guest) = &query.guest_name {
            find = find.filter(order_entity::Column::GuestName.contains(guest));
        }
        if let Some(start) = query.start_date {
            find = find.filter(order_entity::Column::CheckInDate.gte(start));
        }
        if let Some(end) = query.end_date {
            find = find.filter(order_entity::Column::CheckInDate.lte(end));
        }

        let paginator = find
            .order_by_desc(order_entity::Column::CreatedAt)
            .paginate(&self.pool, page_size);
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page - 1).await?;

        Ok(PaginatedResponse::new(
            orders.into_iter().map(OrderResponse::from).collect(),
            page,
            page_size,
            total,
        ))
    }

    pub async fn get_order(&self, order_id: &str) -> AppResult<OrderResponse> {
        let order = self.find_order(order_id).await?;
        Ok(order.into())
    }

    /// 差量更新；日期变化时重新推导 stay_type；换房或改期重新做可订性检查；
    /// 结算账单在同一事务内跟随刷新。每个变更字段追加一条审计流水，
    /// 审计写入失败只记警告，不回滚主更新。
    pub async fn update_order(
        &self,
        order_id: &str,
        req: UpdateOrderRequest,
    ) -> AppResult<OrderResponse> {
        let order = self.find_order(order_id).await?;

        let current_status = OrderStatus::parse(&order.status);
        if matches!(current_status, Some(s) if s.is_terminal()) {
            return Err(AppError::state(
                "ORDER_TERMINAL",
                format!("订单 {order_id} 已是终态，不可修改"),
            ));
        }

        let check_in = req.check_in_date.unwrap_or(order.check_in_date);
        let check_out = req.check_out_date.unwrap_or(order.check_out_date);
        if check_in > check_out {
            return Err(AppError::validation(
                "INVALID_DATE_RANGE",
                "入住日期不能晚于退房日期",
            ));
        }
        let dates_changed = check_in != order.check_in_date || check_out != order.check_out_date;

        if let Some(phone) = &req.phone {
            validate_cn_phone(phone)?;
        }

        // 日期或价格有变时，房价表必须重新满足应计费夜晚约束
        let current_map: PriceMap = serde_json::from_value(order.price_map.clone())?;
        let new_map = match (&req.price, dates_changed) {
            (Some(price), _) => Some(price.clone().into_price_map(check_in, check_out)),
            (None, true) => Some(current_map.clone()),
            (None, false) => None,
        };
        if let Some(map) = &new_map {
            pricing::validate(map, check_in, check_out).map_err(pricing_error)?;
        }

        let mut changes: Vec<(&'static str, String, String)> = Vec::new();
        let mut active = order.clone().into_active_model();

        macro_rules! diff_field {
            ($field:ident) => {
                if let Some(value) = req.$field.clone() {
                    if value != order.$field {
                        changes.push((
                            stringify!($field),
                            order.$field.to_string(),
                            value.to_string(),
                        ));
                        active.$field = Set(value);
                    }
                }
            };
        }

        diff_field!(guest_name);
        diff_field!(phone);
        diff_field!(id_number);
        diff_field!(room_type);
        diff_field!(room_number);
        diff_field!(payment_method);

        if let Some(deposit) = req.deposit {
            if deposit != order.deposit {
                changes.push(("deposit", order.deposit.to_string(), deposit.to_string()));
                active.deposit = Set(deposit);
            }
        }
        if let Some(remarks) = req.remarks.clone() {
            if Some(&remarks) != order.remarks.as_ref() {
                changes.push((
                    "remarks",
                    order.remarks.clone().unwrap_or_default(),
                    remarks.clone(),
                ));
                active.remarks = Set(Some(remarks));
            }
        }
        if check_in != order.check_in_date {
            changes.push((
                "check_in_date",
                order.check_in_date.to_string(),
                check_in.to_string(),
            ));
            active.check_in_date = Set(check_in);
        }
        if check_out != order.check_out_date {
            changes.push((
                "check_out_date",
                order.check_out_date.to_string(),
                check_out.to_string(),
            ));
            active.check_out_date = Set(check_out);
        }
        if let Some(map) = new_map {
            let json = serde_json::to_value(&map)?;
            if json != order.price_map {
                changes.push((
                    "price_map",
                    order.price_map.to_string(),
                    json.to_string(),
                ));
            }
            active.price_map = Set(json);
        }
        if dates_changed {
            let new_stay_type = StayType::of_dates(check_in, check_out);
            // 只有推导结果确实不同才落库
            if new_stay_type.as_str() != order.stay_type {
                changes.push((
                    "stay_type",
                    order.stay_type.clone(),
                    new_stay_type.as_str().to_string(),
                ));
                active.stay_type = Set(new_stay_type.as_str().to_string());
            }
        }

        if changes.is_empty() {
            return Ok(order.into());
        }

        let final_room = req.room_number.clone().unwrap_or_else(|| order.room_number.clone());
        let room_changed = final_room != order.room_number;

        let txn = self.pool.begin().await?;

        // 换房或改期等同一次重新预订，走建单同款的可订性检查；
        // 锁键仍是房间号，与建单路径互斥
        if room_changed || dates_changed {
            txn.execute(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT pg_advisory_xact_lock(hashtext($1))",
                [final_room.clone().into()],
            ))
            .await?;

            let room = room_entity::Entity::find_by_id(final_room.clone())
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(
                        "INVALID_ROOM_NUMBER",
                        format!("房间不存在: {final_room}"),
                    )
                })?;
            let candidate = StaySpan::new(check_in, check_out);
            let occupied = order_entity::Entity::find()
                .filter(order_entity::Column::RoomNumber.eq(final_room.clone()))
                .filter(order_entity::Column::Status.is_in(non_terminal_statuses()))
                .filter(order_entity::Column::OrderId.ne(order_id))
                .all(&txn)
                .await?;
            check_room(&room, candidate, &occupied)
                .map_err(|e| unavailable_error(&final_room, candidate, e))?;
        }

        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;

        // 结算账单跟随订单修改，否则退押上限和交接班会读到旧值
        let settlement = bill_entity::Entity::find()
            .filter(bill_entity::Column::OrderId.eq(order_id))
            .filter(bill_entity::Column::ChangeType.eq(ChangeType::Settlement.as_str()))
            .order_by_asc(bill_entity::Column::CreateTime)
            .one(&txn)
            .await?;
        if let Some(bill) = settlement {
            let map: PriceMap = serde_json::from_value(updated.price_map.clone())?;
            amend_settlement(bill, &updated, &map).update(&txn).await?;
        }

        txn.commit().await?;

        // 审计是软失败：主更新已提交，流水写不进去不再回滚
        let audits: Vec<order_audit_entity::ActiveModel> = changes
            .iter()
            .map(|(field, old, new)| order_audit_entity::ActiveModel {
                order_id: Set(order_id.to_string()),
                field: Set(field.to_string()),
                old_value: Set(Some(old.clone())),
                new_value: Set(Some(new.clone())),
                reason: Set(req.reason.clone()),
                created_at: Set(Utc::now()),
                ..Default::default()
            })
            .collect();
        if let Err(e) = order_audit_entity::Entity::insert_many(audits)
            .exec(&self.pool)
            .await
        {
            log::warn!("订单 {order_id} 审计流水写入失败（主更新已生效）: {e}");
        }

        Ok(updated.into())
    }

    /// 状态机流转；退房时物化或对齐结算账单（老数据建单时可能没有生成）
    pub async fn update_status(&self, order_id: &str, status: &str) -> AppResult<OrderResponse> {
        let to = OrderStatus::parse(status).ok_or_else(|| {
            AppError::validation("INVALID_ORDER_STATUS", format!("无效的订单状态: {status}"))
        })?;
        let order = self.find_order(order_id).await?;
        let from = OrderStatus::parse(&order.status).ok_or_else(|| {
            AppError::InternalError(format!("订单 {order_id} 存量状态无法识别: {}", order.status))
        })?;

        if !OrderStatus::can_transition(from, to) {
            return Err(AppError::state(
                "INVALID_STATUS_TRANSITION",
                format!("订单状态不能从 {} 变更为 {}", from.as_str(), to.as_str()),
            ));
        }

        let txn = self.pool.begin().await?;
        let mut active = order.clone().into_active_model();
        active.status = Set(to.as_str().to_string());
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;

        if to == OrderStatus::CheckedOut {
            self.materialize_bill(&txn, &order).await?;
        }
        txn.commit().await?;

        log::info!("订单 {order_id} 状态 {} -> {}", from.as_str(), to.as_str());
        Ok(updated.into())
    }

    pub async fn check_in(&self, order_id: &str) -> AppResult<OrderResponse> {
        self.update_status(order_id, OrderStatus::CheckedIn.as_str()).await
    }

    pub async fn check_out(&self, order_id: &str) -> AppResult<OrderResponse> {
        self.update_status(order_id, OrderStatus::CheckedOut.as_str()).await
    }

    pub async fn cancel(&self, order_id: &str) -> AppResult<OrderResponse> {
        self.update_status(order_id, OrderStatus::Cancelled.as_str()).await
    }

    /// 押金现状。押金优先读订单，老数据退回账单；已退金额合并两套来源：
    /// 退押台账列值优先，没有时才统计存量 "退押" 变动行（迁移兼容垫片）。
    pub async fn get_deposit_status(&self, order_id: &str) -> AppResult<DepositStatusResponse> {
        let order = self.find_order(order_id).await?;
        let bills = bill_entity::Entity::find()
            .filter(bill_entity::Column::OrderId.eq(order_id))
            .order_by_asc(bill_entity::Column::CreateTime)
            .all(&self.pool)
            .await?;

        let deposit = if order.deposit > 0.0 {
            order.deposit
        } else {
            bills
                .iter()
                .filter(|b| b.change_type == ChangeType::Settlement.as_str())
                .map(|b| b.deposit)
                .find(|d| *d > 0.0)
                .unwrap_or(0.0)
        };

        let current: f64 = bills.iter().map(|b| b.refund_deposit.abs()).sum();
        let refunded = if current > 0.0 {
            current
        } else {
            bills
                .iter()
                .filter(|b| b.change_type == ChangeType::DepositRefund.as_str())
                .map(|b| b.change_price.abs())
                .sum()
        };

        Ok(DepositStatusResponse {
            deposit,
            refunded,
            remaining: deposit - refunded,
        })
    }

    async fn find_order(&self, order_id: &str) -> AppResult<order_entity::Model> {
        order_entity::Entity::find()
            .filter(order_entity::Column::OrderId.eq(order_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::not_found("ORDER_NOT_FOUND", format!("订单不存在: {order_id}"))
            })
    }

    async fn materialize_bill(
        &self,
        txn: &DatabaseTransaction,
        order: &order_entity::Model,
    ) -> AppResult<()> {
        let existing = bill_entity::Entity::find()
            .filter(bill_entity::Column::OrderId.eq(order.order_id.clone()))
            .filter(bill_entity::Column::ChangeType.eq(ChangeType::Settlement.as_str()))
            .order_by_asc(bill_entity::Column::CreateTime)
            .one(txn)
            .await?;
        let price_map: PriceMap = serde_json::from_value(order.price_map.clone())?;

        // 已有账单按订单现值对齐后返回，退房是最后一次对账机会
        if let Some(bill) = existing {
            amend_settlement(bill, order, &price_map).update(txn).await?;
            return Ok(());
        }

        let room_fee = pricing::room_fee(&price_map);
        bill_entity::ActiveModel {
            order_id: Set(order.order_id.clone()),
            room_number: Set(order.room_number.clone()),
            guest_name: Set(order.guest_name.clone()),
            change_type: Set(ChangeType::Settlement.as_str().to_string()),
            change_price: Set(0.0),
            deposit: Set(order.deposit),
            refund_deposit: Set(0.0),
            room_fee: Set(room_fee),
            total_income: Set(room_fee + order.deposit),
            pay_way: Set(order.payment_method.clone()),
            stay_date: Set(pricing::stay_date(&price_map, order.check_in_date)),
            stay_type: Set(order.stay_type.clone()),
            create_time: Set(Utc::now()),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        Ok(())
    }
}

fn non_terminal_statuses() -> Vec<&'static str> {
    vec![OrderStatus::Pending.as_str(), OrderStatus::CheckedIn.as_str()]
}

fn unavailable_error(room_number: &str, candidate: StaySpan, e: Unavailable<'_>) -> AppError {
    match e {
        Unavailable::RoomClosed => AppError::conflict(
            "ROOM_CLOSED",
            format!("房间 {room_number} 已关闭，暂不可预订"),
        ),
        Unavailable::Booked(existing) => {
            let kind = ConflictKind::classify(
                candidate,
                StaySpan::new(existing.check_in_date, existing.check_out_date),
            );
            AppError::conflict(
                "ROOM_ALREADY_BOOKED",
                format!(
                    "房间 {room_number} {}（冲突订单 {}，{} ~ {}）",
                    kind.describe(),
                    existing.order_id,
                    existing.check_in_date,
                    existing.check_out_date
                ),
            )
        }
    }
}

/// 订单结算账单跟随订单：押金、房费、归属日、住宿类型、支付方式同步刷新，
/// 退押累计列与退押时间戳不动
fn amend_settlement(
    bill: bill_entity::Model,
    order: &order_entity::Model,
    price_map: &PriceMap,
) -> bill_entity::ActiveModel {
    let room_fee = pricing::room_fee(price_map);
    let mut active = bill.into_active_model();
    active.room_number = Set(order.room_number.clone());
    active.guest_name = Set(order.guest_name.clone());
    active.deposit = Set(order.deposit);
    active.room_fee = Set(room_fee);
    active.total_income = Set(room_fee + order.deposit);
    active.pay_way = Set(order.payment_method.clone());
    active.stay_date = Set(pricing::stay_date(price_map, order.check_in_date));
    active.stay_type = Set(order.stay_type.clone());
    active
}

fn pricing_error(e: PricingError) -> AppError {
    let code = match e {
        PricingError::EmptyPrice | PricingError::NonPositivePrice { .. } => "INVALID_PRICE",
        _ => "INVALID_PRICE_DATE_RANGE",
    };
    AppError::validation(code, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::ActiveValue;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn edited_order() -> order_entity::Model {
        order_entity::Model {
            id: 1,
            order_id: "HD2001".to_string(),
            guest_name: "李四".to_string(),
            phone: "13900000000".to_string(),
            id_number: String::new(),
            room_type: "大床房".to_string(),
            room_number: "305".to_string(),
            check_in_date: d("2025-06-10"),
            check_out_date: d("2025-06-12"),
            status: "待入住".to_string(),
            payment_method: "微信".to_string(),
            price_map: serde_json::json!({"2025-06-10": 470.0, "2025-06-11": 480.0}),
            deposit: 200.0,
            stay_type: "客房".to_string(),
            remarks: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn booking_time_bill() -> bill_entity::Model {
        bill_entity::Model {
            id: 7,
            order_id: "HD2001".to_string(),
            room_number: "201".to_string(),
            guest_name: "李四".to_string(),
            change_type: ChangeType::Settlement.as_str().to_string(),
            change_price: 0.0,
            deposit: 100.0,
            refund_deposit: -50.0,
            room_fee: 300.0,
            total_income: 400.0,
            pay_way: "现金".to_string(),
            stay_date: d("2025-05-01"),
            stay_type: "休息房".to_string(),
            create_time: chrono::Utc::now(),
            refund_time: None,
            refund_method: None,
        }
    }

    #[test]
    fn test_settlement_bill_follows_order_edits() {
        // 押金 100 -> 200、改期改价后，账单的押金/房费/归属日/方式全部对齐订单现值
        let order = edited_order();
        let map: PriceMap = serde_json::from_value(order.price_map.clone()).unwrap();
        let amended = amend_settlement(booking_time_bill(), &order, &map);

        assert_eq!(amended.deposit.clone().unwrap(), 200.0);
        assert_eq!(amended.room_fee.clone().unwrap(), 950.0);
        assert_eq!(amended.total_income.clone().unwrap(), 1150.0);
        assert_eq!(amended.pay_way.clone().unwrap(), "微信");
        assert_eq!(amended.room_number.clone().unwrap(), "305");
        assert_eq!(amended.stay_date.clone().unwrap(), d("2025-06-10"));
        assert_eq!(amended.stay_type.clone().unwrap(), "客房");
    }

    #[test]
    fn test_settlement_amendment_keeps_refund_ledger_columns() {
        // 已退押金的累计列与时间戳是退押台账的事实，订单修改不得改写
        let order = edited_order();
        let map: PriceMap = serde_json::from_value(order.price_map.clone()).unwrap();
        let amended = amend_settlement(booking_time_bill(), &order, &map);

        assert!(matches!(amended.refund_deposit, ActiveValue::Unchanged(v) if v == -50.0));
        assert!(matches!(amended.refund_time, ActiveValue::Unchanged(None)));
        assert!(matches!(amended.refund_method, ActiveValue::Unchanged(None)));
        assert!(matches!(amended.change_price, ActiveValue::Unchanged(v) if v == 0.0));
    }
}
