use crate::entities::{order_entity, room_entity};
use crate::ledger::stay::StayType;
use chrono::NaiveDate;

/// 候选预订的日期区间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaySpan {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StaySpan {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    pub fn stay_type(&self) -> StayType {
        StayType::of_dates(self.check_in, self.check_out)
    }
}

/// 冲突类型，只用于生成提示文案，不构成独立规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    RestVsRest,
    RestVsOvernight,
    OvernightVsRest,
    OvernightVsOvernight,
}

impl ConflictKind {
    pub fn classify(candidate: StaySpan, existing: StaySpan) -> Self {
        match (candidate.stay_type(), existing.stay_type()) {
            (StayType::RestRoom, StayType::RestRoom) => ConflictKind::RestVsRest,
            (StayType::RestRoom, StayType::Overnight) => ConflictKind::RestVsOvernight,
            (StayType::Overnight, StayType::RestRoom) => ConflictKind::OvernightVsRest,
            (StayType::Overnight, StayType::Overnight) => ConflictKind::OvernightVsOvernight,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ConflictKind::RestVsRest => "当日已有休息房预订",
            ConflictKind::RestVsOvernight => "当日有客房客人在住",
            ConflictKind::OvernightVsRest => "区间内已有休息房预订",
            ConflictKind::OvernightVsOvernight => "与已有客房预订日期重叠",
        }
    }
}

/// 两个日期区间是否冲突。
/// 休息房候选（入住=退房=D）：D 落在已有订单 [入住, 退房] 闭区间内即冲突；
/// 过夜候选：半开区间 [入住, 退房) 重叠判定。
pub fn overlaps(candidate: StaySpan, existing: StaySpan) -> bool {
    if candidate.check_in == candidate.check_out {
        let day = candidate.check_in;
        existing.check_in <= day && day <= existing.check_out
    } else {
        existing.check_in < candidate.check_out && existing.check_out > candidate.check_in
    }
}

/// 在给定房间的非终态订单中找出第一个冲突订单。
/// 这只是快速路径校验，并发下的正确性由建单事务里的 advisory lock 保证。
pub fn find_conflict<'a>(
    candidate: StaySpan,
    existing: &'a [order_entity::Model],
) -> Option<&'a order_entity::Model> {
    existing.iter().find(|o| {
        overlaps(
            candidate,
            StaySpan::new(o.check_in_date, o.check_out_date),
        )
    })
}

/// 房间不可订的原因
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unavailable<'a> {
    /// 房间已关闭，任何日期都拒绝
    RoomClosed,
    /// 与已有订单的日期区间冲突
    Booked(&'a order_entity::Model),
}

/// 房间级可订性检查：先看开关状态，再做区间冲突判定
pub fn check_room<'a>(
    room: &room_entity::Model,
    candidate: StaySpan,
    occupied: &'a [order_entity::Model],
) -> Result<(), Unavailable<'a>> {
    if room.is_closed {
        return Err(Unavailable::RoomClosed);
    }
    match find_conflict(candidate, occupied) {
        Some(existing) => Err(Unavailable::Booked(existing)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn span(check_in: &str, check_out: &str) -> StaySpan {
        StaySpan::new(d(check_in), d(check_out))
    }

    fn room(is_closed: bool) -> room_entity::Model {
        room_entity::Model {
            room_number: "201".to_string(),
            room_type: "标准间".to_string(),
            is_closed,
        }
    }

    fn occupied(check_in: &str, check_out: &str) -> order_entity::Model {
        order_entity::Model {
            id: 1,
            order_id: "HD1001".to_string(),
            guest_name: "张三".to_string(),
            phone: "13800000000".to_string(),
            id_number: String::new(),
            room_type: "标准间".to_string(),
            room_number: "201".to_string(),
            check_in_date: d(check_in),
            check_out_date: d(check_out),
            status: "待入住".to_string(),
            payment_method: "现金".to_string(),
            price_map: serde_json::json!({}),
            deposit: 0.0,
            stay_type: "客房".to_string(),
            remarks: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_overnight_overlap_symmetry() {
        let a = span("2025-06-10", "2025-06-13");
        let b = span("2025-06-12", "2025-06-15");
        assert!(overlaps(a, b));
        assert!(overlaps(b, a));
    }

    #[test]
    fn test_adjacent_intervals_do_not_conflict() {
        // b == c：前一单退房当天即可接新单
        let a = span("2025-06-10", "2025-06-12");
        let b = span("2025-06-12", "2025-06-14");
        assert!(!overlaps(a, b));
        assert!(!overlaps(b, a));
    }

    #[test]
    fn test_contained_interval_conflicts() {
        let outer = span("2025-06-10", "2025-06-20");
        let inner = span("2025-06-12", "2025-06-13");
        assert!(overlaps(outer, inner));
        assert!(overlaps(inner, outer));
    }

    #[test]
    fn test_rest_room_vs_rest_room_same_day() {
        let a = span("2025-06-20", "2025-06-20");
        let b = span("2025-06-20", "2025-06-20");
        assert!(overlaps(a, b));
        assert_eq!(ConflictKind::classify(a, b), ConflictKind::RestVsRest);
    }

    #[test]
    fn test_rest_room_inside_overnight_inclusive_boundaries() {
        let overnight = span("2025-06-10", "2025-06-12");
        // 闭区间：入住日、中间日、退房日均冲突
        for day in ["2025-06-10", "2025-06-11", "2025-06-12"] {
            let rest = span(day, day);
            assert!(overlaps(rest, overnight), "{day}");
        }
        let before = span("2025-06-09", "2025-06-09");
        let after = span("2025-06-13", "2025-06-13");
        assert!(!overlaps(before, overnight));
        assert!(!overlaps(after, overnight));
    }

    #[test]
    fn test_rest_room_different_day_no_conflict() {
        let a = span("2025-06-20", "2025-06-20");
        let b = span("2025-06-21", "2025-06-21");
        assert!(!overlaps(a, b));
    }

    #[test]
    fn test_closed_room_rejected_even_when_vacant() {
        // 关闭的房间没有任何在途订单也不可预订
        let result = check_room(&room(true), span("2025-06-10", "2025-06-12"), &[]);
        assert_eq!(result, Err(Unavailable::RoomClosed));
    }

    #[test]
    fn test_open_room_falls_through_to_interval_check() {
        let candidate = span("2025-06-10", "2025-06-12");
        let existing = [occupied("2025-06-11", "2025-06-13")];
        assert!(matches!(
            check_room(&room(false), candidate, &existing),
            Err(Unavailable::Booked(_))
        ));
        assert!(check_room(&room(false), candidate, &[]).is_ok());
    }

    #[test]
    fn test_conflict_kind_description() {
        let rest = span("2025-06-20", "2025-06-20");
        let overnight = span("2025-06-19", "2025-06-21");
        assert_eq!(
            ConflictKind::classify(rest, overnight),
            ConflictKind::RestVsOvernight
        );
        assert_eq!(
            ConflictKind::classify(overnight, rest),
            ConflictKind::OvernightVsRest
        );
    }
}
