use crate::core::{PaymentStatus, SessionRecord, Summary, TopicRecord, UnpaidLineItem};
use crate::utils::error::{DashboardError, Result};
use chrono::{Duration, NaiveTime};
use std::collections::HashMap;

/// 每堂課的收費 (PHP)
pub const DEFAULT_RATE: f64 = 650.0;

/// 每堂課固定 90 分鐘
pub const SESSION_MINUTES: i64 = 90;

const MINUTES_PER_DAY: i64 = 24 * 60;

pub fn total_completed(records: &[SessionRecord]) -> f64 {
    records.iter().map(|r| r.session_count).sum()
}

pub fn total_paid(records: &[SessionRecord]) -> f64 {
    total_with_status(records, PaymentStatus::Paid)
}

pub fn total_unpaid(records: &[SessionRecord]) -> f64 {
    total_with_status(records, PaymentStatus::Unpaid)
}

fn total_with_status(records: &[SessionRecord], status: PaymentStatus) -> f64 {
    records
        .iter()
        .filter(|r| r.status == status)
        .map(|r| r.session_count)
        .sum()
}

pub fn unpaid_balance(records: &[SessionRecord], rate: f64) -> f64 {
    total_unpaid(records) * rate
}

/// Unpaid records in file order, each with its charge.
pub fn unpaid_line_items(records: &[SessionRecord], rate: f64) -> Vec<UnpaidLineItem> {
    records
        .iter()
        .filter(|r| r.status == PaymentStatus::Unpaid)
        .map(|r| UnpaidLineItem {
            record: r.clone(),
            charge: r.session_count * rate,
        })
        .collect()
}

pub fn summarize(records: &[SessionRecord], rate: f64) -> Summary {
    let total_unpaid = total_unpaid(records);
    Summary {
        total_completed: total_completed(records),
        total_paid: total_paid(records),
        total_unpaid,
        unpaid_balance: total_unpaid * rate,
    }
}

/// 計算下課時間：開始時間加上 `session_count × 90` 分鐘，跨午夜會繞回。
///
/// 分鐘數四捨五入到整數，所以半堂課是 45 分鐘。
pub fn session_end_time(time: &str, session_count: f64) -> Result<String> {
    let start = NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|e| {
        DashboardError::InvalidTime {
            value: time.to_string(),
            reason: e.to_string(),
        }
    })?;

    if !session_count.is_finite() || session_count < 0.0 {
        return Err(DashboardError::InvalidTime {
            value: time.to_string(),
            reason: format!("invalid session count {}", session_count),
        });
    }

    let minutes = (session_count * SESSION_MINUTES as f64).round() as i64;
    let (end, _) =
        start.overflowing_add_signed(Duration::minutes(minutes.rem_euclid(MINUTES_PER_DAY)));

    Ok(end.format("%H:%M").to_string())
}

/// 依學生分組，學生順序依第一次出現的順序
pub fn topics_by_tutee(topics: &[TopicRecord]) -> Vec<(String, Vec<&TopicRecord>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&TopicRecord>)> = Vec::new();

    for topic in topics {
        let slot = *index.entry(topic.tutee.as_str()).or_insert_with(|| {
            groups.push((topic.tutee.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(topic);
    }

    groups
}
