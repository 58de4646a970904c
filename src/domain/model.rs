use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

impl PaymentStatus {
    /// 顯示用的標準大小寫
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Unpaid => "Unpaid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("paid") {
            Ok(PaymentStatus::Paid)
        } else if trimmed.eq_ignore_ascii_case("unpaid") {
            Ok(PaymentStatus::Unpaid)
        } else {
            Err(format!("unknown payment status '{}'", trimmed))
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub date: String,
    pub time: String,
    pub tutee: String,
    pub session_count: f64,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub date: String,
    pub tutee: String,
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnpaidLineItem {
    pub record: SessionRecord,
    pub charge: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Summary {
    pub total_completed: f64,
    pub total_paid: f64,
    pub total_unpaid: f64,
    pub unpaid_balance: f64,
}

/// 單次刷新的結果，每次刷新都整份重建
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub sessions: Vec<SessionRecord>,
    pub topics: Vec<TopicRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_case_insensitive() {
        for raw in ["Unpaid", "UNPAID", "unpaid", "  unPaid \r"] {
            assert_eq!(raw.parse::<PaymentStatus>().unwrap(), PaymentStatus::Unpaid);
        }
        assert_eq!("PAID".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!("pending".parse::<PaymentStatus>().is_err());
        assert!("".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_status_display_is_canonical() {
        assert_eq!(PaymentStatus::Paid.to_string(), "Paid");
        assert_eq!(PaymentStatus::Unpaid.as_str(), "Unpaid");
    }
}
