use crate::core::metrics::{self, session_end_time};
use crate::core::{LogFormat, SessionRecord, Snapshot, Tab};

pub const CURRENCY: &str = "₱";

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub rate: f64,
    pub log_format: LogFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            rate: metrics::DEFAULT_RATE,
            log_format: LogFormat::Classic,
        }
    }
}

pub fn render_tab(tab: Tab, snapshot: &Snapshot, options: &RenderOptions) -> String {
    match tab {
        Tab::Home => render_home(&snapshot.sessions, options.rate),
        Tab::Log => render_log(&snapshot.sessions, options.log_format),
        Tab::Tutees => render_tutees(snapshot),
        Tab::Billing => render_billing(&snapshot.sessions, options.rate),
    }
}

pub fn render_home(sessions: &[SessionRecord], rate: f64) -> String {
    let summary = metrics::summarize(sessions, rate);
    format!(
        "Sessions completed: {}\nSessions paid:      {}\nSessions unpaid:    {}\nUnpaid balance:     {}{}\n",
        format_one_decimal(summary.total_completed),
        format_one_decimal(summary.total_paid),
        format_one_decimal(summary.total_unpaid),
        CURRENCY,
        format_money(summary.unpaid_balance)
    )
}

pub fn render_log(sessions: &[SessionRecord], format: LogFormat) -> String {
    let mut out = String::new();
    for session in sessions {
        out.push_str(&log_line(session, format));
        out.push('\n');
    }
    out
}

pub fn log_line(session: &SessionRecord, format: LogFormat) -> String {
    match format {
        LogFormat::Classic => format!(
            "{} {} — {}, {} session(s) [{}]",
            session.date, session.time, session.tutee, session.session_count, session.status
        ),
        LogFormat::Receipt => {
            let end = session_end_time(&session.time, session.session_count)
                .unwrap_or_else(|_| "??:??".to_string());
            format!(
                "{} {}–{} | {} | {} session(s) | {}",
                session.date,
                session.time,
                end,
                session.tutee,
                session.session_count,
                session.status
            )
        }
    }
}

pub fn render_tutees(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for (tutee, topics) in metrics::topics_by_tutee(&snapshot.topics) {
        out.push_str(&format!("{}\n", tutee));
        for topic in topics {
            out.push_str(&format!("  {}: {}\n", topic.date, topic.topic));
        }
    }
    out
}

pub fn render_billing(sessions: &[SessionRecord], rate: f64) -> String {
    let items = metrics::unpaid_line_items(sessions, rate);
    let total: f64 = items.iter().map(|item| item.charge).sum();

    let mut out = format!("Unpaid total: {}{}\n", CURRENCY, format_money(total));
    for item in &items {
        let r = &item.record;
        out.push_str(&format!(
            "{} {} — {}, {} session(s) {}{}\n",
            r.date,
            r.time,
            r.tutee,
            r.session_count,
            CURRENCY,
            format_money(item.charge)
        ));
    }
    out
}

/// 一位小數，0.5 進位 (`0.25` → `0.3`)，不用 `{:.1}` 的銀行家捨入
pub fn format_one_decimal(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// 千分位格式，最多兩位小數，去掉尾端的 0 (`1,137.5`)
pub fn format_money(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PaymentStatus, TopicRecord};

    fn sample() -> Snapshot {
        Snapshot {
            sessions: vec![
                SessionRecord {
                    date: "2024-01-05".to_string(),
                    time: "09:00".to_string(),
                    tutee: "JC".to_string(),
                    session_count: 1.0,
                    status: PaymentStatus::Unpaid,
                },
                SessionRecord {
                    date: "2024-01-06".to_string(),
                    time: "23:30".to_string(),
                    tutee: "Julia".to_string(),
                    session_count: 2.0,
                    status: PaymentStatus::Paid,
                },
            ],
            topics: vec![
                TopicRecord {
                    date: "2024-01-05".to_string(),
                    tutee: "JC".to_string(),
                    topic: "Fractions".to_string(),
                },
                TopicRecord {
                    date: "2024-01-06".to_string(),
                    tutee: "Julia".to_string(),
                    topic: "Essay outline".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0");
        assert_eq!(format_money(650.0), "650");
        assert_eq!(format_money(1300.0), "1,300");
        assert_eq!(format_money(1137.5), "1,137.5");
        assert_eq!(format_money(1234567.891), "1,234,567.89");
    }

    #[test]
    fn test_format_one_decimal_rounds_half_up() {
        assert_eq!(format_one_decimal(0.25), "0.3");
        assert_eq!(format_one_decimal(0.125), "0.1");
        assert_eq!(format_one_decimal(1.75), "1.8");
        assert_eq!(format_one_decimal(3.0), "3.0");
    }

    #[test]
    fn test_home_tab_quarter_sessions() {
        let snapshot = Snapshot {
            sessions: vec![
                SessionRecord {
                    date: "2024-03-01".to_string(),
                    time: "09:00".to_string(),
                    tutee: "JC".to_string(),
                    session_count: 0.25,
                    status: PaymentStatus::Unpaid,
                },
                SessionRecord {
                    date: "2024-03-02".to_string(),
                    time: "09:00".to_string(),
                    tutee: "Julia".to_string(),
                    session_count: 0.125,
                    status: PaymentStatus::Paid,
                },
            ],
            topics: vec![],
        };
        let out = render_home(&snapshot.sessions, 650.0);

        assert!(out.contains("Sessions completed: 0.4"));
        assert!(out.contains("Sessions paid:      0.1"));
        assert!(out.contains("Sessions unpaid:    0.3"));
        assert!(out.contains("Unpaid balance:     ₱162.5"));
    }

    #[test]
    fn test_home_tab() {
        let out = render_tab(Tab::Home, &sample(), &RenderOptions::default());

        assert!(out.contains("Sessions completed: 3.0"));
        assert!(out.contains("Sessions paid:      2.0"));
        assert!(out.contains("Sessions unpaid:    1.0"));
        assert!(out.contains("Unpaid balance:     ₱650"));
    }

    #[test]
    fn test_classic_log_line() {
        let snapshot = sample();
        assert_eq!(
            log_line(&snapshot.sessions[0], LogFormat::Classic),
            "2024-01-05 09:00 — JC, 1 session(s) [Unpaid]"
        );
    }

    #[test]
    fn test_receipt_log_line_wraps_midnight() {
        let snapshot = sample();
        assert_eq!(
            log_line(&snapshot.sessions[1], LogFormat::Receipt),
            "2024-01-06 23:30–02:30 | Julia | 2 session(s) | Paid"
        );
    }

    #[test]
    fn test_receipt_with_bad_time() {
        let mut snapshot = sample();
        snapshot.sessions[0].time = "late".to_string();
        assert!(log_line(&snapshot.sessions[0], LogFormat::Receipt).contains("late–??:??"));
    }

    #[test]
    fn test_tutees_tab() {
        let out = render_tab(Tab::Tutees, &sample(), &RenderOptions::default());
        assert_eq!(out, "JC\n  2024-01-05: Fractions\nJulia\n  2024-01-06: Essay outline\n");
    }

    #[test]
    fn test_billing_tab() {
        let out = render_tab(Tab::Billing, &sample(), &RenderOptions::default());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Unpaid total: ₱650");
        assert_eq!(lines[1], "2024-01-05 09:00 — JC, 1 session(s) ₱650");
    }
}
