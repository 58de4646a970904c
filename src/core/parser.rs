use crate::core::{MalformedRowPolicy, PaymentStatus, SessionRecord, TopicRecord};
use crate::utils::error::{DashboardError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

const SESSION_COLUMNS: usize = 5;
const TOPIC_COLUMNS: usize = 3;

/// 解析 sessions.csv：`date,time,tutee,sessions,status`
///
/// `None` 或空內容代表抓取失敗，直接回傳空清單。第一行是標題列，一律略過。
pub fn parse_sessions(
    content: Option<&str>,
    policy: MalformedRowPolicy,
) -> Result<Vec<SessionRecord>> {
    parse_rows(content, policy, "sessions", |row| session_from_row(row, policy))
}

/// 解析 topics.csv：`date,tutee,topic`
pub fn parse_topics(content: Option<&str>, policy: MalformedRowPolicy) -> Result<Vec<TopicRecord>> {
    parse_rows(content, policy, "topics", topic_from_row)
}

fn parse_rows<T, F>(
    content: Option<&str>,
    policy: MalformedRowPolicy,
    kind: &str,
    mut map_row: F,
) -> Result<Vec<T>>
where
    F: FnMut(&StringRecord) -> std::result::Result<T, String>,
{
    let content = match content {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            tracing::debug!("No {} content, using empty list", kind);
            return Ok(Vec::new());
        }
    };

    // 標準 CSV 引號規則：引號內的逗號不會切欄位
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = row?;
        if row.iter().all(|field| field.is_empty()) {
            continue;
        }

        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let mapped = match spans_lines(&row) {
            Some(end) => Err(format!(
                "unterminated quoted field runs past end of line (through line {})",
                end
            )),
            None => map_row(&row),
        };
        match mapped {
            Ok(record) => records.push(record),
            Err(reason) => match policy {
                MalformedRowPolicy::Reject => {
                    return Err(DashboardError::MalformedRow { line, reason });
                }
                MalformedRowPolicy::Skip | MalformedRowPolicy::Zero => {
                    tracing::warn!("Skipping {} line {}: {}", kind, line, reason);
                    skipped += 1;
                }
            },
        }
    }

    tracing::debug!("Parsed {} {} rows ({} skipped)", records.len(), kind, skipped);
    Ok(records)
}

/// 引號沒關好的欄位會把後面幾行吞進來；回傳被吞到的最後一行
fn spans_lines(row: &StringRecord) -> Option<u64> {
    let start = row.position().map(|p| p.line()).unwrap_or(0);
    let extra = row
        .iter()
        .map(|field| field.replace("\r\n", "\n").matches(['\n', '\r']).count())
        .sum::<usize>();
    (extra > 0).then(|| start + extra as u64)
}

fn session_from_row(
    row: &StringRecord,
    policy: MalformedRowPolicy,
) -> std::result::Result<SessionRecord, String> {
    if row.len() < SESSION_COLUMNS {
        return Err(format!(
            "expected {} columns, found {}",
            SESSION_COLUMNS,
            row.len()
        ));
    }

    let raw_count = &row[3];
    let session_count = match parse_count(raw_count) {
        Some(count) => count,
        None if policy == MalformedRowPolicy::Zero => {
            tracing::warn!("Session count '{}' is not valid, counting it as 0", raw_count);
            0.0
        }
        None => return Err(format!("invalid session count '{}'", raw_count)),
    };

    let status: PaymentStatus = row[4].parse()?;

    Ok(SessionRecord {
        date: row[0].to_string(),
        time: row[1].to_string(),
        tutee: row[2].to_string(),
        session_count,
        status,
    })
}

fn topic_from_row(row: &StringRecord) -> std::result::Result<TopicRecord, String> {
    if row.len() < TOPIC_COLUMNS {
        return Err(format!(
            "expected {} columns, found {}",
            TOPIC_COLUMNS,
            row.len()
        ));
    }

    Ok(TopicRecord {
        date: row[0].to_string(),
        tutee: row[1].to_string(),
        topic: row[2].to_string(),
    })
}

fn parse_count(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|count| count.is_finite() && *count >= 0.0)
}
