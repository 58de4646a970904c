use crate::core::gate::{BillingGate, SessionState};
use crate::core::metrics;
use crate::core::parser::{parse_sessions, parse_topics};
use crate::core::render::{render_tab, RenderOptions};
use crate::core::{
    ConfigProvider, CredentialPrompt, Snapshot, Summary, Tab, TextSource, UnpaidLineItem,
};
use crate::utils::error::Result;
use serde::Serialize;

/// JSON 輸出用的整份報表
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub summary: Summary,
    pub snapshot: Snapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unpaid_line_items: Option<Vec<UnpaidLineItem>>,
}

pub struct Dashboard<S: TextSource, C: ConfigProvider> {
    source: S,
    config: C,
}

impl<S: TextSource, C: ConfigProvider> Dashboard<S, C> {
    pub fn new(source: S, config: C) -> Self {
        Self { source, config }
    }

    pub fn gate(&self) -> BillingGate {
        BillingGate::new(self.config.password()).with_max_attempts(self.config.max_attempts())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            rate: self.config.rate(),
            log_format: self.config.log_format(),
        }
    }

    /// 重新抓取兩個 CSV 並整份重建。抓取失敗只記錄日誌，當作空清單。
    pub async fn refresh(&self) -> Result<Snapshot> {
        tracing::info!("Refreshing dashboard from {}", self.source.describe());

        let (sessions_text, topics_text) = tokio::join!(
            self.fetch_or_none(self.config.sessions_file()),
            self.fetch_or_none(self.config.topics_file()),
        );

        let policy = self.config.on_malformed();
        let sessions = parse_sessions(sessions_text.as_deref(), policy)?;
        let topics = parse_topics(topics_text.as_deref(), policy)?;

        tracing::info!(
            "Loaded {} session rows and {} topic rows",
            sessions.len(),
            topics.len()
        );

        Ok(Snapshot { sessions, topics })
    }

    async fn fetch_or_none(&self, name: &str) -> Option<String> {
        match self.source.fetch_text(name).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::error!("❌ Error fetching {}: {}", name, e);
                None
            }
        }
    }

    /// 切到指定分頁並輸出文字；Billing 會先經過密碼檢查
    pub fn show<P: CredentialPrompt>(
        &self,
        state: &mut SessionState,
        tab: Tab,
        snapshot: &Snapshot,
        prompt: &mut P,
    ) -> Result<String> {
        let tab = self.gate().open_tab(state, tab, prompt)?;
        Ok(render_tab(tab, snapshot, &self.render_options()))
    }

    pub fn report(&self, state: &SessionState, snapshot: Snapshot) -> DashboardReport {
        let rate = self.config.rate();
        let unpaid_line_items = state
            .billing_unlocked
            .then(|| metrics::unpaid_line_items(&snapshot.sessions, rate));

        DashboardReport {
            summary: metrics::summarize(&snapshot.sessions, rate),
            snapshot,
            unpaid_line_items,
        }
    }
}
