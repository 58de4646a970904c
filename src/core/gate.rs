use crate::core::{CredentialPrompt, Tab};
use crate::utils::error::{DashboardError, Result};

/// 使用者這次執行期間的狀態，預設為鎖定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub billing_unlocked: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Password gate in front of the billing tab.
#[derive(Debug, Clone)]
pub struct BillingGate {
    secret: String,
    max_attempts: usize,
}

impl BillingGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            max_attempts: 1,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn check_credential(&self, state: &mut SessionState, input: &str) -> Result<()> {
        if input == self.secret {
            state.billing_unlocked = true;
            tracing::info!("🔓 Billing unlocked for this session");
            Ok(())
        } else {
            tracing::warn!("Billing password mismatch");
            Err(DashboardError::GateMismatch)
        }
    }

    /// 切換分頁；只有 Billing 需要密碼，解鎖後同一個 session 不再詢問
    pub fn open_tab<P: CredentialPrompt>(
        &self,
        state: &mut SessionState,
        tab: Tab,
        prompt: &mut P,
    ) -> Result<Tab> {
        if !tab.is_gated() || state.billing_unlocked {
            return Ok(tab);
        }

        for attempt in 1..=self.max_attempts {
            let Some(input) = prompt.ask(attempt) else {
                tracing::debug!("Credential prompt cancelled on attempt {}", attempt);
                break;
            };
            if self.check_credential(state, &input).is_ok() {
                return Ok(tab);
            }
        }

        Err(DashboardError::GateMismatch)
    }
}
