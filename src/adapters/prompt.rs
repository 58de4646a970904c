use crate::domain::ports::CredentialPrompt;
use std::io::{BufRead, Write};

/// 終端機密碼輸入。命令列已給密碼時只用那一次，不會再回頭問 stdin。
pub enum TerminalPrompt<R: BufRead, W: Write> {
    Preset(Option<String>),
    Interactive { input: R, output: W },
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(preset: Option<String>, input: R, output: W) -> Self {
        match preset {
            Some(password) => TerminalPrompt::Preset(Some(password)),
            None => TerminalPrompt::Interactive { input, output },
        }
    }
}

impl<R: BufRead, W: Write> CredentialPrompt for TerminalPrompt<R, W> {
    fn ask(&mut self, attempt: usize) -> Option<String> {
        match self {
            TerminalPrompt::Preset(preset) => {
                if preset.is_none() {
                    tracing::debug!("Preset password already used, not asking again");
                }
                preset.take()
            }
            TerminalPrompt::Interactive { input, output } => {
                if attempt > 1 {
                    writeln!(output, "Access denied").ok()?;
                }
                write!(output, "Enter parent password: ").ok()?;
                output.flush().ok()?;

                let mut line = String::new();
                match input.read_line(&mut line) {
                    Ok(0) | Err(_) => None,
                    Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gate::{BillingGate, SessionState};
    use crate::core::Tab;
    use crate::utils::error::DashboardError;
    use std::io::Cursor;

    fn preset(password: &str) -> TerminalPrompt<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompt::new(
            Some(password.to_string()),
            Cursor::new(b"parentalaccess\n".to_vec()),
            Vec::new(),
        )
    }

    #[test]
    fn test_preset_is_used_once() {
        let mut prompt = preset("guess");

        assert_eq!(prompt.ask(1), Some("guess".to_string()));
        assert_eq!(prompt.ask(2), None);
        assert_eq!(prompt.ask(3), None);
    }

    #[test]
    fn test_wrong_preset_does_not_fall_back_to_stdin() {
        let gate = BillingGate::new("parentalaccess").with_max_attempts(3);
        let mut state = SessionState::new();
        let mut prompt = preset("guess");

        let result = gate.open_tab(&mut state, Tab::Billing, &mut prompt);

        assert!(matches!(result, Err(DashboardError::GateMismatch)));
        assert!(!state.billing_unlocked);
        match prompt {
            TerminalPrompt::Interactive { .. } => panic!("preset prompt turned interactive"),
            TerminalPrompt::Preset(rest) => assert!(rest.is_none()),
        }
    }

    #[test]
    fn test_interactive_retries_until_match() {
        let gate = BillingGate::new("parentalaccess").with_max_attempts(3);
        let mut state = SessionState::new();
        let mut prompt = TerminalPrompt::new(
            None,
            Cursor::new(b"guess\r\nparentalaccess\n".to_vec()),
            Vec::new(),
        );

        let tab = gate.open_tab(&mut state, Tab::Billing, &mut prompt).unwrap();

        assert_eq!(tab, Tab::Billing);
        assert!(state.billing_unlocked);
        let TerminalPrompt::Interactive { output, .. } = prompt else {
            panic!("expected interactive prompt");
        };
        let shown = String::from_utf8(output).unwrap();
        assert_eq!(
            shown,
            "Enter parent password: Access denied\nEnter parent password: "
        );
    }

    #[test]
    fn test_interactive_end_of_input_cancels() {
        let mut prompt = TerminalPrompt::new(None, Cursor::new(Vec::new()), Vec::new());
        assert_eq!(prompt.ask(1), None);
    }
}
