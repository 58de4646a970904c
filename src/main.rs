use clap::Parser;
use std::io::Write;
use tutor_dashboard::utils::error::ErrorSeverity;
use tutor_dashboard::utils::logger;
use tutor_dashboard::{
    source_for, CliConfig, Dashboard, DashboardError, SessionState, TerminalPrompt,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Dashboard failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<(), DashboardError> {
    let settings = cli.resolve()?;
    tracing::info!("✅ Configuration loaded and validated");

    let source = source_for(&settings.source, settings.timeout_seconds)?;
    let dashboard = Dashboard::new(source, settings);
    let snapshot = dashboard.refresh().await?;

    let mut state = SessionState::new();
    // 有 --password 就只試那一次，沒有才互動詢問
    let mut prompt = TerminalPrompt::new(
        cli.password.clone(),
        std::io::stdin().lock(),
        std::io::stderr(),
    );
    let mut stdout = std::io::stdout().lock();

    if cli.json {
        if cli.tabs().iter().any(|tab| tab.is_gated()) {
            dashboard.gate().open_tab(
                &mut state,
                tutor_dashboard::core::Tab::Billing,
                &mut prompt,
            )?;
        }
        let report = dashboard.report(&state, snapshot);
        writeln!(stdout, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    let tabs = cli.tabs();
    for (i, tab) in tabs.iter().enumerate() {
        if tabs.len() > 1 {
            if i > 0 {
                writeln!(stdout)?;
            }
            writeln!(stdout, "== {} ==", tab)?;
        }
        let text = dashboard.show(&mut state, *tab, &snapshot, &mut prompt)?;
        write!(stdout, "{}", text)?;
    }

    Ok(())
}
