// Adapters layer: concrete implementations for external systems (http, local files, terminal).

pub mod http;
pub mod local;
pub mod prompt;

pub use http::HttpSource;
pub use local::LocalSource;
pub use prompt::TerminalPrompt;

use crate::domain::ports::TextSource;
use crate::utils::error::Result;
use crate::utils::validation::is_remote;

/// 依來源字串選擇 HTTP 或本機目錄
pub fn source_for(source: &str, timeout_seconds: u64) -> Result<Box<dyn TextSource>> {
    if is_remote(source) {
        Ok(Box::new(HttpSource::new(source, timeout_seconds)?))
    } else {
        Ok(Box::new(LocalSource::new(source)))
    }
}
