pub mod dashboard;
pub mod gate;
pub mod metrics;
pub mod parser;
pub mod render;

pub use crate::domain::model::{
    PaymentStatus, SessionRecord, Snapshot, Summary, TopicRecord, UnpaidLineItem,
};
pub use crate::domain::options::{LogFormat, MalformedRowPolicy, Tab};
pub use crate::domain::ports::{ConfigProvider, CredentialPrompt, TextSource};
pub use crate::utils::error::Result;
