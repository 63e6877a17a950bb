pub mod app_config;
pub mod memory;
pub mod senders;

pub use memory::MemoryStore;
pub use senders::{LoggingEmailSender, LoggingMessageSender};
