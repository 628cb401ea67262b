//! Telegram layer: teloxide ↔ core adapters, outbound Bot implementation, polling runner and
//! webhook registration.

mod adapters;
mod bot_adapter;
mod polling;
mod webhook;

pub use adapters::{update_to_core, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{build_teloxide_bot, TelegramBotAdapter};
pub use polling::run_polling;
pub use webhook::{delete_webhook, register_webhook, webhook_endpoint_url, WEBHOOK_PATH};
