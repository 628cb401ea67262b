//! Long-polling transport: a teloxide dispatcher feeding text messages into the handler chain.
//! Starting the dispatcher removes any registered webhook on the platform side.

use crate::chain::HandlerChain;
use crate::core::ToCoreMessage;
use teloxide::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

async fn on_message(msg: teloxide::types::Message, chain: HandlerChain) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    match msg.text() {
        Some(_) => {
            debug!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                "Polled update accepted"
            );
            chain.spawn_handle(core_msg);
        }
        None => {
            debug!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                "Ignoring non-text message"
            );
        }
    }
    Ok(())
}

enum PollingExit {
    Finished,
    Cancelled,
}

/// Runs the polling loop until `shutdown` is cancelled or the dispatcher stops on its own.
/// Message handling is spawned, so a slow completion never blocks the next getUpdates.
#[instrument(skip_all)]
pub async fn run_polling(bot: teloxide::Bot, chain: HandlerChain, shutdown: CancellationToken) {
    let handler = Update::filter_message().endpoint(on_message);
    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![chain])
        .default_handler(|_update| async {
            debug!("Ignoring non-message update");
        })
        .build();
    let token = dispatcher.shutdown_token();

    info!("Polling started");
    let dispatch = dispatcher.dispatch();
    tokio::pin!(dispatch);

    let exit = tokio::select! {
        _ = &mut dispatch => PollingExit::Finished,
        _ = shutdown.cancelled() => PollingExit::Cancelled,
    };

    match exit {
        PollingExit::Finished => warn!("Polling dispatcher exited"),
        PollingExit::Cancelled => {
            match token.shutdown() {
                Ok(stopped) => {
                    tokio::join!(dispatch, stopped);
                }
                // Not started yet; dropping the future is enough.
                Err(_) => {}
            }
            info!("Polling stopped");
        }
    }
}
