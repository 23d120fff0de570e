use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::channels::traits::ChannelMessage;
use crate::dispatch::Dispatcher;

/// How the event loop ended.
pub(super) enum LoopExit {
    Shutdown,
    ListenerClosed,
}

/// Messages are handled one at a time, so a chat's commands apply in delivery order.
pub(super) async fn run_polling_event_loop(
    inbound_rx: &mut mpsc::Receiver<ChannelMessage>,
    dispatcher: &Dispatcher,
    shutdown: &CancellationToken,
) -> LoopExit {
    loop {
        tokio::select! {
            biased;
            () = shutdown.cancelled() => {
                tracing::info!("Shutting down...");
                return LoopExit::Shutdown;
            }
            maybe_msg = inbound_rx.recv() => {
                let Some(msg) = maybe_msg else {
                    return LoopExit::ListenerClosed;
                };
                dispatcher.handle_message(&msg).await;
            }
        }
    }
}
