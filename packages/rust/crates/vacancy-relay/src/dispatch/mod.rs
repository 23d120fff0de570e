//! Inbound message routing: chat id to lazily created worker, command to reply.

mod dispatcher;
pub mod replies;

pub use dispatcher::{Dispatcher, RelayServices};
