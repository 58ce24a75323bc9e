//! Push channel: classification, debouncing and the reconnecting listener.

mod coalesce;
mod message;
mod socket;

pub use coalesce::{COALESCE_WINDOW, Coalescer};
pub use message::{RefreshPlan, classify, classify_value};
pub use socket::{
    Connector, FrameSource, PushError, PushListener, RECONNECT_DELAY, WsConnector, WsSource,
};
