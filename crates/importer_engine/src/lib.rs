//! Importer engine: gateway IO, poller driving and catalog browsing.
mod catalog;
mod engine;
mod gateway;
mod http;
mod poller;
mod submit;
mod types;
mod wire;

pub use catalog::{BrowseError, CatalogBrowser};
pub use engine::EngineHandle;
pub use gateway::{Gateway, GatewaySettings, DEFAULT_API_URL};
pub use http::ReqwestGateway;
pub use poller::{spawn_poller, ChannelEventSink, EventSink, PollerHandle};
pub use submit::ImportSubmitter;
pub use types::{EngineError, EngineEvent, GatewayError, GatewayFailure};
