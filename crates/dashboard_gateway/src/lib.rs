//! Dashboard gateway: HTTP access to the knowledge backend and the worker
//! thread that executes requests for the UI.
mod engine;
mod filename;
mod gateway;
mod identity;
mod persist;
mod settings;
mod types;
mod wire;

pub use engine::GatewayHandle;
pub use filename::local_filename;
pub use gateway::{Gateway, ReqwestGateway};
pub use identity::{article_id, identify};
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use settings::{GatewaySettings, DEFAULT_BASE_URL};
pub use types::{FailureKind, GatewayError, GatewayEvent, NewsQuery, Request, StockPurpose};
