//! OpenAI-compatible HTTP API: chat completions backed by the retrieval
//! service, plus a static model listing.
mod handlers;
mod router;
mod server;
pub mod types;

pub use router::{AppState, build_router};
pub use server::ApiServer;
