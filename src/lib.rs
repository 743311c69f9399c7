// LocalSend Settings
// Typed settings core over a persistent key-value store

mod models;
mod services;

pub use models::*;
pub use services::*;
