// LocalSend Settings Services
// Backend, facade, and injected collaborators

mod alias;
mod identity;
mod kv_store;
mod locale;
mod platform;
mod settings_store;

pub use alias::*;
pub use identity::*;
pub use kv_store::*;
pub use locale::*;
pub use platform::*;
pub use settings_store::*;
