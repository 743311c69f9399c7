// LocalSend Settings Models
// Value types crossing the settings boundary

mod locale;
mod security_context;
mod theme;
mod transfer;
mod window;

pub use locale::*;
pub use security_context::*;
pub use theme::*;
pub use transfer::*;
pub use window::*;
