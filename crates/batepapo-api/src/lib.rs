pub mod clock;
pub mod error;
pub mod identity;
pub mod messages;
pub mod participants;
pub mod presence;
pub mod router;
pub mod sanitize;
pub mod state;
pub mod status;
#[cfg(test)]
mod testing;
pub mod validate;
pub mod visibility;

pub use error::ApiError;
pub use router::router;
pub use state::{AppState, AppStateInner};
