//! API request handlers.

pub mod documents;
pub mod events;
pub mod users;

pub use documents::*;
pub use events::*;
pub use users::*;
