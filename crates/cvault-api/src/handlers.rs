//! Request handlers.

pub mod auth;
pub mod folders;
pub mod health;
pub mod videos;

pub use auth::*;
pub use folders::*;
pub use health::*;
pub use videos::*;
