//! HTTP request handlers

pub mod chat;
pub mod community;
pub mod diagnosis;
pub mod health;
pub mod session;
pub mod weather;

pub use chat::*;
pub use community::*;
pub use diagnosis::*;
pub use health::*;
pub use session::*;
pub use weather::*;
