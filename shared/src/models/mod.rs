//! Domain models for CropGuard

mod advisory;
mod analysis;
mod chat;
mod community;
mod pest_risk;
mod weather;

pub use advisory::*;
pub use analysis::*;
pub use chat::*;
pub use community::*;
pub use pest_risk::*;
pub use weather::*;
