//! Business logic services for CropGuard

pub mod advisory;
pub mod community;
pub mod diagnosis;
pub mod weather;

pub use advisory::AdvisoryService;
pub use community::{CommunityFilters, CommunityService, PostDraft};
pub use diagnosis::DiagnosisService;
pub use weather::{WeatherLookup, WeatherReport, WeatherService};
