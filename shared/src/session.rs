//! Per-session application state
//!
//! Everything a single user session sees lives in one [`AppSession`]: the
//! images waiting for analysis, the current diagnosis and its history, the
//! chat transcript, the active role and the community board. Mutation goes
//! through the action methods below, one at a time.

use thiserror::Error;

use crate::models::{
    AnalysisResult, ChatMessage, CommunityPost, NewCommunityPost, WeatherSnapshot,
};
use crate::types::UserRole;

/// Location assumed until the user picks one
pub const DEFAULT_LOCATION: &str = "Tamil Nadu";

/// Rejections raised by session actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid expert passcode")]
    InvalidPasscode,

    #[error("Only experts can publish community posts")]
    NotExpert,

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("An analysis is already in progress")]
    AnalysisInProgress,

    #[error("No image to analyze")]
    NoImages,
}

#[derive(Debug, Clone)]
pub struct AppSession {
    images: Vec<String>,
    results: Option<AnalysisResult>,
    analysis_error: Option<String>,
    user_location: String,
    weather: Option<WeatherSnapshot>,
    is_analyzing: bool,
    is_offline: bool,
    chat_messages: Vec<ChatMessage>,
    history: Vec<AnalysisResult>,
    role: UserRole,
    community_posts: Vec<CommunityPost>,
}

impl Default for AppSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AppSession {
    /// Fresh session seeded with the default expert posts
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            results: None,
            analysis_error: None,
            user_location: DEFAULT_LOCATION.to_string(),
            weather: None,
            is_analyzing: false,
            is_offline: false,
            chat_messages: Vec::new(),
            history: Vec::new(),
            role: UserRole::Farmer,
            community_posts: crate::models::seed_posts(),
        }
    }

    // Images

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn set_images(&mut self, images: Vec<String>) {
        self.images = images;
    }

    pub fn clear_images(&mut self) {
        self.images.clear();
    }

    // Analysis results

    pub fn results(&self) -> Option<&AnalysisResult> {
        self.results.as_ref()
    }

    pub fn set_results(&mut self, results: AnalysisResult) {
        self.results = Some(results);
    }

    pub fn clear_results(&mut self) {
        self.results = None;
    }

    pub fn analysis_error(&self) -> Option<&str> {
        self.analysis_error.as_deref()
    }

    pub fn set_analysis_error(&mut self, message: Option<String>) {
        self.analysis_error = message;
    }

    // Location and weather

    pub fn user_location(&self) -> &str {
        &self.user_location
    }

    pub fn set_user_location(&mut self, location: impl Into<String>) {
        self.user_location = location.into();
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn set_weather(&mut self, weather: WeatherSnapshot) {
        self.weather = Some(weather);
    }

    // Flags

    pub fn is_analyzing(&self) -> bool {
        self.is_analyzing
    }

    pub fn set_analyzing(&mut self, is_analyzing: bool) {
        self.is_analyzing = is_analyzing;
    }

    pub fn is_offline(&self) -> bool {
        self.is_offline
    }

    pub fn set_offline(&mut self, is_offline: bool) {
        self.is_offline = is_offline;
    }

    /// Claim the analysis slot and hand back the image to analyze.
    ///
    /// Clears any previous analysis error. Fails without touching state when
    /// there is nothing to analyze or an analysis is already running.
    pub fn begin_analysis(&mut self) -> Result<String, SessionError> {
        if self.is_analyzing {
            return Err(SessionError::AnalysisInProgress);
        }
        let image = self.images.first().cloned().ok_or(SessionError::NoImages)?;

        self.is_analyzing = true;
        self.analysis_error = None;
        Ok(image)
    }

    /// Record a finished analysis: weather, current result and history
    pub fn complete_analysis(&mut self, result: AnalysisResult) {
        self.weather = Some(result.weather.clone());
        self.history.push(result.clone());
        self.results = Some(result);
        self.is_analyzing = false;
    }

    /// Release the analysis slot after a failure
    pub fn fail_analysis(&mut self, message: impl Into<String>) {
        self.analysis_error = Some(message.into());
        self.is_analyzing = false;
    }

    // Chat

    pub fn chat_messages(&self) -> &[ChatMessage] {
        &self.chat_messages
    }

    pub fn add_chat_message(&mut self, message: ChatMessage) {
        self.chat_messages.push(message);
    }

    pub fn clear_chat(&mut self) {
        self.chat_messages.clear();
    }

    // History

    pub fn history(&self) -> &[AnalysisResult] {
        &self.history
    }

    pub fn add_to_history(&mut self, result: AnalysisResult) {
        self.history.push(result);
    }

    // Roles and community

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
    }

    /// Switch role, requiring `expected_passcode` to become an expert.
    ///
    /// Surrounding whitespace in the supplied passcode is ignored. Switching
    /// back to farmer never needs a passcode.
    pub fn switch_role(
        &mut self,
        role: UserRole,
        passcode: Option<&str>,
        expected_passcode: &str,
    ) -> Result<(), SessionError> {
        if role == UserRole::Expert && passcode.map(str::trim) != Some(expected_passcode) {
            return Err(SessionError::InvalidPasscode);
        }
        self.role = role;
        Ok(())
    }

    pub fn community_posts(&self) -> &[CommunityPost] {
        &self.community_posts
    }

    /// Prepend a post so the board stays newest-first
    pub fn add_community_post(&mut self, post: CommunityPost) {
        self.community_posts.insert(0, post);
    }

    /// Publish a draft on behalf of the current user
    pub fn publish_post(&mut self, draft: NewCommunityPost) -> Result<&CommunityPost, SessionError> {
        if self.role != UserRole::Expert {
            return Err(SessionError::NotExpert);
        }
        if draft.title.trim().is_empty() {
            return Err(SessionError::EmptyField("title"));
        }
        if draft.content.trim().is_empty() {
            return Err(SessionError::EmptyField("content"));
        }

        self.add_community_post(CommunityPost::publish(draft));
        Ok(&self.community_posts[0])
    }
}
