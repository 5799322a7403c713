//! Advisory chat
//!
//! Answers farmer questions with the language model when it is reachable and
//! with canned keyword replies otherwise.

use shared::{offline_fallback, AppSession, ChatMessage};

use crate::config::LlmConfig;
use crate::error::AppResult;
use crate::external::{ChatContext, LlmClient};
use crate::sessions::SessionHandle;

#[derive(Clone)]
pub struct AdvisoryService {
    llm: Option<LlmClient>,
}

impl AdvisoryService {
    pub fn new(config: &LlmConfig) -> AppResult<Self> {
        let llm = if config.is_configured() {
            Some(LlmClient::new(config)?)
        } else {
            tracing::warn!("No LLM API key configured, chat will use offline replies");
            None
        };
        Ok(Self { llm })
    }

    /// Service that always answers from the offline replies
    pub fn offline() -> Self {
        Self { llm: None }
    }

    /// Record the question, produce a reply and record it too.
    ///
    /// The reply is produced on its own task so the assistant turn is recorded
    /// even when the caller stops waiting. Returns the assistant message.
    pub async fn ask(&self, session: &SessionHandle, question: &str) -> ChatMessage {
        let (context, offline) = {
            let mut session = session.lock().await;
            session.add_chat_message(ChatMessage::user(question));
            (chat_context(&session, question), session.is_offline())
        };

        let llm = self.llm.clone().filter(|_| !offline);
        let handle = session.clone();
        let task = tokio::spawn(async move {
            let answer = ChatMessage::assistant(reply(llm.as_ref(), &context).await);
            handle.lock().await.add_chat_message(answer.clone());
            answer
        });

        match task.await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!("Chat task aborted: {}", e);
                let answer = ChatMessage::assistant(offline_fallback(question));
                session.lock().await.add_chat_message(answer.clone());
                answer
            }
        }
    }
}

async fn reply(llm: Option<&LlmClient>, context: &ChatContext) -> String {
    let Some(llm) = llm else {
        return offline_fallback(&context.message).to_string();
    };

    match llm.chat(context).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("Chat request failed, using offline reply: {}", e);
            offline_fallback(&context.message).to_string()
        }
    }
}

/// Disease, location and recommendations from the current diagnosis
fn chat_context(session: &AppSession, question: &str) -> ChatContext {
    let results = session.results();
    ChatContext {
        message: question.to_string(),
        disease: results.map(|r| r.disease.clone()),
        location: Some(session.user_location().to_string()),
        recommendations: results.map(|r| r.recommendations()),
    }
}
