use crate::api::RecommenderApi;
use crate::api::types::ChatReply;
use crate::events::{AppEvent, EventSender};
use crate::error::ApiResult;
use crate::models::{ChatMessage, ContentItem};
use std::sync::Arc;

pub const CHAT_ERROR_TEXT: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// Blank input
    Empty,
    /// A previous send is still outstanding
    Busy,
}

/// Recommendations produced by an assistant turn, shown in AI mode.
#[derive(Debug, Clone, Default)]
pub struct AiPicks {
    pub response: String,
    pub items: Vec<ContentItem>,
}

/// Assistant conversation and its panel state.
pub struct ChatSession {
    api: Arc<dyn RecommenderApi>,
    events: EventSender,
    context: serde_json::Value,
    sending: bool,
    generation: u64,

    pub open: bool,
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(api: Arc<dyn RecommenderApi>, events: EventSender) -> Self {
        Self {
            api,
            events,
            context: serde_json::Value::Array(Vec::new()),
            sending: false,
            generation: 0,
            open: false,
            messages: Vec::new(),
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    #[cfg(test)]
    pub fn context(&self) -> &serde_json::Value {
        &self.context
    }

    /// Append the user message and issue one request with the stored context.
    pub fn send(&mut self, text: &str) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Empty;
        }
        if self.sending {
            return SendOutcome::Busy;
        }

        self.messages.push(ChatMessage::user(text));
        self.sending = true;

        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let message = text.to_string();
        let context = self.context.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = api.ai_chat(&message, &context).await;
            let _ = events.send(AppEvent::ChatReplied { generation, result });
        });

        SendOutcome::Sent
    }

    /// Fold a reply into the transcript. Returns the recommendations when the
    /// turn produced any.
    pub fn apply_reply(&mut self, generation: u64, result: ApiResult<ChatReply>) -> Option<AiPicks> {
        if generation != self.generation {
            tracing::debug!("Dropping reply for a cleared conversation");
            return None;
        }
        self.sending = false;

        match result {
            Ok(reply) => {
                tracing::info!(
                    recommendations = reply.recommendations.len(),
                    "Assistant replied"
                );
                self.context = reply
                    .conversation_context
                    .unwrap_or_else(|| serde_json::Value::Array(Vec::new()));
                self.messages.push(ChatMessage::ai(
                    reply.ai_response.clone(),
                    reply.recommendations.clone(),
                    reply.query_analysis,
                ));
                (!reply.recommendations.is_empty()).then(|| AiPicks {
                    response: reply.ai_response,
                    items: reply.recommendations,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, "Error in AI chat");
                self.messages.push(ChatMessage::error(CHAT_ERROR_TEXT));
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.context = serde_json::Value::Array(Vec::new());
        self.generation += 1;
        self.sending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeApi};
    use crate::events::{self, EventReceiver};
    use crate::models::{ChatRole, sample_item};
    use serde_json::json;

    fn session_with(api: Arc<FakeApi>) -> (ChatSession, EventReceiver) {
        let (tx, rx) = events::channel();
        (ChatSession::new(api, tx), rx)
    }

    async fn settle(chat: &mut ChatSession, rx: &mut EventReceiver) -> Option<AiPicks> {
        match rx.recv().await {
            Some(AppEvent::ChatReplied { generation, result }) => chat.apply_reply(generation, result),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_successful_turn_replaces_context() {
        let api = Arc::new(FakeApi::new());
        *api.chat_reply.lock().unwrap() = Some(ChatReply {
            ai_response: "Try these thrillers".to_string(),
            recommendations: vec![sample_item(1, "Drishyam")],
            query_analysis: Some(json!({"detected_genre": "thriller"})),
            conversation_context: Some(json!([{"user": "thrillers", "ai": "Try these thrillers"}])),
        });
        let (mut chat, mut rx) = session_with(api.clone());

        assert_eq!(chat.send("  thrillers  "), SendOutcome::Sent);
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].content, "thrillers");
        assert!(chat.is_sending());

        let picks = settle(&mut chat, &mut rx).await.expect("recommendations");
        assert_eq!(picks.response, "Try these thrillers");
        assert_eq!(picks.items.len(), 1);
        assert!(!chat.is_sending());
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[1].role, ChatRole::Ai);
        assert_eq!(chat.context(), &json!([{"user": "thrillers", "ai": "Try these thrillers"}]));

        assert_eq!(
            api.calls(),
            vec![Call::Chat {
                message: "thrillers".to_string(),
                context: json!([])
            }]
        );
    }

    #[tokio::test]
    async fn test_second_turn_forwards_previous_context() {
        let api = Arc::new(FakeApi::new());
        *api.chat_reply.lock().unwrap() = Some(ChatReply {
            conversation_context: Some(json!(["turn-1"])),
            ..ChatReply::default()
        });
        let (mut chat, mut rx) = session_with(api.clone());

        chat.send("hello");
        assert!(settle(&mut chat, &mut rx).await.is_none());
        chat.send("again");
        settle(&mut chat, &mut rx).await;

        let calls = api.calls();
        assert_eq!(
            calls[1],
            Call::Chat {
                message: "again".to_string(),
                context: json!(["turn-1"])
            }
        );
    }

    #[tokio::test]
    async fn test_failure_appends_error_and_keeps_context() {
        let api = Arc::new(FakeApi::failing());
        let (mut chat, mut rx) = session_with(api);
        chat.context = json!(["kept"]);

        chat.send("anything");
        assert!(settle(&mut chat, &mut rx).await.is_none());
        let last = chat.messages.last().unwrap();
        assert!(last.is_error);
        assert_eq!(last.content, CHAT_ERROR_TEXT);
        assert_eq!(chat.context(), &json!(["kept"]));
        assert!(!chat.is_sending());
    }

    #[tokio::test]
    async fn test_single_send_in_flight() {
        let api = Arc::new(FakeApi::new());
        let (mut chat, mut rx) = session_with(api.clone());

        assert_eq!(chat.send("first"), SendOutcome::Sent);
        assert_eq!(chat.send("second"), SendOutcome::Busy);
        assert_eq!(chat.send("   "), SendOutcome::Empty);
        assert_eq!(chat.messages.len(), 1);

        settle(&mut chat, &mut rx).await;
        assert_eq!(chat.send("second"), SendOutcome::Sent);
    }

    #[tokio::test]
    async fn test_clear_discards_pending_reply() {
        let api = Arc::new(FakeApi::new());
        let (mut chat, mut rx) = session_with(api);

        chat.send("first");
        chat.clear();
        assert!(chat.messages.is_empty());
        assert!(settle(&mut chat, &mut rx).await.is_none());
        assert!(chat.messages.is_empty());
        assert_eq!(chat.context(), &json!([]));
    }

    #[test]
    fn test_toggle() {
        let (tx, _rx) = events::channel();
        let mut chat = ChatSession::new(Arc::new(FakeApi::new()), tx);
        assert!(!chat.open);
        chat.toggle();
        assert!(chat.open);
        chat.toggle();
        assert!(!chat.open);
    }
}
