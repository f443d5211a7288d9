//! A [`ChatModel`] that replays canned replies and records what it was asked.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{AiError, ChatModel, ChatRequest};

enum Reply {
    Content(String),
    Failure { status: u16, body: String },
}

/// Replays replies in order. Once the script is exhausted every call fails
/// with [`AiError::EmptyResponse`].
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModel {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| Reply::Content(r.into()))
                    .collect(),
            ),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A model whose next call fails as if the endpoint returned `status`.
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        let model = Self::default();
        model.push_failure(status, body);
        model
    }

    pub fn push_reply(&self, content: impl Into<String>) {
        self.lock_replies().push_back(Reply::Content(content.into()));
    }

    pub fn push_failure(&self, status: u16, body: impl Into<String>) {
        self.lock_replies().push_back(Reply::Failure {
            status,
            body: body.into(),
        });
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn calls(&self) -> usize {
        self.requests().len()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Reply>> {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete_json(&self, request: &ChatRequest) -> Result<String, AiError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());
        match self.lock_replies().pop_front() {
            Some(Reply::Content(content)) => Ok(content),
            Some(Reply::Failure { status, body }) => Err(AiError::Server { status, body }),
            None => Err(AiError::EmptyResponse),
        }
    }
}
