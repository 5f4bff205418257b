// ABOUTME: Scripted text generator for orchestrator and route tests without network access
// ABOUTME: Replays queued replies in order and records every prompt and option set it receives

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use fitplan_server::errors::ProviderError;
use fitplan_server::llm::{GenerationOptions, ProviderCallResult, TextGenerator};
use serde_json::json;

/// Text generator that answers from a fixed script
///
/// Each call pops the next scripted reply. Calling past the end of the
/// script fails with [`ProviderError::InvalidResponse`] so an unexpected
/// extra call shows up as a test failure.
pub struct ScriptedGenerator {
    name: &'static str,
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    calls: Mutex<Vec<(String, GenerationOptions)>>,
}

impl ScriptedGenerator {
    /// Generator replying with `texts` in order
    pub fn replying<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_results(texts.into_iter().map(|t| Ok(t.into())))
    }

    /// Generator replying with arbitrary results in order
    pub fn with_results(results: impl IntoIterator<Item = Result<String, ProviderError>>) -> Self {
        Self {
            name: "scripted",
            replies: Mutex::new(results.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Generator whose every call fails with a vendor error
    pub fn failing(status: u16, message: &str) -> Self {
        Self::with_results([Err(ProviderError::Api {
            provider: "scripted",
            status,
            message: message.to_owned(),
        })])
    }

    /// Rename the generator (shows up in logs and chain names)
    pub const fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Prompts received, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(prompt, _)| prompt.clone())
            .collect()
    }

    /// Options received, in call order
    pub fn options(&self) -> Vec<GenerationOptions> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, options)| options.clone())
            .collect()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn call_text(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<ProviderCallResult, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_owned(), options.clone()));

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(ProviderCallResult {
                raw: json!({ "scripted": text }),
                text,
            }),
            Some(Err(e)) => Err(e),
            None => Err(ProviderError::InvalidResponse {
                provider: "scripted",
                message: "script exhausted".to_owned(),
            }),
        }
    }
}
