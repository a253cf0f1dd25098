//! Scripted stand-ins for the external services.

use std::sync::Mutex;

use advocate_core::chat::{ChatMessage, ChatRole};
use advocate_genai::{
    ChatModel, GenAiError, GeneratedImage, ImageGenerator, SearchHit, WebSearch,
};
use async_trait::async_trait;

/// A marketing reply holding two well-formed campaign ideas.
pub const TWO_IDEAS: &str = "Thought: I know the brand well.
Action Input:
Campaign Idea 1:
1. Campaign Name: \"Green Pulse\"
2. Core Message: Sustainable energy for every home.
3. Visual Theme Description: Bright greens and sunlit rooftops.
Color Palette: greens and golds
Photography Style: natural light
Key Visual Elements: solar panels
Mood and Atmosphere: hopeful
4. Key Emotional Appeal: Pride in a cleaner future.
5. Social Media Focus: Instagram reels.
Engagement Tactics: challenges
Hashtag Strategy: #GreenPulse
6. Campaign Timeline: 8 weeks.
7. Success Metrics: reach, sign-ups
8. Budget Allocation: 60% social
9. Risk Mitigation: verify claims.

Campaign Idea 2:
1. Campaign Name: Night Shift
2. Core Message: Power that never sleeps.
3. Visual Theme Description: Deep blues and city lights.
4. Key Emotional Appeal: Reassurance.
5. Social Media Focus: TikTok.
6. Campaign Timeline: 4 weeks.
7. Success Metrics: views
8. Budget Allocation: 100% video
9. Risk Mitigation: none.
";

/// Replies keyed on a fragment of the system prompt.
///
/// The first rule whose needle appears in the system message wins; any
/// other prompt is answered with `"ok"`. Every call is recorded.
pub struct ScriptedChat {
    rules: Vec<(&'static str, String)>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedChat {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(mut self, needle: &'static str, reply: impl Into<String>) -> Self {
        self.rules.push((needle, reply.into()));
        self
    }

    /// Replies that drive the whole pipeline end to end.
    pub fn full_pipeline() -> Self {
        Self::new()
            .reply("market research analyst", "1. Who buys solar?")
            .reply("research assistant", "Solara sells rooftop solar kits.")
            .reply("strategic analyst", "Values: sustainability and trust.")
            .reply("creative marketing director", TWO_IDEAS)
            .reply("advertising strategist", "Lead with savings.")
            .reply("creative director", "Warm, optimistic tone.")
            .reply("impactful advertising taglines", "Power your tomorrow.")
            .reply("brand storytelling", "A family installs panels.")
            .reply("art director", "Sunlit rooftop with solar panels.")
            .reply("quality assurance", "All assets are consistent.")
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose system prompt contains `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.calls()
            .iter()
            .filter(|messages| system_text(messages).contains(needle))
            .count()
    }
}

fn system_text(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .filter(|m| m.role == ChatRole::System)
        .map(|m| m.content.as_str())
        .collect()
}

#[async_trait]
impl ChatModel for ScriptedChat {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GenAiError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        let system = system_text(messages);
        let reply = self
            .rules
            .iter()
            .find(|(needle, _)| system.contains(needle))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| "ok".to_string());
        Ok(reply)
    }
}

/// Returns a fixed tiny "image" and records every prompt.
#[derive(Default)]
pub struct FakeImages {
    pub prompts: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl ImageGenerator for FakeImages {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, GenAiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(GenAiError::Api {
                status: 500,
                body: "boom".into(),
            });
        }
        Ok(GeneratedImage {
            bytes: b"not really a png".to_vec(),
            extension: "png",
            width: 1,
            height: 1,
        })
    }
}

/// Web search that returns canned hits or fails.
pub struct FakeSearch {
    pub hits: Vec<SearchHit>,
    pub fail: bool,
    pub queries: Mutex<Vec<String>>,
}

impl FakeSearch {
    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            fail: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            hits: Vec::new(),
            fail: true,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl WebSearch for FakeSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, GenAiError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(GenAiError::InvalidResponse("search unavailable".into()));
        }
        Ok(self.hits.clone())
    }
}
