//! Agricultural chat assistant.
//!
//! Replies come from a fixed keyword table: the first keyword found in the
//! lowercased message wins, then a few question-word answers, then a
//! default help text. A [`ChatSession`] keeps the transcript for one run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Longest accepted message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

pub const GREETING: &str = "Hello! I'm your AI Agricultural Assistant. I can help you with crop management, pest control, soil health, fertilization, irrigation strategies, and more. What agricultural challenge can I help you with today?";

pub const DEFAULT_REPLY: &str = "I can help you with various agricultural topics including crop management, pest control, soil health, irrigation, fertilization, weather considerations, and organic farming practices. What specific challenge are you facing?";

/// Keyword answers, searched in this order.
const KNOWLEDGE_BASE: [(&str, &str); 8] = [
    (
        "tomato",
        "For tomato cultivation, ensure plants receive 6-8 hours of direct sunlight daily. Water deeply 2-3 times per week. Use stakes or cages for support. Apply balanced fertilizer every 2 weeks. Watch for common diseases like blight and blossom end rot.",
    ),
    (
        "pest",
        "For pest management, use integrated pest management (IPM) approaches: inspect plants regularly, use physical barriers, encourage beneficial insects, apply neem oil for minor infestations, and use organic pesticides as a last resort.",
    ),
    (
        "fertilizer",
        "Fertilizer needs vary by crop stage. Use nitrogen-rich fertilizer during vegetative growth, balanced NPK during flowering, and potassium-rich during fruiting. Conduct soil tests every 2-3 years to optimize nutrient management.",
    ),
    (
        "irrigation",
        "Efficient irrigation: Use drip irrigation to conserve water and reduce disease. Water early morning to reduce evaporation. Monitor soil moisture - most crops need 1-2 inches weekly. Avoid overwatering which can lead to root rot.",
    ),
    (
        "soil",
        "Healthy soil is key to successful farming. Maintain pH between 6.0-7.0 for most crops. Add organic matter like compost regularly. Practice crop rotation to prevent nutrient depletion. Test soil annually for nutrient levels.",
    ),
    (
        "weather",
        "Monitor weather patterns for optimal farming decisions. Use frost protection for sensitive crops. Adjust irrigation based on rainfall. Plant according to last frost dates. Consider climate-appropriate varieties.",
    ),
    (
        "organic",
        "Organic farming focuses on natural methods: use compost and green manure for nutrients, practice crop rotation, use natural pest controls, avoid synthetic pesticides and fertilizers, and maintain biodiversity.",
    ),
    (
        "yield",
        "Maximize yield through proper spacing, adequate nutrition, consistent watering, pest management, pruning techniques, and selecting high-yielding varieties suited to your climate zone.",
    ),
];

const QUESTION_WORDS: [&str; 3] = ["how", "what", "when"];

/// Answers for question-style messages, searched in this order.
const QUESTION_TOPICS: [(&str, &str); 3] = [
    (
        "plant",
        "Planting timing depends on your crop and climate zone. Generally, plant after the last frost date for warm-season crops (tomatoes, peppers, cucumbers) and in early spring or fall for cool-season crops (lettuce, broccoli, peas). Check your USDA hardiness zone for specific timing.",
    ),
    (
        "water",
        "Water requirements vary by crop and growth stage. Most vegetables need 1-2 inches of water per week. Water deeply but less frequently to encourage deep root growth. Check soil moisture 2-3 inches deep - water when soil feels dry. Early morning watering is best.",
    ),
    (
        "harvest",
        "Harvest timing varies by crop. Look for these signs: firm fruits with full color development, vegetables at mature size, easy separation from the plant. Harvest regularly to encourage continued production. Morning harvests often have better quality.",
    ),
];

/// Picks the canned answer for `message`.
///
/// Matching is substring-based on the lowercased text, so "tomatoes" and
/// "pests" hit the singular keywords.
pub fn respond(message: &str) -> &'static str {
    let lower = message.to_lowercase();

    if let Some((keyword, answer)) = KNOWLEDGE_BASE
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
    {
        debug!(keyword = *keyword, "matched knowledge base keyword");
        return *answer;
    }

    if QUESTION_WORDS.iter().any(|word| lower.contains(word)) {
        if let Some((_, answer)) = QUESTION_TOPICS
            .iter()
            .find(|(topic, _)| lower.contains(topic))
        {
            return *answer;
        }
    }

    DEFAULT_REPLY
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Please enter a question or message.")]
    EmptyMessage,

    #[error("Please keep your message under 500 characters.")]
    MessageTooLong { len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Transcript of one conversation. Starts with the assistant's greeting.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        let mut session = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        session.push(Role::Assistant, GREETING.to_string());
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Records `text` and the assistant's reply, returning the reply.
    ///
    /// # Errors
    ///
    /// * [`ChatError::EmptyMessage`] if `text` is blank.
    /// * [`ChatError::MessageTooLong`] if `text` exceeds
    ///   [`MAX_MESSAGE_CHARS`] characters.
    ///
    /// A rejected message leaves the transcript unchanged.
    pub fn send(
        &mut self,
        text: &str,
    ) -> Result<&ChatMessage, ChatError> {
        if text.trim().is_empty() {
            warn!("empty chat message rejected");
            return Err(ChatError::EmptyMessage);
        }

        let len = text.chars().count();
        if len > MAX_MESSAGE_CHARS {
            warn!(len, "oversized chat message rejected");
            return Err(ChatError::MessageTooLong { len });
        }

        self.push(Role::User, text.to_string());
        let reply = respond(text);
        Ok(self.push(Role::Assistant, reply.to_string()))
    }

    /// Drops the conversation and starts over with the greeting.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.push(Role::Assistant, GREETING.to_string());
    }

    fn push(
        &mut self,
        role: Role,
        content: String,
    ) -> &ChatMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            role,
            content,
            timestamp: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
