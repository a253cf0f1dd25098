//! Campaign ideas: extraction from model output, parsing into typed
//! fields, and conversion into briefs for the ad-generation stage.
//!
//! Model output is free text that loosely follows the numbered layout
//! requested by the campaign prompt. Parsing is deliberately forgiving:
//! every field that cannot be found is left empty.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Marker some models emit before the final answer.
pub const ACTION_INPUT_MARKER: &str = "Action Input:";

/// Name given to ideas whose name could not be parsed.
pub const UNTITLED_CAMPAIGN: &str = "Untitled Campaign";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One campaign idea parsed from the marketing stage output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignIdea {
    pub name: String,
    pub core_message: String,
    pub visual_theme: String,
    pub emotional_appeal: String,
    pub timeline: String,
    pub success_metrics: Vec<String>,
    pub social_media_focus: String,
    pub photography_style: String,
    pub color_palette: String,
    pub key_visual_elements: String,
    pub mood_atmosphere: String,
    pub budget_allocation: String,
    pub engagement_tactics: String,
    pub hashtag_strategy: String,
    pub risk_mitigation: String,
}

/// Angle-specific hints used when composing the image prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSuggestions {
    #[serde(default)]
    pub product_focused: String,
    #[serde(default)]
    pub brand_focused: String,
    #[serde(default)]
    pub visual_focused: String,
    #[serde(default)]
    pub social_media: String,
}

/// A campaign idea prepared as input for asset generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignBrief {
    pub campaign_name: String,
    pub core_message: String,
    pub visual_theme_description: String,
    pub key_emotional_appeal: String,
    #[serde(default)]
    pub success_metrics: Vec<String>,
    #[serde(default)]
    pub prompt_suggestions: PromptSuggestions,
}

impl CampaignIdea {
    /// Build the brief handed to the ad-generation stage.
    pub fn to_brief(&self) -> CampaignBrief {
        CampaignBrief {
            campaign_name: self.name.clone(),
            core_message: self.core_message.clone(),
            visual_theme_description: self.visual_theme.clone(),
            key_emotional_appeal: self.emotional_appeal.clone(),
            success_metrics: self.success_metrics.clone(),
            prompt_suggestions: PromptSuggestions {
                product_focused: String::new(),
                brand_focused: self.core_message.clone(),
                visual_focused: format!(
                    "Color Palette: {}\nPhotography Style: {}\nKey Elements: {}\nMood: {}",
                    self.color_palette,
                    self.photography_style,
                    self.key_visual_elements,
                    self.mood_atmosphere
                ),
                social_media: format!(
                    "Focus: {}\nTactics: {}\nHashtags: {}",
                    self.social_media_focus, self.engagement_tactics, self.hashtag_strategy
                ),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Strip any reasoning preamble that precedes an `Action Input:` marker.
///
/// Returns the trimmed text after the first marker, or the whole content
/// unchanged when there is no marker.
pub fn extract_campaign_ideas(content: &str) -> String {
    match content.split_once(ACTION_INPUT_MARKER) {
        Some((_, ideas)) => ideas.trim().to_string(),
        None => content.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

/// Where a field starts and stops, and the label a numbered start may
/// leave in front of its value.
struct FieldRule {
    start: Regex,
    stop: Option<Regex>,
    label: Regex,
}

impl FieldRule {
    fn new(start: &str, stop: Option<&str>, label: &str) -> Self {
        Self {
            start: re(start),
            stop: stop.map(re),
            label: re(&format!(r"^[\s*_#-]*{}[*_]*:?[\s*_]*", regex::escape(label))),
        }
    }

    /// Text after the first `start` match, up to the first following
    /// `stop` match (or the end of `text`).
    fn raw<'a>(&self, text: &'a str) -> Option<&'a str> {
        let m = self.start.find(text)?;
        let rest = &text[m.end()..];
        let end = self
            .stop
            .as_ref()
            .and_then(|s| s.find(rest))
            .map(|s| s.start())
            .unwrap_or(rest.len());
        Some(&rest[..end])
    }

    /// The captured value without the field's own label or markdown
    /// emphasis. Empty when the field is absent.
    fn value(&self, text: &str) -> String {
        self.raw(text).map(|raw| self.clean(raw)).unwrap_or_default()
    }

    fn clean(&self, raw: &str) -> String {
        self.label
            .replace(raw, "")
            .trim_matches(|c: char| c.is_whitespace() || c == '*' || c == '_')
            .to_string()
    }
}

struct Rules {
    idea_header: Regex,
    name: FieldRule,
    message: FieldRule,
    theme: FieldRule,
    appeal: FieldRule,
    timeline: FieldRule,
    metrics: FieldRule,
    social: FieldRule,
    budget: FieldRule,
    risk: FieldRule,
    color_palette: FieldRule,
    photography: FieldRule,
    visual_elements: FieldRule,
    mood: FieldRule,
    engagement: FieldRule,
    hashtags: FieldRule,
}

static RULES: LazyLock<Rules> = LazyLock::new(|| Rules {
    idea_header: re(r"Campaign Idea \d+:"),
    name: FieldRule::new(r"1\.|Campaign Name:?", Some(r"2\.|Core Message"), "Campaign Name"),
    message: FieldRule::new(r"2\.|Core Message:?", Some(r"3\.|Visual Theme"), "Core Message"),
    theme: FieldRule::new(
        r"3\.|Visual Theme Description:?",
        Some(r"4\.|Key Emotional Appeal"),
        "Visual Theme Description",
    ),
    appeal: FieldRule::new(
        r"4\.|Key Emotional Appeal:?",
        Some(r"5\.|Social Media Focus"),
        "Key Emotional Appeal",
    ),
    timeline: FieldRule::new(
        r"6\.|Campaign Timeline:?",
        Some(r"7\.|Success Metrics"),
        "Campaign Timeline",
    ),
    metrics: FieldRule::new(
        r"7\.|Success Metrics:?",
        Some(r"8\.|Budget Allocation"),
        "Success Metrics",
    ),
    social: FieldRule::new(
        r"Social Media Focus:?",
        Some(r"6\.|Campaign Timeline"),
        "Social Media Focus",
    ),
    budget: FieldRule::new(
        r"Budget Allocation:?",
        Some(r"9\.|Risk Mitigation"),
        "Budget Allocation",
    ),
    risk: FieldRule::new(r"Risk Mitigation:?", None, "Risk Mitigation"),
    color_palette: FieldRule::new(
        r"Color Palette:?",
        Some(r"Photography Style"),
        "Color Palette",
    ),
    photography: FieldRule::new(
        r"Photography Style:?",
        Some(r"Key Visual Elements"),
        "Photography Style",
    ),
    visual_elements: FieldRule::new(
        r"Key Visual Elements:?",
        Some(r"Mood and Atmosphere"),
        "Key Visual Elements",
    ),
    mood: FieldRule::new(r"Mood and Atmosphere:?", None, "Mood and Atmosphere"),
    engagement: FieldRule::new(
        r"Engagement Tactics:?",
        Some(r"Hashtag Strategy"),
        "Engagement Tactics",
    ),
    hashtags: FieldRule::new(r"Hashtag Strategy:?", None, "Hashtag Strategy"),
});

/// Split a metrics blurb into individual metrics.
///
/// Items are separated by commas or line breaks; list bullets are dropped.
fn split_metrics(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(|m| {
            m.trim()
                .trim_start_matches(['-', '*', '•'])
                .trim()
                .to_string()
        })
        .filter(|m| !m.is_empty())
        .collect()
}

fn parse_section(section: &str) -> CampaignIdea {
    let rules = &*RULES;

    let name = {
        let raw = rules.name.value(section);
        let unquoted = raw
            .trim_matches(|c: char| c == '"' || c == '\u{201c}' || c == '\u{201d}')
            .trim()
            .to_string();
        if unquoted.is_empty() {
            UNTITLED_CAMPAIGN.to_string()
        } else {
            unquoted
        }
    };

    let theme_text = rules.theme.raw(section).unwrap_or_default();
    let social_text = rules.social.raw(section).unwrap_or_default();

    CampaignIdea {
        name,
        core_message: rules.message.value(section),
        visual_theme: rules.theme.clean(theme_text),
        emotional_appeal: rules.appeal.value(section),
        timeline: rules.timeline.value(section),
        success_metrics: split_metrics(&rules.metrics.value(section)),
        social_media_focus: rules.social.clean(social_text),
        photography_style: rules.photography.value(theme_text),
        color_palette: rules.color_palette.value(theme_text),
        key_visual_elements: rules.visual_elements.value(theme_text),
        mood_atmosphere: rules.mood.value(theme_text),
        budget_allocation: rules.budget.value(section),
        engagement_tactics: rules.engagement.value(social_text),
        hashtag_strategy: rules.hashtags.value(social_text),
        risk_mitigation: rules.risk.value(section),
    }
}

/// Parse marketing output into campaign ideas.
///
/// Ideas are delimited by `Campaign Idea N:` headers; any text before the
/// first header is treated as preamble and skipped. Output with no
/// headers at all is parsed as a single idea.
pub fn parse_campaign_details(marketing_results: &str) -> Vec<CampaignIdea> {
    let rules = &*RULES;
    let mut sections: Vec<&str> = rules.idea_header.split(marketing_results).collect();

    if rules.idea_header.is_match(marketing_results) && !sections.is_empty() {
        sections.remove(0);
    }

    sections
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_section)
        .collect()
}
