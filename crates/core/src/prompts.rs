//! Prompt templates for every agent stage and the renderer that fills
//! them in.
//!
//! Templates use `{placeholder}` tokens. Rendering substitutes all tokens
//! in a single pass, so values that themselves contain braces are never
//! re-expanded.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::chat::ChatMessage;
use crate::error::CoreError;

/// Regex pattern matching `{placeholder}` tokens in prompt templates.
pub const PLACEHOLDER_PATTERN: &str = r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}";

/// Compiled regex for `{placeholder}` extraction. Compiled once, reused forever.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// PromptTemplate
// ---------------------------------------------------------------------------

/// A system + user message pair with `{placeholder}` tokens.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    /// Stable name used in logs and error messages.
    pub name: &'static str,
    pub system: &'static str,
    pub user: &'static str,
}

impl PromptTemplate {
    /// Placeholder names used by this template, sorted and de-duplicated.
    pub fn placeholders(&self) -> Vec<String> {
        let mut names = extract_placeholders(self.system);
        names.extend(extract_placeholders(self.user));
        names.sort();
        names.dedup();
        names
    }

    /// Render the template into a `[system, user]` message pair.
    ///
    /// Fails with [`CoreError::Validation`] listing every placeholder that
    /// has no value in `vars`. Extra entries in `vars` are ignored.
    pub fn render(&self, vars: &[(&str, &str)]) -> Result<Vec<ChatMessage>, CoreError> {
        let lookup: HashMap<&str, &str> = vars.iter().copied().collect();

        let missing: Vec<String> = self
            .placeholders()
            .into_iter()
            .filter(|name| !lookup.contains_key(name.as_str()))
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Prompt '{}' is missing values for: {}",
                self.name,
                missing.join(", ")
            )));
        }

        Ok(vec![
            ChatMessage::system(substitute(self.system, &lookup)),
            ChatMessage::user(substitute(self.user, &lookup)),
        ])
    }
}

/// Extract all `{placeholder}` names from a template string.
///
/// Returns a de-duplicated, sorted list of placeholder names (without braces).
pub fn extract_placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = PLACEHOLDER_RE
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}

fn substitute(template: &str, lookup: &HashMap<&str, &str>) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &regex::Captures<'_>| {
            lookup
                .get(&caps[1])
                .map(|v| (*v).to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

// ---------------------------------------------------------------------------
// Research
// ---------------------------------------------------------------------------

pub const QUESTION_GENERATION: PromptTemplate = PromptTemplate {
    name: "question_generation",
    system: "You are a senior market research analyst. Before any research begins you \
decide which questions matter most for understanding a company and how it can reach \
a specific audience.",
    user: "Company: {company_name}
Target Audience: {target_audience}

Write 5 to 7 focused research questions covering the company's products and \
positioning, its competitors, the audience's needs and habits, and the channels \
where that audience can be reached. Return them as a numbered list.",
};

pub const RESEARCH_RETRIEVAL: PromptTemplate = PromptTemplate {
    name: "research_retrieval",
    system: "You are a diligent research assistant. Gather concrete, factual information \
about a company and its market. Prefer the supplied web search results; when they are \
silent, say what is commonly known and mark uncertain statements as such.",
    user: "Research the following: {input}

Web search results:
{search_context}

Report what the company does, its products or services, brand personality and values, \
competitors, and what is known about the target audience. Write plain prose findings.",
};

pub const DATA_ANALYSIS: PromptTemplate = PromptTemplate {
    name: "data_analysis",
    system: "You are a strategic analyst who turns raw research into insight for a \
marketing team.",
    user: "Analyze the collected research data below.

{collected_data}

Summarize the brand values, key differentiators, audience motivations and pain points, \
and the opportunities a marketing campaign should exploit.",
};

// ---------------------------------------------------------------------------
// Marketing
// ---------------------------------------------------------------------------

pub const CAMPAIGN_GENERATION: PromptTemplate = PromptTemplate {
    name: "campaign_generation",
    system: "You are a creative marketing director tasked with generating innovative advertising campaign ideas. 
You will be provided with company information, the target audience, and brand values. Use this information to generate 5 distinct campaign ideas.

Company Information:
{company_summary}

Target Audience:
{target_audience}

Brand Values:
{brand_values}

For each campaign idea, provide:
1. Campaign Name: A memorable and distinctive title that captures the essence of the campaign.
2. Core Message: The primary value proposition or key takeaway for the audience.
3. Visual Theme Description: A detailed description of the campaign's visual style, including color palette suggestions, photography/illustration style, key visual elements, mood, and atmosphere.
4. Key Emotional Appeal: The primary emotional response the campaign aims to evoke, including the primary emotion, supporting psychological triggers, and desired audience reaction.
5. Social Media Focus: A platform-specific strategy, including primary platforms (e.g., Instagram, LinkedIn, TikTok), content format recommendations, engagement tactics, and hashtag strategy.
6. Campaign Timeline: A suggested campaign duration and key phases.
7. Success Metrics: Specific KPIs and measurement criteria.
8. Budget Allocation: Recommended distribution across channels.
9. Risk Mitigation: Potential challenges and mitigation strategies.

Each campaign should:
- Resonate with the target audience.
- Maintain brand consistency.
- Have a unique angle and visual style.
- Align with the brand values and target audience preferences.

Consider these aspects for each campaign:
- Cultural relevance and sensitivity.
- Cross-platform integration possibilities.
- Viral potential and shareability.
- Long-term brand building potential.
- Measurable business impact.

Format each campaign as a structured output with clear sections and detailed subsections. \
Start each campaign with a heading of the form \"Campaign Idea N:\".",
    user: "Generate 5 campaign ideas based on the company information, target audience, and brand values provided.",
};

// ---------------------------------------------------------------------------
// Ad generation
// ---------------------------------------------------------------------------

pub const STRATEGY_ANALYSIS: PromptTemplate = PromptTemplate {
    name: "strategy_analysis",
    system: "You are an expert advertising strategist. Analyze the provided brand information, target audience, and campaign goals to develop a comprehensive strategy analysis.",
    user: "Please analyze the following campaign elements:
    Brand Information: {brand_info}
    Target Audience: {target_audience}
    Campaign Goals: {campaign_goals}

    Provide a strategic analysis that will guide creative direction.",
};

pub const CREATIVE_DIRECTION: PromptTemplate = PromptTemplate {
    name: "creative_direction",
    system: "You are a creative director specializing in advertising campaigns. Generate creative direction based on the strategy analysis.",
    user: "Based on the following strategy analysis:
    {strategy_analysis}

    Generate creative direction including visual themes, messaging tone, and key elements to incorporate.",
};

pub const TAGLINE_GENERATION: PromptTemplate = PromptTemplate {
    name: "tagline_generation",
    system: "You are a copywriter specializing in creating impactful advertising taglines.",
    user: "Create a tagline based on:
    Core Message: {core_message}
    Visual Theme: {visual_theme}
    Emotional Appeal: {emotional_appeal}

    Generate a memorable and impactful tagline.",
};

pub const STORY_GENERATION: PromptTemplate = PromptTemplate {
    name: "story_generation",
    system: "You are a narrative expert specializing in brand storytelling.",
    user: "Create a compelling story based on:
    Core Message: {core_message}
    Visual Theme: {visual_theme}
    Emotional Appeal: {emotional_appeal}

    Generate an engaging narrative that resonates with the target audience.",
};

pub const IMAGE_PROMPT_GENERATION: PromptTemplate = PromptTemplate {
    name: "image_prompt_generation",
    system: "You are an art director specializing in visual advertising concepts. Create concise, impactful image prompts that capture the essence of advertising campaigns while staying under 2000 characters. Focus on key visual elements and keep descriptions clear and specific.",
    user: "Generate a focused image prompt based on:
    Core Message: {summary_prompt}

    Additional Context:
    - Product Details: {product_prompt}
    - Brand Elements: {brand_prompt}
    - Social Context: {social_prompt}

    Create a concise prompt (under 2000 characters) that emphasizes the core message while incorporating key visual elements. Focus on the most impactful aspects that will create compelling advertising imagery.",
};

pub const QUALITY_CHECK: PromptTemplate = PromptTemplate {
    name: "quality_check",
    system: "You are a quality assurance specialist for advertising campaigns.",
    user: "Review the following campaign assets:
    Tagline: {tagline}
    Story: {story}
    Image Prompt: {image_prompt}

    Evaluate the assets for consistency, impact, and alignment with campaign goals.",
};

/// Every template shipped with the application.
pub const ALL_TEMPLATES: [PromptTemplate; 10] = [
    QUESTION_GENERATION,
    RESEARCH_RETRIEVAL,
    DATA_ANALYSIS,
    CAMPAIGN_GENERATION,
    STRATEGY_ANALYSIS,
    CREATIVE_DIRECTION,
    TAGLINE_GENERATION,
    STORY_GENERATION,
    IMAGE_PROMPT_GENERATION,
    QUALITY_CHECK,
];
