use rand::seq::SliceRandom;

use crate::generate::prompt::PromptParams;

/// Static template sets substituted when the external service fails.
fn platform_templates(platform: &str) -> Option<&'static [&'static str]> {
    match platform.to_lowercase().as_str() {
        "instagram" => Some(&[
            "🌟 {topic} is trending! Here's what you need to know... #trending #lifestyle",
            "✨ Discover the magic of {topic}! Share your thoughts below 👇 #discover #share",
            "💫 {topic} inspiration for your day! What's your favorite part? #inspiration #daily",
        ]),
        "facebook" => Some(&[
            "Let's talk about {topic}! What are your thoughts on this? I'd love to hear your perspective in the comments.",
            "Have you tried {topic} yet? Here's my experience and why I think you should give it a shot!",
            "The latest trends in {topic} are fascinating! Here's what caught my attention recently.",
        ]),
        "twitter" => Some(&[
            "Quick thoughts on {topic}: This is game-changing! What do you think? #trending",
            "{topic} update: Here's what everyone should know 🧵 #thread #update",
            "Hot take on {topic}: This could change everything! Thoughts? #hottake",
        ]),
        "linkedin" => Some(&[
            "Professional insights on {topic}: Here's what industry leaders are saying about the latest developments.",
            "Career tip: Understanding {topic} can give you a competitive edge in today's market.",
            "Industry analysis: How {topic} is reshaping the professional landscape.",
        ]),
        _ => None,
    }
}

fn apply_tone(content: String, tone: &str) -> String {
    match tone.to_lowercase().as_str() {
        "professional" => content
            .replace('!', ".")
            .replace('🌟', "")
            .replace('✨', "")
            .replace('💫', "")
            .trim()
            .to_string(),
        "enthusiastic" => format!("{content} 🎉🚀"),
        _ => content,
    }
}

/// Per-variation fallback: templated text for known platforms, otherwise a
/// fixed-format string assembled from the request parameters. Never empty.
pub fn fallback_variation(p: &PromptParams<'_>, index: usize) -> String {
    let base = match platform_templates(p.platform) {
        Some(templates) => {
            let template = templates
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(templates[0]);
            apply_tone(template.replace("{topic}", p.topic), p.tone)
        }
        None => format!(
            "AI-generated {} about '{}' for {}. Keywords: {}. Tone: {}. Style: {}.",
            p.content_type, p.topic, p.platform, p.keywords, p.tone, p.style
        ),
    };
    format!("{base} (Variation {})", index + 1)
}

/// Keyword-derived hashtags used when the generator is unavailable.
pub fn fallback_hashtags(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|k| !k.trim().is_empty())
        .map(|k| format!("#{}", k.replace(' ', "").to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params<'a>(platform: &'a str, tone: &'a str) -> PromptParams<'a> {
        PromptParams {
            topic: "morning coffee",
            keywords: "espresso, ritual",
            content_type: "post",
            platform,
            tone,
            style: "engaging",
        }
    }

    #[test]
    fn known_platform_uses_template_with_topic() {
        let text = fallback_variation(&params("instagram", "casual"), 0);
        assert!(text.contains("morning coffee"));
        assert!(!text.is_empty());
    }

    #[test]
    fn unknown_platform_assembles_from_parameters() {
        let text = fallback_variation(&params("mastodon", "casual"), 2);
        assert!(text.contains("'morning coffee'"));
        assert!(text.contains("mastodon"));
        assert!(text.contains("espresso, ritual"));
        assert!(text.contains("(Variation 3)"));
    }

    #[test]
    fn professional_tone_drops_exclamations() {
        for _ in 0..20 {
            let text = fallback_variation(&params("twitter", "professional"), 0);
            assert!(!text.contains('!'), "unexpected exclamation in {text:?}");
        }
    }

    #[test]
    fn fallback_is_never_empty() {
        for platform in ["instagram", "facebook", "twitter", "linkedin", "unknown"] {
            let text = fallback_variation(&params(platform, "casual"), 0);
            assert!(!text.trim().is_empty());
        }
    }

    #[test]
    fn hashtags_derived_from_keywords() {
        let tags = fallback_hashtags(&["Social Media".into(), "growth".into(), " ".into()]);
        assert_eq!(tags, vec!["#socialmedia", "#growth"]);
    }
}
