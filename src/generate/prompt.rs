/// Fixed phrasing-guidance tables used to build generation prompts.
/// Unmapped values pass through verbatim.

pub fn platform_spec(platform: &str) -> String {
    match platform.to_lowercase().as_str() {
        "instagram" => "Instagram post (engaging, visual-focused, use relevant hashtags)".into(),
        "twitter" => "Twitter/X post (concise, under 280 characters, engaging)".into(),
        "facebook" => "Facebook post (conversational, community-focused)".into(),
        "linkedin" => "LinkedIn post (professional, industry-focused, thought leadership)".into(),
        "tiktok" => "TikTok caption (trendy, fun, engaging for Gen Z)".into(),
        "youtube" => "YouTube description (detailed, SEO-optimized, includes call-to-action)".into(),
        _ => format!("{platform} post"),
    }
}

pub fn content_type_spec(content_type: &str) -> String {
    match content_type.to_lowercase().as_str() {
        "post" => "social media post".into(),
        "caption" => "engaging caption".into(),
        "story" => "story content".into(),
        "ad" => "advertisement copy".into(),
        "blog" => "blog post excerpt".into(),
        "announcement" => "announcement post".into(),
        _ => content_type.to_string(),
    }
}

pub fn tone_guidance(tone: &str) -> String {
    match tone.to_lowercase().as_str() {
        "professional" => "formal, authoritative, and business-appropriate".into(),
        "casual" => "relaxed, friendly, and conversational".into(),
        "humorous" => "funny, witty, and entertaining".into(),
        "inspirational" => "motivating, uplifting, and encouraging".into(),
        "educational" => "informative, clear, and instructional".into(),
        "promotional" => "persuasive, sales-focused, and compelling".into(),
        _ => tone.to_string(),
    }
}

pub struct PromptParams<'a> {
    pub topic: &'a str,
    pub keywords: &'a str,
    pub content_type: &'a str,
    pub platform: &'a str,
    pub tone: &'a str,
    pub style: &'a str,
}

pub fn build_content_prompt(p: &PromptParams<'_>) -> String {
    format!(
        r#"Create a {platform_spec} about "{topic}".

Content Requirements:
- Type: {content_spec}
- Platform: {platform}
- Tone: {tone_spec}
- Style: {style}
- Keywords to include: {keywords}

Platform-specific guidelines:
- Follow {platform} best practices and character limits
- Use appropriate formatting and structure
- Include relevant hashtags if applicable
- Make it engaging and shareable

Generate high-quality, original content that is:
1. Engaging and attention-grabbing
2. Relevant to the target audience
3. Optimized for the platform
4. Incorporates the specified keywords naturally
5. Matches the requested tone and style

Content:"#,
        platform_spec = platform_spec(p.platform),
        topic = p.topic,
        content_spec = content_type_spec(p.content_type),
        platform = p.platform,
        tone_spec = tone_guidance(p.tone),
        style = p.style,
        keywords = p.keywords,
    )
}

/// Appended when more than one variation is requested so each call diverges.
pub fn variation_note(index: usize) -> String {
    format!(
        "\n\nGenerate variation #{} with a unique approach while maintaining the same requirements.",
        index + 1
    )
}

pub fn hashtag_prompt(content: &str, keywords: &[String]) -> String {
    let excerpt: String = content.chars().take(500).collect();
    format!(
        r#"Based on this content and keywords, suggest 10-15 relevant hashtags:

Content: {excerpt}...
Keywords: {keywords}

Generate hashtags that are:
1. Relevant to the content
2. Popular but not overly saturated
3. Mix of broad and niche tags
4. Appropriate for social media

Return only the hashtags, one per line, starting with #"#,
        keywords = keywords.join(", "),
    )
}

pub fn cta_prompt(platform: &str, content_type: &str, topic: &str) -> String {
    format!(
        r#"Create a compelling call-to-action for a {platform} {content_type} about "{topic}".

The CTA should be:
1. Platform-appropriate for {platform}
2. Engaging and action-oriented
3. Relevant to the topic "{topic}"
4. Concise and clear
5. Include relevant emojis if appropriate for the platform

Generate only the CTA text, nothing else."#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_platforms_get_guidance() {
        assert!(platform_spec("instagram").contains("visual-focused"));
        assert!(platform_spec("Twitter").contains("280 characters"));
        assert!(platform_spec("linkedin").contains("thought leadership"));
    }

    #[test]
    fn unknown_values_pass_through_verbatim() {
        assert_eq!(platform_spec("mastodon"), "mastodon post");
        assert_eq!(content_type_spec("newsletter"), "newsletter");
        assert_eq!(tone_guidance("sarcastic"), "sarcastic");
    }

    #[test]
    fn prompt_embeds_all_parameters() {
        let prompt = build_content_prompt(&PromptParams {
            topic: "winter hiking",
            keywords: "boots, trails",
            content_type: "post",
            platform: "instagram",
            tone: "casual",
            style: "engaging",
        });
        assert!(prompt.contains("\"winter hiking\""));
        assert!(prompt.contains("boots, trails"));
        assert!(prompt.contains("social media post"));
        assert!(prompt.contains("relaxed, friendly, and conversational"));
        assert!(prompt.contains("Style: engaging"));
    }

    #[test]
    fn variation_note_is_one_based() {
        assert!(variation_note(0).contains("#1"));
        assert!(variation_note(4).contains("#5"));
    }

    #[test]
    fn hashtag_prompt_truncates_long_content() {
        let long = "x".repeat(2000);
        let prompt = hashtag_prompt(&long, &["tag".into()]);
        assert!(prompt.len() < 1200);
    }
}
