use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::generate::client::TextGenerator;
use crate::generate::fallback::{fallback_hashtags, fallback_variation};
use crate::generate::prompt::{
    build_content_prompt, cta_prompt, hashtag_prompt, variation_note, PromptParams,
};

pub const MAX_VARIATIONS: usize = 5;

lazy_static! {
    static ref HASHTAG_RE: Regex = Regex::new(r"#\w+").unwrap();
}

/// Generates `n` independent variations. A failed call never surfaces as an
/// error: that variation gets fallback text instead.
pub async fn generate_variations(
    generator: &dyn TextGenerator,
    p: &PromptParams<'_>,
    n: usize,
) -> Vec<String> {
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let mut prompt = build_content_prompt(p);
        if n > 1 {
            prompt.push_str(&variation_note(i));
        }
        match generator.generate(&prompt, 1000).await {
            Ok(text) => out.push(text),
            Err(e) => {
                warn!(error = %e, variation = i + 1, "generation failed; using fallback");
                out.push(fallback_variation(p, i));
            }
        }
    }
    out
}

pub async fn suggest_hashtags(
    generator: &dyn TextGenerator,
    content: &str,
    keywords: &[String],
) -> Vec<String> {
    match generator
        .generate(&hashtag_prompt(content, keywords), 300)
        .await
    {
        Ok(text) => {
            let tags: Vec<String> = text
                .lines()
                .map(str::trim)
                .filter(|l| l.starts_with('#'))
                .map(String::from)
                .take(15)
                .collect();
            if tags.is_empty() {
                fallback_hashtags(keywords)
            } else {
                tags
            }
        }
        Err(e) => {
            warn!(error = %e, "hashtag generation failed; deriving from keywords");
            fallback_hashtags(keywords)
        }
    }
}

/// One generator-produced CTA tailored to the topic; None on any failure.
pub async fn custom_cta(
    generator: &dyn TextGenerator,
    platform: &str,
    content_type: &str,
    topic: &str,
) -> Option<String> {
    match generator
        .generate(&cta_prompt(platform, content_type, topic), 100)
        .await
    {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(error = %e, "custom cta generation failed");
            None
        }
    }
}

// --- SEO analysis ---

#[derive(Debug, Serialize)]
pub struct KeywordStats {
    pub count: usize,
    pub density: f64,
}

#[derive(Debug, Serialize)]
pub struct SeoAnalysis {
    pub word_count: usize,
    pub character_count: usize,
    pub character_count_no_spaces: usize,
    pub keyword_analysis: BTreeMap<String, KeywordStats>,
    pub readability_score: f64,
}

pub fn analyze_seo(content: &str, keywords: &[String]) -> SeoAnalysis {
    let word_count = content.split_whitespace().count();
    let character_count = content.chars().count();
    let character_count_no_spaces = content.chars().filter(|c| *c != ' ').count();

    let content_lower = content.to_lowercase();
    let mut keyword_analysis = BTreeMap::new();
    for keyword in keywords {
        let keyword_lower = keyword.to_lowercase();
        let count = if keyword_lower.is_empty() {
            0
        } else {
            content_lower.matches(&keyword_lower).count()
        };
        let density = if word_count > 0 {
            round2(count as f64 / word_count as f64 * 100.0)
        } else {
            0.0
        };
        keyword_analysis.insert(keyword.clone(), KeywordStats { count, density });
    }

    // Heuristic readability: penalize long average sentence length.
    let sentences = content
        .chars()
        .filter(|c| matches!(c, '.' | '!' | '?'))
        .count();
    let avg_words_per_sentence = if sentences > 0 {
        word_count as f64 / sentences as f64
    } else {
        word_count as f64
    };
    let readability_score = round1((100.0 - avg_words_per_sentence * 2.0).clamp(0.0, 100.0));

    SeoAnalysis {
        word_count,
        character_count,
        character_count_no_spaces,
        keyword_analysis,
        readability_score,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// --- CTA library ---

const GENERIC_CTAS: &[&str] = &[
    "Share your thoughts!",
    "Let us know what you think!",
    "Follow for more content!",
    "Engage with us in the comments!",
    "What's your opinion on this?",
];

pub fn cta_suggestions(platform: &str, content_type: &str) -> Vec<String> {
    let ctas: &[&str] = match (
        platform.to_lowercase().as_str(),
        content_type.to_lowercase().as_str(),
    ) {
        ("instagram", "post") => &[
            "Double tap if you agree! ❤️",
            "Save this post for later! 📌",
            "Share your thoughts in the comments below! 👇",
            "Tag a friend who needs to see this! 👥",
            "What's your experience with this? Tell us! 💬",
            "Follow for more tips like this! ✨",
            "DM us your questions! 📩",
            "Which tip will you try first? 🤔",
        ],
        ("instagram", "story") => &[
            "Swipe up for more! ⬆️",
            "DM me your thoughts! 💭",
            "React with your favorite emoji! 😍",
            "Share this to your story! 📱",
            "Vote in our poll! 🗳️",
        ],
        ("instagram", "ad") => &[
            "Shop now - limited time offer! 🛒",
            "Learn more in our bio link! 🔗",
            "Get started today! 🚀",
            "Claim your discount now! 💰",
            "Book your free consultation! 📅",
        ],
        ("facebook", "post") => &[
            "What do you think? Share your opinion!",
            "Like and share if this resonates with you!",
            "Comment below with your experience!",
            "Tag someone who would find this helpful!",
            "Follow our page for more content like this!",
            "Join the conversation in the comments!",
            "Share this post to spread the word!",
        ],
        ("twitter", "post") => &[
            "Retweet if you agree!",
            "What's your take? Reply below!",
            "Thread 🧵 (1/n)",
            "Thoughts? 💭",
            "RT to share with your followers!",
            "Join the conversation! 🗣️",
        ],
        ("linkedin", "post") => &[
            "What's your experience with this? Share in the comments.",
            "Agree? Disagree? Let's discuss in the comments.",
            "Connect with me for more insights like this.",
            "Share this post if you found it valuable.",
            "What would you add to this list?",
            "Follow for more industry insights.",
            "Tag a colleague who should see this!",
        ],
        ("tiktok", "post") => &[
            "Follow for more tips! ✨",
            "Comment your thoughts! 💭",
            "Duet this if you agree! 🤝",
            "Save this for later! 📌",
            "Share with your friends! 👥",
            "What do you think? 🤔",
            "Try this and let me know how it goes! 💪",
        ],
        ("youtube", "post") => &[
            "Subscribe for more content like this!",
            "Hit the bell icon for notifications! 🔔",
            "Like this video if it helped you!",
            "Comment your questions below!",
            "Share this video with someone who needs it!",
            "Check out our other videos in the description!",
            "What topic should we cover next?",
        ],
        _ => GENERIC_CTAS,
    };
    ctas.iter().map(|s| s.to_string()).collect()
}

// --- Content optimization ---

#[derive(Debug, Serialize)]
pub struct IdealLength {
    pub min: usize,
    pub max: usize,
}

#[derive(Debug, Serialize)]
pub struct PlatformGuidelines {
    pub ideal_length: IdealLength,
    pub hashtag_limit: usize,
    pub character_limit: usize,
    pub best_practices: Vec<&'static str>,
}

pub fn platform_guidelines(platform: &str) -> PlatformGuidelines {
    match platform.to_lowercase().as_str() {
        "twitter" => PlatformGuidelines {
            ideal_length: IdealLength { min: 71, max: 280 },
            hashtag_limit: 2,
            character_limit: 280,
            best_practices: vec![
                "Keep it concise and punchy",
                "Use 1-2 relevant hashtags",
                "Include media when possible",
                "Ask questions to encourage replies",
            ],
        },
        "facebook" => PlatformGuidelines {
            ideal_length: IdealLength { min: 40, max: 80 },
            hashtag_limit: 3,
            character_limit: 63206,
            best_practices: vec![
                "Shorter posts get more engagement",
                "Use storytelling approach",
                "Include a clear call-to-action",
                "Post when your audience is most active",
            ],
        },
        "linkedin" => PlatformGuidelines {
            ideal_length: IdealLength {
                min: 150,
                max: 1300,
            },
            hashtag_limit: 5,
            character_limit: 3000,
            best_practices: vec![
                "Start with a hook in the first line",
                "Use professional tone",
                "Include industry-relevant hashtags",
                "End with a question or call-to-action",
            ],
        },
        _ => PlatformGuidelines {
            ideal_length: IdealLength {
                min: 125,
                max: 2200,
            },
            hashtag_limit: 30,
            character_limit: 2200,
            best_practices: vec![
                "Use 3-5 hashtags in the first comment",
                "Include a clear call-to-action",
                "Use line breaks for readability",
                "Add emojis to increase engagement",
            ],
        },
    }
}

#[derive(Debug, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub priority: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CurrentStats {
    pub character_count: usize,
    pub word_count: usize,
    pub hashtag_count: usize,
}

#[derive(Debug, Serialize)]
pub struct OptimizeReport {
    pub platform: String,
    pub current_stats: CurrentStats,
    pub platform_guidelines: PlatformGuidelines,
    pub recommendations: Vec<Recommendation>,
    pub optimization_score: i64,
}

const CTA_INDICATORS: &[&str] = &[
    "comment", "share", "like", "follow", "click", "visit", "check", "try", "join", "subscribe",
];

pub fn optimize(content: &str, platform: &str, keywords: &[String]) -> OptimizeReport {
    let guidelines = platform_guidelines(platform);
    let char_count = content.chars().count();
    let word_count = content.split_whitespace().count();
    let hashtag_count = HASHTAG_RE.find_iter(content).count();

    let mut recommendations = Vec::new();

    if char_count < guidelines.ideal_length.min {
        recommendations.push(Recommendation {
            kind: "length",
            priority: "medium",
            message: format!(
                "Consider expanding your content. Current: {} chars, Recommended: {}-{} chars",
                char_count, guidelines.ideal_length.min, guidelines.ideal_length.max
            ),
        });
    } else if char_count > guidelines.ideal_length.max {
        recommendations.push(Recommendation {
            kind: "length",
            priority: "high",
            message: format!(
                "Content might be too long for {}. Current: {} chars, Recommended: {}-{} chars",
                platform, char_count, guidelines.ideal_length.min, guidelines.ideal_length.max
            ),
        });
    }

    let content_lower = content.to_lowercase();
    let missing: Vec<&str> = keywords
        .iter()
        .filter(|k| !k.is_empty() && !content_lower.contains(&k.to_lowercase()))
        .map(|k| k.as_str())
        .collect();
    if !missing.is_empty() {
        recommendations.push(Recommendation {
            kind: "keywords",
            priority: "medium",
            message: format!("Consider including these keywords: {}", missing.join(", ")),
        });
    }

    let has_cta = CTA_INDICATORS.iter().any(|i| content_lower.contains(i));
    if !has_cta {
        recommendations.push(Recommendation {
            kind: "engagement",
            priority: "high",
            message: "Add a clear call-to-action to encourage engagement".into(),
        });
    }

    if hashtag_count == 0 {
        recommendations.push(Recommendation {
            kind: "hashtags",
            priority: "medium",
            message: format!(
                "Consider adding relevant hashtags (recommended: 1-{} for {})",
                guidelines.hashtag_limit, platform
            ),
        });
    } else if hashtag_count > guidelines.hashtag_limit {
        recommendations.push(Recommendation {
            kind: "hashtags",
            priority: "low",
            message: format!(
                "You might have too many hashtags ({}). Recommended: 1-{} for {}",
                hashtag_count, guidelines.hashtag_limit, platform
            ),
        });
    }

    let weighted = recommendations
        .iter()
        .filter(|r| r.priority == "high" || r.priority == "medium")
        .count() as i64;
    let optimization_score = (100 - weighted * 15).max(0);

    OptimizeReport {
        platform: platform.to_string(),
        current_stats: CurrentStats {
            character_count: char_count,
            word_count,
            hashtag_count,
        },
        platform_guidelines: guidelines,
        recommendations,
        optimization_score,
    }
}

#[cfg(test)]
mod seo_tests {
    use super::*;

    #[test]
    fn counts_words_and_characters() {
        let a = analyze_seo("hello world again", &[]);
        assert_eq!(a.word_count, 3);
        assert_eq!(a.character_count, 17);
        assert_eq!(a.character_count_no_spaces, 15);
    }

    #[test]
    fn keyword_density_is_per_word_percentage() {
        let a = analyze_seo("coffee is great. coffee is life.", &["coffee".into()]);
        let stats = &a.keyword_analysis["coffee"];
        assert_eq!(stats.count, 2);
        // 2 occurrences / 6 words, rounded to two decimals
        assert_eq!(stats.density, 33.33);
    }

    #[test]
    fn density_keeps_two_decimals_while_readability_keeps_one() {
        let a = analyze_seo(
            "one two three four five six seven",
            &["seven".into()],
        );
        // 1 / 7 words = 14.2857...%
        assert_eq!(a.keyword_analysis["seven"].density, 14.29);
        assert_eq!(a.readability_score * 10.0, (a.readability_score * 10.0).round());
    }

    #[test]
    fn absent_keyword_has_zero_density() {
        let a = analyze_seo("nothing relevant here", &["coffee".into()]);
        let stats = &a.keyword_analysis["coffee"];
        assert_eq!(stats.count, 0);
        assert_eq!(stats.density, 0.0);
    }

    #[test]
    fn readability_stays_in_bounds() {
        let short = analyze_seo("Hi. Go. Yes.", &[]);
        assert!(short.readability_score <= 100.0);
        let endless = analyze_seo(&"word ".repeat(200), &[]);
        assert_eq!(endless.readability_score, 0.0);
    }

    #[test]
    fn empty_content_is_all_zero() {
        let a = analyze_seo("", &["k".into()]);
        assert_eq!(a.word_count, 0);
        assert_eq!(a.keyword_analysis["k"].density, 0.0);
    }
}

#[cfg(test)]
mod cta_tests {
    use super::*;

    #[test]
    fn known_platform_and_type_get_specific_ctas() {
        let ctas = cta_suggestions("instagram", "story");
        assert!(ctas.iter().any(|c| c.contains("Swipe up")));
    }

    #[test]
    fn unknown_combination_falls_back_to_generic() {
        let ctas = cta_suggestions("instagram", "blog");
        assert_eq!(ctas, cta_suggestions("myspace", "post"));
        assert!(ctas.iter().any(|c| c.contains("Share your thoughts")));
    }
}

#[cfg(test)]
mod optimize_tests {
    use super::*;

    #[test]
    fn too_long_for_twitter_is_high_priority() {
        let content = "x".repeat(300);
        let report = optimize(&content, "twitter", &[]);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.kind == "length" && r.priority == "high"));
    }

    #[test]
    fn missing_cta_and_hashtags_are_flagged() {
        let report = optimize("A plain statement about things.", "instagram", &[]);
        let kinds: Vec<_> = report.recommendations.iter().map(|r| r.kind).collect();
        assert!(kinds.contains(&"engagement"));
        assert!(kinds.contains(&"hashtags"));
    }

    #[test]
    fn missing_keywords_are_listed() {
        let report = optimize(
            "Comment below! #daily",
            "twitter",
            &["espresso".into(), "Comment".into()],
        );
        let kw = report
            .recommendations
            .iter()
            .find(|r| r.kind == "keywords")
            .expect("keyword recommendation");
        assert!(kw.message.contains("espresso"));
        assert!(!kw.message.contains("Comment,"));
    }

    #[test]
    fn clean_content_scores_high() {
        let content = "Comment below with your favorite espresso ritual and share this with a friend who needs better mornings! Plenty of detail here to satisfy the minimum length guidance for the platform. #espresso #morning";
        let report = optimize(content, "twitter", &["espresso".into()]);
        assert!(report.optimization_score >= 85);
    }

    #[test]
    fn score_never_goes_negative() {
        let report = optimize("", "linkedin", &["a".into(), "b".into()]);
        assert!(report.optimization_score >= 0);
    }

    #[test]
    fn hashtags_counted_with_regex() {
        let report = optimize("#one #two #three words", "instagram", &[]);
        assert_eq!(report.current_stats.hashtag_count, 3);
    }
}

#[cfg(test)]
mod generation_tests {
    use super::*;
    use crate::generate::client::DisabledGenerator;

    fn params() -> PromptParams<'static> {
        PromptParams {
            topic: "city gardens",
            keywords: "urban, green",
            content_type: "post",
            platform: "linkedin",
            tone: "professional",
            style: "engaging",
        }
    }

    #[tokio::test]
    async fn every_variation_gets_fallback_when_generator_fails() {
        let texts = generate_variations(&DisabledGenerator, &params(), 3).await;
        assert_eq!(texts.len(), 3);
        for t in &texts {
            assert!(!t.trim().is_empty());
        }
    }

    #[tokio::test]
    async fn hashtags_fall_back_to_keywords() {
        let tags =
            suggest_hashtags(&DisabledGenerator, "content", &["Urban Green".into()]).await;
        assert_eq!(tags, vec!["#urbangreen"]);
    }

    #[tokio::test]
    async fn custom_cta_is_none_on_failure() {
        let cta = custom_cta(&DisabledGenerator, "instagram", "post", "topic").await;
        assert!(cta.is_none());
    }
}
