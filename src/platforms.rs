/// Platforms the tracker knows how to query.
pub const SUPPORTED: &[&str] = &["LinkedIn", "X (Twitter)", "YouTube", "Instagram", "TikTok"];

/// Platforms used when the user selects none on the command line.
pub const DEFAULT_SELECTION: &[&str] = &["LinkedIn", "X (Twitter)", "YouTube"];

pub fn is_supported(name: &str) -> bool {
    SUPPORTED.contains(&name)
}

/// Site restriction for a platform: first token of the name, lowercased,
/// plus ".com" ("X (Twitter)" → "x.com").
pub fn site_domain(platform: &str) -> String {
    let first = platform.split_whitespace().next().unwrap_or(platform);
    format!("{}.com", first.to_lowercase())
}

/// The exact web-search query issued for a platform.
pub fn search_query(platform: &str) -> String {
    format!(
        "Top AI influencers on {} in 2025 site:{}",
        platform,
        site_domain(platform)
    )
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_strings_for_all_supported_platforms() {
        let expected = [
            ("LinkedIn", "Top AI influencers on LinkedIn in 2025 site:linkedin.com"),
            ("X (Twitter)", "Top AI influencers on X (Twitter) in 2025 site:x.com"),
            ("YouTube", "Top AI influencers on YouTube in 2025 site:youtube.com"),
            ("Instagram", "Top AI influencers on Instagram in 2025 site:instagram.com"),
            ("TikTok", "Top AI influencers on TikTok in 2025 site:tiktok.com"),
        ];
        for (platform, query) in expected {
            assert!(is_supported(platform));
            assert_eq!(search_query(platform), query);
        }
    }

    #[test]
    fn multi_token_platform_uses_first_token_domain() {
        assert_eq!(site_domain("X (Twitter)"), "x.com");
    }

    #[test]
    fn default_selection_is_subset_of_supported() {
        assert!(DEFAULT_SELECTION.iter().all(|p| is_supported(p)));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        assert!(!is_supported("Facebook"));
        assert!(!is_supported("linkedin")); // exact strings only
    }
}
