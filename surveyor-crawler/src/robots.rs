use reqwest::Client;
use std::collections::HashMap;
use tracing::{debug, warn};
use url::Url;

/// Allow/Disallow rules parsed from one robots.txt, reduced to the groups
/// that apply to our user agent.
#[derive(Debug, Clone)]
pub struct RobotsRules {
    disallow: Vec<String>,
    allow: Vec<String>,
}

impl RobotsRules {
    pub fn parse(content: &str, user_agent: &str) -> Self {
        let mut disallow = Vec::new();
        let mut allow = Vec::new();

        let ua_lower = user_agent.to_lowercase();
        let mut group_applies = false;
        let mut found_specific_group = false;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((directive, value)) = line.split_once(':') else {
                continue;
            };
            let directive = directive.trim().to_lowercase();
            let value = value.trim();

            match directive.as_str() {
                "user-agent" => {
                    let agent = value.to_lowercase();
                    if agent == "*" {
                        group_applies = !found_specific_group;
                    } else if ua_lower.contains(&agent) {
                        // A group naming us directly overrides wildcard rules
                        group_applies = true;
                        found_specific_group = true;
                        disallow.clear();
                        allow.clear();
                    } else {
                        group_applies = false;
                    }
                }
                "disallow" if group_applies => {
                    if !value.is_empty() {
                        disallow.push(value.to_string());
                    }
                }
                "allow" if group_applies => {
                    if !value.is_empty() {
                        allow.push(value.to_string());
                    }
                }
                _ => {}
            }
        }

        Self { disallow, allow }
    }

    /// Empty rule set used when robots.txt is missing or unreadable.
    pub fn allow_all() -> Self {
        Self {
            disallow: Vec::new(),
            allow: Vec::new(),
        }
    }

    /// Longest matching pattern wins; on a tie, Allow wins.
    pub fn is_allowed(&self, path: &str) -> bool {
        let mut longest_allow = 0;
        for pattern in &self.allow {
            if Self::path_matches(path, pattern) {
                longest_allow = longest_allow.max(pattern.len());
            }
        }

        let mut longest_disallow = 0;
        for pattern in &self.disallow {
            if Self::path_matches(path, pattern) {
                longest_disallow = longest_disallow.max(pattern.len());
            }
        }

        longest_allow >= longest_disallow
    }

    /// Prefix match with `*` wildcards and `$` end anchors.
    fn path_matches(path: &str, pattern: &str) -> bool {
        if pattern.is_empty() {
            return false;
        }

        let (pattern, must_end_match) = match pattern.strip_suffix('$') {
            Some(stripped) => (stripped, true),
            None => (pattern, false),
        };

        if pattern.contains('*') {
            let parts: Vec<&str> = pattern.split('*').collect();
            let mut pos = 0;

            for (i, part) in parts.iter().enumerate() {
                if part.is_empty() {
                    continue;
                }
                match path[pos..].find(part) {
                    Some(found) => {
                        if i == 0 && found != 0 {
                            return false;
                        }
                        pos += found + part.len();
                    }
                    None => return false,
                }
            }

            if must_end_match {
                return pos == path.len();
            }
            return true;
        }

        if must_end_match {
            return path == pattern;
        }

        path.starts_with(pattern)
    }
}

/// Per-origin robots.txt gate. Each origin's robots.txt is fetched and
/// parsed at most once per gate (one gate lives for one crawl run), and
/// any fetch or parse trouble fails open.
pub struct RobotsGate {
    client: Client,
    user_agent: String,
    ignore_robots: bool,
    cache: HashMap<String, RobotsRules>,
}

impl RobotsGate {
    pub fn new(client: Client, user_agent: &str, ignore_robots: bool) -> Self {
        Self {
            client,
            user_agent: user_agent.to_string(),
            ignore_robots,
            cache: HashMap::new(),
        }
    }

    /// Check whether `url` may be fetched. Returns the decision plus the
    /// robots.txt URL that governed it (None when robots are ignored).
    pub async fn is_allowed(&mut self, url: &Url) -> (bool, Option<String>) {
        if self.ignore_robots {
            return (true, None);
        }

        let origin = url.origin().ascii_serialization();
        let robots_url = format!("{}/robots.txt", origin.trim_end_matches('/'));

        if !self.cache.contains_key(&origin) {
            let rules = match self.fetch_robots(&robots_url).await {
                Some(content) => RobotsRules::parse(&content, &self.user_agent),
                None => RobotsRules::allow_all(),
            };
            self.cache.insert(origin.clone(), rules);
        }

        let allowed = self
            .cache
            .get(&origin)
            .map(|rules| rules.is_allowed(url.path()))
            .unwrap_or(true);

        (allowed, Some(robots_url))
    }

    async fn fetch_robots(&self, robots_url: &str) -> Option<String> {
        debug!("Fetching {}", robots_url);
        match self.client.get(robots_url).send().await {
            Ok(response) if response.status().is_success() => response.text().await.ok(),
            Ok(response) => {
                debug!("{} returned {}, treating as allow-all", robots_url, response.status());
                None
            }
            Err(e) => {
                warn!("Could not fetch {}: {}", robots_url, e);
                None
            }
        }
    }
}
