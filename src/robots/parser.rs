//! Robots.txt rule evaluation
//!
//! This module wraps the robotstxt crate's Google-compatible matcher.

use robotstxt::DefaultMatcher;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Parsed robots.txt rules for one site
///
/// Created once per crawl run and shared read-only between workers.
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
    /// Whether to allow all (true = allow all, false = evaluate content)
    allow_all: bool,
}

impl RobotsPolicy {
    /// Creates a policy from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates a permissive policy that allows everything
    ///
    /// This is used when robots.txt cannot be fetched or read.
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Returns true if this policy permits every URL without evaluation
    pub fn is_permissive(&self) -> bool {
        self.allow_all || self.content.trim().is_empty()
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// A panic inside the matcher is treated as "allowed": a politeness
    /// failure must never stop the crawl.
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `user_agent` - The user agent token (`*` for the generic agent)
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.is_permissive() {
            return true;
        }

        let verdict = catch_unwind(AssertUnwindSafe(|| {
            let mut matcher = DefaultMatcher::default();
            matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
        }));

        match verdict {
            Ok(allowed) => allowed,
            Err(_) => {
                tracing::warn!("robots.txt evaluation failed for {}, allowing", url);
                true
            }
        }
    }
}
