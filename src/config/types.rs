use serde::Deserialize;

/// Main configuration structure for Site-Inspector
///
/// Every section is optional in the TOML file; missing sections and keys fall
/// back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub spelling: SpellingConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages recorded in the report
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Maximum number of concurrent page analyses
    #[serde(rename = "max-workers")]
    pub max_workers: u32,

    /// Pause between successive dispatch batches (milliseconds)
    #[serde(rename = "politeness-delay")]
    pub politeness_delay: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 50,
            max_workers: 5,
            politeness_delay: 200,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Timeout for page GET requests (seconds)
    #[serde(rename = "page-timeout")]
    pub page_timeout: u64,

    /// Timeout for link and image HEAD checks (seconds)
    #[serde(rename = "link-check-timeout")]
    pub link_check_timeout: u64,

    /// Timeout for the robots.txt fetch (seconds)
    #[serde(rename = "robots-timeout")]
    pub robots_timeout: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("SiteInspector/{}", env!("CARGO_PKG_VERSION")),
            page_timeout: 10,
            link_check_timeout: 5,
            robots_timeout: 5,
        }
    }
}

/// Spell-checking configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpellingConfig {
    /// Word list used as the dictionary (one word per line, optional frequency)
    ///
    /// When unset the bundled English word list is used.
    #[serde(rename = "dictionary-path")]
    pub dictionary_path: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the JSON crawl report
    #[serde(rename = "report-path")]
    pub report_path: String,

    /// Path to the text crawl summary
    #[serde(rename = "summary-path")]
    pub summary_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: "crawl_report.json".to_string(),
            summary_path: "crawl_summary.txt".to_string(),
        }
    }
}
