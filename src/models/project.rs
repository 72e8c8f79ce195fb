use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub domain: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlStatus {
    Running,
    Finished,
    Failed,
}

impl CrawlStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrawlStatus::Running => "running",
            CrawlStatus::Finished => "finished",
            CrawlStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CrawlStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(CrawlStatus::Running),
            "finished" => Ok(CrawlStatus::Finished),
            "failed" => Ok(CrawlStatus::Failed),
            _ => Err(format!("Unknown crawl status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Crawl {
    pub id: i64,
    pub project_id: i64,
    pub status: CrawlStatus,
    pub started_at: i64,
    pub finished_at: Option<i64>,
    /// Cached once the crawl finishes; `None` while running or after a failure.
    pub site_health: Option<f64>,
}

/// A crawled page and the facts observed for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Url {
    pub id: i64,
    pub crawl_id: i64,
    pub url: String,
    pub status_code: Option<u16>,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1: Option<String>,
    pub word_count: Option<i64>,
    pub performance_score_mobile: Option<f64>,
    pub performance_score_desktop: Option<f64>,
    pub lcp_ms: Option<f64>,
    pub cls: Option<f64>,
    pub tbt_ms: Option<f64>,
}

/// Crawl-observed facts for a page, as handed over by the crawler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlInput {
    pub url: String,
    pub status_code: Option<u16>,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1: Option<String>,
    pub word_count: Option<i64>,
    pub performance_score_mobile: Option<f64>,
    pub performance_score_desktop: Option<f64>,
    pub lcp_ms: Option<f64>,
    pub cls: Option<f64>,
    pub tbt_ms: Option<f64>,
}
