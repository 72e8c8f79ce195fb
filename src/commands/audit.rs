use crate::analysis::detail::{
    display_metrics, extra_entries, normalize_details, synthetic_detail, IssueIdentity,
};
use crate::commands::db::{
    self, ensure_issue_types, get_db_connection, initialize_schema, list_issue_rows, IssueRow, DB_FILE,
};
use crate::commands::remediation::{self, IssueLocks};
use crate::commands::settings::{self, load_effective_audit_settings, EffectiveAuditSettings};
use crate::commands::{ingest, scoring};
use crate::error::{AuditError, AuditResult};
use crate::models::issue::{Issue, IssuePatch};
use crate::models::project::{Crawl, Project, Url, UrlInput};
use crate::models::summary::{CrawlSummary, IssueTypeGroup, IssueView};
use rusqlite::Connection;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared handle to one data directory: the SQLite store, its settings and
/// the per-issue write locks. Cheap to clone.
#[derive(Clone)]
pub struct AuditStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    data_dir: PathBuf,
    db_path: PathBuf,
    settings: RwLock<EffectiveAuditSettings>,
    locks: IssueLocks,
}

impl AuditStore {
    /// Open (or create) the store under `data_dir`, migrating the schema and
    /// seeding the issue type catalog.
    pub fn open(data_dir: impl Into<PathBuf>) -> AuditResult<Self> {
        let data_dir = data_dir.into();
        let settings = load_effective_audit_settings(&data_dir)?;
        let db_path = data_dir.join(DB_FILE);

        let conn = get_db_connection(&db_path, settings.busy_timeout)?;
        initialize_schema(&conn)?;
        let seeded = ensure_issue_types(&conn)?;
        if seeded > 0 {
            log::info!("Seeded {seeded} issue types into {}", db_path.display());
        }
        log::info!("Audit store ready at {}", data_dir.display());

        Ok(Self {
            inner: Arc::new(StoreInner {
                data_dir,
                db_path,
                settings: RwLock::new(settings),
                locks: IssueLocks::new(),
            }),
        })
    }

    pub fn settings(&self) -> EffectiveAuditSettings {
        self.inner
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn connection(&self) -> AuditResult<Connection> {
        get_db_connection(&self.inner.db_path, self.settings().busy_timeout)
    }

    fn reload_settings(&self) -> AuditResult<()> {
        let fresh = load_effective_audit_settings(&self.inner.data_dir)?;
        *self
            .inner
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner) = fresh;
        Ok(())
    }

    /// Run a storage call on the blocking pool with its own connection.
    async fn run_blocking<T, F>(&self, job: F) -> AuditResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection, &AuditStore) -> AuditResult<T> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            let conn = store.connection()?;
            job(&conn, &store)
        })
        .await
        .map_err(|e| AuditError::Io(format!("storage task failed: {e}")))?
    }

    // Projects and crawls

    pub async fn create_project(&self, name: String, domain: String) -> AuditResult<Project> {
        self.run_blocking(move |conn, _| ingest::create_project(conn, &name, &domain))
            .await
    }

    pub async fn list_projects(&self) -> AuditResult<Vec<Project>> {
        self.run_blocking(|conn, _| db::list_projects(conn)).await
    }

    pub async fn get_project(&self, project_id: i64) -> AuditResult<Project> {
        self.run_blocking(move |conn, _| db::get_project(conn, project_id))
            .await
    }

    pub async fn list_crawls(&self, project_id: i64) -> AuditResult<Vec<Crawl>> {
        self.run_blocking(move |conn, _| db::list_crawls(conn, project_id))
            .await
    }

    pub async fn get_crawl(&self, crawl_id: i64) -> AuditResult<Crawl> {
        self.run_blocking(move |conn, _| db::get_crawl(conn, crawl_id))
            .await
    }

    pub async fn start_crawl(&self, project_id: i64) -> AuditResult<Crawl> {
        self.run_blocking(move |conn, _| ingest::start_crawl(conn, project_id))
            .await
    }

    pub async fn record_url(&self, crawl_id: i64, input: UrlInput) -> AuditResult<Url> {
        self.run_blocking(move |conn, _| ingest::record_url(conn, crawl_id, &input))
            .await
    }

    pub async fn record_issue(
        &self,
        crawl_id: i64,
        url_id: i64,
        issue_code: String,
        details: Map<String, Value>,
    ) -> AuditResult<Issue> {
        self.run_blocking(move |conn, _| {
            ingest::record_issue(conn, crawl_id, url_id, &issue_code, &details)
        })
        .await
    }

    pub async fn finalize_crawl(&self, crawl_id: i64) -> AuditResult<Crawl> {
        self.run_blocking(move |conn, store| {
            ingest::finalize_crawl(conn, crawl_id, &store.settings().health_weights)
        })
        .await
    }

    pub async fn fail_crawl(&self, crawl_id: i64) -> AuditResult<Crawl> {
        self.run_blocking(move |conn, _| ingest::fail_crawl(conn, crawl_id))
            .await
    }

    pub async fn delete_crawl(&self, crawl_id: i64) -> AuditResult<()> {
        self.run_blocking(move |conn, _| ingest::delete_crawl(conn, crawl_id))
            .await
    }

    // Aggregates

    pub async fn get_crawl_summary(&self, crawl_id: i64) -> AuditResult<CrawlSummary> {
        self.run_blocking(move |conn, store| scoring::summarize(conn, crawl_id, &store.settings()))
            .await
    }

    /// Summary of the project's most recently started crawl.
    pub async fn get_latest_crawl_summary(&self, project_id: i64) -> AuditResult<CrawlSummary> {
        self.run_blocking(move |conn, store| {
            let latest = db::latest_crawl(conn, project_id)?;
            scoring::summarize(conn, latest.id, &store.settings())
        })
        .await
    }

    pub async fn get_issue_type_groups(&self, crawl_id: i64) -> AuditResult<Vec<IssueTypeGroup>> {
        self.run_blocking(move |conn, _| scoring::group_by_type(conn, crawl_id))
            .await
    }

    // Issues

    pub async fn list_issues(&self, crawl_id: i64, issue_code: String) -> AuditResult<Vec<IssueView>> {
        self.run_blocking(move |conn, _| {
            let rows = list_issue_rows(conn, crawl_id, &issue_code)?;
            Ok(rows.into_iter().map(issue_view).collect())
        })
        .await
    }

    pub async fn get_issue(&self, issue_id: i64) -> AuditResult<Issue> {
        self.run_blocking(move |conn, _| db::get_issue(conn, issue_id))
            .await
    }

    pub async fn update_issue(&self, issue_id: i64, patch: IssuePatch) -> AuditResult<Issue> {
        self.run_blocking(move |conn, store| {
            remediation::update_issue(conn, &store.inner.locks, issue_id, &patch, &store.settings())
        })
        .await
    }

    pub async fn get_url(&self, url_id: i64) -> AuditResult<Url> {
        self.run_blocking(move |conn, _| db::get_url(conn, url_id))
            .await
    }

    // Settings

    pub async fn get_settings(&self) -> AuditResult<Value> {
        settings::get_settings(self.inner.data_dir.clone()).await
    }

    /// Deep-merge `partial` into the stored settings and apply the result.
    pub async fn save_settings(&self, partial: Value) -> AuditResult<Value> {
        let saved = settings::save_settings(self.inner.data_dir.clone(), partial).await?;
        self.reload_settings()?;
        Ok(saved)
    }
}

fn issue_view(row: IssueRow) -> IssueView {
    let IssueRow {
        issue,
        url,
        issue_type,
    } = row;
    let identity = IssueIdentity {
        issue_id: issue.id,
        url: &url.url,
        issue_type: &issue_type,
    };

    let detail = if url.crawl_id != issue.crawl_id {
        log::warn!(
            "Data integrity: issue {} points at url {} from crawl {}",
            issue.id,
            url.id,
            url.crawl_id
        );
        synthetic_detail(&identity)
    } else {
        normalize_details(issue.details.as_deref(), &identity)
    };

    let hint = detail
        .hint
        .clone()
        .unwrap_or_else(|| issue_type.fix_hint.clone());

    IssueView {
        metrics: display_metrics(&detail),
        extras: extra_entries(&detail),
        hint,
        detail,
        issue,
        issue_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::issue::RemediationStatus;
    use serde_json::json;
    use std::path::Path;

    async fn seeded_store(dir: &Path) -> (AuditStore, Crawl) {
        let store = AuditStore::open(dir).expect("open store");
        let project = store
            .create_project("Shop".to_string(), "shop.example".to_string())
            .await
            .expect("project");
        let crawl = store.start_crawl(project.id).await.expect("crawl");
        (store, crawl)
    }

    #[tokio::test]
    async fn issue_views_fall_back_to_catalog_hint() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (store, crawl) = seeded_store(dir.path()).await;
        let home = store
            .record_url(
                crawl.id,
                UrlInput {
                    url: "https://shop.example/".to_string(),
                    ..UrlInput::default()
                },
            )
            .await
            .expect("url");
        store
            .record_issue(
                crawl.id,
                home.id,
                "PERF_LCP_SLOW".to_string(),
                json!({ "lcp_ms": 4300, "cls": 0 }).as_object().cloned().unwrap_or_default(),
            )
            .await
            .expect("issue");

        let views = store
            .list_issues(crawl.id, "PERF_LCP_SLOW".to_string())
            .await
            .expect("views");
        assert_eq!(views.len(), 1);
        let view = &views[0];
        assert!(!view.detail.degraded);
        assert!(view.hint.starts_with("Optimise"));
        assert_eq!(view.metrics.len(), 1);
        assert_eq!(view.metrics[0].formatted, "LCP: 4300 ms");
        assert_eq!(view.issue_type.code, "PERF_LCP_SLOW");
        assert!(view.issue_type.why_it_matters.contains("Core Web Vital"));
        assert_eq!(view.issue_type.technical_notes.as_deref(), Some("Aim for LCP under 2500 ms on mobile."));
    }

    #[tokio::test]
    async fn corrupted_details_still_render() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (store, crawl) = seeded_store(dir.path()).await;
        let page = store
            .record_url(
                crawl.id,
                UrlInput {
                    url: "https://shop.example/about".to_string(),
                    ..UrlInput::default()
                },
            )
            .await
            .expect("url");
        let issue = store
            .record_issue(crawl.id, page.id, "H1_MISSING".to_string(), Map::new())
            .await
            .expect("issue");

        let conn = store.connection().expect("conn");
        conn.execute(
            "UPDATE issues SET details = '{broken' WHERE id = ?1",
            [issue.id],
        )
        .expect("corrupt");

        let views = store
            .list_issues(crawl.id, "H1_MISSING".to_string())
            .await
            .expect("views");
        assert!(views[0].detail.degraded);
        assert!(views[0].extras.is_empty());
        assert_eq!(views[0].detail.status_code(), None);
        assert_eq!(views[0].issue.remediation.status, RemediationStatus::Pending);
    }

    #[tokio::test]
    async fn saved_settings_take_effect_immediately() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = AuditStore::open(dir.path()).expect("open");
        assert!(!store.settings().auto_complete_on_implemented);

        store
            .save_settings(json!({ "autoCompleteOnImplemented": true }))
            .await
            .expect("save");
        assert!(store.settings().auto_complete_on_implemented);
        assert_eq!(store.get_settings().await.expect("get")["autoCompleteOnImplemented"], json!(true));
    }
}
