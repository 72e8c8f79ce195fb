use crate::analysis::detail::compose_details;
use crate::analysis::health::HealthWeights;
use crate::commands::db::{get_crawl, get_issue, get_issue_type_by_code, get_project, get_url, now_millis};
use crate::commands::scoring::count_crawl;
use crate::commands::settings::merge_settings;
use crate::error::{AuditError, AuditResult};
use crate::models::issue::Issue;
use crate::models::project::{Crawl, CrawlStatus, Project, Url, UrlInput};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use serde_json::{Map, Value};

pub fn create_project(conn: &Connection, name: &str, domain: &str) -> AuditResult<Project> {
    let name = name.trim();
    let domain = domain.trim().to_lowercase();
    if name.is_empty() || domain.is_empty() {
        return Err(AuditError::Validation(
            "project name and domain must not be empty".to_string(),
        ));
    }

    let taken: Option<i64> = conn
        .query_row(
            "SELECT id FROM projects WHERE domain = ?1",
            params![domain],
            |row| row.get(0),
        )
        .optional()?;
    if let Some(existing) = taken {
        return Err(AuditError::Validation(format!(
            "domain {domain} is already tracked by project {existing}"
        )));
    }

    conn.execute(
        "INSERT INTO projects (name, domain, created_at) VALUES (?1, ?2, ?3)",
        params![name, domain, now_millis()],
    )?;
    let project = get_project(conn, conn.last_insert_rowid())?;
    log::info!("Created project {} for {}", project.id, project.domain);
    Ok(project)
}

pub fn start_crawl(conn: &Connection, project_id: i64) -> AuditResult<Crawl> {
    get_project(conn, project_id)?;
    conn.execute(
        "INSERT INTO crawls (project_id, status, started_at) VALUES (?1, ?2, ?3)",
        params![project_id, CrawlStatus::Running.as_str(), now_millis()],
    )?;
    get_crawl(conn, conn.last_insert_rowid())
}

fn require_running(crawl: &Crawl, action: &str) -> AuditResult<()> {
    if crawl.status == CrawlStatus::Running {
        Ok(())
    } else {
        Err(AuditError::Validation(format!(
            "cannot {action}: crawl {} is {}",
            crawl.id, crawl.status
        )))
    }
}

/// Record a crawled page. Recording the same address twice in one crawl
/// replaces the earlier facts and keeps the url id.
pub fn record_url(conn: &Connection, crawl_id: i64, input: &UrlInput) -> AuditResult<Url> {
    require_running(&get_crawl(conn, crawl_id)?, "record urls")?;
    let address = input.url.trim();
    if address.is_empty() {
        return Err(AuditError::Validation("url must not be empty".to_string()));
    }

    conn.execute(
        "INSERT INTO urls (crawl_id, url, status_code, title, meta_description, h1, word_count,
                           performance_score_mobile, performance_score_desktop, lcp_ms, cls, tbt_ms)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
         ON CONFLICT(crawl_id, url) DO UPDATE SET
            status_code = excluded.status_code,
            title = excluded.title,
            meta_description = excluded.meta_description,
            h1 = excluded.h1,
            word_count = excluded.word_count,
            performance_score_mobile = excluded.performance_score_mobile,
            performance_score_desktop = excluded.performance_score_desktop,
            lcp_ms = excluded.lcp_ms,
            cls = excluded.cls,
            tbt_ms = excluded.tbt_ms",
        params![
            crawl_id,
            address,
            input.status_code,
            input.title,
            input.meta_description,
            input.h1,
            input.word_count,
            input.performance_score_mobile,
            input.performance_score_desktop,
            input.lcp_ms,
            input.cls,
            input.tbt_ms
        ],
    )?;

    let url_id: i64 = conn.query_row(
        "SELECT id FROM urls WHERE crawl_id = ?1 AND url = ?2",
        params![crawl_id, address],
        |row| row.get(0),
    )?;
    get_url(conn, url_id)
}

/// Record one detection of `issue_code` on a page.
///
/// A repeated detection for the same (crawl, url, type) folds its detail keys
/// into the existing issue, later keys winning. The remediation record of an
/// existing issue is never touched here.
pub fn record_issue(
    conn: &Connection,
    crawl_id: i64,
    url_id: i64,
    issue_code: &str,
    extra: &Map<String, Value>,
) -> AuditResult<Issue> {
    require_running(&get_crawl(conn, crawl_id)?, "record issues")?;
    let issue_type = get_issue_type_by_code(conn, issue_code)?;
    let url = get_url(conn, url_id)?;
    if url.crawl_id != crawl_id {
        return Err(AuditError::DataIntegrity(format!(
            "url {url_id} belongs to crawl {}, not crawl {crawl_id}",
            url.crawl_id
        )));
    }

    // Take the write lock before looking for an existing row, so two identical
    // detections merge instead of racing on the unique triple.
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let existing: Option<(i64, Option<String>)> = tx
        .query_row(
            "SELECT id, details FROM issues WHERE crawl_id = ?1 AND url_id = ?2 AND issue_type_id = ?3",
            params![crawl_id, url_id, issue_type.id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let issue_id = match existing {
        Some((issue_id, previous)) => {
            let mut merged = previous
                .as_deref()
                .and_then(|raw| serde_json::from_str::<Value>(raw).ok())
                .filter(Value::is_object)
                .unwrap_or_else(|| Value::Object(Map::new()));
            merge_settings(&mut merged, &Value::Object(extra.clone()));
            let merged = merged.as_object().cloned().unwrap_or_default();

            let details = compose_details(&url.url, &issue_type, &merged);
            tx.execute(
                "UPDATE issues SET details = ?1 WHERE id = ?2",
                params![details.to_string(), issue_id],
            )?;
            log::debug!(
                "Merged repeated {} detection into issue {issue_id} (url {url_id})",
                issue_type.code
            );
            issue_id
        }
        None => {
            let now = now_millis();
            let details = compose_details(&url.url, &issue_type, extra);
            tx.execute(
                "INSERT INTO issues (crawl_id, url_id, issue_type_id, details, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![crawl_id, url_id, issue_type.id, details.to_string(), now],
            )?;
            tx.last_insert_rowid()
        }
    };
    tx.commit()?;

    get_issue(conn, issue_id)
}

/// Close a running crawl and cache its site health.
pub fn finalize_crawl(conn: &Connection, crawl_id: i64, weights: &HealthWeights) -> AuditResult<Crawl> {
    require_running(&get_crawl(conn, crawl_id)?, "finalize")?;

    let counts = count_crawl(conn, crawl_id)?;
    let health = counts.site_health(weights);
    let changed = conn.execute(
        "UPDATE crawls SET status = ?1, finished_at = ?2, site_health = ?3 WHERE id = ?4 AND status = ?5",
        params![
            CrawlStatus::Finished.as_str(),
            now_millis(),
            health,
            crawl_id,
            CrawlStatus::Running.as_str()
        ],
    )?;
    let crawl = get_crawl(conn, crawl_id)?;
    if changed == 0 {
        // Lost a race with another finalize/fail.
        require_running(&crawl, "finalize")?;
    }

    log::info!(
        "Crawl {crawl_id} finished: {} urls, {} issues, site health {health:.1}",
        counts.total_urls,
        counts.total_issues
    );
    Ok(crawl)
}

pub fn fail_crawl(conn: &Connection, crawl_id: i64) -> AuditResult<Crawl> {
    require_running(&get_crawl(conn, crawl_id)?, "fail")?;
    conn.execute(
        "UPDATE crawls SET status = ?1, finished_at = ?2, site_health = NULL WHERE id = ?3 AND status = ?4",
        params![
            CrawlStatus::Failed.as_str(),
            now_millis(),
            crawl_id,
            CrawlStatus::Running.as_str()
        ],
    )?;
    log::warn!("Crawl {crawl_id} marked as failed");
    get_crawl(conn, crawl_id)
}

/// Delete a crawl with its urls and issues.
pub fn delete_crawl(conn: &Connection, crawl_id: i64) -> AuditResult<()> {
    let deleted = conn.execute("DELETE FROM crawls WHERE id = ?1", params![crawl_id])?;
    if deleted == 0 {
        return Err(AuditError::not_found("crawl", crawl_id));
    }
    log::info!("Deleted crawl {crawl_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::db::test_support::memory_db;
    use crate::commands::db::{ensure_issue_types, get_db_connection, initialize_schema};
    use crate::commands::remediation::{update_issue, IssueLocks};
    use crate::commands::settings::EffectiveAuditSettings;
    use crate::models::issue::{IssuePatch, RemediationStatus};
    use serde_json::json;
    use std::thread;
    use std::time::Duration;

    fn page(address: &str) -> UrlInput {
        UrlInput {
            url: address.to_string(),
            status_code: Some(200),
            ..UrlInput::default()
        }
    }

    fn extra(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn project_domains_are_unique_and_names_required() {
        let conn = memory_db();
        let project = create_project(&conn, " Shop ", "Shop.Example").expect("create");
        assert_eq!(project.name, "Shop");
        assert_eq!(project.domain, "shop.example");

        assert!(matches!(
            create_project(&conn, "Other", "shop.example"),
            Err(AuditError::Validation(_))
        ));
        assert!(matches!(
            create_project(&conn, "   ", "blog.example"),
            Err(AuditError::Validation(_))
        ));
    }

    #[test]
    fn urls_are_upserted_and_only_accepted_while_running() {
        let conn = memory_db();
        let project = create_project(&conn, "Shop", "shop.example").expect("project");
        let crawl = start_crawl(&conn, project.id).expect("crawl");
        assert_eq!(crawl.status, CrawlStatus::Running);

        let first = record_url(&conn, crawl.id, &page("https://shop.example/")).expect("url");
        let mut again = page("https://shop.example/");
        again.status_code = Some(301);
        let second = record_url(&conn, crawl.id, &again).expect("url again");
        assert_eq!(first.id, second.id);
        assert_eq!(second.status_code, Some(301));

        finalize_crawl(&conn, crawl.id, &HealthWeights::default()).expect("finalize");
        assert!(matches!(
            record_url(&conn, crawl.id, &page("https://shop.example/late")),
            Err(AuditError::Validation(_))
        ));
    }

    #[test]
    fn repeated_detection_merges_details_and_keeps_remediation() {
        let conn = memory_db();
        let project = create_project(&conn, "Shop", "shop.example").expect("project");
        let crawl = start_crawl(&conn, project.id).expect("crawl");
        let url = record_url(&conn, crawl.id, &page("https://shop.example/")).expect("url");

        let first = record_issue(&conn, crawl.id, url.id, "PERF_LCP_SLOW", &extra(json!({ "lcp_ms": 4100, "device": "mobile" })))
            .expect("first detection");
        update_issue(
            &conn,
            &IssueLocks::new(),
            first.id,
            &IssuePatch {
                status: Some("in_progress".to_string()),
                ..IssuePatch::default()
            },
            &EffectiveAuditSettings::default(),
        )
        .expect("triage");

        let second = record_issue(&conn, crawl.id, url.id, "PERF_LCP_SLOW", &extra(json!({ "lcp_ms": 3900, "cls": 0.2 })))
            .expect("second detection");

        assert_eq!(first.id, second.id);
        assert_eq!(second.remediation.status, RemediationStatus::InProgress);
        let details: Value = serde_json::from_str(second.details.as_deref().expect("details")).expect("json");
        assert_eq!(details["lcp_ms"], json!(3900));
        assert_eq!(details["device"], json!("mobile"));
        assert_eq!(details["cls"], json!(0.2));
        assert_eq!(details["issue_code"], json!("PERF_LCP_SLOW"));

        let total: i64 = conn
            .query_row("SELECT COUNT(*) FROM issues", [], |row| row.get(0))
            .expect("count");
        assert_eq!(total, 1);
    }

    #[test]
    fn detections_must_reference_known_types_and_same_crawl_urls() {
        let conn = memory_db();
        let project = create_project(&conn, "Shop", "shop.example").expect("project");
        let earlier = start_crawl(&conn, project.id).expect("crawl");
        let foreign = record_url(&conn, earlier.id, &page("https://shop.example/")).expect("url");
        let current = start_crawl(&conn, project.id).expect("crawl");
        let own = record_url(&conn, current.id, &page("https://shop.example/")).expect("url");

        assert!(matches!(
            record_issue(&conn, current.id, foreign.id, "TITLE_MISSING", &Map::new()),
            Err(AuditError::DataIntegrity(_))
        ));
        assert!(matches!(
            record_issue(&conn, current.id, own.id, "NOT_A_CODE", &Map::new()),
            Err(AuditError::NotFound { .. })
        ));
    }

    #[test]
    fn finalize_caches_health_and_delete_cascades() {
        let conn = memory_db();
        let project = create_project(&conn, "Shop", "shop.example").expect("project");
        let crawl = start_crawl(&conn, project.id).expect("crawl");
        for n in 0..10 {
            let url = record_url(&conn, crawl.id, &page(&format!("https://shop.example/{n}"))).expect("url");
            if n < 2 {
                record_issue(&conn, crawl.id, url.id, "CRAWL_ERROR_5XX", &Map::new()).expect("issue");
            }
        }

        let finished = finalize_crawl(&conn, crawl.id, &HealthWeights::default()).expect("finalize");
        assert_eq!(finished.status, CrawlStatus::Finished);
        assert!(finished.finished_at.is_some());
        assert_eq!(finished.site_health, Some(80.0));
        assert!(matches!(
            finalize_crawl(&conn, crawl.id, &HealthWeights::default()),
            Err(AuditError::Validation(_))
        ));

        delete_crawl(&conn, crawl.id).expect("delete");
        let leftovers: i64 = conn
            .query_row(
                "SELECT (SELECT COUNT(*) FROM urls) + (SELECT COUNT(*) FROM issues)",
                [],
                |row| row.get(0),
            )
            .expect("count");
        assert_eq!(leftovers, 0);
        assert!(matches!(delete_crawl(&conn, crawl.id), Err(AuditError::NotFound { .. })));
    }

    #[test]
    fn concurrent_identical_detections_merge_into_one_issue() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("siteaudit.db");
        let (crawl_id, url_id) = {
            let conn = get_db_connection(&db_path, Duration::from_secs(5)).expect("open");
            initialize_schema(&conn).expect("schema");
            ensure_issue_types(&conn).expect("catalog");
            let project = create_project(&conn, "Shop", "shop.example").expect("project");
            let crawl = start_crawl(&conn, project.id).expect("crawl");
            let url = record_url(&conn, crawl.id, &page("https://shop.example/")).expect("url");
            (crawl.id, url.id)
        };

        let workers = 6;
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let db_path = db_path.clone();
                thread::spawn(move || {
                    let conn = get_db_connection(&db_path, Duration::from_secs(5)).expect("open");
                    let mut details = Map::new();
                    details.insert(format!("seen_by_{worker}"), json!(worker));
                    record_issue(&conn, crawl_id, url_id, "IMAGE_ALT_MISSING", &details)
                        .expect("record")
                        .id
                })
            })
            .collect();
        let ids: Vec<i64> = handles
            .into_iter()
            .map(|handle| handle.join().expect("worker"))
            .collect();
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));

        let conn = get_db_connection(&db_path, Duration::from_secs(5)).expect("open");
        let issue = get_issue(&conn, ids[0]).expect("issue");
        let details: Value = serde_json::from_str(issue.details.as_deref().expect("details")).expect("json");
        for worker in 0..workers {
            assert_eq!(details[format!("seen_by_{worker}")], json!(worker));
        }
    }

    #[test]
    fn failed_crawl_has_no_health() {
        let conn = memory_db();
        let project = create_project(&conn, "Shop", "shop.example").expect("project");
        let crawl = start_crawl(&conn, project.id).expect("crawl");
        let failed = fail_crawl(&conn, crawl.id).expect("fail");
        assert_eq!(failed.status, CrawlStatus::Failed);
        assert_eq!(failed.site_health, None);
    }
}
