use crate::analysis::health::{compute_site_health, health_band, HealthWeights};
use crate::commands::db::get_crawl;
use crate::commands::settings::EffectiveAuditSettings;
use crate::error::{AuditError, AuditResult};
use crate::models::issue::Severity;
use crate::models::project::CrawlStatus;
use crate::models::summary::{CrawlSummary, IssueTypeGroup};
use rusqlite::{params, Connection, Result};
use std::collections::BTreeMap;

/// Raw tallies for one crawl, read from a single snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlCounts {
    pub total_urls: i64,
    pub total_issues: i64,
    pub issues_by_severity: BTreeMap<Severity, i64>,
    pub issues_by_category: BTreeMap<String, i64>,
}

impl CrawlCounts {
    pub fn site_health(&self, weights: &HealthWeights) -> f64 {
        compute_site_health(&self.issues_by_severity, self.total_urls, weights)
    }
}

/// Tally a crawl without checking its status.
pub fn count_crawl(conn: &Connection, crawl_id: i64) -> AuditResult<CrawlCounts> {
    // One read transaction so every count sees the same committed state.
    let tx = conn.unchecked_transaction()?;

    let total_urls: i64 = tx.query_row(
        "SELECT COUNT(*) FROM urls WHERE crawl_id = ?1",
        params![crawl_id],
        |row| row.get(0),
    )?;
    let total_issues: i64 = tx.query_row(
        "SELECT COUNT(*) FROM issues WHERE crawl_id = ?1",
        params![crawl_id],
        |row| row.get(0),
    )?;

    let mut issues_by_severity: BTreeMap<Severity, i64> =
        Severity::ALL.iter().map(|severity| (*severity, 0)).collect();
    let mut issues_by_category = BTreeMap::new();
    {
        let mut stmt = tx.prepare(
            "SELECT t.severity, t.category, COUNT(*)
             FROM issues i
             JOIN issue_types t ON t.id = i.issue_type_id
             WHERE i.crawl_id = ?1
             GROUP BY t.severity, t.category",
        )?;
        let rows = stmt
            .query_map(params![crawl_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>>>()?;

        for (severity, category, count) in rows {
            match severity.parse::<Severity>() {
                Ok(severity) => *issues_by_severity.entry(severity).or_insert(0) += count,
                Err(e) => log::warn!("Data integrity: crawl {crawl_id} has issues with {e}"),
            }
            *issues_by_category.entry(category).or_insert(0) += count;
        }
    }
    tx.finish()?;

    let tallied: i64 = issues_by_severity.values().sum();
    if tallied != total_issues {
        log::warn!(
            "Data integrity: crawl {crawl_id} has {total_issues} issues but {tallied} resolve to a known severity"
        );
    }

    Ok(CrawlCounts {
        total_urls,
        total_issues,
        issues_by_severity,
        issues_by_category,
    })
}

/// Summary of a finished crawl. Running and failed crawls yield `Incomplete`.
pub fn summarize(
    conn: &Connection,
    crawl_id: i64,
    settings: &EffectiveAuditSettings,
) -> AuditResult<CrawlSummary> {
    let crawl = get_crawl(conn, crawl_id)?;
    if crawl.status != CrawlStatus::Finished {
        return Err(AuditError::Incomplete {
            crawl_id,
            status: crawl.status.to_string(),
        });
    }

    let counts = count_crawl(conn, crawl_id)?;
    let site_health = counts.site_health(&settings.health_weights);

    Ok(CrawlSummary {
        crawl,
        total_urls: counts.total_urls,
        total_issues: counts.total_issues,
        issues_by_severity: counts.issues_by_severity,
        issues_by_category: counts.issues_by_category,
        site_health,
        health_band: health_band(
            site_health,
            settings.healthy_threshold,
            settings.warning_threshold,
        ),
    })
}

/// One entry per issue type present in the crawl, most severe and most
/// frequent first.
pub fn group_by_type(conn: &Connection, crawl_id: i64) -> AuditResult<Vec<IssueTypeGroup>> {
    get_crawl(conn, crawl_id)?;

    let mut stmt = conn.prepare(
        "SELECT t.code, t.name, t.severity, t.category, COUNT(i.id) AS occurrences
         FROM issues i
         JOIN issue_types t ON t.id = i.issue_type_id
         WHERE i.crawl_id = ?1
         GROUP BY t.id
         ORDER BY CASE t.severity WHEN 'critical' THEN 0 WHEN 'major' THEN 1 ELSE 2 END,
                  occurrences DESC,
                  t.code ASC",
    )?;

    let groups = stmt
        .query_map(params![crawl_id], |row| {
            let severity: String = row.get(2)?;
            Ok(IssueTypeGroup {
                code: row.get(0)?,
                name: row.get(1)?,
                severity: severity.parse().map_err(|e: String| {
                    rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, e.into())
                })?,
                category: row.get(3)?,
                count: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::db::test_support::memory_db;

    fn seed_crawl(conn: &Connection, status: &str, pages: usize) -> i64 {
        conn.execute(
            "INSERT OR IGNORE INTO projects (id, name, domain, created_at) VALUES (1, 'Shop', 'shop.example', 1)",
            [],
        )
        .expect("project");
        conn.execute(
            "INSERT INTO crawls (project_id, status, started_at) VALUES (1, ?1, 10)",
            params![status],
        )
        .expect("crawl");
        let crawl_id = conn.last_insert_rowid();
        for n in 0..pages {
            conn.execute(
                "INSERT INTO urls (crawl_id, url) VALUES (?1, ?2)",
                params![crawl_id, format!("https://shop.example/p/{n}")],
            )
            .expect("url");
        }
        crawl_id
    }

    fn add_issues(conn: &Connection, crawl_id: i64, code: &str, count: usize) {
        let url_ids: Vec<i64> = conn
            .prepare("SELECT id FROM urls WHERE crawl_id = ?1 ORDER BY id")
            .expect("prepare")
            .query_map(params![crawl_id], |row| row.get(0))
            .expect("query")
            .collect::<Result<Vec<_>>>()
            .expect("collect");
        for url_id in url_ids.into_iter().take(count) {
            conn.execute(
                "INSERT INTO issues (crawl_id, url_id, issue_type_id, created_at, updated_at)
                 SELECT ?1, ?2, id, 0, 0 FROM issue_types WHERE code = ?3",
                params![crawl_id, url_id, code],
            )
            .expect("issue");
        }
    }

    #[test]
    fn empty_finished_crawl_is_fully_healthy() {
        let conn = memory_db();
        let crawl_id = seed_crawl(&conn, "finished", 12);

        let summary = summarize(&conn, crawl_id, &EffectiveAuditSettings::default()).expect("summary");
        assert_eq!(summary.total_urls, 12);
        assert_eq!(summary.total_issues, 0);
        assert_eq!(summary.site_health, 100.0);
        assert_eq!(summary.issues_by_severity.len(), 3);
        assert!(summary.issues_by_severity.values().all(|count| *count == 0));
        assert!(summary.issues_by_category.is_empty());
    }

    #[test]
    fn counts_by_severity_and_category_sum_to_total() {
        let conn = memory_db();
        let crawl_id = seed_crawl(&conn, "finished", 100);
        add_issues(&conn, crawl_id, "CRAWL_ERROR_4XX", 5);
        add_issues(&conn, crawl_id, "TITLE_MISSING", 6);
        add_issues(&conn, crawl_id, "PERF_LCP_SLOW", 4);

        let summary = summarize(&conn, crawl_id, &EffectiveAuditSettings::default()).expect("summary");

        assert_eq!(summary.total_issues, 15);
        assert_eq!(summary.issues_by_severity[&Severity::Critical], 5);
        assert_eq!(summary.issues_by_severity[&Severity::Major], 10);
        assert_eq!(summary.issues_by_severity[&Severity::Minor], 0);
        assert_eq!(summary.issues_by_severity.values().sum::<i64>(), summary.total_issues);
        assert_eq!(summary.issues_by_category.values().sum::<i64>(), summary.total_issues);
        assert_eq!(summary.issues_by_category["technical"], 5);
        assert!(summary.site_health < 100.0);
    }

    #[test]
    fn unfinished_crawls_are_reported_incomplete() {
        let conn = memory_db();
        let running = seed_crawl(&conn, "running", 3);
        let failed = seed_crawl(&conn, "failed", 3);
        let settings = EffectiveAuditSettings::default();

        assert!(matches!(
            summarize(&conn, running, &settings),
            Err(AuditError::Incomplete { .. })
        ));
        assert!(matches!(
            summarize(&conn, failed, &settings),
            Err(AuditError::Incomplete { .. })
        ));
        assert!(matches!(
            summarize(&conn, 999, &settings),
            Err(AuditError::NotFound { .. })
        ));
    }

    #[test]
    fn groups_only_types_that_occur() {
        let conn = memory_db();
        let crawl_id = seed_crawl(&conn, "finished", 10);
        add_issues(&conn, crawl_id, "TITLE_TOO_LONG", 7);
        add_issues(&conn, crawl_id, "CRAWL_ERROR_5XX", 2);
        add_issues(&conn, crawl_id, "H1_MISSING", 3);

        let groups = group_by_type(&conn, crawl_id).expect("groups");
        let codes: Vec<&str> = groups.iter().map(|g| g.code.as_str()).collect();
        assert_eq!(codes, vec!["CRAWL_ERROR_5XX", "H1_MISSING", "TITLE_TOO_LONG"]);
        assert_eq!(groups[2].count, 7);
        assert!(groups.iter().all(|g| g.count > 0));
        assert!(!codes.contains(&"TITLE_MISSING"));
    }
}
