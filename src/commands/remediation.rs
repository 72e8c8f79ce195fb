use crate::commands::db::{get_issue, now_millis};
use crate::commands::settings::EffectiveAuditSettings;
use crate::error::{AuditError, AuditResult};
use crate::models::issue::{Issue, IssuePatch, RemediationRecord, RemediationStatus};
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One mutex per issue id currently being written.
///
/// Writers to the same issue queue behind each other; writers to different
/// issues never share a lock. Entries are dropped once no writer holds them.
#[derive(Debug, Default)]
pub struct IssueLocks {
    inner: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl IssueLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lock<T>(&self, issue_id: i64, f: impl FnOnce() -> T) -> T {
        let entry = LockEntry {
            locks: self,
            issue_id,
            handle: Some(self.acquire(issue_id)),
        };
        let _guard = entry.lock();
        f()
    }

    /// Number of issues with a live lock entry.
    pub fn active(&self) -> usize {
        self.registry().len()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<i64, Arc<Mutex<()>>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn acquire(&self, issue_id: i64) -> Arc<Mutex<()>> {
        self.registry().entry(issue_id).or_default().clone()
    }

    fn release(&self, issue_id: i64, handle: Arc<Mutex<()>>) {
        let mut registry = self.registry();
        // The registry plus our handle: nobody else is waiting.
        if Arc::strong_count(&handle) == 2 {
            registry.remove(&issue_id);
        }
    }
}

/// Registry slot held for the duration of one write. Dropping it releases the
/// slot, also when the write panics.
struct LockEntry<'a> {
    locks: &'a IssueLocks,
    issue_id: i64,
    handle: Option<Arc<Mutex<()>>>,
}

impl LockEntry<'_> {
    fn lock(&self) -> Option<MutexGuard<'_, ()>> {
        self.handle
            .as_ref()
            .map(|handle| handle.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Drop for LockEntry<'_> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.locks.release(self.issue_id, handle);
        }
    }
}

/// A patch whose fields have been checked. `comment: Some(None)` clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPatch {
    pub implemented: Option<bool>,
    pub status: Option<RemediationStatus>,
    pub comment: Option<Option<String>>,
}

pub fn validate_patch(patch: &IssuePatch) -> AuditResult<ValidatedPatch> {
    if patch.is_empty() {
        return Err(AuditError::Validation(
            "patch must set at least one of implemented, status, comment".to_string(),
        ));
    }

    let status = patch
        .status
        .as_deref()
        .map(str::parse::<RemediationStatus>)
        .transpose()
        .map_err(AuditError::Validation)?;

    let comment = patch.comment.as_ref().map(|text| {
        if text.trim().is_empty() {
            None
        } else {
            Some(text.clone())
        }
    });

    Ok(ValidatedPatch {
        implemented: patch.implemented,
        status,
        comment,
    })
}

/// Merge `patch` into `current`. Absent fields keep their value.
///
/// With `auto_complete` set, `implemented: true` without an explicit status
/// moves the issue to `done`.
pub fn apply_patch(
    current: &RemediationRecord,
    patch: &ValidatedPatch,
    auto_complete: bool,
    now: i64,
) -> RemediationRecord {
    let implemented = patch.implemented.unwrap_or(current.implemented);
    let status = match (patch.status, patch.implemented) {
        (Some(status), _) => status,
        (None, Some(true)) if auto_complete => RemediationStatus::Done,
        (None, _) => current.status,
    };
    let comment = match &patch.comment {
        Some(comment) => comment.clone(),
        None => current.comment.clone(),
    };

    RemediationRecord {
        status,
        implemented,
        comment,
        updated_at: now.max(current.updated_at),
    }
}

/// Apply a remediation patch to one issue.
///
/// The whole patch commits in one statement guarded by the row version, so
/// readers see either the old record or the new one. Version mismatches are
/// retried up to `max_update_retries` times before surfacing `Conflict`.
/// A patch that changes no field returns the stored issue untouched.
pub fn update_issue(
    conn: &Connection,
    locks: &IssueLocks,
    issue_id: i64,
    patch: &IssuePatch,
    settings: &EffectiveAuditSettings,
) -> AuditResult<Issue> {
    let validated = validate_patch(patch)?;
    locks.with_lock(issue_id, || write_patch(conn, issue_id, &validated, settings))
}

fn write_patch(
    conn: &Connection,
    issue_id: i64,
    patch: &ValidatedPatch,
    settings: &EffectiveAuditSettings,
) -> AuditResult<Issue> {
    let attempts = settings.max_update_retries.max(1);

    for attempt in 1..=attempts {
        let current = get_issue(conn, issue_id)?;
        let next = apply_patch(
            &current.remediation,
            patch,
            settings.auto_complete_on_implemented,
            now_millis(),
        );

        if same_fields(&current.remediation, &next) {
            log::debug!("Issue {issue_id} already matches the patch, nothing to write");
            return Ok(current);
        }

        let changed = conn.execute(
            "UPDATE issues
             SET status = ?1, implemented = ?2, comment = ?3, updated_at = ?4, version = version + 1
             WHERE id = ?5 AND version = ?6",
            params![
                next.status.as_str(),
                next.implemented,
                next.comment,
                next.updated_at,
                issue_id,
                current.version
            ],
        )?;

        if changed == 1 {
            log::debug!(
                "Issue {issue_id} updated: status {} -> {}, implemented {} -> {}, comment {}",
                current.remediation.status,
                next.status,
                current.remediation.implemented,
                next.implemented,
                if patch.comment.is_some() { "set" } else { "kept" }
            );
            return Ok(Issue {
                remediation: next,
                version: current.version + 1,
                ..current
            });
        }

        log::debug!(
            "Issue {issue_id} changed under us at version {} (attempt {attempt}/{attempts})",
            current.version
        );
    }

    Err(AuditError::Conflict { issue_id })
}

fn same_fields(a: &RemediationRecord, b: &RemediationRecord) -> bool {
    a.status == b.status && a.implemented == b.implemented && a.comment == b.comment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::db::test_support::memory_db;
    use crate::commands::db::{ensure_issue_types, get_db_connection, initialize_schema};
    use std::thread;
    use std::time::Duration;

    fn seed_issue(conn: &Connection) -> i64 {
        conn.execute_batch(
            "INSERT INTO projects (name, domain, created_at) VALUES ('Shop', 'shop.example', 1);
             INSERT INTO crawls (project_id, status, started_at) VALUES (1, 'finished', 2);
             INSERT INTO urls (crawl_id, url) VALUES (1, 'https://shop.example/');
             INSERT INTO urls (crawl_id, url) VALUES (1, 'https://shop.example/cart');",
        )
        .expect("seed crawl");
        conn.execute(
            "INSERT INTO issues (crawl_id, url_id, issue_type_id, created_at, updated_at)
             SELECT 1, 1, id, 5, 5 FROM issue_types WHERE code = 'TITLE_MISSING'",
            [],
        )
        .expect("seed issue");
        conn.execute(
            "INSERT INTO issues (crawl_id, url_id, issue_type_id, created_at, updated_at)
             SELECT 1, 2, id, 5, 5 FROM issue_types WHERE code = 'TITLE_MISSING'",
            [],
        )
        .expect("seed second issue");
        1
    }

    fn patch(implemented: Option<bool>, status: Option<&str>, comment: Option<&str>) -> IssuePatch {
        IssuePatch {
            implemented,
            status: status.map(str::to_string),
            comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn applying_the_same_patch_twice_is_idempotent() {
        let conn = memory_db();
        let id = seed_issue(&conn);
        let locks = IssueLocks::new();
        let settings = EffectiveAuditSettings::default();
        let body = patch(Some(true), None, None);

        let first = update_issue(&conn, &locks, id, &body, &settings).expect("first");
        let second = update_issue(&conn, &locks, id, &body, &settings).expect("second");

        assert!(first.remediation.implemented);
        assert_eq!(first.version, 1);
        assert_eq!(second, first);
        assert_eq!(get_issue(&conn, id).expect("reload"), second);
    }

    #[test]
    fn comment_patch_leaves_other_fields_alone() {
        let conn = memory_db();
        let id = seed_issue(&conn);
        let locks = IssueLocks::new();
        let settings = EffectiveAuditSettings::default();

        update_issue(&conn, &locks, id, &patch(Some(true), Some("in_progress"), None), &settings)
            .expect("status");
        let updated = update_issue(&conn, &locks, id, &patch(None, None, Some("x")), &settings)
            .expect("comment");

        assert_eq!(updated.remediation.status, RemediationStatus::InProgress);
        assert!(updated.remediation.implemented);
        assert_eq!(updated.remediation.comment.as_deref(), Some("x"));
        assert!(updated.remediation.updated_at >= 5);
    }

    #[test]
    fn unknown_status_is_rejected_and_nothing_changes() {
        let conn = memory_db();
        let id = seed_issue(&conn);
        let before = get_issue(&conn, id).expect("before");

        let err = update_issue(
            &conn,
            &IssueLocks::new(),
            id,
            &patch(None, Some("archived"), None),
            &EffectiveAuditSettings::default(),
        )
        .unwrap_err();

        assert!(matches!(err, AuditError::Validation(_)));
        assert_eq!(get_issue(&conn, id).expect("after"), before);
    }

    #[test]
    fn empty_patch_and_missing_issue_are_errors() {
        let conn = memory_db();
        let id = seed_issue(&conn);
        let locks = IssueLocks::new();
        let settings = EffectiveAuditSettings::default();

        assert!(matches!(
            update_issue(&conn, &locks, id, &IssuePatch::default(), &settings),
            Err(AuditError::Validation(_))
        ));
        assert!(matches!(
            update_issue(&conn, &locks, 404, &patch(Some(true), None, None), &settings),
            Err(AuditError::NotFound { .. })
        ));
        assert_eq!(locks.active(), 0);
    }

    #[test]
    fn blank_comment_clears_it() {
        let conn = memory_db();
        let id = seed_issue(&conn);
        let locks = IssueLocks::new();
        let settings = EffectiveAuditSettings::default();

        update_issue(&conn, &locks, id, &patch(None, None, Some("waiting on dev")), &settings)
            .expect("set");
        let cleared = update_issue(&conn, &locks, id, &patch(None, None, Some("  ")), &settings)
            .expect("clear");
        assert_eq!(cleared.remediation.comment, None);
    }

    #[test]
    fn implemented_and_status_are_independent_unless_configured() {
        let current = RemediationRecord {
            status: RemediationStatus::Pending,
            implemented: false,
            comment: None,
            updated_at: 10,
        };
        let implemented = validate_patch(&patch(Some(true), None, None)).expect("valid");

        let independent = apply_patch(&current, &implemented, false, 20);
        assert_eq!(independent.status, RemediationStatus::Pending);
        assert!(independent.implemented);

        let completed = apply_patch(&current, &implemented, true, 20);
        assert_eq!(completed.status, RemediationStatus::Done);

        let explicit = validate_patch(&patch(Some(true), Some("in_progress"), None)).expect("valid");
        assert_eq!(
            apply_patch(&current, &explicit, true, 20).status,
            RemediationStatus::InProgress
        );
    }

    #[test]
    fn updated_at_never_moves_backwards() {
        let current = RemediationRecord {
            status: RemediationStatus::Pending,
            implemented: false,
            comment: None,
            updated_at: 1_000,
        };
        let body = validate_patch(&patch(None, Some("done"), None)).expect("valid");
        assert_eq!(apply_patch(&current, &body, false, 400).updated_at, 1_000);
    }

    #[test]
    fn locks_on_different_issues_do_not_block_each_other() {
        let locks = IssueLocks::new();
        let nested = locks.with_lock(1, || locks.with_lock(2, || locks.active()));
        assert_eq!(nested, 2);
        assert_eq!(locks.active(), 0);
    }

    #[test]
    fn panicking_writer_releases_its_lock_entry() {
        let locks = IssueLocks::new();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            locks.with_lock(7, || panic!("writer failed"))
        }));
        assert!(outcome.is_err());
        assert_eq!(locks.active(), 0);
        assert_eq!(locks.with_lock(7, || 1), 1);
        assert_eq!(locks.active(), 0);
    }

    #[test]
    fn concurrent_writers_to_one_issue_lose_no_updates() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("siteaudit.db");
        {
            let conn = get_db_connection(&db_path, Duration::from_secs(5)).expect("open");
            initialize_schema(&conn).expect("schema");
            ensure_issue_types(&conn).expect("catalog");
            seed_issue(&conn);
        }

        let locks = Arc::new(IssueLocks::new());
        let workers = 4;
        let per_worker = 5;
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let locks = Arc::clone(&locks);
                let db_path = db_path.clone();
                thread::spawn(move || {
                    let conn = get_db_connection(&db_path, Duration::from_secs(5)).expect("open");
                    let settings = EffectiveAuditSettings::default();
                    for n in 0..per_worker {
                        let body = patch(Some(n % 2 == 0), None, Some(&format!("worker {worker} pass {n}")));
                        update_issue(&conn, &locks, 1, &body, &settings).expect("update");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker");
        }

        let conn = get_db_connection(&db_path, Duration::from_secs(5)).expect("open");
        let issue = get_issue(&conn, 1).expect("issue");
        assert_eq!(issue.version, (workers * per_worker) as i64);
        assert!(issue
            .remediation
            .comment
            .as_deref()
            .is_some_and(|c| c.starts_with("worker ")));
        // The neighbouring issue was never touched.
        assert_eq!(get_issue(&conn, 2).expect("other").version, 0);
        assert_eq!(locks.active(), 0);
    }
}
