use crate::analysis::catalog::ISSUE_CATALOG;
use crate::error::{AuditError, AuditResult};
use crate::models::issue::{Issue, IssueType, RemediationRecord};
use crate::models::project::{Crawl, Project, Url};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

const DB_SCHEMA_VERSION: i64 = 3;

pub const DB_FILE: &str = "siteaudit.db";

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    apply_connection_pragmas(conn)?;
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;

    let mut version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        apply_migration_1(conn)?;
        version = 1;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version < 2 {
        apply_migration_2(conn)?;
        version = 2;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version < 3 {
        apply_migration_3(conn)?;
        version = 3;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version > DB_SCHEMA_VERSION {
        log::warn!("Database schema {version} is newer than {DB_SCHEMA_VERSION}, continuing");
    }

    Ok(())
}

/// Per-connection settings; foreign keys are off by default in SQLite.
fn apply_connection_pragmas(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}

fn apply_migration_1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            domain TEXT NOT NULL UNIQUE,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS crawls (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            status TEXT NOT NULL CHECK(status IN ('running', 'finished', 'failed')) DEFAULT 'running',
            started_at INTEGER NOT NULL,
            finished_at INTEGER,
            site_health REAL
        );

        CREATE TABLE IF NOT EXISTS urls (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            crawl_id INTEGER NOT NULL REFERENCES crawls(id) ON DELETE CASCADE,
            url TEXT NOT NULL,
            status_code INTEGER,
            title TEXT,
            meta_description TEXT,
            h1 TEXT,
            word_count INTEGER,
            performance_score_mobile REAL,
            performance_score_desktop REAL,
            lcp_ms REAL,
            cls REAL,
            tbt_ms REAL,
            UNIQUE (crawl_id, url)
        );

        CREATE TABLE IF NOT EXISTS issue_types (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            severity TEXT NOT NULL CHECK(severity IN ('critical', 'major', 'minor')),
            category TEXT NOT NULL,
            fix_hint TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS issues (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            crawl_id INTEGER NOT NULL REFERENCES crawls(id) ON DELETE CASCADE,
            url_id INTEGER NOT NULL REFERENCES urls(id) ON DELETE CASCADE,
            issue_type_id INTEGER NOT NULL REFERENCES issue_types(id),
            details TEXT,
            status TEXT NOT NULL CHECK(status IN ('pending', 'in_progress', 'done')) DEFAULT 'pending',
            implemented INTEGER NOT NULL DEFAULT 0,
            comment TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            version INTEGER NOT NULL DEFAULT 0,
            UNIQUE (crawl_id, url_id, issue_type_id)
        );
        ",
    )
}

fn apply_migration_2(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_crawls_project_started ON crawls(project_id, started_at);
        CREATE INDEX IF NOT EXISTS idx_urls_crawl ON urls(crawl_id);
        CREATE INDEX IF NOT EXISTS idx_issues_crawl_type ON issues(crawl_id, issue_type_id);
        ",
    )
}

/// Catalog documentation columns; rows seeded before these existed are backfilled.
fn apply_migration_3(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        ALTER TABLE issue_types ADD COLUMN description TEXT NOT NULL DEFAULT '';
        ALTER TABLE issue_types ADD COLUMN why_it_matters TEXT NOT NULL DEFAULT '';
        ALTER TABLE issue_types ADD COLUMN technical_notes TEXT;
        ",
    )
}

/// Insert catalog entries that are missing. Existing codes keep their edits;
/// only documentation columns that are still blank get filled in.
pub fn ensure_issue_types(conn: &Connection) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0;
    {
        let mut insert = tx.prepare(
            "INSERT OR IGNORE INTO issue_types
                (code, name, severity, category, description, why_it_matters, fix_hint, technical_notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        let mut backfill = tx.prepare(
            "UPDATE issue_types
             SET description = ?2, why_it_matters = ?3, technical_notes = COALESCE(technical_notes, ?4)
             WHERE code = ?1 AND description = '' AND why_it_matters = ''",
        )?;
        for entry in ISSUE_CATALOG {
            inserted += insert.execute(params![
                entry.code,
                entry.name,
                entry.severity.as_str(),
                entry.category,
                entry.description,
                entry.why_it_matters,
                entry.fix_hint,
                entry.technical_notes
            ])?;
            backfill.execute(params![
                entry.code,
                entry.description,
                entry.why_it_matters,
                entry.technical_notes
            ])?;
        }
    }
    tx.commit()?;
    Ok(inserted)
}

pub fn get_db_connection(db_path: &Path, busy_timeout: Duration) -> AuditResult<Connection> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(busy_timeout)?;
    apply_connection_pragmas(&conn)?;
    Ok(conn)
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn parse_column<T>(row: &Row<'_>, idx: usize) -> Result<T>
where
    T: FromStr<Err = String>,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

pub(crate) const PROJECT_COLUMNS: &str = "id, name, domain, created_at";

pub(crate) fn project_from_row(row: &Row<'_>) -> Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        domain: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub(crate) const CRAWL_COLUMNS: &str = "id, project_id, status, started_at, finished_at, site_health";

pub(crate) fn crawl_from_row(row: &Row<'_>) -> Result<Crawl> {
    Ok(Crawl {
        id: row.get(0)?,
        project_id: row.get(1)?,
        status: parse_column(row, 2)?,
        started_at: row.get(3)?,
        finished_at: row.get(4)?,
        site_health: row.get(5)?,
    })
}

pub(crate) const URL_COLUMNS: &str = "id, crawl_id, url, status_code, title, meta_description, h1, word_count, performance_score_mobile, performance_score_desktop, lcp_ms, cls, tbt_ms";

pub(crate) fn url_from_row(row: &Row<'_>) -> Result<Url> {
    Ok(Url {
        id: row.get(0)?,
        crawl_id: row.get(1)?,
        url: row.get(2)?,
        status_code: row.get(3)?,
        title: row.get(4)?,
        meta_description: row.get(5)?,
        h1: row.get(6)?,
        word_count: row.get(7)?,
        performance_score_mobile: row.get(8)?,
        performance_score_desktop: row.get(9)?,
        lcp_ms: row.get(10)?,
        cls: row.get(11)?,
        tbt_ms: row.get(12)?,
    })
}

pub(crate) const ISSUE_TYPE_COLUMNS: &str =
    "id, code, name, severity, category, description, why_it_matters, fix_hint, technical_notes";

pub(crate) fn issue_type_from_row(row: &Row<'_>) -> Result<IssueType> {
    Ok(IssueType {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        severity: parse_column(row, 3)?,
        category: row.get(4)?,
        description: row.get(5)?,
        why_it_matters: row.get(6)?,
        fix_hint: row.get(7)?,
        technical_notes: row.get(8)?,
    })
}

pub(crate) const ISSUE_COLUMNS: &str = "id, crawl_id, url_id, issue_type_id, details, status, implemented, comment, updated_at, created_at, version";

pub(crate) fn issue_from_row(row: &Row<'_>) -> Result<Issue> {
    Ok(Issue {
        id: row.get(0)?,
        crawl_id: row.get(1)?,
        url_id: row.get(2)?,
        issue_type_id: row.get(3)?,
        details: row.get(4)?,
        remediation: RemediationRecord {
            status: parse_column(row, 5)?,
            implemented: row.get::<_, i64>(6)? != 0,
            comment: row.get(7)?,
            updated_at: row.get(8)?,
        },
        created_at: row.get(9)?,
        version: row.get(10)?,
    })
}

pub fn get_project(conn: &Connection, project_id: i64) -> AuditResult<Project> {
    conn.query_row(
        &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
        params![project_id],
        project_from_row,
    )
    .optional()?
    .ok_or_else(|| AuditError::not_found("project", project_id))
}

pub fn list_projects(conn: &Connection) -> AuditResult<Vec<Project>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, id DESC"
    ))?;
    let projects = stmt
        .query_map([], project_from_row)?
        .collect::<Result<Vec<_>>>()?;
    Ok(projects)
}

pub fn get_crawl(conn: &Connection, crawl_id: i64) -> AuditResult<Crawl> {
    conn.query_row(
        &format!("SELECT {CRAWL_COLUMNS} FROM crawls WHERE id = ?1"),
        params![crawl_id],
        crawl_from_row,
    )
    .optional()?
    .ok_or_else(|| AuditError::not_found("crawl", crawl_id))
}

/// Crawls of a project, most recently started first.
pub fn list_crawls(conn: &Connection, project_id: i64) -> AuditResult<Vec<Crawl>> {
    get_project(conn, project_id)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {CRAWL_COLUMNS} FROM crawls WHERE project_id = ?1 ORDER BY started_at DESC, id DESC"
    ))?;
    let crawls = stmt
        .query_map(params![project_id], crawl_from_row)?
        .collect::<Result<Vec<_>>>()?;
    Ok(crawls)
}

/// Resolved at read time; ties on `started_at` go to the later insert.
pub fn latest_crawl(conn: &Connection, project_id: i64) -> AuditResult<Crawl> {
    get_project(conn, project_id)?;
    conn.query_row(
        &format!(
            "SELECT {CRAWL_COLUMNS} FROM crawls WHERE project_id = ?1 ORDER BY started_at DESC, id DESC LIMIT 1"
        ),
        params![project_id],
        crawl_from_row,
    )
    .optional()?
    .ok_or_else(|| AuditError::not_found("crawl", format!("latest for project {project_id}")))
}

pub fn get_url(conn: &Connection, url_id: i64) -> AuditResult<Url> {
    conn.query_row(
        &format!("SELECT {URL_COLUMNS} FROM urls WHERE id = ?1"),
        params![url_id],
        url_from_row,
    )
    .optional()?
    .ok_or_else(|| AuditError::not_found("url", url_id))
}

pub fn get_issue_type_by_code(conn: &Connection, code: &str) -> AuditResult<IssueType> {
    conn.query_row(
        &format!("SELECT {ISSUE_TYPE_COLUMNS} FROM issue_types WHERE code = ?1"),
        params![code],
        issue_type_from_row,
    )
    .optional()?
    .ok_or_else(|| AuditError::not_found("issue type", code))
}

pub fn get_issue(conn: &Connection, issue_id: i64) -> AuditResult<Issue> {
    conn.query_row(
        &format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?1"),
        params![issue_id],
        issue_from_row,
    )
    .optional()?
    .ok_or_else(|| AuditError::not_found("issue", issue_id))
}

/// An issue joined with the url and issue type it points at.
#[derive(Debug, Clone)]
pub struct IssueRow {
    pub issue: Issue,
    pub url: Url,
    pub issue_type: IssueType,
}

/// Issues of one type in a crawl, in insertion order.
pub fn list_issue_rows(conn: &Connection, crawl_id: i64, issue_code: &str) -> AuditResult<Vec<IssueRow>> {
    get_crawl(conn, crawl_id)?;
    let issue_type = get_issue_type_by_code(conn, issue_code)?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {ISSUE_COLUMNS} FROM issues WHERE crawl_id = ?1 AND issue_type_id = ?2 ORDER BY id ASC"
    ))?;
    let issues = stmt
        .query_map(params![crawl_id, issue_type.id], issue_from_row)?
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::with_capacity(issues.len());
    for issue in issues {
        let url = get_url(conn, issue.url_id)?;
        rows.push(IssueRow {
            issue,
            url,
            issue_type: issue_type.clone(),
        });
    }
    Ok(rows)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().expect("in-memory db");
        initialize_schema(&conn).expect("schema init");
        ensure_issue_types(&conn).expect("seed catalog");
        conn
    }
}
