//! Blocking HTTP wrapper around the tracker's REST worklog endpoints.
//!
//! Every call carries basic auth and a bounded timeout. Idempotent reads get
//! one retry on transport errors; mutations are attempted exactly once.

use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::jira::hierarchy;
use crate::models::{DeleteOutcome, TicketHierarchy, WorklogRecord};
use crate::utils::date::{format_date, parse_date};

const ISSUE_FIELDS: &str = "key,summary,project,parent,issuetype,customfield_10008,customfield_10009";

pub struct WorklogClient {
    http: Client,
    base_url: String,
    user: String,
    api_token: String,
    done_status: String,
    search_jql: String,
}

impl WorklogClient {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        cfg.require_credentials()?;
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            user: cfg.user.clone(),
            api_token: cfg.api_token.clone(),
            done_status: cfg.done_status.clone(),
            search_jql: cfg.search_jql.clone(),
        })
    }

    /// Log a worklog entry against a ticket. `date` backdates the entry
    /// (the tracker expects a full timestamp; 09:00 is used as the anchor).
    pub fn log_work(
        &self,
        ticket: &str,
        duration: &str,
        comment: &str,
        date: Option<&str>,
    ) -> AppResult<()> {
        let url = format!("{}/rest/api/2/issue/{}/worklog", self.base_url, ticket);
        let mut payload = json!({ "timeSpent": duration, "comment": comment });
        if let Some(d) = date {
            payload["started"] = json!(format!("{}T09:00:00.000+0000", d));
        }
        let resp = self
            .http
            .post(&url)
            .basic_auth(&self.user, Some(&self.api_token))
            .json(&payload)
            .send()?;
        expect_status(resp, 201)?;
        Ok(())
    }

    /// Transition a ticket to the configured done status.
    pub fn close_ticket(&self, ticket: &str) -> AppResult<()> {
        let url = format!("{}/rest/api/2/issue/{}/transitions", self.base_url, ticket);
        let body = self.get_json(&url, &[])?;
        let done_id = body["transitions"]
            .as_array()
            .into_iter()
            .flatten()
            .find(|t| t["to"]["name"].as_str() == Some(self.done_status.as_str()))
            .and_then(|t| t["id"].as_str().map(str::to_string))
            .ok_or_else(|| {
                AppError::NoTransition(self.done_status.clone(), ticket.to_string())
            })?;
        let resp = self
            .http
            .post(&url)
            .basic_auth(&self.user, Some(&self.api_token))
            .json(&json!({ "transition": { "id": done_id } }))
            .send()?;
        expect_status(resp, 204)?;
        Ok(())
    }

    /// Open tickets assigned to the user, arranged as
    /// Project → Epic → Main task → Ticket.
    pub fn get_open_tickets(&self) -> AppResult<TicketHierarchy> {
        let user_issues = self.search(&self.search_jql, ISSUE_FIELDS, 1000)?;

        // The user's tickets alone don't carry enough context; fetch their
        // epics and parents so the hierarchy can be assembled.
        let mut parent_keys = Vec::new();
        for issue in &user_issues {
            if let Some(link) = hierarchy::epic_link(issue) {
                if !parent_keys.contains(&link) {
                    parent_keys.push(link);
                }
            }
            if let Some(parent) = issue["fields"]["parent"]["key"].as_str() {
                if !parent_keys.iter().any(|k| k.as_str() == parent) {
                    parent_keys.push(parent.to_string());
                }
            }
        }

        let mut issues = user_issues;
        if !parent_keys.is_empty() {
            let jql = format!("key in ({})", parent_keys.join(","));
            let parents = self.search(&jql, ISSUE_FIELDS, 1000)?;
            for parent in parents {
                let key = parent["key"].as_str().unwrap_or_default().to_string();
                if !issues.iter().any(|i| i["key"].as_str() == Some(&key)) {
                    issues.push(parent);
                }
            }
        }

        Ok(hierarchy::build(&issues))
    }

    /// Total hours the user logged on the given date (today when `None`),
    /// rounded to 2 decimals.
    pub fn get_hours_logged(&self, date: Option<&str>) -> AppResult<f64> {
        let date_query = resolve_date(date)?;
        let issues = self.worklog_search(&date_query, "worklog", 100)?;
        let mut total_seconds: i64 = 0;
        for issue in &issues {
            for wl in worklogs_of(issue) {
                if started_on(wl, &date_query) {
                    total_seconds += wl["timeSpentSeconds"].as_i64().unwrap_or(0);
                }
            }
        }
        Ok((total_seconds as f64 / 3600.0 * 100.0).round() / 100.0)
    }

    /// All of the user's worklogs for the given date, sorted by start time.
    pub fn get_all_worklogs(&self, date: Option<&str>) -> AppResult<Vec<WorklogRecord>> {
        let date_query = resolve_date(date)?;
        let issues = self.worklog_search(&date_query, "worklog,summary", 20)?;
        let mut logs = Vec::new();
        for issue in &issues {
            let issue_key = issue["key"].as_str().unwrap_or_default().to_string();
            let summary = issue["fields"]["summary"].as_str().unwrap_or_default().to_string();
            for wl in worklogs_of(issue) {
                if !started_on(wl, &date_query) {
                    continue;
                }
                logs.push(WorklogRecord {
                    issue_key: issue_key.clone(),
                    summary: summary.clone(),
                    comment: wl["comment"].as_str().unwrap_or_default().to_string(),
                    time_spent: wl["timeSpent"].as_str().unwrap_or_default().to_string(),
                    started: wl["started"].as_str().unwrap_or_default().to_string(),
                    worklog_id: wl["id"].as_str().unwrap_or_default().to_string(),
                });
            }
        }
        logs.sort_by(|a, b| a.started.cmp(&b.started));
        Ok(logs)
    }

    /// Delete the most recent worklog entry for the given date.
    pub fn delete_last_worklog(&self, date: Option<&str>) -> AppResult<DeleteOutcome> {
        let date_query = resolve_date(date)?;
        let logs = self.get_all_worklogs(Some(&date_query))?;
        let last = match logs.last() {
            Some(l) => l,
            None => {
                return Ok(DeleteOutcome::failed(
                    format!("No worklog found for {}.", date_query),
                    0,
                ))
            }
        };
        match self.delete_worklog(&last.issue_key, &last.worklog_id) {
            Ok(()) => Ok(DeleteOutcome::ok(
                format!("Deleted last worklog for {}.", last.issue_key),
                1,
            )),
            Err(e) => Ok(DeleteOutcome::failed(
                format!("Failed to delete worklog: {}", e),
                0,
            )),
        }
    }

    /// Delete every worklog entry for the given date, reporting partial
    /// failures entry by entry.
    pub fn delete_all_worklogs(&self, date: Option<&str>) -> AppResult<DeleteOutcome> {
        let date_query = resolve_date(date)?;
        let logs = self.get_all_worklogs(Some(&date_query))?;
        if logs.is_empty() {
            return Ok(DeleteOutcome::failed(
                format!("No worklogs found for {}.", date_query),
                0,
            ));
        }
        let mut deleted = 0;
        let mut errors = Vec::new();
        for log in &logs {
            match self.delete_worklog(&log.issue_key, &log.worklog_id) {
                Ok(()) => deleted += 1,
                Err(e) => errors.push(format!("{} ({}): {}", log.issue_key, log.worklog_id, e)),
            }
        }
        if errors.is_empty() {
            Ok(DeleteOutcome::ok(
                format!("Deleted all {} worklogs for {}.", deleted, date_query),
                deleted,
            ))
        } else {
            Ok(DeleteOutcome::failed(
                format!(
                    "Deleted {} worklogs, but some failed: {}",
                    deleted,
                    errors.join("; ")
                ),
                deleted,
            ))
        }
    }

    fn delete_worklog(&self, issue_key: &str, worklog_id: &str) -> AppResult<()> {
        let url = format!(
            "{}/rest/api/2/issue/{}/worklog/{}",
            self.base_url, issue_key, worklog_id
        );
        let resp = self
            .http
            .delete(&url)
            .basic_auth(&self.user, Some(&self.api_token))
            .send()?;
        expect_status(resp, 204)?;
        Ok(())
    }

    fn worklog_search(&self, date: &str, fields: &str, max_results: u32) -> AppResult<Vec<Value>> {
        let jql = format!(
            "worklogAuthor = currentUser() AND worklogDate = {}",
            date
        );
        self.search(&jql, fields, max_results)
    }

    fn search(&self, jql: &str, fields: &str, max_results: u32) -> AppResult<Vec<Value>> {
        let url = format!("{}/rest/api/2/search", self.base_url);
        let max = max_results.to_string();
        let body = self.get_json(
            &url,
            &[("jql", jql), ("fields", fields), ("maxResults", &max)],
        )?;
        Ok(body["issues"].as_array().cloned().unwrap_or_default())
    }

    /// GET with one retry on transport errors. Upstream error statuses are
    /// not retried.
    fn get_json(&self, url: &str, params: &[(&str, &str)]) -> AppResult<Value> {
        let mut last_err = None;
        for _ in 0..2 {
            let sent = self
                .http
                .get(url)
                .query(params)
                .basic_auth(&self.user, Some(&self.api_token))
                .send();
            match sent {
                Ok(resp) => {
                    let resp = expect_success(resp)?;
                    return Ok(resp.json()?);
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(AppError::Http(last_err.expect("retry loop ran")))
    }
}

fn resolve_date(date: Option<&str>) -> AppResult<String> {
    match date {
        Some(d) if !d.is_empty() => {
            parse_date(d)?;
            Ok(d.to_string())
        }
        _ => Ok(format_date(chrono::Local::now().date_naive())),
    }
}

fn worklogs_of(issue: &Value) -> impl Iterator<Item = &Value> {
    issue["fields"]["worklog"]["worklogs"]
        .as_array()
        .into_iter()
        .flatten()
}

fn started_on(worklog: &Value, date: &str) -> bool {
    worklog["started"]
        .as_str()
        .map(|s| s.starts_with(date))
        .unwrap_or(false)
}

fn expect_success(resp: reqwest::blocking::Response) -> AppResult<reqwest::blocking::Response> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(upstream(resp))
    }
}

fn expect_status(resp: reqwest::blocking::Response, expected: u16) -> AppResult<()> {
    if resp.status().as_u16() == expected {
        Ok(())
    } else {
        Err(upstream(resp))
    }
}

fn upstream(resp: reqwest::blocking::Response) -> AppError {
    let status = resp.status().as_u16();
    let body = resp.text().unwrap_or_default();
    AppError::Upstream { status, body }
}
