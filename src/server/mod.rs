//! Local command server: a JSON-over-HTTP proxy in front of the parser,
//! clock, and tracker client, so editors, chat UIs, and scripts can drive
//! logging without shelling out to the CLI.
//!
//! Single-threaded request loop on purpose: one human user, local traffic.

use serde::Deserialize;
use serde_json::{json, Value};
use std::io::Read;
use tiny_http::{Header, Response, Server};

use crate::config::Config;
use crate::core::{extract_comment, CommitParser, WorkdayClock};
use crate::errors::{AppError, AppResult};
use crate::jira::WorklogClient;
use crate::models::Extraction;
use crate::ui::messages;

#[derive(Deserialize)]
struct StartBody {
    time: Option<String>,
}

#[derive(Deserialize)]
struct LogBody {
    ticket: String,
    hours: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    close: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Deserialize)]
struct CloseBody {
    ticket: String,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Deserialize)]
struct CommitBody {
    #[serde(default)]
    commit_msg: String,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Deserialize)]
struct DateBody {
    date: Option<String>,
}

pub struct CommandServer {
    cfg: Config,
    client: WorklogClient,
    clock: WorkdayClock,
}

impl CommandServer {
    pub fn new(cfg: Config) -> AppResult<Self> {
        let client = WorklogClient::from_config(&cfg)?;
        let clock = WorkdayClock::from_config(&cfg)?;
        Ok(Self { cfg, client, clock })
    }

    /// Serve forever on the given port.
    pub fn run(&self, port: u16) -> AppResult<()> {
        let server = Server::http(("0.0.0.0", port))
            .map_err(|e| AppError::Server(format!("failed to bind port {}: {}", port, e)))?;
        messages::info(format!("Command server listening on port {}", port));

        for mut request in server.incoming_requests() {
            let mut body = String::new();
            if request.as_reader().read_to_string(&mut body).is_err() {
                respond(request, 400, &json!({ "error": "unreadable body" }));
                continue;
            }
            let method = request.method().to_string();
            let url = request.url().to_string();
            let (status, payload) = match self.route(&method, &url, &body) {
                Ok(ok) => ok,
                Err(e @ AppError::Json(_)) => (400, json!({ "error": e.to_string() })),
                Err(e) => {
                    messages::error(&e);
                    (500, json!({ "error": e.to_string() }))
                }
            };
            respond(request, status, &payload);
        }
        Ok(())
    }

    fn route(&self, method: &str, url: &str, body: &str) -> AppResult<(u16, Value)> {
        let path = url.split('?').next().unwrap_or(url);
        match (method, path) {
            ("POST", "/start") => self.handle_start(body),
            ("POST", "/log") => self.handle_log(body),
            ("POST", "/close") => self.handle_close(body),
            ("GET", "/tickets") => self.handle_tickets(),
            ("POST", "/commit") => self.handle_commit(body),
            ("GET", "/hours") => self.handle_hours(url),
            ("POST", "/undo_last_log") => self.handle_undo_last(body),
            ("POST", "/undo_all_logs") => self.handle_undo_all(body),
            ("GET", "/worklogs") => self.handle_worklogs(url),
            _ => Ok((404, json!({ "error": format!("no such route: {} {}", method, path) }))),
        }
    }

    fn handle_start(&self, body: &str) -> AppResult<(u16, Value)> {
        let req: StartBody = parse_body(body)?;
        match self.clock.set_start_time_manual(req.time.as_deref()) {
            Ok(_) => Ok((200, json!({ "status": "ok", "start_time": req.time }))),
            Err(e @ AppError::InvalidTime(_)) => {
                Ok((400, json!({ "status": "error", "message": e.to_string() })))
            }
            Err(e) => Err(e),
        }
    }

    fn handle_log(&self, body: &str) -> AppResult<(u16, Value)> {
        let req: LogBody = parse_body(body)?;
        self.client
            .log_work(&req.ticket, &req.hours, &req.comment, req.date.as_deref())?;
        // Once the worklog is posted, a failed close is reported in the
        // response and the clock reset still runs.
        let close_error = if wants_close(req.close.as_deref()) {
            self.client
                .close_ticket(&req.ticket)
                .err()
                .map(|e| e.to_string())
        } else {
            None
        };
        self.clock.set_start_time()?;
        Ok((
            200,
            json!({
                "status": "ok",
                "ticket": req.ticket,
                "hours": req.hours,
                "comment": req.comment,
                "close": req.close,
                "close_error": close_error,
                "date": req.date,
            }),
        ))
    }

    fn handle_close(&self, body: &str) -> AppResult<(u16, Value)> {
        let req: CloseBody = parse_body(body)?;
        self.client.close_ticket(&req.ticket)?;
        Ok((200, json!({ "status": "ok", "ticket": req.ticket, "date": req.date })))
    }

    fn handle_tickets(&self) -> AppResult<(u16, Value)> {
        let hierarchy = self.client.get_open_tickets()?;
        Ok((200, json!({ "tickets": hierarchy })))
    }

    fn handle_commit(&self, body: &str) -> AppResult<(u16, Value)> {
        let req: CommitBody = parse_body(body)?;
        let parser = CommitParser::new(&self.clock, self.cfg.round_minutes, self.cfg.min_log_minutes);
        let extraction = parser.extract(&req.commit_msg)?;
        let comment = format!("On commit: {}", extract_comment(&req.commit_msg));
        match extraction {
            Extraction::Loggable(cmd) => {
                self.client
                    .log_work(&cmd.ticket, &cmd.duration, &comment, req.date.as_deref())?;
                let close_error = if cmd.close {
                    self.client
                        .close_ticket(&cmd.ticket)
                        .err()
                        .map(|e| e.to_string())
                } else {
                    None
                };
                self.clock.set_start_time()?;
                Ok((
                    200,
                    json!({
                        "status": "ok",
                        "ticket": cmd.ticket,
                        "hours": cmd.duration,
                        "close_error": close_error,
                        "date": req.date,
                    }),
                ))
            }
            Extraction::Unloggable => Ok((
                400,
                json!({ "status": "error", "message": "Could not extract ticket/hours" }),
            )),
        }
    }

    fn handle_hours(&self, url: &str) -> AppResult<(u16, Value)> {
        let date = query_param(url, "date");
        let hours = self.client.get_hours_logged(date.as_deref())?;
        Ok((200, json!({ "hours": hours, "date": date })))
    }

    fn handle_undo_last(&self, body: &str) -> AppResult<(u16, Value)> {
        let req: DateBody = parse_body(body)?;
        let outcome = self.client.delete_last_worklog(req.date.as_deref())?;
        Ok((200, serde_json::to_value(outcome)?))
    }

    fn handle_undo_all(&self, body: &str) -> AppResult<(u16, Value)> {
        let req: DateBody = parse_body(body)?;
        let outcome = self.client.delete_all_worklogs(req.date.as_deref())?;
        Ok((200, serde_json::to_value(outcome)?))
    }

    fn handle_worklogs(&self, url: &str) -> AppResult<(u16, Value)> {
        let date = query_param(url, "date");
        let logs = self.client.get_all_worklogs(date.as_deref())?;
        Ok((200, json!({ "worklogs": logs, "date": date })))
    }
}

/// Empty POST bodies are treated as `{}` so date-less undo calls work.
fn parse_body<T: for<'de> Deserialize<'de>>(body: &str) -> AppResult<T> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    Ok(serde_json::from_str(body)?)
}

fn wants_close(flag: Option<&str>) -> bool {
    matches!(
        flag.map(str::to_lowercase).as_deref(),
        Some("c") | Some("y") | Some("true")
    )
}

fn query_param(url: &str, name: &str) -> Option<String> {
    let query = url.split_once('?')?.1;
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == name && !v.is_empty() {
            Some(v.to_string())
        } else {
            None
        }
    })
}

fn respond(request: tiny_http::Request, status: u16, payload: &Value) {
    let body = payload.to_string();
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .expect("static header is valid");
    let response = Response::from_string(body)
        .with_status_code(status)
        .with_header(header);
    if let Err(e) = request.respond(response) {
        messages::warning(format!("Failed to send response: {}", e));
    }
}
