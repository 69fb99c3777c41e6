// Method dispatcher: the six bus methods of the `ubm` object.
// Every call refreshes the shared snapshot as needed, then encodes a JSON document.
// A section that could not be read is reported as `<section>_msg`; the call still succeeds.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::Section;
use crate::snapshot::SnapshotManager;

/// Marker value for a section whose source could not be read.
pub const FAILED_TO_OBTAIN: &str = "failed to obtain";
/// Reply when required arguments are missing or have the wrong type.
pub const ARGUMENT_ERROR: &str = "failed to parse provided fields";
pub const LOOKUP_FAILED: &str = "failed to lookup";
pub const SIGNAL_SENT: &str = "signal sent";

/// Structured reply for one call.
pub type Response = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Info,
    Cpu,
    Mem,
    Net,
    Signal,
    Lookup,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Self::Info,
        Self::Cpu,
        Self::Mem,
        Self::Net,
        Self::Signal,
        Self::Lookup,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Cpu => "cpu",
            Self::Mem => "mem",
            Self::Net => "net",
            Self::Signal => "signal",
            Self::Lookup => "lookup",
        }
    }

    /// Argument names, all int32.
    pub fn arguments(self) -> &'static [&'static str] {
        match self {
            Self::Signal => &[ARG_PID, ARG_SIGNAL],
            Self::Lookup => &[ARG_PID],
            _ => &[],
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown method `{0}`")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

const ARG_PID: &str = "pid";
const ARG_SIGNAL: &str = "sig_id";

#[derive(Debug, thiserror::Error)]
pub enum ArgumentError {
    #[error("argument `{0}` is missing or not an int32")]
    Missing(&'static str),
}

/// Reads an int32 argument. Wrong JSON types and out-of-range numbers count as missing.
fn int32_arg(args: &Value, name: &'static str) -> Result<i32, ArgumentError> {
    args.get(name)
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .ok_or(ArgumentError::Missing(name))
}

pub struct Dispatcher {
    manager: SnapshotManager,
}

impl Dispatcher {
    pub fn new(manager: SnapshotManager) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &SnapshotManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut SnapshotManager {
        &mut self.manager
    }

    /// Runs `method` with `args` (a JSON object; anything else means "no arguments").
    pub fn call(&mut self, method: Method, args: &Value) -> Response {
        tracing::debug!(method = %method, "dispatching");
        match method {
            Method::Info => self.info(),
            Method::Cpu => self.cpu(),
            Method::Mem => self.mem(),
            Method::Net => self.net(),
            Method::Signal => self.signal(args),
            Method::Lookup => self.lookup(args),
        }
    }

    pub fn info(&mut self) -> Response {
        let snapshot = self.manager.refresh_all();
        let mut response = Response::new();
        insert_section(&mut response, Section::Cpu, snapshot.cpu.as_ref());
        insert_section(&mut response, Section::Memory, snapshot.memory.as_ref());
        insert_section(&mut response, Section::Network, snapshot.network.as_ref());
        response.insert(
            "current_user".into(),
            Value::String(snapshot.current_user.clone()),
        );
        response.insert("uptime".into(), Value::String(self.manager.probe().uptime()));
        stamp(&mut response);
        response
    }

    pub fn cpu(&mut self) -> Response {
        let snapshot = self.manager.refresh_cpu();
        let mut response = Response::new();
        insert_section(&mut response, Section::Cpu, snapshot.cpu.as_ref());
        stamp(&mut response);
        response
    }

    pub fn mem(&mut self) -> Response {
        let snapshot = self.manager.refresh_section(Section::Memory);
        let mut response = Response::new();
        insert_section(&mut response, Section::Memory, snapshot.memory.as_ref());
        stamp(&mut response);
        response
    }

    /// Unlike `info`, the interface list is emitted at the top level.
    pub fn net(&mut self) -> Response {
        let snapshot = self.manager.refresh_section(Section::Network);
        let mut response = Response::new();
        match snapshot.network.as_ref().map(serde_json::to_value) {
            Some(Ok(Value::Object(fields))) => response.extend(fields),
            _ => insert_marker(&mut response, Section::Network),
        }
        stamp(&mut response);
        response
    }

    pub fn signal(&mut self, args: &Value) -> Response {
        self.manager.ensure_snapshot();
        let mut response = Response::new();
        let target = int32_arg(args, ARG_PID)
            .and_then(|pid| int32_arg(args, ARG_SIGNAL).map(|signal| (pid, signal)));
        match target {
            Ok((pid, signal)) => {
                let outcome = self.manager.probe().signal(pid, signal);
                let message = outcome.message().unwrap_or(SIGNAL_SENT);
                response.insert("response".into(), Value::String(message.to_string()));
            }
            Err(e) => {
                tracing::debug!(error = %e, method = "signal", "rejected arguments");
                response.insert("error".into(), Value::String(ARGUMENT_ERROR.into()));
            }
        }
        stamp(&mut response);
        response
    }

    pub fn lookup(&mut self, args: &Value) -> Response {
        self.manager.ensure_snapshot();
        let mut response = Response::new();
        match int32_arg(args, ARG_PID) {
            Ok(pid) => match self.manager.probe().lookup(pid) {
                Ok(record) => {
                    if let Ok(Value::Object(fields)) = serde_json::to_value(&record) {
                        response.extend(fields);
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, pid, "lookup failed");
                    response.insert("error".into(), Value::String(LOOKUP_FAILED.into()));
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, method = "lookup", "rejected arguments");
                response.insert("error".into(), Value::String(ARGUMENT_ERROR.into()));
            }
        }
        stamp(&mut response);
        response
    }
}

fn insert_section<T: Serialize>(response: &mut Response, section: Section, value: Option<&T>) {
    match value.map(serde_json::to_value) {
        Some(Ok(value)) => {
            response.insert(section.name().into(), value);
        }
        Some(Err(e)) => {
            tracing::warn!(error = %e, section = %section, "failed to encode section");
            insert_marker(response, section);
        }
        None => insert_marker(response, section),
    }
}

fn insert_marker(response: &mut Response, section: Section) {
    response.insert(
        format!("{}_msg", section.name()),
        Value::String(FAILED_TO_OBTAIN.into()),
    );
}

/// Adds `requested`, the Unix time the call was answered.
fn stamp(response: &mut Response) {
    response.insert(
        "requested".into(),
        Value::from(chrono::Utc::now().timestamp()),
    );
}
