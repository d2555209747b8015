//! Configuration validation with unknown field detection.

use serde_json::{Map, Value};
use std::collections::HashSet;

use super::UnitConfig;

/// Known top-level config field names.
const KNOWN_TOP_LEVEL: &[&str] = &["logging", "units"];

const KNOWN_LOGGING: &[&str] = &["format", "level", "file"];

const KNOWN_UNIT_TYPES: &[&str] = &["command", "tcp"];

const KNOWN_COMMAND_UNIT: &[&str] = &["type", "name", "command", "args", "alert_interval_secs"];

const KNOWN_TCP_UNIT: &[&str] = &[
    "type",
    "name",
    "host",
    "port",
    "connect_timeout_secs",
    "alert_interval_secs",
];

/// A validation diagnostic.
#[derive(Debug)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub path: String,
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub enum DiagnosticLevel {
    Ok,
    Warn,
    Error,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.level {
            DiagnosticLevel::Ok => "[OK]",
            DiagnosticLevel::Warn => "[WARN]",
            DiagnosticLevel::Error => "[ERROR]",
        };
        if self.path.is_empty() {
            write!(f, "{} {}", prefix, self.message)
        } else {
            write!(f, "{} {}: {}", prefix, self.path, self.message)
        }
    }
}

impl Diagnostic {
    fn new(level: DiagnosticLevel, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Simple Levenshtein distance for "did you mean?" suggestions.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            cur[j + 1] = (prev[j + 1] + 1).min(cur[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// Suggest the closest known field name (if distance <= 3).
pub fn suggest_field(unknown: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .map(|k| (k, levenshtein(unknown, k)))
        .filter(|(_, d)| *d <= 3)
        .min_by_key(|(_, d)| *d)
        .map(|(k, _)| format!("did you mean '{}'?", k))
}

/// Report keys of `obj` not in `known`. Returns true if any were found.
fn check_keys(
    obj: &Map<String, Value>,
    known: &[&str],
    prefix: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> bool {
    let known_set: HashSet<&str> = known.iter().copied().collect();
    let mut has_unknown = false;
    for key in obj.keys() {
        if known_set.contains(key.as_str()) {
            continue;
        }
        has_unknown = true;
        let msg = match suggest_field(key, known) {
            Some(suggestion) => format!("Unknown field '{}' ({})", key, suggestion),
            None => format!("Unknown field '{}'", key),
        };
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        diagnostics.push(Diagnostic::new(DiagnosticLevel::Error, path, msg));
    }
    has_unknown
}

/// Validate a raw JSON config value.
pub fn validate_config(raw: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let obj = match raw.as_object() {
        Some(o) => o,
        None => {
            diagnostics.push(Diagnostic::new(
                DiagnosticLevel::Error,
                "",
                "Config must be a JSON object",
            ));
            return diagnostics;
        }
    };

    diagnostics.push(Diagnostic::new(DiagnosticLevel::Ok, "", "Valid JSON"));

    let mut has_unknown = check_keys(obj, KNOWN_TOP_LEVEL, "", &mut diagnostics);

    if let Some(logging) = obj.get("logging").and_then(|v| v.as_object()) {
        has_unknown |= check_keys(logging, KNOWN_LOGGING, "logging", &mut diagnostics);
    }

    match obj.get("units") {
        None => diagnostics.push(Diagnostic::new(
            DiagnosticLevel::Warn,
            "units",
            "No units defined; nothing will be launched",
        )),
        Some(Value::Array(units)) => {
            has_unknown |= validate_units(units, &mut diagnostics);
        }
        Some(_) => diagnostics.push(Diagnostic::new(
            DiagnosticLevel::Error,
            "units",
            "Must be an array",
        )),
    }

    if !has_unknown {
        diagnostics.push(Diagnostic::new(
            DiagnosticLevel::Ok,
            "",
            "All fields recognized",
        ));
    }

    diagnostics
}

fn validate_units(units: &[Value], diagnostics: &mut Vec<Diagnostic>) -> bool {
    let mut has_unknown = false;
    let mut seen: HashSet<String> = HashSet::new();

    for (i, unit) in units.iter().enumerate() {
        let path = format!("units[{}]", i);
        let Some(unit_obj) = unit.as_object() else {
            diagnostics.push(Diagnostic::new(DiagnosticLevel::Error, path, "Must be an object"));
            continue;
        };

        let known = match unit_obj.get("type").and_then(|v| v.as_str()) {
            Some("command") => KNOWN_COMMAND_UNIT,
            Some("tcp") => KNOWN_TCP_UNIT,
            Some(other) => {
                let hint = suggest_field(other, KNOWN_UNIT_TYPES)
                    .map(|s| format!(" ({})", s))
                    .unwrap_or_default();
                diagnostics.push(Diagnostic::new(
                    DiagnosticLevel::Error,
                    format!("{}.type", path),
                    format!("Unknown unit type '{}'{}", other, hint),
                ));
                continue;
            }
            None => {
                diagnostics.push(Diagnostic::new(
                    DiagnosticLevel::Error,
                    format!("{}.type", path),
                    "Missing unit type (expected \"command\" or \"tcp\")",
                ));
                continue;
            }
        };
        has_unknown |= check_keys(unit_obj, known, &path, diagnostics);

        let parsed: UnitConfig = match serde_json::from_value(unit.clone()) {
            Ok(u) => u,
            Err(e) => {
                diagnostics.push(Diagnostic::new(DiagnosticLevel::Error, path, e.to_string()));
                continue;
            }
        };

        let name = parsed.name();
        if name.trim().is_empty() {
            diagnostics.push(Diagnostic::new(
                DiagnosticLevel::Error,
                format!("{}.name", path),
                "Must not be empty",
            ));
        } else if !seen.insert(name.to_string()) {
            diagnostics.push(Diagnostic::new(
                DiagnosticLevel::Warn,
                format!("{}.name", path),
                format!("Duplicate unit name '{}'; alerts will be ambiguous", name),
            ));
        }

        if let UnitConfig::Command { command, .. } = &parsed {
            if command.trim().is_empty() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticLevel::Error,
                    format!("{}.command", path),
                    "Must not be empty",
                ));
            }
        }

        if unit_obj.get("alert_interval_secs").and_then(|v| v.as_u64()) == Some(0) {
            diagnostics.push(Diagnostic::new(
                DiagnosticLevel::Warn,
                format!("{}.alert_interval_secs", path),
                "Zero means the default interval",
            ));
        }
    }

    has_unknown
}
