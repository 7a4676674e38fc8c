//! Exchange history tracking for debugging and diagnostics.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapter::Method;

/// Direction of a recorded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Send,
    Receive,
}

/// A recorded request or response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub msg_type: MessageType,
    pub method: Method,
    pub path: String,
    /// Request body or decoded response; `null` for bodiless requests.
    pub message: Value,
    /// Seconds since history creation
    pub timestamp: f64,
}

/// Tracks the latest exchanges of a transport.
#[derive(Debug, Clone)]
pub struct MessageHistory {
    latest: HashMap<MessageType, HashMap<String, Value>>,
    last_error: Option<String>,
    start_time: Instant,
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageHistory {
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    pub fn new() -> Self {
        Self {
            latest: HashMap::from([
                (MessageType::Send, HashMap::new()),
                (MessageType::Receive, HashMap::new()),
            ]),
            last_error: None,
            start_time: Instant::now(),
            entries: VecDeque::new(),
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::new()
        }
    }

    pub fn record(&mut self, msg_type: MessageType, method: Method, path: &str, message: &Value) {
        if let Some(type_map) = self.latest.get_mut(&msg_type) {
            type_map.insert(format!("{method} {path}"), message.clone());
        }

        self.entries.push_back(HistoryEntry {
            msg_type,
            method,
            path: path.to_string(),
            message: message.clone(),
            timestamp: self.start_time.elapsed().as_secs_f64(),
        });

        while self.entries.len() > self.max_entries {
            if let Some(evicted) = self.entries.pop_front() {
                self.forget_if_unreferenced(&evicted);
            }
        }
    }

    /// Drop the latest-message slot of an evicted entry once no retained
    /// entry shares its direction and endpoint.
    fn forget_if_unreferenced(&mut self, evicted: &HistoryEntry) {
        let still_referenced = self.entries.iter().any(|e| {
            e.msg_type == evicted.msg_type && e.method == evicted.method && e.path == evicted.path
        });
        if still_referenced {
            return;
        }
        if let Some(type_map) = self.latest.get_mut(&evicted.msg_type) {
            type_map.remove(&format!("{} {}", evicted.method, evicted.path));
        }
    }

    pub fn record_error(&mut self, error: &str) {
        self.last_error = Some(error.to_string());
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Latest message of the given direction for `"METHOD path"`.
    pub fn latest(&self, msg_type: MessageType, method: Method, path: &str) -> Option<&Value> {
        self.latest
            .get(&msg_type)
            .and_then(|m| m.get(&format!("{method} {path}")))
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.latest.values_mut().for_each(|m| m.clear());
        self.entries.clear();
        self.last_error = None;
    }

    pub fn summary(&self) -> HistorySummary {
        let count = |t: MessageType| self.latest.get(&t).map_or(0, |m| m.len());
        HistorySummary {
            send_count: count(MessageType::Send),
            receive_count: count(MessageType::Receive),
            total_entries: self.entries.len(),
            last_error: self.last_error.clone(),
        }
    }
}

/// Summary of exchange history for diagnostics.
///
/// Counts are distinct endpoints among the retained entries, so neither
/// exceeds `total_entries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    pub send_count: usize,
    pub receive_count: usize,
    pub total_entries: usize,
    pub last_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_message() {
        let mut history = MessageHistory::new();
        history.record(
            MessageType::Send,
            Method::Put,
            "/api/user/lights/1/state",
            &json!({"on": true}),
        );

        assert_eq!(history.len(), 1);
        assert_eq!(
            history.latest(MessageType::Send, Method::Put, "/api/user/lights/1/state"),
            Some(&json!({"on": true}))
        );
        assert_eq!(
            history.latest(MessageType::Receive, Method::Put, "/api/user/lights/1/state"),
            None
        );
    }

    #[test]
    fn test_record_error() {
        let mut history = MessageHistory::new();
        history.record_error("Connection refused");
        assert_eq!(history.last_error(), Some("Connection refused"));
    }

    #[test]
    fn test_max_entries() {
        let mut history = MessageHistory::with_max_entries(2);
        for i in 0..5 {
            history.record(
                MessageType::Send,
                Method::Get,
                &format!("/api/user/lights/{i}"),
                &Value::Null,
            );
        }
        assert_eq!(history.len(), 2);
        assert_eq!(
            history.entries().next().map(|e| e.path.as_str()),
            Some("/api/user/lights/3")
        );

        let summary = history.summary();
        assert_eq!(summary.send_count, 2);
        assert_eq!(summary.total_entries, 2);
        assert_eq!(
            history.latest(MessageType::Send, Method::Get, "/api/user/lights/0"),
            None
        );
    }

    #[test]
    fn test_latest_is_bounded_by_retained_entries() {
        let mut history = MessageHistory::with_max_entries(2);
        for i in 0..1000 {
            history.record(
                MessageType::Receive,
                Method::Get,
                &format!("/api/user/lights/{i}"),
                &json!({"id": i}),
            );
        }

        let summary = history.summary();
        assert_eq!(summary.total_entries, 2);
        assert_eq!(summary.receive_count, 2);
        assert_eq!(
            history.latest(MessageType::Receive, Method::Get, "/api/user/lights/999"),
            Some(&json!({"id": 999}))
        );
        assert_eq!(
            history.latest(MessageType::Receive, Method::Get, "/api/user/lights/997"),
            None
        );
    }

    #[test]
    fn test_repeated_endpoint_survives_eviction() {
        let mut history = MessageHistory::with_max_entries(2);
        history.record(MessageType::Send, Method::Get, "/api/user/config", &json!(1));
        history.record(MessageType::Send, Method::Get, "/api/user/config", &json!(2));
        history.record(MessageType::Send, Method::Get, "/api/user/lights", &json!(3));

        assert_eq!(
            history.latest(MessageType::Send, Method::Get, "/api/user/config"),
            Some(&json!(2))
        );
        assert_eq!(history.summary().send_count, 2);
    }

    #[test]
    fn test_clear() {
        let mut history = MessageHistory::new();
        history.record(MessageType::Receive, Method::Get, "/api/none/config", &json!({}));
        history.record_error("boom");
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.last_error(), None);
        assert_eq!(history.summary().receive_count, 0);
    }
}
