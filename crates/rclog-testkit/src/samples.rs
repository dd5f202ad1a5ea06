//! Response bodies shaped like the real API.

use rclog_core::LogEntry;

/// A system log page as the API serves it, newest first.
pub const SYSTEM_PAGE: &str = r#"{
  "entries": [
    {
      "id": 2310,
      "time": "2024-03-01T10:15:30Z",
      "originator": "Jane Doe",
      "apiKeyName": "ci-deploy",
      "resource": "database/1204",
      "type": "Database",
      "description": "Database \"cache\" updated"
    },
    {
      "id": 2309,
      "time": "2024-03-01T09:58:02Z",
      "originator": "Jane Doe",
      "resource": "subscription/88",
      "type": "Subscription",
      "description": "Subscription created"
    },
    {
      "id": 2307,
      "time": "2024-03-01T09:40:11Z",
      "description": "Maintenance window scheduled"
    }
  ],
  "links": []
}"#;

/// A session log page as the API serves it, newest first.
pub const SESSION_PAGE: &str = r#"{
  "entries": [
    {
      "id": "f1b6d3c2-9a0e-4d7b-8a55-3c1e2b7d9f10",
      "time": "2024-03-01T10:20:00Z",
      "user": "jane@example.com",
      "userAgent": "Mozilla/5.0 (X11; Linux x86_64)",
      "ipAddress": "203.0.113.7",
      "userRole": "Owner",
      "type": "Web",
      "action": "Logout"
    },
    {
      "id": "0a7e44b1-35c2-4f0b-9d7e-6b2a8c1f0e33",
      "time": "2024-03-01T09:05:12Z",
      "user": "jane@example.com",
      "userAgent": "Mozilla/5.0 (X11; Linux x86_64)",
      "ipAddress": "203.0.113.7",
      "userRole": "Owner",
      "type": "Web",
      "action": "Login"
    }
  ]
}"#;

/// A page past the end of the log.
pub const EMPTY_PAGE: &str = r#"{"entries":[]}"#;

/// Render `entries` as an API response body.
pub fn page_body<E: LogEntry>(entries: &[E]) -> String {
    serde_json::json!({ "entries": entries }).to_string()
}
