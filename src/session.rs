use std::collections::BTreeMap;

use leptos::prelude::*;
use serde::Deserialize;

use crate::api::types::{id_string, percentage};

/// Minimum completion before a USCIS form can be generated.
pub const FORM_GENERATION_THRESHOLD: u8 = 50;

/// Locally cached snapshot of an in-progress visa application.
///
/// Owned by the backend; the client never mutates it, only replaces it with
/// a fresher copy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionProgress {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub visa_type: String,
    /// Always within 0..=100, whatever the backend sent.
    #[serde(default, deserialize_with = "percentage")]
    pub completion_percentage: u8,
    #[serde(default)]
    pub answers: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl SessionProgress {
    pub fn can_generate_form(&self) -> bool {
        can_generate_form(self.completion_percentage)
    }

    /// Questions with a non-empty answer.
    pub fn answered_count(&self) -> usize {
        self.answers
            .values()
            .filter(|v| match v {
                serde_json::Value::Null => false,
                serde_json::Value::String(s) => !s.trim().is_empty(),
                serde_json::Value::Array(a) => !a.is_empty(),
                _ => true,
            })
            .count()
    }
}

#[derive(Debug, Deserialize)]
pub struct SessionEnvelope {
    pub session: SessionProgress,
}

pub fn can_generate_form(completion_percentage: u8) -> bool {
    completion_percentage >= FORM_GENERATION_THRESHOLD
}

/// Shared, observable session read by every view on the application page.
///
/// `current` names the session the visible page asked for. Replies for any
/// other key are stale and never reach `session`.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub session: RwSignal<Option<SessionProgress>>,
    current: RwSignal<Option<String>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(None),
            current: RwSignal::new(None),
        }
    }

    /// Completion of the current session, 0 when none is loaded.
    pub fn progress(&self) -> u8 {
        self.session
            .with(|s| s.as_ref().map(|s| s.completion_percentage).unwrap_or(0))
    }

    /// Switch to another session key, dropping whatever was loaded.
    pub fn track(&self, session_key: Option<String>) {
        let changed = self.current.with_untracked(|c| *c != session_key);
        if changed {
            self.current.set(session_key);
            self.session.set(None);
        }
    }

    /// Store a loaded session if it was requested for the tracked key.
    /// Returns false for stale replies.
    pub fn accept(&self, requested_key: &str, session: SessionProgress) -> bool {
        if !self.is_current(requested_key) {
            log::info!("Dropping stale session reply for {}", requested_key);
            return false;
        }
        self.session.set(Some(session));
        true
    }

    pub fn is_current(&self, session_key: &str) -> bool {
        self.current
            .with_untracked(|c| c.as_deref() == Some(session_key))
    }

    pub fn clear(&self) {
        self.track(None);
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(pct: u8) -> SessionProgress {
        SessionProgress {
            id: "s-1".to_string(),
            visa_type: "H1-B".to_string(),
            completion_percentage: pct,
            answers: BTreeMap::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_generation_gate_boundary() {
        assert!(!session(0).can_generate_form());
        assert!(!session(49).can_generate_form());
        assert!(session(50).can_generate_form());
        assert!(session(100).can_generate_form());
    }

    #[test]
    fn test_decode_clamps_and_reads_answers() {
        let json = r#"{
            "id": 12,
            "visa_type": "F1",
            "completion_percentage": -3,
            "answers": {"q1": "Boston University", "q2": "", "q3": null, "q4": ["a"], "q5": true},
            "created_at": "2026-09-01T10:00:00Z"
        }"#;
        let s: SessionProgress = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, "12");
        assert_eq!(s.completion_percentage, 0);
        assert_eq!(s.answers.len(), 5);
        assert_eq!(s.answered_count(), 3);
    }

    #[test]
    fn test_missing_percentage_defaults_to_zero() {
        let s: SessionProgress = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(s.completion_percentage, 0);
        assert!(!s.can_generate_form());
    }

    #[test]
    fn test_late_reply_for_previous_session_is_dropped() {
        let ctx = SessionContext::new();
        ctx.track(Some("a".to_string()));
        ctx.track(Some("b".to_string()));

        let mut b = session(30);
        b.id = "b".to_string();
        assert!(ctx.accept("b", b));

        let mut a = session(80);
        a.id = "a".to_string();
        assert!(!ctx.accept("a", a));

        let held = ctx.session.get_untracked().unwrap();
        assert_eq!(held.id, "b");
        assert_eq!(ctx.progress(), 30);
    }

    #[test]
    fn test_clear_forgets_session_and_key() {
        let ctx = SessionContext::new();
        ctx.track(Some("s-1".to_string()));
        assert!(ctx.accept("s-1", session(75)));

        ctx.clear();
        assert!(ctx.session.get_untracked().is_none());
        assert!(!ctx.accept("s-1", session(75)));
    }

    #[test]
    fn test_tracking_same_key_keeps_loaded_session() {
        let ctx = SessionContext::new();
        ctx.track(Some("s-1".to_string()));
        assert!(ctx.accept("s-1", session(60)));
        ctx.track(Some("s-1".to_string()));
        assert_eq!(ctx.progress(), 60);
    }
}
