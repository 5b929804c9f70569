//! # Register Sessions
//!
//! The session gateway is the produced-to collaborator: an accepted
//! reconciliation becomes a submission against the register-session
//! transition endpoint. In production that endpoint lives in the store
//! backend; here the seam is an async trait with an in-memory gateway used
//! by tests and the drill binary.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Register Session Lifecycle                           │
//! │                                                                         │
//! │   open_session(submission)           close_session(id, submission)      │
//! │            │                                   │                        │
//! │            ▼                                   ▼                        │
//! │   ┌─────────────────┐                ┌─────────────────┐                │
//! │   │      OPEN       │ ─────────────► │     CLOSED      │                │
//! │   │  opened_at set  │                │  closed_at set  │                │
//! │   │ opening_balance │                │ closing_balance │                │
//! │   └─────────────────┘                └─────────────────┘                │
//! │                                                                         │
//! │   Rules enforced by the gateway:                                        │
//! │   • at most one OPEN session at a time (SessionAlreadyOpen)             │
//! │   • closing an unknown id fails (SessionNotFound)                       │
//! │   • closing a CLOSED session fails (InvalidSessionStatus)               │
//! │   • a rejected submission never mutates stored sessions                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use cashup_core::{Breakdown, Money, Reconciliation};

use crate::error::{RegisterError, RegisterResult};

// =============================================================================
// Session Status
// =============================================================================

/// Status of a register session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// The till is trading.
    Open,

    /// The till has been counted out and closed.
    Closed,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Open => write!(f, "open"),
            SessionStatus::Closed => write!(f, "closed"),
        }
    }
}

// =============================================================================
// Register Session
// =============================================================================

/// A till trading session, bracketed by an opening and a closing count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSession {
    /// Session ID (UUID v4).
    pub id: String,

    /// Current status.
    pub status: SessionStatus,

    /// When the session was opened.
    pub opened_at: DateTime<Utc>,

    /// Declared balance at opening.
    pub opening_balance: Money,

    /// When the session was closed, if it has been.
    pub closed_at: Option<DateTime<Utc>>,

    /// Declared balance at closing, if it has been.
    pub closing_balance: Option<Money>,
}

impl RegisterSession {
    /// Returns true while the session is trading.
    pub fn is_open(&self) -> bool {
        self.status == SessionStatus::Open
    }
}

// =============================================================================
// Session Submission
// =============================================================================

/// The wire payload for a session transition.
///
/// Serializes to exactly what the transition endpoint expects:
/// ```json
/// {
///   "declaredBalance": "13000.00",
///   "denominationBreakdown": [
///     { "denominationId": 1, "quantity": 2, "amount": "10000.00" }
///   ],
///   "notes": "Morning shift"
/// }
/// ```
/// `notes` is omitted entirely when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSubmission {
    /// Declared balance as entered by the operator, exact.
    pub declared_balance: Money,

    /// Counted note lines, quantity > 0, catalog order.
    pub denomination_breakdown: Breakdown,

    /// Free-text operator note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SessionSubmission {
    /// Builds the wire payload from an accepted reconciliation.
    pub fn from_reconciliation(reconciliation: Reconciliation, notes: Option<String>) -> Self {
        SessionSubmission {
            declared_balance: reconciliation.declared,
            denomination_breakdown: reconciliation.breakdown,
            notes,
        }
    }
}

// =============================================================================
// Session Gateway
// =============================================================================

/// The register-session transition endpoint.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Opens a new trading session with the given opening count.
    async fn open_session(&self, submission: &SessionSubmission)
        -> RegisterResult<RegisterSession>;

    /// Closes the session with the given closing count.
    async fn close_session(
        &self,
        session_id: &str,
        submission: &SessionSubmission,
    ) -> RegisterResult<RegisterSession>;
}

// =============================================================================
// In-Memory Gateway
// =============================================================================

/// Reference gateway holding sessions in memory.
///
/// ## Thread Safety
/// Sessions live behind a `tokio::sync::Mutex` because concurrent open and
/// close calls must observe the one-open-session rule atomically.
#[derive(Debug, Default)]
pub struct InMemorySessionGateway {
    sessions: Mutex<Vec<RegisterSession>>,
}

impl InMemorySessionGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored session, for inspection.
    pub async fn sessions(&self) -> Vec<RegisterSession> {
        self.sessions.lock().await.clone()
    }
}

#[async_trait]
impl SessionGateway for InMemorySessionGateway {
    async fn open_session(
        &self,
        submission: &SessionSubmission,
    ) -> RegisterResult<RegisterSession> {
        let mut sessions = self.sessions.lock().await;

        if let Some(open) = sessions.iter().find(|s| s.is_open()) {
            return Err(RegisterError::SessionAlreadyOpen {
                id: open.id.clone(),
            });
        }

        let session = RegisterSession {
            id: Uuid::new_v4().to_string(),
            status: SessionStatus::Open,
            opened_at: Utc::now(),
            opening_balance: submission.declared_balance,
            closed_at: None,
            closing_balance: None,
        };
        sessions.push(session.clone());

        Ok(session)
    }

    async fn close_session(
        &self,
        session_id: &str,
        submission: &SessionSubmission,
    ) -> RegisterResult<RegisterSession> {
        let mut sessions = self.sessions.lock().await;

        let session = sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| RegisterError::SessionNotFound {
                id: session_id.to_string(),
            })?;

        if session.status != SessionStatus::Open {
            return Err(RegisterError::InvalidSessionStatus {
                id: session.id.clone(),
                status: session.status,
            });
        }

        session.status = SessionStatus::Closed;
        session.closed_at = Some(Utc::now());
        session.closing_balance = Some(submission.declared_balance);

        Ok(session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashup_core::{
        Denomination, DenominationCounts, DenominationKind, ReconciliationAttempt, RegisterMode,
    };
    use serde_json::json;

    fn catalog() -> Vec<Denomination> {
        vec![
            Denomination {
                id: 1,
                name: "Rs 5000 note".to_string(),
                value: Money::parse("5000").unwrap(),
                kind: DenominationKind::Note,
                sort_order: 1,
            },
            Denomination {
                id: 2,
                name: "Rs 1000 note".to_string(),
                value: Money::parse("1000").unwrap(),
                kind: DenominationKind::Note,
                sort_order: 2,
            },
        ]
    }

    fn submission(mode: RegisterMode, declared: &str, notes: Option<&str>) -> SessionSubmission {
        let counts: DenominationCounts = [(1, 2), (2, 3)].into_iter().collect();
        let reconciliation = ReconciliationAttempt::new(mode, declared, counts)
            .decide(&catalog())
            .unwrap();

        SessionSubmission::from_reconciliation(reconciliation, notes.map(String::from))
    }

    #[test]
    fn test_submission_wire_shape() {
        let submission = submission(RegisterMode::Opening, "13000.00", Some("Morning shift"));

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            value,
            json!({
                "declaredBalance": "13000.00",
                "denominationBreakdown": [
                    { "denominationId": 1, "quantity": 2, "amount": "10000.00" },
                    { "denominationId": 2, "quantity": 3, "amount": "3000.00" },
                ],
                "notes": "Morning shift",
            })
        );
    }

    #[test]
    fn test_submission_omits_absent_notes() {
        let submission = submission(RegisterMode::Opening, "13000.00", None);

        let value = serde_json::to_value(&submission).unwrap();
        assert!(value.get("notes").is_none());
    }

    #[tokio::test]
    async fn test_open_then_close_cycle() {
        let gateway = InMemorySessionGateway::new();

        let opened = gateway
            .open_session(&submission(RegisterMode::Opening, "13000.00", None))
            .await
            .unwrap();
        assert!(opened.is_open());
        assert_eq!(opened.opening_balance, Money::parse("13000").unwrap());
        assert!(opened.closed_at.is_none());

        let closed = gateway
            .close_session(
                &opened.id,
                &submission(RegisterMode::Closing, "13000.00", None),
            )
            .await
            .unwrap();
        assert_eq!(closed.status, SessionStatus::Closed);
        assert!(closed.closed_at.is_some());
        assert_eq!(closed.closing_balance, Some(Money::parse("13000").unwrap()));
    }

    #[tokio::test]
    async fn test_only_one_open_session_at_a_time() {
        let gateway = InMemorySessionGateway::new();
        let payload = submission(RegisterMode::Opening, "13000.00", None);

        let opened = gateway.open_session(&payload).await.unwrap();

        let err = gateway.open_session(&payload).await.unwrap_err();
        match err {
            RegisterError::SessionAlreadyOpen { id } => assert_eq!(id, opened.id),
            other => panic!("expected SessionAlreadyOpen, got {:?}", other),
        }

        // closing frees the till for the next session
        gateway.close_session(&opened.id, &payload).await.unwrap();
        gateway.open_session(&payload).await.unwrap();
        assert_eq!(gateway.sessions().await.len(), 2);
    }

    #[tokio::test]
    async fn test_close_unknown_session() {
        let gateway = InMemorySessionGateway::new();
        let payload = submission(RegisterMode::Closing, "13000.00", None);

        let err = gateway.close_session("missing-id", &payload).await.unwrap_err();
        assert!(matches!(err, RegisterError::SessionNotFound { .. }));
    }

    #[tokio::test]
    async fn test_close_twice_reports_status() {
        let gateway = InMemorySessionGateway::new();
        let payload = submission(RegisterMode::Opening, "13000.00", None);

        let opened = gateway.open_session(&payload).await.unwrap();
        gateway.close_session(&opened.id, &payload).await.unwrap();

        let err = gateway
            .close_session(&opened.id, &payload)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegisterError::InvalidSessionStatus {
                status: SessionStatus::Closed,
                ..
            }
        ));
    }
}
