//! # Register Coordinator
//!
//! Drives one till transition end to end: fetch the catalog, decide the
//! reconciliation, submit the accepted count to the session gateway.
//!
//! ## Transition Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Coordinator Operations                              │
//! │                                                                         │
//! │  Operator input                     RegisterCoordinator                 │
//! │  ──────────────                     ───────────────────                 │
//! │                                                                         │
//! │  declared + counts ──preview──────► live Evaluation (no decision)       │
//! │                                                                         │
//! │  declared + counts ──open_register──► catalog ► decide ► open_session   │
//! │                                                                         │
//! │  session id +                                                           │
//! │  declared + counts ──close_register─► catalog ► decide ► close_session  │
//! │                                                                         │
//! │  A rejected decision returns before the gateway is called: session      │
//! │  state is never touched by a failed count.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use cashup_core::{
    default_tolerance, DenominationCounts, Evaluation, Money, Reconciliation,
    ReconciliationAttempt, RegisterMode,
};

use crate::catalog::DenominationCatalog;
use crate::error::RegisterResult;
use crate::session::{RegisterSession, SessionGateway, SessionSubmission};

/// Orchestrates register transitions over a catalog and a session gateway.
pub struct RegisterCoordinator<C, G> {
    catalog: C,
    gateway: G,
    tolerance: Money,
}

impl<C, G> RegisterCoordinator<C, G>
where
    C: DenominationCatalog,
    G: SessionGateway,
{
    /// Creates a coordinator at the default balance tolerance.
    pub fn new(catalog: C, gateway: G) -> Self {
        RegisterCoordinator {
            catalog,
            gateway,
            tolerance: default_tolerance(),
        }
    }

    /// Overrides the balance tolerance for every attempt this coordinator
    /// builds.
    pub fn with_tolerance(mut self, tolerance: Money) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The tolerance in force.
    pub fn tolerance(&self) -> Money {
        self.tolerance
    }

    /// The session gateway, for inspection.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Live evaluation of the count sheet, for keeping the submit action
    /// disabled while the drawer is out of balance. Decides nothing.
    pub async fn preview(
        &self,
        mode: RegisterMode,
        declared_input: &str,
        counts: &DenominationCounts,
    ) -> RegisterResult<Evaluation> {
        let catalog = self.catalog.denominations().await?;
        let attempt = ReconciliationAttempt::new(mode, declared_input, counts.clone())
            .with_tolerance(self.tolerance);

        Ok(attempt.preview(&catalog))
    }

    /// Opens the register with the given opening count.
    pub async fn open_register(
        &self,
        declared_input: &str,
        counts: DenominationCounts,
        notes: Option<String>,
    ) -> RegisterResult<RegisterSession> {
        debug!("open_register requested");

        let reconciliation = self
            .reconcile(RegisterMode::Opening, declared_input, counts)
            .await?;
        let submission = SessionSubmission::from_reconciliation(reconciliation, notes);
        let session = self.gateway.open_session(&submission).await?;

        info!(
            session_id = %session.id,
            declared = %submission.declared_balance,
            "Register opened"
        );

        Ok(session)
    }

    /// Closes the given session with the closing count.
    pub async fn close_register(
        &self,
        session_id: &str,
        declared_input: &str,
        counts: DenominationCounts,
        notes: Option<String>,
    ) -> RegisterResult<RegisterSession> {
        debug!(session_id = %session_id, "close_register requested");

        let reconciliation = self
            .reconcile(RegisterMode::Closing, declared_input, counts)
            .await?;
        let submission = SessionSubmission::from_reconciliation(reconciliation, notes);
        let session = self.gateway.close_session(session_id, &submission).await?;

        info!(
            session_id = %session.id,
            declared = %submission.declared_balance,
            "Register closed"
        );

        Ok(session)
    }

    /// Fetches the catalog and decides one attempt.
    async fn reconcile(
        &self,
        mode: RegisterMode,
        declared_input: &str,
        counts: DenominationCounts,
    ) -> RegisterResult<Reconciliation> {
        let catalog = self.catalog.denominations().await?;
        let reconciliation = ReconciliationAttempt::new(mode, declared_input, counts)
            .with_tolerance(self.tolerance)
            .decide(&catalog)?;

        debug!(
            mode = %reconciliation.mode,
            declared = %reconciliation.declared,
            calculated = %reconciliation.calculated,
            difference = %reconciliation.difference,
            lines = reconciliation.breakdown.len(),
            "Reconciliation accepted"
        );

        Ok(reconciliation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::error::RegisterError;
    use crate::session::{InMemorySessionGateway, SessionStatus};
    use cashup_core::{Denomination, DenominationKind, ReconcileError};

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(vec![
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
            Denomination {
                id: 3,
                name: "Rs 10 coin".to_string(),
                value: Money::parse("10").unwrap(),
                kind: DenominationKind::Coin,
                sort_order: 3,
            },
        ])
        .unwrap()
    }

    fn coordinator() -> RegisterCoordinator<StaticCatalog, InMemorySessionGateway> {
        RegisterCoordinator::new(catalog(), InMemorySessionGateway::new())
    }

    fn counts(pairs: &[(i64, u32)]) -> DenominationCounts {
        pairs.iter().copied().collect()
    }

    #[tokio::test]
    async fn test_open_close_cycle() {
        let coordinator = coordinator();

        let opened = coordinator
            .open_register("13000", counts(&[(1, 2), (2, 3)]), None)
            .await
            .unwrap();
        assert!(opened.is_open());

        let closed = coordinator
            .close_register(&opened.id, "7000", counts(&[(1, 1), (2, 2)]), None)
            .await
            .unwrap();
        assert_eq!(closed.status, SessionStatus::Closed);
        assert_eq!(
            closed.closing_balance,
            Some(Money::parse("7000").unwrap())
        );
    }

    #[tokio::test]
    async fn test_rejection_reaches_caller_and_spares_the_gateway() {
        let coordinator = coordinator();

        let err = coordinator
            .open_register("13000", counts(&[(1, 2)]), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegisterError::Reconcile(ReconcileError::Unbalanced { .. })
        ));

        // no session was created by the failed count
        assert!(coordinator.gateway().sessions().await.is_empty());
    }

    #[tokio::test]
    async fn test_preview_drives_the_submit_guard() {
        let coordinator = coordinator();
        let sheet = counts(&[(1, 2)]);

        let evaluation = coordinator
            .preview(RegisterMode::Opening, "13000", &sheet)
            .await
            .unwrap();
        assert!(!evaluation.is_balanced);
        assert_eq!(evaluation.difference, Money::parse("3000").unwrap());

        let corrected = coordinator
            .preview(RegisterMode::Opening, "10000", &sheet)
            .await
            .unwrap();
        assert!(corrected.is_balanced);
    }

    #[tokio::test]
    async fn test_coin_counts_ignored_through_the_full_stack() {
        let coordinator = coordinator();

        // 500 Rs-10 coins would add 5000 if counted
        let opened = coordinator
            .open_register("13000", counts(&[(1, 2), (2, 3), (3, 500)]), None)
            .await
            .unwrap();
        assert_eq!(opened.opening_balance, Money::parse("13000").unwrap());
    }

    #[tokio::test]
    async fn test_widened_tolerance_applies_to_every_attempt() {
        let coordinator = RegisterCoordinator::new(catalog(), InMemorySessionGateway::new())
            .with_tolerance(Money::parse("1").unwrap());

        let opened = coordinator
            .open_register("10000.50", counts(&[(1, 2)]), None)
            .await
            .unwrap();
        assert_eq!(opened.opening_balance, Money::parse("10000.50").unwrap());
    }

    #[tokio::test]
    async fn test_close_of_unknown_session_surfaces_gateway_error() {
        let coordinator = coordinator();

        let err = coordinator
            .close_register("missing-id", "13000", counts(&[(1, 2), (2, 3)]), None)
            .await
            .unwrap_err();
        assert!(matches!(err, RegisterError::SessionNotFound { .. }));
    }
}
