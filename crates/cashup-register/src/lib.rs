//! # cashup-register: Session Coordination for Cashup
//!
//! This crate wraps the pure reconciliation engine with everything a till
//! transition needs: the denomination catalog, the session gateway, the
//! coordinator that drives one transition end to end, and configuration.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cashup Transition Flow                           │
//! │                                                                         │
//! │  Operator submits a count (drill binary, till UI host)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  cashup-register (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌───────────────┐  │   │
//! │  │   │  Coordinator  │   │    Catalog     │   │    Config     │  │   │
//! │  │   │ open/close/   │◄──│ Denomination   │◄──│ register.toml │  │   │
//! │  │   │ preview       │   │ Catalog trait  │   │ till + drawer │  │   │
//! │  │   └───────┬───────┘   └────────────────┘   └───────────────┘  │   │
//! │  │           │                                                    │   │
//! │  │           │ decide (cashup-core, pure)                         │   │
//! │  │           ▼                                                    │   │
//! │  │   ┌───────────────┐                                            │   │
//! │  │   │SessionGateway │  open_session / close_session              │   │
//! │  │   │    trait      │                                            │   │
//! │  │   └───────────────┘                                            │   │
//! │  └───────────│─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │  Register-session endpoint (store backend; in-memory here)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`catalog`] - Denomination catalog trait and static implementation
//! - [`session`] - Session records, submission payload, gateway trait
//! - [`coordinator`] - One till transition, end to end
//! - [`config`] - TOML configuration (till, tolerance, drawer)
//! - [`error`] - Register error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cashup_register::{InMemorySessionGateway, RegisterConfig, RegisterCoordinator};
//!
//! let config = RegisterConfig::load(Some("register.toml".into()))?;
//! let coordinator = RegisterCoordinator::new(config.catalog()?, InMemorySessionGateway::new())
//!     .with_tolerance(config.tolerance()?);
//!
//! let session = coordinator.open_register("13000", counts, None).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{DenominationCatalog, StaticCatalog};
pub use config::{DenominationRow, RegisterConfig, TillConfig};
pub use coordinator::RegisterCoordinator;
pub use error::{RegisterError, RegisterResult};
pub use session::{
    InMemorySessionGateway, RegisterSession, SessionGateway, SessionStatus, SessionSubmission,
};
