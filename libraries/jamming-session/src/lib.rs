//! Jamming Session
//!
//! Session orchestration for building a playlist from catalog searches and
//! saving it to the user's account.
//!
//! # Components
//!
//! - **AuthorizationGate**: holds the bearer credential, starts the
//!   authorization redirect when it is missing or rejected
//! - **SearchAdapter**: runs catalog searches, separates token expiry from
//!   other failures
//! - **SelectionLedger**: ordered, duplicate-free selection plus its name
//! - **CommitOrchestrator**: resolve user, create playlist, append tracks
//! - **Session**: the facade the front-end drives
//!
//! # Example
//!
//! ```ignore
//! use jamming_session::{Session, SessionConfig};
//!
//! let mut session = Session::new(catalog, authorizer, SessionConfig::default());
//! session.start(grant);
//!
//! session.search("Daft Punk").await?;
//! let first = session.search_results()[0].clone();
//! session.add(first);
//! session.rename("My Mix");
//! session.commit().await?;
//! ```

mod commit;
mod error;
mod gate;
mod ledger;
mod search;
mod session;

pub use commit::{
    check_preconditions, CommitOrchestrator, CommitPhase, CommitReceipt, CommitTicket,
};
pub use error::{CommitRejection, Result, SessionError};
pub use gate::{AuthGeneration, AuthorizationGate};
pub use ledger::{Membership, SelectionLedger};
pub use search::{SearchAdapter, SearchOrdering, SearchOutcome, SearchTicket};
pub use session::{Session, SessionConfig, SAVE_NOTICE_DURATION};
