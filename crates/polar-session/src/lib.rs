//! Roll polar session.
//!
//! Ties the pipeline together for a host application:
//!
//! ```text
//! control file ──► PolarSession ◄── DatasetLoader (locate → read → decode)
//!                       │
//!                       ├─► current roll / danger zone
//!                       ├─► display field samples
//!                       └─► saved cases
//! ```
//!
//! [`PolarSession`] is a plain value for synchronous callers;
//! [`SessionHandle`] wraps it for async hosts and runs loads off the runtime.

pub mod cases;
pub mod handle;
pub mod loader;
pub mod session;

pub use cases::{validate_case_id, SavedCase, MAX_CASE_ID_LEN};
pub use handle::{LoadOutcome, SessionHandle};
pub use loader::{DatasetLoader, LoadedDataset};
pub use session::{PolarSession, SessionState};
