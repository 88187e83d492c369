//! Convenient imports for txspan.
//!
//! This module re-exports the most commonly used types so you can get
//! started with a single import:
//!
//! ```
//! use txspan::prelude::*;
//!
//! let mut cx = txspan::thread_context();
//! let frame = cx.start();
//! let report = cx.stop(frame).unwrap();
//! assert!(report.is_clean());
//! ```

// Context engine
pub use crate::{ContextConfig, FrameHandle, StopReport, TaskScope, ThreadTranContext};

// Transaction engine
pub use crate::TranManager;

// Error handling
pub use crate::{ContextError, TranError};

// Core types
pub use crate::{Coordinator, CoordinatorId, GlobalTranSource, Outcome, TranEngine, TranKind, TranStatus};
