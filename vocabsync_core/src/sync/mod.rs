//! The synchronisation pipeline: reconcile one definition against the
//! store, fan a document's definitions out in a batch, and run every term
//! kind in order.

pub mod batch;
pub mod engine;
pub mod outcome;
pub mod reconciler;
