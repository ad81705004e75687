//! Vocabulary sync core: fetch the canonical term definitions, validate and
//! parse them, and reconcile each one against the record store over the
//! request/response channel.

pub mod channel;
pub mod error;
pub mod o11y;
pub mod store;
pub mod sync;
pub mod vocab;

pub use channel::RequestChannel;
pub use error::{Error, Result};
pub use store::RecordStore;
pub use store::models::{CollectionOptions, GetOptions, LocalRecord, RecordCollection, SortOrder};
pub use sync::engine::{SyncEngine, SyncReport};
pub use sync::outcome::{Outcome, SyncTally};
pub use vocab::fetch::{HttpVocabSource, VocabDocument, VocabSource};
pub use vocab::kind::TermKind;
