//! Session completion pipeline
//!
//! This module owns the one multi-service operation in the backend: turning a
//! finished answer-recording session into a linguistic assessment. It
//! coordinates the store, the object store, and the two external AI services
//! behind their trait seams, and it owns the failure policy for the run.

mod completion;

pub use completion::SessionCompletion;
