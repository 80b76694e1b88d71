//! Application core orchestration.
//!
//! # Responsibility
//! - Drive every operation through the fixed persist-then-reconcile
//!   sequence.
//! - Keep store adapters and derived indexes behind use-case level APIs.
//!
//! # Invariants
//! - Indexes are only mutated after the corresponding store write
//!   succeeded.

pub mod team_service;
