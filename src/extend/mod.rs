//! The cluster-to-alignment extension core: the data model, target
//! selection, shadow test, extender façade, delta re-scorer, merge driver,
//! and validator described by the enclosing crate's design documents.
//!
//! Everything in this module is collaborator-agnostic: it only talks to the
//! outside world through [`SequenceRecord`](model::SequenceRecord) buffers
//! and the [`SequenceExtender`](extender::SequenceExtender) trait, so it has
//! no I/O or CLI dependencies of its own.

pub mod driver;
pub mod extender;
pub mod geometry;
pub mod model;
pub mod rescorer;
pub mod scoring;
pub mod shadow;
pub mod target;
pub mod validator;
