//! Equality constraints, enforced by injecting synthetic contacts.

pub mod anchor;

pub use anchor::EqualityAnchoredConstraint;
