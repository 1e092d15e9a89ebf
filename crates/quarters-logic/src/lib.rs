//! Pure occupancy rules for Quarters.
//!
//! This crate contains the allocation rules that are independent of any
//! storage, engine, or runtime. Functions take plain data and return results,
//! making them unit-testable and portable across the roster engine, headless
//! validation tools, and any future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`rules`] | Room kinds, person categories, capacities, eligibility |
//! | [`intake`] | Admission records fed by bulk-loading collaborators |

pub mod intake;
pub mod rules;
