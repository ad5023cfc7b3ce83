#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # vegancity-entities
//!
//! Reusable, agnostic domain entities for Vegancity.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod email;
pub mod geo;
pub mod id;
pub mod neighborhood;
pub mod rating;
pub mod review;
pub mod status;
pub mod tag;
pub mod time;
pub mod user;
pub mod veg_level;
pub mod vendor;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
