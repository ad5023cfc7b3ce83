//! # vegancity-core
//!
//! Business rules of the Vegancity catalog: the approval state machine,
//! geocoding decisions, rating aggregation and the composite search.
//! Storage, indexing, geocoding and e-mail are reached through the
//! traits in [`repositories`], [`db`] and [`gateways`].

pub mod approval;
pub mod db;
pub mod gateways;
pub mod rating;
pub mod repositories;
pub mod usecases;
pub mod util;

pub use repositories::Error as RepoError;

pub mod entities {
    pub use vegancity_entities::{
        email::*, geo::*, id::*, neighborhood::*, rating::*, review::*, status::*, tag::*,
        time::*, user::*, veg_level::*, vendor::*,
    };
}
