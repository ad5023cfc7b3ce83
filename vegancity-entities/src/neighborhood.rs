use crate::{id::*, time::*};

/// A named geographic subdivision of the city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighborhood {
    pub id: Id,
    pub name: String,
    pub created: Timestamp,
}
