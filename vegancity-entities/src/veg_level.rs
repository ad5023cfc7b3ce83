use strum::{AsRefStr, Display, EnumString};

use crate::id::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum VegCategory {
    Vegan,
    Vegetarian,
    NotVeg,
}

/// How vegan friendly a vendor is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VegLevel {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub category: VegCategory,
}
