use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{id::*, time::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TagKind {
    Cuisine,
    Feature,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id          : Id,
    pub kind        : TagKind,
    // Short name: all lowercase, underscores for spaces
    pub name        : String,
    pub description : String,
    pub created     : Timestamp,
}

/// Converts free text into a tag name, e.g. "Gluten Free" into "gluten_free".
pub fn normalize_tag_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_names() {
        assert_eq!("gluten_free", normalize_tag_name(" Gluten  Free "));
        assert_eq!("ethiopian", normalize_tag_name("Ethiopian"));
        assert_eq!("", normalize_tag_name("   "));
    }

    #[test]
    fn parse_kind() {
        assert_eq!(Ok(TagKind::Cuisine), "cuisine".parse());
        assert_eq!("feature", TagKind::Feature.as_ref());
    }
}
