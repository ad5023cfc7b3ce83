use std::{cmp::Reverse, collections::HashMap};

use super::prelude::*;

#[derive(Debug, Clone)]
pub struct NewTag {
    pub kind: TagKind,
    pub name: String,
    pub description: String,
}

pub fn create_tag<R: TagRepo>(repo: &R, new_tag: NewTag) -> Result<Tag> {
    let NewTag {
        kind,
        name,
        description,
    } = new_tag;
    let name = normalize_tag_name(&name);
    if name.is_empty() {
        return Err(Error::Name);
    }
    match repo.get_tag_by_name(kind, &name) {
        Ok(_) => return Err(Error::TagExists),
        Err(RepoError::NotFound) => {}
        Err(err) => return Err(err.into()),
    }
    let tag = Tag {
        id: Id::new(),
        kind,
        name,
        description: description.trim().to_owned(),
        created: Timestamp::now(),
    };
    repo.create_tag(tag.clone())?;
    log::info!("Created {kind} tag '{}'", tag.name);
    Ok(tag)
}

pub fn create_neighborhood<R: NeighborhoodRepo>(repo: &R, name: &str) -> Result<Neighborhood> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Name);
    }
    match repo.get_neighborhood_by_name(name) {
        Ok(_) => return Err(Error::NeighborhoodExists),
        Err(RepoError::NotFound) => {}
        Err(err) => return Err(err.into()),
    }
    let neighborhood = Neighborhood {
        id: Id::new(),
        name: name.to_owned(),
        created: Timestamp::now(),
    };
    repo.create_neighborhood(neighborhood.clone())?;
    Ok(neighborhood)
}

#[derive(Debug, Clone)]
pub struct NewVegLevel {
    pub name: String,
    pub description: String,
    pub category: VegCategory,
}

pub fn create_veg_level<R: VegLevelRepo>(repo: &R, new_level: NewVegLevel) -> Result<VegLevel> {
    let NewVegLevel {
        name,
        description,
        category,
    } = new_level;
    let name = name.trim().to_owned();
    if name.is_empty() {
        return Err(Error::Name);
    }
    match repo.get_veg_level_by_name(&name) {
        Ok(_) => return Err(Error::VegLevelExists),
        Err(RepoError::NotFound) => {}
        Err(err) => return Err(err.into()),
    }
    let level = VegLevel {
        id: Id::new(),
        name,
        description,
        category,
    };
    repo.create_veg_level(level.clone())?;
    Ok(level)
}

/// Tags of approved vendors together with the number of these
/// vendors, most used first.
pub fn tags_with_vendors<R>(repo: &R, kind: TagKind) -> Result<Vec<(Tag, usize)>>
where
    R: VendorRepo + TagRepo,
{
    let mut counts = HashMap::<Id, usize>::new();
    for vendor in repo.approved_vendors()? {
        let tag_ids = match kind {
            TagKind::Cuisine => vendor.cuisine_tags,
            TagKind::Feature => vendor.feature_tags,
        };
        for id in tag_ids {
            *counts.entry(id).or_default() += 1;
        }
    }
    let tags = repo
        .all_tags(kind)?
        .into_iter()
        .filter_map(|t| counts.get(&t.id).map(|n| (t, *n)))
        .collect();
    Ok(sort_by_count(tags))
}

/// Neighborhoods of approved vendors together with the number
/// of these vendors, most used first.
pub fn neighborhoods_with_vendors<R>(repo: &R) -> Result<Vec<(Neighborhood, usize)>>
where
    R: VendorRepo + NeighborhoodRepo,
{
    let mut counts = HashMap::<Id, usize>::new();
    for id in repo
        .approved_vendors()?
        .into_iter()
        .filter_map(|v| v.neighborhood)
    {
        *counts.entry(id).or_default() += 1;
    }
    let neighborhoods = repo
        .all_neighborhoods()?
        .into_iter()
        .filter_map(|n| counts.get(&n.id).map(|c| (n, *c)))
        .collect();
    Ok(sort_by_count(neighborhoods))
}

// Stable, so equal counts keep the order by name
fn sort_by_count<T>(mut entries: Vec<(T, usize)>) -> Vec<(T, usize)> {
    entries.sort_by_key(|(_, count)| Reverse(*count));
    entries
}
