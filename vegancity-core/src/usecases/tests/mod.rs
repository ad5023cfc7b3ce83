use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use anyhow::Result as Fallible;

use super::prelude::*;
use crate::gateways::geocode::{GeoCodingGateway, GeocodedAddress};

type RepoResult<T> = std::result::Result<T, RepoError>;

trait Key {
    fn key(&self) -> &str;
}

impl Key for Vendor {
    fn key(&self) -> &str {
        self.id.as_ref()
    }
}

impl Key for Review {
    fn key(&self) -> &str {
        self.id.as_ref()
    }
}

impl Key for Neighborhood {
    fn key(&self) -> &str {
        self.id.as_ref()
    }
}

impl Key for Tag {
    fn key(&self) -> &str {
        self.id.as_ref()
    }
}

impl Key for VegLevel {
    fn key(&self) -> &str {
        self.id.as_ref()
    }
}

impl Key for User {
    fn key(&self) -> &str {
        self.id.as_ref()
    }
}

impl Key for UserProfile {
    fn key(&self) -> &str {
        self.user_id.as_ref()
    }
}

#[derive(Default)]
pub struct MockDb {
    pub vendors: RefCell<Vec<Vendor>>,
    pub reviews: RefCell<Vec<Review>>,
    pub neighborhoods: RefCell<Vec<Neighborhood>>,
    pub tags: RefCell<Vec<Tag>>,
    pub veg_levels: RefCell<Vec<VegLevel>>,
    pub users: RefCell<Vec<User>>,
    pub profiles: RefCell<Vec<UserProfile>>,
}

fn get<T: Clone + Key>(objects: &[T], id: &str) -> RepoResult<T> {
    match objects.iter().find(|x| x.key() == id) {
        Some(x) => Ok(x.clone()),
        None => Err(RepoError::NotFound),
    }
}

fn create<T: Clone + Key>(objects: &mut Vec<T>, e: T) -> RepoResult<()> {
    if objects.iter().any(|x| x.key() == e.key()) {
        return Err(RepoError::AlreadyExists);
    }
    objects.push(e);
    Ok(())
}

fn update<T: Clone + Key>(objects: &mut [T], e: &T) -> RepoResult<()> {
    if let Some(pos) = objects.iter().position(|x| x.key() == e.key()) {
        objects[pos] = e.clone();
    } else {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

fn by_name(mut vendors: Vec<Vendor>) -> Vec<Vendor> {
    vendors.sort_by(|a, b| a.name.cmp(&b.name));
    vendors
}

fn newest_first(mut reviews: Vec<Review>) -> Vec<Review> {
    reviews.sort_by(|a, b| b.created.cmp(&a.created));
    reviews
}

impl MockDb {
    fn filter_vendors(&self, f: impl Fn(&Vendor) -> bool) -> Vec<Vendor> {
        by_name(self.vendors.borrow().iter().filter(|v| f(v)).cloned().collect())
    }
}

impl VendorRepo for MockDb {
    fn create_vendor(&self, vendor: Vendor) -> RepoResult<()> {
        create(&mut self.vendors.borrow_mut(), vendor)
    }
    fn update_vendor(&self, vendor: &Vendor) -> RepoResult<()> {
        update(&mut self.vendors.borrow_mut(), vendor)
    }
    fn get_vendor(&self, id: &str) -> RepoResult<Vendor> {
        get(&self.vendors.borrow(), id)
    }
    fn get_vendors(&self, ids: &[&str]) -> RepoResult<Vec<Vendor>> {
        Ok(self.filter_vendors(|v| ids.contains(&v.id.as_str())))
    }
    fn get_vendor_by_name(&self, name: &str) -> RepoResult<Vendor> {
        self.vendors
            .borrow()
            .iter()
            .find(|v| v.name == name)
            .cloned()
            .ok_or(RepoError::NotFound)
    }
    fn count_vendors(&self) -> RepoResult<usize> {
        Ok(self.vendors.borrow().len())
    }
    fn all_vendors(&self) -> RepoResult<Vec<Vendor>> {
        Ok(self.vendors.borrow().clone())
    }
    fn vendors_by_status(&self, status: ApprovalStatus) -> RepoResult<Vec<Vendor>> {
        Ok(self.filter_vendors(|v| v.approval_status == status))
    }
    fn approved_vendors_by_ids(&self, ids: &[&str]) -> RepoResult<Vec<Vendor>> {
        Ok(self.filter_vendors(|v| v.is_approved() && ids.contains(&v.id.as_str())))
    }
    fn approved_vendors_by_tags(&self, tag_ids: &[&str]) -> RepoResult<Vec<Vendor>> {
        Ok(self.filter_vendors(|v| {
            v.is_approved() && tag_ids.iter().any(|id| v.has_tag(&Id::from(*id)))
        }))
    }
    fn approved_vendors_within(
        &self,
        center: MapPoint,
        distance_deg: f64,
    ) -> RepoResult<Vec<Vendor>> {
        Ok(self.filter_vendors(|v| {
            v.is_approved()
                && v.location
                    .map(|pos| pos.is_within(center, distance_deg))
                    .unwrap_or(false)
        }))
    }
}

impl ReviewRepo for MockDb {
    fn create_review(&self, review: Review) -> RepoResult<()> {
        create(&mut self.reviews.borrow_mut(), review)
    }
    fn update_review(&self, review: &Review) -> RepoResult<()> {
        update(&mut self.reviews.borrow_mut(), review)
    }
    fn get_review(&self, id: &str) -> RepoResult<Review> {
        get(&self.reviews.borrow(), id)
    }
    fn get_reviews(&self, ids: &[&str]) -> RepoResult<Vec<Review>> {
        Ok(self
            .reviews
            .borrow()
            .iter()
            .filter(|r| ids.contains(&r.id.as_str()))
            .cloned()
            .collect())
    }
    fn all_reviews(&self) -> RepoResult<Vec<Review>> {
        Ok(self.reviews.borrow().clone())
    }
    fn reviews_by_status(&self, status: ApprovalStatus) -> RepoResult<Vec<Review>> {
        Ok(newest_first(
            self.reviews
                .borrow()
                .iter()
                .filter(|r| r.approval_status == status)
                .cloned()
                .collect(),
        ))
    }
    fn approved_reviews_of_vendor(&self, vendor_id: &str) -> RepoResult<Vec<Review>> {
        Ok(newest_first(
            self.reviews
                .borrow()
                .iter()
                .filter(|r| r.is_approved() && r.vendor_id.as_str() == vendor_id)
                .cloned()
                .collect(),
        ))
    }
    fn count_approved_reviews_per_vendor(&self) -> RepoResult<HashMap<Id, usize>> {
        let mut counts = HashMap::new();
        for r in self.reviews.borrow().iter().filter(|r| r.is_approved()) {
            *counts.entry(r.vendor_id.clone()).or_default() += 1;
        }
        Ok(counts)
    }
}

impl NeighborhoodRepo for MockDb {
    fn create_neighborhood(&self, neighborhood: Neighborhood) -> RepoResult<()> {
        create(&mut self.neighborhoods.borrow_mut(), neighborhood)
    }
    fn get_neighborhood(&self, id: &str) -> RepoResult<Neighborhood> {
        get(&self.neighborhoods.borrow(), id)
    }
    fn get_neighborhood_by_name(&self, name: &str) -> RepoResult<Neighborhood> {
        self.neighborhoods
            .borrow()
            .iter()
            .find(|n| n.name == name)
            .cloned()
            .ok_or(RepoError::NotFound)
    }
    fn all_neighborhoods(&self) -> RepoResult<Vec<Neighborhood>> {
        let mut neighborhoods = self.neighborhoods.borrow().clone();
        neighborhoods.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(neighborhoods)
    }
}

impl TagRepo for MockDb {
    fn create_tag(&self, tag: Tag) -> RepoResult<()> {
        create(&mut self.tags.borrow_mut(), tag)
    }
    fn get_tag(&self, id: &str) -> RepoResult<Tag> {
        get(&self.tags.borrow(), id)
    }
    fn get_tag_by_name(&self, kind: TagKind, name: &str) -> RepoResult<Tag> {
        self.tags
            .borrow()
            .iter()
            .find(|t| t.kind == kind && t.name == name)
            .cloned()
            .ok_or(RepoError::NotFound)
    }
    fn all_tags(&self, kind: TagKind) -> RepoResult<Vec<Tag>> {
        let mut tags: Vec<_> = self
            .tags
            .borrow()
            .iter()
            .filter(|t| t.kind == kind)
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}

impl VegLevelRepo for MockDb {
    fn create_veg_level(&self, veg_level: VegLevel) -> RepoResult<()> {
        create(&mut self.veg_levels.borrow_mut(), veg_level)
    }
    fn get_veg_level(&self, id: &str) -> RepoResult<VegLevel> {
        get(&self.veg_levels.borrow(), id)
    }
    fn get_veg_level_by_name(&self, name: &str) -> RepoResult<VegLevel> {
        self.veg_levels
            .borrow()
            .iter()
            .find(|l| l.name == name)
            .cloned()
            .ok_or(RepoError::NotFound)
    }
    fn all_veg_levels(&self) -> RepoResult<Vec<VegLevel>> {
        Ok(self.veg_levels.borrow().clone())
    }
}

impl UserRepo for MockDb {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        create(&mut self.users.borrow_mut(), user.clone())
    }
    fn update_user(&self, user: &User) -> RepoResult<()> {
        update(&mut self.users.borrow_mut(), user)
    }
    fn get_user(&self, id: &str) -> RepoResult<User> {
        get(&self.users.borrow(), id)
    }
    fn get_user_by_username(&self, username: &str) -> RepoResult<User> {
        self.users
            .borrow()
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(RepoError::NotFound)
    }
    fn all_users(&self) -> RepoResult<Vec<User>> {
        Ok(self.users.borrow().clone())
    }
}

impl UserProfileRepo for MockDb {
    fn create_or_update_profile(&self, profile: &UserProfile) -> RepoResult<()> {
        let mut profiles = self.profiles.borrow_mut();
        if update(&mut profiles, profile).is_err() {
            create(&mut profiles, profile.clone())?;
        }
        Ok(())
    }
    fn get_profile(&self, user_id: &str) -> RepoResult<UserProfile> {
        get(&self.profiles.borrow(), user_id)
    }
}

/// Resolves a fixed set of addresses and counts all requests.
#[derive(Default)]
pub struct FakeGeoCoder {
    addresses: HashMap<String, GeocodedAddress>,
    pub requests: Cell<usize>,
}

impl FakeGeoCoder {
    pub fn with(mut self, address: &str, pos: MapPoint, neighborhood: Option<&str>) -> Self {
        self.addresses.insert(
            address.to_owned(),
            GeocodedAddress {
                pos,
                neighborhood: neighborhood.map(Into::into),
            },
        );
        self
    }
}

impl GeoCodingGateway for FakeGeoCoder {
    fn resolve_address(&self, address: &str) -> Option<GeocodedAddress> {
        self.requests.set(self.requests.get() + 1);
        self.addresses.get(address).cloned()
    }
}

/// Matches documents that contain all lowercased words of the query.
#[derive(Default)]
pub struct MockIndex {
    docs: RefCell<Vec<(IndexedKind, Id, String)>>,
}

impl MockIndex {
    fn add(&self, kind: IndexedKind, id: &Id, texts: &[Option<&str>]) {
        let text = texts
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        self.docs.borrow_mut().push((kind, id.clone(), text));
    }

    pub fn add_vendor(&self, v: &Vendor) {
        let texts = [
            Some(v.name.as_str()),
            v.notes.as_deref(),
            v.website.as_deref(),
            v.address.as_deref(),
        ];
        self.add(IndexedKind::Vendor, &v.id, &texts);
    }

    pub fn add_tag(&self, t: &Tag) {
        let texts = [Some(t.name.as_str()), Some(t.description.as_str())];
        self.add(IndexedKind::of_tag(t.kind), &t.id, &texts);
    }

    pub fn add_review(&self, r: &Review) {
        let texts = [r.title.as_deref(), Some(r.content.as_str())];
        self.add(IndexedKind::Review, &r.id, &texts);
    }
}

impl IdIndex for MockIndex {
    fn query_ids(&self, kind: IndexedKind, text: &str) -> Fallible<Vec<Id>> {
        let words: Vec<_> = text.split_whitespace().map(str::to_lowercase).collect();
        if words.is_empty() {
            return Ok(vec![]);
        }
        Ok(self
            .docs
            .borrow()
            .iter()
            .filter(|(k, _, doc)| {
                *k == kind
                    && words
                        .iter()
                        .all(|w| doc.split_whitespace().any(|d| d == w))
            })
            .map(|(_, id, _)| id.clone())
            .collect())
    }
}
