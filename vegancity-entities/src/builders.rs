pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{review_builder::*, vendor_builder::*};

pub mod vendor_builder {

    use super::*;
    use crate::{geo::*, id::*, status::*, time::*, vendor::*};

    #[derive(Debug)]
    pub struct VendorBuild {
        vendor: Vendor,
    }

    impl VendorBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.vendor.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.vendor.name = name.into();
            self
        }
        pub fn address(mut self, address: Option<&str>) -> Self {
            self.vendor.address = address.map(Into::into);
            self
        }
        pub fn location(mut self, location: Option<MapPoint>) -> Self {
            self.vendor.location = location;
            self
        }
        pub fn pos(self, lat: f64, lng: f64) -> Self {
            self.location(Some(MapPoint::from_lat_lng_deg(lat, lng)))
        }
        pub fn neighborhood(mut self, id: Option<&str>) -> Self {
            self.vendor.neighborhood = id.map(Into::into);
            self
        }
        pub fn notes(mut self, notes: &str) -> Self {
            self.vendor.notes = Some(notes.into());
            self
        }
        pub fn website(mut self, website: &str) -> Self {
            self.vendor.website = Some(website.into());
            self
        }
        pub fn status(mut self, status: ApprovalStatus) -> Self {
            self.vendor.approval_status = status;
            self
        }
        pub fn approved(self) -> Self {
            self.status(ApprovalStatus::Approved)
        }
        pub fn submitted_by(mut self, user_id: &str) -> Self {
            self.vendor.submitted_by = Some(user_id.into());
            self
        }
        pub fn cuisine_tags(mut self, tags: Vec<&str>) -> Self {
            self.vendor.cuisine_tags = tags.into_iter().map(Id::from).collect();
            self
        }
        pub fn feature_tags(mut self, tags: Vec<&str>) -> Self {
            self.vendor.feature_tags = tags.into_iter().map(Id::from).collect();
            self
        }
        pub fn finish(self) -> Vendor {
            self.vendor
        }
    }

    impl Builder for Vendor {
        type Build = VendorBuild;
        fn build() -> VendorBuild {
            let now = Timestamp::now();
            VendorBuild {
                vendor: Vendor {
                    id: Id::new(),
                    name: "".into(),
                    address: None,
                    location: None,
                    neighborhood: None,
                    phone: None,
                    website: None,
                    notes: None,
                    veg_level: None,
                    approval_status: ApprovalStatus::default(),
                    submitted_by: None,
                    created: now,
                    modified: now,
                    cuisine_tags: vec![],
                    feature_tags: vec![],
                },
            }
        }
    }
}

pub mod review_builder {

    use super::*;
    use crate::{id::*, rating::*, review::*, status::*, time::*};

    #[derive(Debug)]
    pub struct ReviewBuild {
        review: Review,
    }

    impl ReviewBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.review.id = id.into();
            self
        }
        pub fn vendor(mut self, vendor_id: &str) -> Self {
            self.review.vendor_id = vendor_id.into();
            self
        }
        pub fn author(mut self, user_id: &str) -> Self {
            self.review.author = user_id.into();
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.review.title = Some(title.into());
            self
        }
        pub fn content(mut self, content: &str) -> Self {
            self.review.content = content.into();
            self
        }
        pub fn food(mut self, value: u8) -> Self {
            self.review.food_rating = Some(RatingValue::try_from(value).unwrap());
            self
        }
        pub fn atmosphere(mut self, value: u8) -> Self {
            self.review.atmosphere_rating = Some(RatingValue::try_from(value).unwrap());
            self
        }
        pub fn status(mut self, status: ApprovalStatus) -> Self {
            self.review.approval_status = status;
            self
        }
        pub fn approved(self) -> Self {
            self.status(ApprovalStatus::Approved)
        }
        pub fn created(mut self, created: Timestamp) -> Self {
            self.review.created = created;
            self.review.modified = created;
            self
        }
        pub fn finish(self) -> Review {
            self.review
        }
    }

    impl Builder for Review {
        type Build = ReviewBuild;
        fn build() -> ReviewBuild {
            let now = Timestamp::now();
            ReviewBuild {
                review: Review {
                    id: Id::new(),
                    vendor_id: Id::new(),
                    author: Id::new(),
                    approval_status: ApprovalStatus::default(),
                    title: None,
                    food_rating: None,
                    atmosphere_rating: None,
                    content: "".into(),
                    suggested_feature_tags: None,
                    suggested_cuisine_tags: None,
                    created: now,
                    modified: now,
                },
            }
        }
    }
}
