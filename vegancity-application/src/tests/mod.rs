
pub mod prelude {
    use std::{
        cell::{Cell, RefCell},
        collections::{HashMap, HashSet},
    };

    pub use vegancity_core::{
        db::*,
        entities::*,
        gateways::{
            geocode::{GeoCodingGateway, GeocodedAddress},
            notify::{NotificationEvent, NotificationGateway, NotificationType},
        },
        repositories::{Error as RepoError, *},
        usecases,
    };
    pub use vegancity_entities::builders::*;

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub mod tantivy {
        pub use vegancity_db_tantivy::SearchEngine;
    }

    pub use crate::{error::AppError, prelude as flows};

    pub fn new_vendor(name: &str) -> usecases::NewVendor {
        usecases::NewVendor {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn new_review(vendor: &Vendor, author: &User, content: &str) -> usecases::NewReview {
        usecases::NewReview {
            vendor_id: vendor.id.to_string(),
            author: author.id.to_string(),
            content: content.into(),
            ..Default::default()
        }
    }

    #[derive(Default)]
    pub struct FakeGeoCoder {
        addresses: RefCell<HashMap<String, GeocodedAddress>>,
        requests: Cell<usize>,
    }

    impl FakeGeoCoder {
        pub fn set(&self, address: &str, (lat, lng): (f64, f64), neighborhood: Option<&str>) {
            let geocoded = GeocodedAddress {
                pos: MapPoint::from_lat_lng_deg(lat, lng),
                neighborhood: neighborhood.map(ToOwned::to_owned),
            };
            self.addresses
                .borrow_mut()
                .insert(address.to_owned(), geocoded);
        }

        pub fn requests(&self) -> usize {
            self.requests.get()
        }
    }

    impl GeoCodingGateway for FakeGeoCoder {
        fn resolve_address(&self, address: &str) -> Option<GeocodedAddress> {
            self.requests.set(self.requests.get() + 1);
            self.addresses.borrow().get(address).cloned()
        }
    }

    #[derive(Debug, Clone)]
    pub struct SentNotification {
        pub kind: NotificationType,
        pub vendor_id: Id,
        pub recipients: Vec<String>,
    }

    #[derive(Default)]
    pub struct RecordingNotifier(RefCell<Vec<SentNotification>>);

    impl RecordingNotifier {
        pub fn sent(&self) -> Vec<SentNotification> {
            self.0.borrow().clone()
        }
    }

    impl NotificationGateway for RecordingNotifier {
        fn notify(&self, event: NotificationEvent) {
            let kind = event.kind();
            let (vendor, recipients) = match event {
                NotificationEvent::VendorSubmitted {
                    vendor,
                    email_addresses,
                } => (vendor, email_addresses.to_vec()),
                NotificationEvent::VendorApproved {
                    vendor,
                    email_address,
                } => (vendor, vec![email_address.clone()]),
            };
            self.0.borrow_mut().push(SentNotification {
                kind,
                vendor_id: vendor.id.clone(),
                recipients: recipients.into_iter().map(EmailAddress::into_string).collect(),
            });
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
        pub search_engine: RefCell<tantivy::SearchEngine>,
        pub geo: FakeGeoCoder,
        pub notify: RecordingNotifier,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            vegancity_db_sqlite::run_embedded_database_migrations(
                db_connections.exclusive().unwrap(),
            )
            .unwrap();
            let search_engine = tantivy::SearchEngine::init_in_ram().unwrap();
            Self {
                db_connections,
                search_engine: RefCell::new(search_engine),
                geo: FakeGeoCoder::default(),
                notify: RecordingNotifier::default(),
            }
        }

        pub fn create_user(&self, username: &str, email: Option<&str>, role: Role) -> User {
            let db = self.db_connections.exclusive().unwrap();
            usecases::create_user(
                &db,
                usecases::NewUser {
                    username: username.into(),
                    email: email.map(ToOwned::to_owned),
                    role,
                },
            )
            .unwrap()
        }

        pub fn create_tag(&self, kind: TagKind, name: &str, description: &str) -> Tag {
            flows::create_tag(
                &self.db_connections,
                &mut *self.search_engine.borrow_mut(),
                usecases::NewTag {
                    kind,
                    name: name.into(),
                    description: description.into(),
                },
            )
            .unwrap()
        }

        pub fn create_vendor(&self, new_vendor: usecases::NewVendor) -> Result<Vendor, AppError> {
            flows::create_vendor(
                &self.db_connections,
                &mut *self.search_engine.borrow_mut(),
                &self.geo,
                &self.notify,
                new_vendor,
            )
        }

        pub fn create_approved_vendor(&self, name: &str) -> Vendor {
            let vendor = self.create_vendor(new_vendor(name)).unwrap();
            self.change_vendor_status(vendor.id.as_str(), ApprovalStatus::Approved)
                .unwrap()
        }

        pub fn update_vendor(
            &self,
            id: &str,
            update: usecases::UpdateVendor,
        ) -> Result<Vendor, AppError> {
            flows::update_vendor(
                &self.db_connections,
                &mut *self.search_engine.borrow_mut(),
                &self.geo,
                &self.notify,
                id,
                update,
            )
        }

        pub fn change_vendor_status(
            &self,
            id: &str,
            status: ApprovalStatus,
        ) -> Result<Vendor, AppError> {
            flows::change_vendor_status(
                &self.db_connections,
                &mut *self.search_engine.borrow_mut(),
                &self.geo,
                &self.notify,
                id,
                status,
            )
        }

        pub fn get_vendor(&self, id: &str) -> Vendor {
            self.db_connections.shared().unwrap().get_vendor(id).unwrap()
        }

        pub fn create_review(&self, new_review: usecases::NewReview) -> Result<Review, AppError> {
            flows::create_review(
                &self.db_connections,
                &mut *self.search_engine.borrow_mut(),
                new_review,
            )
        }

        pub fn update_review(
            &self,
            id: &str,
            update: usecases::UpdateReview,
        ) -> Result<Review, AppError> {
            flows::update_review(
                &self.db_connections,
                &mut *self.search_engine.borrow_mut(),
                id,
                update,
            )
        }

        pub fn change_review_status(
            &self,
            id: &str,
            status: ApprovalStatus,
        ) -> Result<Review, AppError> {
            flows::change_review_status(
                &self.db_connections,
                &mut *self.search_engine.borrow_mut(),
                id,
                status,
            )
        }

        pub fn query_ids(&self, kind: IndexedKind, text: &str) -> Vec<Id> {
            self.search_engine.borrow().query_ids(kind, text).unwrap()
        }

        pub fn search(&self, query: &str, candidates: Option<&HashSet<Id>>) -> Vec<String> {
            flows::search_vendors(
                &self.db_connections,
                &self.geo,
                &*self.search_engine.borrow(),
                query,
                candidates,
            )
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect()
        }
    }
}
