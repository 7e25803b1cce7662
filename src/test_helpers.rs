use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::accommodation::{
    Accommodation, AccommodationStatus, AvailabilityPeriod, NewAccommodation,
};
use crate::domain::user::UserProfile;
use crate::error::{Result, ServiceError};
use crate::ports::image_store::ImageStore;
use crate::ports::reservations_client::ReservationsClient;
use crate::ports::user_client::UserClient;

type CheckFn = Box<dyn Fn(&[String], &[NaiveDate]) -> Result<HashSet<String>> + Send + Sync>;
type RegisterFn = Box<dyn Fn(&str, &[AvailabilityPeriod]) -> Result<()> + Send + Sync>;
type GetUserFn = Box<dyn Fn(&str) -> Result<UserProfile> + Send + Sync>;

pub struct MockReservationsClient {
    check_fn: Mutex<CheckFn>,
    register_fn: Mutex<RegisterFn>,
}

impl Default for MockReservationsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockReservationsClient {
    pub fn new() -> Self {
        Self {
            check_fn: Mutex::new(Box::new(|_, _| Ok(HashSet::new()))),
            register_fn: Mutex::new(Box::new(|_, _| Ok(()))),
        }
    }

    #[must_use]
    pub fn with_check(
        self,
        f: impl Fn(&[String], &[NaiveDate]) -> Result<HashSet<String>> + Send + Sync + 'static,
    ) -> Self {
        *self.check_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_register(
        self,
        f: impl Fn(&str, &[AvailabilityPeriod]) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        *self.register_fn.lock().unwrap() = Box::new(f);
        self
    }
}

#[async_trait]
impl ReservationsClient for MockReservationsClient {
    async fn check_availability(
        &self,
        accommodation_ids: &[String],
        dates: &[NaiveDate],
    ) -> Result<HashSet<String>> {
        let f = self.check_fn.lock().unwrap();
        f(accommodation_ids, dates)
    }

    async fn register_availability(
        &self,
        accommodation_id: &str,
        availabilities: &[AvailabilityPeriod],
    ) -> Result<()> {
        let f = self.register_fn.lock().unwrap();
        f(accommodation_id, availabilities)
    }
}

pub struct MockUserClient {
    get_user_fn: Mutex<GetUserFn>,
}

impl Default for MockUserClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUserClient {
    pub fn new() -> Self {
        Self {
            get_user_fn: Mutex::new(Box::new(|id| Ok(make_profile(id, false)))),
        }
    }

    #[must_use]
    pub fn with_get_user(
        self,
        f: impl Fn(&str) -> Result<UserProfile> + Send + Sync + 'static,
    ) -> Self {
        *self.get_user_fn.lock().unwrap() = Box::new(f);
        self
    }
}

#[async_trait]
impl UserClient for MockUserClient {
    async fn get_user_by_id(&self, id: &str) -> Result<UserProfile> {
        let f = self.get_user_fn.lock().unwrap();
        f(id)
    }
}

#[derive(Default)]
pub struct MemoryImageStore {
    images: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryImageStore {
    pub fn len(&self) -> usize {
        self.images.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.images.lock().unwrap().clear();
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn write(&self, id: &str, bytes: &[u8]) -> Result<()> {
        self.images
            .lock()
            .unwrap()
            .insert(id.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn read(&self, id: &str) -> Result<Vec<u8>> {
        self.images
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound {
                entity: "Image",
                id: id.to_string(),
            })
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.images.lock().unwrap().remove(id);
        Ok(())
    }
}

// --- Factory functions ---

pub fn make_accommodation(id: &str, owner_id: &str) -> Accommodation {
    Accommodation {
        id: id.to_string(),
        name: format!("Apartment {id}"),
        owner_id: owner_id.to_string(),
        owner_username: format!("host-{owner_id}"),
        owner_email: format!("{owner_id}@example.com"),
        address: "Bulevar Oslobodjenja 1".to_string(),
        city: "Novi Sad".to_string(),
        country: "Serbia".to_string(),
        amenities: vec!["WiFi".to_string()],
        min_visitors: 1,
        max_visitors: 4,
        price: 60,
        status: AccommodationStatus::Created,
        image_ids: vec![],
        rating: 0.0,
    }
}

pub fn make_new_accommodation() -> NewAccommodation {
    NewAccommodation {
        name: "Riverside Studio".to_string(),
        owner_id: "u1".to_string(),
        owner_username: "host-u1".to_string(),
        owner_email: "u1@example.com".to_string(),
        address: "Kej zrtava racije 5".to_string(),
        city: "Novi Sad".to_string(),
        country: "Serbia".to_string(),
        amenities: vec!["WiFi".to_string(), "Kitchen".to_string()],
        min_visitors: 1,
        max_visitors: 3,
        price: 45,
        availabilities: vec![AvailabilityPeriod {
            start_date: "2024-06-01".to_string(),
            end_date: "2024-08-31".to_string(),
            price: 45,
            price_per_guest: false,
        }],
    }
}

pub fn make_profile(id: &str, distinguished: bool) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        username: format!("host-{id}"),
        distinguished,
    }
}
