use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::accommodation::{Accommodation, AccommodationStatus, NewAccommodation};
use crate::domain::validation::{ValidationIssue, validate};
use crate::error::{Result, ServiceError};
use crate::ports::accommodation_store::AccommodationStore;
use crate::ports::cache::BlobCache;
use crate::ports::image_store::ImageStore;
use crate::ports::reservations_client::ReservationsClient;

const ENTITY: &str = "Accommodation";

/// Accommodation lifecycle: creation with availability registration, lookups,
/// ratings and removal.
pub struct AccommodationService {
    store: Arc<dyn AccommodationStore>,
    reservations: Arc<dyn ReservationsClient>,
    images: Arc<dyn ImageStore>,
    image_cache: Arc<dyn BlobCache>,
    image_ttl: Duration,
}

impl AccommodationService {
    pub fn new(
        store: Arc<dyn AccommodationStore>,
        reservations: Arc<dyn ReservationsClient>,
        images: Arc<dyn ImageStore>,
        image_cache: Arc<dyn BlobCache>,
        image_ttl: Duration,
    ) -> Self {
        Self {
            store,
            reservations,
            images,
            image_cache,
            image_ttl,
        }
    }

    /// Create an accommodation and register its availability calendar.
    ///
    /// The record is written as `Pending` and only becomes `Created` once the
    /// reservations service accepts the calendar. If registration fails the
    /// record and its image are deleted again and the registration error is
    /// returned. A crash between the two writes leaves a `Pending` record
    /// behind.
    pub async fn create(&self, input: NewAccommodation, image: Vec<u8>) -> Result<Accommodation> {
        let mut issues = validate(&input);
        if image.is_empty() {
            issues.push(ValidationIssue::new("image", "an image is required"));
        }
        if !issues.is_empty() {
            return Err(ServiceError::Validation(issues));
        }

        let image_id = Uuid::new_v4().to_string();
        self.images.write(&image_id, &image).await?;

        let id = Uuid::new_v4().simple().to_string();
        let pending = Accommodation::pending(id.clone(), &input, vec![image_id.clone()]);
        let mut saved = match self.store.save(pending).await {
            Ok(saved) => saved,
            Err(e) => {
                self.discard_image(&image_id).await;
                return Err(e);
            }
        };
        debug!(id = %id, "Accommodation saved as pending");

        if let Err(e) = self
            .reservations
            .register_availability(&id, &input.availabilities)
            .await
        {
            warn!(id = %id, error = %e, "Availability registration failed, removing accommodation");
            if let Err(delete_err) = self.store.delete(&id).await {
                error!(id = %id, error = %delete_err, "Compensating delete failed");
            }
            self.discard_image(&image_id).await;
            return Err(ServiceError::RegistrationFailed {
                reason: e.to_string(),
            });
        }

        self.store
            .update_status(&id, AccommodationStatus::Created)
            .await?;
        saved.status = AccommodationStatus::Created;
        self.image_cache.put(&image_key(&image_id), image.into(), self.image_ttl);
        info!(id = %id, name = %saved.name, "Accommodation created");
        Ok(saved)
    }

    async fn discard_image(&self, image_id: &str) {
        if let Err(e) = self.images.delete(image_id).await {
            warn!(image_id, error = %e, "Could not remove image of failed creation");
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Accommodation> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Accommodation>> {
        self.store.find_by_ids(ids).await
    }

    pub async fn get_all(&self) -> Result<Vec<Accommodation>> {
        self.store.find_all().await
    }

    /// Replace the descriptive fields of an existing accommodation.
    ///
    /// Status, images and rating are kept; the availability calendar is owned
    /// by the reservations service and is not re-sent.
    pub async fn update(&self, id: &str, input: NewAccommodation) -> Result<Accommodation> {
        let issues = validate(&input);
        if !issues.is_empty() {
            return Err(ServiceError::Validation(issues));
        }
        let existing = self.get_by_id(id).await?;
        let mut updated = Accommodation::pending(existing.id, &input, existing.image_ids);
        updated.status = existing.status;
        updated.rating = existing.rating;
        self.store.update(updated).await
    }

    pub async fn delete(&self, id: &str) -> Result<Accommodation> {
        let existing = self.get_by_id(id).await?;
        self.store.delete(id).await?;
        info!(id, "Accommodation deleted");
        Ok(existing)
    }

    pub async fn delete_by_owner(&self, owner_id: &str) -> Result<usize> {
        let removed = self.store.delete_by_owner(owner_id).await?;
        info!(owner_id, removed, "Accommodations of owner deleted");
        Ok(removed)
    }

    pub async fn update_rating(&self, id: &str, rating: f64) -> Result<()> {
        if !(0.0..=5.0).contains(&rating) {
            return Err(ServiceError::Validation(vec![ValidationIssue::new(
                "rating",
                "must be between 0 and 5",
            )]));
        }
        self.store.update_rating(id, rating).await
    }

    pub async fn get_image(&self, id: &str) -> Result<Arc<[u8]>> {
        let key = image_key(id);
        if let Some(cached) = self.image_cache.get(&key) {
            debug!(id, "Cache hit for image");
            return Ok(cached);
        }
        let bytes: Arc<[u8]> = self.images.read(id).await?.into();
        self.image_cache.put(&key, Arc::clone(&bytes), self.image_ttl);
        Ok(bytes)
    }
}

fn image_key(id: &str) -> String {
    format!("image:{id}")
}

fn not_found(id: &str) -> ServiceError {
    ServiceError::NotFound {
        entity: ENTITY,
        id: id.to_string(),
    }
}
