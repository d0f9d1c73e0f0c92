//! Property management service implementation.
//!
//! Orchestrates the repository, the geography lookups and the external
//! media host for landlord-facing create/update/delete operations. Search
//! is a separate, read-only service.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::media::PropertyMedia;
use crate::domain::entities::property::{Property, PropertyType};
use crate::domain::value_objects::features::FeatureSet;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{GeographyRepository, PropertyRepository};
use crate::services::media::{MediaStorage, MediaUpload, StoredMedia};

use super::config::PropertyServiceConfig;

/// Fields for a new listing
#[derive(Debug, Clone)]
pub struct CreateProperty {
    pub name: String,
    pub address: String,
    pub suburb_id: i32,
    pub rent_amount: Decimal,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking_spaces: u32,
    pub property_type: PropertyType,
    pub features: FeatureSet,
    pub pets_allowed: bool,
    pub available_date: NaiveDate,
    pub images: Vec<MediaUpload>,
    pub video: Option<MediaUpload>,
}

/// Fields for updating an existing listing. Media can only be appended
/// here; removal goes through `delete_media`.
#[derive(Debug, Clone)]
pub struct UpdateProperty {
    pub name: String,
    pub address: String,
    pub suburb_id: i32,
    pub rent_amount: Decimal,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking_spaces: u32,
    pub property_type: PropertyType,
    pub features: FeatureSet,
    pub pets_allowed: bool,
    pub available_date: NaiveDate,
    pub new_images: Vec<MediaUpload>,
    pub new_video: Option<MediaUpload>,
}

/// Landlord-facing property management service
pub struct PropertyService<P, G, M>
where
    P: PropertyRepository,
    G: GeographyRepository,
    M: MediaStorage,
{
    repository: Arc<P>,
    geography: Arc<G>,
    media_storage: Arc<M>,
    config: PropertyServiceConfig,
}

impl<P, G, M> PropertyService<P, G, M>
where
    P: PropertyRepository,
    G: GeographyRepository,
    M: MediaStorage,
{
    /// Create a new property service
    pub fn new(
        repository: Arc<P>,
        geography: Arc<G>,
        media_storage: Arc<M>,
        config: PropertyServiceConfig,
    ) -> Self {
        Self {
            repository,
            geography,
            media_storage,
            config,
        }
    }

    /// Fetch a single listing with its media
    pub async fn get(&self, id: i32) -> DomainResult<Property> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property"))
    }

    /// List a landlord's own properties, newest first
    pub async fn list_for_owner(
        &self,
        owner: Uuid,
        page: rw_shared::types::Pagination,
    ) -> DomainResult<rw_shared::types::PaginatedResponse<Property>> {
        self.repository.list_by_owner(owner, page.validate()).await
    }

    /// Create a listing for a landlord, uploading its media first
    pub async fn create(&self, owner: Uuid, input: CreateProperty) -> DomainResult<Property> {
        Self::validate_rent(input.rent_amount)?;
        self.check_media_limits(0, input.images.len(), false, input.video.is_some())?;

        let suburb = self
            .geography
            .find_suburb(input.suburb_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Suburb"))?;

        let media = self.upload_media(&input.images, input.video.as_ref()).await?;

        let property = Property {
            id: 0,
            user_id: owner,
            name: input.name,
            address: input.address,
            suburb,
            rent_amount: input.rent_amount,
            bedrooms: input.bedrooms,
            bathrooms: input.bathrooms,
            parking_spaces: input.parking_spaces,
            property_type: input.property_type,
            features: input.features,
            pets_allowed: input.pets_allowed,
            available_date: input.available_date,
            created_at: Utc::now(),
            media: media.into_iter().map(Self::to_media_row).collect(),
        };

        let created = self.repository.create(property).await?;
        info!(property_id = created.id, "property created");
        Ok(created)
    }

    /// Update a listing owned by `owner`; appends any newly uploaded media.
    ///
    /// Not-found and not-owned are indistinguishable to the caller.
    pub async fn update(
        &self,
        owner: Uuid,
        id: i32,
        input: UpdateProperty,
    ) -> DomainResult<Property> {
        Self::validate_rent(input.rent_amount)?;

        let existing = self.find_owned(owner, id).await?;
        self.check_media_limits(
            existing.image_count(),
            input.new_images.len(),
            existing.has_video(),
            input.new_video.is_some(),
        )?;

        let suburb = if input.suburb_id == existing.suburb.id {
            existing.suburb.clone()
        } else {
            self.geography
                .find_suburb(input.suburb_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Suburb"))?
        };

        let updated = self
            .repository
            .update(Property {
                name: input.name,
                address: input.address,
                suburb,
                rent_amount: input.rent_amount,
                bedrooms: input.bedrooms,
                bathrooms: input.bathrooms,
                parking_spaces: input.parking_spaces,
                property_type: input.property_type,
                features: input.features,
                pets_allowed: input.pets_allowed,
                available_date: input.available_date,
                ..existing
            })
            .await?;

        let new_media = self
            .upload_media(&input.new_images, input.new_video.as_ref())
            .await?;
        if !new_media.is_empty() {
            self.repository
                .add_media(id, new_media.into_iter().map(Self::to_media_row).collect())
                .await?;
        }

        self.get(id).await
    }

    /// Delete a listing owned by `owner`, cascading its media.
    ///
    /// Refused while the property still has an active lease (end date on or
    /// after today).
    pub async fn delete(&self, owner: Uuid, id: i32) -> DomainResult<()> {
        let property = self.find_owned(owner, id).await?;

        let today = Utc::now().date_naive();
        if self.repository.has_active_lease(id, today).await? {
            return Err(DomainError::BusinessRule {
                message: "Cannot delete a property with active leases".to_string(),
            });
        }

        for media in &property.media {
            // Best effort: a stale asset on the host must not block deletion
            if let Err(err) = self
                .media_storage
                .delete(&media.public_id, media.media_type)
                .await
            {
                warn!(
                    media_id = media.id,
                    error = %err,
                    "failed to remove hosted asset during property delete"
                );
            }
        }

        self.repository.delete(id).await?;
        info!(property_id = id, "property deleted");
        Ok(())
    }

    /// Delete one media asset from a listing owned by `owner`
    pub async fn delete_media(&self, owner: Uuid, media_id: i32) -> DomainResult<()> {
        let media = self
            .repository
            .find_media(media_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Media"))?;

        // Ownership is checked through the owning property
        self.find_owned(owner, media.property_id).await.map_err(|_| {
            DomainError::not_found("Media")
        })?;

        self.media_storage
            .delete(&media.public_id, media.media_type)
            .await?;
        self.repository.delete_media(media_id).await?;
        Ok(())
    }

    async fn find_owned(&self, owner: Uuid, id: i32) -> DomainResult<Property> {
        match self.repository.find_by_id(id).await? {
            Some(property) if property.user_id == owner => Ok(property),
            _ => Err(DomainError::not_found("Property")),
        }
    }

    fn validate_rent(rent: Decimal) -> Result<(), ValidationError> {
        if rent < Decimal::ZERO {
            return Err(ValidationError::Negative {
                field: "rent_amount".to_string(),
            });
        }
        Ok(())
    }

    fn check_media_limits(
        &self,
        existing_images: usize,
        new_images: usize,
        has_video: bool,
        adds_video: bool,
    ) -> Result<(), ValidationError> {
        let total_images = existing_images + new_images;
        if total_images > self.config.max_images {
            return Err(ValidationError::TooMany {
                field: "images".to_string(),
                max: self.config.max_images,
                actual: total_images,
            });
        }
        let total_videos = usize::from(has_video) + usize::from(adds_video);
        if total_videos > self.config.max_videos {
            return Err(ValidationError::TooMany {
                field: "videos".to_string(),
                max: self.config.max_videos,
                actual: total_videos,
            });
        }
        Ok(())
    }

    async fn upload_media(
        &self,
        images: &[MediaUpload],
        video: Option<&MediaUpload>,
    ) -> DomainResult<Vec<StoredMedia>> {
        let mut stored = Vec::with_capacity(images.len() + usize::from(video.is_some()));
        for image in images {
            stored.push(self.media_storage.upload_image(image).await?);
        }
        if let Some(video) = video {
            stored.push(self.media_storage.upload_video(video).await?);
        }
        Ok(stored)
    }

    fn to_media_row(stored: StoredMedia) -> PropertyMedia {
        PropertyMedia {
            id: 0,
            url: stored.url,
            public_id: stored.public_id,
            media_type: stored.media_type,
            property_id: 0,
        }
    }
}
