//! Request and response data transfer objects

pub mod geography;
pub mod property;

pub use geography::{DistrictResponse, RegionResponse, SuburbResponse};
pub use property::{
    CreatePropertyRequest, MediaResponse, MediaUploadRequest, OwnerListQuery, PropertyResponse,
    SearchQuery, UpdatePropertyRequest,
};
