use thiserror::Error;

use crate::{
    approval::ReturnToPending,
    repositories,
    util::validate::{ReviewInvalidation, VendorInvalidation},
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("The name is invalid")]
    Name,
    #[error("Invalid phone nr")]
    Phone,
    #[error("Invalid URL")]
    Url,
    #[error("Invalid email address")]
    Email,
    #[error("Empty review")]
    EmptyContent,
    #[error("Rating value out of range")]
    RatingValue,
    #[error("A vendor with this name already exists")]
    VendorExists,
    #[error("The vendor does not exist")]
    VendorDoesNotExist,
    #[error("The tag '{0}' does not exist")]
    TagDoesNotExist(String),
    #[error("The tag already exists")]
    TagExists,
    #[error("The veg level does not exist")]
    VegLevelDoesNotExist,
    #[error("The veg level already exists")]
    VegLevelExists,
    #[error("The neighborhood does not exist")]
    NeighborhoodDoesNotExist,
    #[error("The neighborhood already exists")]
    NeighborhoodExists,
    #[error("The user does not exist")]
    UserDoesNotExist,
    #[error("The user already exists")]
    UserExists,
    #[error(transparent)]
    ReturnToPending(#[from] ReturnToPending),
    #[error("A vendor that has never been stored already has a location")]
    InconsistentLocation,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<VendorInvalidation> for Error {
    fn from(err: VendorInvalidation) -> Self {
        match err {
            VendorInvalidation::Name => Self::Name,
            VendorInvalidation::Phone => Self::Phone,
            VendorInvalidation::Website => Self::Url,
        }
    }
}

impl From<ReviewInvalidation> for Error {
    fn from(err: ReviewInvalidation) -> Self {
        match err {
            ReviewInvalidation::Content => Self::EmptyContent,
            ReviewInvalidation::RatingValue => Self::RatingValue,
        }
    }
}
