use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::entities::*;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

lazy_static! {
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9 ().\-/]+$").unwrap();
}

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

pub fn is_valid_phone(phone: &str) -> bool {
    if !PHONE_REGEX.is_match(phone) {
        return false;
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

pub fn is_valid_website(website: &str) -> bool {
    match Url::parse(website) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VendorInvalidation {
    #[error("Empty name")]
    Name,
    #[error("Invalid phone number")]
    Phone,
    #[error("Invalid website")]
    Website,
}

impl Validate for Vendor {
    type Error = VendorInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if self.name.trim().is_empty() {
            return Err(Self::Error::Name);
        }
        if let Some(phone) = &self.phone {
            if !is_valid_phone(phone) {
                return Err(Self::Error::Phone);
            }
        }
        if let Some(website) = &self.website {
            if !is_valid_website(website) {
                return Err(Self::Error::Website);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewInvalidation {
    #[error("Empty content")]
    Content,
    #[error("Rating value out of range")]
    RatingValue,
}

impl Validate for Review {
    type Error = ReviewInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if self.content.trim().is_empty() {
            return Err(Self::Error::Content);
        }
        let ratings = [self.food_rating, self.atmosphere_rating];
        if ratings.iter().flatten().any(|r| !r.is_valid()) {
            return Err(Self::Error::RatingValue);
        }
        Ok(())
    }
}
