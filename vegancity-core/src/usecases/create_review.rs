use super::prelude::*;
use crate::util::{text::non_blank, validate::Validate};

#[rustfmt::skip]
#[derive(Debug, Default, Clone)]
pub struct NewReview {
    pub vendor_id              : String,
    pub author                 : String,
    pub title                  : Option<String>,
    pub food_rating            : Option<u8>,
    pub atmosphere_rating      : Option<u8>,
    pub content                : String,
    pub suggested_feature_tags : Option<String>,
    pub suggested_cuisine_tags : Option<String>,
}

#[derive(Debug, Clone)]
pub struct StorableReview(Review);

impl StorableReview {
    pub const fn review(&self) -> &Review {
        &self.0
    }
}

pub(crate) fn rating_value(value: Option<u8>) -> Result<Option<RatingValue>> {
    value
        .map(RatingValue::try_from)
        .transpose()
        .map_err(|_| Error::RatingValue)
}

pub fn prepare_new_review<R>(repo: &R, new_review: NewReview) -> Result<StorableReview>
where
    R: VendorRepo + UserRepo,
{
    let NewReview {
        vendor_id,
        author,
        title,
        food_rating,
        atmosphere_rating,
        content,
        suggested_feature_tags,
        suggested_cuisine_tags,
    } = new_review;
    match repo.get_vendor(&vendor_id) {
        Ok(_) => {}
        Err(RepoError::NotFound) => return Err(Error::VendorDoesNotExist),
        Err(err) => return Err(err.into()),
    }
    match repo.get_user(&author) {
        Ok(_) => {}
        Err(RepoError::NotFound) => return Err(Error::UserDoesNotExist),
        Err(err) => return Err(err.into()),
    }
    let now = Timestamp::now();
    #[rustfmt::skip]
    let review = Review {
        id                     : Id::new(),
        vendor_id              : vendor_id.into(),
        author                 : author.into(),
        approval_status        : ApprovalStatus::Pending,
        title                  : non_blank(title),
        food_rating            : rating_value(food_rating)?,
        atmosphere_rating      : rating_value(atmosphere_rating)?,
        content                : content.trim().to_owned(),
        suggested_feature_tags : non_blank(suggested_feature_tags),
        suggested_cuisine_tags : non_blank(suggested_cuisine_tags),
        created                : now,
        modified               : now,
    };
    review.validate()?;
    Ok(StorableReview(review))
}

pub fn store_new_review<R: ReviewRepo>(repo: &R, s: StorableReview) -> Result<Review> {
    let StorableReview(review) = s;
    log::debug!("Storing new review: {review:?}");
    repo.create_review(review.clone())?;
    log::info!(
        "Created review {} of vendor {}",
        review.id,
        review.vendor_id
    );
    Ok(review)
}
