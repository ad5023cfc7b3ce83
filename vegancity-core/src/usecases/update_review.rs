use super::{create_review::rating_value, prelude::*};
use crate::{
    approval,
    util::{text::non_blank, validate::Validate},
};

#[rustfmt::skip]
#[derive(Debug, Default, Clone)]
pub struct UpdateReview {
    pub title                  : Option<String>,
    pub food_rating            : Option<u8>,
    pub atmosphere_rating      : Option<u8>,
    pub content                : String,
    pub suggested_feature_tags : Option<String>,
    pub suggested_cuisine_tags : Option<String>,
    pub approval_status        : ApprovalStatus,
}

impl From<Review> for UpdateReview {
    fn from(from: Review) -> Self {
        Self {
            title: from.title,
            food_rating: from.food_rating.map(u8::from),
            atmosphere_rating: from.atmosphere_rating.map(u8::from),
            content: from.content,
            suggested_feature_tags: from.suggested_feature_tags,
            suggested_cuisine_tags: from.suggested_cuisine_tags,
            approval_status: from.approval_status,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorableReviewUpdate {
    review: Review,
    previous_status: ApprovalStatus,
}

impl StorableReviewUpdate {
    pub const fn review(&self) -> &Review {
        &self.review
    }
}

pub fn prepare_updated_review<R: ReviewRepo>(
    repo: &R,
    id: &str,
    update: UpdateReview,
) -> Result<StorableReviewUpdate> {
    let previous = repo.get_review(id)?;
    approval::validate_transition(previous.approval_status, update.approval_status)?;
    let UpdateReview {
        title,
        food_rating,
        atmosphere_rating,
        content,
        suggested_feature_tags,
        suggested_cuisine_tags,
        approval_status,
    } = update;
    let previous_status = previous.approval_status;
    let review = Review {
        title: non_blank(title),
        food_rating: rating_value(food_rating)?,
        atmosphere_rating: rating_value(atmosphere_rating)?,
        content: content.trim().to_owned(),
        suggested_feature_tags: non_blank(suggested_feature_tags),
        suggested_cuisine_tags: non_blank(suggested_cuisine_tags),
        approval_status,
        modified: Timestamp::now(),
        ..previous
    };
    review.validate()?;
    Ok(StorableReviewUpdate {
        review,
        previous_status,
    })
}

pub fn store_updated_review<R: ReviewRepo>(repo: &R, s: StorableReviewUpdate) -> Result<Review> {
    let StorableReviewUpdate {
        review,
        previous_status,
    } = s;
    repo.update_review(&review)?;
    if previous_status != review.approval_status {
        log::info!(
            "Changed approval status of review {} from {previous_status} to {}",
            review.id,
            review.approval_status
        );
    }
    Ok(review)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use vegancity_entities::builders::*;

    #[test]
    fn approve_and_quarantine() {
        let db = MockDb::default();
        let review = Review::build().id("r").content("Nice").finish();
        db.reviews.borrow_mut().push(review.clone());
        for status in [ApprovalStatus::Approved, ApprovalStatus::Quarantined] {
            let mut update = UpdateReview::from(db.reviews.borrow()[0].clone());
            update.approval_status = status;
            let s = prepare_updated_review(&db, "r", update).unwrap();
            store_updated_review(&db, s).unwrap();
            assert_eq!(status, db.reviews.borrow()[0].approval_status);
        }
    }

    #[test]
    fn no_return_to_pending() {
        let db = MockDb::default();
        let review = Review::build().id("r").content("Nice").approved().finish();
        db.reviews.borrow_mut().push(review.clone());
        let mut update = UpdateReview::from(review);
        update.approval_status = ApprovalStatus::Pending;
        assert!(matches!(
            prepare_updated_review(&db, "r", update),
            Err(Error::ReturnToPending(_))
        ));
        assert_eq!(
            ApprovalStatus::Approved,
            db.reviews.borrow()[0].approval_status
        );
    }
}
