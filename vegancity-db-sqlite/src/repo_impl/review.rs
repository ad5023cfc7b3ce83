use std::collections::HashMap;

use super::*;

impl ReviewRepo for DbReadOnly<'_> {
    fn create_review(&self, _review: Review) -> Result<()> {
        Err(read_only_err())
    }
    fn update_review(&self, _review: &Review) -> Result<()> {
        Err(read_only_err())
    }

    fn get_review(&self, id: &str) -> Result<Review> {
        get_review(&mut self.conn.borrow_mut(), id)
    }
    fn get_reviews(&self, ids: &[&str]) -> Result<Vec<Review>> {
        get_reviews(&mut self.conn.borrow_mut(), ids)
    }
    fn all_reviews(&self) -> Result<Vec<Review>> {
        all_reviews(&mut self.conn.borrow_mut())
    }
    fn reviews_by_status(&self, status: ApprovalStatus) -> Result<Vec<Review>> {
        reviews_by_status(&mut self.conn.borrow_mut(), status)
    }
    fn approved_reviews_of_vendor(&self, vendor_id: &str) -> Result<Vec<Review>> {
        approved_reviews_of_vendor(&mut self.conn.borrow_mut(), vendor_id)
    }
    fn count_approved_reviews_per_vendor(&self) -> Result<HashMap<Id, usize>> {
        count_approved_reviews_per_vendor(&mut self.conn.borrow_mut())
    }
}

impl ReviewRepo for DbReadWrite<'_> {
    fn create_review(&self, review: Review) -> Result<()> {
        create_review(&mut self.conn.borrow_mut(), &review)
    }
    fn update_review(&self, review: &Review) -> Result<()> {
        update_review(&mut self.conn.borrow_mut(), review)
    }

    fn get_review(&self, id: &str) -> Result<Review> {
        get_review(&mut self.conn.borrow_mut(), id)
    }
    fn get_reviews(&self, ids: &[&str]) -> Result<Vec<Review>> {
        get_reviews(&mut self.conn.borrow_mut(), ids)
    }
    fn all_reviews(&self) -> Result<Vec<Review>> {
        all_reviews(&mut self.conn.borrow_mut())
    }
    fn reviews_by_status(&self, status: ApprovalStatus) -> Result<Vec<Review>> {
        reviews_by_status(&mut self.conn.borrow_mut(), status)
    }
    fn approved_reviews_of_vendor(&self, vendor_id: &str) -> Result<Vec<Review>> {
        approved_reviews_of_vendor(&mut self.conn.borrow_mut(), vendor_id)
    }
    fn count_approved_reviews_per_vendor(&self) -> Result<HashMap<Id, usize>> {
        count_approved_reviews_per_vendor(&mut self.conn.borrow_mut())
    }
}

impl ReviewRepo for DbConnection<'_> {
    fn create_review(&self, review: Review) -> Result<()> {
        create_review(&mut self.conn.borrow_mut(), &review)
    }
    fn update_review(&self, review: &Review) -> Result<()> {
        update_review(&mut self.conn.borrow_mut(), review)
    }

    fn get_review(&self, id: &str) -> Result<Review> {
        get_review(&mut self.conn.borrow_mut(), id)
    }
    fn get_reviews(&self, ids: &[&str]) -> Result<Vec<Review>> {
        get_reviews(&mut self.conn.borrow_mut(), ids)
    }
    fn all_reviews(&self) -> Result<Vec<Review>> {
        all_reviews(&mut self.conn.borrow_mut())
    }
    fn reviews_by_status(&self, status: ApprovalStatus) -> Result<Vec<Review>> {
        reviews_by_status(&mut self.conn.borrow_mut(), status)
    }
    fn approved_reviews_of_vendor(&self, vendor_id: &str) -> Result<Vec<Review>> {
        approved_reviews_of_vendor(&mut self.conn.borrow_mut(), vendor_id)
    }
    fn count_approved_reviews_per_vendor(&self) -> Result<HashMap<Id, usize>> {
        count_approved_reviews_per_vendor(&mut self.conn.borrow_mut())
    }
}

impl<'a> From<&'a Review> for models::NewReview<'a> {
    fn from(from: &'a Review) -> Self {
        Self {
            id: from.id.as_str(),
            vendor_id: from.vendor_id.as_str(),
            author: from.author.as_str(),
            approval_status: from.approval_status.as_str(),
            title: from.title.as_deref(),
            food_rating: from.food_rating.map(i16::from),
            atmosphere_rating: from.atmosphere_rating.map(i16::from),
            content: &from.content,
            suggested_feature_tags: from.suggested_feature_tags.as_deref(),
            suggested_cuisine_tags: from.suggested_cuisine_tags.as_deref(),
            created_at: from.created.as_millis(),
            modified_at: from.modified.as_millis(),
        }
    }
}

fn load_rating_value(value: Option<i16>) -> Result<Option<RatingValue>> {
    value
        .map(|v| RatingValue::try_from(i64::from(v)))
        .transpose()
        .map_err(|err| anyhow!(err).into())
}

impl TryFrom<models::ReviewEntity> for Review {
    type Error = repo::Error;
    fn try_from(from: models::ReviewEntity) -> Result<Self> {
        #[rustfmt::skip]
        let models::ReviewEntity {
            id, vendor_id, author, approval_status, title, food_rating,
            atmosphere_rating, content, suggested_feature_tags,
            suggested_cuisine_tags, created_at, modified_at,
        } = from;
        Ok(Self {
            id: id.into(),
            vendor_id: vendor_id.into(),
            author: author.into(),
            approval_status: load_approval_status(&approval_status)?,
            title,
            food_rating: load_rating_value(food_rating)?,
            atmosphere_rating: load_rating_value(atmosphere_rating)?,
            content,
            suggested_feature_tags,
            suggested_cuisine_tags,
            created: Timestamp::from_millis(created_at),
            modified: Timestamp::from_millis(modified_at),
        })
    }
}

fn load_reviews(entities: Vec<models::ReviewEntity>) -> Result<Vec<Review>> {
    entities.into_iter().map(Review::try_from).collect()
}

fn create_review(conn: &mut SqliteConnection, review: &Review) -> Result<()> {
    diesel::insert_into(schema::reviews::table)
        .values(&models::NewReview::from(review))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_review(conn: &mut SqliteConnection, review: &Review) -> Result<()> {
    use schema::reviews::dsl;
    let count = diesel::update(dsl::reviews.filter(dsl::id.eq(review.id.as_str())))
        .set(&models::NewReview::from(review))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_review(conn: &mut SqliteConnection, id: &str) -> Result<Review> {
    use schema::reviews::dsl;
    dsl::reviews
        .filter(dsl::id.eq(id))
        .first::<models::ReviewEntity>(conn)
        .map_err(from_diesel_err)?
        .try_into()
}

fn get_reviews(conn: &mut SqliteConnection, ids: &[&str]) -> Result<Vec<Review>> {
    use schema::reviews::dsl;
    let entities = dsl::reviews
        .filter(dsl::id.eq_any(ids))
        .order_by(dsl::created_at.desc())
        .load::<models::ReviewEntity>(conn)
        .map_err(from_diesel_err)?;
    load_reviews(entities)
}

fn all_reviews(conn: &mut SqliteConnection) -> Result<Vec<Review>> {
    use schema::reviews::dsl;
    let entities = dsl::reviews
        .order_by(dsl::created_at.desc())
        .load::<models::ReviewEntity>(conn)
        .map_err(from_diesel_err)?;
    load_reviews(entities)
}

fn reviews_by_status(conn: &mut SqliteConnection, status: ApprovalStatus) -> Result<Vec<Review>> {
    use schema::reviews::dsl;
    let entities = dsl::reviews
        .filter(dsl::approval_status.eq(status.as_str()))
        .order_by(dsl::created_at.desc())
        .load::<models::ReviewEntity>(conn)
        .map_err(from_diesel_err)?;
    load_reviews(entities)
}

fn approved_reviews_of_vendor(conn: &mut SqliteConnection, vendor_id: &str) -> Result<Vec<Review>> {
    use schema::reviews::dsl;
    let entities = dsl::reviews
        .filter(dsl::vendor_id.eq(vendor_id))
        .filter(dsl::approval_status.eq(ApprovalStatus::Approved.as_str()))
        .order_by(dsl::created_at.desc())
        .load::<models::ReviewEntity>(conn)
        .map_err(from_diesel_err)?;
    load_reviews(entities)
}

fn count_approved_reviews_per_vendor(conn: &mut SqliteConnection) -> Result<HashMap<Id, usize>> {
    use schema::reviews::dsl;
    let vendor_ids = dsl::reviews
        .filter(dsl::approval_status.eq(ApprovalStatus::Approved.as_str()))
        .select(dsl::vendor_id)
        .load::<String>(conn)
        .map_err(from_diesel_err)?;
    let mut counts = HashMap::new();
    for vendor_id in vendor_ids {
        *counts.entry(Id::from(vendor_id)).or_default() += 1;
    }
    Ok(counts)
}
