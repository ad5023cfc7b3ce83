use super::schema::*;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub struct NewUser<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub role: i16,
}

#[derive(Queryable)]
pub struct UserEntity {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub role: i16,
}

#[derive(Insertable, AsChangeset, Queryable)]
#[diesel(table_name = user_profiles, treat_none_as_null = true)]
pub struct UserProfile {
    pub user_id: String,
    pub bio: Option<String>,
    pub mailing_list: bool,
    pub karma_points: Option<i32>,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = neighborhoods)]
pub struct Neighborhood {
    pub id: String,
    pub name: String,
    pub created_at: i64,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = veg_levels)]
pub struct VegLevel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = tags)]
pub struct Tag {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub description: String,
    pub created_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = vendors, treat_none_as_null = true)]
pub struct NewVendor<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub address: Option<&'a str>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub neighborhood_id: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub website: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub veg_level_id: Option<&'a str>,
    pub approval_status: &'a str,
    pub submitted_by: Option<&'a str>,
    pub created_at: i64,
    pub modified_at: i64,
}

#[derive(Queryable)]
pub struct VendorEntity {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub neighborhood_id: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub veg_level_id: Option<String>,
    pub approval_status: String,
    pub submitted_by: Option<String>,
    pub created_at: i64,
    pub modified_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = vendor_tags)]
pub struct VendorTag<'a> {
    pub vendor_id: &'a str,
    pub tag_id: &'a str,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = reviews, treat_none_as_null = true)]
pub struct NewReview<'a> {
    pub id: &'a str,
    pub vendor_id: &'a str,
    pub author: &'a str,
    pub approval_status: &'a str,
    pub title: Option<&'a str>,
    pub food_rating: Option<i16>,
    pub atmosphere_rating: Option<i16>,
    pub content: &'a str,
    pub suggested_feature_tags: Option<&'a str>,
    pub suggested_cuisine_tags: Option<&'a str>,
    pub created_at: i64,
    pub modified_at: i64,
}

#[derive(Queryable)]
pub struct ReviewEntity {
    pub id: String,
    pub vendor_id: String,
    pub author: String,
    pub approval_status: String,
    pub title: Option<String>,
    pub food_rating: Option<i16>,
    pub atmosphere_rating: Option<i16>,
    pub content: String,
    pub suggested_feature_tags: Option<String>,
    pub suggested_cuisine_tags: Option<String>,
    pub created_at: i64,
    pub modified_at: i64,
}
