///////////////////////////////////////////////////////////////////////
// Users
///////////////////////////////////////////////////////////////////////

table! {
    users (id) {
        id -> Text,
        username -> Text,
        email -> Nullable<Text>,
        role -> SmallInt,
    }
}

table! {
    user_profiles (user_id) {
        user_id -> Text,
        bio -> Nullable<Text>,
        mailing_list -> Bool,
        karma_points -> Nullable<Integer>,
    }
}

joinable!(user_profiles -> users (user_id));

///////////////////////////////////////////////////////////////////////
// Categories
///////////////////////////////////////////////////////////////////////

table! {
    neighborhoods (id) {
        id -> Text,
        name -> Text,
        created_at -> BigInt,
    }
}

table! {
    veg_levels (id) {
        id -> Text,
        name -> Text,
        description -> Text,
        category -> Text,
    }
}

table! {
    tags (id) {
        id -> Text,
        kind -> Text,
        name -> Text,
        description -> Text,
        created_at -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Vendors
///////////////////////////////////////////////////////////////////////

table! {
    vendors (id) {
        id -> Text,
        name -> Text,
        address -> Nullable<Text>,
        lat -> Nullable<Double>,
        lng -> Nullable<Double>,
        neighborhood_id -> Nullable<Text>,
        phone -> Nullable<Text>,
        website -> Nullable<Text>,
        notes -> Nullable<Text>,
        veg_level_id -> Nullable<Text>,
        approval_status -> Text,
        submitted_by -> Nullable<Text>,
        created_at -> BigInt,
        modified_at -> BigInt,
    }
}

table! {
    vendor_tags (vendor_id, tag_id) {
        vendor_id -> Text,
        tag_id -> Text,
    }
}

joinable!(vendor_tags -> vendors (vendor_id));
joinable!(vendor_tags -> tags (tag_id));

///////////////////////////////////////////////////////////////////////
// Reviews
///////////////////////////////////////////////////////////////////////

table! {
    reviews (id) {
        id -> Text,
        vendor_id -> Text,
        author -> Text,
        approval_status -> Text,
        title -> Nullable<Text>,
        food_rating -> Nullable<SmallInt>,
        atmosphere_rating -> Nullable<SmallInt>,
        content -> Text,
        suggested_feature_tags -> Nullable<Text>,
        suggested_cuisine_tags -> Nullable<Text>,
        created_at -> BigInt,
        modified_at -> BigInt,
    }
}

joinable!(reviews -> vendors (vendor_id));

allow_tables_to_appear_in_same_query!(
    users,
    user_profiles,
    neighborhoods,
    veg_levels,
    tags,
    vendors,
    vendor_tags,
    reviews,
);
