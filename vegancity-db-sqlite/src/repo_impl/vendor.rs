use super::*;

impl VendorRepo for DbReadOnly<'_> {
    fn create_vendor(&self, _vendor: Vendor) -> Result<()> {
        Err(read_only_err())
    }
    fn update_vendor(&self, _vendor: &Vendor) -> Result<()> {
        Err(read_only_err())
    }

    fn get_vendor(&self, id: &str) -> Result<Vendor> {
        get_vendor(&mut self.conn.borrow_mut(), id)
    }
    fn get_vendors(&self, ids: &[&str]) -> Result<Vec<Vendor>> {
        get_vendors(&mut self.conn.borrow_mut(), ids)
    }
    fn get_vendor_by_name(&self, name: &str) -> Result<Vendor> {
        get_vendor_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn count_vendors(&self) -> Result<usize> {
        count_vendors(&mut self.conn.borrow_mut())
    }
    fn all_vendors(&self) -> Result<Vec<Vendor>> {
        all_vendors(&mut self.conn.borrow_mut())
    }
    fn vendors_by_status(&self, status: ApprovalStatus) -> Result<Vec<Vendor>> {
        vendors_by_status(&mut self.conn.borrow_mut(), status)
    }
    fn approved_vendors_by_ids(&self, ids: &[&str]) -> Result<Vec<Vendor>> {
        approved_vendors_by_ids(&mut self.conn.borrow_mut(), ids)
    }
    fn approved_vendors_by_tags(&self, tag_ids: &[&str]) -> Result<Vec<Vendor>> {
        approved_vendors_by_tags(&mut self.conn.borrow_mut(), tag_ids)
    }
    fn approved_vendors_within(&self, center: MapPoint, distance_deg: f64) -> Result<Vec<Vendor>> {
        approved_vendors_within(&mut self.conn.borrow_mut(), center, distance_deg)
    }
}

impl VendorRepo for DbReadWrite<'_> {
    fn create_vendor(&self, vendor: Vendor) -> Result<()> {
        create_vendor(&mut self.conn.borrow_mut(), &vendor)
    }
    fn update_vendor(&self, vendor: &Vendor) -> Result<()> {
        update_vendor(&mut self.conn.borrow_mut(), vendor)
    }

    fn get_vendor(&self, id: &str) -> Result<Vendor> {
        get_vendor(&mut self.conn.borrow_mut(), id)
    }
    fn get_vendors(&self, ids: &[&str]) -> Result<Vec<Vendor>> {
        get_vendors(&mut self.conn.borrow_mut(), ids)
    }
    fn get_vendor_by_name(&self, name: &str) -> Result<Vendor> {
        get_vendor_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn count_vendors(&self) -> Result<usize> {
        count_vendors(&mut self.conn.borrow_mut())
    }
    fn all_vendors(&self) -> Result<Vec<Vendor>> {
        all_vendors(&mut self.conn.borrow_mut())
    }
    fn vendors_by_status(&self, status: ApprovalStatus) -> Result<Vec<Vendor>> {
        vendors_by_status(&mut self.conn.borrow_mut(), status)
    }
    fn approved_vendors_by_ids(&self, ids: &[&str]) -> Result<Vec<Vendor>> {
        approved_vendors_by_ids(&mut self.conn.borrow_mut(), ids)
    }
    fn approved_vendors_by_tags(&self, tag_ids: &[&str]) -> Result<Vec<Vendor>> {
        approved_vendors_by_tags(&mut self.conn.borrow_mut(), tag_ids)
    }
    fn approved_vendors_within(&self, center: MapPoint, distance_deg: f64) -> Result<Vec<Vendor>> {
        approved_vendors_within(&mut self.conn.borrow_mut(), center, distance_deg)
    }
}

impl VendorRepo for DbConnection<'_> {
    fn create_vendor(&self, vendor: Vendor) -> Result<()> {
        create_vendor(&mut self.conn.borrow_mut(), &vendor)
    }
    fn update_vendor(&self, vendor: &Vendor) -> Result<()> {
        update_vendor(&mut self.conn.borrow_mut(), vendor)
    }

    fn get_vendor(&self, id: &str) -> Result<Vendor> {
        get_vendor(&mut self.conn.borrow_mut(), id)
    }
    fn get_vendors(&self, ids: &[&str]) -> Result<Vec<Vendor>> {
        get_vendors(&mut self.conn.borrow_mut(), ids)
    }
    fn get_vendor_by_name(&self, name: &str) -> Result<Vendor> {
        get_vendor_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn count_vendors(&self) -> Result<usize> {
        count_vendors(&mut self.conn.borrow_mut())
    }
    fn all_vendors(&self) -> Result<Vec<Vendor>> {
        all_vendors(&mut self.conn.borrow_mut())
    }
    fn vendors_by_status(&self, status: ApprovalStatus) -> Result<Vec<Vendor>> {
        vendors_by_status(&mut self.conn.borrow_mut(), status)
    }
    fn approved_vendors_by_ids(&self, ids: &[&str]) -> Result<Vec<Vendor>> {
        approved_vendors_by_ids(&mut self.conn.borrow_mut(), ids)
    }
    fn approved_vendors_by_tags(&self, tag_ids: &[&str]) -> Result<Vec<Vendor>> {
        approved_vendors_by_tags(&mut self.conn.borrow_mut(), tag_ids)
    }
    fn approved_vendors_within(&self, center: MapPoint, distance_deg: f64) -> Result<Vec<Vendor>> {
        approved_vendors_within(&mut self.conn.borrow_mut(), center, distance_deg)
    }
}

impl<'a> From<&'a Vendor> for models::NewVendor<'a> {
    fn from(from: &'a Vendor) -> Self {
        #[rustfmt::skip]
        let Vendor {
            id, name, address, location, neighborhood, phone, website, notes,
            veg_level, approval_status, submitted_by, created, modified, ..
        } = from;
        Self {
            id: id.as_str(),
            name,
            address: address.as_deref(),
            lat: location.map(MapPoint::lat),
            lng: location.map(MapPoint::lng),
            neighborhood_id: neighborhood.as_ref().map(Id::as_str),
            phone: phone.as_deref(),
            website: website.as_deref(),
            notes: notes.as_deref(),
            veg_level_id: veg_level.as_ref().map(Id::as_str),
            approval_status: approval_status.as_str(),
            submitted_by: submitted_by.as_ref().map(Id::as_str),
            created_at: created.as_millis(),
            modified_at: modified.as_millis(),
        }
    }
}

fn insert_vendor_tags(conn: &mut SqliteConnection, vendor: &Vendor) -> Result<()> {
    let vendor_tags: Vec<_> = vendor
        .cuisine_tags
        .iter()
        .chain(vendor.feature_tags.iter())
        .map(|tag_id| models::VendorTag {
            vendor_id: vendor.id.as_str(),
            tag_id: tag_id.as_str(),
        })
        .collect();
    if vendor_tags.is_empty() {
        return Ok(());
    }
    diesel::insert_into(schema::vendor_tags::table)
        .values(&vendor_tags)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn create_vendor(conn: &mut SqliteConnection, vendor: &Vendor) -> Result<()> {
    diesel::insert_into(schema::vendors::table)
        .values(&models::NewVendor::from(vendor))
        .execute(conn)
        .map_err(from_diesel_err)?;
    insert_vendor_tags(conn, vendor)
}

fn update_vendor(conn: &mut SqliteConnection, vendor: &Vendor) -> Result<()> {
    use schema::{vendor_tags::dsl as t_dsl, vendors::dsl};
    let count = diesel::update(dsl::vendors.filter(dsl::id.eq(vendor.id.as_str())))
        .set(&models::NewVendor::from(vendor))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    diesel::delete(t_dsl::vendor_tags.filter(t_dsl::vendor_id.eq(vendor.id.as_str())))
        .execute(conn)
        .map_err(from_diesel_err)?;
    insert_vendor_tags(conn, vendor)
}

fn load_vendor(conn: &mut SqliteConnection, entity: models::VendorEntity) -> Result<Vendor> {
    use schema::{tags::dsl as tag_dsl, vendor_tags::dsl};
    #[rustfmt::skip]
    let models::VendorEntity {
        id, name, address, lat, lng, neighborhood_id, phone, website, notes,
        veg_level_id, approval_status, submitted_by, created_at, modified_at,
    } = entity;
    let approval_status = load_approval_status(&approval_status)?;
    let location = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(MapPoint::from_lat_lng_deg(lat, lng)),
        (None, None) => None,
        _ => {
            log::warn!("Ignoring incomplete location of vendor {id}");
            None
        }
    };
    let tags = dsl::vendor_tags
        .inner_join(tag_dsl::tags)
        .filter(dsl::vendor_id.eq(&id))
        .select((tag_dsl::id, tag_dsl::kind))
        .order_by(tag_dsl::name)
        .load::<(String, String)>(conn)
        .map_err(from_diesel_err)?;
    let mut cuisine_tags = vec![];
    let mut feature_tags = vec![];
    for (tag_id, kind) in tags {
        match load_tag_kind(&kind)? {
            TagKind::Cuisine => cuisine_tags.push(tag_id.into()),
            TagKind::Feature => feature_tags.push(tag_id.into()),
        }
    }
    Ok(Vendor {
        id: id.into(),
        name,
        address,
        location,
        neighborhood: neighborhood_id.map(Into::into),
        phone,
        website,
        notes,
        veg_level: veg_level_id.map(Into::into),
        approval_status,
        submitted_by: submitted_by.map(Into::into),
        created: Timestamp::from_millis(created_at),
        modified: Timestamp::from_millis(modified_at),
        cuisine_tags,
        feature_tags,
    })
}

fn load_vendors(
    conn: &mut SqliteConnection,
    entities: Vec<models::VendorEntity>,
) -> Result<Vec<Vendor>> {
    entities
        .into_iter()
        .map(|entity| load_vendor(conn, entity))
        .collect()
}

fn get_vendor(conn: &mut SqliteConnection, id: &str) -> Result<Vendor> {
    use schema::vendors::dsl;
    let entity = dsl::vendors
        .filter(dsl::id.eq(id))
        .first::<models::VendorEntity>(conn)
        .map_err(from_diesel_err)?;
    load_vendor(conn, entity)
}

fn get_vendors(conn: &mut SqliteConnection, ids: &[&str]) -> Result<Vec<Vendor>> {
    use schema::vendors::dsl;
    let entities = dsl::vendors
        .filter(dsl::id.eq_any(ids))
        .order_by(dsl::name)
        .load::<models::VendorEntity>(conn)
        .map_err(from_diesel_err)?;
    load_vendors(conn, entities)
}

fn get_vendor_by_name(conn: &mut SqliteConnection, name: &str) -> Result<Vendor> {
    use schema::vendors::dsl;
    let entity = dsl::vendors
        .filter(dsl::name.eq(name))
        .first::<models::VendorEntity>(conn)
        .map_err(from_diesel_err)?;
    load_vendor(conn, entity)
}

fn count_vendors(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::vendors::dsl;
    Ok(dsl::vendors
        .select(diesel::dsl::count(dsl::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}

fn all_vendors(conn: &mut SqliteConnection) -> Result<Vec<Vendor>> {
    use schema::vendors::dsl;
    let entities = dsl::vendors
        .order_by(dsl::name)
        .load::<models::VendorEntity>(conn)
        .map_err(from_diesel_err)?;
    load_vendors(conn, entities)
}

fn vendors_by_status(conn: &mut SqliteConnection, status: ApprovalStatus) -> Result<Vec<Vendor>> {
    use schema::vendors::dsl;
    let entities = dsl::vendors
        .filter(dsl::approval_status.eq(status.as_str()))
        .order_by(dsl::name)
        .load::<models::VendorEntity>(conn)
        .map_err(from_diesel_err)?;
    load_vendors(conn, entities)
}

fn approved_vendors_by_ids(conn: &mut SqliteConnection, ids: &[&str]) -> Result<Vec<Vendor>> {
    use schema::vendors::dsl;
    let entities = dsl::vendors
        .filter(dsl::approval_status.eq(ApprovalStatus::Approved.as_str()))
        .filter(dsl::id.eq_any(ids))
        .order_by(dsl::name)
        .load::<models::VendorEntity>(conn)
        .map_err(from_diesel_err)?;
    load_vendors(conn, entities)
}

fn approved_vendors_by_tags(conn: &mut SqliteConnection, tag_ids: &[&str]) -> Result<Vec<Vendor>> {
    use schema::vendor_tags::dsl;
    let vendor_ids = dsl::vendor_tags
        .filter(dsl::tag_id.eq_any(tag_ids))
        .select(dsl::vendor_id)
        .distinct()
        .load::<String>(conn)
        .map_err(from_diesel_err)?;
    let vendor_ids: Vec<_> = vendor_ids.iter().map(String::as_str).collect();
    approved_vendors_by_ids(conn, &vendor_ids)
}

fn approved_vendors_within(
    conn: &mut SqliteConnection,
    center: MapPoint,
    distance_deg: f64,
) -> Result<Vec<Vendor>> {
    use schema::vendors::dsl;
    // Prefilter by the bounding box before measuring the exact distance
    let bbox = center.bbox_around(distance_deg);
    let sw = bbox.south_west();
    let ne = bbox.north_east();
    let entities = dsl::vendors
        .filter(dsl::approval_status.eq(ApprovalStatus::Approved.as_str()))
        .filter(dsl::lat.between(sw.lat(), ne.lat()))
        .filter(dsl::lng.between(sw.lng(), ne.lng()))
        .order_by(dsl::name)
        .load::<models::VendorEntity>(conn)
        .map_err(from_diesel_err)?;
    Ok(load_vendors(conn, entities)?
        .into_iter()
        .filter(|v| {
            v.location
                .map(|pos| pos.is_within(center, distance_deg))
                .unwrap_or(false)
        })
        .collect())
}
