use super::{create_vendor::*, geocoding::*, prelude::*};
use crate::{
    approval,
    gateways::geocode::GeoCodingGateway,
    util::{text::non_blank, validate::Validate},
};

#[rustfmt::skip]
#[derive(Debug, Default, Clone)]
pub struct UpdateVendor {
    pub name            : String,
    pub address         : Option<String>,
    /// `None` keeps the current neighborhood.
    /// An update cannot clear a neighborhood once it is set.
    pub neighborhood    : Option<String>,
    pub phone           : Option<String>,
    pub website         : Option<String>,
    pub notes           : Option<String>,
    pub veg_level       : Option<String>,
    pub approval_status : ApprovalStatus,
    pub cuisine_tags    : Vec<String>,
    pub feature_tags    : Vec<String>,
}

impl From<Vendor> for UpdateVendor {
    fn from(from: Vendor) -> Self {
        #[rustfmt::skip]
        let Vendor {
            name, address, neighborhood, phone, website, notes,
            veg_level, approval_status, cuisine_tags, feature_tags, ..
        } = from;
        Self {
            name,
            address,
            neighborhood: neighborhood.map(Into::into),
            phone,
            website,
            notes,
            veg_level: veg_level.map(Into::into),
            approval_status,
            cuisine_tags: cuisine_tags.into_iter().map(Into::into).collect(),
            feature_tags: feature_tags.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorableVendorUpdate {
    vendor: Vendor,
    previous_status: ApprovalStatus,
}

impl StorableVendorUpdate {
    pub const fn vendor(&self) -> &Vendor {
        &self.vendor
    }

    pub const fn previous_status(&self) -> ApprovalStatus {
        self.previous_status
    }
}

/// The result of a stored update.
#[derive(Debug, Clone)]
pub struct UpdatedVendor {
    pub vendor: Vendor,
    /// The submitter has to be notified about this update.
    pub initially_approved: bool,
}

pub fn prepare_updated_vendor<R, G>(
    repo: &R,
    geo: &G,
    id: &str,
    update: UpdateVendor,
) -> Result<StorableVendorUpdate>
where
    R: VendorRepo + NeighborhoodRepo + TagRepo + VegLevelRepo,
    G: GeoCodingGateway + ?Sized,
{
    let previous = match repo.get_vendor(id) {
        Ok(vendor) => vendor,
        Err(RepoError::NotFound) => return Err(Error::VendorDoesNotExist),
        Err(err) => return Err(err.into()),
    };
    approval::validate_transition(previous.approval_status, update.approval_status)?;

    let UpdateVendor {
        name,
        address,
        neighborhood,
        phone,
        website,
        notes,
        veg_level,
        approval_status,
        cuisine_tags,
        feature_tags,
    } = update;
    let address = non_blank(address);
    // A location is never kept without an address
    let location = address.as_ref().and(previous.location);
    let neighborhood = neighborhood
        .map(Id::from)
        .or_else(|| previous.neighborhood.clone());
    #[rustfmt::skip]
    let mut vendor = Vendor {
        id              : previous.id.clone(),
        name            : name.trim().to_owned(),
        address,
        location,
        neighborhood,
        phone           : non_blank(phone),
        website         : non_blank(website),
        notes           : non_blank(notes),
        veg_level       : veg_level.map(Id::from),
        approval_status,
        submitted_by    : previous.submitted_by.clone(),
        created         : previous.created,
        modified        : Timestamp::now(),
        cuisine_tags    : unique_ids(cuisine_tags),
        feature_tags    : unique_ids(feature_tags),
    };
    vendor.validate()?;
    check_unique_name(repo, &vendor)?;
    check_references(repo, &vendor)?;
    if needs_geocoding(&vendor, Some(&previous))? {
        apply_geocoding(repo, geo, &mut vendor)?;
    }
    Ok(StorableVendorUpdate {
        vendor,
        previous_status: previous.approval_status,
    })
}

pub fn store_updated_vendor<R: VendorRepo>(
    repo: &R,
    s: StorableVendorUpdate,
) -> Result<UpdatedVendor> {
    let StorableVendorUpdate {
        vendor,
        previous_status,
    } = s;
    log::debug!("Storing updated vendor: {vendor:?}");
    repo.update_vendor(&vendor)?;
    if previous_status != vendor.approval_status {
        log::info!(
            "Changed approval status of vendor {} from {previous_status} to {}",
            vendor.id,
            vendor.approval_status
        );
    }
    let initially_approved =
        approval::is_initial_approval(previous_status, vendor.approval_status);
    Ok(UpdatedVendor {
        vendor,
        initially_approved,
    })
}
