use askama::Template;
use vegancity_core::entities::*;

#[derive(Template)]
#[template(path = "vendor_submitted/subject.txt")]
struct VendorSubmittedSubjectTemplate<'a> {
    name: &'a str,
}

#[derive(Template)]
#[template(path = "vendor_submitted/body.txt")]
struct VendorSubmittedBodyTemplate<'a> {
    id: &'a str,
    name: &'a str,
    address: &'a str,
    phone: &'a str,
    website: &'a str,
    notes: &'a str,
}

#[derive(Template)]
#[template(path = "vendor_approved/subject.txt")]
struct VendorApprovedSubjectTemplate<'a> {
    name: &'a str,
}

#[derive(Template)]
#[template(path = "vendor_approved/body.txt")]
struct VendorApprovedBodyTemplate<'a> {
    name: &'a str,
    address: &'a str,
}

/// Notifies staff about a vendor that awaits approval.
pub fn vendor_submitted_email(vendor: &Vendor) -> askama::Result<EmailContent> {
    let name = vendor.name.as_str();
    let subject = VendorSubmittedSubjectTemplate { name }.render()?;
    let body = VendorSubmittedBodyTemplate {
        id: vendor.id.as_str(),
        name,
        address: vendor.address.as_deref().unwrap_or_default(),
        phone: vendor.phone.as_deref().unwrap_or_default(),
        website: vendor.website.as_deref().unwrap_or_default(),
        notes: vendor.notes.as_deref().unwrap_or_default(),
    }
    .render()?;
    Ok(EmailContent {
        subject: subject.trim().to_owned(),
        body,
    })
}

/// Thanks the submitter of a vendor after the initial approval.
pub fn vendor_approved_email(vendor: &Vendor) -> askama::Result<EmailContent> {
    let name = vendor.name.as_str();
    let subject = VendorApprovedSubjectTemplate { name }.render()?;
    let body = VendorApprovedBodyTemplate {
        name,
        address: vendor.address.as_deref().unwrap_or_default(),
    }
    .render()?;
    Ok(EmailContent {
        subject: subject.trim().to_owned(),
        body,
    })
}
