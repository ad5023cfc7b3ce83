use vegancity_entities::{email::*, vendor::*};

#[derive(Debug, Clone, Copy)]
pub enum NotificationEvent<'a> {
    VendorSubmitted {
        vendor: &'a Vendor,
        email_addresses: &'a [EmailAddress],
    },
    VendorApproved {
        vendor: &'a Vendor,
        email_address: &'a EmailAddress,
    },
}

impl NotificationEvent<'_> {
    pub const fn kind(&self) -> NotificationType {
        match self {
            Self::VendorSubmitted { .. } => NotificationType::VendorSubmitted,
            Self::VendorApproved { .. } => NotificationType::VendorApproved,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    VendorSubmitted,
    VendorApproved,
}

pub trait NotificationGateway {
    fn notify(&self, event: NotificationEvent);
}
