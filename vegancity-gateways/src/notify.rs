use std::{collections::HashSet, sync::Arc};

use vegancity_core::{
    entities::*,
    gateways::notify::{NotificationEvent, NotificationGateway, NotificationType},
};

use crate::{email::EmailGateway, user_communication};

#[derive(Clone)]
pub struct Notify {
    email_gw: Arc<dyn EmailGateway + Send + Sync + 'static>,
    notify_on: HashSet<NotificationType>,
}

impl Notify {
    pub fn new<G>(gw: G, notify_on: HashSet<NotificationType>) -> Self
    where
        G: EmailGateway + Send + Sync + 'static,
    {
        Self {
            email_gw: Arc::new(gw),
            notify_on,
        }
    }

    fn skip(&self, ev: &NotificationEvent) -> bool {
        !self.notify_on.contains(&ev.kind())
    }
}

impl NotificationGateway for Notify {
    fn notify(&self, event: NotificationEvent) {
        use NotificationEvent as E;
        if self.skip(&event) {
            log::debug!("Notifications of type {:?} are disabled", event.kind());
            return;
        }
        match event {
            E::VendorSubmitted {
                vendor,
                email_addresses,
            } => {
                let content = match user_communication::vendor_submitted_email(vendor) {
                    Ok(content) => content,
                    Err(err) => {
                        log::error!("Failed to render e-mail for vendor {}: {err}", vendor.id);
                        return;
                    }
                };
                log::info!(
                    "Sending e-mails to {} recipients after vendor {} submitted",
                    email_addresses.len(),
                    vendor.id,
                );
                compose_and_send_emails(&*self.email_gw, email_addresses, &content);
            }
            E::VendorApproved {
                vendor,
                email_address,
            } => {
                let content = match user_communication::vendor_approved_email(vendor) {
                    Ok(content) => content,
                    Err(err) => {
                        log::error!("Failed to render e-mail for vendor {}: {err}", vendor.id);
                        return;
                    }
                };
                log::info!(
                    "Sending e-mail to {email_address} after vendor {} approved",
                    vendor.id
                );
                compose_and_send_emails(
                    &*self.email_gw,
                    std::slice::from_ref(email_address),
                    &content,
                );
            }
        }
    }
}

fn compose_and_send_emails(
    gw: &dyn EmailGateway,
    recipients: &[EmailAddress],
    email_content: &EmailContent,
) {
    if recipients.is_empty() {
        log::debug!("No recipients for e-mail '{}'", email_content.subject);
        return;
    }
    gw.compose_and_send(recipients, email_content);
}
