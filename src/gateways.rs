use anyhow::Result;
use vegancity_core::{
    entities::*,
    gateways::{
        email::EmailGateway,
        geocode::{GeoCodingGateway, GeocodedAddress},
    },
};
use vegancity_gateways::{
    email::{mailgun::Mailgun, send_to_json_file::SendToJsonFile, sendmail::Sendmail},
    notify::Notify,
    opencage::OpenCage,
};

use crate::config;

pub fn notification_gateway(cfg: &config::Config) -> Result<Notify> {
    let notify_on = cfg.notifications.notify_on.clone();
    let notify = match &cfg.email.gateway {
        Some(config::EmailGateway::MailGun {
            api_base_url,
            api_key,
            domain,
            sender_address,
        }) => {
            log::info!("Use Mailgun gateway");
            let gw = Mailgun {
                api_key: api_key.clone(),
                api_base_url: api_base_url.clone(),
                domain: domain.clone(),
                from_email: sender_address.clone(),
            };
            Notify::new(gw, notify_on)
        }
        Some(config::EmailGateway::Sendmail { sender_address }) => {
            log::info!("Use sendmail gateway");
            Notify::new(Sendmail::new(sender_address.clone()), notify_on)
        }
        Some(config::EmailGateway::EmailToJsonFile { dir }) => {
            let gw = SendToJsonFile::try_new(dir)?;
            log::info!("Use JSON file email gateway ({})", gw.path().display());
            Notify::new(gw, notify_on)
        }
        None => {
            log::warn!("No e-mail gateway was configured");
            Notify::new(DummyMailGw, notify_on)
        }
    };
    Ok(notify)
}

pub fn geocoding_gateway(cfg: &config::Config) -> Geocoder {
    match &cfg.geocoding.gateway {
        Some(config::GeocodingGateway::OpenCage { api_key }) => {
            log::info!("Use OpenCage geocoding gateway");
            Geocoder(Some(OpenCage::new(api_key.clone(), cfg.geocoding.bounds)))
        }
        None => {
            log::warn!("No geocoding gateway was configured: addresses will not be resolved");
            Geocoder(None)
        }
    }
}

pub struct Geocoder(Option<OpenCage>);

impl GeoCodingGateway for Geocoder {
    fn resolve_address(&self, address: &str) -> Option<GeocodedAddress> {
        self.0.as_ref()?.resolve_address(address)
    }
}

struct DummyMailGw;

impl EmailGateway for DummyMailGw {
    fn compose_and_send(&self, recipients: &[EmailAddress], email: &EmailContent) {
        log::debug!(
            "Cannot send '{}' to {} recipient(s) because no e-mail gateway was configured",
            email.subject,
            recipients.len()
        );
    }
}
