use anyhow::{anyhow, Result};
use std::{
    collections::HashSet,
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use vegancity_core::{entities::*, gateways::notify::NotificationType};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "vegancity.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

pub struct Config {
    pub db: Db,
    pub geocoding: Geocoding,
    pub email: Email,
    pub notifications: Notifications,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let explicit = file_path.is_some();
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound if !explicit => {
                    log::info!(
                        "{DEFAULT_CONFIG_FILE_NAME} not found => load default configuration."
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(anyhow!(
                    "Unable to read configuration file {}: {err}",
                    file_path.display()
                )),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u32,
    /// File system directory for the full-text search index.
    pub index_dir: Option<PathBuf>,
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
    /// Results are biased towards this area.
    pub bounds: Option<MapBbox>,
}

pub enum GeocodingGateway {
    OpenCage { api_key: String },
}

pub struct Email {
    pub gateway: Option<EmailGateway>,
}

#[derive(Clone)]
pub enum EmailGateway {
    MailGun {
        api_base_url: String,
        api_key: String,
        domain: String,
        sender_address: EmailAddress,
    },
    Sendmail {
        sender_address: EmailAddress,
    },
    /// For local testing purposes
    EmailToJsonFile {
        /// File system directory for writing emails into JSON files.
        dir: PathBuf,
    },
}

pub struct Notifications {
    pub notify_on: HashSet<NotificationType>,
}

fn missing_gateway(name: &str) -> anyhow::Error {
    anyhow!("Missing '{name}' gateway configuration")
}

fn parse_sender_address(address: &str) -> Result<EmailAddress> {
    address
        .parse()
        .map_err(|err| anyhow!("Invalid sender address '{address}': {err}"))
}

fn bbox_from_bounds(bounds: raw::Bounds) -> Result<MapBbox> {
    let raw::Bounds {
        south_west: [sw_lat, sw_lng],
        north_east: [ne_lat, ne_lng],
    } = bounds;
    let sw = MapPoint::try_from_lat_lng_deg(sw_lat, sw_lng)
        .ok_or_else(|| anyhow!("Invalid south-west corner of geocoding bounds"))?;
    let ne = MapPoint::try_from_lat_lng_deg(ne_lat, ne_lng)
        .ok_or_else(|| anyhow!("Invalid north-east corner of geocoding bounds"))?;
    if sw.lat() > ne.lat() || sw.lng() > ne.lng() {
        return Err(anyhow!(
            "The south-west corner of the geocoding bounds must not lie north or east of the north-east corner"
        ));
    }
    Ok(MapBbox::new(sw, ne))
}

impl From<raw::NotificationType> for NotificationType {
    fn from(from: raw::NotificationType) -> Self {
        match from {
            raw::NotificationType::VendorSubmitted => Self::VendorSubmitted,
            raw::NotificationType::VendorApproved => Self::VendorApproved,
        }
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            geocoding,
            email,
            notifications,
            gateway,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
            index_dir,
        } = db.unwrap_or_default();

        if connection_pool_size == 0 {
            return Err(anyhow!("The connection pool must not be empty"));
        }
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
            index_dir,
        };

        let gateway = gateway.unwrap_or_default();

        let email_gateway = match email.and_then(|m| m.gateway) {
            Some(raw::EmailGateway::Mailgun) => {
                let raw::MailGun {
                    api_key,
                    domain,
                    sender_address,
                    api_base_url,
                } = gateway
                    .mailgun
                    .ok_or_else(|| missing_gateway("mailgun"))?;
                let sender_address = parse_sender_address(&sender_address)?;
                let api_base_url =
                    api_base_url.unwrap_or_else(|| "https://api.mailgun.net/v3".to_string());
                Some(EmailGateway::MailGun {
                    api_base_url,
                    api_key,
                    domain,
                    sender_address,
                })
            }
            Some(raw::EmailGateway::Sendmail) => {
                let raw::Sendmail { sender_address } = gateway
                    .sendmail
                    .ok_or_else(|| missing_gateway("sendmail"))?;
                let sender_address = parse_sender_address(&sender_address)?;
                Some(EmailGateway::Sendmail { sender_address })
            }
            Some(raw::EmailGateway::EmailToJsonFile) => {
                let raw::EmailToJsonFile { dir } = gateway
                    .email_to_json_file
                    .ok_or_else(|| missing_gateway("email-to-json-file"))?;
                Some(EmailGateway::EmailToJsonFile { dir })
            }
            None => None,
        };
        let email = Email {
            gateway: email_gateway,
        };

        let (geo_gateway, bounds) = match geocoding {
            Some(raw::Geocoding { gateway: gw, bounds }) => (gw, bounds),
            None => (None, None),
        };
        let geo_gateway = match geo_gateway {
            Some(raw::GeocodingGateway::Opencage) => {
                let raw::OpenCage { api_key } = gateway
                    .opencage
                    .ok_or_else(|| missing_gateway("opencage"))?;
                Some(GeocodingGateway::OpenCage { api_key })
            }
            None => None,
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
            bounds: bounds.map(bbox_from_bounds).transpose()?,
        };

        let raw::Notifications { notify_on } = notifications.unwrap_or_default();
        let notifications = Notifications {
            notify_on: notify_on.into_iter().map(Into::into).collect(),
        };

        Ok(Self {
            db,
            geocoding,
            email,
            notifications,
        })
    }
}
