use jfs::Store;
use serde::{Deserialize, Serialize};
use std::{io, path::Path};
use vegancity_core::entities::*;

use super::EmailGateway;

/// Stores e-mails as JSON files instead of sending them.
///
/// Intended for local development and testing.
pub struct SendToJsonFile {
    json_store: Store,
}

impl SendToJsonFile {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self { json_store })
    }

    pub fn path(&self) -> &Path {
        self.json_store.path()
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct JsonEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl JsonEmail {
    fn new(to: &EmailAddress, content: &EmailContent) -> Self {
        let subject = content.subject.to_owned();
        let body = content.body.to_owned();
        let to = to.as_str().to_owned();
        Self { to, subject, body }
    }
}

impl EmailGateway for SendToJsonFile {
    fn compose_and_send(&self, recipients: &[EmailAddress], content: &EmailContent) {
        for to in recipients {
            let now = Timestamp::now().as_millis();
            let key = format!("{now}-{to}", to = to.as_str());
            let email = JsonEmail::new(to, content);
            if let Err(err) = self.json_store.save_with_id(&email, &key) {
                log::warn!("Unable to save email in JSON file: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn save_one_file_per_recipient() {
        let dir = tempfile::tempdir().unwrap();
        let gw = SendToJsonFile::try_new(dir.path()).unwrap();
        let recipients = [
            EmailAddress::new_unchecked("a@example.org".into()),
            EmailAddress::new_unchecked("b@example.org".into()),
        ];
        let content = EmailContent {
            subject: "New vendor".into(),
            body: "Vedge".into(),
        };
        gw.compose_and_send(&recipients, &content);
        let saved: BTreeMap<String, JsonEmail> = gw.json_store.all().unwrap();
        assert_eq!(2, saved.len());
        let mut to: Vec<_> = saved.values().map(|e| e.to.as_str()).collect();
        to.sort_unstable();
        assert_eq!(vec!["a@example.org", "b@example.org"], to);
        assert!(saved.values().all(|e| e.subject == "New vendor"));
    }
}
