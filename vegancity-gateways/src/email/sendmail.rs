#[cfg(not(test))]
use std::{
    io::prelude::*,
    process::{Command, Stdio},
};
use std::{
    io::{Error, ErrorKind, Result},
    thread,
};

use itertools::Itertools;
use time::{format_description::well_known::Rfc2822, OffsetDateTime};
use vegancity_core::entities::*;

use super::EmailGateway;

#[derive(Debug, Clone)]
pub struct Sendmail {
    from: EmailAddress,
}

impl Sendmail {
    pub const fn new(from: EmailAddress) -> Self {
        Self { from }
    }

    fn send(&self, mail: String) {
        thread::spawn(move || {
            if let Err(err) = send_raw(&mail) {
                log::warn!("Could not send e-mail: {err}");
            }
        });
    }
}

#[cfg(not(test))]
fn send_raw(mail: &str) -> Result<()> {
    let mut child = Command::new("sendmail")
        .arg("-t")
        .stdin(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .as_mut()
        .ok_or_else(|| Error::new(ErrorKind::Other, "Could not get stdin"))?
        .write_all(mail.as_bytes())?;
    child.wait_with_output()?;
    Ok(())
}

/// Don't actually send emails while running the tests.
#[cfg(test)]
fn send_raw(email: &str) -> Result<()> {
    log::debug!("Would send e-mail: {email}");
    Ok(())
}

impl EmailGateway for Sendmail {
    fn compose_and_send(&self, recipients: &[EmailAddress], email: &EmailContent) {
        log::debug!("Sending e-mails to: {recipients:?}");
        for to in recipients {
            match compose(&self.from, std::slice::from_ref(to), &email.subject, &email.body) {
                Ok(mail) => {
                    self.send(mail);
                }
                Err(err) => {
                    log::warn!("Failed to compose e-mail: {err}");
                }
            }
        }
    }
}

// quoted_printable limits the length of lines to 76 chars
// and otherwise inserts unintended line breaks! The max.
// length of a header line is 78 chars including the \r\n
// line break.
const MAX_HEADER_FIELD_LEN: usize = 76;

const LINE_BREAK: &str = "\r\n";

fn encode_header_field_partially(input: &str, encoded_max_len: usize) -> (String, usize) {
    debug_assert!(encoded_max_len >= "=?UTF-8?Q??=".len());
    debug_assert!(encoded_max_len <= MAX_HEADER_FIELD_LEN);
    // Binary search for the longest prefix of the input
    // that fits into the encoded length.
    let mut input_min_len = 0;
    let mut input_max_len = input.len() * 2;
    loop {
        debug_assert!(input_min_len <= input_max_len);
        let mut input_len = input_min_len + (input_max_len - input_min_len) / 2;
        while !input.is_char_boundary(input_len) {
            input_len -= 1;
        }
        let encoded = format!(
            "=?UTF-8?Q?{}?=",
            quoted_printable::encode_to_str(input[..input_len].as_bytes())
        );
        if encoded.len() <= encoded_max_len {
            if input_len == input_min_len {
                return (encoded, input_len);
            }
            input_min_len = input_len;
        } else {
            debug_assert!(input_min_len < input_len);
            input_max_len = input_len;
        }
    }
}

fn encode_header_field(name: &str, input: &str) -> String {
    let mut prefix_len = name.len() + 1;
    let mut encoded_output = String::with_capacity(prefix_len + input.len() * 2);
    encoded_output.push_str(name);
    encoded_output.push(':');
    let mut input_len = 0;
    while input_len < input.len() {
        if input_len > 0 {
            // continuation line
            encoded_output.push_str(LINE_BREAK);
            encoded_output.push(' ');
            prefix_len = 1;
        }
        let (encoded_part, input_part_len) =
            encode_header_field_partially(&input[input_len..], MAX_HEADER_FIELD_LEN - prefix_len);
        debug_assert!(input_part_len > 0);
        encoded_output.push_str(&encoded_part);
        input_len += input_part_len;
    }
    encoded_output
}

pub fn compose(
    from: &EmailAddress,
    to: &[EmailAddress],
    subject: &str,
    body: &str,
) -> Result<String> {
    if to.is_empty() {
        return Err(Error::new(
            ErrorKind::Other,
            "No valid email addresses specified",
        ));
    }
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let date = now
        .format(&Rfc2822)
        .map_err(|err| Error::new(ErrorKind::Other, err))?;
    let email = format!(
        "Date:{date}\r\n\
         From:{from}\r\n\
         To:{to}\r\n\
         {subject_header}\r\n\
         MIME-Version:1.0\r\n\
         Content-Type:text/plain;charset=utf-8\r\n\r\n\
         {body}",
        to = to.iter().join(","),
        subject_header = encode_header_field("Subject", subject),
    );
    log::debug!("Composed email: {email}");
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(s: &str) -> EmailAddress {
        s.parse().unwrap()
    }

    #[test]
    fn compose_simple_mail() {
        let mail = compose(
            &address(r#""VegPhilly" <info@vegphilly.com>"#),
            &[address("staff@vegphilly.com")],
            "[VegPhilly] New Vendor Submitted: Café Vedge",
            "Hello Mail",
        )
        .unwrap();
        let expected = "From:\"VegPhilly\" <info@vegphilly.com>\r\n\
             To:staff@vegphilly.com\r\n\
             Subject:=?UTF-8?Q?[VegPhilly] New Vendor Submitted: Caf=C3=A9 Vedge?=\r\n\
             MIME-Version:1.0\r\n\
             Content-Type:text/plain;charset=utf-8\r\n\r\n\
             Hello Mail";
        assert!(mail.starts_with("Date:"));
        assert!(mail.contains(expected));
    }

    #[test]
    fn wrap_long_subjects() {
        let subject = "Vegan cheesesteaks, seitan wings and soft serve ice cream: \
                       äöü all reviewed by the staff of our vegan guide to Philadelphia";
        let header = encode_header_field("Subject", subject);
        let lines: Vec<_> = header.split(LINE_BREAK).collect();
        assert!(lines.len() > 1);
        assert!(lines[0].starts_with("Subject:=?UTF-8?Q?"));
        for line in &lines {
            assert!(line.len() <= MAX_HEADER_FIELD_LEN);
            assert!(line.ends_with("?="));
        }
        for line in &lines[1..] {
            assert!(line.starts_with(" =?UTF-8?Q?"));
        }
    }

    #[test]
    fn require_recipients() {
        assert!(compose(&address("info@vegphilly.com"), &[], "foo", "bar").is_err());
    }
}
