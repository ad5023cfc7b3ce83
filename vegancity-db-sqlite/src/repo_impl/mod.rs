// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};
use vegancity_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod neighborhood;
mod review;
mod tag;
mod user;
mod veg_level;
mod vendor;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn read_only_err() -> repo::Error {
    repo::Error::Other(anyhow!("Cannot write through a read-only connection"))
}

fn load_approval_status(status: &str) -> Result<ApprovalStatus> {
    status
        .parse()
        .map_err(|_| anyhow!("Invalid approval status: {status}").into())
}

fn load_tag_kind(kind: &str) -> Result<TagKind> {
    kind.parse()
        .map_err(|_| anyhow!("Invalid tag kind: {kind}").into())
}
