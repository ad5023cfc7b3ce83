use super::prelude::*;

#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub role: Role,
}

pub fn create_user<R>(repo: &R, new_user: NewUser) -> Result<User>
where
    R: UserRepo + UserProfileRepo,
{
    let NewUser {
        username,
        email,
        role,
    } = new_user;
    let username = username.trim().to_owned();
    if username.is_empty() {
        return Err(Error::Name);
    }
    match repo.get_user_by_username(&username) {
        Ok(_) => return Err(Error::UserExists),
        Err(RepoError::NotFound) => {}
        Err(err) => return Err(err.into()),
    }
    let email = email
        .map(|e| e.parse::<EmailAddress>())
        .transpose()
        .map_err(|_| Error::Email)?;
    let user = User {
        id: Id::new(),
        username,
        email,
        role,
    };
    repo.create_user(&user)?;
    repo.create_or_update_profile(&UserProfile {
        user_id: user.id.clone(),
        ..Default::default()
    })?;
    log::info!("Created user {} with role {:?}", user.username, user.role);
    Ok(user)
}

pub fn change_user_role<R: UserRepo>(repo: &R, user_id: &str, role: Role) -> Result<User> {
    let user = match repo.get_user(user_id) {
        Ok(user) => user,
        Err(RepoError::NotFound) => return Err(Error::UserDoesNotExist),
        Err(err) => return Err(err.into()),
    };
    let user = User { role, ..user };
    repo.update_user(&user)?;
    log::info!("Changed role of user {} to {role:?}", user.username);
    Ok(user)
}

pub fn update_user_profile<R>(repo: &R, profile: UserProfile) -> Result<UserProfile>
where
    R: UserRepo + UserProfileRepo,
{
    match repo.get_user(profile.user_id.as_str()) {
        Ok(_) => {}
        Err(RepoError::NotFound) => return Err(Error::UserDoesNotExist),
        Err(err) => return Err(err.into()),
    }
    repo.create_or_update_profile(&profile)?;
    Ok(profile)
}

/// E-mail addresses of all staff members.
pub fn staff_email_addresses<R: UserRepo>(repo: &R) -> Result<Vec<EmailAddress>> {
    Ok(repo
        .staff_users()?
        .into_iter()
        .filter_map(|u| u.email)
        .collect())
}

/// E-mail address of the user who submitted the vendor, if known.
pub fn submitter_email_address<R: UserRepo>(
    repo: &R,
    vendor: &Vendor,
) -> Result<Option<EmailAddress>> {
    let Some(user_id) = &vendor.submitted_by else {
        return Ok(None);
    };
    match repo.get_user(user_id.as_str()) {
        Ok(user) => Ok(user.email),
        Err(RepoError::NotFound) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};

    fn new_user(username: &str, email: Option<&str>, role: Role) -> NewUser {
        NewUser {
            username: username.into(),
            email: email.map(Into::into),
            role,
        }
    }

    #[test]
    fn create_user_with_profile() {
        let db = MockDb::default();
        let user = create_user(&db, new_user("alice", Some("alice@example.org"), Role::User))
            .unwrap();
        assert_eq!(1, db.profiles.borrow().len());
        assert_eq!(user.id, db.profiles.borrow()[0].user_id);
        assert!(matches!(
            create_user(&db, new_user("alice", None, Role::User)),
            Err(Error::UserExists)
        ));
        assert!(matches!(
            create_user(&db, new_user("bob", Some("no address"), Role::User)),
            Err(Error::Email)
        ));
    }

    #[test]
    fn staff_recipients() {
        let db = MockDb::default();
        create_user(&db, new_user("alice", Some("alice@example.org"), Role::User)).unwrap();
        create_user(&db, new_user("bob", Some("bob@example.org"), Role::Staff)).unwrap();
        create_user(&db, new_user("carol", None, Role::Admin)).unwrap();
        let dave = create_user(&db, new_user("dave", Some("dave@example.org"), Role::User))
            .unwrap();
        change_user_role(&db, dave.id.as_str(), Role::Admin).unwrap();
        let addresses: Vec<_> = staff_email_addresses(&db)
            .unwrap()
            .into_iter()
            .map(EmailAddress::into_string)
            .collect();
        assert_eq!(vec!["bob@example.org", "dave@example.org"], addresses);
    }
}
