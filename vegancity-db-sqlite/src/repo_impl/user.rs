use super::*;

impl UserRepo for DbReadOnly<'_> {
    fn create_user(&self, _user: &User) -> Result<()> {
        Err(read_only_err())
    }
    fn update_user(&self, _user: &User) -> Result<()> {
        Err(read_only_err())
    }
    fn get_user(&self, id: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn get_user_by_username(&self, username: &str) -> Result<User> {
        get_user_by_username(&mut self.conn.borrow_mut(), username)
    }
    fn all_users(&self) -> Result<Vec<User>> {
        all_users(&mut self.conn.borrow_mut())
    }
}

impl UserRepo for DbReadWrite<'_> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }
    fn get_user(&self, id: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn get_user_by_username(&self, username: &str) -> Result<User> {
        get_user_by_username(&mut self.conn.borrow_mut(), username)
    }
    fn all_users(&self) -> Result<Vec<User>> {
        all_users(&mut self.conn.borrow_mut())
    }
}

impl UserRepo for DbConnection<'_> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }
    fn get_user(&self, id: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn get_user_by_username(&self, username: &str) -> Result<User> {
        get_user_by_username(&mut self.conn.borrow_mut(), username)
    }
    fn all_users(&self) -> Result<Vec<User>> {
        all_users(&mut self.conn.borrow_mut())
    }
}

impl UserProfileRepo for DbReadOnly<'_> {
    fn create_or_update_profile(&self, _profile: &UserProfile) -> Result<()> {
        Err(read_only_err())
    }
    fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        get_profile(&mut self.conn.borrow_mut(), user_id)
    }
}

impl UserProfileRepo for DbReadWrite<'_> {
    fn create_or_update_profile(&self, profile: &UserProfile) -> Result<()> {
        create_or_update_profile(&mut self.conn.borrow_mut(), profile)
    }
    fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        get_profile(&mut self.conn.borrow_mut(), user_id)
    }
}

impl UserProfileRepo for DbConnection<'_> {
    fn create_or_update_profile(&self, profile: &UserProfile) -> Result<()> {
        create_or_update_profile(&mut self.conn.borrow_mut(), profile)
    }
    fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        get_profile(&mut self.conn.borrow_mut(), user_id)
    }
}

impl<'a> From<&'a User> for models::NewUser<'a> {
    fn from(from: &'a User) -> Self {
        Self {
            id: from.id.as_str(),
            username: &from.username,
            email: from.email.as_ref().map(EmailAddress::as_str),
            role: RolePrimitive::from(from.role),
        }
    }
}

impl TryFrom<models::UserEntity> for User {
    type Error = repo::Error;
    fn try_from(from: models::UserEntity) -> Result<Self> {
        let models::UserEntity {
            id,
            username,
            email,
            role,
        } = from;
        let email = email
            .map(|e| e.parse::<EmailAddress>())
            .transpose()
            .map_err(|err| anyhow!("Invalid e-mail address of user {id}: {err}"))?;
        let role = Role::try_from(role).map_err(|err| anyhow!(err))?;
        Ok(Self {
            id: id.into(),
            username,
            email,
            role,
        })
    }
}

fn create_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    diesel::insert_into(schema::users::table)
        .values(&models::NewUser::from(u))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    use schema::users::dsl;
    let count = diesel::update(dsl::users.filter(dsl::id.eq(u.id.as_str())))
        .set(&models::NewUser::from(u))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_user(conn: &mut SqliteConnection, id: &str) -> Result<User> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::id.eq(id))
        .first::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?
        .try_into()
}

fn get_user_by_username(conn: &mut SqliteConnection, username: &str) -> Result<User> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::username.eq(username))
        .first::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?
        .try_into()
}

fn all_users(conn: &mut SqliteConnection) -> Result<Vec<User>> {
    use schema::users::dsl;
    dsl::users
        .order_by(dsl::username)
        .load::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(User::try_from)
        .collect()
}

fn create_or_update_profile(conn: &mut SqliteConnection, p: &UserProfile) -> Result<()> {
    use schema::user_profiles::dsl;
    let profile = models::UserProfile {
        user_id: p.user_id.to_string(),
        bio: p.bio.clone(),
        mailing_list: p.mailing_list,
        karma_points: p.karma_points,
    };
    diesel::insert_into(schema::user_profiles::table)
        .values(&profile)
        .on_conflict(dsl::user_id)
        .do_update()
        .set(&profile)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_profile(conn: &mut SqliteConnection, user_id: &str) -> Result<UserProfile> {
    use schema::user_profiles::dsl;
    let models::UserProfile {
        user_id,
        bio,
        mailing_list,
        karma_points,
    } = dsl::user_profiles
        .filter(dsl::user_id.eq(user_id))
        .first::<models::UserProfile>(conn)
        .map_err(from_diesel_err)?;
    Ok(UserProfile {
        user_id: user_id.into(),
        bio,
        mailing_list,
        karma_points,
    })
}
