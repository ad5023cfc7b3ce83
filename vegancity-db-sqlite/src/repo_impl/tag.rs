use super::*;

impl TagRepo for DbReadOnly<'_> {
    fn create_tag(&self, _tag: Tag) -> Result<()> {
        Err(read_only_err())
    }
    fn get_tag(&self, id: &str) -> Result<Tag> {
        get_tag(&mut self.conn.borrow_mut(), id)
    }
    fn get_tag_by_name(&self, kind: TagKind, name: &str) -> Result<Tag> {
        get_tag_by_name(&mut self.conn.borrow_mut(), kind, name)
    }
    fn all_tags(&self, kind: TagKind) -> Result<Vec<Tag>> {
        all_tags(&mut self.conn.borrow_mut(), kind)
    }
}

impl TagRepo for DbReadWrite<'_> {
    fn create_tag(&self, tag: Tag) -> Result<()> {
        create_tag(&mut self.conn.borrow_mut(), tag)
    }
    fn get_tag(&self, id: &str) -> Result<Tag> {
        get_tag(&mut self.conn.borrow_mut(), id)
    }
    fn get_tag_by_name(&self, kind: TagKind, name: &str) -> Result<Tag> {
        get_tag_by_name(&mut self.conn.borrow_mut(), kind, name)
    }
    fn all_tags(&self, kind: TagKind) -> Result<Vec<Tag>> {
        all_tags(&mut self.conn.borrow_mut(), kind)
    }
}

impl TagRepo for DbConnection<'_> {
    fn create_tag(&self, tag: Tag) -> Result<()> {
        create_tag(&mut self.conn.borrow_mut(), tag)
    }
    fn get_tag(&self, id: &str) -> Result<Tag> {
        get_tag(&mut self.conn.borrow_mut(), id)
    }
    fn get_tag_by_name(&self, kind: TagKind, name: &str) -> Result<Tag> {
        get_tag_by_name(&mut self.conn.borrow_mut(), kind, name)
    }
    fn all_tags(&self, kind: TagKind) -> Result<Vec<Tag>> {
        all_tags(&mut self.conn.borrow_mut(), kind)
    }
}

impl From<Tag> for models::Tag {
    fn from(from: Tag) -> Self {
        Self {
            id: from.id.into(),
            kind: from.kind.as_ref().to_owned(),
            name: from.name,
            description: from.description,
            created_at: from.created.as_millis(),
        }
    }
}

impl TryFrom<models::Tag> for Tag {
    type Error = repo::Error;
    fn try_from(from: models::Tag) -> Result<Self> {
        Ok(Self {
            id: from.id.into(),
            kind: load_tag_kind(&from.kind)?,
            name: from.name,
            description: from.description,
            created: Timestamp::from_millis(from.created_at),
        })
    }
}

fn create_tag(conn: &mut SqliteConnection, tag: Tag) -> Result<()> {
    diesel::insert_into(schema::tags::table)
        .values(&models::Tag::from(tag))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_tag(conn: &mut SqliteConnection, id: &str) -> Result<Tag> {
    use schema::tags::dsl;
    dsl::tags
        .filter(dsl::id.eq(id))
        .first::<models::Tag>(conn)
        .map_err(from_diesel_err)?
        .try_into()
}

fn get_tag_by_name(conn: &mut SqliteConnection, kind: TagKind, name: &str) -> Result<Tag> {
    use schema::tags::dsl;
    dsl::tags
        .filter(dsl::kind.eq(kind.as_ref()))
        .filter(dsl::name.eq(name))
        .first::<models::Tag>(conn)
        .map_err(from_diesel_err)?
        .try_into()
}

fn all_tags(conn: &mut SqliteConnection, kind: TagKind) -> Result<Vec<Tag>> {
    use schema::tags::dsl;
    dsl::tags
        .filter(dsl::kind.eq(kind.as_ref()))
        .order_by(dsl::name)
        .load::<models::Tag>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Tag::try_from)
        .collect()
}
