use super::*;

impl VegLevelRepo for DbReadOnly<'_> {
    fn create_veg_level(&self, _veg_level: VegLevel) -> Result<()> {
        Err(read_only_err())
    }
    fn get_veg_level(&self, id: &str) -> Result<VegLevel> {
        get_veg_level(&mut self.conn.borrow_mut(), id)
    }
    fn get_veg_level_by_name(&self, name: &str) -> Result<VegLevel> {
        get_veg_level_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_veg_levels(&self) -> Result<Vec<VegLevel>> {
        all_veg_levels(&mut self.conn.borrow_mut())
    }
}

impl VegLevelRepo for DbReadWrite<'_> {
    fn create_veg_level(&self, veg_level: VegLevel) -> Result<()> {
        create_veg_level(&mut self.conn.borrow_mut(), veg_level)
    }
    fn get_veg_level(&self, id: &str) -> Result<VegLevel> {
        get_veg_level(&mut self.conn.borrow_mut(), id)
    }
    fn get_veg_level_by_name(&self, name: &str) -> Result<VegLevel> {
        get_veg_level_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_veg_levels(&self) -> Result<Vec<VegLevel>> {
        all_veg_levels(&mut self.conn.borrow_mut())
    }
}

impl VegLevelRepo for DbConnection<'_> {
    fn create_veg_level(&self, veg_level: VegLevel) -> Result<()> {
        create_veg_level(&mut self.conn.borrow_mut(), veg_level)
    }
    fn get_veg_level(&self, id: &str) -> Result<VegLevel> {
        get_veg_level(&mut self.conn.borrow_mut(), id)
    }
    fn get_veg_level_by_name(&self, name: &str) -> Result<VegLevel> {
        get_veg_level_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_veg_levels(&self) -> Result<Vec<VegLevel>> {
        all_veg_levels(&mut self.conn.borrow_mut())
    }
}

impl TryFrom<models::VegLevel> for VegLevel {
    type Error = repo::Error;
    fn try_from(from: models::VegLevel) -> Result<Self> {
        let category = from
            .category
            .parse()
            .map_err(|_| anyhow!("Invalid veg category: {}", from.category))?;
        Ok(Self {
            id: from.id.into(),
            name: from.name,
            description: from.description,
            category,
        })
    }
}

fn create_veg_level(conn: &mut SqliteConnection, level: VegLevel) -> Result<()> {
    let level = models::VegLevel {
        id: level.id.into(),
        name: level.name,
        description: level.description,
        category: level.category.as_ref().to_owned(),
    };
    diesel::insert_into(schema::veg_levels::table)
        .values(&level)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_veg_level(conn: &mut SqliteConnection, id: &str) -> Result<VegLevel> {
    use schema::veg_levels::dsl;
    dsl::veg_levels
        .filter(dsl::id.eq(id))
        .first::<models::VegLevel>(conn)
        .map_err(from_diesel_err)?
        .try_into()
}

fn get_veg_level_by_name(conn: &mut SqliteConnection, name: &str) -> Result<VegLevel> {
    use schema::veg_levels::dsl;
    dsl::veg_levels
        .filter(dsl::name.eq(name))
        .first::<models::VegLevel>(conn)
        .map_err(from_diesel_err)?
        .try_into()
}

fn all_veg_levels(conn: &mut SqliteConnection) -> Result<Vec<VegLevel>> {
    use schema::veg_levels::dsl;
    dsl::veg_levels
        .order_by(dsl::name)
        .load::<models::VegLevel>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(VegLevel::try_from)
        .collect()
}
