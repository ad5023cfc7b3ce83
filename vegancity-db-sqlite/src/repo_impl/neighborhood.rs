use super::*;

impl NeighborhoodRepo for DbReadOnly<'_> {
    fn create_neighborhood(&self, _neighborhood: Neighborhood) -> Result<()> {
        Err(read_only_err())
    }
    fn get_neighborhood(&self, id: &str) -> Result<Neighborhood> {
        get_neighborhood(&mut self.conn.borrow_mut(), id)
    }
    fn get_neighborhood_by_name(&self, name: &str) -> Result<Neighborhood> {
        get_neighborhood_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_neighborhoods(&self) -> Result<Vec<Neighborhood>> {
        all_neighborhoods(&mut self.conn.borrow_mut())
    }
}

impl NeighborhoodRepo for DbReadWrite<'_> {
    fn create_neighborhood(&self, neighborhood: Neighborhood) -> Result<()> {
        create_neighborhood(&mut self.conn.borrow_mut(), neighborhood)
    }
    fn get_neighborhood(&self, id: &str) -> Result<Neighborhood> {
        get_neighborhood(&mut self.conn.borrow_mut(), id)
    }
    fn get_neighborhood_by_name(&self, name: &str) -> Result<Neighborhood> {
        get_neighborhood_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_neighborhoods(&self) -> Result<Vec<Neighborhood>> {
        all_neighborhoods(&mut self.conn.borrow_mut())
    }
}

impl NeighborhoodRepo for DbConnection<'_> {
    fn create_neighborhood(&self, neighborhood: Neighborhood) -> Result<()> {
        create_neighborhood(&mut self.conn.borrow_mut(), neighborhood)
    }
    fn get_neighborhood(&self, id: &str) -> Result<Neighborhood> {
        get_neighborhood(&mut self.conn.borrow_mut(), id)
    }
    fn get_neighborhood_by_name(&self, name: &str) -> Result<Neighborhood> {
        get_neighborhood_by_name(&mut self.conn.borrow_mut(), name)
    }
    fn all_neighborhoods(&self) -> Result<Vec<Neighborhood>> {
        all_neighborhoods(&mut self.conn.borrow_mut())
    }
}

impl From<Neighborhood> for models::Neighborhood {
    fn from(from: Neighborhood) -> Self {
        Self {
            id: from.id.into(),
            name: from.name,
            created_at: from.created.as_millis(),
        }
    }
}

impl From<models::Neighborhood> for Neighborhood {
    fn from(from: models::Neighborhood) -> Self {
        Self {
            id: from.id.into(),
            name: from.name,
            created: Timestamp::from_millis(from.created_at),
        }
    }
}

fn create_neighborhood(conn: &mut SqliteConnection, n: Neighborhood) -> Result<()> {
    diesel::insert_into(schema::neighborhoods::table)
        .values(&models::Neighborhood::from(n))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_neighborhood(conn: &mut SqliteConnection, id: &str) -> Result<Neighborhood> {
    use schema::neighborhoods::dsl;
    Ok(dsl::neighborhoods
        .filter(dsl::id.eq(id))
        .first::<models::Neighborhood>(conn)
        .map_err(from_diesel_err)?
        .into())
}

fn get_neighborhood_by_name(conn: &mut SqliteConnection, name: &str) -> Result<Neighborhood> {
    use schema::neighborhoods::dsl;
    Ok(dsl::neighborhoods
        .filter(dsl::name.eq(name))
        .first::<models::Neighborhood>(conn)
        .map_err(from_diesel_err)?
        .into())
}

fn all_neighborhoods(conn: &mut SqliteConnection) -> Result<Vec<Neighborhood>> {
    use schema::neighborhoods::dsl;
    Ok(dsl::neighborhoods
        .order_by(dsl::name)
        .load::<models::Neighborhood>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Neighborhood::from)
        .collect())
}
