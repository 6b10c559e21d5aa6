//! Postgres implementation of the engine's entity store.
//!
//! Multi-row writes run inside a single transaction so a failure leaves no
//! partial state behind.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use potluck_core::{
    ComponentLink, Cookbook, CookbookFilter, CookbookRecipeLink, EntityStore, GraphCheck,
    OwnerGraph, Profile, Recipe, RecipeFilter, SavedRecipe, StoreError, StoreResult,
};
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::{
    CookbookRecipeRow, CookbookRow, NewComponentLink, ProfileRow, RecipeRow, SavedRecipeRow,
};
use crate::schema::{component_links, cookbook_recipes, cookbooks, profiles, recipes, saved_recipes};

type PgPooled = PooledConnection<ConnectionManager<PgConnection>>;

pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn conn(&self) -> StoreResult<PgPooled> {
        self.pool.get().map_err(|e| {
            tracing::error!("Database connection failed: {}", e);
            StoreError::Unavailable("Database connection failed".to_string())
        })
    }
}

fn store_err(err: DieselError) -> StoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreError::Conflict(info.message().to_string())
        }
        other => {
            tracing::error!("Database query failed: {}", other);
            StoreError::Unavailable("Database query failed".to_string())
        }
    }
}

/// Failure inside a checked write: either the database or the caller's check.
enum TxError {
    Db(DieselError),
    Rejected(String),
}

impl From<DieselError> for TxError {
    fn from(err: DieselError) -> Self {
        TxError::Db(err)
    }
}

fn tx_err(err: TxError) -> StoreError {
    match err {
        TxError::Db(err) => store_err(err),
        TxError::Rejected(message) => StoreError::Rejected(message),
    }
}

/// Lock every recipe row of `owner_id` and read the links between them.
///
/// Rows are locked in id order so concurrent checked writes for one owner
/// queue up instead of deadlocking.
fn lock_owner_graph(conn: &mut PgConnection, owner_id: Uuid) -> QueryResult<OwnerGraph> {
    let rows: Vec<RecipeRow> = recipes::table
        .filter(recipes::owner_id.eq(owner_id))
        .order(recipes::id.asc())
        .select(RecipeRow::as_select())
        .for_update()
        .load(conn)?;
    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

    let links = component_links::table
        .filter(component_links::parent_id.eq_any(ids))
        .order((component_links::parent_id, component_links::position))
        .select((component_links::parent_id, component_links::component_id))
        .load::<(Uuid, Uuid)>(conn)?
        .into_iter()
        .map(|(parent_id, component_id)| ComponentLink {
            parent_id,
            component_id,
        })
        .collect();

    Ok(OwnerGraph::new(rows.into_iter().map(Recipe::from), links))
}

fn write_children(conn: &mut PgConnection, parent_id: Uuid, component_ids: &[Uuid]) -> QueryResult<()> {
    let links: Vec<NewComponentLink> = component_ids
        .iter()
        .zip(0..)
        .map(|(component_id, position)| NewComponentLink {
            parent_id,
            component_id: *component_id,
            position,
        })
        .collect();

    diesel::delete(component_links::table.filter(component_links::parent_id.eq(parent_id)))
        .execute(conn)?;
    if !links.is_empty() {
        diesel::insert_into(component_links::table)
            .values(&links)
            .execute(conn)?;
    }
    Ok(())
}

impl EntityStore for PgStore {
    fn recipe(&self, id: Uuid) -> StoreResult<Option<Recipe>> {
        let mut conn = self.conn()?;
        let row = recipes::table
            .find(id)
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(store_err)?;
        Ok(row.map(Recipe::from))
    }

    fn recipes(&self, filter: &RecipeFilter) -> StoreResult<Vec<Recipe>> {
        let mut conn = self.conn()?;
        let mut query = recipes::table.into_boxed();

        if let Some(owner_id) = filter.owner_id {
            query = query.filter(recipes::owner_id.eq(owner_id));
        }
        if let Some(ids) = &filter.ids {
            query = query.filter(recipes::id.eq_any(ids.clone()));
        }
        match filter.deleted {
            Some(true) => query = query.filter(recipes::deleted_at.is_not_null()),
            Some(false) => query = query.filter(recipes::deleted_at.is_null()),
            None => {}
        }
        if let Some(is_public) = filter.is_public {
            query = query.filter(recipes::is_public.eq(is_public));
        }
        if let Some(is_component) = filter.is_component {
            query = query.filter(recipes::is_component.eq(is_component));
        }
        if let Some(is_favorite) = filter.is_favorite {
            query = query.filter(recipes::is_favorite.eq(is_favorite));
        }

        let rows = query
            .order((recipes::updated_at.desc(), recipes::id.asc()))
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .map_err(store_err)?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    fn insert_recipe(&self, recipe: &Recipe) -> StoreResult<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(recipes::table)
            .values(RecipeRow::from(recipe))
            .execute(&mut conn)
            .map_err(store_err)?;
        Ok(())
    }

    fn update_recipe(&self, recipe: &Recipe) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        let updated = diesel::update(recipes::table.find(recipe.id))
            .set(RecipeRow::from(recipe))
            .execute(&mut conn)
            .map_err(store_err)?;
        Ok(updated > 0)
    }

    fn purge_recipe(&self, id: Uuid) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        conn.transaction::<_, DieselError, _>(|conn| {
            let tombstoned: Option<Uuid> = recipes::table
                .filter(recipes::id.eq(id))
                .filter(recipes::deleted_at.is_not_null())
                .select(recipes::id)
                .for_update()
                .first(conn)
                .optional()?;
            if tombstoned.is_none() {
                return Ok(false);
            }

            diesel::delete(
                component_links::table.filter(
                    component_links::parent_id
                        .eq(id)
                        .or(component_links::component_id.eq(id)),
                ),
            )
            .execute(conn)?;
            diesel::delete(cookbook_recipes::table.filter(cookbook_recipes::recipe_id.eq(id)))
                .execute(conn)?;
            diesel::delete(saved_recipes::table.filter(saved_recipes::recipe_id.eq(id)))
                .execute(conn)?;
            diesel::delete(recipes::table.find(id)).execute(conn)?;
            Ok(true)
        })
        .map_err(store_err)
    }

    fn component_ids(&self, parent_id: Uuid) -> StoreResult<Vec<Uuid>> {
        let mut conn = self.conn()?;
        component_links::table
            .filter(component_links::parent_id.eq(parent_id))
            .order(component_links::position.asc())
            .select(component_links::component_id)
            .load(&mut conn)
            .map_err(store_err)
    }

    fn parent_ids(&self, component_id: Uuid) -> StoreResult<Vec<Uuid>> {
        let mut conn = self.conn()?;
        component_links::table
            .filter(component_links::component_id.eq(component_id))
            .select(component_links::parent_id)
            .load(&mut conn)
            .map_err(store_err)
    }

    fn replace_components(&self, parent_id: Uuid, component_ids: &[Uuid]) -> StoreResult<()> {
        let mut conn = self.conn()?;
        conn.transaction::<_, DieselError, _>(|conn| write_children(conn, parent_id, component_ids))
            .map_err(store_err)
    }

    fn replace_components_checked(
        &self,
        owner_id: Uuid,
        parent_id: Uuid,
        component_ids: &[Uuid],
        check: GraphCheck<'_>,
    ) -> StoreResult<()> {
        let mut conn = self.conn()?;
        conn.transaction::<_, TxError, _>(|conn| {
            let graph = lock_owner_graph(conn, owner_id)?;
            check(&graph).map_err(TxError::Rejected)?;
            write_children(conn, parent_id, component_ids)?;
            Ok(())
        })
        .map_err(tx_err)
    }

    fn update_recipe_checked(&self, recipe: &Recipe, check: GraphCheck<'_>) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        conn.transaction::<_, TxError, _>(|conn| {
            let graph = lock_owner_graph(conn, recipe.owner_id)?;
            if graph.recipe(recipe.id).is_none() {
                return Ok(false);
            }
            check(&graph).map_err(TxError::Rejected)?;
            let updated = diesel::update(recipes::table.find(recipe.id))
                .set(RecipeRow::from(recipe))
                .execute(conn)?;
            Ok(updated > 0)
        })
        .map_err(tx_err)
    }

    fn cookbook(&self, id: Uuid) -> StoreResult<Option<Cookbook>> {
        let mut conn = self.conn()?;
        let row = cookbooks::table
            .find(id)
            .select(CookbookRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(store_err)?;
        Ok(row.map(Cookbook::from))
    }

    fn cookbooks(&self, filter: &CookbookFilter) -> StoreResult<Vec<Cookbook>> {
        let mut conn = self.conn()?;
        let mut query = cookbooks::table.into_boxed();

        if let Some(owner_id) = filter.owner_id {
            query = query.filter(cookbooks::owner_id.eq(owner_id));
        }
        if let Some(ids) = &filter.ids {
            query = query.filter(cookbooks::id.eq_any(ids.clone()));
        }
        match filter.deleted {
            Some(true) => query = query.filter(cookbooks::deleted_at.is_not_null()),
            Some(false) => query = query.filter(cookbooks::deleted_at.is_null()),
            None => {}
        }
        if let Some(is_public) = filter.is_public {
            query = query.filter(cookbooks::is_public.eq(is_public));
        }

        let rows = query
            .order((cookbooks::updated_at.desc(), cookbooks::id.asc()))
            .select(CookbookRow::as_select())
            .load(&mut conn)
            .map_err(store_err)?;
        Ok(rows.into_iter().map(Cookbook::from).collect())
    }

    fn insert_cookbook(&self, cookbook: &Cookbook) -> StoreResult<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(cookbooks::table)
            .values(CookbookRow::from(cookbook))
            .execute(&mut conn)
            .map_err(store_err)?;
        Ok(())
    }

    fn update_cookbook(&self, cookbook: &Cookbook) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        let updated = diesel::update(cookbooks::table.find(cookbook.id))
            .set(CookbookRow::from(cookbook))
            .execute(&mut conn)
            .map_err(store_err)?;
        Ok(updated > 0)
    }

    fn purge_cookbook(&self, id: Uuid) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        conn.transaction::<_, DieselError, _>(|conn| {
            let tombstoned: Option<Uuid> = cookbooks::table
                .filter(cookbooks::id.eq(id))
                .filter(cookbooks::deleted_at.is_not_null())
                .select(cookbooks::id)
                .for_update()
                .first(conn)
                .optional()?;
            if tombstoned.is_none() {
                return Ok(false);
            }

            diesel::delete(cookbook_recipes::table.filter(cookbook_recipes::cookbook_id.eq(id)))
                .execute(conn)?;
            diesel::delete(cookbooks::table.find(id)).execute(conn)?;
            Ok(true)
        })
        .map_err(store_err)
    }

    fn cookbook_links(&self, cookbook_id: Uuid) -> StoreResult<Vec<CookbookRecipeLink>> {
        let mut conn = self.conn()?;
        let rows = cookbook_recipes::table
            .filter(cookbook_recipes::cookbook_id.eq(cookbook_id))
            .order(cookbook_recipes::added_at.asc())
            .select(CookbookRecipeRow::as_select())
            .load(&mut conn)
            .map_err(store_err)?;
        Ok(rows.into_iter().map(CookbookRecipeLink::from).collect())
    }

    fn cookbooks_with_recipe(&self, recipe_id: Uuid) -> StoreResult<Vec<Uuid>> {
        let mut conn = self.conn()?;
        cookbook_recipes::table
            .filter(cookbook_recipes::recipe_id.eq(recipe_id))
            .select(cookbook_recipes::cookbook_id)
            .load(&mut conn)
            .map_err(store_err)
    }

    fn insert_cookbook_link(&self, link: &CookbookRecipeLink) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        let inserted = diesel::insert_into(cookbook_recipes::table)
            .values(CookbookRecipeRow {
                cookbook_id: link.cookbook_id,
                recipe_id: link.recipe_id,
                added_at: link.added_at,
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .map_err(store_err)?;
        Ok(inserted > 0)
    }

    fn delete_cookbook_link(&self, cookbook_id: Uuid, recipe_id: Uuid) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(cookbook_recipes::table.find((cookbook_id, recipe_id)))
            .execute(&mut conn)
            .map_err(store_err)?;
        Ok(deleted > 0)
    }

    fn saved_recipes(&self, user_id: Uuid) -> StoreResult<Vec<SavedRecipe>> {
        let mut conn = self.conn()?;
        let rows = saved_recipes::table
            .filter(saved_recipes::user_id.eq(user_id))
            .order(saved_recipes::saved_at.desc())
            .select(SavedRecipeRow::as_select())
            .load(&mut conn)
            .map_err(store_err)?;
        Ok(rows.into_iter().map(SavedRecipe::from).collect())
    }

    fn saved_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> StoreResult<Option<SavedRecipe>> {
        let mut conn = self.conn()?;
        let row = saved_recipes::table
            .find((user_id, recipe_id))
            .select(SavedRecipeRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(store_err)?;
        Ok(row.map(SavedRecipe::from))
    }

    fn insert_saved(&self, saved: &SavedRecipe) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        let inserted = diesel::insert_into(saved_recipes::table)
            .values(SavedRecipeRow {
                user_id: saved.user_id,
                recipe_id: saved.recipe_id,
                saved_at: saved.saved_at,
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .map_err(store_err)?;
        Ok(inserted > 0)
    }

    fn delete_saved(&self, user_id: Uuid, recipe_id: Uuid) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(saved_recipes::table.find((user_id, recipe_id)))
            .execute(&mut conn)
            .map_err(store_err)?;
        Ok(deleted > 0)
    }

    fn profile(&self, id: Uuid) -> StoreResult<Option<Profile>> {
        let mut conn = self.conn()?;
        let row = profiles::table
            .find(id)
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(store_err)?;
        Ok(row.map(Profile::from))
    }

    fn profile_by_username(&self, username: &str) -> StoreResult<Option<Profile>> {
        let mut conn = self.conn()?;
        let row = profiles::table
            .filter(profiles::username.eq(username))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(store_err)?;
        Ok(row.map(Profile::from))
    }

    fn upsert_profile(&self, profile: &Profile) -> StoreResult<()> {
        let row = ProfileRow::from(profile);
        let mut conn = self.conn()?;
        diesel::insert_into(profiles::table)
            .values(&row)
            .on_conflict(profiles::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .map_err(store_err)?;
        Ok(())
    }
}
