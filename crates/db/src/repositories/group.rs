//! Group repository: role groups, per-company groups and their permissions.
//!
//! Groups are created on first use, so a fresh database needs no seed rows
//! before the first registration.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{group_company_permissions, groups, user_groups};

/// Group repository for membership queries.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    db: DatabaseConnection,
}

impl GroupRepository {
    /// Creates a new group repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Names of the groups a user belongs to, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn group_names(&self, user_id: Uuid) -> Result<Vec<String>, DbErr> {
        let rows = user_groups::Entity::find()
            .filter(user_groups::Column::UserId.eq(user_id))
            .find_also_related(groups::Entity)
            .order_by_asc(groups::Column::Name)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, group)| group.map(|g| g.name))
            .collect())
    }
}

/// Inserts `model`, skipping it when `on_conflict` matches an existing row.
async fn insert_or_ignore<C, A>(
    conn: &C,
    model: A,
    on_conflict: OnConflict,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    A: ActiveModelTrait + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    match <A::Entity as EntityTrait>::insert(model)
        .on_conflict(on_conflict)
        .exec_without_returning(conn)
        .await
    {
        Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Returns the group called `name`, creating it if missing.
///
/// A concurrent creator of the same group wins the insert; both callers
/// then read the same row.
pub(crate) async fn ensure_group<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<groups::Model, DbErr> {
    let find = || {
        groups::Entity::find()
            .filter(groups::Column::Name.eq(name))
            .one(conn)
    };

    if let Some(group) = find().await? {
        return Ok(group);
    }

    insert_or_ignore(
        conn,
        groups::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
        },
        OnConflict::column(groups::Column::Name).do_nothing().to_owned(),
    )
    .await?;

    find()
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("group {name}")))
}

pub(crate) async fn add_user_to_group<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    group_id: Uuid,
) -> Result<(), DbErr> {
    insert_or_ignore(
        conn,
        user_groups::ActiveModel {
            user_id: Set(user_id),
            group_id: Set(group_id),
        },
        OnConflict::columns([user_groups::Column::UserId, user_groups::Column::GroupId])
            .do_nothing()
            .to_owned(),
    )
    .await
}

pub(crate) async fn grant_company_permission<C: ConnectionTrait>(
    conn: &C,
    group_id: Uuid,
    company_id: Uuid,
    codename: &str,
) -> Result<(), DbErr> {
    insert_or_ignore(
        conn,
        group_company_permissions::ActiveModel {
            group_id: Set(group_id),
            company_id: Set(company_id),
            codename: Set(codename.to_string()),
        },
        OnConflict::columns([
            group_company_permissions::Column::GroupId,
            group_company_permissions::Column::CompanyId,
            group_company_permissions::Column::Codename,
        ])
        .do_nothing()
        .to_owned(),
    )
    .await
}
