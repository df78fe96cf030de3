//! Initial database migration.
//!
//! Creates the identity tables (users, companies, memberships, groups and
//! permissions) and the two transactional record tables.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DbBackend;

/// Monetary column, `numeric(19, 4)` on Postgres.
///
/// `SQLite` caps declared precision at 16 digits.
fn money<T: IntoIden + 'static>(manager: &SchemaManager, column: T) -> ColumnDef {
    let precision = match manager.get_database_backend() {
        DbBackend::Sqlite => 16,
        _ => 19,
    };
    ColumnDef::new(column).decimal_len(precision, 4).to_owned()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // PART 1: USERS & COMPANIES
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(150)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string_len(254).not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string_len(150).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(150).not_null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Companies::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Companies::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Companies::TaxId).string_len(32).null())
                    .col(ColumnDef::new(Companies::BaseCurrency).string_len(3).not_null())
                    .col(
                        ColumnDef::new(Companies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Companies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // A user belongs to at most one company.
        manager
            .create_table(
                Table::create()
                    .table(CompanyMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompanyMembers::UserId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CompanyMembers::CompanyId).uuid().not_null())
                    .col(
                        ColumnDef::new(CompanyMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_members_user")
                            .from(CompanyMembers::Table, CompanyMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_members_company")
                            .from(CompanyMembers::Table, CompanyMembers::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 2: GROUPS & PERMISSIONS
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Groups::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Groups::Name)
                            .string_len(150)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserGroups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserGroups::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserGroups::GroupId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserGroups::UserId)
                            .col(UserGroups::GroupId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_groups_user")
                            .from(UserGroups::Table, UserGroups::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_groups_group")
                            .from(UserGroups::Table, UserGroups::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GroupCompanyPermissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GroupCompanyPermissions::GroupId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GroupCompanyPermissions::CompanyId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GroupCompanyPermissions::Codename)
                            .string_len(100)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(GroupCompanyPermissions::GroupId)
                            .col(GroupCompanyPermissions::CompanyId)
                            .col(GroupCompanyPermissions::Codename),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_company_permissions_group")
                            .from(GroupCompanyPermissions::Table, GroupCompanyPermissions::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_company_permissions_company")
                            .from(
                                GroupCompanyPermissions::Table,
                                GroupCompanyPermissions::CompanyId,
                            )
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 3: REVENUES & EXPENSES
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Revenues::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Revenues::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Revenues::CompanyId).uuid().not_null())
                    .col(
                        ColumnDef::new(Revenues::DocumentNumber)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Revenues::Customer).string_len(255).null())
                    .col(ColumnDef::new(Revenues::DocumentDate).date().not_null())
                    .col(ColumnDef::new(Revenues::ExpectedPaymentDate).date().null())
                    .col(ColumnDef::new(Revenues::Currency).string_len(3).not_null())
                    .col(money(manager, Revenues::NetAmount).not_null())
                    .col(money(manager, Revenues::NetAmountConverted).not_null())
                    .col(
                        ColumnDef::new(Revenues::SettlementStatus)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Revenues::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_revenues_company")
                            .from(Revenues::Table, Revenues::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Expenses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Expenses::CompanyId).uuid().not_null())
                    .col(
                        ColumnDef::new(Expenses::DocumentNumber)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::Vendor).string_len(255).null())
                    .col(ColumnDef::new(Expenses::Category).string_len(100).null())
                    .col(ColumnDef::new(Expenses::DocumentDate).date().not_null())
                    .col(ColumnDef::new(Expenses::ExpectedPaymentDate).date().null())
                    .col(money(manager, Expenses::NetAmount).not_null())
                    .col(
                        ColumnDef::new(Expenses::SettlementStatus)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Expenses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_company")
                            .from(Expenses::Table, Expenses::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Dashboards filter by company and one of the two dates.
        manager
            .create_index(
                Index::create()
                    .name("idx_revenues_company_document_date")
                    .table(Revenues::Table)
                    .col(Revenues::CompanyId)
                    .col(Revenues::DocumentDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_revenues_company_payment_date")
                    .table(Revenues::Table)
                    .col(Revenues::CompanyId)
                    .col(Revenues::ExpectedPaymentDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_company_document_date")
                    .table(Expenses::Table)
                    .col(Expenses::CompanyId)
                    .col(Expenses::DocumentDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_company_payment_date")
                    .table(Expenses::Table)
                    .col(Expenses::CompanyId)
                    .col(Expenses::ExpectedPaymentDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Revenues::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(GroupCompanyPermissions::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(UserGroups::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(CompanyMembers::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
    Name,
    TaxId,
    BaseCurrency,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CompanyMembers {
    Table,
    UserId,
    CompanyId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Groups {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum UserGroups {
    Table,
    UserId,
    GroupId,
}

#[derive(DeriveIden)]
enum GroupCompanyPermissions {
    Table,
    GroupId,
    CompanyId,
    Codename,
}

#[derive(DeriveIden)]
enum Revenues {
    Table,
    Id,
    CompanyId,
    DocumentNumber,
    Customer,
    DocumentDate,
    ExpectedPaymentDate,
    Currency,
    NetAmount,
    NetAmountConverted,
    SettlementStatus,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    CompanyId,
    DocumentNumber,
    Vendor,
    Category,
    DocumentDate,
    ExpectedPaymentDate,
    NetAmount,
    SettlementStatus,
    CreatedAt,
}
