//! Integration tests for company and employee registration.

mod common;

use common::{new_company, new_user, register, setup_db};
use finboard_core::access::{VIEW_COMPANY, company_group_name};
use finboard_db::entities::{company_members, group_company_permissions, groups};
use finboard_db::repositories::RegistrationError;
use finboard_db::{CompanyRepository, GroupRepository, RegistrationRepository, UserRepository};
use finboard_shared::types::{CompanyId, RoleGroup};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

#[tokio::test]
async fn test_register_company_creates_manager_membership_and_groups() {
    let db = setup_db().await;
    let registered = register(&db, "Acme", "alice").await;

    assert_eq!(registered.company.name, "Acme");
    assert_eq!(registered.company.base_currency, "PLN");
    assert_eq!(registered.manager.username, "alice");
    assert!(registered.manager.is_active);

    let company_id = CompanyRepository::new(db.clone())
        .company_of(registered.manager.id)
        .await
        .expect("Query should succeed");
    assert_eq!(company_id, Some(registered.company.id));

    let names = GroupRepository::new(db.clone())
        .group_names(registered.manager.id)
        .await
        .expect("Query should succeed");
    assert_eq!(names, vec!["Managers".to_string()]);

    let company_group = groups::Entity::find()
        .filter(
            groups::Column::Name
                .eq(company_group_name(CompanyId::from_uuid(registered.company.id))),
        )
        .one(&db)
        .await
        .expect("Query should succeed")
        .expect("Company group should exist");
    let permission = group_company_permissions::Entity::find_by_id((
        company_group.id,
        registered.company.id,
        VIEW_COMPANY.to_string(),
    ))
    .one(&db)
    .await
    .expect("Query should succeed");
    assert!(permission.is_some());
}

#[tokio::test]
async fn test_register_company_rejects_taken_username() {
    let db = setup_db().await;
    register(&db, "Acme", "alice").await;

    let result = RegistrationRepository::new(db.clone())
        .register_company(new_company("Globex"), new_user("alice"))
        .await;

    assert!(matches!(result, Err(RegistrationError::UsernameTaken)));

    let company_count = finboard_db::entities::companies::Entity::find()
        .count(&db)
        .await
        .expect("Query should succeed");
    assert_eq!(company_count, 1);
}

#[tokio::test]
async fn test_concurrent_registrations_with_one_username() {
    let db = setup_db().await;
    let repo = RegistrationRepository::new(db.clone());

    let (first, second) = tokio::join!(
        repo.register_company(new_company("Acme"), new_user("alice")),
        repo.register_company(new_company("Globex"), new_user("alice")),
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(RegistrationError::UsernameTaken)))
    );

    let company_count = finboard_db::entities::companies::Entity::find()
        .count(&db)
        .await
        .expect("Query should succeed");
    assert_eq!(company_count, 1);
}

#[tokio::test]
async fn test_second_company_reuses_managers_group() {
    let db = setup_db().await;
    register(&db, "Acme", "alice").await;
    register(&db, "Globex", "bob").await;

    // Managers plus one group per company
    let group_count = finboard_db::entities::groups::Entity::find()
        .count(&db)
        .await
        .expect("Query should succeed");
    assert_eq!(group_count, 3);
}

#[tokio::test]
async fn test_register_employee_joins_company_and_role_group() {
    let db = setup_db().await;
    let registered = register(&db, "Acme", "alice").await;

    let employee = RegistrationRepository::new(db.clone())
        .register_employee(registered.company.id, new_user("eve"), RoleGroup::Employees)
        .await
        .expect("Failed to register employee");

    let company_id = CompanyRepository::new(db.clone())
        .company_of(employee.id)
        .await
        .expect("Query should succeed");
    assert_eq!(company_id, Some(registered.company.id));

    let names = GroupRepository::new(db.clone())
        .group_names(employee.id)
        .await
        .expect("Query should succeed");
    assert_eq!(names, vec!["Employees".to_string()]);

    let members = company_members::Entity::find()
        .filter(company_members::Column::CompanyId.eq(registered.company.id))
        .count(&db)
        .await
        .expect("Query should succeed");
    assert_eq!(members, 2);
}

#[tokio::test]
async fn test_register_employee_as_manager() {
    let db = setup_db().await;
    let registered = register(&db, "Acme", "alice").await;

    let employee = RegistrationRepository::new(db.clone())
        .register_employee(registered.company.id, new_user("mallory"), RoleGroup::Managers)
        .await
        .expect("Failed to register employee");

    let names = GroupRepository::new(db.clone())
        .group_names(employee.id)
        .await
        .expect("Query should succeed");
    assert_eq!(names, vec!["Managers".to_string()]);
}

#[tokio::test]
async fn test_register_employee_unknown_company() {
    let db = setup_db().await;

    let result = RegistrationRepository::new(db.clone())
        .register_employee(Uuid::new_v4(), new_user("eve"), RoleGroup::Employees)
        .await;

    assert!(matches!(result, Err(RegistrationError::CompanyNotFound)));

    let exists = UserRepository::new(db.clone())
        .username_exists("eve")
        .await
        .expect("Query should succeed");
    assert!(!exists);
}

#[tokio::test]
async fn test_register_employee_rejects_taken_username() {
    let db = setup_db().await;
    let registered = register(&db, "Acme", "alice").await;

    let result = RegistrationRepository::new(db.clone())
        .register_employee(registered.company.id, new_user("alice"), RoleGroup::Employees)
        .await;

    assert!(matches!(result, Err(RegistrationError::UsernameTaken)));
}

#[tokio::test]
async fn test_find_user_by_username() {
    let db = setup_db().await;
    let registered = register(&db, "Acme", "alice").await;
    let users = UserRepository::new(db.clone());

    let found = users
        .find_by_username("alice")
        .await
        .expect("Query should succeed")
        .expect("User should exist");
    assert_eq!(found.id, registered.manager.id);

    let by_id = users
        .find_by_id(registered.manager.id)
        .await
        .expect("Query should succeed");
    assert!(by_id.is_some());

    assert!(
        users
            .find_by_username("nobody")
            .await
            .expect("Query should succeed")
            .is_none()
    );
}
