mod common;

use chrono::{TimeZone, Utc};
use sea_orm::Set;

use admin_console_backend::errors::InternalError;
use admin_console_backend::query::{Pagination, SortOrder, UserFilter};
use admin_console_backend::services::NewUser;
use admin_console_backend::types::db::user;
use admin_console_backend::types::internal::RoleName;

use common::{test_app_data, test_services, TestServices};

async fn seed_owner(services: &TestServices) -> i64 {
    let role = services
        .roles
        .find_or_create(RoleName::SuperAdmin.as_str())
        .await
        .expect("seed role");
    let admin = services
        .admins
        .create(role.id, "owner", "owner-password")
        .await
        .expect("seed owner admin");
    admin.id
}

fn new_user(n: usize) -> NewUser {
    NewUser {
        username: format!("user{:02}", n),
        password: "initial-password".to_string(),
        name: format!("User Number {:02}", n),
        phone: format!("+1555000{:04}", n),
    }
}

#[tokio::test]
async fn count_runs_before_paging_and_reflects_all_matches() {
    let app_data = test_app_data().await;
    let services = test_services(&app_data);
    let owner = seed_owner(&services).await;

    for n in 0..15 {
        services.users.create(owner, new_user(n)).await.expect("seed user");
    }

    let mut pagination = Pagination::new(10, 0).unwrap();
    let page = services
        .users
        .get_all(
            &UserFilter::default(),
            &SortOrder::initial(),
            Some(&mut pagination),
        )
        .await
        .expect("list users");

    assert_eq!(page.len(), 10);
    assert_eq!(pagination.record_count, Some(15));
    assert_eq!(pagination.total, Some(2));

    let mut second = Pagination::new(10, 10).unwrap();
    let rest = services
        .users
        .get_all(&UserFilter::default(), &SortOrder::initial(), Some(&mut second))
        .await
        .expect("second page");
    assert_eq!(rest.len(), 5);
    assert_eq!(second.record_count, Some(15));
}

#[tokio::test]
async fn absent_filter_fields_are_dont_care() {
    let app_data = test_app_data().await;
    let services = test_services(&app_data);
    let owner = seed_owner(&services).await;

    for n in 0..4 {
        services.users.create(owner, new_user(n)).await.expect("seed user");
    }
    // One user logs in, so last_login_at is null for some rows and set for
    // others; two users leave the must-reset state, so that field differs
    // across rows too.
    services
        .auth
        .user_login("user00", "initial-password")
        .await
        .expect("login user 0");
    services
        .auth
        .user_reset(1, "fresh-password")
        .await
        .expect("reset user 1");
    services
        .auth
        .user_reset(2, "fresh-password")
        .await
        .expect("reset user 2");

    let all = services
        .users
        .get_all(&UserFilter::default(), &SortOrder::initial(), None)
        .await
        .expect("unfiltered list");
    assert_eq!(all.len(), 4);

    let filter = UserFilter {
        is_reset_password: Some(false),
        ..Default::default()
    };
    let reset_done = services
        .users
        .get_all(&filter, &SortOrder::initial(), None)
        .await
        .expect("filtered list");
    assert_eq!(reset_done.len(), 2);
}

#[tokio::test]
async fn creation_time_bounds_are_strict_ranges() {
    let app_data = test_app_data().await;
    let services = test_services(&app_data);
    let owner = seed_owner(&services).await;

    // Insert through the store to control create_at exactly.
    for (n, day) in [(0, 1), (1, 10), (2, 20)] {
        let at = Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap();
        let user = new_user(n);
        services
            .user_store
            .create(user::ActiveModel {
                admin_id: Set(owner),
                username: Set(user.username),
                password_hash: Set("unused-digest".to_string()),
                name: Set(user.name),
                phone: Set(user.phone),
                is_reset_password: Set(true),
                create_at: Set(at),
                update_at: Set(at),
                ..Default::default()
            })
            .await
            .expect("seed user with fixed create_at");
    }

    let filter = UserFilter {
        create_at_after: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        create_at_before: Some(Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()),
        ..Default::default()
    };
    let within = services
        .users
        .get_all(&filter, &SortOrder::initial(), None)
        .await
        .expect("range filtered list");

    // Strict bounds: the records created exactly at the boundaries drop out.
    assert_eq!(within.len(), 1);
    assert_eq!(within[0].0.username, "user01");
}

#[tokio::test]
async fn search_matches_substring_across_name_and_username() {
    let app_data = test_app_data().await;
    let services = test_services(&app_data);
    let owner = seed_owner(&services).await;

    for (username, name, phone) in [
        ("alice", "Alice Smith", "+15550000001"),
        ("bob", "Bob Jones", "+15550000002"),
        ("smithers", "Waylon", "+15550000003"),
    ] {
        services
            .users
            .create(
                owner,
                NewUser {
                    username: username.to_string(),
                    password: "initial-password".to_string(),
                    name: name.to_string(),
                    phone: phone.to_string(),
                },
            )
            .await
            .expect("seed user");
    }

    let filter = UserFilter {
        search: Some("mith".to_string()),
        ..Default::default()
    };
    let matches = services
        .users
        .get_all(&filter, &SortOrder::initial(), None)
        .await
        .expect("search");

    // "Alice Smith" matches by name, "smithers" by username.
    let usernames: Vec<&str> = matches.iter().map(|(u, _)| u.username.as_str()).collect();
    assert_eq!(usernames, vec!["alice", "smithers"]);
}

#[tokio::test]
async fn sort_field_outside_entity_columns_fails_before_querying() {
    let app_data = test_app_data().await;
    let services = test_services(&app_data);

    let bogus = SortOrder {
        sort: "no_such_column".to_string(),
        order: "asc".to_string(),
    };
    let result = services
        .users
        .get_all(&UserFilter::default(), &bogus, None)
        .await;

    assert!(matches!(result, Err(InternalError::Validation { .. })));
}

#[tokio::test]
async fn descending_sort_is_applied() {
    let app_data = test_app_data().await;
    let services = test_services(&app_data);
    let owner = seed_owner(&services).await;

    for n in 0..3 {
        services.users.create(owner, new_user(n)).await.expect("seed user");
    }

    let sort_order = SortOrder {
        sort: "username".to_string(),
        order: "DESC".to_string(),
    };
    let listed = services
        .users
        .get_all(&UserFilter::default(), &sort_order, None)
        .await
        .expect("sorted list");

    let usernames: Vec<&str> = listed.iter().map(|(u, _)| u.username.as_str()).collect();
    assert_eq!(usernames, vec!["user02", "user01", "user00"]);
}

#[tokio::test]
async fn soft_deleted_rows_disappear_from_reads_and_counts() {
    let app_data = test_app_data().await;
    let services = test_services(&app_data);
    let owner = seed_owner(&services).await;

    for n in 0..3 {
        services.users.create(owner, new_user(n)).await.expect("seed user");
    }

    services.users.delete(2).await.expect("soft delete");

    let mut pagination = Pagination::new(10, 0).unwrap();
    let listed = services
        .users
        .get_all(
            &UserFilter::default(),
            &SortOrder::initial(),
            Some(&mut pagination),
        )
        .await
        .expect("list after delete");
    assert_eq!(listed.len(), 2);
    assert_eq!(pagination.record_count, Some(2));

    let get_deleted = services.users.get(&UserFilter::by_id(2)).await;
    assert!(matches!(get_deleted, Err(InternalError::NotFound { .. })));

    // Deleting twice is a not-found, not a second delete.
    let second_delete = services.users.delete(2).await;
    assert!(matches!(second_delete, Err(InternalError::NotFound { .. })));
}

#[tokio::test]
async fn relations_are_joined_eagerly() {
    let app_data = test_app_data().await;
    let services = test_services(&app_data);
    let owner = seed_owner(&services).await;

    services.users.create(owner, new_user(0)).await.expect("seed user");

    let (user, admin) = services
        .users
        .get(&UserFilter::by_username("user00"))
        .await
        .expect("get user");
    assert_eq!(user.admin_id, owner);
    let admin = admin.expect("owning admin joined");
    assert_eq!(admin.username, "owner");

    let (listed_admin, role) = services
        .admins
        .get(&admin_console_backend::query::AdminFilter::by_id(owner))
        .await
        .expect("get admin");
    assert_eq!(listed_admin.username, "owner");
    assert_eq!(role.expect("role joined").name, "SUPER_ADMIN");
}

#[tokio::test]
async fn get_by_id_and_by_username_share_one_path() {
    let app_data = test_app_data().await;
    let services = test_services(&app_data);
    let owner = seed_owner(&services).await;

    let created = services.users.create(owner, new_user(0)).await.expect("seed user");

    let (by_id, _) = services
        .users
        .get(&UserFilter::by_id(created.id))
        .await
        .expect("get by id");
    let (by_username, _) = services
        .users
        .get(&UserFilter::by_username("user00"))
        .await
        .expect("get by username");
    assert_eq!(by_id.id, by_username.id);

    let missing = services.users.get(&UserFilter::by_id(9999)).await;
    assert!(matches!(missing, Err(InternalError::NotFound { .. })));
}

#[tokio::test]
async fn duplicate_unique_values_surface_as_conflicts() {
    let app_data = test_app_data().await;
    let services = test_services(&app_data);
    let owner = seed_owner(&services).await;

    services.users.create(owner, new_user(0)).await.expect("seed user");

    let duplicate_username = services
        .users
        .create(
            owner,
            NewUser {
                username: "user00".to_string(),
                password: "initial-password".to_string(),
                name: "Other".to_string(),
                phone: "+15559999999".to_string(),
            },
        )
        .await;
    assert!(matches!(
        duplicate_username,
        Err(InternalError::Conflict { .. })
    ));

    let duplicate_phone = services
        .users
        .create(
            owner,
            NewUser {
                username: "different".to_string(),
                password: "initial-password".to_string(),
                name: "Other".to_string(),
                phone: new_user(0).phone,
            },
        )
        .await;
    assert!(matches!(duplicate_phone, Err(InternalError::Conflict { .. })));
}
