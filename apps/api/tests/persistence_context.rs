//! Bulk mutations against a persistence context
//!
//! Bulk statements go straight to the store, so members already loaded
//! into the context keep their old state until the context is cleared.

use member_search_api::domain::member::{Member, NewMember};
use member_search_api::domain::repositories::{MemberRepository, TeamRepository};
use member_search_api::domain::team::NewTeam;
use member_search_api::infrastructure::cache::PersistenceContext;
use member_search_api::infrastructure::repositories::InMemoryStore;

async fn setup_context() -> PersistenceContext<InMemoryStore> {
    let store = InMemoryStore::new();
    let team_a = TeamRepository::save(&store, &NewTeam::new("teamA").unwrap())
        .await
        .expect("Failed to save teamA");
    let team_b = TeamRepository::save(&store, &NewTeam::new("teamB").unwrap())
        .await
        .expect("Failed to save teamB");

    let context = PersistenceContext::new(store);
    for (name, age, team) in [
        ("member1", 10, &team_a),
        ("member2", 20, &team_a),
        ("member3", 30, &team_b),
        ("member4", 40, &team_b),
    ] {
        context
            .save(&NewMember::in_team(name, age, team).unwrap())
            .await
            .expect("Failed to save member");
    }

    context
}

fn usernames(members: &[Member]) -> Vec<Option<&str>> {
    members.iter().map(Member::username).collect()
}

#[tokio::test]
async fn test_bulk_update_is_invisible_until_cleared() {
    let context = setup_context().await;

    let affected = context
        .bulk_rename_younger_than("guest", 28)
        .await
        .expect("bulk update failed");
    assert_eq!(affected, 2);

    // Managed instances win over the updated rows
    let stale = context.find_all().await.unwrap();
    assert_eq!(
        usernames(&stale),
        vec![
            Some("member1"),
            Some("member2"),
            Some("member3"),
            Some("member4")
        ]
    );

    context.clear().await;

    let fresh = context.find_all().await.unwrap();
    assert_eq!(
        usernames(&fresh),
        vec![Some("guest"), Some("guest"), Some("member3"), Some("member4")]
    );
}

#[tokio::test]
async fn test_store_sees_bulk_update_immediately() {
    let context = setup_context().await;
    context.bulk_rename_younger_than("guest", 28).await.unwrap();

    let stored = context.inner().find_by_username("guest").await.unwrap();
    assert_eq!(stored.len(), 2);

    // Through the context the managed names still apply
    let through_context = context.find_by_username("guest").await.unwrap();
    assert!(through_context
        .iter()
        .all(|m| m.username() != Some("guest")));
}

#[tokio::test]
async fn test_bulk_add_age_after_clear() {
    let context = setup_context().await;

    assert_eq!(context.bulk_add_age(1).await.unwrap(), 4);
    let stale: Vec<i32> = context.find_all().await.unwrap().iter().map(Member::age).collect();
    assert_eq!(stale, vec![10, 20, 30, 40]);

    context.clear().await;
    let fresh: Vec<i32> = context.find_all().await.unwrap().iter().map(Member::age).collect();
    assert_eq!(fresh, vec![11, 21, 31, 41]);
}

#[tokio::test]
async fn test_bulk_delete_after_clear() {
    let context = setup_context().await;

    assert_eq!(context.bulk_delete_older_than(30).await.unwrap(), 1);
    assert_eq!(MemberRepository::find_all(context.inner()).await.unwrap().len(), 3);

    context.clear().await;
    assert!(context.is_empty().await);
    assert_eq!(context.find_all().await.unwrap().len(), 3);
    assert_eq!(context.len().await, 3);
}
