mod common;

use std::time::Duration;

use serde_json::json;
use wishlist_api::{
    middleware::auth::AuthUser,
    models::Wishlist,
    routes::params::ListQuery,
    state::AppState,
    services::wishlist_service::{
        create_wishlist, delete_wishlist, get_wishlist, list_wishlists, update_wishlist,
    },
};

#[tokio::test]
async fn wishlist_belongs_to_the_caller() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let alice = common::create_user(&state, "alice@example.com").await?;
    let bob = common::create_user(&state, "bob@example.com").await?;

    let wishlist = create_wishlist(
        &state,
        &alice,
        json!({ "name": "Birthday", "user_id": bob.user_id, "status": 0 }),
    )
    .await
    .expect("created");
    assert_eq!(wishlist.user_id, alice.user_id);
    assert_eq!(wishlist.status, 1);

    let errors = get_wishlist(&state, &bob, wishlist.id).await.unwrap_err();
    assert_eq!(errors.entries()[0].message, "Wishlist not found");

    let errors = update_wishlist(&state, &bob, wishlist.id, json!({ "name": "Mine now" }))
        .await
        .unwrap_err();
    assert_eq!(errors.entries()[0].message, "Wishlist not found");

    let errors = delete_wishlist(&state, &bob, wishlist.id).await.unwrap_err();
    assert_eq!(errors.entries()[0].message, "Error during deleting wishlist");

    let still_there = get_wishlist(&state, &alice, wishlist.id).await.expect("visible to owner");
    assert_eq!(still_there.name, "Birthday");
    Ok(())
}

#[tokio::test]
async fn filters_cannot_widen_visibility() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let alice = common::create_user(&state, "alice@example.com").await?;
    let bob = common::create_user(&state, "bob@example.com").await?;
    create_wishlist(&state, &alice, json!({ "name": "Alice list" }))
        .await
        .expect("created");

    let user_filter = alice.user_id.to_string();
    let seen = list_wishlists(
        &state,
        &bob,
        &ListQuery::from_pairs([("user_id", user_filter.as_str())]),
    )
    .await
    .expect("list");
    assert!(seen.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_keeps_owner_and_checks_status() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let alice = common::create_user(&state, "alice@example.com").await?;
    let bob = common::create_user(&state, "bob@example.com").await?;
    let wishlist = create_wishlist(&state, &alice, json!({ "name": "Holidays" }))
        .await
        .expect("created");

    let updated = update_wishlist(
        &state,
        &alice,
        wishlist.id,
        json!({ "name": "Summer", "user_id": bob.user_id, "status": 0 }),
    )
    .await
    .expect("updated");
    assert_eq!(updated.user_id, alice.user_id);
    assert_eq!(updated.name, "Summer");
    assert_eq!(updated.status, 0);
    assert_eq!(updated.creation_date, wishlist.creation_date);

    let errors = update_wishlist(&state, &alice, wishlist.id, json!({ "status": 7 }))
        .await
        .unwrap_err();
    assert_eq!(errors.entries()[0].property.as_deref(), Some("status"));
    assert_eq!(errors.entries()[0].message, "Status of wishlist not allowed");
    Ok(())
}

#[tokio::test]
async fn list_sorts_filters_and_pages_own_wishlists() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let alice = common::create_user(&state, "alice@example.com").await?;
    let bob = common::create_user(&state, "bob@example.com").await?;
    for name in ["Books", "Apps", "Cars"] {
        create_wishlist(&state, &alice, json!({ "name": name }))
            .await
            .expect("created");
    }
    create_wishlist(&state, &bob, json!({ "name": "Bob stuff" }))
        .await
        .expect("created");

    let ascending = list_wishlists(&state, &alice, &ListQuery::from_pairs([("order", "name")]))
        .await
        .expect("list");
    let names: Vec<_> = ascending.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, ["Apps", "Books", "Cars"]);

    let descending = list_wishlists(&state, &alice, &ListQuery::from_pairs([("order", "-name")]))
        .await
        .expect("list");
    let names: Vec<_> = descending.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, ["Cars", "Books", "Apps"]);

    let page = list_wishlists(
        &state,
        &alice,
        &ListQuery::from_pairs([("order", "name"), ("page", "1"), ("per_page", "2")]),
    )
    .await
    .expect("list");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Cars");

    let active = list_wishlists(&state, &alice, &ListQuery::from_pairs([("status", "1")]))
        .await
        .expect("list");
    assert_eq!(active.len(), 3);

    let deleted = list_wishlists(&state, &alice, &ListQuery::from_pairs([("status", "0")]))
        .await
        .expect("list");
    assert!(deleted.is_empty());
    Ok(())
}

#[tokio::test]
async fn empty_sort_token_is_rejected() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let alice = common::create_user(&state, "alice@example.com").await?;

    let errors = list_wishlists(&state, &alice, &ListQuery::from_pairs([("order", "name,")]))
        .await
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.has_property("order"));
    Ok(())
}

#[tokio::test]
async fn deleted_wishlist_is_gone() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let alice = common::create_user(&state, "alice@example.com").await?;
    let wishlist = create_wishlist(&state, &alice, json!({ "name": "Temp" }))
        .await
        .expect("created");

    delete_wishlist(&state, &alice, wishlist.id).await.expect("deleted");
    assert!(get_wishlist(&state, &alice, wishlist.id).await.is_err());
    Ok(())
}

/// Three wishlists with strictly increasing creation dates.
async fn three_dated_wishlists(state: &AppState, owner: &AuthUser) -> anyhow::Result<()> {
    for name in ["First", "Second", "Third"] {
        create_wishlist(state, owner, json!({ "name": name }))
            .await
            .expect("created");
        std::thread::sleep(Duration::from_millis(5));
    }
    Ok(())
}

fn names(wishlists: &[Wishlist]) -> Vec<&str> {
    wishlists.iter().map(|w| w.name.as_str()).collect()
}

#[tokio::test]
async fn newest_first_when_ordered_by_descending_creation_date() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let alice = common::create_user(&state, "alice@example.com").await?;
    three_dated_wishlists(&state, &alice).await?;

    let listed = list_wishlists(
        &state,
        &alice,
        &ListQuery::from_pairs([("order", "-creation_date")]),
    )
    .await
    .expect("list");
    assert_eq!(listed.len(), 3);
    assert!(
        listed
            .windows(2)
            .all(|w| w[0].creation_date >= w[1].creation_date)
    );
    assert_eq!(names(&listed), ["Third", "Second", "First"]);
    Ok(())
}

#[tokio::test]
async fn oldest_first_when_ordered_by_ascending_creation_date() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let alice = common::create_user(&state, "alice@example.com").await?;
    three_dated_wishlists(&state, &alice).await?;

    let listed = list_wishlists(
        &state,
        &alice,
        &ListQuery::from_pairs([("order", "creation_date")]),
    )
    .await
    .expect("list");
    assert_eq!(listed.len(), 3);
    assert!(
        listed
            .windows(2)
            .all(|w| w[0].creation_date <= w[1].creation_date)
    );
    assert_eq!(names(&listed), ["First", "Second", "Third"]);
    Ok(())
}
