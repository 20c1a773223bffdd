mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use sports_gear_api::store::{NewClass, NewInstructor, NewUser, Role, Store};

use common::{request, test_app, token_for};

#[tokio::test]
async fn registration_is_answered_once_per_email() -> Result<()> {
    let (app, _store) = test_app();
    let body = json!({"name": "Pat", "email": "pat@x.com"});

    let (status, reply) =
        request(app.clone(), Method::POST, "/users", None, Some(body.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    let inserted = reply["insertedId"].as_str().expect("insertedId");
    Uuid::parse_str(inserted)?;

    let (status, reply) = request(app, Method::POST, "/users", None, Some(body)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply, json!({"message": "user already exists"}));
    Ok(())
}

#[tokio::test]
async fn fresh_registrations_carry_no_role() -> Result<()> {
    let (app, store) = test_app();

    request(
        app.clone(),
        Method::POST,
        "/users",
        None,
        Some(json!({"name": "Pat", "email": "pat@x.com"})),
    )
    .await?;

    // Promote a second user to admin so the listing is reachable
    let admin = store
        .insert_user(NewUser {
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
        })
        .await?;
    store.assign_role(admin.id, Role::Admin).await?;

    let (status, body) =
        request(app, Method::GET, "/users", Some(&token_for("ada@x.com")), None).await?;
    assert_eq!(status, StatusCode::OK);

    let users = body.as_array().expect("user list");
    let pat = users
        .iter()
        .find(|u| u["email"] == "pat@x.com")
        .expect("registered user in listing");
    assert!(pat.get("role").is_none());
    assert!(pat["id"].is_string());
    assert!(pat["created_at"].is_string());
    Ok(())
}

#[tokio::test]
async fn granting_an_unknown_id_matches_nothing() -> Result<()> {
    let (app, store) = test_app();
    let admin = store
        .insert_user(NewUser {
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
        })
        .await?;
    store.assign_role(admin.id, Role::Admin).await?;

    let path = format!("/users/{}/admin", Uuid::new_v4());
    let (status, body) =
        request(app, Method::PATCH, &path, Some(&token_for("ada@x.com")), None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"matchedCount": 0, "modifiedCount": 0}));
    Ok(())
}

#[tokio::test]
async fn regranting_a_role_is_matched_but_not_modified() -> Result<()> {
    let (app, store) = test_app();
    let admin = store
        .insert_user(NewUser {
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
        })
        .await?;
    store.assign_role(admin.id, Role::Admin).await?;

    let path = format!("/users/{}/admin", admin.id);
    let (status, body) =
        request(app, Method::PATCH, &path, Some(&token_for("ada@x.com")), None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"matchedCount": 1, "modifiedCount": 0}));
    Ok(())
}

#[tokio::test]
async fn class_catalog_is_public() -> Result<()> {
    let (app, store) = test_app();
    store
        .insert_class(NewClass {
            name: "Morning Yoga".to_string(),
            instructor_email: "ines@x.com".to_string(),
            available_seats: 20,
            price: 12.5,
        })
        .await?;

    let (status, body) = request(app, Method::GET, "/classes", None, None).await?;

    assert_eq!(status, StatusCode::OK);
    let classes = body.as_array().expect("class list");
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0]["name"], "Morning Yoga");
    assert_eq!(classes[0]["instructor_email"], "ines@x.com");
    assert_eq!(classes[0]["available_seats"], 20);
    assert_eq!(classes[0]["price"], 12.5);
    Ok(())
}

#[tokio::test]
async fn instructor_directory_is_public() -> Result<()> {
    let (app, store) = test_app();
    for (name, email) in [("Ines", "ines@x.com"), ("Omar", "omar@x.com")] {
        store
            .insert_instructor(NewInstructor {
                name: name.to_string(),
                email: email.to_string(),
            })
            .await?;
    }

    let (status, body) = request(app, Method::GET, "/instructors", None, None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("instructor list").len(), 2);
    Ok(())
}

#[tokio::test]
async fn health_reports_the_store_status() -> Result<()> {
    let (app, _store) = test_app();

    let (status, body) = request(app, Method::GET, "/health", None, None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "ok");
    Ok(())
}
