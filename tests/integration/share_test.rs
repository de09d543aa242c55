//! Integration tests for share issuance, anonymous access, and
//! revocation.

use http::StatusCode;

use crate::helpers;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_create_share_is_idempotent() {
    let app = helpers::TestApp::new().await;
    let user = "user_share";
    let token = app.session_token(user);
    let root_id = app.onboard(&token).await;
    let file_id = app.seed_file(user, root_id, "shared.txt", 10).await;

    let first = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/share"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    let first_token = first.body["data"]["token"].as_str().unwrap().to_string();
    assert_eq!(first_token.len(), 32);
    assert!(first_token.chars().all(|c| c.is_ascii_hexdigit()));

    let second = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/share"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(second.body["data"]["token"].as_str().unwrap(), first_token);

    assert_eq!(app.count_rows("file_shares", "file_id", file_id).await, 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_share_of_foreign_file_rejected() {
    let app = helpers::TestApp::new().await;
    let owner = "user_share_owner";
    let owner_token = app.session_token(owner);
    let intruder_token = app.session_token("user_share_intruder");
    let root_id = app.onboard(&owner_token).await;
    let file_id = app.seed_file(owner, root_id, "mine.txt", 10).await;

    let response = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/share"),
            None,
            Some(&intruder_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_anonymous_resolve_and_download() {
    let app = helpers::TestApp::new().await;
    let user = "user_anon";
    let token = app.session_token(user);
    let root_id = app.onboard(&token).await;
    let file_id = app.seed_file(user, root_id, "payload.bin", 64).await;

    let created = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/share"),
            None,
            Some(&token),
        )
        .await;
    let share_token = created.body["data"]["token"].as_str().unwrap().to_string();

    // Metadata without any session, and without the blob URL.
    let meta = app
        .request("GET", &format!("/s/{share_token}"), None, None)
        .await;
    assert_eq!(meta.status, StatusCode::OK);
    assert_eq!(meta.body["data"]["name"], "payload.bin");
    assert_eq!(meta.body["data"]["size_bytes"], 64);
    assert!(meta.body["data"].get("url").is_none());

    // Download streams the bytes with attachment headers.
    let response = app
        .raw_request("GET", &format!("/s/{share_token}/download"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=\"payload.bin\"")
    );
    assert_eq!(
        response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok()),
        Some("64")
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body.len(), 64);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_revoke_share_removes_access() {
    let app = helpers::TestApp::new().await;
    let user = "user_revoke";
    let token = app.session_token(user);
    let root_id = app.onboard(&token).await;
    let file_id = app.seed_file(user, root_id, "temp.txt", 10).await;

    let created = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/share"),
            None,
            Some(&token),
        )
        .await;
    let share_token = created.body["data"]["token"].as_str().unwrap().to_string();

    let response = app
        .request(
            "DELETE",
            &format!("/api/files/{file_id}/share"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    assert_eq!(app.count_rows("file_shares", "file_id", file_id).await, 0);
    let resolved = app
        .request("GET", &format!("/s/{share_token}"), None, None)
        .await;
    assert_eq!(resolved.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_unknown_token_is_not_found() {
    let app = helpers::TestApp::new().await;
    let response = app
        .request("GET", "/s/00000000000000000000000000000000", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let download = app
        .request("GET", "/s/00000000000000000000000000000000/download", None, None)
        .await;
    assert_eq!(download.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_list_shares_for_user() {
    let app = helpers::TestApp::new().await;
    let user = "user_share_list";
    let token = app.session_token(user);
    let root_id = app.onboard(&token).await;
    let file_id = app.seed_file(user, root_id, "listed.txt", 10).await;

    app.request(
        "POST",
        &format!("/api/files/{file_id}/share"),
        None,
        Some(&token),
    )
    .await;

    let response = app.request("GET", "/api/shares", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let shares = response.body["data"].as_array().unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0]["file_id"].as_str().unwrap(), file_id.to_string());
}
