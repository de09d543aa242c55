//! Integration tests for file rename, delete, and the upload paths.

use axum::body::Body;
use http::{Request, StatusCode};
use tower::ServiceExt;

use crate::helpers;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_rename_preserves_extension() {
    let app = helpers::TestApp::new().await;
    let user = "user_ext";
    let token = app.session_token(user);
    let root_id = app.onboard(&token).await;
    let file_id = app.seed_file(user, root_id, "report.pdf", 42).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{file_id}"),
            Some(serde_json::json!({ "name": "summary" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "summary.pdf");

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{file_id}"),
            Some(serde_json::json!({ "name": "summary.docx" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "summary.docx");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_rename_by_non_owner_rejected() {
    let app = helpers::TestApp::new().await;
    let owner = "user_file_owner";
    let owner_token = app.session_token(owner);
    let intruder_token = app.session_token("user_file_intruder");

    let root_id = app.onboard(&owner_token).await;
    let file_id = app.seed_file(owner, root_id, "private.txt", 5).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{file_id}"),
            Some(serde_json::json!({ "name": "stolen" })),
            Some(&intruder_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // The record is unchanged.
    let name: String = sqlx::query_scalar("SELECT name FROM files WHERE id = $1")
        .bind(file_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(name, "private.txt");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_delete_file_removes_blob_and_record() {
    let app = helpers::TestApp::new().await;
    let user = "user_file_delete";
    let token = app.session_token(user);
    let root_id = app.onboard(&token).await;
    let file_id = app.seed_file(user, root_id, "doomed.txt", 5).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/files/{file_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    assert_eq!(app.count_rows("files", "id", file_id).await, 0);
    assert_eq!(app.blob.deleted_keys().len(), 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_upload_callback_appends_file() {
    let app = helpers::TestApp::new().await;
    let user = "user_callback";
    let token = app.session_token(user);
    let root_id = app.onboard(&token).await;
    app.seed_file(user, root_id, "existing.txt", 1).await;

    let callback_body = serde_json::json!({
        "name": "uploaded.png",
        "size_bytes": 2048,
        "url": format!("{}someuploadkey", app.config.blob.public_url_prefix),
        "parent_id": root_id,
        "owner_id": user,
    });

    // Without the shared secret the callback is rejected.
    let response = app
        .request("POST", "/api/uploads/callback", Some(callback_body.clone()), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .method("POST")
        .uri("/api/uploads/callback")
        .header("content-type", "application/json")
        .header("x-callback-token", &app.config.blob.callback_token)
        .body(Body::from(callback_body.to_string()))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Appended after the existing file in sibling order.
    let listing = app
        .request(
            "GET",
            &format!("/api/folders/{root_id}/contents"),
            None,
            Some(&token),
        )
        .await;
    let names: Vec<&str> = listing.body["data"]["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["existing.txt", "uploaded.png"]);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_upload_authorize_checks_parent_ownership() {
    let app = helpers::TestApp::new().await;
    let owner_token = app.session_token("user_auth_owner");
    let intruder_token = app.session_token("user_auth_intruder");
    let root_id = app.onboard(&owner_token).await;

    let response = app
        .request(
            "POST",
            "/api/uploads/authorize",
            Some(serde_json::json!({ "folder_id": root_id })),
            Some(&owner_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/uploads/authorize",
            Some(serde_json::json!({ "folder_id": root_id })),
            Some(&intruder_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_direct_multipart_upload() {
    let app = helpers::TestApp::new().await;
    let token = app.session_token("user_multipart");
    let root_id = app.onboard(&token).await;

    let boundary = "XTESTBOUNDARY";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"hello.txt\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         hello drivebox\r\n\
         --{boundary}--\r\n"
    );

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/folders/{root_id}/upload"))
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed["data"]["name"], "hello.txt");
    assert_eq!(parsed["data"]["size_bytes"], 14);
}
