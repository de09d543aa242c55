//! Integration tests for onboarding, folder CRUD, cascading delete, and
//! size aggregation.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_onboarding_creates_default_folders() {
    let app = helpers::TestApp::new().await;
    let token = app.session_token("user_onboard");

    let root_id = app.onboard(&token).await;

    let response = app
        .request(
            "GET",
            &format!("/api/folders/{root_id}/contents"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let names: Vec<&str> = response.body["data"]["folders"]
        .as_array()
        .expect("folders array")
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Trash", "Shared", "Documents"]);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_onboarding_twice_conflicts() {
    let app = helpers::TestApp::new().await;
    let token = app.session_token("user_twice");

    app.onboard(&token).await;
    let response = app.request("POST", "/api/drive", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    // Still exactly one root.
    let roots: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM folders WHERE owner_id = $1 AND parent_id IS NULL",
    )
    .bind("user_twice")
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(roots, 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_breadcrumbs_run_from_root_to_folder() {
    let app = helpers::TestApp::new().await;
    let token = app.session_token("user_crumbs");

    let root_id = app.onboard(&token).await;
    let a = app.create_folder(&token, root_id, "a").await;
    let b = app.create_folder(&token, a, "b").await;
    let c = app.create_folder(&token, b, "c").await;

    let response = app
        .request(
            "GET",
            &format!("/api/folders/{c}/contents"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let crumbs: Vec<&str> = response.body["data"]["breadcrumbs"]
        .as_array()
        .expect("breadcrumbs array")
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(crumbs, vec!["Root", "a", "b", "c"]);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_create_folder_in_foreign_parent_forbidden() {
    let app = helpers::TestApp::new().await;
    let owner = app.session_token("user_owner");
    let intruder = app.session_token("user_intruder");

    let root_id = app.onboard(&owner).await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "name": "sneaky", "parent_id": root_id })),
            Some(&intruder),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_empty_folder_name_rejected() {
    let app = helpers::TestApp::new().await;
    let token = app.session_token("user_blank");
    let root_id = app.onboard(&token).await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "name": "   ", "parent_id": root_id })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_cascading_delete_removes_subtree_and_blobs() {
    let app = helpers::TestApp::new().await;
    let user = "user_cascade";
    let token = app.session_token(user);
    let root_id = app.onboard(&token).await;

    // target
    // ├── a  (a1, a2)
    // │   └── c  (c1, c2)
    // │       └── e  (empty)
    // └── b  (b1, b2)
    //     └── d  (empty)
    let target = app.create_folder(&token, root_id, "target").await;
    let a = app.create_folder(&token, target, "a").await;
    let b = app.create_folder(&token, target, "b").await;
    let c = app.create_folder(&token, a, "c").await;
    let d = app.create_folder(&token, b, "d").await;
    let e = app.create_folder(&token, c, "e").await;

    let mut file_ids = Vec::new();
    for (parent, name) in [
        (a, "a1.txt"),
        (a, "a2.txt"),
        (b, "b1.txt"),
        (b, "b2.txt"),
        (c, "c1.txt"),
        (c, "c2.txt"),
    ] {
        file_ids.push(app.seed_file(user, parent, name, 10).await);
    }

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{target}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // No folder or file rows referencing the subtree survive.
    for folder in [target, a, b, c, d, e] {
        assert_eq!(app.count_rows("folders", "id", folder).await, 0);
        assert_eq!(app.count_rows("folders", "parent_id", folder).await, 0);
        assert_eq!(app.count_rows("files", "parent_id", folder).await, 0);
    }
    for file in file_ids {
        assert_eq!(app.count_rows("files", "id", file).await, 0);
    }

    // The parent listing no longer includes the deleted folder.
    let listing = app
        .request(
            "GET",
            &format!("/api/folders/{root_id}/contents"),
            None,
            Some(&token),
        )
        .await;
    let names: Vec<&str> = listing.body["data"]["folders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert!(!names.contains(&"target"));

    // Exactly one blob delete per descendant file, batched per folder
    // level: three folders held files, so three calls covering six keys,
    // no key twice.
    let calls = app.blob.delete_calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 3);
    let mut keys = app.blob.deleted_keys();
    assert_eq!(keys.len(), 6);
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 6);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_recursive_folder_sizes() {
    let app = helpers::TestApp::new().await;
    let user = "user_sizes";
    let token = app.session_token(user);
    let root_id = app.onboard(&token).await;

    let outer = app.create_folder(&token, root_id, "outer").await;
    let inner = app.create_folder(&token, outer, "inner").await;
    app.seed_file(user, outer, "direct.bin", 100).await;
    app.seed_file(user, inner, "nested.bin", 250).await;

    let response = app
        .request(
            "GET",
            &format!("/api/folders/{root_id}/contents"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let folders = response.body["data"]["folders"].as_array().unwrap();
    let outer_entry = folders
        .iter()
        .find(|f| f["name"] == "outer")
        .expect("outer folder listed");
    assert_eq!(outer_entry["size_bytes"], 350);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_rename_folder() {
    let app = helpers::TestApp::new().await;
    let token = app.session_token("user_rename_folder");
    let root_id = app.onboard(&token).await;
    let folder = app.create_folder(&token, root_id, "old name").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{folder}"),
            Some(serde_json::json!({ "name": "  new name  " })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "new name");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_missing_folder_is_not_found() {
    let app = helpers::TestApp::new().await;
    let token = app.session_token("user_missing");
    app.onboard(&token).await;

    let response = app
        .request(
            "GET",
            &format!("/api/folders/{}/contents", Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_requests_without_session_are_unauthorized() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/drive", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
