// tests/api.rs

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

use xcs_dashboard::{router, AppState, Config};

const TOKEN: &str = "test-id-token";

fn app(server: &MockServer) -> Router {
    let config = Config {
        xcs_api_url: server.base_url().parse().unwrap(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        request_timeout: Duration::from_secs(5),
        search_debounce: Duration::from_millis(1),
        cors_allowed_origin: None,
    };
    router(AppState::from_config(config).unwrap())
}

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"));

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn mock_roster(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/organizations/org-1");
            then.status(200).json_body(json!({
                "organization": {"id": "org-1", "name": "Acme", "owner": "u2"}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/organizations/org-1/members");
            then.status(200).json_body(json!({
                "u1": {"displayName": "Morgan", "role": 2},
                "u2": {"displayName": "Alex", "role": 3},
                "u3": {"displayName": "Sam", "role": 1}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/me");
            then.status(200).json_body(json!({"id": "u1", "username": "morgan"}));
        })
        .await;
}

// ---
// Auth
// ---

#[tokio::test]
async fn health_is_public() {
    let server = MockServer::start_async().await;

    let response = app(&server)
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn protected_routes_need_a_bearer_token() {
    let server = MockServer::start_async().await;

    let (status, body) = send(
        app(&server),
        Request::get("/api/organizations").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Missing or invalid authorization token.");
}

#[tokio::test]
async fn caller_token_is_forwarded_upstream() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/organizations")
                .header("authorization", format!("Bearer {TOKEN}"));
            then.status(200).json_body(json!({
                "organizations": [{"id": "org-1", "name": "Acme"}]
            }));
        })
        .await;

    let (status, body) = send(app(&server), request(Method::GET, "/api/organizations", None)).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Acme");
}

// ---
// Errors
// ---

#[tokio::test]
async fn upstream_errors_pass_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/locations/loc-1");
            then.status(403)
                .json_body(json!({"message": "You don't have permission to view this location."}));
        })
        .await;

    let (status, body) = send(app(&server), request(Method::GET, "/api/locations/loc-1", None)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You don't have permission to view this location.");
}

#[tokio::test]
async fn malformed_scan_data_never_reaches_the_backend() {
    let server = MockServer::start_async().await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/v1/access-points/ap-1");
            then.status(200).json_body(json!({"message": "Successfully updated access point."}));
        })
        .await;

    let payload = json!({
        "active": true,
        "armed": true,
        "unlockTime": 8,
        "scanData": {"disarmed": "{}", "ready": "{door: open"}
    });
    let (status, body) = send(
        app(&server),
        request(Method::PUT, "/api/access-points/ap-1/config", Some(payload)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("ready"));
    update.assert_hits_async(0).await;
}

#[tokio::test]
async fn valid_config_is_sent_as_objects() {
    let server = MockServer::start_async().await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/v1/access-points/ap-1")
                .json_body_partial(r#"{"config": {"unlockTime": 8, "scanData": {"disarmed": {}, "ready": {"door": "open"}}}}"#);
            then.status(200).json_body(json!({"message": "Successfully updated access point."}));
        })
        .await;

    let payload = json!({
        "active": true,
        "armed": false,
        "unlockTime": 8,
        "scanData": {"disarmed": "", "ready": "{\"door\": \"open\"}"}
    });
    let (status, body) = send(
        app(&server),
        request(Method::PUT, "/api/access-points/ap-1/config", Some(payload)),
    )
    .await;

    update.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully updated access point.");
}

#[tokio::test]
async fn invalid_payloads_list_field_errors() {
    let server = MockServer::start_async().await;

    let (status, body) = send(
        app(&server),
        request(Method::POST, "/api/organizations", Some(json!({"name": ""}))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["name"].is_array());
}

// ---
// Members
// ---

#[tokio::test]
async fn member_table_carries_row_actions() {
    let server = MockServer::start_async().await;
    mock_roster(&server).await;

    let (status, body) = send(
        app(&server),
        request(Method::GET, "/api/organizations/org-1/members?sort=role&direction=desc", None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["viewerId"], "u1");
    assert_eq!(body["ownerId"], "u2");

    let members = body["members"].as_array().unwrap();
    let ids: Vec<&str> = members.iter().map(|m| m["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["u2", "u1", "u3"]);

    // owner, self, regular member
    assert_eq!(members[0]["actions"]["canRemove"], false);
    assert_eq!(members[0]["actions"]["canEdit"], false);
    assert_eq!(members[1]["actions"]["canRemove"], false);
    assert_eq!(members[2]["actions"]["canRemove"], true);
    assert_eq!(members[2]["actions"]["canRemoveFromEditor"], true);
}

#[tokio::test]
async fn removing_the_owner_is_refused_locally() {
    let server = MockServer::start_async().await;
    mock_roster(&server).await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/v1/organizations/org-1/members/u2");
            then.status(200).json_body(json!({"message": "Removed."}));
        })
        .await;

    let (status, _) = send(
        app(&server),
        request(Method::DELETE, "/api/organizations/org-1/members/u2", None),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    delete.assert_hits_async(0).await;
}

#[tokio::test]
async fn bulk_remove_skips_self_and_owner_and_reports_failures() {
    let server = MockServer::start_async().await;
    mock_roster(&server).await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/v1/organizations/org-1/members/u3");
            then.status(200).json_body(json!({"message": "Removed."}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/v1/organizations/org-1/members/u9");
            then.status(404).json_body(json!({"message": "Member not found."}));
        })
        .await;

    let (status, body) = send(
        app(&server),
        request(
            Method::POST,
            "/api/organizations/org-1/members/bulk-remove",
            Some(json!({"memberIds": ["u1", "u2", "u3", "u9"]})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], json!(["u3"]));
    assert_eq!(body["skipped"], json!(["u1", "u2"]));
    assert_eq!(body["failed"][0]["id"], "u9");
    assert_eq!(body["failed"][0]["message"], "Member not found.");
}

// ---
// Access groups
// ---

#[tokio::test]
async fn access_group_options_put_organization_groups_last() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/organizations/org-1/access-groups");
            then.status(200).json_body(json!({
                "g1": {"name": "Staff", "type": "organization"},
                "g2": {"name": "Lobby", "type": "location", "locationId": "loc-1", "locationName": "HQ"},
                "g3": {"name": "Dock", "type": "location", "locationId": "loc-2", "locationName": "Warehouse"}
            }));
        })
        .await;

    let (status, body) = send(
        app(&server),
        request(Method::GET, "/api/organizations/org-1/access-group-options?locationId=loc-1", None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"label": "HQ", "options": [{"value": "g2", "label": "Lobby"}]},
            {"label": "Organization", "options": [{"value": "g1", "label": "Staff"}]}
        ])
    );
}

// ---
// Locations and access points
// ---

#[tokio::test]
async fn access_point_table_filters_by_name_and_tags() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/locations/loc-1/access-points");
            then.status(200).json_body(json!({
                "accessPoints": [
                    {"id": "ap-1", "name": "Front Door", "tags": ["lobby"]},
                    {"id": "ap-2", "name": "Back Door", "tags": ["dock"]},
                    {"id": "ap-3", "name": "Side Gate", "tags": ["lobby"]}
                ]
            }));
        })
        .await;

    let (status, body) = send(
        app(&server),
        request(Method::GET, "/api/locations/loc-1/access-points?query=%20DOOR&tags=lobby", None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body.as_array().unwrap().iter().map(|ap| ap["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["ap-1"]);
}

#[tokio::test]
async fn access_point_tags_keep_first_seen_order() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/locations/loc-1/access-points");
            then.status(200).json_body(json!({
                "accessPoints": [
                    {"id": "ap-1", "name": "A", "tags": ["zulu", "alpha"]},
                    {"id": "ap-2", "name": "B", "tags": null},
                    {"id": "ap-3", "name": "C", "tags": ["alpha", "mike"]}
                ]
            }));
        })
        .await;

    let (_, body) = send(
        app(&server),
        request(Method::GET, "/api/locations/loc-1/access-point-tags", None),
    )
    .await;

    let values: Vec<&str> = body.as_array().unwrap().iter().map(|t| t["value"].as_str().unwrap()).collect();
    assert_eq!(values, vec!["zulu", "alpha", "mike"]);
}

#[tokio::test]
async fn starter_pack_is_served_as_an_attachment() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/locations/loc-1");
            then.status(200)
                .json_body(json!({"location": {"id": "loc-1", "name": "Main Office #2"}}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/locations/loc-1/starter-pack");
            then.status(200).body("<roblox/>");
        })
        .await;

    let response = app(&server)
        .oneshot(request(Method::GET, "/api/locations/loc-1/starter-pack", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"xcs-template-main-office-2.rbxmx\""
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"<roblox/>");
}

#[tokio::test]
async fn bound_roblox_place_cannot_be_changed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/locations/loc-1");
            then.status(200).json_body(json!({
                "location": {"id": "loc-1", "name": "HQ", "roblox": {"placeId": 111, "universe": 222}}
            }));
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/v1/locations/loc-1");
            then.status(200).json_body(json!({"message": "Updated."}));
        })
        .await;

    let (status, _) = send(
        app(&server),
        request(
            Method::PUT,
            "/api/locations/loc-1",
            Some(json!({"name": "HQ", "roblox": {"placeId": 999, "universe": 222}})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    update.assert_hits_async(0).await;
}

// ---
// Account
// ---

#[tokio::test]
async fn invite_links_expire_after_fourteen_days() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/admin/invite-link/create");
            then.status(200).json_body(json!({"inviteCode": "b7Xq2Lp9"}));
        })
        .await;

    let (status, body) = send(
        app(&server),
        request(
            Method::POST,
            "/api/admin/invite-links",
            Some(json!({"type": "xcs", "maxUses": 1})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], "b7Xq2Lp9");

    let created = chrono::DateTime::parse_from_rfc3339(body["createdAt"].as_str().unwrap()).unwrap();
    let expires = chrono::DateTime::parse_from_rfc3339(body["expiresAt"].as_str().unwrap()).unwrap();
    assert_eq!((expires - created).num_days(), 14);
}

#[tokio::test]
async fn default_organization_round_trips() {
    let server = MockServer::start_async().await;
    mock_roster(&server).await;
    let app = app(&server);

    let (status, _) = send(
        app.clone(),
        request(
            Method::PUT,
            "/api/me/default-organization",
            Some(json!({"organizationId": "org-1"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(app, request(Method::GET, "/api/me/default-organization", None)).await;
    assert_eq!(body["organizationId"], "org-1");
}

#[tokio::test]
async fn failed_table_loads_release_their_tickets() {
    use std::sync::Arc;

    use xcs_dashboard::{
        clients::{BearerToken, XcsClient},
        common::{error::AppError, sequence::RequestSequencer},
        models::options::TableQuery,
        services::{LocationService, OrganizationService, PreferenceStore},
    };

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(500).json_body(json!({"message": "boom"}));
        })
        .await;

    let client = XcsClient::new(server.base_url().parse().unwrap(), Duration::from_secs(5)).unwrap();
    let session = client.session(Arc::new(BearerToken::new(TOKEN)));
    let sequencer = RequestSequencer::new();
    let locations = LocationService::new(sequencer.clone());
    let organizations = OrganizationService::new(sequencer.clone(), PreferenceStore::default());
    let query = TableQuery::default();

    for attempt in 0..20 {
        let viewer = format!("viewer-{attempt}");
        let result = locations
            .access_point_table(&session, &viewer, "loc-1", &query)
            .await;
        assert!(matches!(result, Err(AppError::Upstream { .. })));

        let result = organizations
            .member_table(&session, &viewer, "org-1", &query)
            .await;
        assert!(result.is_err());
    }

    assert_eq!(sequencer.in_flight(), 0);
}
