use httpmock::prelude::*;
use moodle_notify::utils::text::extract_text;
use moodle_notify::{MoodleClient, MoodleError, DEFAULT_TIMEOUT};

const TOKEN_PATH: &str = "/login/token.php";
const REST_PATH: &str = "/webservice/rest/server.php";

fn client_for(server: &MockServer) -> MoodleClient {
    MoodleClient::new(&server.base_url(), DEFAULT_TIMEOUT).unwrap()
}

/// Stubs a full token grant for the given password and logs the client in.
async fn login(server: &MockServer, client: &mut MoodleClient, password: &str) {
    server.mock(|when, then| {
        when.method(POST)
            .path(TOKEN_PATH)
            .body_contains(format!("password={}", password));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "token": "abc123",
                "privatetoken": "def456"
            }));
    });

    assert!(client.login("student", password).await.unwrap());
}

#[tokio::test]
async fn login_stores_token_and_sends_it_on_later_calls() {
    let server = MockServer::start();
    let mut client = client_for(&server);

    let token_mock = server.mock(|when, then| {
        when.method(POST)
            .path(TOKEN_PATH)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body_contains("username=student")
            .body_contains("service=moodle_mobile_app");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "token": "abc123",
                "privatetoken": "def456"
            }));
    });

    assert!(client.login("student", "secret").await.unwrap());
    assert!(client.session().is_authenticated());
    assert_eq!(client.session().token(), Some("abc123"));
    token_mock.assert();

    let site_info_mock = server.mock(|when, then| {
        when.method(POST)
            .path(REST_PATH)
            .query_param("wstoken", "abc123")
            .query_param("wsfunction", "core_webservice_get_site_info")
            .query_param("moodlewsrestformat", "json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "sitename": "Campus",
                "fullname": "Stu Dent",
                "userid": 27436
            }));
    });

    let info = client.get_site_info().await.unwrap();
    assert_eq!(info.userid, Some(27436));
    assert_eq!(info.sitename.as_deref(), Some("Campus"));
    assert_eq!(client.session().user_id(), Some(27436));
    site_info_mock.assert();
}

#[tokio::test]
async fn login_rejection_leaves_previous_token_untouched() {
    let server = MockServer::start();
    let mut client = client_for(&server);
    login(&server, &mut client, "goodpass").await;

    server.mock(|when, then| {
        when.method(POST)
            .path(TOKEN_PATH)
            .body_contains("password=badpass");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "error": "Invalid login, please try again",
                "errorcode": "invalidlogin"
            }));
    });

    assert!(!client.login("student", "badpass").await.unwrap());
    assert_eq!(client.session().token(), Some("abc123"));
}

#[tokio::test]
async fn login_rejected_without_token_markers() {
    let server = MockServer::start();
    let mut client = client_for(&server);

    server.mock(|when, then| {
        when.method(POST).path(TOKEN_PATH);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "errorcode": "invalidlogin" }));
    });

    assert!(!client.login("student", "wrong").await.unwrap());
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn marker_positive_body_that_is_not_json_is_a_decode_error() {
    let server = MockServer::start();
    let mut client = client_for(&server);

    server.mock(|when, then| {
        when.method(POST).path(TOKEN_PATH);
        then.status(200).body("token privatetoken but not json");
    });

    let err = client.login("student", "secret").await.unwrap_err();
    assert!(matches!(err, MoodleError::Decode(_)));
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn data_fetch_before_login_is_refused_without_network() {
    let server = MockServer::start();
    let rest_mock = server.mock(|when, then| {
        when.path(REST_PATH);
        then.status(200).body("{}");
    });

    let mut client = client_for(&server);

    let err = client.get_popup_notifications(27436).await.unwrap_err();
    assert!(matches!(err, MoodleError::Unauthenticated));

    let err = client.get_unread_count(27436).await.unwrap_err();
    assert!(matches!(err, MoodleError::Unauthenticated));

    let err = client.get_site_info().await.unwrap_err();
    assert!(matches!(err, MoodleError::Unauthenticated));

    let err = client
        .call_function("core_webservice_get_site_info", None)
        .await
        .unwrap_err();
    assert!(matches!(err, MoodleError::Unauthenticated));

    rest_mock.assert_hits(0);
}

#[tokio::test]
async fn popup_notifications_decode_and_render() {
    let server = MockServer::start();
    let mut client = client_for(&server);
    login(&server, &mut client, "secret").await;

    let rest_mock = server.mock(|when, then| {
        when.method(POST)
            .path(REST_PATH)
            .query_param("wsfunction", "message_popup_get_popup_notifications")
            .query_param("useridto", "27436")
            .query_param("wstoken", "abc123");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "notifications": [
                    { "id": 1, "subject": "S", "fullmessagehtml": "<p>Hi</p>" }
                ]
            }));
    });

    let inbox = client.get_popup_notifications(27436).await.unwrap();
    assert_eq!(inbox.notifications[0].id, 1);
    assert_eq!(inbox.newest().map(|n| n.id), Some(1));

    let html = inbox.notifications[0].fullmessagehtml.as_deref().unwrap();
    assert_eq!(extract_text(html), "Hi");
    rest_mock.assert();
}

#[tokio::test]
async fn unread_count_is_a_bare_integer_body() {
    let server = MockServer::start();
    let mut client = client_for(&server);
    login(&server, &mut client, "secret").await;

    let rest_mock = server.mock(|when, then| {
        when.method(POST).path(REST_PATH).query_param(
            "wsfunction",
            "message_popup_get_unread_popup_notification_count",
        );
        then.status(200)
            .header("Content-Type", "application/json")
            .body("3");
    });

    assert_eq!(client.get_unread_count(27436).await.unwrap(), 3);
    rest_mock.assert();
}

#[tokio::test]
async fn non_numeric_unread_count_is_a_missing_field() {
    let server = MockServer::start();
    let mut client = client_for(&server);
    login(&server, &mut client, "secret").await;

    server.mock(|when, then| {
        when.method(POST).path(REST_PATH);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "exception": "moodle_exception" }));
    });

    let err = client.get_unread_count(27436).await.unwrap_err();
    assert!(matches!(err, MoodleError::MissingField { .. }));
}

#[tokio::test]
async fn site_info_without_userid_is_a_missing_field() {
    let server = MockServer::start();
    let mut client = client_for(&server);
    login(&server, &mut client, "secret").await;

    server.mock(|when, then| {
        when.method(POST)
            .path(REST_PATH)
            .query_param("wsfunction", "core_webservice_get_site_info");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "sitename": "Campus" }));
    });

    let err = client.get_site_info().await.unwrap_err();
    assert!(matches!(
        err,
        MoodleError::MissingField { field: "userid" }
    ));
    assert_eq!(client.session().user_id(), None);
}

#[tokio::test]
async fn call_function_returns_the_decoded_body_verbatim() {
    let server = MockServer::start();
    let mut client = client_for(&server);
    login(&server, &mut client, "secret").await;

    let payload = serde_json::json!({ "warnings": [], "custom": { "nested": [1, 2, 3] } });
    let body = payload.clone();
    server.mock(move |when, then| {
        when.method(POST)
            .path(REST_PATH)
            .query_param("wsfunction", "core_course_get_courses");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(body);
    });

    let value = client
        .call_function("core_course_get_courses", None)
        .await
        .unwrap();
    assert_eq!(value, payload);
}

#[tokio::test]
async fn connection_refused_is_a_transport_failure() {
    // Nothing listens on port 1.
    let mut client = MoodleClient::new("http://127.0.0.1:1/", DEFAULT_TIMEOUT).unwrap();

    let err = client.login("student", "secret").await.unwrap_err();
    assert!(matches!(err, MoodleError::Transport(_)));
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn http_error_status_on_data_fetch_is_a_transport_failure() {
    let server = MockServer::start();
    let mut client = client_for(&server);
    login(&server, &mut client, "secret").await;

    server.mock(|when, then| {
        when.method(POST).path(REST_PATH);
        then.status(500).body("internal error");
    });

    let err = client.get_popup_notifications(27436).await.unwrap_err();
    assert!(matches!(err, MoodleError::Transport(_)));
}

#[tokio::test]
async fn malformed_json_on_data_fetch_is_a_decode_error() {
    let server = MockServer::start();
    let mut client = client_for(&server);
    login(&server, &mut client, "secret").await;

    server.mock(|when, then| {
        when.method(POST).path(REST_PATH);
        then.status(200).body("<html>maintenance page</html>");
    });

    let err = client.get_popup_notifications(27436).await.unwrap_err();
    assert!(matches!(err, MoodleError::Decode(_)));
}
