use honeychow_scanner::{
    Headers, HttpTransport, NoopReporter, ProbeOrchestrator, ProbeRequest, SearchStatus,
    SiteFilter, Transport, TransportError,
};
use honeychow_sites::{HttpMethod, SiteDefinition};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn get(url: String, headers: Headers) -> ProbeRequest {
    ProbeRequest {
        method: HttpMethod::Get,
        url,
        headers,
        body: None,
    }
}

#[tokio::test]
async fn test_get_sends_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/alice"))
        .and(header("User-Agent", "honeychow-test"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>alice</h1>"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().expect("create transport");
    let headers = Headers::from([("User-Agent".to_string(), "honeychow-test".to_string())]);

    let response = transport
        .execute(
            &get(format!("{}/users/alice", server.uri()), headers),
            Duration::from_secs(5),
        )
        .await
        .expect("execute");

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "<h1>alice</h1>");
}

#[tokio::test]
async fn test_post_sends_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/lookup"))
        .and(body_string(r#"{"user":"alice"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_string("taken"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().expect("create transport");
    let request = ProbeRequest {
        method: HttpMethod::Post,
        url: format!("{}/lookup", server.uri()),
        headers: Headers::new(),
        body: Some(r#"{"user":"alice"}"#.to_string()),
    };

    let response = transport
        .execute(&request, Duration::from_secs(5))
        .await
        .expect("execute");

    assert_eq!(response.status_code, 201);
    assert_eq!(response.body, "taken");
}

#[tokio::test]
async fn test_error_status_is_a_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().expect("create transport");
    let response = transport
        .execute(
            &get(format!("{}/missing", server.uri()), Headers::new()),
            Duration::from_secs(5),
        )
        .await
        .expect("execute");

    assert_eq!(response.status_code, 404);
    assert_eq!(response.body, "Not Found");
}

#[tokio::test]
async fn test_timeout_is_distinguished() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().expect("create transport");
    let timeout = Duration::from_millis(200);

    let err = transport
        .execute(&get(format!("{}/slow", server.uri()), Headers::new()), timeout)
        .await
        .unwrap_err();

    assert_eq!(err, TransportError::Timeout { after: timeout });
    assert_eq!(err.to_string(), "Timeout");
}

#[tokio::test]
async fn test_connection_failure_is_request_error() {
    let transport = HttpTransport::new().expect("create transport");

    let err = transport
        .execute(
            &get("http://127.0.0.1:1/alice".to_string(), Headers::new()),
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Request(ref message) if !message.is_empty()));
}

#[tokio::test]
async fn test_search_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gh/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\"login\": \"alice\""))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forum/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_string("This user does not exist"))
        .mount(&server)
        .await;

    let mut github = SiteDefinition::new("GitHub", "coding", format!("{}/gh/{{account}}", server.uri()));
    github.hit_status_code = Some(200);
    github.hit_substring = Some("\"login\"".to_string());
    github.pretty_url_template = Some("https://github.com/{account}".to_string());

    let mut forum = SiteDefinition::new("Forum", "social", format!("{}/forum/{{account}}", server.uri()));
    forum.hit_status_code = Some(200);
    forum.miss_substring = Some("does not exist".to_string());

    let transport = Arc::new(HttpTransport::new().expect("create transport"));
    let results = ProbeOrchestrator::new(transport)
        .with_timeout(Duration::from_secs(5))
        .search(
            &[github, forum],
            "alice",
            &SiteFilter::all(),
            &mut NoopReporter,
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(results.status, SearchStatus::Completed);

    assert_eq!(results.found.len(), 1);
    assert_eq!(results.found[0].url, "https://github.com/alice");
    assert_eq!(results.found[0].confidence, 100);

    assert_eq!(results.not_found.len(), 1);
    assert_eq!(results.not_found[0].site_name, "Forum");
    assert_eq!(results.not_found[0].confidence, 100);
}
