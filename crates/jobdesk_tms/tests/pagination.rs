use std::sync::Mutex;

use jobdesk_tms::{ClientEvent, ClientSettings, JobsClient, ProgressSink, TmsError};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIST_PATH: &str = "/cms/i18n/tsc/admin/be/translation-jobs/list";

#[derive(Default)]
struct TestSink {
    pages: Mutex<Vec<u32>>,
}

impl TestSink {
    fn pages(&self) -> Vec<u32> {
        self.pages.lock().unwrap().clone()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: ClientEvent) {
        if let ClientEvent::PageLoading { page } = event {
            self.pages.lock().unwrap().push(page);
        }
    }
}

fn settings_for(server: &MockServer) -> ClientSettings {
    ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    }
}

fn page_body(start: i64, len: usize) -> Value {
    let items: Vec<Value> = (0..len as i64)
        .map(|i| {
            json!({
                "id": start + i,
                "jobName": format!("Job {}", start + i),
                "status": "WAITING",
            })
        })
        .collect();
    json!({ "data": { "list": items } })
}

async fn mount_page(server: &MockServer, page: u32, body: Value) {
    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .and(body_partial_json(json!({ "page": page })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn three_pages_yield_all_jobs_in_three_requests() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(1, 50)).await;
    mount_page(&server, 2, page_body(51, 50)).await;
    mount_page(&server, 3, page_body(101, 13)).await;

    let client = JobsClient::new(settings_for(&server)).expect("client");
    let sink = TestSink::default();
    let jobs = client.fetch_all("test-token", &sink).await.expect("fetch");

    assert_eq!(jobs.len(), 113);
    assert_eq!(jobs[0].id, Some(1));
    assert_eq!(jobs[112].id, Some(113));
    assert_eq!(sink.pages(), vec![1, 2, 3]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn request_body_carries_the_fixed_list_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "page": 1,
            "pageSize": 50,
            "jobName": "",
            "statuses": [],
            "projectIds": [],
            "tab": "job",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let client = JobsClient::new(settings_for(&server)).expect("client");
    let jobs = client
        .fetch_all("test-token", &TestSink::default())
        .await
        .expect("fetch");
    assert_eq!(jobs.len(), 2);
}

#[tokio::test]
async fn exact_size_page_followed_by_empty_page_still_terminates() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(1, 50)).await;
    mount_page(&server, 2, json!({ "data": { "list": [] } })).await;

    let client = JobsClient::new(settings_for(&server)).expect("client");
    let jobs = client
        .fetch_all("test-token", &TestSink::default())
        .await
        .expect("fetch");

    assert_eq!(jobs.len(), 50);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn short_page_is_treated_as_the_last_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(1, 7)).await;

    let client = JobsClient::new(settings_for(&server)).expect("client");
    let jobs = client
        .fetch_all("test-token", &TestSink::default())
        .await
        .expect("fetch");

    assert_eq!(jobs.len(), 7);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn top_level_and_bare_array_envelopes_are_recognized() {
    let server = MockServer::start().await;
    mount_page(&server, 1, json!({ "items": page_body(1, 3)["data"]["list"] })).await;

    let client = JobsClient::new(settings_for(&server)).expect("client");
    let jobs = client
        .fetch_all("test-token", &TestSink::default())
        .await
        .expect("fetch");
    assert_eq!(jobs.len(), 3);

    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(1, 2)["data"]["list"].clone()).await;

    let client = JobsClient::new(settings_for(&server)).expect("client");
    let jobs = client
        .fetch_all("test-token", &TestSink::default())
        .await
        .expect("fetch");
    assert_eq!(jobs.len(), 2);
}

#[tokio::test]
async fn unrecognized_envelope_yields_an_empty_list_not_an_error() {
    let server = MockServer::start().await;
    mount_page(&server, 1, json!({ "totals": { "count": 3 } })).await;

    let client = JobsClient::new(settings_for(&server)).expect("client");
    let jobs = client
        .fetch_all("test-token", &TestSink::default())
        .await
        .expect("fetch");

    assert!(jobs.is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn http_error_aborts_the_whole_fetch_with_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let client = JobsClient::new(settings_for(&server)).expect("client");
    let err = client
        .fetch_all("test-token", &TestSink::default())
        .await
        .unwrap_err();

    match err {
        TmsError::Http { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("backend exploded"));
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_records_are_dropped_without_ending_the_page_early() {
    // Termination is decided on the raw item count: a full page with one
    // malformed record must still advance to the next page.
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({ "data": { "list": [
            { "id": 1, "status": "WAITING" },
            { "id": "not-a-number", "status": "WAITING" },
        ] } }),
    )
    .await;
    mount_page(&server, 2, json!({ "data": { "list": [ { "id": 3 } ] } })).await;

    let settings = ClientSettings {
        page_size: 2,
        ..settings_for(&server)
    };
    let client = JobsClient::new(settings).expect("client");
    let jobs = client
        .fetch_all("test-token", &TestSink::default())
        .await
        .expect("fetch");

    assert_eq!(
        jobs.iter().map(|job| job.id).collect::<Vec<_>>(),
        vec![Some(1), Some(3)]
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn the_page_ceiling_bounds_a_misbehaving_server() {
    let server = MockServer::start().await;
    // Every page comes back full, so only the ceiling can stop the loop.
    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, 1)))
        .mount(&server)
        .await;

    let settings = ClientSettings {
        page_size: 1,
        max_pages: 4,
        ..settings_for(&server)
    };
    let client = JobsClient::new(settings).expect("client");
    let jobs = client
        .fetch_all("test-token", &TestSink::default())
        .await
        .expect("fetch");

    assert_eq!(jobs.len(), 4);
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}
