//! BDD step definitions for the polling feature

use std::sync::Arc;

use cucumber::{given, then, when};
use tokio_util::sync::CancellationToken;

use office_status::fetcher::HttpStatusSource;
use office_status::poller::{PollOutcome, Poller};
use office_status::webhook::WebhookNotifier;
use office_status::NotifierConfig;

use crate::world::OfficeStatusWorld;

const ENDPOINT: &str = "https://status.example.org/office-status.json";
const WEBHOOK: &str = "https://discord.example.com/api/webhooks/1/token";

fn parse_outcome(s: &str) -> PollOutcome {
    match s {
        "unchanged" => PollOutcome::Unchanged,
        "notified" => PollOutcome::Notified,
        "adopted" => PollOutcome::Adopted,
        "fetch_failed" => PollOutcome::FetchFailed,
        "notify_failed" => PollOutcome::NotifyFailed,
        "outage_announced" => PollOutcome::OutageAnnounced,
        other => panic!("Unknown outcome: {}", other),
    }
}

fn set_status_body(world: &mut OfficeStatusWorld, body: &str) {
    let mut endpoints = world.http.endpoints.lock().unwrap();
    endpoints.status_code = 200;
    endpoints.status_body = body.to_string();
}

async fn poll(world: &mut OfficeStatusWorld) {
    let http = world.http.clone();
    let poller = world.poller.get_or_insert_with(|| {
        let config = NotifierConfig::new(WEBHOOK, ENDPOINT);
        let http = Arc::new(http);
        Poller::new(
            Arc::new(HttpStatusSource::new(ENDPOINT, http.clone())),
            Arc::new(WebhookNotifier::new(&config, http)),
            &config,
            CancellationToken::new(),
        )
    });
    world.last_outcome = Some(poller.poll_once().await);
}

fn posted_contents(world: &OfficeStatusWorld) -> Vec<String> {
    world
        .http
        .endpoints
        .lock()
        .unwrap()
        .posts
        .iter()
        .map(|p| p["content"].as_str().unwrap_or_default().to_string())
        .collect()
}

const OPEN_BODY: &str = r#"{"is_open": true, "changed_by": "Alice"}"#;
const CLOSED_BODY: &str = r#"{"is_open": false, "changed_by": "Bob"}"#;

#[given("the status endpoint reports the office open")]
fn endpoint_open(world: &mut OfficeStatusWorld) {
    set_status_body(world, OPEN_BODY);
}

#[when("the status endpoint reports the office open")]
fn endpoint_now_open(world: &mut OfficeStatusWorld) {
    set_status_body(world, OPEN_BODY);
}

#[when("the status endpoint reports the office closed")]
fn endpoint_now_closed(world: &mut OfficeStatusWorld) {
    set_status_body(world, CLOSED_BODY);
}

#[when(expr = "the status endpoint returns {string}")]
fn endpoint_returns(world: &mut OfficeStatusWorld, body: String) {
    set_status_body(world, &body);
}

#[when(expr = "the status endpoint fails with status {int}")]
fn endpoint_fails(world: &mut OfficeStatusWorld, code: u16) {
    world.http.endpoints.lock().unwrap().status_code = code;
}

#[given(expr = "the webhook responds with status {int}")]
fn webhook_responds(world: &mut OfficeStatusWorld, code: u16) {
    world.http.endpoints.lock().unwrap().webhook_code = code;
}

#[when(expr = "the webhook recovers with status {int}")]
fn webhook_recovers(world: &mut OfficeStatusWorld, code: u16) {
    world.http.endpoints.lock().unwrap().webhook_code = code;
}

#[given("the notifier has polled")]
async fn notifier_has_polled(world: &mut OfficeStatusWorld) {
    poll(world).await;
}

#[when("the notifier polls")]
async fn notifier_polls(world: &mut OfficeStatusWorld) {
    poll(world).await;
}

#[when(expr = "the notifier polls {int} times")]
async fn notifier_polls_times(world: &mut OfficeStatusWorld, times: u32) {
    for _ in 0..times {
        poll(world).await;
    }
}

#[then(expr = "{int} announcement(s) should have been sent")]
fn announcements_sent(world: &mut OfficeStatusWorld, count: usize) {
    assert_eq!(posted_contents(world).len(), count);
}

#[then(expr = "the last announcement should contain {string}")]
fn last_announcement_contains(world: &mut OfficeStatusWorld, needle: String) {
    let contents = posted_contents(world);
    let last = contents.last().expect("no announcement was sent");
    assert!(last.contains(&needle), "{last:?} does not contain {needle:?}");
}

#[then(expr = "the poll outcome should be {string}")]
fn poll_outcome_is(world: &mut OfficeStatusWorld, expected: String) {
    assert_eq!(world.last_outcome, Some(parse_outcome(&expected)));
}

#[then(expr = "the last known status should be {word}")]
fn last_known_is(world: &mut OfficeStatusWorld, state: String) {
    let poller = world.poller.as_ref().expect("poller not created");
    let last = poller.last_known().expect("no status recorded");
    match state.as_str() {
        "open" => assert!(last.is_open),
        "closed" => assert!(!last.is_open),
        other => panic!("Unknown state: {}", other),
    }
}
