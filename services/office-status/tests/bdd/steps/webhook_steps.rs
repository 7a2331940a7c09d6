//! BDD step definitions for the webhook feature

use std::sync::Arc;

use cucumber::{given, then, when};

use office_status::config::WebhookKind;
use office_status::notifier::{Notification, Notifier};
use office_status::webhook::WebhookNotifier;
use office_status::{NotifierConfig, OfficeStatusError, StatusRecord};

use crate::world::OfficeStatusWorld;

fn parse_kind(s: &str) -> WebhookKind {
    match s {
        "discord" => WebhookKind::Discord,
        "slack" => WebhookKind::Slack,
        other => panic!("Unknown webhook kind: {}", other),
    }
}

#[given(expr = "a {word} webhook")]
fn a_webhook(world: &mut OfficeStatusWorld, kind: String) {
    let mut config = NotifierConfig::new(
        "https://hooks.example.com/office",
        "https://status.example.org/office-status.json",
    );
    config.webhook_kind = parse_kind(&kind);
    world.webhook = Some(WebhookNotifier::new(
        &config,
        Arc::new(world.http.clone()),
    ));
}

#[given(expr = "a {word} webhook that responds with status {int}")]
fn a_failing_webhook(world: &mut OfficeStatusWorld, kind: String, code: u16) {
    world.http.endpoints.lock().unwrap().webhook_code = code;
    a_webhook(world, kind);
}

async fn announce(world: &mut OfficeStatusWorld, record: StatusRecord) {
    let webhook = world.webhook.as_ref().expect("webhook not set");
    let result = webhook.send(&Notification::for_status(&record)).await;
    world.send_result = Some(result);
}

#[when(expr = "the office opened by {string} is announced")]
async fn announce_opened_by(world: &mut OfficeStatusWorld, who: String) {
    announce(world, StatusRecord::open().with_changed_by(who)).await;
}

#[when("the office closing is announced")]
async fn announce_closed(world: &mut OfficeStatusWorld) {
    announce(world, StatusRecord::closed()).await;
}

#[then(expr = "the webhook should receive {word} {string}")]
fn webhook_received(world: &mut OfficeStatusWorld, field: String, expected: String) {
    let endpoints = world.http.endpoints.lock().unwrap();
    let body = endpoints.posts.last().expect("nothing was posted");
    assert_eq!(body[field.as_str()], expected.as_str(), "payload: {body}");
}

#[then("the announcement should succeed")]
fn announcement_succeeds(world: &mut OfficeStatusWorld) {
    let result = world.send_result.as_ref().expect("no result");
    result.as_ref().unwrap();
}

#[then("the announcement should fail with a notify error")]
fn announcement_fails(world: &mut OfficeStatusWorld) {
    let result = world.send_result.as_ref().expect("no result");
    assert!(matches!(result, Err(OfficeStatusError::Notify(_))));
}
