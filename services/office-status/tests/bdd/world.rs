//! BDD test world for the office status notifier

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cucumber::World;
use office_status::io::{HttpClient, HttpResponse};
use office_status::poller::{PollOutcome, Poller};
use office_status::webhook::WebhookNotifier;

/// What the fake endpoints answer and what they were sent
#[derive(Debug)]
pub struct FakeEndpoints {
    pub status_code: u16,
    pub status_body: String,
    pub webhook_code: u16,
    pub posts: Vec<serde_json::Value>,
}

impl Default for FakeEndpoints {
    fn default() -> Self {
        Self {
            status_code: 200,
            status_body: r#"{"is_open": false}"#.to_string(),
            webhook_code: 204,
            posts: Vec::new(),
        }
    }
}

/// HTTP client serving the status endpoint and recording webhook posts
#[derive(Debug, Default, Clone)]
pub struct FakeHttp {
    pub endpoints: Arc<Mutex<FakeEndpoints>>,
}

#[async_trait]
impl HttpClient for FakeHttp {
    async fn get(&self, _url: &str) -> office_status::Result<HttpResponse> {
        let endpoints = self.endpoints.lock().unwrap();
        Ok(HttpResponse {
            status: endpoints.status_code,
            body: endpoints.status_body.clone(),
        })
    }

    async fn post_json(
        &self,
        _url: &str,
        body: &serde_json::Value,
    ) -> office_status::Result<HttpResponse> {
        let mut endpoints = self.endpoints.lock().unwrap();
        endpoints.posts.push(body.clone());
        Ok(HttpResponse {
            status: endpoints.webhook_code,
            body: String::new(),
        })
    }
}

#[derive(Debug, Default, World)]
pub struct OfficeStatusWorld {
    pub http: FakeHttp,

    // Polling
    pub poller: Option<Poller>,
    pub last_outcome: Option<PollOutcome>,

    // Webhook delivery
    pub webhook: Option<WebhookNotifier>,
    pub send_result: Option<office_status::Result<()>>,
}
