use std::sync::mpsc::Sender;

use reqwest::{Client, Url};
use serde_json::Value;
use tokio::runtime::Handle;

use crate::{
    domain::events::{RestOutcome, TransportEvent},
    infra::error::AppError,
    usecases::contracts::RestTransport,
};

use super::wire::{reply_text, OutboundMessage};

const REST_REQUEST_FAILED: &str = "REST_REQUEST_FAILED";
const REST_STATUS_NOT_OK: &str = "REST_STATUS_NOT_OK";
const REST_BODY_UNREADABLE: &str = "REST_BODY_UNREADABLE";
const REST_OUTCOME_DROPPED: &str = "REST_OUTCOME_DROPPED";

/// Single-shot JSON chat client. No timeout is applied to requests.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    endpoint: Url,
}

impl RestClient {
    pub fn new(endpoint: &str) -> Result<Self, AppError> {
        let endpoint = Url::parse(endpoint).map_err(|error| AppError::InvalidEndpoint {
            field: "rest_endpoint",
            value: endpoint.to_owned(),
            reason: error.to_string(),
        })?;

        let client = Client::builder()
            .build()
            .map_err(|error| AppError::Other(error.into()))?;

        Ok(Self { client, endpoint })
    }

    /// POSTs `{"message": text}` and classifies the response.
    #[tracing::instrument(skip(self, text), fields(endpoint = %self.endpoint, len = text.len()))]
    pub async fn post(&self, text: &str) -> RestOutcome {
        let response = match self
            .client
            .post(self.endpoint.clone())
            .json(&OutboundMessage { message: text })
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(code = REST_REQUEST_FAILED, error = %error, "chat request failed");
                return RestOutcome::Failed(error.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                code = REST_STATUS_NOT_OK,
                status = status.as_u16(),
                body = %body,
                "chat request returned non-success status"
            );
            return RestOutcome::Status {
                code: status.as_u16(),
                body,
            };
        }

        match response.json::<Value>().await {
            Ok(body) => {
                tracing::debug!(status = status.as_u16(), "chat reply received");
                RestOutcome::Reply(reply_text(&body))
            }
            Err(error) => {
                tracing::error!(
                    code = REST_BODY_UNREADABLE,
                    error = %error,
                    "chat reply is not valid json"
                );
                RestOutcome::Failed(error.to_string())
            }
        }
    }
}

/// Runs each request on the runtime and reports its outcome to the UI loop.
pub struct SpawningRestTransport {
    client: RestClient,
    runtime: Handle,
    events: Sender<TransportEvent>,
}

impl SpawningRestTransport {
    pub fn new(client: RestClient, runtime: Handle, events: Sender<TransportEvent>) -> Self {
        Self {
            client,
            runtime,
            events,
        }
    }
}

impl RestTransport for SpawningRestTransport {
    fn post(&self, text: &str) {
        let client = self.client.clone();
        let events = self.events.clone();
        let text = text.to_owned();

        self.runtime.spawn(async move {
            let outcome = client.post(&text).await;
            if events.send(TransportEvent::Rest(outcome)).is_err() {
                tracing::debug!(
                    code = REST_OUTCOME_DROPPED,
                    "ui loop is gone; dropping chat reply"
                );
            }
        });
    }
}
