use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::ContactFields;

pub const API_FALLBACK_MESSAGE: &str = "Failed to submit form";
pub const RELAY_REJECTED_MESSAGE: &str = "Failed to send email";

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Network(#[from] reqwest::Error),
}

/// One outbound call carrying all five fields.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn deliver(&self, fields: &ContactFields) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransportConfig {
    Api {
        #[serde(default = "default_base_url")]
        base_url: String,
    },
    FormRelay {
        #[serde(default = "default_relay_endpoint")]
        endpoint: String,
        service_id: String,
        template_id: String,
        public_key: String,
    },
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::Api {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_owned()
}

fn default_relay_endpoint() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".to_owned()
}

impl TransportConfig {
    pub fn build(&self) -> Arc<dyn Transport> {
        match self {
            TransportConfig::Api { base_url } => Arc::new(ApiTransport::new(base_url)),
            TransportConfig::FormRelay {
                endpoint,
                service_id,
                template_id,
                public_key,
            } => Arc::new(FormRelayTransport {
                client: Client::new(),
                endpoint: endpoint.to_owned(),
                service_id: service_id.to_owned(),
                template_id: template_id.to_owned(),
                public_key: public_key.to_owned(),
            }),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Posts to the contact service.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    client: Client,
    base_url: String,
}

impl ApiTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self) -> String {
        format!("{}/contact", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl Transport for ApiTransport {
    async fn deliver(&self, fields: &ContactFields) -> Result<(), DeliveryError> {
        let res = match self.client.post(self.url()).json(fields).send().await {
            Ok(res) => res,
            Err(err) => {
                tracing::warn!(error = %err, url = %self.url(), "Contact service unreachable");

                return Err(DeliveryError::Rejected(API_FALLBACK_MESSAGE.to_owned()));
            }
        };

        if res.status().is_success() {
            return Ok(());
        }

        let status = res.status();
        let message = res
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| API_FALLBACK_MESSAGE.to_owned());

        tracing::warn!(status = %status, reason = %message, "Contact service rejected submission");

        Err(DeliveryError::Rejected(message))
    }
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactFields,
}

/// Posts to a hosted form-delivery service that mails the fields itself.
#[derive(Debug, Clone)]
pub struct FormRelayTransport {
    client: Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
}

#[async_trait::async_trait]
impl Transport for FormRelayTransport {
    async fn deliver(&self, fields: &ContactFields) -> Result<(), DeliveryError> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(&RelayRequest {
                service_id: &self.service_id,
                template_id: &self.template_id,
                user_id: &self.public_key,
                template_params: fields,
            })
            .send()
            .await?;

        if res.status() != StatusCode::OK {
            tracing::warn!(status = %res.status(), "Form relay rejected submission");

            return Err(DeliveryError::Rejected(RELAY_REJECTED_MESSAGE.to_owned()));
        }

        Ok(())
    }
}
