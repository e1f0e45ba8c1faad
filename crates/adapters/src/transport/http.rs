use std::time::Duration;

use async_trait::async_trait;
use image::ImageFormat;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use shutterbox_application::{ApplicationError, Transport};
use shutterbox_domain::{ImageAsset, TransportOutcome};
use tracing::{debug, warn};

const IMAGE_FIELD: &str = "image";

fn image_mime(image_data: &[u8]) -> &'static str {
    match image::guess_format(image_data) {
        Ok(ImageFormat::Png) => "image/png",
        _ => "image/jpeg",
    }
}

/// Posts the asset as a single multipart `image` part. Any 2xx answer counts as
/// delivered and its body, if non-empty, becomes the receipt.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ApplicationError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "upload endpoint must not be empty".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| {
                ApplicationError::InvalidInput(format!("failed to build http client: {error}"))
            })?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn upload(&self, asset: &ImageAsset) -> TransportOutcome {
        let Some(image_data) = asset.image_data.clone() else {
            return TransportOutcome::Failed {
                reason: "asset has no image data".to_string(),
            };
        };

        let mime = image_mime(&image_data);
        let part = match Part::bytes(image_data)
            .file_name(asset.file_name())
            .mime_str(mime)
        {
            Ok(part) => part,
            Err(error) => {
                return TransportOutcome::Failed {
                    reason: error.to_string(),
                }
            }
        };
        let form = Form::new().part(IMAGE_FIELD, part);

        debug!(asset_id = %asset.id, endpoint = %self.endpoint, "posting asset");
        let response = match self.client.post(&self.endpoint).multipart(form).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(asset_id = %asset.id, %error, "upload request failed");
                return TransportOutcome::Failed {
                    reason: error.to_string(),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            return TransportOutcome::Failed {
                reason: format!("server responded with {status}"),
            };
        }

        match response.text().await {
            Ok(body) => {
                let body = body.trim();
                TransportOutcome::Delivered {
                    receipt: (!body.is_empty()).then(|| body.to_string()),
                }
            }
            Err(error) => TransportOutcome::Failed {
                reason: format!("failed to read upload response: {error}"),
            },
        }
    }
}
