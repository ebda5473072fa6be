//! Google Generative Language API backend (Gemini, Imagen, Veo).

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::AdcraftConfig;
use crate::error::{AdcraftError, Result};
use crate::models::{ImageModel, ImageModelKind};
use crate::types::{ImageData, VideoHandle};

use super::http::{build_client, google_headers, status_to_error, transport_error, API_KEY_HEADER};
use super::{
    ContentPart, GenerativeBackend, ImageEditRequest, ImageRequest, TextRequest, VideoOperation,
    VideoRequest,
};

pub struct GoogleBackend {
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GoogleBackend {
    /// A missing key is accepted here; every call then fails with a
    /// credential error.
    pub fn new(config: &AdcraftConfig) -> Result<Self> {
        Ok(Self {
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout(),
            client: build_client(config.request_timeout())?,
        })
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AdcraftError::CredentialInvalid("API key not configured".into()))
    }

    fn map_transport(&self, err: reqwest::Error) -> AdcraftError {
        transport_error(err, self.timeout)
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn post_json<T: DeserializeOwned>(&self, url: &str, body: &Value) -> Result<T> {
        let resp = self
            .client
            .post(url)
            .headers(google_headers(self.api_key()?))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;
        read_json(resp).await
    }

    async fn generate_content(&self, model: &str, body: &Value) -> Result<GeminiResponse> {
        self.post_json(&self.model_url(model, "generateContent"), body)
            .await
    }

    async fn synthesize_with_imagen(&self, model: &str, request: &ImageRequest) -> Result<ImageData> {
        let body = json!({
            "instances": [{ "prompt": request.prompt }],
            "parameters": {
                "sampleCount": 1,
                "aspectRatio": request.aspect_ratio.to_string(),
                "outputOptions": { "mimeType": "image/jpeg" },
            }
        });
        let data: ImagenResponse = self.post_json(&self.model_url(model, "predict"), &body).await?;
        let prediction = data
            .predictions
            .into_iter()
            .find(|p| p.bytes_base64_encoded.as_deref().is_some_and(|b| !b.is_empty()))
            .ok_or_else(|| AdcraftError::NoMediaReturned(format!("{model} returned no image")))?;
        let mime = prediction.mime_type.unwrap_or_else(|| "image/jpeg".to_string());
        ImageData::from_base64(prediction.bytes_base64_encoded.as_deref().unwrap_or_default(), mime)
    }

    async fn synthesize_with_gemini(&self, model: &str, request: &ImageRequest) -> Result<ImageData> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
            "generationConfig": {
                "responseModalities": ["TEXT", "IMAGE"],
                "imageConfig": {
                    "aspectRatio": request.aspect_ratio.to_string(),
                    "imageSize": "1K",
                }
            }
        });
        let data = self.generate_content(model, &body).await?;
        data.first_image()?
            .ok_or_else(|| AdcraftError::NoMediaReturned(format!("{model} returned no image")))
    }
}

#[async_trait]
impl GenerativeBackend for GoogleBackend {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn generate_text(&self, request: &TextRequest) -> Result<String> {
        let mut body = json!({
            "contents": [{ "role": "user", "parts": build_gemini_parts(&request.parts) }],
        });
        if request.json_output || request.response_schema.is_some() {
            let mut gen_config = serde_json::Map::new();
            gen_config.insert("responseMimeType".into(), "application/json".into());
            if let Some(schema) = &request.response_schema {
                gen_config.insert("responseSchema".into(), schema.clone());
            }
            body["generationConfig"] = Value::Object(gen_config);
        }

        debug!(model = request.model.as_str(), "Google generate_text");
        let data = self.generate_content(&request.model, &body).await?;
        Ok(data.text())
    }

    async fn synthesize_image(&self, model: &ImageModel, request: &ImageRequest) -> Result<ImageData> {
        debug!(model = model.as_str(), kind = ?model.kind(), "Google synthesize_image");
        match model.kind() {
            ImageModelKind::Imagen => self.synthesize_with_imagen(model.as_str(), request).await,
            ImageModelKind::GeminiMultimodal => {
                self.synthesize_with_gemini(model.as_str(), request).await
            }
        }
    }

    async fn edit_image(&self, request: &ImageEditRequest) -> Result<ImageData> {
        let parts = build_gemini_parts(&[
            ContentPart::Image(request.image.clone()),
            ContentPart::Text(request.instruction.clone()),
        ]);
        let body = json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": { "responseModalities": ["TEXT", "IMAGE"] },
        });

        debug!(model = request.model.as_str(), "Google edit_image");
        let data = self.generate_content(&request.model, &body).await?;
        data.first_image()?
            .ok_or_else(|| AdcraftError::NoMediaReturned("no image data returned from edit".into()))
    }

    async fn start_video(&self, request: &VideoRequest) -> Result<VideoOperation> {
        let mut instance = json!({ "prompt": request.prompt });
        if let Some(image) = &request.seed_image {
            instance["image"] = json!({
                "bytesBase64Encoded": image.to_base64(),
                "mimeType": image.mime_type,
            });
        }
        let body = json!({
            "instances": [instance],
            "parameters": {
                "aspectRatio": request.aspect_ratio.to_string(),
                "resolution": request.resolution,
                "sampleCount": 1,
            }
        });

        debug!(model = request.model.as_str(), "Google start_video");
        let op: OperationResponse = self
            .post_json(&self.model_url(&request.model, "predictLongRunning"), &body)
            .await?;
        op.into_operation()
    }

    async fn poll_video(&self, operation_name: &str) -> Result<VideoOperation> {
        let url = format!("{}/{}", self.base_url, operation_name.trim_start_matches('/'));
        debug!(operation = operation_name, "Google poll_video");
        let resp = self
            .client
            .get(&url)
            .headers(google_headers(self.api_key()?))
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;
        let op: OperationResponse = read_json(resp).await?;
        op.into_operation()
    }

    async fn download_media(&self, uri: &str) -> Result<VideoHandle> {
        debug!(uri, "Google download_media");
        let resp = self
            .client
            .get(uri)
            .header(API_KEY_HEADER, self.api_key()?)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AdcraftError::DownloadFailed {
                status: status.as_u16(),
            });
        }
        let mime_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .filter(|v| v.starts_with("video/"))
            .unwrap_or_else(|| "video/mp4".to_string());
        let bytes = resp.bytes().await.map_err(|e| self.map_transport(e))?.to_vec();

        Ok(VideoHandle {
            bytes,
            mime_type,
            source_uri: uri.to_string(),
        })
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status().as_u16();
    let body_text = resp.text().await.unwrap_or_default();
    if !(200..300).contains(&status) {
        return Err(status_to_error(status, &body_text));
    }
    Ok(serde_json::from_str(&body_text)?)
}

fn build_gemini_parts(parts: &[ContentPart]) -> Vec<Value> {
    parts
        .iter()
        .map(|part| match part {
            ContentPart::Text(text) => json!({ "text": text }),
            ContentPart::Image(img) => json!({
                "inlineData": {
                    "mimeType": img.mime_type,
                    "data": img.to_base64(),
                }
            }),
        })
        .collect()
}

// Internal Gemini response types

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    fn parts(&self) -> impl Iterator<Item = &GeminiPart> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
            .iter()
    }

    fn text(&self) -> String {
        self.parts().filter_map(|p| p.text.as_deref()).collect()
    }

    fn first_image(&self) -> Result<Option<ImageData>> {
        match self.parts().find_map(|p| p.inline_data.as_ref()) {
            Some(inline) => {
                let mime = inline.mime_type.clone().unwrap_or_else(|| "image/png".to_string());
                ImageData::from_base64(&inline.data, mime).map(Some)
            }
            None => Ok(None),
        }
    }
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    inline_data: Option<GeminiInlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: Option<String>,
    data: String,
}

#[derive(Deserialize)]
struct ImagenResponse {
    #[serde(default)]
    predictions: Vec<ImagenPrediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImagenPrediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[derive(Deserialize)]
struct OperationResponse {
    name: String,
    #[serde(default)]
    done: bool,
    response: Option<Value>,
    error: Option<OperationError>,
}

#[derive(Deserialize)]
struct OperationError {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
}

impl OperationResponse {
    fn into_operation(self) -> Result<VideoOperation> {
        if let Some(err) = self.error {
            let status = if err.code == 0 { 500 } else { err.code };
            return Err(AdcraftError::api(status, err.message));
        }
        let video_uri = self.response.as_ref().and_then(extract_video_uri);
        Ok(VideoOperation {
            name: self.name,
            done: self.done,
            video_uri,
        })
    }
}

/// The REST and SDK shapes differ; accept both.
fn extract_video_uri(response: &Value) -> Option<String> {
    let samples = response
        .pointer("/generateVideoResponse/generatedSamples")
        .or_else(|| response.get("generatedVideos"))?;
    samples
        .as_array()?
        .iter()
        .find_map(|s| s.pointer("/video/uri").and_then(Value::as_str))
        .map(str::to_string)
}
