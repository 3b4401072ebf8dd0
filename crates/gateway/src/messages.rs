//! Wire types for the gateway's chat-completions endpoint.
//!
//! Only the fields this service reads or writes are modelled; unknown
//! response fields are ignored.

use lumen_core::generation::MediaType;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Body of `POST /chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Requested output modalities, e.g. `["image", "text"]`.
    pub modalities: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: MessageContent,
}

/// Plain text when no image is attached, multi-part otherwise.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: UrlRef },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlRef {
    pub url: String,
}

impl ChatCompletionRequest {
    /// Build a single-turn user request carrying the prompt and, when
    /// present, the source image as an inline reference.
    pub fn single_turn(
        model: &str,
        prompt: &str,
        image_data_uri: Option<&str>,
        media_type: MediaType,
    ) -> Self {
        let content = match image_data_uri {
            Some(uri) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: prompt.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: UrlRef {
                        url: uri.to_string(),
                    },
                },
            ]),
            None => MessageContent::Text(prompt.to_string()),
        };

        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
            modalities: vec![media_type.as_str(), "text"],
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Upstream response. Every collection may be absent or `null`.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub images: Option<Vec<ImagePart>>,
    #[serde(default)]
    pub videos: Option<Vec<VideoPart>>,
}

#[derive(Debug, Deserialize)]
pub struct ImagePart {
    pub image_url: Option<UrlRef>,
}

#[derive(Debug, Deserialize)]
pub struct VideoPart {
    pub video_url: Option<UrlRef>,
}

impl ChatCompletionResponse {
    /// First asset URL of the first choice.
    ///
    /// Video requests prefer the `videos` array and fall back to `images`.
    pub fn first_asset_url(&self, media_type: MediaType) -> Option<&str> {
        let message = self.choices.as_deref()?.first()?.message.as_ref()?;

        let first_image = || {
            message
                .images
                .as_deref()
                .and_then(<[ImagePart]>::first)
                .and_then(|p| p.image_url.as_ref())
                .map(|u| u.url.as_str())
        };

        let url = match media_type {
            MediaType::Video => message
                .videos
                .as_deref()
                .and_then(<[VideoPart]>::first)
                .and_then(|p| p.video_url.as_ref())
                .map(|u| u.url.as_str())
                .or_else(first_image),
            MediaType::Image => first_image(),
        };
        url.filter(|u| !u.is_empty())
    }
}
