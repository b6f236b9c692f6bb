//! Avatar customization: predefined picks, AI generation, and the
//! placeholder fallback.

use async_trait::async_trait;
use log::warn;
use serde::Serialize;

use crate::constants::IMAGE_MODEL;

/// Stock emoji avatars offered before any AI generation.
pub const PREDEFINED_AVATARS: [&str; 12] = [
    "🧑‍⚕️",
    "👩‍⚕️",
    "👨‍🔬",
    "👩‍🔬",
    "🧠",
    "❤️",
    "💊",
    "💉",
    "🧬",
    "🦠",
    "🐶",
    "🐱",
];

/// Neutral silhouette substituted when image generation fails, so callers
/// always receive something renderable.
pub const PLACEHOLDER_AVATAR_SVG: &str = "<svg xmlns='http://www.w3.org/2000/svg' \
     viewBox='0 0 64 64'><rect width='64' height='64' rx='12' fill='#e2e8f0'/>\
     <circle cx='32' cy='26' r='10' fill='#94a3b8'/>\
     <path d='M14 54c2-10 9-16 18-16s16 6 18 16z' fill='#94a3b8'/></svg>";

/// Prompt for a rank-themed profile picture.
#[must_use]
pub fn avatar_prompt(rank_name: &str) -> String {
    format!(
        "A vibrant, friendly cartoon avatar for a medical game profile picture. \
         The style should be modern, clean, and appealing. Subject should be a {rank_name}."
    )
}

/// Request handed to the external generative image service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvatarRequest {
    pub model: String,
    pub prompt: String,
}

impl AvatarRequest {
    /// Request for a square avatar themed on the player's current rank.
    #[must_use]
    pub fn for_rank(rank_name: &str) -> Self {
        Self {
            model: IMAGE_MODEL.to_string(),
            prompt: avatar_prompt(rank_name),
        }
    }
}

/// External generative image service seam. One attempt, no retries.
#[async_trait]
pub trait ImageService {
    /// Generate a single square PNG, returned base64-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error when the service is unreachable or returns no image.
    async fn generate_png(&self, request: &AvatarRequest) -> anyhow::Result<String>;
}

/// Which path produced the avatar art.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarSource {
    Remote,
    Placeholder,
}

/// Renderable avatar art.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarImage {
    /// Base64-encoded PNG from the image service.
    Png { base64: String },
    /// The static placeholder vector image.
    Placeholder { svg: &'static str },
}

impl AvatarImage {
    #[must_use]
    pub const fn source(&self) -> AvatarSource {
        match self {
            Self::Png { .. } => AvatarSource::Remote,
            Self::Placeholder { .. } => AvatarSource::Placeholder,
        }
    }
}

/// Generate avatar art, substituting the placeholder on any failure.
///
/// Service errors never reach the caller; they are logged and swallowed.
pub async fn generate_avatar(service: &dyn ImageService, request: &AvatarRequest) -> AvatarImage {
    match service.generate_png(request).await {
        Ok(base64) if !base64.is_empty() => AvatarImage::Png { base64 },
        Ok(_) => {
            warn!("image service returned an empty avatar; using placeholder");
            AvatarImage::Placeholder {
                svg: PLACEHOLDER_AVATAR_SVG,
            }
        }
        Err(err) => {
            warn!("image service unavailable ({err:#}); using placeholder avatar");
            AvatarImage::Placeholder {
                svg: PLACEHOLDER_AVATAR_SVG,
            }
        }
    }
}
