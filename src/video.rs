// src/video.rs
//! Request side of video composition. The composer itself is external; this
//! module only guarantees it receives a valid, ordered frame list.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_FPS: u32 = 30;
pub const DEFAULT_RESOLUTION: (u32, u32) = (3840, 2160);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoTheme {
    pub transition: String,
    pub tempo: String,
    pub palette: String,
    pub music: String,
}

impl Default for VideoTheme {
    fn default() -> Self {
        Self {
            transition: "crossfade".into(),
            tempo: "energetic".into(),
            palette: "neon".into(),
            music: "synthwave".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioTrack {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionRequest {
    pub frames: Vec<Frame>,
    pub audio: Option<AudioTrack>,
    pub theme: VideoTheme,
    pub fps: u32,
    pub resolution: (u32, u32),
}

impl CompositionRequest {
    /// Frames keep the input order and are named `frame-01.png`, `frame-02.png`, ...
    pub fn new(images: Vec<Vec<u8>>, audio: Option<AudioTrack>, theme: VideoTheme) -> Result<Self> {
        if images.is_empty() {
            bail!("video composition needs at least one image");
        }
        let frames = images
            .into_iter()
            .enumerate()
            .map(|(i, data)| Frame {
                name: format!("frame-{:02}.png", i + 1),
                data,
            })
            .collect();
        Ok(Self {
            frames,
            audio,
            theme,
            fps: DEFAULT_FPS,
            resolution: DEFAULT_RESOLUTION,
        })
    }
}

/// Seam to the external composer. Returns the encoded video buffer.
#[async_trait]
pub trait VideoComposer: Send + Sync {
    async fn compose(&self, request: &CompositionRequest) -> Result<Vec<u8>>;
}

/// Download image URLs in order. The first failure aborts the whole batch.
pub async fn fetch_frames(client: &reqwest::Client, urls: &[String]) -> Result<Vec<Vec<u8>>> {
    let mut out = Vec::with_capacity(urls.len());
    for url in urls {
        let bytes = client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("fetching frame {url}"))?
            .bytes()
            .await
            .with_context(|| format!("reading frame {url}"))?;
        debug!(target: "generation", %url, size = bytes.len(), "frame fetched");
        out.push(bytes.to_vec());
    }
    Ok(out)
}
