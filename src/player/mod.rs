//! Audio backend seam
//!
//! The controller only needs four things from a backend: load a URI, start
//! output, stop output, and report the playback position. Load completion is
//! asynchronous and comes back as a [`PlayerEvent`](crate::app::events::PlayerEvent)
//! tagged with the generation passed to `load`.

pub mod mpv;

use std::fmt;
use std::future::Future;

/// Identity of one track selection. Strictly increasing per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub trait AudioBackend {
    /// Start loading `uri` without playing it. Events for this load must
    /// carry `generation`.
    fn load(&self, generation: Generation, uri: &str) -> impl Future<Output = anyhow::Result<()>>;

    fn play(&self) -> impl Future<Output = anyhow::Result<()>>;

    fn stop(&self) -> impl Future<Output = anyhow::Result<()>>;

    fn set_volume(&self, volume_0_100: u8) -> impl Future<Output = anyhow::Result<()>>;

    /// Current position in seconds.
    fn position(&self) -> f64;
}

/// A missing backend (mpv failed to start) fails every load.
impl<B: AudioBackend> AudioBackend for Option<B> {
    async fn load(&self, generation: Generation, uri: &str) -> anyhow::Result<()> {
        match self {
            Some(b) => b.load(generation, uri).await,
            None => anyhow::bail!("audio backend unavailable"),
        }
    }

    async fn play(&self) -> anyhow::Result<()> {
        match self {
            Some(b) => b.play().await,
            None => Ok(()),
        }
    }

    async fn stop(&self) -> anyhow::Result<()> {
        match self {
            Some(b) => b.stop().await,
            None => Ok(()),
        }
    }

    async fn set_volume(&self, volume_0_100: u8) -> anyhow::Result<()> {
        match self {
            Some(b) => b.set_volume(volume_0_100).await,
            None => Ok(()),
        }
    }

    fn position(&self) -> f64 {
        self.as_ref().map_or(0.0, |b| b.position())
    }
}
