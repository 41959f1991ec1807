//! Sound cues played alongside notifications.
//!
//! A sound specifier string is parsed once into a [`SoundSpec`] and then
//! dispatched to an [`AudioBackend`]. The system backend lives in
//! [`platform`]; the bundled clip in [`asset`].

pub mod asset;
pub mod platform;

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

pub use asset::{EMBEDDED_ALIAS, EMBEDDED_MARKER};
pub use platform::{Platform, SystemAudio};

/// Tone played for `beep:<hz>`.
pub const FREQUENCY_BEEP_DURATION: Duration = Duration::from_millis(500);
/// Tone played for the system beep aliases.
pub const SYSTEM_BEEP_HZ: f64 = 800.0;
pub const SYSTEM_BEEP_DURATION: Duration = Duration::from_millis(300);

const BEEP_PREFIX: &str = "beep:";
const SYSTEM_BEEP_ALIASES: [&str; 2] = ["beep", "system"];

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("invalid beep frequency: {0}")]
    InvalidFrequency(String),
    #[error("no audio player found on {0}")]
    NoPlayerFound(Platform),
    #[error("sound playback not supported on {0}")]
    UnsupportedPlatform(Platform),
    #[error("failed to write temp sound file: {0}")]
    TempFile(#[from] std::io::Error),
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    PlayerFailed { program: String, status: ExitStatus },
}

/// What a sound specifier asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum SoundSpec {
    Silent,
    Embedded,
    Tone { frequency_hz: f64, duration: Duration },
    SystemBeep,
    File(PathBuf),
}

impl FromStr for SoundSpec {
    type Err = PlaybackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(SoundSpec::Silent);
        }
        if s == EMBEDDED_MARKER || s == EMBEDDED_ALIAS {
            return Ok(SoundSpec::Embedded);
        }
        if let Some(raw) = s.strip_prefix(BEEP_PREFIX) {
            let frequency_hz = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|hz| hz.is_finite() && *hz > 0.0)
                .ok_or_else(|| PlaybackError::InvalidFrequency(raw.to_owned()))?;
            return Ok(SoundSpec::Tone { frequency_hz, duration: FREQUENCY_BEEP_DURATION });
        }
        if SYSTEM_BEEP_ALIASES.contains(&s) {
            return Ok(SoundSpec::SystemBeep);
        }
        Ok(SoundSpec::File(PathBuf::from(s)))
    }
}

/// Something that can make noise: play an audio file or emit a tone.
#[async_trait::async_trait]
pub trait AudioBackend: Send + Sync + 'static {
    async fn play_file(&self, path: &Path) -> Result<(), PlaybackError>;
    async fn tone(&self, frequency_hz: f64, duration: Duration) -> Result<(), PlaybackError>;
}

#[derive(Clone)]
pub struct SoundPlayer {
    backend: Arc<dyn AudioBackend>,
}

impl SoundPlayer {
    pub fn new(backend: Arc<dyn AudioBackend>) -> Self {
        Self { backend }
    }

    /// Player backed by the host's audio tools.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemAudio::detect()))
    }

    pub async fn play(&self, specifier: &str) -> Result<(), PlaybackError> {
        let spec: SoundSpec = specifier.parse()?;
        self.play_spec(&spec).await
    }

    pub async fn play_spec(&self, spec: &SoundSpec) -> Result<(), PlaybackError> {
        tracing::debug!(?spec, "playing sound");
        match spec {
            SoundSpec::Silent => Ok(()),
            SoundSpec::Embedded => {
                let clip = asset::materialize()?;
                let played = self.backend.play_file(&clip).await;
                let path = clip.to_path_buf();
                if let Err(e) = clip.close() {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove temp sound file");
                }
                played
            }
            SoundSpec::Tone { frequency_hz, duration } => self.backend.tone(*frequency_hz, *duration).await,
            SoundSpec::SystemBeep => self.backend.tone(SYSTEM_BEEP_HZ, SYSTEM_BEEP_DURATION).await,
            SoundSpec::File(path) => self.backend.play_file(path).await,
        }
    }
}
