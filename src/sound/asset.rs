//! The bundled notification clip.

use std::io::Write;

use tempfile::TempPath;

/// Specifier that selects the bundled clip.
pub const EMBEDDED_MARKER: &str = "@sound.wav";
/// Bare-file-name alias for [`EMBEDDED_MARKER`].
pub const EMBEDDED_ALIAS: &str = "sound.wav";

pub static EMBEDDED_SOUND: &[u8] = include_bytes!("../../assets/notification.wav");

/// Write the clip to a uniquely named temp file. The file is removed when
/// the returned path is dropped or closed.
pub fn materialize() -> std::io::Result<TempPath> {
    let mut file = tempfile::Builder::new()
        .prefix("desktop-alert-")
        .suffix(".wav")
        .tempfile()?;
    file.write_all(EMBEDDED_SOUND)?;
    file.flush()?;
    Ok(file.into_temp_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_clip_is_a_wav() {
        assert_eq!(&EMBEDDED_SOUND[..4], b"RIFF");
        assert_eq!(&EMBEDDED_SOUND[8..12], b"WAVE");
    }

    #[test]
    fn materialized_clip_matches_and_cleans_up() {
        let clip = materialize().unwrap();
        let path = clip.to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), EMBEDDED_SOUND);
        assert!(path.extension().is_some_and(|e| e == "wav"));
        drop(clip);
        assert!(!path.exists());
    }
}
