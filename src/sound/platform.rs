//! Host audio through external player programs.
//!
//! Each platform maps to an ordered list of candidate programs; the first one
//! found on `PATH` is used. Player stdio is detached so nothing leaks into the
//! stdio MCP channel.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use super::{AudioBackend, PlaybackError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Other(&'static str),
}

impl Platform {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &'static str) -> Self {
        match os {
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            "windows" => Platform::Windows,
            other => Platform::Other(other),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::MacOs => f.write_str("macos"),
            Platform::Linux => f.write_str("linux"),
            Platform::Windows => f.write_str("windows"),
            Platform::Other(os) => f.write_str(os),
        }
    }
}

type FileArgs = fn(&Path) -> Vec<OsString>;
type ToneArgs = fn(u32, u64) -> Vec<OsString>;

/// One way of making a sound: a program name plus how to build its arguments.
struct Strategy<A> {
    program: &'static str,
    args: A,
}

const FREEDESKTOP_BELL: &str = "/usr/share/sounds/freedesktop/stereo/bell.oga";

static MACOS_FILE: [Strategy<FileArgs>; 1] = [Strategy { program: "afplay", args: path_only }];
static LINUX_FILE: [Strategy<FileArgs>; 4] = [
    Strategy { program: "paplay", args: path_only },
    Strategy { program: "aplay", args: path_only },
    Strategy { program: "mpg123", args: path_only },
    Strategy { program: "ffplay", args: ffplay_args },
];
static WINDOWS_FILE: [Strategy<FileArgs>; 1] = [Strategy { program: "powershell", args: powershell_play }];

static MACOS_TONE: [Strategy<ToneArgs>; 1] = [Strategy { program: "osascript", args: osascript_beep }];
static LINUX_TONE: [Strategy<ToneArgs>; 2] = [
    Strategy { program: "beep", args: beep_args },
    Strategy { program: "paplay", args: bell_clip },
];
static WINDOWS_TONE: [Strategy<ToneArgs>; 1] = [Strategy { program: "powershell", args: powershell_beep }];

fn file_table(platform: Platform) -> &'static [Strategy<FileArgs>] {
    match platform {
        Platform::MacOs => &MACOS_FILE,
        Platform::Linux => &LINUX_FILE,
        Platform::Windows => &WINDOWS_FILE,
        Platform::Other(_) => &[],
    }
}

fn tone_table(platform: Platform) -> &'static [Strategy<ToneArgs>] {
    match platform {
        Platform::MacOs => &MACOS_TONE,
        Platform::Linux => &LINUX_TONE,
        Platform::Windows => &WINDOWS_TONE,
        Platform::Other(_) => &[],
    }
}

fn path_only(path: &Path) -> Vec<OsString> {
    vec![path.as_os_str().to_owned()]
}

fn ffplay_args(path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-nodisp", "-autoexit", "-loglevel", "quiet"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(path.as_os_str().to_owned());
    args
}

fn powershell_play(path: &Path) -> Vec<OsString> {
    let quoted = path.display().to_string().replace('\'', "''");
    vec![
        "-NoProfile".into(),
        "-Command".into(),
        format!("(New-Object Media.SoundPlayer '{quoted}').PlaySync()").into(),
    ]
}

fn osascript_beep(_hz: u32, _ms: u64) -> Vec<OsString> {
    vec!["-e".into(), "beep".into()]
}

fn beep_args(hz: u32, ms: u64) -> Vec<OsString> {
    vec!["-f".into(), hz.to_string().into(), "-l".into(), ms.to_string().into()]
}

fn bell_clip(_hz: u32, _ms: u64) -> Vec<OsString> {
    vec![FREEDESKTOP_BELL.into()]
}

fn powershell_beep(hz: u32, ms: u64) -> Vec<OsString> {
    // Console beep accepts 37..=32767 Hz.
    let hz = hz.clamp(37, 32_767);
    vec![
        "-NoProfile".into(),
        "-Command".into(),
        format!("[console]::beep({hz},{ms})").into(),
    ]
}

/// Audio backend that shells out to the host's players.
#[derive(Debug, Clone)]
pub struct SystemAudio {
    platform: Platform,
    search_path: Option<OsString>,
}

impl SystemAudio {
    pub fn new(platform: Platform) -> Self {
        Self { platform, search_path: None }
    }

    pub fn detect() -> Self {
        Self::new(Platform::current())
    }

    /// Probe these directories instead of `PATH`.
    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Locate an executable named `program` on the search path.
    pub fn find_program(&self, program: &str) -> Option<PathBuf> {
        let paths = self.search_path.clone().or_else(|| std::env::var_os("PATH"))?;
        std::env::split_paths(&paths).find_map(|dir| {
            candidate_names(program)
                .into_iter()
                .map(|name| dir.join(name))
                .find(|p| is_executable(p))
        })
    }

    fn pick<'t, A>(&self, table: &'t [Strategy<A>]) -> Result<(&'t Strategy<A>, PathBuf), PlaybackError> {
        if table.is_empty() {
            return Err(PlaybackError::UnsupportedPlatform(self.platform));
        }
        table
            .iter()
            .find_map(|s| self.find_program(s.program).map(|exe| (s, exe)))
            .ok_or(PlaybackError::NoPlayerFound(self.platform))
    }
}

#[async_trait::async_trait]
impl AudioBackend for SystemAudio {
    async fn play_file(&self, path: &Path) -> Result<(), PlaybackError> {
        let (strategy, exe) = self.pick(file_table(self.platform))?;
        run(strategy.program, &exe, (strategy.args)(path)).await
    }

    async fn tone(&self, frequency_hz: f64, duration: Duration) -> Result<(), PlaybackError> {
        let (strategy, exe) = self.pick(tone_table(self.platform))?;
        let hz = frequency_hz.round() as u32;
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        run(strategy.program, &exe, (strategy.args)(hz, ms)).await
    }
}

async fn run(program: &str, exe: &Path, args: Vec<OsString>) -> Result<(), PlaybackError> {
    tracing::debug!(program, exe = %exe.display(), ?args, "spawning audio player");
    let status = tokio::process::Command::new(exe)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .status()
        .await
        .map_err(|source| PlaybackError::Spawn { program: program.to_owned(), source })?;
    if status.success() {
        Ok(())
    } else {
        Err(PlaybackError::PlayerFailed { program: program.to_owned(), status })
    }
}

fn candidate_names(program: &str) -> Vec<OsString> {
    if cfg!(windows) {
        vec![OsString::from(format!("{program}.exe")), OsString::from(program)]
    } else {
        vec![OsStr::new(program).to_owned()]
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn programs<A>(table: &[Strategy<A>]) -> Vec<&'static str> {
        table.iter().map(|s| s.program).collect()
    }

    #[test]
    fn maps_os_names() {
        assert_eq!(Platform::from_os("macos"), Platform::MacOs);
        assert_eq!(Platform::from_os("linux"), Platform::Linux);
        assert_eq!(Platform::from_os("windows"), Platform::Windows);
        assert_eq!(Platform::from_os("freebsd"), Platform::Other("freebsd"));
        assert_eq!(Platform::Other("freebsd").to_string(), "freebsd");
    }

    #[test]
    fn linux_players_are_tried_in_preference_order() {
        assert_eq!(programs(file_table(Platform::Linux)), ["paplay", "aplay", "mpg123", "ffplay"]);
        assert_eq!(programs(file_table(Platform::MacOs)), ["afplay"]);
        assert_eq!(programs(file_table(Platform::Windows)), ["powershell"]);
        assert!(file_table(Platform::Other("plan9")).is_empty());
    }

    #[test]
    fn powershell_command_plays_synchronously_and_escapes_quotes() {
        let args = powershell_play(Path::new(r"C:\Temp\it's.wav"));
        let cmd = args[2].to_string_lossy().into_owned();
        assert_eq!(cmd, r"(New-Object Media.SoundPlayer 'C:\Temp\it''s.wav').PlaySync()");
    }

    #[test]
    fn tone_arguments_carry_frequency_and_duration() {
        assert_eq!(beep_args(440, 500), ["-f", "440", "-l", "500"].map(OsString::from));
        let ps = powershell_beep(5, 300);
        assert_eq!(ps[2], OsString::from("[console]::beep(37,300)"));
    }

    #[tokio::test]
    async fn unsupported_platform_is_reported() {
        let audio = SystemAudio::new(Platform::Other("plan9"));
        let err = audio.play_file(Path::new("/tmp/x.wav")).await.unwrap_err();
        assert!(matches!(err, PlaybackError::UnsupportedPlatform(Platform::Other("plan9"))));
        let err = audio.tone(440.0, Duration::from_millis(500)).await.unwrap_err();
        assert!(err.to_string().contains("not supported on plan9"));
    }

    #[tokio::test]
    async fn missing_players_are_reported() {
        let empty = tempfile::tempdir().unwrap();
        let audio = SystemAudio::new(Platform::Linux).with_search_path(empty.path());
        let err = audio.play_file(Path::new("/tmp/x.wav")).await.unwrap_err();
        assert!(matches!(err, PlaybackError::NoPlayerFound(Platform::Linux)));
        assert_eq!(err.to_string(), "no audio player found on linux");
    }

    #[test]
    fn find_program_misses_unknown_names() {
        let empty = tempfile::tempdir().unwrap();
        let audio = SystemAudio::new(Platform::Linux).with_search_path(empty.path());
        assert!(audio.find_program("definitely-not-a-player").is_none());
    }

    #[cfg(unix)]
    mod with_fake_players {
        use super::*;
        use serial_test::serial;
        use std::os::unix::fs::PermissionsExt;

        fn install(dir: &Path, name: &str, body: &str) {
            let path = dir.join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        #[tokio::test]
        #[serial]
        async fn first_available_player_is_used() {
            let dir = tempfile::tempdir().unwrap();
            install(dir.path(), "aplay", r#"echo "aplay $1" > "$(dirname "$0")/invoked""#);
            install(dir.path(), "ffplay", r#"echo "ffplay" > "$(dirname "$0")/invoked""#);
            let audio = SystemAudio::new(Platform::Linux).with_search_path(dir.path());

            audio.play_file(Path::new("/tmp/ding.wav")).await.unwrap();

            let invoked = std::fs::read_to_string(dir.path().join("invoked")).unwrap();
            assert_eq!(invoked.trim(), "aplay /tmp/ding.wav");
        }

        #[tokio::test]
        #[serial]
        async fn non_zero_exit_is_a_playback_error() {
            let dir = tempfile::tempdir().unwrap();
            install(dir.path(), "paplay", "exit 3");
            let audio = SystemAudio::new(Platform::Linux).with_search_path(dir.path());

            let err = audio.play_file(Path::new("/tmp/ding.wav")).await.unwrap_err();
            assert!(matches!(err, PlaybackError::PlayerFailed { ref program, .. } if program == "paplay"));
        }

        #[tokio::test]
        #[serial]
        async fn tone_falls_back_to_bell_clip() {
            let dir = tempfile::tempdir().unwrap();
            install(dir.path(), "paplay", r#"echo "$1" > "$(dirname "$0")/invoked""#);
            let audio = SystemAudio::new(Platform::Linux).with_search_path(dir.path());

            audio.tone(800.0, Duration::from_millis(300)).await.unwrap();

            let invoked = std::fs::read_to_string(dir.path().join("invoked")).unwrap();
            assert_eq!(invoked.trim(), FREEDESKTOP_BELL);
        }

        #[tokio::test]
        #[serial]
        async fn tone_prefers_beep_program() {
            let dir = tempfile::tempdir().unwrap();
            install(dir.path(), "beep", r#"echo "$@" > "$(dirname "$0")/invoked""#);
            install(dir.path(), "paplay", "exit 1");
            let audio = SystemAudio::new(Platform::Linux).with_search_path(dir.path());

            audio.tone(440.4, Duration::from_millis(500)).await.unwrap();

            let invoked = std::fs::read_to_string(dir.path().join("invoked")).unwrap();
            assert_eq!(invoked.trim(), "-f 440 -l 500");
        }
    }
}
