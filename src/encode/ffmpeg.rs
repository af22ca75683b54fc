use std::ffi::OsString;
use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig, check_order};
use crate::foundation::core::{FrameIndex, Rgba8Premul};
use crate::foundation::error::{BannerError, BannerResult};
use crate::foundation::math::flatten_premul_over_bg;
use crate::render::backend::FrameRGBA;

/// `ffmpeg` with the banner and all logging below errors silenced.
pub(crate) fn ffmpeg_command() -> Command {
    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-hide_banner", "-loglevel", "error"]);
    cmd
}

/// Trimmed stderr text of a failed `ffmpeg` run.
pub(crate) fn stderr_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_owned()
}

/// Arguments that turn raw RGBA on stdin (plus the mixed soundtrack) into an H.264 MP4 at `out`.
pub(crate) fn encode_args(cfg: &SinkConfig, out: &Path, overwrite: bool) -> Vec<OsString> {
    let mut args = Vec::new();
    push(&mut args, &[if overwrite { "-y" } else { "-n" }]);
    push(
        &mut args,
        &[
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &format!("{}/{}", cfg.fps.num, cfg.fps.den),
            "-i",
            "pipe:0",
        ],
    );
    match &cfg.audio {
        Some(audio) => {
            push(
                &mut args,
                &[
                    "-f",
                    "f32le",
                    "-ar",
                    &audio.sample_rate.to_string(),
                    "-ac",
                    &audio.channels.to_string(),
                    "-i",
                ],
            );
            args.push(audio.path.clone().into_os_string());
            push(&mut args, &["-c:a", "aac", "-shortest"]);
        }
        None => push(&mut args, &["-an"]),
    }
    push(
        &mut args,
        &["-c:v", "libx264", "-pix_fmt", "yuv420p", "-movflags", "+faststart"],
    );
    args.push(out.as_os_str().to_owned());
    args
}

fn push(args: &mut Vec<OsString>, parts: &[&str]) {
    args.extend(parts.iter().map(|s| OsString::from(*s)));
}

/// A running `ffmpeg` fed over stdin, with stderr collected on a side thread.
#[derive(Debug)]
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<Vec<u8>>,
}

impl Encoder {
    fn spawn(args: Vec<OsString>) -> BannerResult<Self> {
        let mut child = ffmpeg_command()
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BannerError::encode(format!("failed to spawn ffmpeg: {e}")))?;

        let (Some(stdin), Some(mut err)) = (child.stdin.take(), child.stderr.take()) else {
            let _ = child.kill();
            return Err(BannerError::encode("ffmpeg pipes unavailable"));
        };
        let stderr = std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = err.read_to_end(&mut buf);
            buf
        });
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn finish(self) -> BannerResult<()> {
        let Self {
            mut child,
            stdin,
            stderr,
        } = self;
        drop(stdin);
        let status = child
            .wait()
            .map_err(|e| BannerError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        let stderr = stderr.join().unwrap_or_default();
        if !status.success() {
            return Err(BannerError::encode(format!(
                "ffmpeg exited with {status}: {}",
                stderr_text(&stderr)
            )));
        }
        Ok(())
    }
}

/// MP4 sink: streams each frame, flattened onto the banner's white clear colour, into `ffmpeg`.
///
/// When the session hands over a soundtrack it is the single stereo `f32le` mix of the intro
/// cue and the looped music, muxed as AAC and cut to the video length.
#[derive(Debug)]
pub struct FfmpegSink {
    out_path: PathBuf,
    overwrite: bool,
    encoder: Option<Encoder>,
    size: (u32, u32),
    scratch: Vec<u8>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Sink writing to `out_path`, replacing any existing file.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            encoder: None,
            size: (0, 0),
            scratch: Vec::new(),
            last_idx: None,
        }
    }

    /// Whether an existing output file is replaced; when `false` ffmpeg refuses to write.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Output path.
    pub fn out_path(&self) -> &Path {
        &self.out_path
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> BannerResult<()> {
        // yuv420p subsamples chroma 2x2.
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(BannerError::validation(format!(
                "mp4 output needs an even canvas, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        ensure_parent_dir(&self.out_path)?;

        let encoder = Encoder::spawn(encode_args(&cfg, &self.out_path, self.overwrite))?;
        tracing::debug!(
            out = %self.out_path.display(),
            audio = cfg.audio.is_some(),
            "ffmpeg started"
        );
        self.size = (cfg.width, cfg.height);
        self.scratch = vec![0; cfg.width as usize * cfg.height as usize * 4];
        self.encoder = Some(encoder);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BannerResult<()> {
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(BannerError::encode("ffmpeg sink not started"));
        };
        check_order(&mut self.last_idx, idx)?;
        if (frame.width, frame.height) != self.size {
            return Err(BannerError::validation(format!(
                "frame is {}x{}, sink expects {}x{}",
                frame.width, frame.height, self.size.0, self.size.1
            )));
        }

        flatten_premul_over_bg(&mut self.scratch, &frame.data, Rgba8Premul::WHITE.to_array())?;
        encoder
            .stdin
            .write_all(&self.scratch)
            .map_err(|e| BannerError::encode(format!("failed to write frame to ffmpeg: {e}")))
    }

    fn end(&mut self) -> BannerResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| BannerError::encode("ffmpeg sink not started"))?;
        encoder.finish()?;
        tracing::info!(out = %self.out_path.display(), "mp4 written");
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> BannerResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    ffmpeg_command()
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
