//! Frame sinks: in-memory capture, PNG sequences and MP4 through the system `ffmpeg`.

/// `ffmpeg`-based MP4 sink.
pub mod ffmpeg;
/// PNG output: single frames and numbered sequences.
pub mod png;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;

pub use ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use png::{PngSequenceSink, write_png};
pub use sink::{FrameSink, InMemorySink, SinkConfig};
