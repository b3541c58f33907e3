use super::*;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(30, 1).unwrap(),
    }
}

#[test]
fn odd_sizes_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("/tmp/never-written.mp4"));
    let err = sink.begin(cfg(101, 100)).unwrap_err();
    assert!(err.to_string().contains("even"));
}

#[test]
fn pushing_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("/tmp/never-written.mp4"));
    let frame = FrameRGBA::transparent(2, 2);
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn command_line_carries_size_rate_and_crf() {
    let mut opts = FfmpegSinkOpts::new("out/intro.mp4");
    opts.crf = Some(18);
    let sink = FfmpegSink::new(opts);
    let cmd = sink.command(SinkConfig {
        width: 1280,
        height: 720,
        fps: Fps::new(30000, 1001).unwrap(),
    });
    let args: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert_eq!(args[0], "-y");
    assert!(args.windows(2).any(|w| w[0] == "-s" && w[1] == "1280x720"));
    assert!(args.windows(2).any(|w| w[0] == "-r" && w[1] == "30000/1001"));
    assert!(args.windows(2).any(|w| w[0] == "-crf" && w[1] == "18"));
    assert_eq!(args.last().map(String::as_str), Some("out/intro.mp4"));
}

#[test]
fn parent_dir_of_bare_file_name_is_fine() {
    ensure_parent_dir(Path::new("intro.mp4")).unwrap();
}
