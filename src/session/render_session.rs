use std::collections::HashMap;
use std::sync::{Arc, mpsc};

use rayon::prelude::*;

use crate::compile::compiler::compile_frame;
use crate::compile::fingerprint::{FrameFingerprint, fingerprint_tree};
use crate::compile::render_tree::RenderTree;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::taffy_bridge::compute_layout;
use crate::layout::text::TextShaper;
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::cpu::CpuBackend;
use crate::scene::composition::Composition;
use crate::style::node::Node;

const MAX_REORDER_BUFFER_BYTES: u64 = 128 * 1024 * 1024;

/// Options controlling `RenderSession` range rendering behavior.
#[derive(Clone, Debug)]
pub struct RenderSessionOpts {
    /// Enable frame-level parallelism (rayon), using a dedicated thread pool.
    pub parallel: bool,
    /// Chunk size used by the render->encode streaming pipeline.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Skip rasterizing frames whose display list matches an earlier frame in the same chunk.
    pub static_frame_elision: bool,
    /// Bounded channel capacity between render workers and the encoder thread.
    pub channel_capacity: usize,
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: false,
            channel_capacity: 4,
        }
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    /// Total frames in the requested range.
    pub frames_total: u64,
    /// Frames actually rasterized (may be < total when static-frame elision is enabled).
    pub frames_rendered: u64,
    /// Frames elided due to static-frame elision.
    pub frames_elided: u64,
}

/// Everything computed for one frame before rasterization, for inspection.
#[derive(Clone, Debug, serde::Serialize)]
pub struct FrameSnapshot {
    /// Composition name.
    pub composition: String,
    /// Frame index.
    pub frame: FrameIndex,
    /// Declarative node tree produced by the scenes.
    pub tree: Node,
    /// Compiled display list.
    pub render: RenderTree,
}

/// Per-thread evaluation state: a text shaper with its measure cache and a raster backend.
struct Worker {
    shaper: TextShaper,
    backend: CpuBackend,
}

impl Worker {
    fn new(comp: &Composition) -> ReelResult<Self> {
        Ok(Self {
            shaper: TextShaper::new(comp.assets().font())?,
            backend: CpuBackend::new(),
        })
    }

    fn compile(&mut self, comp: &Composition, frame: u64) -> ReelResult<(Node, RenderTree)> {
        let root = comp.evaluate(FrameIndex(frame))?;
        let layout = compute_layout(&root, comp.canvas(), comp.assets(), &mut self.shaper)?;
        let tree = compile_frame(&root, &layout, comp.canvas(), comp.assets())?;
        Ok((root, tree))
    }

    fn render(&mut self, comp: &Composition, frame: u64) -> ReelResult<FrameRGBA> {
        let (_, tree) = self.compile(comp, frame)?;
        self.backend.render_tree(&tree, comp.assets())
    }
}

/// Renders single frames and frame ranges of one [`Composition`].
pub struct RenderSession {
    comp: Composition,
    opts: RenderSessionOpts,
    worker: Worker,
}

impl std::fmt::Debug for RenderSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSession")
            .field("composition", &self.comp.name())
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

impl RenderSession {
    /// Construct a session. Warns once when no font is available.
    pub fn new(comp: Composition, opts: RenderSessionOpts) -> ReelResult<Self> {
        comp.validate()?;
        if comp.assets().font().is_none() {
            tracing::warn!(
                comp = comp.name(),
                "no font loaded; text is laid out by estimate and not drawn"
            );
        }
        let worker = Worker::new(&comp)?;
        Ok(Self { comp, opts, worker })
    }

    /// The composition being rendered.
    pub fn composition(&self) -> &Composition {
        &self.comp
    }

    /// Evaluate, lay out and compile `frame` without rasterizing it.
    pub fn evaluate(&mut self, frame: FrameIndex) -> ReelResult<FrameSnapshot> {
        let (tree, render) = self.worker.compile(&self.comp, frame.0)?;
        Ok(FrameSnapshot {
            composition: self.comp.name().to_owned(),
            frame,
            tree,
            render,
        })
    }

    /// Render a single frame.
    #[tracing::instrument(skip(self), fields(comp = self.comp.name()))]
    pub fn render_frame(&mut self, frame: FrameIndex) -> ReelResult<FrameRGBA> {
        if frame.0 >= self.comp.duration_frames() {
            return Err(ReelError::validation(
                "render_frame frame must be within composition duration",
            ));
        }
        self.worker.render(&self.comp, frame.0)
    }

    /// Render a frame range and stream frames into a sink.
    ///
    /// The sink receives frames in strictly increasing frame index order. When `parallel` is
    /// enabled, out-of-order worker completion is reordered at the sink boundary (bounded channel
    /// backpressure).
    #[tracing::instrument(skip(self, sink), fields(comp = self.comp.name()))]
    pub fn render_range(
        &mut self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
    ) -> ReelResult<RenderStats> {
        if range.is_empty() {
            return Err(ReelError::validation("render_range range must be non-empty"));
        }
        if range.end.0 > self.comp.duration_frames() {
            return Err(ReelError::validation(
                "render_range range must be within composition duration",
            ));
        }

        let canvas = self.comp.canvas();
        let cfg = SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.comp.fps(),
        };

        let cap = self.opts.channel_capacity.max(1);
        let bytes_per_frame = u64::from(cfg.width)
            .saturating_mul(u64::from(cfg.height))
            .saturating_mul(4)
            .max(1);
        let max_chunk_by_mem = (MAX_REORDER_BUFFER_BYTES / bytes_per_frame).max(1);
        let chunk_size = normalized_chunk_size(self.opts.chunk_size)
            .min(max_chunk_by_mem)
            .min(range.len_frames());

        let pool = if self.opts.parallel {
            Some(build_thread_pool(self.opts.threads)?)
        } else {
            None
        };
        let started = std::time::Instant::now();

        let stats = std::thread::scope(|scope| -> ReelResult<RenderStats> {
            let (tx, rx) = mpsc::sync_channel::<FrameMsg>(cap);
            let range_start = range.start.0;
            let range_end = range.end.0;
            let sink_ref: &mut dyn FrameSink = sink;

            let enc = scope.spawn(move || -> Result<(), EncoderExit> {
                sink_ref.begin(cfg).map_err(EncoderExit::Sink)?;
                let mut next = range_start;
                let mut pending = HashMap::<u64, Arc<FrameRGBA>>::new();
                while next < range_end {
                    if let Some(frame) = pending.remove(&next) {
                        sink_ref
                            .push_frame(FrameIndex(next), &frame)
                            .map_err(EncoderExit::Sink)?;
                        next += 1;
                        continue;
                    }
                    let msg = rx.recv().map_err(|_| EncoderExit::Disconnected)?;
                    pending.insert(msg.idx.0, msg.frame);
                }
                sink_ref.end().map_err(EncoderExit::Sink)
            });

            let comp = &self.comp;
            let mut stats = RenderStats::default();
            let produce_res = (|| -> ReelResult<()> {
                let mut chunk_start = range_start;
                while chunk_start < range_end {
                    let chunk_end = (chunk_start + chunk_size).min(range_end);
                    let chunk_stats = match pool.as_ref() {
                        Some(pool) if self.opts.static_frame_elision => {
                            render_chunk_parallel_elided(comp, pool, chunk_start, chunk_end, &tx)?
                        }
                        Some(pool) => render_chunk_parallel(comp, pool, chunk_start, chunk_end, &tx)?,
                        None => render_chunk_sequential(
                            comp,
                            &mut self.worker,
                            self.opts.static_frame_elision,
                            chunk_start,
                            chunk_end,
                            &tx,
                        )?,
                    };
                    tracing::debug!(
                        chunk_start,
                        chunk_end,
                        rendered = chunk_stats.frames_rendered,
                        elided = chunk_stats.frames_elided,
                        "chunk done"
                    );
                    stats.frames_total += chunk_stats.frames_total;
                    stats.frames_rendered += chunk_stats.frames_rendered;
                    stats.frames_elided += chunk_stats.frames_elided;
                    chunk_start = chunk_end;
                }
                Ok(())
            })();

            drop(tx);
            let enc_res = enc
                .join()
                .map_err(|_| ReelError::evaluation("encoder thread panicked"))?;
            // Whichever side failed first hung up on the other; report that side's error.
            match (produce_res, enc_res) {
                (_, Err(EncoderExit::Sink(e))) | (Err(e), _) => Err(e),
                (Ok(()), Err(EncoderExit::Disconnected)) => Err(ReelError::evaluation(
                    "encoder channel disconnected unexpectedly",
                )),
                (Ok(()), Ok(())) => Ok(stats),
            }
        })?;

        tracing::info!(
            frames = stats.frames_total,
            rendered = stats.frames_rendered,
            elided = stats.frames_elided,
            secs = started.elapsed().as_secs_f64(),
            "range rendered"
        );
        Ok(stats)
    }
}

/// Why the encoder thread stopped early.
#[derive(Debug)]
enum EncoderExit {
    /// The sink rejected a call.
    Sink(ReelError),
    /// The producer hung up before delivering the whole range.
    Disconnected,
}

#[derive(Debug)]
struct FrameMsg {
    idx: FrameIndex,
    frame: Arc<FrameRGBA>,
}

fn send(tx: &mpsc::SyncSender<FrameMsg>, f: u64, frame: Arc<FrameRGBA>) -> ReelResult<()> {
    tx.send(FrameMsg {
        idx: FrameIndex(f),
        frame,
    })
    .map_err(|_| ReelError::evaluation("encoder thread is not accepting frames"))
}

fn render_chunk_sequential(
    comp: &Composition,
    worker: &mut Worker,
    elide: bool,
    start: u64,
    end: u64,
    tx: &mpsc::SyncSender<FrameMsg>,
) -> ReelResult<RenderStats> {
    let mut stats = RenderStats {
        frames_total: end - start,
        ..RenderStats::default()
    };
    let mut cache = HashMap::<FrameFingerprint, Arc<FrameRGBA>>::new();
    for f in start..end {
        let (_, tree) = worker.compile(comp, f)?;
        let fp = elide.then(|| fingerprint_tree(&tree));
        if let Some(frame) = fp.as_ref().and_then(|fp| cache.get(fp)) {
            stats.frames_elided += 1;
            send(tx, f, frame.clone())?;
            continue;
        }
        let frame = Arc::new(worker.backend.render_tree(&tree, comp.assets())?);
        stats.frames_rendered += 1;
        if let Some(fp) = fp {
            cache.insert(fp, frame.clone());
        }
        send(tx, f, frame)?;
    }
    Ok(stats)
}

fn render_chunk_parallel(
    comp: &Composition,
    pool: &rayon::ThreadPool,
    start: u64,
    end: u64,
    tx: &mpsc::SyncSender<FrameMsg>,
) -> ReelResult<RenderStats> {
    let tx = tx.clone();
    pool.install(|| {
        (start..end).into_par_iter().try_for_each_init(
            || Worker::new(comp),
            move |w, f| -> ReelResult<()> {
                let w = w.as_mut().map_err(|e| ReelError::evaluation(e.to_string()))?;
                let frame = w.render(comp, f)?;
                send(&tx, f, Arc::new(frame))
            },
        )
    })?;
    Ok(RenderStats {
        frames_total: end - start,
        frames_rendered: end - start,
        frames_elided: 0,
    })
}

fn render_chunk_parallel_elided(
    comp: &Composition,
    pool: &rayon::ThreadPool,
    start: u64,
    end: u64,
    tx: &mpsc::SyncSender<FrameMsg>,
) -> ReelResult<RenderStats> {
    // Compile every frame, then rasterize only the distinct display lists.
    let trees = pool.install(|| {
        (start..end)
            .into_par_iter()
            .map_init(
                || Worker::new(comp),
                |w, f| -> ReelResult<RenderTree> {
                    let w = w.as_mut().map_err(|e| ReelError::evaluation(e.to_string()))?;
                    Ok(w.compile(comp, f)?.1)
                },
            )
            .collect::<ReelResult<Vec<_>>>()
    })?;

    let mut uniq = Vec::<usize>::new();
    let mut map = Vec::<usize>::with_capacity(trees.len());
    let mut seen = HashMap::<FrameFingerprint, usize>::new();
    for (i, tree) in trees.iter().enumerate() {
        let u = *seen.entry(fingerprint_tree(tree)).or_insert_with(|| {
            uniq.push(i);
            uniq.len() - 1
        });
        map.push(u);
    }

    let rendered = pool.install(|| {
        uniq.par_iter()
            .map_init(CpuBackend::new, |backend, &i| {
                backend.render_tree(&trees[i], comp.assets()).map(Arc::new)
            })
            .collect::<ReelResult<Vec<_>>>()
    })?;

    for (f, &u) in (start..end).zip(&map) {
        send(tx, f, rendered[u].clone())?;
    }
    let total = end - start;
    let rendered_count = rendered.len() as u64;
    Ok(RenderStats {
        frames_total: total,
        frames_rendered: rendered_count,
        frames_elided: total.saturating_sub(rendered_count),
    })
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(ReelError::validation(
            "render_range 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
