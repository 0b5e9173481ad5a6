use pixel_quant::{parse_palette, suggest_colors, Raster, Rgb};
use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::WorkerError;
use crate::models::{ProcessSettings, Request, Response, WorkerConfig};

type Job = (Request, oneshot::Sender<Response>);

/// Answer one request. Failures become an error response, never a panic.
pub fn handle_request<R: Rng + ?Sized>(
    request: Request,
    config: &WorkerConfig,
    rng: &mut R,
) -> Response {
    let kind = request.kind();
    let result = match request {
        Request::Process { raster, settings } => {
            check_size(raster.pixel_count(), config)
                .and_then(|_| Ok(Raster::try_from(raster)?))
                .and_then(|src| run_process(&src, &settings, config, rng))
                .map(|out| Response::Success { raster: out.into() })
        }
        Request::Suggest {
            raster,
            palette,
            num_suggestions,
        } => check_size(raster.pixel_count(), config)
            .and_then(|_| Ok(Raster::try_from(raster)?))
            .and_then(|src| run_suggest(&src, &palette, num_suggestions, config, rng))
            .map(|colors| Response::suggestions(&colors)),
    };

    match result {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(kind, error = %e, "Request failed");
            Response::error(e.to_string())
        }
    }
}

/// Run the pipeline over `src` with wire-level settings.
///
/// Both the source and the target size are checked against
/// `config.max_pixels` before any work is done.
pub fn run_process<R: Rng + ?Sized>(
    src: &Raster,
    settings: &ProcessSettings,
    config: &WorkerConfig,
    rng: &mut R,
) -> Result<Raster, WorkerError> {
    let (src_w, src_h) = (src.width() as u32, src.height() as u32);
    check_size(src_w as u64 * src_h as u64, config)?;
    let (width, height) = settings.target_size(src_w, src_h);
    check_size(width as u64 * height as u64, config)?;

    let pipeline = settings.to_pipeline(src_w, src_h)?;
    tracing::debug!(
        src_w,
        src_h,
        width,
        height,
        resample = %pipeline.resample,
        dither = %pipeline.dither,
        "Processing raster"
    );
    Ok(pixel_quant::process(src, &pipeline, rng)?)
}

/// Suggest up to `count` colors missing from `palette`.
pub fn run_suggest<R: Rng + ?Sized>(
    src: &Raster,
    palette: &[String],
    count: usize,
    config: &WorkerConfig,
    rng: &mut R,
) -> Result<Vec<Rgb>, WorkerError> {
    check_size(src.pixel_count() as u64, config)?;
    let palette = parse_palette(palette)?;
    Ok(suggest_colors(src, &palette, count, rng))
}

fn check_size(pixels: u64, config: &WorkerConfig) -> Result<(), WorkerError> {
    if pixels > config.max_pixels {
        return Err(WorkerError::TooLarge {
            pixels,
            max: config.max_pixels,
        });
    }
    Ok(())
}

/// Handle to the background worker.
///
/// Jobs are queued on a bounded channel and run one at a time on the
/// blocking pool. The worker exits once every handle is dropped and the
/// queue has drained.
#[derive(Clone)]
pub struct WorkerHandle {
    tx: mpsc::Sender<Job>,
}

impl WorkerHandle {
    /// Start the worker task. Must be called inside a tokio runtime.
    pub fn spawn(config: WorkerConfig) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(config.queue_depth.max(1));
        let task = tokio::spawn(run_worker(rx, config));
        (Self { tx }, task)
    }

    /// Queue a request and wait for its response.
    pub async fn submit(&self, request: Request) -> Result<Response, WorkerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send((request, reply_tx))
            .await
            .map_err(|_| WorkerError::WorkerStopped)?;
        reply_rx.await.map_err(|_| WorkerError::WorkerStopped)
    }
}

async fn run_worker(mut rx: mpsc::Receiver<Job>, config: WorkerConfig) {
    tracing::info!(
        queue_depth = config.queue_depth,
        max_pixels = config.max_pixels,
        seeded = config.seed.is_some(),
        "Worker started"
    );

    let mut rng = config.rng();
    let mut jobs = 0u64;

    while let Some((request, reply)) = rx.recv().await {
        let kind = request.kind();
        let job_config = config.clone();

        // The RNG moves into the blocking job and comes back with the result
        let outcome = tokio::task::spawn_blocking(move || {
            let response = handle_request(request, &job_config, &mut rng);
            (response, rng)
        })
        .await;

        let response = match outcome {
            Ok((response, returned)) => {
                rng = returned;
                response
            }
            Err(e) => {
                tracing::warn!(kind, error = %e, "Job aborted");
                rng = config.rng();
                Response::error(format!("Processing failed: {e}"))
            }
        };

        jobs += 1;
        if reply.send(response).is_err() {
            tracing::debug!(kind, "Requester left before the reply");
        }
    }

    tracing::info!(jobs, "Worker stopped");
}

/// Serve newline-delimited JSON requests from `reader`, writing one
/// response line per request to `writer`.
///
/// Blank lines are skipped. Malformed lines get an error response and do
/// not stop the loop. Returns the number of responses written.
pub async fn serve_lines<R, W>(
    handle: &WorkerHandle,
    reader: R,
    mut writer: W,
) -> Result<u64, WorkerError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut served = 0u64;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handle.submit(request).await?,
            Err(e) => {
                let e = WorkerError::from(e);
                tracing::warn!(error = %e, "Rejected request line");
                Response::error(e.to_string())
            }
        };

        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
        served += 1;
    }

    Ok(served)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RasterPayload;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn payload(width: u32, height: u32, rgba: [u8; 4]) -> RasterPayload {
        Raster::filled(width as usize, height as usize, rgba).into()
    }

    #[test]
    fn test_source_size_is_checked_first() {
        let config = WorkerConfig {
            max_pixels: 10,
            ..Default::default()
        };
        let request = Request::Process {
            raster: payload(4, 4, [0, 0, 0, 255]),
            settings: ProcessSettings::default(),
        };
        let response = handle_request(request, &config, &mut StdRng::seed_from_u64(1));
        assert_eq!(
            response,
            Response::error("Image too large: 16 pixels (max 10)")
        );
    }

    #[test]
    fn test_target_size_is_checked() {
        let config = WorkerConfig {
            max_pixels: 100,
            ..Default::default()
        };
        let settings = ProcessSettings {
            target_width: Some(20),
            target_height: Some(20),
            ..Default::default()
        };
        let src = Raster::filled(2, 2, [0, 0, 0, 255]);
        let result = run_process(&src, &settings, &config, &mut StdRng::seed_from_u64(1));
        assert!(matches!(
            result,
            Err(WorkerError::TooLarge { pixels: 400, max: 100 })
        ));
    }

    #[test]
    fn test_suggest_rejects_bad_hex() {
        let src = Raster::filled(2, 2, [10, 200, 10, 255]);
        let result = run_suggest(
            &src,
            &["#12345".to_string()],
            3,
            &WorkerConfig::default(),
            &mut StdRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(WorkerError::Palette(_))));
    }
}
