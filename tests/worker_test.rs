//! Async worker tests: queueing, NDJSON serving and shutdown.

mod common;

use std::time::Duration;

use common::fixtures::{self, palettes};
use pixelsmith::error::WorkerError;
use pixelsmith::models::{ProcessSettings, Response, WorkerConfig};
use pixelsmith::rendering::{decode_png, encode_png};
use pixelsmith::services::{run_process, serve_lines, WorkerHandle};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_submit_returns_response() {
    let (handle, _task) = WorkerHandle::spawn(fixtures::seeded_config());

    let settings = ProcessSettings {
        target_width: Some(3),
        target_height: Some(3),
        dither_method: "sierra-lite".to_string(),
        palette: palettes::black_white(),
        ..Default::default()
    };
    let response = handle
        .submit(fixtures::process_request(fixtures::gradient(6, 6), settings))
        .await
        .unwrap();

    let out = common::assert_success(response);
    common::assert_size(&out, 3, 3);
    common::assert_palette_only(&out, &[[0, 0, 0], [255, 255, 255]]);
}

#[tokio::test]
async fn test_concurrent_submits_all_answered() {
    let (handle, _task) = WorkerHandle::spawn(fixtures::seeded_config());

    let mut pending = Vec::new();
    for i in 0..8u8 {
        let handle = handle.clone();
        pending.push(tokio::spawn(async move {
            let raster = pixel_quant::Raster::filled(4, 4, [i * 30, 0, 0, 255]);
            handle
                .submit(fixtures::process_request(raster, ProcessSettings::default()))
                .await
        }));
    }

    for (i, job) in pending.into_iter().enumerate() {
        let out = common::assert_success(job.await.unwrap().unwrap());
        assert_eq!(out.pixel(0, 0), [i as u8 * 30, 0, 0, 255]);
    }
}

#[tokio::test]
async fn test_same_seed_same_output() {
    let settings = ProcessSettings {
        dither_method: "floyd-steinberg".to_string(),
        use_kmeans: true,
        kmeans_colors: 3,
        ..Default::default()
    };

    let mut responses = Vec::new();
    for _ in 0..2 {
        let (handle, _task) = WorkerHandle::spawn(fixtures::seeded_config());
        responses.push(
            handle
                .submit(fixtures::process_request(
                    fixtures::gradient(16, 4),
                    settings.clone(),
                ))
                .await
                .unwrap(),
        );
    }

    assert_eq!(responses[0], responses[1]);
}

#[tokio::test]
async fn test_serve_lines() {
    let (handle, _task) = WorkerHandle::spawn(fixtures::seeded_config());

    let mut input = fixtures::request_line(&fixtures::process_request(
        fixtures::gradient(2, 2),
        ProcessSettings::default(),
    ));
    input.push_str("\n   \n");
    input.push_str("{\"kind\": \"process\", \"raster\": 12}\n");
    input.push_str(&fixtures::request_line(&fixtures::suggest_request(
        pixel_quant::Raster::transparent(2, 2),
        palettes::black_white(),
        3,
    )));

    let mut output = Vec::new();
    let served = serve_lines(&handle, input.as_bytes(), &mut output)
        .await
        .unwrap();
    assert_eq!(served, 3);

    let text = String::from_utf8(output).unwrap();
    let responses: Vec<Response> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 3);

    let out = common::assert_success(responses[0].clone());
    common::assert_size(&out, 2, 2);
    common::assert_error_contains(&responses[1], "Malformed message");
    assert_eq!(
        responses[2],
        Response::Suggestions { colors: Vec::new() }
    );
}

#[tokio::test]
async fn test_worker_exits_when_handles_drop() {
    let (handle, task) = WorkerHandle::spawn(fixtures::seeded_config());
    let extra = handle.clone();
    drop(handle);
    drop(extra);

    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("worker should stop once all handles are gone")
        .unwrap();
}

#[tokio::test]
async fn test_submit_after_stop_fails() {
    let (handle, task) = WorkerHandle::spawn(fixtures::seeded_config());
    task.abort();
    let _ = task.await;

    let result = handle
        .submit(fixtures::process_request(
            fixtures::gradient(2, 2),
            ProcessSettings::default(),
        ))
        .await;
    assert!(matches!(result, Err(WorkerError::WorkerStopped)));
}

#[test]
fn test_png_harness_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");

    std::fs::write(&input, encode_png(&fixtures::gradient(12, 4)).unwrap()).unwrap();

    let config = fixtures::seeded_config();
    let src = decode_png(&std::fs::read(&input).unwrap(), config.max_pixels).unwrap();
    common::assert_size(&src, 12, 4);

    let settings = ProcessSettings {
        target_width: Some(6),
        resampling_method: "lanczos".to_string(),
        dither_method: "grid".to_string(),
        dither_strength: 60.0,
        palette: vec!["#000".to_string(), "#888".to_string(), "#fff".to_string()],
        ..Default::default()
    };
    let out = run_process(&src, &settings, &config, &mut config.rng()).unwrap();
    std::fs::write(&output, encode_png(&out).unwrap()).unwrap();

    let reread = decode_png(&std::fs::read(&output).unwrap(), config.max_pixels).unwrap();
    assert_eq!(reread, out);
    common::assert_size(&reread, 6, 4);
    common::assert_palette_only(&reread, &[[0, 0, 0], [0x88, 0x88, 0x88], [255, 255, 255]]);
}

#[test]
fn test_png_harness_rejects_oversized_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("big.png");
    std::fs::write(&input, encode_png(&fixtures::gradient(40, 40)).unwrap()).unwrap();

    let config = WorkerConfig {
        max_pixels: 1000,
        ..fixtures::seeded_config()
    };
    let err = decode_png(&std::fs::read(&input).unwrap(), config.max_pixels).unwrap_err();
    assert_eq!(err.to_string(), "Image too large: 1600 pixels (max 1000)");
}
