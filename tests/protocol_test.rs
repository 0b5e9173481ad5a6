//! Request handling tests: one request in, one response out.

mod common;

use common::fixtures::{self, palettes};
use pixel_quant::Raster;
use pixelsmith::models::{ProcessSettings, RasterPayload, Request, Response, WorkerConfig};
use pixelsmith::services::handle_request;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn handle(request: Request) -> Response {
    handle_request(request, &fixtures::seeded_config(), &mut StdRng::seed_from_u64(7))
}

#[test]
fn test_empty_settings_only_cut_alpha() {
    let raster = Raster::new(
        3,
        1,
        vec![10, 20, 30, 255, 40, 50, 60, 200, 70, 80, 90, 50],
    )
    .unwrap();

    let out = common::assert_success(handle(fixtures::process_request(
        raster,
        ProcessSettings::default(),
    )));

    common::assert_size(&out, 3, 1);
    assert_eq!(
        out.as_bytes(),
        &[10, 20, 30, 255, 40, 50, 60, 255, 70, 80, 90, 0]
    );
}

#[test]
fn test_resample_and_diffuse() {
    let settings = ProcessSettings {
        target_width: Some(4),
        target_height: Some(2),
        resampling_method: "bilinear".to_string(),
        dither_method: "floyd-steinberg".to_string(),
        palette: palettes::black_white(),
        ..Default::default()
    };

    let out = common::assert_success(handle(fixtures::process_request(
        fixtures::gradient(8, 2),
        settings,
    )));

    common::assert_size(&out, 4, 2);
    common::assert_palette_only(&out, &[[0, 0, 0], [255, 255, 255]]);
}

#[test]
fn test_every_method_name_is_accepted() {
    for method in pixel_quant::DitherMethod::ALL {
        let settings = ProcessSettings {
            dither_method: method.as_str().to_string(),
            palette: palettes::primaries(),
            ..Default::default()
        };
        let out = common::assert_success(handle(fixtures::process_request(
            fixtures::gradient(6, 3),
            settings,
        )));
        if method != pixel_quant::DitherMethod::None {
            common::assert_palette_only(&out, &[[255, 0, 0], [0, 255, 0], [0, 0, 255]]);
        }
    }
}

#[test]
fn test_kmeans_palette_comes_from_the_image() {
    let red = [255, 0, 0, 255];
    let blue = [0, 0, 255, 255];
    let settings = ProcessSettings {
        dither_method: "bayer-4x4".to_string(),
        use_kmeans: true,
        kmeans_colors: 2,
        ..Default::default()
    };

    let out = common::assert_success(handle(fixtures::process_request(
        fixtures::two_tone(8, 8, red, blue),
        settings,
    )));

    common::assert_palette_only(&out, &[[255, 0, 0], [0, 0, 255]]);
}

#[test]
fn test_unknown_method_is_an_error() {
    let settings = ProcessSettings {
        dither_method: "error-diffusion".to_string(),
        ..Default::default()
    };
    let response = handle(fixtures::process_request(
        fixtures::gradient(4, 4),
        settings,
    ));
    common::assert_error_contains(&response, "unknown dither method \"error-diffusion\"");

    let settings = ProcessSettings {
        resampling_method: "bicubic".to_string(),
        ..Default::default()
    };
    let response = handle(fixtures::process_request(
        fixtures::gradient(4, 4),
        settings,
    ));
    common::assert_error_contains(&response, "unknown resampling method");
}

#[test]
fn test_buffer_length_mismatch_is_an_error() {
    let request = Request::Process {
        raster: RasterPayload {
            width: 2,
            height: 2,
            rgba_bytes: vec![0; 15],
        },
        settings: ProcessSettings::default(),
    };
    common::assert_error_contains(&handle(request), "Invalid raster");
}

#[test]
fn test_diffusion_without_palette_is_an_error() {
    let settings = ProcessSettings {
        dither_method: "atkinson".to_string(),
        ..Default::default()
    };
    let response = handle(fixtures::process_request(
        fixtures::gradient(4, 4),
        settings,
    ));
    common::assert_error_contains(&response, "needs a non-empty palette");
}

#[test]
fn test_zero_target_is_an_error() {
    let settings = ProcessSettings {
        target_width: Some(0),
        ..Default::default()
    };
    let response = handle(fixtures::process_request(
        fixtures::gradient(4, 4),
        settings,
    ));
    common::assert_error_contains(&response, "at least 1x1");
}

#[test]
fn test_bad_hex_is_an_error() {
    let settings = ProcessSettings {
        dither_method: "bayer-8x8".to_string(),
        palette: vec!["#000000".to_string(), "white".to_string()],
        ..Default::default()
    };
    let response = handle(fixtures::process_request(
        fixtures::gradient(4, 4),
        settings,
    ));
    common::assert_error_contains(&response, "Invalid palette");
}

#[test]
fn test_oversized_request_is_rejected() {
    let config = WorkerConfig {
        max_pixels: 64,
        ..fixtures::seeded_config()
    };
    let settings = ProcessSettings {
        target_width: Some(100),
        target_height: Some(100),
        ..Default::default()
    };
    let response = handle_request(
        fixtures::process_request(fixtures::gradient(4, 4), settings),
        &config,
        &mut StdRng::seed_from_u64(7),
    );
    assert_eq!(
        response,
        Response::error("Image too large: 10000 pixels (max 64)")
    );
}

#[test]
fn test_suggest_ranks_missing_color_first() {
    let request = fixtures::suggest_request(
        fixtures::two_tone(8, 8, [255, 0, 0, 255], [0, 0, 255, 255]),
        vec!["#ff0000".to_string()],
        3,
    );

    let colors = common::assert_suggestions(handle(request));
    assert!(colors.len() <= 3);
    assert_eq!(colors[0], "#0000ff");
}

#[test]
fn test_suggest_nothing_to_do() {
    let transparent = fixtures::suggest_request(
        Raster::transparent(5, 5),
        palettes::black_white(),
        4,
    );
    assert_eq!(
        common::assert_suggestions(handle(transparent)),
        Vec::<String>::new()
    );

    let no_palette = fixtures::suggest_request(fixtures::gradient(5, 5), Vec::new(), 4);
    assert_eq!(
        common::assert_suggestions(handle(no_palette)),
        Vec::<String>::new()
    );
}

#[test]
fn test_documented_wire_shape_parses() {
    let suggest: Request = serde_json::from_str(
        r##"{"kind":"suggest","raster":{"width":1,"height":1,"rgba_bytes":"AAAA/w=="},"palette":["#000000"],"numSuggestions":1}"##,
    )
    .unwrap();
    // Already covered, so it scores zero but still ranks
    assert_eq!(
        common::assert_suggestions(handle(suggest)),
        vec!["#000000".to_string()]
    );

    let process: Request = serde_json::from_str(
        r##"{"kind":"process","raster":{"width":2,"height":1,"rgba_bytes":"/wAA/wAA/4A="},"settings":{"ditherMethod":"none","palette":["#ffffff"]}}"##,
    )
    .unwrap();
    let response = handle(process);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["kind"], "success");
    assert_eq!(json["raster"]["rgba_bytes"], "//////////8=");
    assert!(json["raster"].get("rgbaBytes").is_none());
}

#[test]
fn test_kmeans_color_count_is_capped() {
    let settings = ProcessSettings {
        use_kmeans: true,
        kmeans_colors: 100_000,
        ..Default::default()
    };
    let response = handle(fixtures::process_request(
        fixtures::gradient(4, 4),
        settings,
    ));
    common::assert_error_contains(&response, "k-means colors must be at most 256, got 100000");
}

#[test]
fn test_contrast_pole_is_rejected() {
    let settings = ProcessSettings {
        contrast: 259.0,
        ..Default::default()
    };
    let response = handle(fixtures::process_request(
        fixtures::gradient(4, 4),
        settings,
    ));
    common::assert_error_contains(&response, "contrast must be within -255..=255");
}
