//! Assertion helpers for tests.

use pixel_quant::Raster;
use pixelsmith::models::Response;
use pretty_assertions::assert_eq;

/// Assert the response is a success and return its raster
pub fn assert_success(response: Response) -> Raster {
    match response {
        Response::Success { raster } => {
            Raster::try_from(raster).expect("success raster should be well-formed")
        }
        other => panic!("Expected success, got {other:?}"),
    }
}

/// Assert the response is an error whose message contains `needle`
pub fn assert_error_contains(response: &Response, needle: &str) {
    match response {
        Response::Error { message } => assert!(
            message.contains(needle),
            "Expected error containing {needle:?}, got {message:?}"
        ),
        other => panic!("Expected error, got {other:?}"),
    }
}

/// Assert the response carries suggestions and return them
pub fn assert_suggestions(response: Response) -> Vec<String> {
    match response {
        Response::Suggestions { colors } => colors,
        other => panic!("Expected suggestions, got {other:?}"),
    }
}

/// Assert every opaque pixel is one of `palette` and alpha is binary
pub fn assert_palette_only(raster: &Raster, palette: &[[u8; 3]]) {
    for (i, px) in raster.pixels().enumerate() {
        assert!(
            px[3] == 0 || px[3] == 255,
            "pixel {i} has partial alpha {}",
            px[3]
        );
        if px[3] == 255 {
            assert!(
                palette.contains(&[px[0], px[1], px[2]]),
                "pixel {i} = {px:?} is not in the palette"
            );
        }
    }
}

/// Assert the raster has the given size
pub fn assert_size(raster: &Raster, width: usize, height: usize) {
    assert_eq!(
        (raster.width(), raster.height()),
        (width, height),
        "unexpected raster size"
    );
}
