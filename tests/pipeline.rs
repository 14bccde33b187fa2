mod common;

use cartoonize_rust::cartoon::stages::{composite, edge_mask, normalize, reconcile_mask, simplify_colors};
use cartoonize_rust::image::solid_rgb;
use cartoonize_rust::{cartoonize, CartoonError, CartoonPipeline, PipelineConfig, Stage};
use common::synthetic_image::{checkerboard_rgb, gradient_rgb};
use ndarray::Array3;

/// Few bilateral passes keep the full-resolution tests quick.
fn quick_config(down_samples: usize) -> PipelineConfig {
    PipelineConfig::new(down_samples, 2)
}

#[test]
fn render_outputs_working_size_for_any_input() {
    let pipeline = CartoonPipeline::new(quick_config(2));
    for &(w, h) in &[(640usize, 480usize), (1366, 768), (3000, 200), (7, 9)] {
        let out = pipeline.render(checkerboard_rgb(w, h, 16).view()).unwrap();
        assert_eq!(out.dim(), (768, 1366, 3), "input {w}x{h}");
    }
}

#[test]
fn render_size_does_not_depend_on_down_samples() {
    let img = gradient_rgb(320, 240);
    for down_samples in [0, 1, 3, 5, 10] {
        let out = CartoonPipeline::new(PipelineConfig::new(down_samples, 1))
            .render(img.view())
            .unwrap();
        assert_eq!(out.dim(), (768, 1366, 3), "down_samples={down_samples}");
    }
}

#[test]
fn too_many_down_samples_fail_in_pyramid() {
    let img = gradient_rgb(64, 48);
    let err = CartoonPipeline::new(PipelineConfig::new(11, 0))
        .render(img.view())
        .unwrap_err();
    assert_eq!(err.stage(), Some(Stage::PyramidDown));
}

#[test]
fn render_is_deterministic() {
    common::init_logging();
    let img = checkerboard_rgb(200, 150, 12);
    let pipeline = CartoonPipeline::new(quick_config(2));
    let a = pipeline.render(img.view()).unwrap();
    let b = pipeline.render(img.view()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn render_does_not_touch_input() {
    let img = checkerboard_rgb(50, 40, 5);
    let copy = img.clone();
    CartoonPipeline::new(quick_config(1)).render(img.view()).unwrap();
    assert_eq!(img, copy);
}

#[test]
fn output_is_color_branch_masked_by_edges() {
    common::init_logging();
    let img = checkerboard_rgb(300, 200, 20);
    let config = quick_config(2);

    let normalized = normalize(img.view(), config.working_size).unwrap();
    let color = simplify_colors(normalized.view(), &config).unwrap();
    let mask = edge_mask(normalized.view()).unwrap();
    let (height, width, _) = color.dim();
    let mask3 = reconcile_mask(mask.view(), (width, height)).unwrap();
    let staged = composite(color.view(), mask3.view()).unwrap();

    let rendered = CartoonPipeline::new(config).render(img.view()).unwrap();
    assert_eq!(rendered, staged);

    for ((idx, &out), (&c, &m)) in rendered.indexed_iter().zip(color.iter().zip(mask3.iter())) {
        if m == 0 {
            assert_eq!(out, 0, "masked pixel {idx:?} must be black");
        } else {
            assert_eq!(out, c, "unmasked pixel {idx:?} must keep its color");
        }
    }
    // The checkerboard has outlines
    assert!(mask.iter().any(|&v| v == 0));
}

#[test]
fn blank_white_image_renders_white() {
    let img = solid_rgb(100, 50, [255, 255, 255]);
    let config = PipelineConfig::default();

    let normalized = normalize(img.view(), config.working_size).unwrap();
    let mask = edge_mask(normalized.view()).unwrap();
    assert!(mask.iter().all(|&v| v == 255));

    let out = CartoonPipeline::new(config).render(img.view()).unwrap();
    assert_eq!(out.dim(), (768, 1366, 3));
    assert!(out.iter().all(|&v| v >= 254));
}

#[test]
fn degenerate_input_is_rejected() {
    let pipeline = CartoonPipeline::default();

    let empty = Array3::<u8>::zeros((0, 10, 3));
    assert!(matches!(pipeline.render(empty.view()), Err(CartoonError::InvalidInput(_))));

    let gray = Array3::<u8>::zeros((10, 10, 1));
    assert!(matches!(pipeline.render(gray.view()), Err(CartoonError::InvalidInput(_))));
}

#[test]
fn custom_working_size_is_honored() {
    let img = gradient_rgb(90, 60);
    let config = PipelineConfig::new(2, 1).with_working_size(120, 80);
    let out = CartoonPipeline::new(config).render(img.view()).unwrap();
    assert_eq!(out.dim(), (80, 120, 3));
}

#[test]
fn zero_working_size_fails_in_normalize() {
    let img = gradient_rgb(10, 10);
    let config = PipelineConfig::default().with_working_size(0, 768);
    let err = CartoonPipeline::new(config).render(img.view()).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Normalize));
}

#[test]
fn non_finite_smoothing_fails_in_smoothing_stage() {
    let img = gradient_rgb(40, 30);
    let mut config = quick_config(1);
    config.smoothing.sigma_space = f32::INFINITY;
    let err = CartoonPipeline::new(config).render(img.view()).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Smoothing));
}

#[test]
fn cartoonize_applies_filter_after_render() {
    let img = checkerboard_rgb(120, 90, 10);
    let config = PipelineConfig::new(1, 1);

    let gray = cartoonize(img.view(), &config, "Grayscale").unwrap();
    assert_eq!(gray.dim(), (768, 1366, 1));

    let plain = cartoonize(img.view(), &config, "Cartoon").unwrap();
    assert_eq!(plain, CartoonPipeline::new(config).render(img.view()).unwrap());
}
