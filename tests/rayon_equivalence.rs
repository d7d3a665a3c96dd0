#![cfg(feature = "rayon")]

use edgemap::filter::rayon::convolve_par;
use edgemap::{
    convolve, derivative_kernels, BorderPolicy, DetectorConfig, DetectorKind, EdgeDetector,
    ImageView, OwnedImage,
};

fn make_frame(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 11) ^ (y * 3) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn detector(kind: DetectorKind, parallel: bool) -> EdgeDetector {
    EdgeDetector::new(&DetectorConfig {
        kind,
        ksize: Some(7),
        sigma: 1.1,
        parallel,
        ..DetectorConfig::default()
    })
    .unwrap()
}

#[test]
fn parallel_convolution_matches_sequential() {
    let width = 120;
    let height = 90;
    let frame = make_frame(width, height);
    let view = ImageView::from_slice(&frame, width, height).unwrap();
    let (dx, _) = derivative_kernels(7, 1.1).unwrap();

    for border in [
        BorderPolicy::ZeroPad,
        BorderPolicy::Clamp,
        BorderPolicy::Reject,
    ] {
        let seq: OwnedImage<f32> = convolve(view, &dx, border).unwrap();
        let par: OwnedImage<f32> = convolve_par(view, &dx, border).unwrap();
        assert_eq!(seq.data(), par.data(), "border {border:?}");
    }
}

#[test]
fn parallel_gradient_detector_matches_sequential() {
    let width = 160;
    let height = 120;
    let frame = make_frame(width, height);
    let view = ImageView::from_slice(&frame, width, height).unwrap();

    let seq = detector(DetectorKind::Gradient, false).apply(view).unwrap();
    let par = detector(DetectorKind::Gradient, true).apply(view).unwrap();
    assert_eq!(seq.data(), par.data());
}

#[test]
fn parallel_zero_crossing_detector_matches_sequential() {
    let width = 160;
    let height = 120;
    let frame = make_frame(width, height);
    let view = ImageView::from_slice(&frame, width, height).unwrap();

    let seq = detector(DetectorKind::ZeroCrossing, false)
        .apply(view)
        .unwrap();
    let par = detector(DetectorKind::ZeroCrossing, true)
        .apply(view)
        .unwrap();
    assert_eq!(seq.data(), par.data());
}
