use edgemap::{
    BorderPolicy, DetectorConfig, DetectorKind, EdgeDetector, EdgeMapError, ImageView,
};

fn flat_frame(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height]
}

#[test]
fn even_kernel_size_is_rejected() {
    let cfg = DetectorConfig {
        ksize: Some(4),
        ..DetectorConfig::default()
    };
    assert_eq!(
        EdgeDetector::new(&cfg).err().unwrap(),
        EdgeMapError::InvalidKernelSize { ksize: 4 }
    );
}

#[test]
fn non_positive_sigma_is_rejected() {
    for kind in [
        DetectorKind::Gradient,
        DetectorKind::ZeroCrossing,
        DetectorKind::Smooth,
    ] {
        let cfg = DetectorConfig {
            kind,
            sigma: 0.0,
            ..DetectorConfig::default()
        };
        assert_eq!(
            EdgeDetector::new(&cfg).err().unwrap(),
            EdgeMapError::InvalidSigma { sigma: 0.0 }
        );
    }
}

#[test]
fn threshold_fraction_must_be_in_open_unit_interval() {
    for fraction in [0.0f32, 1.0, -0.3, 1.5] {
        let cfg = DetectorConfig {
            threshold_fraction: fraction,
            ksize: Some(5),
            ..DetectorConfig::default()
        };
        assert_eq!(
            EdgeDetector::new(&cfg).err().unwrap(),
            EdgeMapError::InvalidThreshold { fraction }
        );
    }
    // The threshold only constrains the gradient variant.
    let cfg = DetectorConfig {
        kind: DetectorKind::ZeroCrossing,
        threshold_fraction: 1.5,
        ksize: Some(5),
        ..DetectorConfig::default()
    };
    assert!(EdgeDetector::new(&cfg).is_ok());
}

#[test]
fn kernel_size_defaults_to_sigma_rule() {
    // sigma 1.0 derives ksize 7; a 6x6 frame is too small, 7x7 works.
    let cfg = DetectorConfig {
        sigma: 1.0,
        ..DetectorConfig::default()
    };
    let detector = EdgeDetector::new(&cfg).unwrap();

    let small = flat_frame(6, 6, 128);
    let view = ImageView::from_slice(&small, 6, 6).unwrap();
    assert_eq!(
        detector.apply(view).err().unwrap(),
        EdgeMapError::KernelTooLarge {
            kernel_width: 7,
            kernel_height: 1,
            img_width: 6,
            img_height: 6,
        }
    );

    let frame = flat_frame(7, 7, 128);
    let view = ImageView::from_slice(&frame, 7, 7).unwrap();
    let out = detector.apply(view).unwrap();
    assert_eq!(out.width(), 7);
    assert_eq!(out.height(), 7);
}

#[test]
fn undersized_frame_fails_per_call_and_recovers() {
    let cfg = DetectorConfig {
        kind: DetectorKind::ZeroCrossing,
        ksize: Some(9),
        sigma: 1.4,
        ..DetectorConfig::default()
    };
    let detector = EdgeDetector::new(&cfg).unwrap();

    let tiny = flat_frame(5, 5, 64);
    let view = ImageView::from_slice(&tiny, 5, 5).unwrap();
    assert!(matches!(
        detector.apply(view),
        Err(EdgeMapError::KernelTooLarge { .. })
    ));

    // The same instance stays usable for adequately sized frames.
    let frame = flat_frame(16, 16, 64);
    let view = ImageView::from_slice(&frame, 16, 16).unwrap();
    assert!(detector.apply(view).is_ok());
}

#[test]
fn smooth_preserves_flat_frames() {
    let cfg = DetectorConfig {
        kind: DetectorKind::Smooth,
        ksize: Some(5),
        sigma: 1.0,
        border: BorderPolicy::Clamp,
        ..DetectorConfig::default()
    };
    let smoother = EdgeDetector::new(&cfg).unwrap();

    let frame = flat_frame(24, 12, 173);
    let view = ImageView::from_slice(&frame, 24, 12).unwrap();
    let out = smoother.apply(view).unwrap();
    assert!(out.data().iter().all(|&v| v == 173));
}
