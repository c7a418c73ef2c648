use scanline_tracker::config::TrackerConfig;
use scanline_tracker::scene::Scene;

fn wall_scan(angle_bins: usize, radius_mm: f64) -> Vec<(f64, f64)> {
    (0..angle_bins)
        .map(|i| (i as f64 * 360.0 / angle_bins as f64, radius_mm))
        .collect()
}

/// A cluster of points at `(angle_deg, range_mm)` pairs computed from a Cartesian
/// center, simulating a person standing in front of the sensor.
fn person_at(center_x_mm: f64, center_y_mm: f64) -> Vec<(f64, f64)> {
    let offsets = [
        (-120.0, -120.0),
        (0.0, -120.0),
        (120.0, -120.0),
        (-120.0, 0.0),
        (0.0, 0.0),
        (120.0, 0.0),
        (-120.0, 120.0),
        (0.0, 120.0),
    ];
    offsets
        .iter()
        .map(|(dx, dy)| {
            let x = center_x_mm + dx;
            let y = center_y_mm + dy;
            let range = (x * x + y * y).sqrt();
            let angle = y.atan2(x).to_degrees().rem_euclid(360.0);
            (angle, range)
        })
        .collect()
}

fn scan_with_person(angle_bins: usize, wall_mm: f64, center_x_mm: f64, center_y_mm: f64) -> Vec<(f64, f64)> {
    let mut scan = wall_scan(angle_bins, wall_mm);
    for (angle, range) in person_at(center_x_mm, center_y_mm) {
        let idx = ((angle * angle_bins as f64 / 360.0).floor() as usize) % angle_bins;
        scan[idx] = (angle, range);
    }
    scan
}

fn test_config() -> TrackerConfig {
    TrackerConfig {
        angle_bins: 360,
        min_learning_frames: 5,
        cluster_eps_mm: 200.0,
        cluster_min_samples: 3,
        max_cluster_radius_mm: 500.0,
        max_match_distance_mm: 800.0,
        max_missing_frames: 10,
        min_confirm_frames: 2,
        ..Default::default()
    }
}

/// Scenario tests run with `RUST_LOG` honored, so a failure can be re-run with
/// tracing visible: `RUST_LOG=trace cargo test --test scenarios -- --nocapture`.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn learning_gate_withholds_output_on_empty_room() {
    init_logging();
    let config = test_config();
    let mut scene = Scene::new(config).unwrap();
    let wall = wall_scan(360, 4000.0);

    for i in 0..4 {
        let frame = scene.process_scan(wall.clone());
        assert!(!frame.background_ready, "frame {i} should not be ready yet");
        assert!(frame.objects.is_empty());
    }
    let frame = scene.process_scan(wall.clone());
    assert!(frame.background_ready);
    assert!(frame.objects.is_empty(), "empty room yields no objects once ready");
}

#[test]
fn stationary_person_confirms_on_second_sighting() {
    init_logging();
    let config = test_config();
    let mut scene = Scene::new(config).unwrap();
    let wall = wall_scan(360, 4000.0);

    for _ in 0..5 {
        scene.process_scan(wall.clone());
    }

    let scan = scan_with_person(360, 4000.0, 1500.0, 0.0);
    let frame = scene.process_scan(scan.clone());
    assert!(frame.objects.is_empty(), "first sighting is tentative");

    let frame = scene.process_scan(scan);
    assert_eq!(frame.objects.len(), 1);
    let id = frame.objects[0].public_id;
    assert!(!scene.trajectory(id).is_empty());
}

#[test]
fn brief_occlusion_preserves_identity_end_to_end() {
    init_logging();
    let config = test_config();
    let mut scene = Scene::new(config).unwrap();
    let wall = wall_scan(360, 4000.0);
    for _ in 0..5 {
        scene.process_scan(wall.clone());
    }

    let scan = scan_with_person(360, 4000.0, 1500.0, 0.0);
    scene.process_scan(scan.clone());
    let frame = scene.process_scan(scan);
    let id = frame.objects[0].public_id;

    for _ in 0..5 {
        let frame = scene.process_scan(wall.clone());
        assert!(frame.objects.is_empty());
    }

    let scan = scan_with_person(360, 4000.0, 1520.0, 0.0);
    let frame = scene.process_scan(scan);
    assert_eq!(frame.objects.len(), 1);
    assert_eq!(frame.objects[0].public_id, id);
    assert!(scene.trajectory(id).len() >= 2);
}

#[test]
fn long_occlusion_retires_and_reassigns() {
    init_logging();
    let config = test_config();
    let mut scene = Scene::new(config).unwrap();
    let wall = wall_scan(360, 4000.0);
    for _ in 0..5 {
        scene.process_scan(wall.clone());
    }

    let scan = scan_with_person(360, 4000.0, 1500.0, 0.0);
    scene.process_scan(scan.clone());
    let frame = scene.process_scan(scan);
    let old_id = frame.objects[0].public_id;

    let mut retired = false;
    for _ in 0..11 {
        let frame = scene.process_scan(wall.clone());
        if frame.objects.is_empty() {
            retired = true;
        }
    }
    assert!(retired);
    assert!(scene.trajectory(old_id).is_empty());

    let scan = scan_with_person(360, 4000.0, 1500.0, 0.0);
    scene.process_scan(scan.clone());
    let frame = scene.process_scan(scan);
    assert_eq!(frame.objects.len(), 1);
    assert_ne!(frame.objects[0].public_id, old_id);
}

#[test]
fn crossing_paths_retain_identity() {
    init_logging();
    let config = test_config();
    let mut scene = Scene::new(config).unwrap();
    let wall = wall_scan(360, 5000.0);
    for _ in 0..5 {
        scene.process_scan(wall.clone());
    }

    let mut lx = -995.0_f64;
    let rx_start = 995.0_f64;
    let mut rx = rx_start;

    let scan = {
        let mut scan = wall_scan(360, 5000.0);
        for (angle, range) in person_at(lx, 0.0).into_iter().chain(person_at(rx, 0.0)) {
            let idx = ((angle * 360.0 / 360.0).floor() as usize) % 360;
            scan[idx] = (angle, range);
        }
        scan
    };
    scene.process_scan(scan.clone());
    let frame = scene.process_scan(scan);
    assert_eq!(frame.objects.len(), 2);

    let mut left_id = frame
        .objects
        .iter()
        .min_by(|a, b| a.centroid.x_mm().partial_cmp(&b.centroid.x_mm()).unwrap())
        .unwrap()
        .public_id;
    let mut right_id = frame
        .objects
        .iter()
        .max_by(|a, b| a.centroid.x_mm().partial_cmp(&b.centroid.x_mm()).unwrap())
        .unwrap()
        .public_id;

    for _ in 0..18 {
        lx += 100.0;
        rx -= 100.0;
        let mut scan = wall_scan(360, 5000.0);
        for (angle, range) in person_at(lx, 0.0).into_iter().chain(person_at(rx, 0.0)) {
            let idx = ((angle * 360.0 / 360.0).floor() as usize) % 360;
            scan[idx] = (angle, range);
        }
        let frame = scene.process_scan(scan);
        assert_eq!(frame.objects.len(), 2);
        for obj in &frame.objects {
            if (obj.centroid.x_mm() - lx).abs() < 50.0 {
                left_id = obj.public_id;
            } else if (obj.centroid.x_mm() - rx).abs() < 50.0 {
                right_id = obj.public_id;
            }
        }
    }
    assert_ne!(left_id, right_id);
}

#[test]
fn oversized_blob_is_never_tracked() {
    init_logging();
    let config = test_config();
    let mut scene = Scene::new(config).unwrap();
    let wall = wall_scan(360, 4000.0);
    for _ in 0..5 {
        scene.process_scan(wall.clone());
    }

    // A 1300mm chain of 100mm-spaced points: dense enough (eps_mm = 200) to form one
    // cluster via BFS expansion, but its bounding radius exceeds the 500mm cap.
    let mut scan = wall_scan(360, 4000.0);
    for i in 0..14 {
        let x = 1000.0 + i as f64 * 100.0;
        let y = 0.0_f64;
        let range = (x * x + y * y).sqrt();
        let angle = y.atan2(x).to_degrees().rem_euclid(360.0);
        let idx = ((angle * 360.0 / 360.0).floor() as usize) % 360;
        scan[idx] = (angle, range);
    }

    let frame = scene.process_scan(scan.clone());
    assert!(frame.objects.is_empty());
    let frame = scene.process_scan(scan);
    assert!(frame.objects.is_empty(), "oversized blob must never be confirmed as a track");
}
