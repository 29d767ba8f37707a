// Tests for the GPU-backend point cloud, mesh generation, and camera.

use glam::Vec3;
use mood_core::camera::Camera;
use mood_core::cloud::{
    visual_config, MeshMotion, Movement, PointCloud, SHELL_RADIUS_MIN, SHELL_RADIUS_SPAN,
};
use mood_core::color::rgb_from_hex;
use mood_core::mesh::{self, MeshKind};
use mood_core::mood::{Emotion, MoodKind, MoodState};

fn mood(kind: MoodKind, intensity: f32) -> MoodState {
    MoodState::new(kind, intensity, 1.0, 0.0)
}

#[test]
fn cloud_size_is_budget_times_density() {
    let config = visual_config(&mood(MoodKind::Energetic, 0.5));
    let cloud = PointCloud::new(1000, config, 42);
    assert_eq!(cloud.len(), (1000.0 * config.density) as usize);
}

#[test]
fn points_start_on_the_sphere_shell() {
    let config = visual_config(&mood(MoodKind::Neutral, 0.5));
    let cloud = PointCloud::new(500, config, 42);
    let max = SHELL_RADIUS_MIN + SHELL_RADIUS_SPAN;
    for p in cloud.positions() {
        let r = p.length();
        assert!(
            (SHELL_RADIUS_MIN - 1e-3..=max + 1e-3).contains(&r),
            "point off shell: radius {r}"
        );
    }
}

#[test]
fn point_colors_lie_between_the_two_mood_colors() {
    let config = visual_config(&mood(MoodKind::Creative, 0.5));
    let cloud = PointCloud::new(200, config, 42);
    let a = rgb_from_hex(config.primary);
    let b = rgb_from_hex(config.secondary);
    for c in cloud.colors() {
        for i in 0..3 {
            let lo = a[i].min(b[i]) - 1e-5;
            let hi = a[i].max(b[i]) + 1e-5;
            assert!((lo..=hi).contains(&c[i]), "channel {i} out of mix range");
        }
    }
}

#[test]
fn recolor_changes_palette_but_not_positions() {
    let creative = visual_config(&mood(MoodKind::Creative, 0.5));
    let mut cloud = PointCloud::new(300, creative, 42);
    let before: Vec<Vec3> = cloud.positions().to_vec();

    let energetic = visual_config(&mood(MoodKind::Energetic, 0.5));
    cloud.recolor(energetic);
    assert_eq!(cloud.positions(), before.as_slice(), "recolor moved points");
    assert_eq!(cloud.len(), 300 * 12 / 10); // density 1.2 from creative init

    let a = rgb_from_hex(energetic.primary);
    let b = rgb_from_hex(energetic.secondary);
    for c in cloud.colors() {
        for i in 0..3 {
            let lo = a[i].min(b[i]) - 1e-5;
            let hi = a[i].max(b[i]) + 1e-5;
            assert!((lo..=hi).contains(&c[i]));
        }
    }
}

#[test]
fn zero_intensity_freezes_the_cloud() {
    let config = visual_config(&mood(MoodKind::Energetic, 0.0));
    let mut cloud = PointCloud::new(100, config, 1);
    let before: Vec<Vec3> = cloud.positions().to_vec();
    cloud.update(Movement::Explosive, 1.0, 0.0);
    assert_eq!(cloud.positions(), before.as_slice());
}

#[test]
fn archetypes_displace_by_distinct_amounts() {
    let config = visual_config(&mood(MoodKind::Neutral, 1.0));
    let displacement = |movement: Movement| -> f32 {
        let mut cloud = PointCloud::new(200, config, 9);
        let before: Vec<Vec3> = cloud.positions().to_vec();
        cloud.update(movement, 1.3, 1.0);
        cloud
            .positions()
            .iter()
            .zip(&before)
            .map(|(a, b)| (*a - *b).length())
            .sum::<f32>()
            / before.len() as f32
    };
    let explosive = displacement(Movement::Explosive);
    let gentle = displacement(Movement::Gentle);
    let balanced = displacement(Movement::Balanced);
    assert!(explosive > balanced, "explosive should move the most");
    assert!(balanced > gentle, "gentle should move the least");
}

#[test]
fn dominant_emotion_selects_the_happy_and_calm_configs() {
    let happy = mood(MoodKind::Creative, 0.6).with_dominant(Emotion::Happy);
    assert_eq!(visual_config(&happy).mesh, MeshKind::Dodecahedron);

    let calm = mood(MoodKind::Melancholy, 0.3).with_dominant(Emotion::Calm);
    assert_eq!(visual_config(&calm).mesh, MeshKind::Plane);

    // Without a dominant emotion the remapped kind decides.
    assert_eq!(
        visual_config(&mood(MoodKind::Creative, 0.6)).mesh,
        MeshKind::Torus
    );
    assert_eq!(
        visual_config(&mood(MoodKind::Neutral, 0.5)).mesh,
        MeshKind::Octahedron
    );
}

#[test]
fn mesh_motion_accumulates_rotation_with_intensity() {
    let mut motion = MeshMotion::default();
    for _ in 0..100 {
        motion.tick(0.5);
    }
    assert!((motion.rotation_x - 0.5).abs() < 1e-4);
    assert!((motion.rotation_y - 0.25).abs() < 1e-4);
    // Zero intensity freezes rotation.
    let frozen = motion.rotation_x;
    motion.tick(0.0);
    assert_eq!(motion.rotation_x, frozen);
}

#[test]
fn pulse_scale_stays_near_one() {
    for step in 0..200 {
        let t = step as f32 * 0.1;
        let s = MeshMotion::pulse_scale(t, 1.0);
        assert!((0.9..=1.1).contains(&s), "pulse out of range: {s}");
    }
}

#[test]
fn mesh_vertices_print_in_failure_messages() {
    let data = mesh::generate(MeshKind::Plane, false);
    let text = format!("{:?}", data.vertices[0]);
    assert!(text.contains("position") && text.contains("normal"));
}

#[test]
fn all_mesh_kinds_generate_valid_geometry() {
    let kinds = [
        MeshKind::Sphere,
        MeshKind::Torus,
        MeshKind::Icosahedron,
        MeshKind::Dodecahedron,
        MeshKind::Octahedron,
        MeshKind::Plane,
    ];
    for kind in kinds {
        for high_detail in [false, true] {
            let data = mesh::generate(kind, high_detail);
            assert!(!data.vertices.is_empty(), "{kind:?} produced no vertices");
            assert_eq!(data.indices.len() % 3, 0, "{kind:?} index count not triangles");
            for &i in &data.indices {
                assert!(
                    (i as usize) < data.vertices.len(),
                    "{kind:?} index out of bounds"
                );
            }
            for v in &data.vertices {
                let n = Vec3::from(v.normal).length();
                assert!((n - 1.0).abs() < 1e-3, "{kind:?} normal not unit length");
            }
        }
    }
}

#[test]
fn high_detail_subdivision_adds_triangles() {
    for kind in [MeshKind::Sphere, MeshKind::Icosahedron, MeshKind::Octahedron] {
        let low = mesh::generate(kind, false);
        let high = mesh::generate(kind, true);
        assert!(
            high.indices.len() > low.indices.len(),
            "{kind:?} high detail no denser than low"
        );
    }
}

#[test]
fn camera_orbits_around_the_origin() {
    let base = Vec3::new(0.0, 0.0, 10.0);
    let mut camera = Camera::for_base(base, 16.0 / 9.0);
    let mut eyes = Vec::new();
    for step in 0..10 {
        camera.orbit(base, step as f32);
        assert_eq!(camera.target, Vec3::ZERO);
        // Bounded orbit around the base eye.
        assert!((camera.eye - base).length() <= (1.5f32.powi(2) + 1.0).sqrt() + 1e-4);
        eyes.push(camera.eye);
    }
    assert!(eyes.windows(2).any(|w| w[0] != w[1]), "camera never moved");
    let vp = camera.view_proj();
    assert!(vp.is_finite());
}
