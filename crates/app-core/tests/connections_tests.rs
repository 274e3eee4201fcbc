// Ground-truth checks for the pairwise connection scan.

use glam::Vec3;
use netfield_core::connections::{max_pairs, SegmentBuffer};
use netfield_core::ConnectionSegment;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn brute_force(points: &[Vec3], distance: f32) -> Vec<ConnectionSegment> {
    let mut out = Vec::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if (points[i] - points[j]).length_squared() < distance * distance {
                out.push(ConnectionSegment {
                    a: points[i],
                    b: points[j],
                });
            }
        }
    }
    out
}

#[test]
fn four_point_snapshot_matches_oracle() {
    let points = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 3.0, 0.0),
        Vec3::new(10.0, 10.0, 10.0),
    ];
    let mut buf = SegmentBuffer::for_particles(points.len());
    let count = buf.rebuild(&points, 3.5);

    // (0,1) at 1.0, (0,2) at 3.0, (1,2) at sqrt(10); the far point links to nothing.
    assert_eq!(count, 3);
    assert_eq!(
        buf.as_floats(),
        &[
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 0.0, 3.0, 0.0, //
            1.0, 0.0, 0.0, 0.0, 3.0, 0.0, //
        ]
    );
    let segments: Vec<_> = buf.iter().collect();
    assert_eq!(segments, brute_force(&points, 3.5));
    assert_eq!(buf.segment(2), Some(segments[2]));
    assert_eq!(buf.segment(3), None);
}

#[test]
fn threshold_is_strict() {
    let points = [Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)];
    let mut buf = SegmentBuffer::for_particles(points.len());
    assert_eq!(buf.rebuild(&points, 2.0), 0);
    assert_eq!(buf.rebuild(&points, 2.001), 1);
}

#[test]
fn random_clouds_match_oracle() {
    let mut rng = StdRng::seed_from_u64(31);
    for n in [2usize, 5, 17, 60] {
        let points: Vec<Vec3> = (0..n)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-6.0..6.0),
                    rng.gen_range(-6.0..6.0),
                    rng.gen_range(-6.0..6.0),
                )
            })
            .collect();
        let mut buf = SegmentBuffer::for_particles(n);
        let count = buf.rebuild(&points, 4.5);
        let expected = brute_force(&points, 4.5);
        assert_eq!(count, expected.len());
        assert!(count <= max_pairs(n));
        assert_eq!(buf.iter().collect::<Vec<_>>(), expected);
    }
}

#[test]
fn coincident_points_all_link() {
    let points = vec![Vec3::ONE; 6];
    let mut buf = SegmentBuffer::for_particles(points.len());
    assert_eq!(buf.rebuild(&points, 0.1), max_pairs(6));
    assert_eq!(buf.as_floats().len(), 6 * max_pairs(6));
}
