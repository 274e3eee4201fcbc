//! Proximity links between particles, rebuilt from scratch every frame.
//!
//! The scan is a plain O(N²) pass over unordered pairs. At the particle counts
//! the backgrounds use (around a hundred) that is a few thousand distance checks
//! per frame, well inside budget. Past a few hundred particles this should move
//! to a uniform grid rebuilt per tick; whatever replaces it must emit the same
//! pairs in the same order.

use glam::Vec3;

/// Upper bound on links between `n` particles: `n·(n−1)/2`.
#[inline]
pub fn max_pairs(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// One line between two linked particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionSegment {
    pub a: Vec3,
    pub b: Vec3,
}

/// Fixed arena of segment endpoints plus the number of pairs active this frame.
///
/// Storage is sized for the worst case up front so `rebuild` never allocates.
#[derive(Clone, Debug)]
pub struct SegmentBuffer {
    vertices: Vec<Vec3>,
    active: usize,
}

impl SegmentBuffer {
    /// Arena able to hold every pair among `particle_count` particles.
    pub fn for_particles(particle_count: usize) -> Self {
        Self {
            vertices: vec![Vec3::ZERO; 2 * max_pairs(particle_count)],
            active: 0,
        }
    }

    /// Maximum number of segments this buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Segments emitted by the last rebuild.
    #[inline]
    pub fn len(&self) -> usize {
        self.active
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.active = 0;
    }

    /// Replace the contents with every pair `(i, j)`, `i < j`, closer than
    /// `connect_distance`. Pairs are emitted in lexicographic index order.
    ///
    /// Returns the number of segments written.
    pub fn rebuild(&mut self, positions: &[Vec3], connect_distance: f32) -> usize {
        let max_dist_sq = connect_distance * connect_distance;
        let mut cursor = 0;
        for (i, &a) in positions.iter().enumerate() {
            for &b in &positions[i + 1..] {
                if a.distance_squared(b) < max_dist_sq {
                    // Arena sized for max_pairs, the bound only trips if a caller
                    // hands in more positions than the buffer was built for.
                    if cursor + 2 > self.vertices.len() {
                        log::warn!(
                            "[connections] arena full at {} segments, dropping the rest",
                            self.capacity()
                        );
                        self.active = cursor / 2;
                        return self.active;
                    }
                    self.vertices[cursor] = a;
                    self.vertices[cursor + 1] = b;
                    cursor += 2;
                }
            }
        }
        self.active = cursor / 2;
        self.active
    }

    /// Active endpoints as a flat `[ax, ay, az, bx, by, bz, ...]` slice.
    #[inline]
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices[..2 * self.active])
    }

    /// Active endpoints, two per segment.
    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices[..2 * self.active]
    }

    pub fn segment(&self, index: usize) -> Option<ConnectionSegment> {
        (index < self.active).then(|| ConnectionSegment {
            a: self.vertices[2 * index],
            b: self.vertices[2 * index + 1],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = ConnectionSegment> + '_ {
        self.vertices()
            .chunks_exact(2)
            .map(|pair| ConnectionSegment {
                a: pair[0],
                b: pair[1],
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_pairs_small_counts() {
        assert_eq!(max_pairs(0), 0);
        assert_eq!(max_pairs(1), 0);
        assert_eq!(max_pairs(2), 1);
        assert_eq!(max_pairs(100), 4950);
    }

    #[test]
    fn rebuild_overwrites_previous_frame() {
        let mut buf = SegmentBuffer::for_particles(3);
        let close = [Vec3::ZERO, Vec3::X, Vec3::Y];
        assert_eq!(buf.rebuild(&close, 2.0), 3);
        let apart = [Vec3::ZERO, Vec3::X * 10.0, Vec3::Y * 10.0];
        assert_eq!(buf.rebuild(&apart, 2.0), 0);
        assert!(buf.is_empty());
        assert!(buf.as_floats().is_empty());
        assert_eq!(buf.capacity(), 3);
    }

    #[test]
    fn oversized_input_is_truncated_not_panicking() {
        let mut buf = SegmentBuffer::for_particles(2);
        let pts = [Vec3::ZERO, Vec3::X, Vec3::Y];
        assert_eq!(buf.rebuild(&pts, 5.0), 1);
        assert_eq!(buf.as_floats().len(), 6);
    }
}
