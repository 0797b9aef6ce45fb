use glam::{Quat, Vec3};

/// Oriented box: centre, orientation and half extents along its local axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    pub center: Vec3,
    pub rotation: Quat,
    pub half_extents: Vec3,
}

impl OrientedBox {
    pub fn new(center: Vec3, rotation: Quat, half_extents: Vec3) -> Self {
        Self {
            center,
            rotation,
            half_extents,
        }
    }

    /// Closest point of the box to `point`, in world space
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let local = self.rotation.inverse() * (point - self.center);
        let clamped = local.clamp(-self.half_extents, self.half_extents);
        self.center + self.rotation * clamped
    }

    /// Check if sphere intersects the box
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        (center - self.closest_point(center)).length_squared() <= radius * radius
    }
}

/// Circle vs circle overlap on the table plane.
///
/// Returns the unit normal pointing from `b` to `a` and the penetration depth.
pub fn circle_overlap(a: Vec3, radius_a: f32, b: Vec3, radius_b: f32) -> Option<(Vec3, f32)> {
    let delta = Vec3::new(a.x - b.x, a.y - b.y, 0.0);
    let dist = delta.length();
    let min_dist = radius_a + radius_b;
    if dist >= min_dist || dist <= f32::EPSILON {
        return None;
    }
    Some((delta / dist, min_dist - dist))
}
