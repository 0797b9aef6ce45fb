use glam::{EulerRot, Quat, Vec2, Vec3};

/// Object name, used for lookup by name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Position, orientation and scale of an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Build from Euler angles in degrees, applied X then Y then Z
    pub fn from_euler_degrees(position: Vec3, degrees: [f32; 3]) -> Self {
        let [x, y, z] = degrees.map(f32::to_radians);
        Self {
            position,
            rotation: Quat::from_euler(EulerRot::ZYX, z, y, x),
            scale: Vec3::ONE,
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Euler angles in degrees, inverse of [`Transform::from_euler_degrees`]
    pub fn euler_degrees(&self) -> [f32; 3] {
        let (z, y, x) = self.rotation.to_euler(EulerRot::ZYX);
        [x.to_degrees(), y.to_degrees(), z.to_degrees()]
    }

    /// Position on the table plane
    pub fn planar(&self) -> Vec2 {
        self.position.truncate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Moved by the physics step
    Dynamic,
    /// Moved by gameplay, pushes dynamic bodies
    Kinematic,
    /// Never moves
    Static,
}

/// Rigid body state for the planar physics step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    pub kind: BodyKind,
    pub velocity: Vec3,
    pub force: Vec3, // Accumulated until the next integration
    pub mass: f32,
    pub linear_damping: f32,
}

impl RigidBody {
    pub fn new(kind: BodyKind, mass: f32, linear_damping: f32) -> Self {
        Self {
            kind,
            velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            mass,
            linear_damping,
        }
    }

    pub fn dynamic(mass: f32, linear_damping: f32) -> Self {
        Self::new(BodyKind::Dynamic, mass, linear_damping)
    }

    pub fn kinematic() -> Self {
        Self::new(BodyKind::Kinematic, 0.0, 0.0)
    }

    pub fn fixed() -> Self {
        Self::new(BodyKind::Static, 0.0, 0.0)
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn inverse_mass(&self) -> f32 {
        if self.is_dynamic() && self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    /// Stop the body and drop any pending force
    pub fn reset_velocity(&mut self) {
        self.velocity = Vec3::ZERO;
        self.force = Vec3::ZERO;
    }

    /// Instantaneous velocity change
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse * self.inverse_mass();
    }

    /// Velocity change independent of mass
    pub fn apply_velocity_change(&mut self, delta: Vec3) {
        if self.is_dynamic() {
            self.velocity += delta;
        }
    }

    /// Continuous force, consumed by the next integration
    pub fn apply_force(&mut self, force: Vec3) {
        if self.is_dynamic() {
            self.force += force;
        }
    }
}

/// Round collider for bodies on the table (puck, paddles)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereCollider {
    pub radius: f32,
}

impl SphereCollider {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

/// Oriented box in the owner's frame that reports enter/leave instead of colliding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerVolume {
    pub half_extents: Vec3,
}

impl TriggerVolume {
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }
}

/// Table side; left is the red player, right is the blue player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn colour(self) -> &'static str {
        match self {
            Side::Left => "Red",
            Side::Right => "Blue",
        }
    }
}

/// Puck marker
#[derive(Debug, Clone, Copy, Default)]
pub struct Puck;

/// Wall segment marker
#[derive(Debug, Clone, Copy, Default)]
pub struct Edge;

/// Paddle component - a player's striker
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        Self { side }
    }
}

/// Movement intent for paddle
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleIntent {
    pub dir: Vec2,  // Keyboard direction, held until changed
    pub drag: Vec2, // Pending mouse drag, consumed by the next move
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_impulse_scales_with_inverse_mass() {
        let mut body = RigidBody::dynamic(2.0, 0.0);
        body.apply_impulse(Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(body.velocity(), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_velocity_change_ignores_mass() {
        let mut body = RigidBody::dynamic(2.0, 0.0);
        body.apply_velocity_change(Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(body.velocity(), Vec3::new(4.0, 0.0, 0.0));

        let mut paddle = RigidBody::kinematic();
        paddle.apply_velocity_change(Vec3::X);
        assert_eq!(paddle.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_kinematic_body_ignores_impulse_and_force() {
        let mut body = RigidBody::kinematic();
        body.apply_impulse(Vec3::X);
        body.apply_force(Vec3::X);
        assert_eq!(body.velocity(), Vec3::ZERO);
        assert_eq!(body.force, Vec3::ZERO);
    }

    #[test]
    fn test_reset_velocity_drops_pending_force() {
        let mut body = RigidBody::dynamic(1.0, 0.0);
        body.apply_impulse(Vec3::Y);
        body.apply_force(Vec3::X);
        body.reset_velocity();
        assert_eq!(body.velocity(), Vec3::ZERO);
        assert_eq!(body.force, Vec3::ZERO);
    }

    #[test]
    fn test_euler_degrees_survive_conversion() {
        let t = Transform::from_euler_degrees(Vec3::ZERO, [0.0, 0.0, -147.1]);
        let [x, y, z] = t.euler_degrees();
        assert_relative_eq!(x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(z, -147.1, epsilon = 1e-3);
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Left.opponent(), Side::Right);
        assert_eq!(Side::Right.opponent(), Side::Left);
    }
}
