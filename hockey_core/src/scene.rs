//! Scene documents to and from the ECS world
//!
//! A scene is a flat list of named objects with components. The default table
//! has the puck, two paddles and the twelve wall segments around the rink.

use glam::{Vec2, Vec3};
use hecs::{Entity, EntityBuilder, World};
use hockey_proto::{BodyKindDoc, ComponentDoc, ObjectDoc, SceneDoc, SideDoc};
use tracing::debug;

use crate::{
    BodyKind, BounceBehaviour, Config, Edge, Name, Paddle, PaddleIntent, Puck, RigidBody, Side,
    SphereCollider, Transform, TriggerVolume,
};

pub const PUCK_NAME: &str = "Puck";
pub const EDGE_NAME: &str = "Edge";

/// Rink walls: centre, rotation about Z in degrees, half length
const TABLE_EDGES: [([f32; 2], f32, f32); 12] = [
    ([-17.23, 5.54], -93.5, 2.98),
    ([-17.23, -5.54], -86.5, 2.98),
    ([-12.79, 11.28], -147.1, 5.08),
    ([-12.79, -11.28], -32.9, 5.08),
    ([-4.21, 12.8], 163.7, 4.43),
    ([-4.21, -12.8], 16.3, 4.43),
    ([4.21, 12.8], -163.7, 4.43),
    ([4.21, -12.8], -16.3, 4.43),
    ([12.79, 11.28], 147.1, 5.08),
    ([12.79, -11.28], 32.9, 5.08),
    ([17.23, 5.54], 93.5, 2.98),
    ([17.23, -5.54], 86.5, 2.98),
];

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SceneError {
    #[error("scene has no puck")]
    MissingPuck,

    #[error("scene has {0} pucks, expected one")]
    DuplicatePuck(usize),

    #[error("scene has no {} paddle", .0.colour())]
    MissingPaddle(Side),

    #[error("object {name} has invalid mass {mass}")]
    InvalidMass { name: String, mass: f32 },
}

/// Entities the game loop needs direct access to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHandles {
    pub puck: Entity,
    pub left_paddle: Entity,
    pub right_paddle: Entity,
}

impl From<SideDoc> for Side {
    fn from(side: SideDoc) -> Self {
        match side {
            SideDoc::Left => Side::Left,
            SideDoc::Right => Side::Right,
        }
    }
}

impl From<Side> for SideDoc {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => SideDoc::Left,
            Side::Right => SideDoc::Right,
        }
    }
}

impl From<BodyKindDoc> for BodyKind {
    fn from(kind: BodyKindDoc) -> Self {
        match kind {
            BodyKindDoc::Dynamic => BodyKind::Dynamic,
            BodyKindDoc::Kinematic => BodyKind::Kinematic,
            BodyKindDoc::Static => BodyKind::Static,
        }
    }
}

impl From<BodyKind> for BodyKindDoc {
    fn from(kind: BodyKind) -> Self {
        match kind {
            BodyKind::Dynamic => BodyKindDoc::Dynamic,
            BodyKind::Kinematic => BodyKindDoc::Kinematic,
            BodyKind::Static => BodyKindDoc::Static,
        }
    }
}

pub fn paddle_name(side: Side) -> &'static str {
    match side {
        Side::Left => "Paddle_red",
        Side::Right => "Paddle_blue",
    }
}

pub fn puck_doc(config: &Config) -> ObjectDoc {
    ObjectDoc::new(PUCK_NAME)
        .with(ComponentDoc::RigidBody {
            kind: BodyKindDoc::Dynamic,
            mass: config.puck_mass,
            linear_damping: config.puck_damping,
        })
        .with(ComponentDoc::Sphere {
            radius: config.puck_radius,
        })
        .with(ComponentDoc::Puck {})
        .with(ComponentDoc::Bounce {})
}

pub fn paddle_doc(config: &Config, side: Side) -> ObjectDoc {
    ObjectDoc::new(paddle_name(side))
        .with(ComponentDoc::RigidBody {
            kind: BodyKindDoc::Kinematic,
            mass: 1.0,
            linear_damping: 0.0,
        })
        .with(ComponentDoc::Sphere {
            radius: config.paddle_radius,
        })
        .with(ComponentDoc::Paddle { side: side.into() })
}

/// A wall segment with its trigger volume
pub fn edge_doc(config: &Config, position: Vec2, rotation_deg: f32, length: f32) -> ObjectDoc {
    let half_extents = [length, config.edge_thickness, config.edge_depth];
    ObjectDoc::new(EDGE_NAME)
        .at([position.x, position.y, 0.0])
        .rotated([0.0, 0.0, rotation_deg])
        .scaled(half_extents)
        .with(ComponentDoc::RigidBody {
            kind: BodyKindDoc::Static,
            mass: 1.0,
            linear_damping: 0.0,
        })
        .with(ComponentDoc::TriggerVolume { half_extents })
        .with(ComponentDoc::Edge {})
}

/// The standard table layout
pub fn default_table(config: &Config) -> SceneDoc {
    let mut doc = SceneDoc::new();
    doc.push(puck_doc(config));
    doc.push(paddle_doc(config, Side::Left).at([-5.0, 0.0, 0.0]));
    doc.push(paddle_doc(config, Side::Right).at([5.0, 0.0, 0.0]));

    for ([x, y], rotation, length) in TABLE_EDGES {
        doc.push(edge_doc(config, Vec2::new(x, y), rotation, length));
    }
    doc
}

/// Check a scene has what the game loop needs
pub fn validate_scene(doc: &SceneDoc) -> Result<(), SceneError> {
    let pucks = doc
        .objects
        .iter()
        .filter(|o| has_component(o, |c| matches!(c, ComponentDoc::Puck {})))
        .count();
    match pucks {
        0 => return Err(SceneError::MissingPuck),
        1 => {}
        n => return Err(SceneError::DuplicatePuck(n)),
    }

    for side in [Side::Left, Side::Right] {
        let wanted = SideDoc::from(side);
        let found = doc.objects.iter().any(|o| {
            has_component(o, |c| matches!(c, ComponentDoc::Paddle { side } if *side == wanted))
        });
        if !found {
            return Err(SceneError::MissingPaddle(side));
        }
    }

    for object in &doc.objects {
        for component in &object.components {
            if let ComponentDoc::RigidBody {
                kind: BodyKindDoc::Dynamic,
                mass,
                ..
            } = component
            {
                if !mass.is_finite() || *mass <= 0.0 {
                    return Err(SceneError::InvalidMass {
                        name: object.name.clone(),
                        mass: *mass,
                    });
                }
            }
        }
    }

    Ok(())
}

fn has_component(object: &ObjectDoc, pred: impl Fn(&ComponentDoc) -> bool) -> bool {
    object.components.iter().any(pred)
}

/// Spawn a single object. Bounce behaviours are left asleep.
pub fn spawn_object(world: &mut World, object: &ObjectDoc, config: &Config) -> Entity {
    let mut builder = EntityBuilder::new();
    builder.add(Name::new(object.name.as_str()));
    builder.add(
        Transform::from_euler_degrees(Vec3::from(object.position), object.rotation)
            .with_scale(Vec3::from(object.scale)),
    );

    for component in &object.components {
        match *component {
            ComponentDoc::RigidBody {
                kind,
                mass,
                linear_damping,
            } => {
                builder.add(RigidBody::new(kind.into(), mass, linear_damping));
            }
            ComponentDoc::Sphere { radius } => {
                builder.add(SphereCollider::new(radius));
            }
            ComponentDoc::TriggerVolume { half_extents } => {
                builder.add(TriggerVolume::new(Vec3::from(half_extents)));
            }
            ComponentDoc::Bounce {} => {
                builder.add(BounceBehaviour::new(config.bounce_factor, config.repel_speed));
            }
            ComponentDoc::Puck {} => {
                builder.add(Puck);
            }
            ComponentDoc::Edge {} => {
                builder.add(Edge);
            }
            ComponentDoc::Paddle { side } => {
                builder.add(Paddle::new(side.into()));
                builder.add(PaddleIntent::new());
            }
        }
    }

    world.spawn(builder.build())
}

/// Bind every bounce behaviour to its owner's rigid body
pub fn wake_behaviours(world: &mut World) {
    for (entity, (behaviour, body)) in
        world.query_mut::<(&mut BounceBehaviour, Option<&RigidBody>)>()
    {
        behaviour.awake(entity, body);
        debug!(?entity, bound = behaviour.body.is_some(), "bounce behaviour awake");
    }
}

/// Spawn a validated scene and wake its behaviours
pub fn spawn_scene(
    world: &mut World,
    doc: &SceneDoc,
    config: &Config,
) -> Result<SceneHandles, SceneError> {
    validate_scene(doc)?;

    for object in &doc.objects {
        spawn_object(world, object, config);
    }
    wake_behaviours(world);

    let puck = world
        .query::<&Puck>()
        .iter()
        .map(|(e, _)| e)
        .next()
        .ok_or(SceneError::MissingPuck)?;
    let left_paddle = find_paddle(world, Side::Left).ok_or(SceneError::MissingPaddle(Side::Left))?;
    let right_paddle =
        find_paddle(world, Side::Right).ok_or(SceneError::MissingPaddle(Side::Right))?;

    debug!(objects = doc.objects.len(), "scene spawned");
    Ok(SceneHandles {
        puck,
        left_paddle,
        right_paddle,
    })
}

pub fn find_paddle(world: &World, side: Side) -> Option<Entity> {
    world
        .query::<&Paddle>()
        .iter()
        .find(|(_e, paddle)| paddle.side == side)
        .map(|(e, _)| e)
}

/// First entity carrying `name`
pub fn find_by_name(world: &World, name: &str) -> Option<Entity> {
    let mut found: Vec<Entity> = world
        .query::<&Name>()
        .iter()
        .filter(|(_e, n)| n.as_str() == name)
        .map(|(e, _)| e)
        .collect();
    found.sort_by_key(|e| e.id());
    found.first().copied()
}

/// Describe the named objects of the world as a scene document
pub fn capture_scene(world: &World) -> SceneDoc {
    let mut objects: Vec<(Entity, Name, Transform)> = world
        .query::<(&Name, &Transform)>()
        .iter()
        .map(|(e, (name, transform))| (e, name.clone(), *transform))
        .collect();
    objects.sort_by_key(|(e, ..)| e.id());

    let mut doc = SceneDoc::new();
    for (entity, name, transform) in objects {
        let mut object = ObjectDoc::new(name.0)
            .at(transform.position.to_array())
            .rotated(transform.euler_degrees())
            .scaled(transform.scale.to_array());

        if let Ok(body) = world.get::<&RigidBody>(entity) {
            object.components.push(ComponentDoc::RigidBody {
                kind: body.kind.into(),
                mass: body.mass,
                linear_damping: body.linear_damping,
            });
        }
        if let Ok(sphere) = world.get::<&SphereCollider>(entity) {
            object.components.push(ComponentDoc::Sphere {
                radius: sphere.radius,
            });
        }
        if let Ok(volume) = world.get::<&TriggerVolume>(entity) {
            object.components.push(ComponentDoc::TriggerVolume {
                half_extents: volume.half_extents.to_array(),
            });
        }
        if world.get::<&Puck>(entity).is_ok() {
            object.components.push(ComponentDoc::Puck {});
        }
        if world.get::<&BounceBehaviour>(entity).is_ok() {
            object.components.push(ComponentDoc::Bounce {});
        }
        if world.get::<&Edge>(entity).is_ok() {
            object.components.push(ComponentDoc::Edge {});
        }
        if let Ok(paddle) = world.get::<&Paddle>(entity) {
            object.components.push(ComponentDoc::Paddle {
                side: paddle.side.into(),
            });
        }

        doc.push(object);
    }
    doc
}

/// Helper to create the puck entity
pub fn create_puck(world: &mut World, config: &Config, pos: Vec2) -> Entity {
    let entity = spawn_object(world, &puck_doc(config).at([pos.x, pos.y, 0.0]), config);
    wake_behaviours(world);
    entity
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, config: &Config, side: Side, pos: Vec2) -> Entity {
    spawn_object(world, &paddle_doc(config, side).at([pos.x, pos.y, 0.0]), config)
}

/// Helper to create a wall segment
pub fn create_edge(
    world: &mut World,
    config: &Config,
    pos: Vec2,
    rotation_deg: f32,
    length: f32,
) -> Entity {
    spawn_object(world, &edge_doc(config, pos, rotation_deg, length), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::OrientedBox;
    use approx::assert_relative_eq;
    use glam::Quat;

    fn spawn_default() -> (World, Config, SceneHandles) {
        let mut world = World::new();
        let config = Config::new();
        let handles = spawn_scene(&mut world, &default_table(&config), &config).unwrap();
        (world, config, handles)
    }

    fn edge_boxes(world: &World) -> Vec<OrientedBox> {
        world
            .query::<(&Edge, &Transform, &TriggerVolume)>()
            .iter()
            .map(|(_e, (_edge, t, v))| OrientedBox::new(t.position, t.rotation, v.half_extents))
            .collect()
    }

    #[test]
    fn test_default_table_layout() {
        let doc = default_table(&Config::new());
        assert_eq!(doc.objects.len(), 15);
        assert_eq!(
            doc.objects.iter().filter(|o| o.name == EDGE_NAME).count(),
            12
        );
        assert_eq!(doc.find("Paddle_red").unwrap().position, [-5.0, 0.0, 0.0]);
        assert_eq!(doc.find("Paddle_blue").unwrap().position, [5.0, 0.0, 0.0]);
        assert_eq!(doc.find(PUCK_NAME).unwrap().position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_spawn_scene_returns_handles() {
        let (world, _config, handles) = spawn_default();

        assert!(world.get::<&Puck>(handles.puck).is_ok());
        assert_eq!(world.get::<&Paddle>(handles.left_paddle).unwrap().side, Side::Left);
        assert_eq!(world.get::<&Paddle>(handles.right_paddle).unwrap().side, Side::Right);
        assert_eq!(world.query::<&Edge>().iter().count(), 12);
    }

    #[test]
    fn test_spawned_bounce_is_awake_on_puck_body() {
        let (world, config, handles) = spawn_default();

        let behaviour = world.get::<&BounceBehaviour>(handles.puck).unwrap();
        assert_eq!(behaviour.owner, Some(handles.puck));
        assert_eq!(behaviour.body, Some(handles.puck));
        assert_eq!(behaviour.bounce_factor, config.bounce_factor);
    }

    #[test]
    fn test_bounce_on_static_body_stays_unbound() {
        let mut world = World::new();
        let config = Config::new();
        let doc = ObjectDoc::new("Wall")
            .with(ComponentDoc::RigidBody {
                kind: BodyKindDoc::Static,
                mass: 1.0,
                linear_damping: 0.0,
            })
            .with(ComponentDoc::Bounce {});
        let wall = spawn_object(&mut world, &doc, &config);
        wake_behaviours(&mut world);

        let behaviour = world.get::<&BounceBehaviour>(wall).unwrap();
        assert_eq!(behaviour.owner, Some(wall));
        assert!(behaviour.body.is_none());
    }

    #[test]
    fn test_edge_rotation_and_extents() {
        let mut world = World::new();
        let config = Config::new();
        let edge = create_edge(&mut world, &config, Vec2::new(-12.79, 11.28), -147.1, 5.08);

        let t = world.get::<&Transform>(edge).unwrap();
        let expected = Quat::from_rotation_z((-147.1f32).to_radians());
        assert!(t.rotation.abs_diff_eq(expected, 1e-5));
        let v = world.get::<&TriggerVolume>(edge).unwrap();
        assert_eq!(v.half_extents, Vec3::new(5.08, 1.0, 3.0));
    }

    #[test]
    fn test_goal_mouths_are_open() {
        let (world, config, _handles) = spawn_default();
        let boxes = edge_boxes(&world);

        for x in [-17.6f32, 17.6] {
            let mouth = Vec3::new(x, 0.0, 0.0);
            assert!(
                boxes
                    .iter()
                    .all(|b| !b.intersects_sphere(mouth, config.puck_radius)),
                "goal at x = {x} should be open"
            );
        }
    }

    #[test]
    fn test_walls_surround_the_table() {
        let (world, config, _handles) = spawn_default();
        let boxes = edge_boxes(&world);

        // Points on the rink boundary away from the goals hit a wall
        for point in [
            Vec3::new(0.0, 13.0, 0.0),
            Vec3::new(0.0, -13.0, 0.0),
            Vec3::new(-8.5, 13.5, 0.0),
            Vec3::new(8.5, -13.5, 0.0),
            Vec3::new(-17.2, 6.0, 0.0),
            Vec3::new(17.2, -6.0, 0.0),
        ] {
            assert!(
                boxes.iter().any(|b| b.intersects_sphere(point, config.puck_radius)),
                "{point} should touch a wall"
            );
        }
    }

    #[test]
    fn test_missing_puck_is_rejected() {
        let config = Config::new();
        let mut doc = default_table(&config);
        doc.objects.retain(|o| o.name != PUCK_NAME);

        let err = spawn_scene(&mut World::new(), &doc, &config).unwrap_err();
        assert_eq!(err, SceneError::MissingPuck);
    }

    #[test]
    fn test_duplicate_puck_is_rejected() {
        let config = Config::new();
        let mut doc = default_table(&config);
        doc.push(puck_doc(&config).at([3.0, 0.0, 0.0]));

        assert_eq!(validate_scene(&doc), Err(SceneError::DuplicatePuck(2)));
    }

    #[test]
    fn test_missing_paddle_is_rejected() {
        let config = Config::new();
        let mut doc = default_table(&config);
        doc.objects.retain(|o| o.name != "Paddle_blue");

        assert_eq!(
            validate_scene(&doc),
            Err(SceneError::MissingPaddle(Side::Right))
        );
        assert_eq!(
            SceneError::MissingPaddle(Side::Right).to_string(),
            "scene has no Blue paddle"
        );
    }

    #[test]
    fn test_zero_mass_puck_is_rejected() {
        let config = Config {
            puck_mass: 0.0,
            ..Config::new()
        };
        let doc = default_table(&config);

        assert!(matches!(
            validate_scene(&doc),
            Err(SceneError::InvalidMass { ref name, .. }) if name == PUCK_NAME
        ));
    }

    #[test]
    fn test_capture_matches_spawned_scene() {
        let (world, config, _handles) = spawn_default();
        let table = default_table(&config);
        let captured = capture_scene(&world);

        assert_eq!(captured.objects.len(), table.objects.len());
        for (a, b) in table.objects.iter().zip(&captured.objects) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.position, b.position);
            assert_eq!(a.scale, b.scale);
            assert_relative_eq!(a.rotation[2], b.rotation[2], epsilon = 1e-3);
            assert_eq!(a.components.len(), b.components.len());
        }
    }

    #[test]
    fn test_find_by_name() {
        let (world, _config, handles) = spawn_default();

        assert_eq!(find_by_name(&world, PUCK_NAME), Some(handles.puck));
        assert_eq!(find_by_name(&world, "Paddle_red"), Some(handles.left_paddle));
        assert!(find_by_name(&world, EDGE_NAME).is_some());
        assert_eq!(find_by_name(&world, "Goalkeeper"), None);
    }
}
