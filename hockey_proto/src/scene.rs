use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ProtoError;

// ============================================================================
// Scene Document
// ============================================================================

/// A whole table layout: every object with its transform and components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDoc {
    pub objects: Vec<ObjectDoc>,
}

/// One object in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDoc {
    pub name: String,
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler angles in degrees, applied X then Y then Z
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    #[serde(default)]
    pub components: Vec<ComponentDoc>,
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKindDoc {
    Dynamic,
    Kinematic,
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideDoc {
    Left,
    Right,
}

/// Components that can be attached to an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentDoc {
    RigidBody {
        kind: BodyKindDoc,
        #[serde(default = "unit_mass")]
        mass: f32,
        #[serde(default)]
        linear_damping: f32,
    },
    Sphere {
        radius: f32,
    },
    TriggerVolume {
        half_extents: [f32; 3],
    },
    /// Bounce behaviour carries no configuration
    Bounce {},
    Puck {},
    Edge {},
    Paddle {
        side: SideDoc,
    },
}

fn unit_mass() -> f32 {
    1.0
}

impl ObjectDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: unit_scale(),
            components: Vec::new(),
        }
    }

    pub fn at(mut self, position: [f32; 3]) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn scaled(mut self, scale: [f32; 3]) -> Self {
        self.scale = scale;
        self
    }

    pub fn with(mut self, component: ComponentDoc) -> Self {
        self.components.push(component);
        self
    }
}

impl SceneDoc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, object: ObjectDoc) {
        self.objects.push(object);
    }

    pub fn find(&self, name: &str) -> Option<&ObjectDoc> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn to_json(&self) -> Result<String, ProtoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ProtoError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a scene document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProtoError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ProtoError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Write a scene document to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProtoError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|source| ProtoError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
