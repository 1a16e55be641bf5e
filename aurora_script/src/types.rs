use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(self, other: Vec3) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Vec3::new(value[0], value[1], value[2])
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Value types understood by the script/native boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    Void,
    Int,
    Float,
    String,
    Object,
    Vector,
    /// Deferred action captured by `action` parameters.
    ScriptState,
}

impl Type {
    pub fn as_str(self) -> &'static str {
        match self {
            Type::Void => "void",
            Type::Int => "int",
            Type::Float => "float",
            Type::String => "string",
            Type::Object => "object",
            Type::Vector => "vector",
            Type::ScriptState => "action",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ceiling for type tags that take part in spatial searches.
pub const OBJECT_TYPE_MAX: u32 = 10;

/// Mask matching every searchable object type.
pub const OBJECT_TYPE_ALL: i32 = 32767;

/// Object kinds, numbered the way scripts see them (1-based, `None` = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    None,
    Creature,
    Item,
    Trigger,
    Door,
    AreaOfEffect,
    Waypoint,
    Placeable,
    Store,
    Encounter,
    Sound,
    Area,
    Module,
}

impl ObjectType {
    pub fn tag(self) -> u32 {
        match self {
            ObjectType::None => 0,
            ObjectType::Creature => 1,
            ObjectType::Item => 2,
            ObjectType::Trigger => 3,
            ObjectType::Door => 4,
            ObjectType::AreaOfEffect => 5,
            ObjectType::Waypoint => 6,
            ObjectType::Placeable => 7,
            ObjectType::Store => 8,
            ObjectType::Encounter => 9,
            ObjectType::Sound => 11,
            ObjectType::Area => 12,
            ObjectType::Module => 13,
        }
    }

    /// Bit this type occupies in a script type mask, if it has one.
    pub fn mask_bit(self) -> Option<u32> {
        let tag = self.tag();
        if tag == 0 || tag >= OBJECT_TYPE_MAX {
            return None;
        }
        Some(1 << (tag - 1))
    }

    pub fn matches_mask(self, mask: u32) -> bool {
        self.mask_bit().map(|bit| mask & bit != 0).unwrap_or(false)
    }
}
