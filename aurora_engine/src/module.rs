use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use aurora_script::{Creature, ObjectArena, ObjectHandle, ObjectType, ScriptObject, Variable};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("area {0:?} is defined twice")]
    DuplicateArea(String),
    #[error("object {object:?} references unknown area {area:?}")]
    UnknownArea { object: String, area: String },
    #[error("object {object:?} cannot be declared with type {kind:?}; use the areas list")]
    ReservedType { object: String, kind: ObjectType },
    #[error("local {name:?} on object {object:?} does not fit a script int: {value}")]
    IntOutOfRange {
        object: String,
        name: String,
        value: serde_json::Number,
    },
}

#[derive(Debug, Deserialize)]
pub struct ModuleDefinition {
    pub name: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub areas: Vec<AreaDefinition>,
    #[serde(default)]
    pub objects: Vec<ObjectDefinition>,
}

#[derive(Debug, Deserialize)]
pub struct AreaDefinition {
    pub tag: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ObjectDefinition {
    pub tag: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub conversation: Option<String>,
    #[serde(default)]
    pub creature: Option<CreatureDefinition>,
    #[serde(default)]
    pub locals: BTreeMap<String, LocalValue>,
}

#[derive(Debug, Deserialize)]
pub struct CreatureDefinition {
    #[serde(default)]
    pub pc: bool,
    #[serde(default = "default_abilities")]
    pub abilities: [i32; 6],
}

fn default_abilities() -> [i32; 6] {
    [10; 6]
}

/// Initial local variable value; the JSON number form picks the type.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LocalValue {
    Number(serde_json::Number),
    String(String),
}

impl LocalValue {
    /// Integers must fit a script int; numbers with a fraction or exponent
    /// become floats.
    fn into_variable(self, object: &str, name: &str) -> Result<Variable, ModuleError> {
        let number = match self {
            LocalValue::String(value) => return Ok(Variable::String(value)),
            LocalValue::Number(number) => number,
        };
        if number.is_f64() {
            let value = number.as_f64().unwrap_or_default();
            return Ok(Variable::Float(value as f32));
        }
        number
            .as_i64()
            .and_then(|value| i32::try_from(value).ok())
            .map(Variable::Int)
            .ok_or_else(|| ModuleError::IntOutOfRange {
                object: object.to_string(),
                name: name.to_string(),
                value: number,
            })
    }
}

/// The loaded game world: the module object, its areas, and every object
/// placed in them, all owned by a single arena.
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    handle: ObjectHandle,
    objects: ObjectArena,
    areas: BTreeMap<String, ObjectHandle>,
}

impl Module {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        let name = name.into();
        let mut objects = ObjectArena::new();
        let handle =
            objects.insert(ScriptObject::new(ObjectType::Module, tag).with_name(name.clone()));
        Self {
            name,
            handle,
            objects,
            areas: BTreeMap::new(),
        }
    }

    pub fn from_definition(definition: ModuleDefinition) -> Result<Self, ModuleError> {
        let ModuleDefinition {
            name,
            tag,
            areas,
            objects,
        } = definition;
        let tag = tag.unwrap_or_else(|| name.clone());
        let mut module = Module::new(name, tag);

        for area in areas {
            if module.areas.contains_key(&area.tag) {
                return Err(ModuleError::DuplicateArea(area.tag));
            }
            module.add_area(area.tag, area.name);
        }

        for object in objects {
            if matches!(object.object_type, ObjectType::Area | ObjectType::Module) {
                return Err(ModuleError::ReservedType {
                    object: object.tag,
                    kind: object.object_type,
                });
            }
            let area = match object.area.as_deref() {
                Some(area_tag) => Some(module.area(area_tag).ok_or_else(|| {
                    ModuleError::UnknownArea {
                        object: object.tag.clone(),
                        area: area_tag.to_string(),
                    }
                })?),
                None => None,
            };

            let mut script_object = ScriptObject::new(object.object_type, object.tag)
                .with_position(object.position.into());
            if let Some(name) = object.name {
                script_object = script_object.with_name(name);
            }
            if let Some(area) = area {
                script_object = script_object.with_area(area);
            }
            if let Some(conversation) = object.conversation {
                script_object = script_object.with_conversation(conversation);
            }
            if let Some(creature) = object.creature {
                script_object =
                    script_object.with_creature(Creature::new(creature.pc, creature.abilities));
            }
            for (name, value) in object.locals {
                let value = value.into_variable(script_object.tag(), &name)?;
                script_object.locals_mut().set(name, value);
            }
            module.add_object(script_object);
        }

        Ok(module)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading module definition {}", path.display()))?;
        let definition: ModuleDefinition = serde_json::from_str(&raw)
            .with_context(|| format!("parsing module definition {}", path.display()))?;
        let module = Module::from_definition(definition)
            .with_context(|| format!("building module from {}", path.display()))?;
        Ok(module)
    }

    pub fn add_area(&mut self, tag: impl Into<String>, name: Option<String>) -> ObjectHandle {
        let tag = tag.into();
        let mut area = ScriptObject::new(ObjectType::Area, tag.clone());
        if let Some(name) = name {
            area = area.with_name(name);
        }
        let handle = self.objects.insert(area);
        self.areas.insert(tag, handle);
        handle
    }

    pub fn add_object(&mut self, object: ScriptObject) -> ObjectHandle {
        self.objects.insert(object)
    }

    pub fn remove_object(&mut self, handle: ObjectHandle) -> Option<ScriptObject> {
        if handle == self.handle || self.areas.values().any(|area| *area == handle) {
            return None;
        }
        self.objects.remove(handle)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The module object itself.
    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    pub fn area(&self, tag: &str) -> Option<ObjectHandle> {
        self.areas.get(tag).copied()
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// First live object carrying `tag`, in arena order.
    pub fn find_by_tag(&self, tag: &str) -> Option<ObjectHandle> {
        self.objects
            .iter()
            .find(|object| object.tag() == tag)
            .map(ScriptObject::handle)
    }

    pub fn objects(&self) -> &ObjectArena {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectArena {
        &mut self.objects
    }
}
