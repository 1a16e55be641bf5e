use std::fmt;

use serde::{Deserialize, Serialize};

use crate::object::ObjectHandle;
use crate::types::{Type, Vec3};

/// A deferred action captured by the interpreter for `action` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptState {
    pub script: String,
    pub offset: u32,
}

impl ScriptState {
    pub fn new(script: impl Into<String>, offset: u32) -> Self {
        Self {
            script: script.into(),
            offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

/// One typed value crossing the script/native boundary.
///
/// Reading through an accessor of the wrong type yields that type's zero
/// value instead of failing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Variable {
    #[default]
    Void,
    Int(i32),
    Float(f32),
    String(String),
    Object(ObjectHandle),
    Vector(Vec3),
    Action(ScriptState),
}

impl Variable {
    pub fn zero(ty: Type) -> Self {
        match ty {
            Type::Void => Variable::Void,
            Type::Int => Variable::Int(0),
            Type::Float => Variable::Float(0.0),
            Type::String => Variable::String(String::new()),
            Type::Object => Variable::Object(ObjectHandle::INVALID),
            Type::Vector => Variable::Vector(Vec3::ZERO),
            Type::ScriptState => Variable::Action(ScriptState::default()),
        }
    }

    pub fn var_type(&self) -> Type {
        match self {
            Variable::Void => Type::Void,
            Variable::Int(_) => Type::Int,
            Variable::Float(_) => Type::Float,
            Variable::String(_) => Type::String,
            Variable::Object(_) => Type::Object,
            Variable::Vector(_) => Type::Vector,
            Variable::Action(_) => Type::ScriptState,
        }
    }

    pub fn as_int(&self) -> i32 {
        match self {
            Variable::Int(value) => *value,
            _ => 0,
        }
    }

    pub fn as_float(&self) -> f32 {
        match self {
            Variable::Float(value) => *value,
            _ => 0.0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Variable::String(value) => value.as_str(),
            _ => "",
        }
    }

    pub fn as_object(&self) -> ObjectHandle {
        match self {
            Variable::Object(handle) => *handle,
            _ => ObjectHandle::INVALID,
        }
    }

    pub fn as_vector(&self) -> Vec3 {
        match self {
            Variable::Vector(value) => *value,
            _ => Vec3::ZERO,
        }
    }

    pub fn as_action(&self) -> Option<&ScriptState> {
        match self {
            Variable::Action(state) => Some(state),
            _ => None,
        }
    }
}

impl From<i32> for Variable {
    fn from(value: i32) -> Self {
        Variable::Int(value)
    }
}

impl From<bool> for Variable {
    fn from(value: bool) -> Self {
        Variable::Int(i32::from(value))
    }
}

impl From<f32> for Variable {
    fn from(value: f32) -> Self {
        Variable::Float(value)
    }
}

impl From<String> for Variable {
    fn from(value: String) -> Self {
        Variable::String(value)
    }
}

impl From<&str> for Variable {
    fn from(value: &str) -> Self {
        Variable::String(value.to_string())
    }
}

impl From<ObjectHandle> for Variable {
    fn from(value: ObjectHandle) -> Self {
        Variable::Object(value)
    }
}

impl From<Option<ObjectHandle>> for Variable {
    fn from(value: Option<ObjectHandle>) -> Self {
        Variable::Object(value.unwrap_or(ObjectHandle::INVALID))
    }
}

impl From<Vec3> for Variable {
    fn from(value: Vec3) -> Self {
        Variable::Vector(value)
    }
}

impl From<ScriptState> for Variable {
    fn from(value: ScriptState) -> Self {
        Variable::Action(value)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Void => f.write_str("void"),
            Variable::Int(value) => write!(f, "{value}"),
            Variable::Float(value) => write!(f, "{value}"),
            Variable::String(value) => write!(f, "{value:?}"),
            Variable::Object(handle) => write!(f, "{handle}"),
            Variable::Vector(value) => write!(f, "{value}"),
            Variable::Action(state) => write!(f, "<{}@{}>", state.script, state.offset),
        }
    }
}

/// Const-constructible default for a trailing optional parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Int(i32),
    Float(f32),
    String(&'static str),
    Object(ObjectHandle),
    Vector(Vec3),
}

impl DefaultValue {
    pub fn var_type(self) -> Type {
        match self {
            DefaultValue::Int(_) => Type::Int,
            DefaultValue::Float(_) => Type::Float,
            DefaultValue::String(_) => Type::String,
            DefaultValue::Object(_) => Type::Object,
            DefaultValue::Vector(_) => Type::Vector,
        }
    }

    pub fn to_variable(self) -> Variable {
        match self {
            DefaultValue::Int(value) => Variable::Int(value),
            DefaultValue::Float(value) => Variable::Float(value),
            DefaultValue::String(value) => Variable::String(value.to_string()),
            DefaultValue::Object(handle) => Variable::Object(handle),
            DefaultValue::Vector(value) => Variable::Vector(value),
        }
    }
}
