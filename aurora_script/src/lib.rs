//! Native-function binding layer between compiled Aurora scripts and the
//! engine.
//!
//! Scripts reach the engine through numbered functions. The
//! [`FunctionRegistry`] maps those ids to native implementations and their
//! signatures, the [`Dispatcher`] marshals each call into a
//! [`FunctionContext`], and the object helpers ([`resolver`], [`search`])
//! give natives safe access to the objects living in an [`ObjectArena`].

pub mod context;
pub mod dispatch;
pub mod locals;
pub mod object;
pub mod registry;
pub mod resolver;
pub mod search;
pub mod types;
pub mod variable;

pub use context::FunctionContext;
pub use dispatch::{format_params, unimplemented_function, Dispatcher};
pub use locals::LocalVariables;
pub use object::{
    Ability, Creature, ObjectArena, ObjectContainer, ObjectHandle, ObjectSearch, ScriptObject,
};
pub use registry::{
    FunctionDefaults, FunctionPointer, FunctionRecord, FunctionRegistry, FunctionSignature,
    NativeFn, RegistryError, MAX_DEFAULTS, MAX_PARAMETERS,
};
pub use resolver::{param_handle, param_object, param_object_mut, to_object, to_pc};
pub use search::{find_nearest, find_nearest_by_tag};
pub use types::{ObjectType, Type, Vec3, OBJECT_TYPE_ALL, OBJECT_TYPE_MAX};
pub use variable::{DefaultValue, ScriptState, Variable};
