//! Turns object parameters into live objects.
//!
//! A parameter that names a destroyed or never-existing object resolves to
//! `None`; natives treat that as "nothing to do".

use crate::context::FunctionContext;
use crate::object::{ObjectContainer, ObjectHandle, ScriptObject};
use crate::types::ObjectType;

/// Handle of the live object named by parameter `index`.
pub fn param_handle<C>(container: &C, ctx: &FunctionContext, index: usize) -> Option<ObjectHandle>
where
    C: ObjectContainer + ?Sized,
{
    param_object(container, ctx, index).map(ScriptObject::handle)
}

pub fn param_object<'a, C>(
    container: &'a C,
    ctx: &FunctionContext,
    index: usize,
) -> Option<&'a ScriptObject>
where
    C: ObjectContainer + ?Sized,
{
    container.resolve(ctx.param(index).as_object())
}

pub fn param_object_mut<'a, C>(
    container: &'a mut C,
    ctx: &FunctionContext,
    index: usize,
) -> Option<&'a mut ScriptObject>
where
    C: ObjectContainer + ?Sized,
{
    container.resolve_mut(ctx.param(index).as_object())
}

/// Narrows to an object that lives inside an area.
pub fn to_object(object: Option<&ScriptObject>) -> Option<&ScriptObject> {
    object.filter(|object| !matches!(object.object_type(), ObjectType::Area | ObjectType::Module))
}

/// Narrows to a player-controlled creature.
pub fn to_pc(object: Option<&ScriptObject>) -> Option<&ScriptObject> {
    to_object(object).filter(|object| object.creature().map(|c| c.is_pc).unwrap_or(false))
}
