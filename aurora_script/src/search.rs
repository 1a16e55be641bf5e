//! Nearest-object queries scoped to the reference object's area.
//!
//! Each query runs one pass over a fresh cursor. Candidates are ordered by
//! distance with a stable sort, so objects at equal distance keep the
//! container's enumeration order.

use crate::object::{ObjectContainer, ObjectHandle, ScriptObject};
use crate::resolver::to_object;

/// The `nth` nearest object (1-based) whose type is set in `type_mask`.
pub fn find_nearest<C>(
    container: &C,
    type_mask: u32,
    reference: ObjectHandle,
    nth: i32,
) -> Option<ObjectHandle>
where
    C: ObjectContainer + ?Sized,
{
    let target = to_object(container.resolve(reference))?;
    let search = container.find_objects();
    nearest_in(target, search, nth, |object| {
        object.object_type().matches_mask(type_mask)
    })
}

/// The `nth` nearest object (1-based) carrying exactly `tag`.
pub fn find_nearest_by_tag<C>(
    container: &C,
    tag: &str,
    reference: ObjectHandle,
    nth: i32,
) -> Option<ObjectHandle>
where
    C: ObjectContainer + ?Sized,
{
    if tag.is_empty() {
        return None;
    }
    let target = to_object(container.resolve(reference))?;
    let search = container.find_objects_by_tag(tag);
    nearest_in(target, search, nth, |_| true)
}

fn nearest_in<'a, I, F>(
    target: &ScriptObject,
    search: I,
    nth: i32,
    accept: F,
) -> Option<ObjectHandle>
where
    I: Iterator<Item = &'a ScriptObject>,
    F: Fn(&ScriptObject) -> bool,
{
    let mut objects: Vec<(f32, ObjectHandle)> = search
        .filter(|candidate| is_neighbour(target, *candidate))
        .filter(|candidate| accept(*candidate))
        .map(|candidate| (target.distance_to(candidate), candidate.handle()))
        .collect();
    objects.sort_by(|a, b| a.0.total_cmp(&b.0));

    let offset = usize::try_from(nth.saturating_sub(1)).unwrap_or(0);
    objects.get(offset).map(|(_, handle)| *handle)
}

/// Another in-world object sharing the target's area with a searchable type.
fn is_neighbour(target: &ScriptObject, candidate: &ScriptObject) -> bool {
    let Some(candidate) = to_object(Some(candidate)) else {
        return false;
    };
    if candidate.handle() == target.handle() || candidate.area() != target.area() {
        return false;
    }
    candidate.object_type().mask_bit().is_some()
}
