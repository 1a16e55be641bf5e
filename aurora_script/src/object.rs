use std::fmt;

use crate::locals::LocalVariables;
use crate::types::{ObjectType, Vec3};
use crate::variable::ScriptState;

/// Non-owning reference to an object living in an [`ObjectArena`].
///
/// A handle stays valid only while the slot it points at still holds the
/// same generation; once the object is removed every outstanding handle
/// resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle {
    index: u32,
    generation: u32,
}

impl ObjectHandle {
    /// The null object.
    pub const INVALID: ObjectHandle = ObjectHandle {
        index: u32::MAX,
        generation: u32::MAX,
    };

    /// Placeholder that resolves to the invoking object.
    pub const SELF: ObjectHandle = ObjectHandle {
        index: u32::MAX - 1,
        generation: u32::MAX,
    };

    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }

    pub fn is_invalid(self) -> bool {
        self == Self::INVALID
    }

    pub fn is_self(self) -> bool {
        self == Self::SELF
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            f.write_str("OBJECT_INVALID")
        } else if self.is_self() {
            f.write_str("OBJECT_SELF")
        } else {
            write!(f, "#{}.{}", self.index, self.generation)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Ability::Strength),
            1 => Some(Ability::Dexterity),
            2 => Some(Ability::Constitution),
            3 => Some(Ability::Intelligence),
            4 => Some(Ability::Wisdom),
            5 => Some(Ability::Charisma),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    pub is_pc: bool,
    /// Base scores, indexed by [`Ability`].
    pub abilities: [i32; 6],
    /// Per-ability modifiers applied on top of the base score.
    pub ability_bonuses: [i32; 6],
}

impl Creature {
    pub fn new(is_pc: bool, abilities: [i32; 6]) -> Self {
        Self {
            is_pc,
            abilities,
            ability_bonuses: [0; 6],
        }
    }

    pub fn base_ability(&self, ability: Ability) -> i32 {
        self.abilities[ability.slot()]
    }

    pub fn ability(&self, ability: Ability) -> i32 {
        self.abilities[ability.slot()] + self.ability_bonuses[ability.slot()]
    }
}

impl Default for Creature {
    fn default() -> Self {
        Creature::new(false, [10; 6])
    }
}

/// An engine object as seen by scripts.
#[derive(Debug, Clone)]
pub struct ScriptObject {
    handle: ObjectHandle,
    object_type: ObjectType,
    tag: String,
    name: String,
    area: Option<ObjectHandle>,
    position: Vec3,
    conversation: String,
    creature: Option<Creature>,
    locals: LocalVariables,
    actions: Vec<ScriptState>,
}

impl ScriptObject {
    pub fn new(object_type: ObjectType, tag: impl Into<String>) -> Self {
        Self {
            handle: ObjectHandle::INVALID,
            object_type,
            tag: tag.into(),
            name: String::new(),
            area: None,
            position: Vec3::ZERO,
            conversation: String::new(),
            creature: None,
            locals: LocalVariables::new(),
            actions: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_area(mut self, area: ObjectHandle) -> Self {
        self.area = Some(area);
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_conversation(mut self, resref: impl Into<String>) -> Self {
        self.conversation = resref.into();
        self
    }

    pub fn with_creature(mut self, creature: Creature) -> Self {
        self.creature = Some(creature);
        self
    }

    /// Handle assigned when the object was inserted into its arena.
    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn name(&self) -> &str {
        if self.name.is_empty() {
            &self.tag
        } else {
            &self.name
        }
    }

    pub fn area(&self) -> Option<ObjectHandle> {
        self.area
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn conversation(&self) -> &str {
        &self.conversation
    }

    pub fn creature(&self) -> Option<&Creature> {
        self.creature.as_ref()
    }

    pub fn creature_mut(&mut self) -> Option<&mut Creature> {
        self.creature.as_mut()
    }

    pub fn locals(&self) -> &LocalVariables {
        &self.locals
    }

    pub fn locals_mut(&mut self) -> &mut LocalVariables {
        &mut self.locals
    }

    pub fn queued_actions(&self) -> &[ScriptState] {
        &self.actions
    }

    pub fn queue_action(&mut self, action: ScriptState) {
        self.actions.push(action);
    }

    /// Empties the action queue, oldest first.
    pub fn take_queued_actions(&mut self) -> Vec<ScriptState> {
        std::mem::take(&mut self.actions)
    }

    pub fn distance_to(&self, other: &ScriptObject) -> f32 {
        self.position.distance(other.position)
    }
}

/// Forward-only cursor over live objects.
///
/// The cursor borrows its container, so nothing can be destroyed while an
/// enumeration is in flight. Dropping it releases the enumeration.
pub struct ObjectSearch<'a> {
    inner: Box<dyn Iterator<Item = &'a ScriptObject> + 'a>,
}

impl<'a> ObjectSearch<'a> {
    pub fn new<I>(objects: I) -> Self
    where
        I: Iterator<Item = &'a ScriptObject> + 'a,
    {
        Self {
            inner: Box::new(objects),
        }
    }
}

impl<'a> Iterator for ObjectSearch<'a> {
    type Item = &'a ScriptObject;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// World-side contract the resolver and the spatial queries build on.
pub trait ObjectContainer {
    fn resolve(&self, handle: ObjectHandle) -> Option<&ScriptObject>;

    fn resolve_mut(&mut self, handle: ObjectHandle) -> Option<&mut ScriptObject>;

    /// Cursor over every live object, in container order.
    fn find_objects(&self) -> ObjectSearch<'_>;

    /// Cursor over the live objects whose tag matches exactly.
    fn find_objects_by_tag(&self, tag: &str) -> ObjectSearch<'_>;
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    object: Option<ScriptObject>,
}

/// Single owner of every script object, addressed by generation-checked
/// handles.
#[derive(Debug, Default, Clone)]
pub struct ObjectArena {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    live: usize,
}

impl ObjectArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mut object: ScriptObject) -> ObjectHandle {
        let handle = match self.free_list.pop() {
            Some(index) => ObjectHandle {
                index,
                generation: self.slots[index as usize].generation,
            },
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    object: None,
                });
                ObjectHandle {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        };
        object.handle = handle;
        self.slots[handle.index as usize].object = Some(object);
        self.live += 1;
        handle
    }

    /// Destroys the object; every handle to it becomes stale.
    pub fn remove(&mut self, handle: ObjectHandle) -> Option<ScriptObject> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let object = slot.object.take()?;
        slot.generation = next_generation(slot.generation);
        self.free_list.push(handle.index);
        self.live -= 1;
        Some(object)
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&ScriptObject> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.object.as_ref()
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut ScriptObject> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.object.as_mut()
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptObject> + '_ {
        self.slots.iter().filter_map(|slot| slot.object.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ScriptObject> + '_ {
        self.slots.iter_mut().filter_map(|slot| slot.object.as_mut())
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

fn next_generation(generation: u32) -> u32 {
    // u32::MAX is reserved for the sentinel handles.
    match generation.wrapping_add(1) {
        u32::MAX => 0,
        next => next,
    }
}

impl ObjectContainer for ObjectArena {
    fn resolve(&self, handle: ObjectHandle) -> Option<&ScriptObject> {
        self.get(handle)
    }

    fn resolve_mut(&mut self, handle: ObjectHandle) -> Option<&mut ScriptObject> {
        self.get_mut(handle)
    }

    fn find_objects(&self) -> ObjectSearch<'_> {
        ObjectSearch::new(self.iter())
    }

    fn find_objects_by_tag(&self, tag: &str) -> ObjectSearch<'_> {
        let tag = tag.to_string();
        ObjectSearch::new(self.iter().filter(move |object| object.tag() == tag))
    }
}
