mod conversation;

use aurora_script::{ObjectArena, ObjectHandle, ScriptState};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use conversation::Conversation;
use conversation::{ConversationRuntime, ConversationRuntimeAdapter};

use crate::module::Module;

/// Engine state handed to every native function call.
pub struct Game {
    module: Module,
    rng: StdRng,
    conversation: ConversationRuntime,
    events: Vec<String>,
}

impl Game {
    pub fn new(module: Module, seed: u64) -> Self {
        Self {
            module,
            rng: StdRng::seed_from_u64(seed),
            conversation: ConversationRuntime::new(),
            events: Vec::new(),
        }
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn objects(&self) -> &ObjectArena {
        self.module.objects()
    }

    pub fn objects_mut(&mut self) -> &mut ObjectArena {
        self.module.objects_mut()
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn log_event(&mut self, event: impl Into<String>) {
        self.events.push(event.into());
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.conversation.active()
    }

    pub fn one_liner_count(&self) -> usize {
        self.conversation.one_liner_count()
    }

    pub(crate) fn conversation_runtime(&mut self) -> ConversationRuntimeAdapter<'_> {
        ConversationRuntimeAdapter::new(&mut self.conversation, &mut self.events)
    }

    /// Hands over every queued action in arena order and empties the queues.
    pub fn take_queued_actions(&mut self) -> Vec<(ObjectHandle, ScriptState)> {
        self.objects_mut()
            .iter_mut()
            .flat_map(|object| {
                let handle = object.handle();
                object
                    .take_queued_actions()
                    .into_iter()
                    .map(move |action| (handle, action))
            })
            .collect()
    }

    /// Destroys an in-world object. Outstanding handles to it go stale.
    pub fn destroy_object(&mut self, handle: ObjectHandle) -> bool {
        let Some(object) = self.module.remove_object(handle) else {
            return false;
        };
        self.conversation_runtime().end_involving(handle);
        self.log_event(format!("object.destroy {}", object.tag()));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_script::{Creature, ObjectType, ScriptObject};

    fn game() -> (Game, ObjectHandle, ObjectHandle) {
        let mut module = Module::new("Test", "mod_test");
        let area = module.add_area("hall", None);
        let owner = module.add_object(
            ScriptObject::new(ObjectType::Creature, "innkeeper")
                .with_area(area)
                .with_creature(Creature::default()),
        );
        let pc = module.add_object(
            ScriptObject::new(ObjectType::Creature, "player")
                .with_area(area)
                .with_creature(Creature::new(true, [10; 6])),
        );
        (Game::new(module, 7), owner, pc)
    }

    #[test]
    fn conversations_are_exclusive_and_logged() {
        let (mut game, owner, pc) = game();
        assert!(game
            .conversation_runtime()
            .begin("inn", (owner, "innkeeper"), (pc, "player")));
        assert!(!game
            .conversation_runtime()
            .begin("inn2", (owner, "innkeeper"), (pc, "player")));
        assert_eq!(
            game.active_conversation().map(|c| c.dialog.as_str()),
            Some("inn")
        );
        assert!(game
            .events()
            .iter()
            .any(|event| event == "conversation.begin inn innkeeper -> player"));
        assert!(game
            .events()
            .iter()
            .any(|event| event.starts_with("conversation.busy inn")));
    }

    #[test]
    fn destroying_a_participant_ends_the_conversation() {
        let (mut game, owner, pc) = game();
        game.conversation_runtime()
            .begin("inn", (owner, "innkeeper"), (pc, "player"));
        assert!(game.destroy_object(owner));
        assert!(game.active_conversation().is_none());
        assert!(game.objects().get(owner).is_none());
        assert!(!game.destroy_object(owner));
        let events = game.events();
        assert_eq!(events[events.len() - 2], "conversation.end inn");
        assert_eq!(events[events.len() - 1], "object.destroy innkeeper");
    }

    #[test]
    fn queued_actions_are_handed_over_once() {
        let (mut game, owner, pc) = game();
        for (handle, script) in [(pc, "k_wave"), (owner, "k_bow"), (pc, "k_sit")] {
            game.objects_mut()
                .get_mut(handle)
                .expect("participant alive")
                .queue_action(ScriptState::new(script, 0));
        }

        let taken = game.take_queued_actions();
        assert_eq!(
            taken,
            vec![
                (owner, ScriptState::new("k_bow", 0)),
                (pc, ScriptState::new("k_wave", 0)),
                (pc, ScriptState::new("k_sit", 0)),
            ]
        );
        assert!(game.take_queued_actions().is_empty());
    }

    #[test]
    fn module_object_cannot_be_destroyed() {
        let (mut game, _, _) = game();
        let module = game.module().handle();
        assert!(!game.destroy_object(module));
    }
}
