use aurora_script::{param_object, to_object, to_pc, FunctionContext};
use log::debug;

use crate::game::Game;

/// Falls back to the speaker's own dialog when `requested` is empty.
fn dialog_for(requested: &str, own: &str) -> Option<String> {
    let dialog = if requested.is_empty() { own } else { requested };
    (!dialog.is_empty()).then(|| dialog.to_string())
}

pub(super) fn speak_one_liner_conversation(game: &mut Game, ctx: &mut FunctionContext) {
    let Some(speaker) = to_object(game.objects().get(ctx.caller())) else {
        return;
    };
    let Some(dialog) = dialog_for(ctx.param(0).as_str(), speaker.conversation()) else {
        debug!("{}: {} has no dialog", ctx.name(), speaker.tag());
        return;
    };
    let speaker = speaker.tag().to_string();
    let token = param_object(game.objects(), ctx, 1).map(|object| object.tag().to_string());

    game.conversation_runtime()
        .speak_one_liner(&dialog, &speaker, token.as_deref());
}

/// Starts a dialog between the caller and a player character: the object
/// passed in, or the one that triggered the script. Returns 1 on success.
pub(super) fn begin_conversation(game: &mut Game, ctx: &mut FunctionContext) {
    let objects = game.objects();
    let Some(owner) = to_object(objects.get(ctx.caller())) else {
        return;
    };
    let pc = if ctx.param(1).as_object().is_invalid() {
        objects.get(ctx.triggerer())
    } else {
        param_object(objects, ctx, 1)
    };
    let Some(pc) = to_pc(pc) else {
        debug!("{}: {} has no player to talk to", ctx.name(), owner.tag());
        return;
    };
    let Some(dialog) = dialog_for(ctx.param(0).as_str(), owner.conversation()) else {
        debug!("{}: {} has no dialog", ctx.name(), owner.tag());
        return;
    };
    let owner = (owner.handle(), owner.tag().to_string());
    let pc = (pc.handle(), pc.tag().to_string());

    let started = game
        .conversation_runtime()
        .begin(&dialog, (owner.0, &owner.1), (pc.0, &pc.1));
    ctx.set_return(started);
}

/// The player character in the running conversation, if still around.
pub(super) fn get_pc_speaker(game: &mut Game, ctx: &mut FunctionContext) {
    let speaker = game
        .active_conversation()
        .map(|conversation| conversation.pc)
        .filter(|pc| game.objects().contains(*pc));
    ctx.set_return(speaker);
}

#[cfg(test)]
mod tests {
    use super::super::{call_named, forest_game};
    use crate::game::Game;
    use aurora_script::{ObjectHandle, Variable};

    fn handle(game: &Game, tag: &str) -> ObjectHandle {
        game.module().find_by_tag(tag).expect("tag placed")
    }

    #[test]
    fn conversation_with_the_triggering_pc() {
        let mut game = forest_game();
        let a = handle(&game, "A");
        let b = handle(&game, "B");

        let nobody = call_named(&mut game, "GetPCSpeaker", vec![], b, a);
        assert_eq!(nobody, Variable::Object(ObjectHandle::INVALID));

        let started = call_named(&mut game, "BeginConversation", vec![], b, a);
        assert_eq!(started, Variable::Int(1));
        assert_eq!(
            game.events().last().map(String::as_str),
            Some("conversation.begin b_dialog B -> A")
        );
        let speaker = call_named(&mut game, "GetPCSpeaker", vec![], b, a);
        assert_eq!(speaker, Variable::Object(a));

        let again = call_named(&mut game, "BeginConversation", vec![], b, a);
        assert_eq!(again, Variable::Int(0));

        game.destroy_object(b);
        let after = call_named(&mut game, "GetPCSpeaker", vec![], a, a);
        assert_eq!(after, Variable::Object(ObjectHandle::INVALID));
    }

    #[test]
    fn conversation_requires_a_player_and_a_dialog() {
        let mut game = forest_game();
        let a = handle(&game, "A");
        let b = handle(&game, "B");
        let c = handle(&game, "C");
        let d = handle(&game, "D");

        let npc = vec![Variable::from(""), Variable::Object(c)];
        let refused = call_named(&mut game, "BeginConversation", npc, b, a);
        assert_eq!(refused, Variable::Int(0));

        let silent = call_named(&mut game, "BeginConversation", vec![], d, a);
        assert_eq!(silent, Variable::Int(0));

        let explicit = vec![Variable::from("chest_talk"), Variable::Object(a)];
        let started = call_named(&mut game, "BeginConversation", explicit, d, c);
        assert_eq!(started, Variable::Int(1));
        assert_eq!(
            game.active_conversation().map(|c| c.dialog.as_str()),
            Some("chest_talk")
        );
    }

    #[test]
    fn one_liners_are_counted_and_logged() {
        let mut game = forest_game();
        let a = handle(&game, "A");
        let b = handle(&game, "B");
        let d = handle(&game, "D");

        call_named(&mut game, "SpeakOneLinerConversation", vec![], b, a);
        call_named(
            &mut game,
            "SpeakOneLinerConversation",
            vec![Variable::from("greeting"), Variable::Object(a)],
            b,
            a,
        );
        call_named(&mut game, "SpeakOneLinerConversation", vec![], d, a);

        assert_eq!(game.one_liner_count(), 2);
        assert_eq!(
            game.events(),
            &[
                "conversation.oneliner b_dialog B".to_string(),
                "conversation.oneliner greeting B token=A".to_string(),
            ]
        );
        assert!(game.active_conversation().is_none());
    }
}
