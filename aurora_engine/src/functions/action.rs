use aurora_script::FunctionContext;
use log::debug;

use super::format_tag;
use crate::game::Game;

/// Queues the deferred action on the object running the script.
pub(super) fn action_do_command(game: &mut Game, ctx: &mut FunctionContext) {
    let Some(action) = ctx.param(0).as_action().cloned() else {
        return;
    };
    if action.is_empty() {
        debug!("{}: empty action ignored", ctx.name());
        return;
    }
    let Some(caller) = game.objects_mut().get_mut(ctx.caller()) else {
        debug!("{}: no caller to queue {} on", ctx.name(), action.script);
        return;
    };
    caller.queue_action(action.clone());
    let event = format!("action.queue {} {}", format_tag(Some(&*caller)), action.script);
    game.log_event(event);
}
