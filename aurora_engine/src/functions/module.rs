use aurora_script::FunctionContext;

use crate::game::Game;

pub(super) fn get_module(game: &mut Game, ctx: &mut FunctionContext) {
    ctx.set_return(game.module().handle());
}
