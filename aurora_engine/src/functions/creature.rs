use aurora_script::{param_object, Ability, FunctionContext, ScriptObject};

use crate::game::Game;

/// `GetAbilityScore(creature, ability, base)`; 0 for anything that is not a
/// creature or an unknown ability.
pub(super) fn get_ability_score(game: &mut Game, ctx: &mut FunctionContext) {
    let ability = Ability::from_index(ctx.param(1).as_int());
    let base = ctx.param(2).as_int() != 0;
    let creature = param_object(game.objects(), ctx, 0).and_then(ScriptObject::creature);

    let score = match (creature, ability) {
        (Some(creature), Some(ability)) if base => creature.base_ability(ability),
        (Some(creature), Some(ability)) => creature.ability(ability),
        _ => 0,
    };
    ctx.set_return(score);
}
