use aurora_script::{
    find_nearest, find_nearest_by_tag, param_handle, param_object, param_object_mut, to_pc,
    FunctionContext, Type, Variable,
};
use log::debug;

use crate::game::Game;

// Only the object that triggered the running script is known; no history
// of earlier entries or exits is kept.
pub(super) fn get_entering_object(_game: &mut Game, ctx: &mut FunctionContext) {
    let triggerer = ctx.triggerer();
    ctx.set_return(triggerer);
}

pub(super) fn get_exiting_object(_game: &mut Game, ctx: &mut FunctionContext) {
    let triggerer = ctx.triggerer();
    ctx.set_return(triggerer);
}

pub(super) fn get_is_object_valid(game: &mut Game, ctx: &mut FunctionContext) {
    let valid = param_object(game.objects(), ctx, 0).is_some();
    ctx.set_return(valid);
}

pub(super) fn get_is_pc(game: &mut Game, ctx: &mut FunctionContext) {
    let is_pc = to_pc(param_object(game.objects(), ctx, 0)).is_some();
    ctx.set_return(is_pc);
}

pub(super) fn get_tag(game: &mut Game, ctx: &mut FunctionContext) {
    let tag = param_object(game.objects(), ctx, 0)
        .map(|object| object.tag().to_string())
        .unwrap_or_default();
    ctx.set_return(tag);
}

fn get_local(game: &Game, ctx: &mut FunctionContext, ty: Type) {
    let value = param_object(game.objects(), ctx, 0)
        .map(|object| object.locals().get(ctx.param(1).as_str(), ty))
        .unwrap_or_else(|| Variable::zero(ty));
    ctx.set_return(value);
}

fn set_local(game: &mut Game, ctx: &FunctionContext) {
    let name = ctx.param(1).as_str().to_string();
    let value = ctx.param(2).clone();
    let Some(object) = param_object_mut(game.objects_mut(), ctx, 0) else {
        debug!("{}: no object to store {name:?} on", ctx.name());
        return;
    };
    object.locals_mut().set(name, value);
}

pub(super) fn get_local_int(game: &mut Game, ctx: &mut FunctionContext) {
    get_local(game, ctx, Type::Int);
}

pub(super) fn get_local_float(game: &mut Game, ctx: &mut FunctionContext) {
    get_local(game, ctx, Type::Float);
}

pub(super) fn get_local_string(game: &mut Game, ctx: &mut FunctionContext) {
    get_local(game, ctx, Type::String);
}

pub(super) fn get_local_object(game: &mut Game, ctx: &mut FunctionContext) {
    get_local(game, ctx, Type::Object);
}

pub(super) fn set_local_int(game: &mut Game, ctx: &mut FunctionContext) {
    set_local(game, ctx);
}

pub(super) fn set_local_float(game: &mut Game, ctx: &mut FunctionContext) {
    set_local(game, ctx);
}

pub(super) fn set_local_string(game: &mut Game, ctx: &mut FunctionContext) {
    set_local(game, ctx);
}

pub(super) fn set_local_object(game: &mut Game, ctx: &mut FunctionContext) {
    set_local(game, ctx);
}

/// `GetNearestObject(type_mask, target, nth)`.
pub(super) fn get_nearest_object(game: &mut Game, ctx: &mut FunctionContext) {
    let type_mask = ctx.param(0).as_int() as u32;
    let nth = ctx.param(2).as_int();
    let nearest = param_handle(game.objects(), ctx, 1)
        .and_then(|target| find_nearest(game.objects(), type_mask, target, nth));
    ctx.set_return(nearest);
}

/// `GetNearestObjectByTag(tag, target, nth)`.
pub(super) fn get_nearest_object_by_tag(game: &mut Game, ctx: &mut FunctionContext) {
    let nth = ctx.param(2).as_int();
    let nearest = param_handle(game.objects(), ctx, 1).and_then(|target| {
        find_nearest_by_tag(game.objects(), ctx.param(0).as_str(), target, nth)
    });
    ctx.set_return(nearest);
}

#[cfg(test)]
mod tests {
    use super::super::{call_named, forest_game};
    use crate::game::Game;
    use aurora_script::{ObjectHandle, Variable, OBJECT_TYPE_ALL};

    fn handle(game: &Game, tag: &str) -> ObjectHandle {
        game.module().find_by_tag(tag).expect("tag placed")
    }

    fn call(game: &mut Game, name: &str, params: Vec<Variable>, caller: ObjectHandle) -> Variable {
        call_named(game, name, params, caller, ObjectHandle::INVALID)
    }

    #[test]
    fn nearest_object_stays_in_the_callers_area() {
        let mut game = forest_game();
        let a = handle(&game, "A");

        let nearest = call(&mut game, "GetNearestObject", vec![], a);
        assert_eq!(nearest, Variable::Object(handle(&game, "B")));

        let second = call(
            &mut game,
            "GetNearestObject",
            vec![Variable::Int(OBJECT_TYPE_ALL), Variable::Object(a), Variable::Int(2)],
            a,
        );
        assert_eq!(second, Variable::Object(handle(&game, "D")));

        let third = call(
            &mut game,
            "GetNearestObject",
            vec![Variable::Int(OBJECT_TYPE_ALL), Variable::Object(a), Variable::Int(3)],
            a,
        );
        assert_eq!(third, Variable::Object(ObjectHandle::INVALID));
    }

    #[test]
    fn nearest_object_honours_the_type_mask() {
        let mut game = forest_game();
        let a = handle(&game, "A");
        // placeable is type 7, bit 6
        let placeables = call(
            &mut game,
            "GetNearestObject",
            vec![Variable::Int(1 << 6)],
            a,
        );
        assert_eq!(placeables, Variable::Object(handle(&game, "D")));

        let creatures = call(
            &mut game,
            "GetNearestObject",
            vec![Variable::Int(1), Variable::Object(a), Variable::Int(2)],
            a,
        );
        assert_eq!(creatures, Variable::Object(ObjectHandle::INVALID));
    }

    #[test]
    fn nearest_by_tag_needs_a_tag_and_a_target() {
        let mut game = forest_game();
        let a = handle(&game, "A");
        let b = handle(&game, "B");

        let found = call(
            &mut game,
            "GetNearestObjectByTag",
            vec![Variable::from("D")],
            a,
        );
        assert_eq!(found, Variable::Object(handle(&game, "D")));

        let other_area = call(
            &mut game,
            "GetNearestObjectByTag",
            vec![Variable::from("C"), Variable::Object(b)],
            a,
        );
        assert_eq!(other_area, Variable::Object(ObjectHandle::INVALID));

        let empty = call(&mut game, "GetNearestObjectByTag", vec![Variable::from("")], a);
        assert_eq!(empty, Variable::Object(ObjectHandle::INVALID));

        let no_caller = call(
            &mut game,
            "GetNearestObjectByTag",
            vec![Variable::from("D")],
            ObjectHandle::INVALID,
        );
        assert_eq!(no_caller, Variable::Object(ObjectHandle::INVALID));
    }

    #[test]
    fn locals_round_trip_through_self() {
        let mut game = forest_game();
        let a = handle(&game, "A");
        let d = handle(&game, "D");

        call(
            &mut game,
            "SetLocalInt",
            vec![Variable::Object(ObjectHandle::SELF), Variable::from("gold"), Variable::Int(40)],
            a,
        );
        call(
            &mut game,
            "SetLocalObject",
            vec![Variable::Object(a), Variable::from("gold"), Variable::Object(d)],
            a,
        );

        let gold = call(
            &mut game,
            "GetLocalInt",
            vec![Variable::Object(a), Variable::from("gold")],
            a,
        );
        assert_eq!(gold, Variable::Int(40));
        let chest = call(
            &mut game,
            "GetLocalObject",
            vec![Variable::Object(ObjectHandle::SELF), Variable::from("gold")],
            a,
        );
        assert_eq!(chest, Variable::Object(d));
        let missing = call(
            &mut game,
            "GetLocalString",
            vec![Variable::Object(a), Variable::from("gold")],
            a,
        );
        assert_eq!(missing, Variable::from(""));
        let invalid = call(
            &mut game,
            "GetLocalFloat",
            vec![Variable::Object(ObjectHandle::INVALID), Variable::from("gold")],
            a,
        );
        assert_eq!(invalid, Variable::Float(0.0));
    }

    #[test]
    fn stored_self_names_the_object_that_stored_it() {
        let mut game = forest_game();
        let a = handle(&game, "A");
        let b = handle(&game, "B");
        let d = handle(&game, "D");

        call(
            &mut game,
            "SetLocalObject",
            vec![
                Variable::Object(d),
                Variable::from("owner"),
                Variable::Object(ObjectHandle::SELF),
            ],
            a,
        );

        let owner = call(
            &mut game,
            "GetLocalObject",
            vec![Variable::Object(d), Variable::from("owner")],
            b,
        );
        assert_eq!(owner, Variable::Object(a));
        let tag = call(&mut game, "GetTag", vec![owner], b);
        assert_eq!(tag, Variable::from("A"));
    }

    #[test]
    fn stale_handles_are_invalid() {
        let mut game = forest_game();
        let a = handle(&game, "A");
        let b = handle(&game, "B");

        let valid = call(&mut game, "GetIsObjectValid", vec![Variable::Object(b)], a);
        assert_eq!(valid, Variable::Int(1));
        assert!(game.destroy_object(b));

        let valid = call(&mut game, "GetIsObjectValid", vec![Variable::Object(b)], a);
        assert_eq!(valid, Variable::Int(0));
        let tag = call(&mut game, "GetTag", vec![Variable::Object(b)], a);
        assert_eq!(tag, Variable::from(""));
    }

    #[test]
    fn identity_queries() {
        let mut game = forest_game();
        let a = handle(&game, "A");
        let b = handle(&game, "B");

        assert_eq!(
            call(&mut game, "GetTag", vec![Variable::Object(ObjectHandle::SELF)], b),
            Variable::from("B")
        );
        assert_eq!(
            call(&mut game, "GetIsPC", vec![Variable::Object(a)], a),
            Variable::Int(1)
        );
        assert_eq!(
            call(&mut game, "GetIsPC", vec![Variable::Object(b)], a),
            Variable::Int(0)
        );
        let module = game.module().handle();
        assert_eq!(
            call(&mut game, "GetModule", vec![], a),
            Variable::Object(module)
        );
    }

    #[test]
    fn entering_and_exiting_report_the_triggerer() {
        let mut game = forest_game();
        let a = handle(&game, "A");
        let b = handle(&game, "B");
        for name in ["GetEnteringObject", "GetExitingObject"] {
            let result = call_named(&mut game, name, vec![], b, a);
            assert_eq!(result, Variable::Object(a));
        }
    }
}
