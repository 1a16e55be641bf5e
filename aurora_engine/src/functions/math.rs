use aurora_script::FunctionContext;
use log::debug;

use super::random as roll_dice;
use crate::game::Game;

pub(super) fn random(game: &mut Game, ctx: &mut FunctionContext) {
    let max = ctx.param(0).as_int();
    if max <= 0 {
        ctx.set_return(0);
        return;
    }
    ctx.set_return(roll_dice(game.rng(), 0, max - 1, 1));
}

fn unary(ctx: &mut FunctionContext, op: fn(f32) -> f32) {
    let value = ctx.param(0).as_float();
    ctx.set_return(op(value));
}

pub(super) fn fabs(_game: &mut Game, ctx: &mut FunctionContext) {
    unary(ctx, f32::abs);
}

pub(super) fn cos(_game: &mut Game, ctx: &mut FunctionContext) {
    unary(ctx, f32::cos);
}

pub(super) fn sin(_game: &mut Game, ctx: &mut FunctionContext) {
    unary(ctx, f32::sin);
}

pub(super) fn tan(_game: &mut Game, ctx: &mut FunctionContext) {
    unary(ctx, f32::tan);
}

pub(super) fn acos(_game: &mut Game, ctx: &mut FunctionContext) {
    unary(ctx, f32::acos);
}

pub(super) fn asin(_game: &mut Game, ctx: &mut FunctionContext) {
    unary(ctx, f32::asin);
}

pub(super) fn atan(_game: &mut Game, ctx: &mut FunctionContext) {
    unary(ctx, f32::atan);
}

/// Natural logarithm.
pub(super) fn log(_game: &mut Game, ctx: &mut FunctionContext) {
    unary(ctx, f32::ln);
}

pub(super) fn pow(_game: &mut Game, ctx: &mut FunctionContext) {
    let base = ctx.param(0).as_float();
    let exponent = ctx.param(1).as_float();
    ctx.set_return(base.powf(exponent));
}

pub(super) fn sqrt(_game: &mut Game, ctx: &mut FunctionContext) {
    unary(ctx, f32::sqrt);
}

pub(super) fn abs(_game: &mut Game, ctx: &mut FunctionContext) {
    let value = ctx.param(0).as_int();
    ctx.set_return(value.wrapping_abs());
}

pub(super) fn int_to_float(_game: &mut Game, ctx: &mut FunctionContext) {
    let value = ctx.param(0).as_int();
    ctx.set_return(value as f32);
}

/// Truncates toward zero; out-of-range values saturate.
pub(super) fn float_to_int(_game: &mut Game, ctx: &mut FunctionContext) {
    let value = ctx.param(0).as_float();
    ctx.set_return(value as i32);
}

/// Most dice a single roll call will throw.
const MAX_DICE: i32 = 1000;

fn dice(game: &mut Game, ctx: &mut FunctionContext, sides: i32) {
    let requested = ctx.param(0).as_int();
    let count = requested.clamp(1, MAX_DICE);
    if requested > MAX_DICE {
        debug!("{}: clamping {requested} dice to {MAX_DICE}", ctx.name());
    }
    let total = roll_dice(game.rng(), 1, sides, count);
    ctx.set_return(total);
}

pub(super) fn d2(game: &mut Game, ctx: &mut FunctionContext) {
    dice(game, ctx, 2);
}

pub(super) fn d3(game: &mut Game, ctx: &mut FunctionContext) {
    dice(game, ctx, 3);
}

pub(super) fn d4(game: &mut Game, ctx: &mut FunctionContext) {
    dice(game, ctx, 4);
}

pub(super) fn d6(game: &mut Game, ctx: &mut FunctionContext) {
    dice(game, ctx, 6);
}

pub(super) fn d8(game: &mut Game, ctx: &mut FunctionContext) {
    dice(game, ctx, 8);
}

pub(super) fn d10(game: &mut Game, ctx: &mut FunctionContext) {
    dice(game, ctx, 10);
}

pub(super) fn d12(game: &mut Game, ctx: &mut FunctionContext) {
    dice(game, ctx, 12);
}

pub(super) fn d20(game: &mut Game, ctx: &mut FunctionContext) {
    dice(game, ctx, 20);
}

pub(super) fn d100(game: &mut Game, ctx: &mut FunctionContext) {
    dice(game, ctx, 100);
}
