//! Pointer, signature and default tables for the engine functions.
//!
//! Ids follow the script compiler's numbering. A `None` pointer keeps the
//! function callable; calls fall through to the unimplemented handler.

use aurora_script::{
    DefaultValue, FunctionDefaults, FunctionPointer, FunctionSignature, ObjectHandle, Type,
    OBJECT_TYPE_ALL,
};

use super::{action, conversation, creature, math, module, object};
use crate::game::Game;

const FALSE: DefaultValue = DefaultValue::Int(0);
const OBJECT_SELF: DefaultValue = DefaultValue::Object(ObjectHandle::SELF);
const OBJECT_INVALID: DefaultValue = DefaultValue::Object(ObjectHandle::INVALID);

const fn pointer(
    id: u32,
    name: &'static str,
    func: Option<fn(&mut Game, &mut aurora_script::FunctionContext)>,
) -> FunctionPointer<Game> {
    FunctionPointer { id, name, func }
}

const fn signature(id: u32, return_type: Type, parameters: &'static [Type]) -> FunctionSignature {
    FunctionSignature {
        id,
        return_type,
        parameters,
    }
}

const fn defaults(id: u32, defaults: &'static [DefaultValue]) -> FunctionDefaults {
    FunctionDefaults { id, defaults }
}

pub(super) static FUNCTION_POINTERS: &[FunctionPointer<Game>] = &[
    pointer(0, "Random", Some(math::random)),
    pointer(1, "PrintString", None),
    pointer(24, "GetArea", None),
    pointer(25, "GetEnteringObject", Some(object::get_entering_object)),
    pointer(26, "GetExitingObject", Some(object::get_exiting_object)),
    pointer(27, "GetPosition", None),
    pointer(38, "GetNearestCreature", None),
    pointer(41, "GetDistanceToObject", None),
    pointer(42, "GetIsObjectValid", Some(object::get_is_object_valid)),
    pointer(51, "GetLocalInt", Some(object::get_local_int)),
    pointer(52, "GetLocalFloat", Some(object::get_local_float)),
    pointer(53, "GetLocalString", Some(object::get_local_string)),
    pointer(54, "GetLocalObject", Some(object::get_local_object)),
    pointer(55, "SetLocalInt", Some(object::set_local_int)),
    pointer(56, "SetLocalFloat", Some(object::set_local_float)),
    pointer(57, "SetLocalString", Some(object::set_local_string)),
    pointer(58, "SetLocalObject", Some(object::set_local_object)),
    pointer(67, "fabs", Some(math::fabs)),
    pointer(68, "cos", Some(math::cos)),
    pointer(69, "sin", Some(math::sin)),
    pointer(70, "tan", Some(math::tan)),
    pointer(71, "acos", Some(math::acos)),
    pointer(72, "asin", Some(math::asin)),
    pointer(73, "atan", Some(math::atan)),
    pointer(74, "log", Some(math::log)),
    pointer(75, "pow", Some(math::pow)),
    pointer(76, "sqrt", Some(math::sqrt)),
    pointer(77, "abs", Some(math::abs)),
    pointer(95, "d2", Some(math::d2)),
    pointer(96, "d3", Some(math::d3)),
    pointer(97, "d4", Some(math::d4)),
    pointer(98, "d6", Some(math::d6)),
    pointer(99, "d8", Some(math::d8)),
    pointer(100, "d10", Some(math::d10)),
    pointer(101, "d12", Some(math::d12)),
    pointer(102, "d20", Some(math::d20)),
    pointer(103, "d100", Some(math::d100)),
    pointer(139, "GetAbilityScore", Some(creature::get_ability_score)),
    pointer(168, "GetTag", Some(object::get_tag)),
    pointer(217, "GetIsPC", Some(object::get_is_pc)),
    pointer(227, "GetNearestObject", Some(object::get_nearest_object)),
    pointer(229, "GetNearestObjectByTag", Some(object::get_nearest_object_by_tag)),
    pointer(230, "IntToFloat", Some(math::int_to_float)),
    pointer(231, "FloatToInt", Some(math::float_to_int)),
    pointer(238, "GetPCSpeaker", Some(conversation::get_pc_speaker)),
    pointer(242, "GetModule", Some(module::get_module)),
    pointer(255, "BeginConversation", Some(conversation::begin_conversation)),
    pointer(294, "ActionDoCommand", Some(action::action_do_command)),
    pointer(
        417,
        "SpeakOneLinerConversation",
        Some(conversation::speak_one_liner_conversation),
    ),
];

pub(super) static FUNCTION_SIGNATURES: &[FunctionSignature] = &[
    signature(0, Type::Int, &[Type::Int]),
    signature(1, Type::Void, &[Type::String]),
    signature(24, Type::Object, &[Type::Object]),
    signature(25, Type::Object, &[]),
    signature(26, Type::Object, &[]),
    signature(27, Type::Vector, &[Type::Object]),
    signature(
        38,
        Type::Object,
        &[
            Type::Int,
            Type::Int,
            Type::Object,
            Type::Int,
            Type::Int,
            Type::Int,
            Type::Int,
            Type::Int,
        ],
    ),
    signature(41, Type::Float, &[Type::Object]),
    signature(42, Type::Int, &[Type::Object]),
    signature(51, Type::Int, &[Type::Object, Type::String]),
    signature(52, Type::Float, &[Type::Object, Type::String]),
    signature(53, Type::String, &[Type::Object, Type::String]),
    signature(54, Type::Object, &[Type::Object, Type::String]),
    signature(55, Type::Void, &[Type::Object, Type::String, Type::Int]),
    signature(56, Type::Void, &[Type::Object, Type::String, Type::Float]),
    signature(57, Type::Void, &[Type::Object, Type::String, Type::String]),
    signature(58, Type::Void, &[Type::Object, Type::String, Type::Object]),
    signature(67, Type::Float, &[Type::Float]),
    signature(68, Type::Float, &[Type::Float]),
    signature(69, Type::Float, &[Type::Float]),
    signature(70, Type::Float, &[Type::Float]),
    signature(71, Type::Float, &[Type::Float]),
    signature(72, Type::Float, &[Type::Float]),
    signature(73, Type::Float, &[Type::Float]),
    signature(74, Type::Float, &[Type::Float]),
    signature(75, Type::Float, &[Type::Float, Type::Float]),
    signature(76, Type::Float, &[Type::Float]),
    signature(77, Type::Int, &[Type::Int]),
    signature(95, Type::Int, &[Type::Int]),
    signature(96, Type::Int, &[Type::Int]),
    signature(97, Type::Int, &[Type::Int]),
    signature(98, Type::Int, &[Type::Int]),
    signature(99, Type::Int, &[Type::Int]),
    signature(100, Type::Int, &[Type::Int]),
    signature(101, Type::Int, &[Type::Int]),
    signature(102, Type::Int, &[Type::Int]),
    signature(103, Type::Int, &[Type::Int]),
    signature(139, Type::Int, &[Type::Object, Type::Int, Type::Int]),
    signature(168, Type::String, &[Type::Object]),
    signature(217, Type::Int, &[Type::Object]),
    signature(227, Type::Object, &[Type::Int, Type::Object, Type::Int]),
    signature(229, Type::Object, &[Type::String, Type::Object, Type::Int]),
    signature(230, Type::Float, &[Type::Int]),
    signature(231, Type::Int, &[Type::Float]),
    signature(238, Type::Object, &[]),
    signature(242, Type::Object, &[]),
    signature(255, Type::Int, &[Type::String, Type::Object]),
    signature(294, Type::Void, &[Type::ScriptState]),
    signature(417, Type::Void, &[Type::String, Type::Object]),
];

pub(super) static FUNCTION_DEFAULTS: &[FunctionDefaults] = &[
    defaults(
        38,
        &[
            OBJECT_SELF,
            DefaultValue::Int(1),
            DefaultValue::Int(-1),
            DefaultValue::Int(-1),
            DefaultValue::Int(-1),
            DefaultValue::Int(-1),
        ],
    ),
    defaults(95, &[DefaultValue::Int(1)]),
    defaults(96, &[DefaultValue::Int(1)]),
    defaults(97, &[DefaultValue::Int(1)]),
    defaults(98, &[DefaultValue::Int(1)]),
    defaults(99, &[DefaultValue::Int(1)]),
    defaults(100, &[DefaultValue::Int(1)]),
    defaults(101, &[DefaultValue::Int(1)]),
    defaults(102, &[DefaultValue::Int(1)]),
    defaults(103, &[DefaultValue::Int(1)]),
    defaults(139, &[FALSE]),
    defaults(
        227,
        &[
            DefaultValue::Int(OBJECT_TYPE_ALL),
            OBJECT_SELF,
            DefaultValue::Int(1),
        ],
    ),
    defaults(229, &[OBJECT_SELF, DefaultValue::Int(1)]),
    defaults(255, &[DefaultValue::String(""), OBJECT_INVALID]),
    defaults(417, &[DefaultValue::String(""), OBJECT_INVALID]),
];
