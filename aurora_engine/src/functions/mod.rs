//! Engine functions callable from compiled scripts.
//!
//! The function tables live in [`tables`]; the implementations are grouped
//! by the part of the engine they touch.

mod action;
mod conversation;
mod creature;
mod math;
mod module;
mod object;
mod tables;

use aurora_script::{Dispatcher, FunctionRegistry, RegistryError, ScriptObject};
use rand::Rng;

use crate::game::Game;

/// Merges the static tables into the registry shared by every script.
pub fn build_registry() -> Result<FunctionRegistry<Game>, RegistryError> {
    FunctionRegistry::from_tables(
        tables::FUNCTION_POINTERS,
        tables::FUNCTION_SIGNATURES,
        tables::FUNCTION_DEFAULTS,
    )
}

pub fn build_dispatcher() -> Result<Dispatcher<Game>, RegistryError> {
    Ok(Dispatcher::new(build_registry()?))
}

/// Sum of `n` rolls in `[min, max]`.
pub(crate) fn random<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32, n: i32) -> i32 {
    if n < 1 {
        return 0;
    }
    if max <= min {
        return min.saturating_mul(n);
    }
    (0..n).fold(0i32, |total, _| {
        total.saturating_add(rng.gen_range(min..=max))
    })
}

/// Quoted tag for diagnostics, `0` for a missing object.
pub(crate) fn format_tag(object: Option<&ScriptObject>) -> String {
    match object {
        Some(object) => format!("\"{}\"", object.tag()),
        None => "0".to_string(),
    }
}

/// Dispatches `name` the way the interpreter would, for native tests.
#[cfg(test)]
pub(crate) fn call_named(
    game: &mut Game,
    name: &str,
    params: Vec<aurora_script::Variable>,
    caller: aurora_script::ObjectHandle,
    triggerer: aurora_script::ObjectHandle,
) -> aurora_script::Variable {
    let dispatcher = build_dispatcher().expect("function tables agree");
    let id = dispatcher
        .registry()
        .find_by_name(name)
        .map(|record| record.id())
        .expect("function registered");
    dispatcher.invoke(game, id, params, caller, triggerer)
}

/// Two areas: A, B and the chest D share the forest, C waits in town.
#[cfg(test)]
pub(crate) fn forest_game() -> Game {
    use aurora_script::{Creature, ObjectType, Vec3};

    let mut module = crate::module::Module::new("Forest", "mod_forest");
    let forest = module.add_area("forest", None);
    let town = module.add_area("town", None);
    module.add_object(
        ScriptObject::new(ObjectType::Creature, "A")
            .with_area(forest)
            .with_conversation("a_dialog")
            .with_creature(Creature::new(true, [16, 12, 14, 10, 8, 13])),
    );
    module.add_object(
        ScriptObject::new(ObjectType::Creature, "B")
            .with_area(forest)
            .with_position(Vec3::new(5.0, 0.0, 0.0))
            .with_conversation("b_dialog")
            .with_creature(Creature::default()),
    );
    module.add_object(
        ScriptObject::new(ObjectType::Creature, "C")
            .with_area(town)
            .with_position(Vec3::new(1.0, 0.0, 0.0))
            .with_creature(Creature::default()),
    );
    module.add_object(
        ScriptObject::new(ObjectType::Placeable, "D")
            .with_area(forest)
            .with_position(Vec3::new(8.0, 0.0, 0.0)),
    );
    Game::new(module, 5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_script::{ObjectType, Type};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn tables_are_consistent() {
        let registry = build_registry().expect("function tables agree");
        assert_eq!(registry.len(), tables::FUNCTION_POINTERS.len());
        assert_eq!(registry.len(), tables::FUNCTION_SIGNATURES.len());

        for pointer in tables::FUNCTION_POINTERS {
            let record = registry.resolve(pointer.id).expect("pointer id registered");
            assert_eq!(record.name(), pointer.name);
        }
        for signature in tables::FUNCTION_SIGNATURES {
            let record = registry.resolve(signature.id).expect("signature id registered");
            assert_eq!(record.return_type(), signature.return_type);
            assert_eq!(record.parameters(), signature.parameters);
        }
        for defaults in tables::FUNCTION_DEFAULTS {
            let record = registry.resolve(defaults.id).expect("defaults id registered");
            assert_eq!(record.defaults().len(), defaults.defaults.len());
        }
    }

    #[test]
    fn well_known_functions_have_expected_shapes() {
        let registry = build_registry().expect("function tables agree");

        let nearest = registry.find_by_name("GetNearestObject").expect("GetNearestObject");
        assert_eq!(nearest.id(), 227);
        assert_eq!(nearest.return_type(), Type::Object);
        assert_eq!(nearest.required_parameters(), 0);

        let creature = registry
            .find_by_name("GetNearestCreature")
            .expect("GetNearestCreature");
        assert_eq!(creature.parameters().len(), 8);
        assert_eq!(creature.defaults().len(), 6);
        assert!(!creature.is_implemented());
    }

    #[test]
    fn random_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let roll = random(&mut rng, 1, 6, 3);
            assert!((3..=18).contains(&roll));
        }
        assert_eq!(random(&mut rng, 1, 6, 0), 0);
        assert_eq!(random(&mut rng, 0, -1, 1), 0);
        assert_eq!(random(&mut rng, 4, 4, 2), 8);
    }

    #[test]
    fn tags_are_quoted_for_diagnostics() {
        let chest = ScriptObject::new(ObjectType::Placeable, "chest");
        assert_eq!(format_tag(Some(&chest)), "\"chest\"");
        assert_eq!(format_tag(None), "0");
    }
}
