//! Replays a JSON call script against the engine functions.
//!
//! A call script stands in for compiled bytecode at the native boundary:
//! each step either calls an engine function with typed arguments or
//! destroys an object, and every call goes through [`Dispatcher::invoke`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use aurora_script::{Dispatcher, ObjectHandle, ScriptState, Type, Variable, Vec3};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::Game;

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("unknown engine function {0:?}")]
    UnknownFunction(String),
    #[error("no object tagged {0:?}")]
    UnknownTag(String),
    #[error("${0} is not bound by an earlier call")]
    UnboundName(String),
    #[error("${name} holds a {found} value, not an object")]
    NotAnObject { name: String, found: Type },
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallScript {
    /// Object running the script; `OBJECT_INVALID` when absent.
    #[serde(default)]
    pub caller: Option<String>,
    #[serde(default)]
    pub triggerer: Option<String>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Destroy { destroy: String },
    Call(Call),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Call {
    pub function: FunctionRef,
    #[serde(default)]
    pub args: Vec<Arg>,
    /// Stores the result for `$name` object arguments in later steps.
    #[serde(default)]
    pub bind: Option<String>,
    #[serde(default)]
    pub caller: Option<String>,
    #[serde(default)]
    pub triggerer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FunctionRef {
    Id(u32),
    Name(String),
}

/// One argument, written as `{"int": 3}`, `{"object": "B"}` and so on.
///
/// Object arguments name a tag, `OBJECT_SELF`, `OBJECT_INVALID`, or a
/// `$name` bound by an earlier call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arg {
    Int(i32),
    Float(f32),
    String(String),
    Object(String),
    Vector([f32; 3]),
    Action {
        script: String,
        #[serde(default)]
        offset: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportValue {
    Void,
    Int(i32),
    Float(f32),
    String(String),
    /// Tag of a live object, otherwise the handle itself.
    Object(String),
    Vector([f32; 3]),
    Action { script: String, offset: u32 },
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportValue::Void => f.write_str("void"),
            ReportValue::Int(value) => write!(f, "{value}"),
            ReportValue::Float(value) => write!(f, "{value:.3}"),
            ReportValue::String(value) => write!(f, "{value:?}"),
            ReportValue::Object(object) => write!(f, "object {object}"),
            ReportValue::Vector(value) => write!(f, "{}", Vec3::from(*value)),
            ReportValue::Action { script, offset } => write!(f, "action {script}@{offset}"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CallResult {
    pub function: String,
    pub id: u32,
    pub result: ReportValue,
}

/// An action left queued on an object when the script finished.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueuedAction {
    pub object: String,
    pub script: String,
    pub offset: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub module: String,
    pub results: Vec<CallResult>,
    pub events: Vec<String>,
    pub actions: Vec<QueuedAction>,
    pub coverage: BTreeMap<String, u64>,
}

impl CallScript {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading call script {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing call script {}", path.display()))
    }
}

/// Runs every step in order and collects what the calls returned.
pub fn run_script(
    game: &mut Game,
    dispatcher: &Dispatcher<Game>,
    script: &CallScript,
) -> Result<RunReport, ScriptError> {
    let mut runner = ScriptRunner {
        dispatcher,
        bindings: HashMap::new(),
        results: Vec::new(),
        coverage: BTreeMap::new(),
    };
    let caller = runner.resolve_optional(game, script.caller.as_deref(), ObjectHandle::INVALID)?;
    let triggerer =
        runner.resolve_optional(game, script.triggerer.as_deref(), ObjectHandle::INVALID)?;

    for step in &script.steps {
        match step {
            Step::Destroy { destroy } => {
                let handle = runner.resolve_object(game, destroy, caller)?;
                if !game.destroy_object(handle) {
                    warn!("cannot destroy {destroy} ({handle})");
                }
            }
            Step::Call(call) => runner.call(game, call, caller, triggerer)?,
        }
    }

    let actions = game
        .take_queued_actions()
        .into_iter()
        .map(|(handle, action)| QueuedAction {
            object: game
                .objects()
                .get(handle)
                .map(|object| object.tag().to_string())
                .unwrap_or_else(|| handle.to_string()),
            script: action.script,
            offset: action.offset,
        })
        .collect();

    Ok(RunReport {
        module: game.module().name().to_string(),
        results: runner.results,
        events: game.events().to_vec(),
        actions,
        coverage: runner.coverage,
    })
}

struct ScriptRunner<'a> {
    dispatcher: &'a Dispatcher<Game>,
    bindings: HashMap<String, Variable>,
    results: Vec<CallResult>,
    coverage: BTreeMap<String, u64>,
}

impl ScriptRunner<'_> {
    fn call(
        &mut self,
        game: &mut Game,
        call: &Call,
        caller: ObjectHandle,
        triggerer: ObjectHandle,
    ) -> Result<(), ScriptError> {
        let caller = self.resolve_optional(game, call.caller.as_deref(), caller)?;
        let triggerer = self.resolve_optional(game, call.triggerer.as_deref(), triggerer)?;
        let (id, function) = self.function(&call.function)?;
        let params = call
            .args
            .iter()
            .map(|arg| self.argument(game, arg))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("script step {function} ({id}) as {caller}");
        let result = self.dispatcher.invoke(game, id, params, caller, triggerer);

        *self.coverage.entry(function.clone()).or_default() += 1;
        self.results.push(CallResult {
            function,
            id,
            result: report_value(game, &result),
        });
        if let Some(name) = call.bind.as_ref() {
            self.bindings.insert(name.clone(), result);
        }
        Ok(())
    }

    /// Unknown ids are passed through so the dispatcher can answer them.
    fn function(&self, function: &FunctionRef) -> Result<(u32, String), ScriptError> {
        let registry = self.dispatcher.registry();
        match function {
            FunctionRef::Id(id) => {
                let name = registry
                    .resolve(*id)
                    .map(|record| record.name().to_string())
                    .unwrap_or_else(|| format!("#{id}"));
                Ok((*id, name))
            }
            FunctionRef::Name(name) => registry
                .find_by_name(name)
                .map(|record| (record.id(), name.clone()))
                .ok_or_else(|| ScriptError::UnknownFunction(name.clone())),
        }
    }

    fn argument(&self, game: &Game, arg: &Arg) -> Result<Variable, ScriptError> {
        Ok(match arg {
            Arg::Int(value) => Variable::Int(*value),
            Arg::Float(value) => Variable::Float(*value),
            Arg::String(value) => Variable::String(value.clone()),
            Arg::Object(reference) => {
                Variable::Object(self.resolve_object(game, reference, ObjectHandle::SELF)?)
            }
            Arg::Vector(value) => Variable::Vector(Vec3::from(*value)),
            Arg::Action { script, offset } => Variable::Action(ScriptState::new(script, *offset)),
        })
    }

    fn resolve_optional(
        &self,
        game: &Game,
        reference: Option<&str>,
        fallback: ObjectHandle,
    ) -> Result<ObjectHandle, ScriptError> {
        match reference {
            Some(reference) => self.resolve_object(game, reference, fallback),
            None => Ok(fallback),
        }
    }

    /// `OBJECT_SELF` maps to `self_handle`.
    fn resolve_object(
        &self,
        game: &Game,
        reference: &str,
        self_handle: ObjectHandle,
    ) -> Result<ObjectHandle, ScriptError> {
        match reference {
            "OBJECT_SELF" => Ok(self_handle),
            "OBJECT_INVALID" => Ok(ObjectHandle::INVALID),
            _ => {
                if let Some(name) = reference.strip_prefix('$') {
                    return match self.bindings.get(name) {
                        Some(Variable::Object(handle)) => Ok(*handle),
                        Some(other) => Err(ScriptError::NotAnObject {
                            name: name.to_string(),
                            found: other.var_type(),
                        }),
                        None => Err(ScriptError::UnboundName(name.to_string())),
                    };
                }
                game.module()
                    .find_by_tag(reference)
                    .ok_or_else(|| ScriptError::UnknownTag(reference.to_string()))
            }
        }
    }
}

fn report_value(game: &Game, value: &Variable) -> ReportValue {
    match value {
        Variable::Void => ReportValue::Void,
        Variable::Int(value) => ReportValue::Int(*value),
        Variable::Float(value) => ReportValue::Float(*value),
        Variable::String(value) => ReportValue::String(value.clone()),
        Variable::Object(handle) => ReportValue::Object(
            game.objects()
                .get(*handle)
                .map(|object| object.tag().to_string())
                .unwrap_or_else(|| handle.to_string()),
        ),
        Variable::Vector(value) => ReportValue::Vector([value.x, value.y, value.z]),
        Variable::Action(state) => ReportValue::Action {
            script: state.script.clone(),
            offset: state.offset,
        },
    }
}
