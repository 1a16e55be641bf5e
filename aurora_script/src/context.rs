use std::sync::Arc;

use log::warn;

use crate::object::ObjectHandle;
use crate::registry::FunctionRecord;
use crate::types::Type;
use crate::variable::Variable;

/// Parameters, return slot and caller identity for one engine-function call.
#[derive(Debug, Clone)]
pub struct FunctionContext {
    id: u32,
    name: Arc<str>,
    return_type: Type,
    params: Vec<Variable>,
    ret: Variable,
    caller: ObjectHandle,
    triggerer: ObjectHandle,
}

impl FunctionContext {
    /// Builds the context for `record` from the parameters the interpreter
    /// supplied.
    ///
    /// Slots past the supplied ones take the record's defaults, which are
    /// aligned to the end of the signature; anything still missing gets the
    /// zero value of its declared type. `OBJECT_SELF` in any object slot is
    /// replaced by `caller`, so natives never see the placeholder.
    pub fn for_record<H>(
        record: &FunctionRecord<H>,
        supplied: Vec<Variable>,
        caller: ObjectHandle,
        triggerer: ObjectHandle,
    ) -> Self {
        let mut params = marshal_parameters(
            record.name(),
            record.parameters(),
            record.defaults(),
            supplied,
        );
        for param in &mut params {
            if let Variable::Object(handle) = param {
                if handle.is_self() {
                    *handle = caller;
                }
            }
        }
        Self {
            id: record.id(),
            name: record.shared_name(),
            return_type: record.return_type(),
            params,
            ret: Variable::zero(record.return_type()),
            caller,
            triggerer,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> Type {
        self.return_type
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// # Panics
    ///
    /// Panics when `index` lies outside the function's signature; that only
    /// happens when a native implementation disagrees with its registry
    /// entry.
    pub fn param(&self, index: usize) -> &Variable {
        match self.params.get(index) {
            Some(value) => value,
            None => panic!(
                "{}: parameter {index} out of range ({} declared)",
                self.name,
                self.params.len()
            ),
        }
    }

    pub fn params(&self) -> &[Variable] {
        &self.params
    }

    pub fn return_value(&self) -> &Variable {
        &self.ret
    }

    pub fn set_return(&mut self, value: impl Into<Variable>) {
        self.ret = value.into();
    }

    /// Object running the script that issued this call.
    pub fn caller(&self) -> ObjectHandle {
        self.caller
    }

    /// Object whose action caused the script to run.
    pub fn triggerer(&self) -> ObjectHandle {
        self.triggerer
    }

    pub fn into_return(self) -> Variable {
        self.ret
    }
}

fn marshal_parameters(
    name: &str,
    types: &[Type],
    defaults: &[Variable],
    mut supplied: Vec<Variable>,
) -> Vec<Variable> {
    if supplied.len() > types.len() {
        warn!(
            "{name}: dropping {} surplus parameter(s)",
            supplied.len() - types.len()
        );
        supplied.truncate(types.len());
    }

    let first_default = types.len() - defaults.len();
    let mut params = supplied;
    params.reserve(types.len() - params.len());
    for index in params.len()..types.len() {
        let value = if index >= first_default {
            defaults[index - first_default].clone()
        } else {
            Variable::zero(types[index])
        };
        params.push(value);
    }
    params
}
