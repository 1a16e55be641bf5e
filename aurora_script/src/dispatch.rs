use std::sync::Arc;

use log::{debug, warn};

use crate::context::FunctionContext;
use crate::object::ObjectHandle;
use crate::registry::FunctionRegistry;
use crate::variable::Variable;

/// Entry point the bytecode interpreter uses to call engine functions.
///
/// Dispatching itself never touches engine state; only the bound native
/// implementations do, through the host they are handed.
pub struct Dispatcher<H> {
    registry: Arc<FunctionRegistry<H>>,
}

impl<H> Clone for Dispatcher<H> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<H> Dispatcher<H> {
    pub fn new(registry: FunctionRegistry<H>) -> Self {
        Self::from_shared(Arc::new(registry))
    }

    pub fn from_shared(registry: Arc<FunctionRegistry<H>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FunctionRegistry<H> {
        &self.registry
    }

    /// Calls function `id` and returns exactly one value.
    ///
    /// Unknown ids and registered-but-unimplemented functions are logged
    /// and answer with the zero value of their return type (`Void` when the
    /// id is unknown), so a script never halts on them.
    pub fn invoke(
        &self,
        host: &mut H,
        id: u32,
        params: Vec<Variable>,
        caller: ObjectHandle,
        triggerer: ObjectHandle,
    ) -> Variable {
        let Some(record) = self.registry.resolve(id) else {
            warn!("unregistered engine function {id} called by {caller}");
            return Variable::Void;
        };

        let mut ctx = FunctionContext::for_record(record, params, caller, triggerer);
        match record.native() {
            Some(native) => {
                debug!("call {}({})", ctx.name(), format_params(&ctx));
                native(host, &mut ctx);
            }
            None => unimplemented_function(&ctx),
        }
        ctx.into_return()
    }
}

/// Fallback for functions that are registered without an implementation.
pub fn unimplemented_function(ctx: &FunctionContext) {
    warn!(
        "unimplemented engine function {} {}({})",
        ctx.return_type(),
        ctx.name(),
        format_params(ctx)
    );
}

pub fn format_params(ctx: &FunctionContext) -> String {
    ctx.params()
        .iter()
        .map(|param| param.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
