use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::context::FunctionContext;
use crate::types::Type;
use crate::variable::{DefaultValue, Variable};

/// Upper bound on declared parameters per engine function.
pub const MAX_PARAMETERS: usize = 8;

/// Upper bound on trailing default values per engine function.
pub const MAX_DEFAULTS: usize = 6;

/// Callable bound to one engine function id.
pub type NativeFn<H> = Box<dyn Fn(&mut H, &mut FunctionContext) + Send + Sync>;

/// Static table entry naming the native implementation of a function.
///
/// `func: None` registers the function so that calls degrade to the
/// unimplemented fallback.
pub struct FunctionPointer<H: 'static> {
    pub id: u32,
    pub name: &'static str,
    pub func: Option<fn(&mut H, &mut FunctionContext)>,
}

/// Static table entry with the return and parameter types of a function.
#[derive(Debug, Clone, Copy)]
pub struct FunctionSignature {
    pub id: u32,
    pub return_type: Type,
    pub parameters: &'static [Type],
}

/// Static table entry with the trailing default values of a function.
#[derive(Debug, Clone, Copy)]
pub struct FunctionDefaults {
    pub id: u32,
    pub defaults: &'static [DefaultValue],
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    #[error("function id {0} registered twice")]
    DuplicateId(u32),
    #[error("function name {0:?} registered twice")]
    DuplicateName(String),
    #[error("function {name} (id {id}) has no signature entry")]
    MissingSignature { id: u32, name: String },
    #[error("signature entry {0} has no matching function pointer")]
    OrphanSignature(u32),
    #[error("defaults entry {0} has no matching function pointer")]
    OrphanDefaults(u32),
    #[error("function {name} declares {count} parameters (at most {MAX_PARAMETERS})")]
    TooManyParameters { name: String, count: usize },
    #[error("function {name} declares {count} defaults (at most {MAX_DEFAULTS})")]
    TooManyDefaults { name: String, count: usize },
    #[error("function {name} has {defaults} defaults for {parameters} parameters")]
    DefaultsExceedParameters {
        name: String,
        defaults: usize,
        parameters: usize,
    },
    #[error("function {name} parameter {index} is void")]
    VoidParameter { name: String, index: usize },
    #[error("function {name} parameter {index} expects {expected} but its default is {found}")]
    DefaultTypeMismatch {
        name: String,
        index: usize,
        expected: Type,
        found: Type,
    },
}

/// Everything the dispatcher needs to call one engine function.
pub struct FunctionRecord<H> {
    id: u32,
    name: Arc<str>,
    native: Option<NativeFn<H>>,
    return_type: Type,
    parameters: Vec<Type>,
    defaults: Vec<Variable>,
}

impl<H> FunctionRecord<H> {
    /// Validates the signature bounds and the right-aligned defaults.
    pub fn new(
        id: u32,
        name: &str,
        return_type: Type,
        parameters: Vec<Type>,
        defaults: Vec<Variable>,
    ) -> Result<Self, RegistryError> {
        if parameters.len() > MAX_PARAMETERS {
            return Err(RegistryError::TooManyParameters {
                name: name.to_string(),
                count: parameters.len(),
            });
        }
        if defaults.len() > MAX_DEFAULTS {
            return Err(RegistryError::TooManyDefaults {
                name: name.to_string(),
                count: defaults.len(),
            });
        }
        if defaults.len() > parameters.len() {
            return Err(RegistryError::DefaultsExceedParameters {
                name: name.to_string(),
                defaults: defaults.len(),
                parameters: parameters.len(),
            });
        }
        if let Some(index) = parameters.iter().position(|ty| *ty == Type::Void) {
            return Err(RegistryError::VoidParameter {
                name: name.to_string(),
                index,
            });
        }
        let first_optional = parameters.len() - defaults.len();
        for (offset, default) in defaults.iter().enumerate() {
            let index = first_optional + offset;
            let expected = parameters[index];
            let found = default.var_type();
            if expected != found {
                return Err(RegistryError::DefaultTypeMismatch {
                    name: name.to_string(),
                    index,
                    expected,
                    found,
                });
            }
        }

        Ok(Self {
            id,
            name: Arc::from(name),
            native: None,
            return_type,
            parameters,
            defaults,
        })
    }

    pub fn with_native<F>(mut self, native: F) -> Self
    where
        F: Fn(&mut H, &mut FunctionContext) + Send + Sync + 'static,
    {
        self.native = Some(Box::new(native));
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shared_name(&self) -> Arc<str> {
        self.name.clone()
    }

    pub fn native(&self) -> Option<&NativeFn<H>> {
        self.native.as_ref()
    }

    pub fn is_implemented(&self) -> bool {
        self.native.is_some()
    }

    pub fn return_type(&self) -> Type {
        self.return_type
    }

    pub fn parameters(&self) -> &[Type] {
        &self.parameters
    }

    pub fn defaults(&self) -> &[Variable] {
        &self.defaults
    }

    /// Number of leading parameters a caller must supply.
    pub fn required_parameters(&self) -> usize {
        self.parameters.len() - self.defaults.len()
    }
}

impl<H> fmt::Debug for FunctionRecord<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("implemented", &self.native.is_some())
            .field("return_type", &self.return_type)
            .field("parameters", &self.parameters)
            .field("defaults", &self.defaults)
            .finish()
    }
}

/// Immutable id → function lookup built once at startup.
pub struct FunctionRegistry<H> {
    records: HashMap<u32, FunctionRecord<H>>,
    by_name: HashMap<Arc<str>, u32>,
}

impl<H> Default for FunctionRegistry<H> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            by_name: HashMap::new(),
        }
    }
}

impl<H> fmt::Debug for FunctionRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.records.len())
            .finish()
    }
}

impl<H> FunctionRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, record: FunctionRecord<H>) -> Result<(), RegistryError> {
        if self.records.contains_key(&record.id) {
            return Err(RegistryError::DuplicateId(record.id));
        }
        if self.by_name.contains_key(record.name()) {
            return Err(RegistryError::DuplicateName(record.name().to_string()));
        }
        self.by_name.insert(record.shared_name(), record.id);
        self.records.insert(record.id, record);
        Ok(())
    }

    /// Registers a closure-backed function.
    pub fn register_native<F>(
        &mut self,
        id: u32,
        name: &str,
        return_type: Type,
        parameters: Vec<Type>,
        defaults: Vec<Variable>,
        native: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&mut H, &mut FunctionContext) + Send + Sync + 'static,
    {
        let record =
            FunctionRecord::new(id, name, return_type, parameters, defaults)?.with_native(native);
        self.register(record)
    }

    pub fn resolve(&self, id: u32) -> Option<&FunctionRecord<H>> {
        self.records.get(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&FunctionRecord<H>> {
        self.by_name.get(name).and_then(|id| self.records.get(id))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records ordered by id.
    pub fn records(&self) -> Vec<&FunctionRecord<H>> {
        let mut records: Vec<&FunctionRecord<H>> = self.records.values().collect();
        records.sort_by_key(|record| record.id);
        records
    }
}

impl<H: 'static> FunctionRegistry<H> {
    /// Merges the pointer, signature and defaults tables into one registry.
    ///
    /// Every id must agree across the tables: a pointer needs a signature,
    /// and neither signatures nor defaults may reference an id without a
    /// pointer entry.
    pub fn from_tables(
        pointers: &[FunctionPointer<H>],
        signatures: &[FunctionSignature],
        defaults: &[FunctionDefaults],
    ) -> Result<Self, RegistryError> {
        let mut signature_by_id: HashMap<u32, &FunctionSignature> = HashMap::new();
        for signature in signatures {
            if signature_by_id.insert(signature.id, signature).is_some() {
                return Err(RegistryError::DuplicateId(signature.id));
            }
        }
        let mut defaults_by_id: HashMap<u32, &FunctionDefaults> = HashMap::new();
        for entry in defaults {
            if defaults_by_id.insert(entry.id, entry).is_some() {
                return Err(RegistryError::DuplicateId(entry.id));
            }
        }

        let mut registry = FunctionRegistry::new();
        for pointer in pointers {
            let signature = signature_by_id.remove(&pointer.id).ok_or_else(|| {
                if registry.records.contains_key(&pointer.id) {
                    RegistryError::DuplicateId(pointer.id)
                } else {
                    RegistryError::MissingSignature {
                        id: pointer.id,
                        name: pointer.name.to_string(),
                    }
                }
            })?;
            let default_values = defaults_by_id
                .remove(&pointer.id)
                .map(|entry| {
                    entry
                        .defaults
                        .iter()
                        .map(|value| value.to_variable())
                        .collect()
                })
                .unwrap_or_default();

            let mut record = FunctionRecord::new(
                pointer.id,
                pointer.name,
                signature.return_type,
                signature.parameters.to_vec(),
                default_values,
            )?;
            if let Some(func) = pointer.func {
                record = record.with_native(func);
            }
            registry.register(record)?;
        }

        if let Some(id) = signature_by_id.keys().min() {
            return Err(RegistryError::OrphanSignature(*id));
        }
        if let Some(id) = defaults_by_id.keys().min() {
            return Err(RegistryError::OrphanDefaults(*id));
        }
        Ok(registry)
    }
}
