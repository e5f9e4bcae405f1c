//! Typed access to provider-specific parameter information.
//!
//! Drivers attach their own type tags to parameters. Rather than probing
//! parameter objects for a provider field, a driver implements
//! [`ProviderParameter`] and hands the tag over explicitly.

use serde::Serialize;

use super::traits::SqlGenerator;

/// A driver's native type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeType {
    /// Provider the tag belongs to, e.g. `informix`.
    pub provider: String,
    /// Type name as the driver spells it, e.g. `NVarChar`.
    pub name: String,
    /// Driver type code.
    pub code: i32,
}

impl NativeType {
    pub fn new(provider: impl Into<String>, name: impl Into<String>, code: i32) -> Self {
        Self {
            provider: provider.into(),
            name: name.into(),
            code,
        }
    }

    pub fn is_for(&self, provider: &str) -> bool {
        self.provider.eq_ignore_ascii_case(provider)
    }
}

/// A bound command parameter that can report its native type.
pub trait ProviderParameter {
    fn name(&self) -> &str;
    fn native_type(&self) -> Option<NativeType>;
}

/// Plain parameter carrying an optional native type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedParameter {
    pub name: String,
    pub native: Option<NativeType>,
}

impl TypedParameter {
    pub fn new(name: impl Into<String>, native: Option<NativeType>) -> Self {
        Self {
            name: name.into(),
            native,
        }
    }
}

impl ProviderParameter for TypedParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn native_type(&self) -> Option<NativeType> {
        self.native.clone()
    }
}

/// `name: type` line for logs and diagnostics.
pub fn describe_parameter(generator: &dyn SqlGenerator, parameter: &dyn ProviderParameter) -> String {
    let type_name = generator
        .provider_type_name(parameter)
        .unwrap_or_else(|| "unknown".to_string());
    format!("{}: {}", parameter.name(), type_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::Dialect;

    #[test]
    fn test_describe_with_native_type() {
        let p = TypedParameter::new(":name", Some(NativeType::new("informix", "NVarChar", 16)));
        let informix = Dialect::Informix.generator();
        assert_eq!(describe_parameter(informix.as_ref(), &p), ":name: NVarChar");
    }

    #[test]
    fn test_foreign_tag_is_ignored_by_informix() {
        let p = TypedParameter::new("id", Some(NativeType::new("postgres", "int4", 23)));
        let informix = Dialect::Informix.generator();
        assert_eq!(describe_parameter(informix.as_ref(), &p), "id: unknown");

        let generic = Dialect::Generic.generator();
        assert_eq!(describe_parameter(generic.as_ref(), &p), "id: int4");
    }

    #[test]
    fn test_untyped_parameter() {
        let p = TypedParameter::new("x", None);
        let generic = Dialect::Generic.generator();
        assert_eq!(describe_parameter(generic.as_ref(), &p), "x: unknown");
    }
}
