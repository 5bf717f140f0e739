use std::collections::HashMap;
use std::sync::Arc;

use super::{ContextError, ContextValue, ValueKind};

/// Keys a store snapshot uses next to its flattened cells.
pub const RESERVED_FIELDS: [&str; 2] = ["id", "updated"];

/// One recognized field of a store: its name and initial value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    name: String,
    default: ContextValue,
}

impl FieldSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> &ContextValue {
        &self.default
    }

    pub fn kind(&self) -> ValueKind {
        self.default.kind()
    }
}

/// The closed set of fields a [`ContextStore`](super::ContextStore) may hold.
///
/// Stores built from a schema reject updates to any other field name.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSchema {
    name: String,
    fields: Vec<FieldSpec>,
    index: HashMap<String, usize>,
}

impl ContextSchema {
    pub fn builder(name: impl Into<String>) -> ContextSchemaBuilder {
        ContextSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.index.get(name).map(|&position| &self.fields[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Checks that `value` may be stored under `name`.
    pub fn check(&self, name: &str, value: &ContextValue) -> Result<(), ContextError> {
        let spec = self.field(name).ok_or_else(|| ContextError::UnknownField {
            field: name.to_string(),
        })?;
        if value.fits(spec.kind()) {
            Ok(())
        } else {
            Err(ContextError::TypeMismatch {
                field: name.to_string(),
                expected: spec.kind(),
                found: value.kind(),
            })
        }
    }
}

pub struct ContextSchemaBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl ContextSchemaBuilder {
    /// Declares a field. Declaring the same name twice replaces the default.
    pub fn field(mut self, name: impl Into<String>, default: impl Into<ContextValue>) -> Self {
        let name = name.into();
        let default = default.into();
        match self.fields.iter_mut().find(|spec| spec.name == name) {
            Some(spec) => spec.default = default,
            None => self.fields.push(FieldSpec { name, default }),
        }
        self
    }

    /// Fails with [`ContextError::ReservedField`] when a field is named after
    /// one of the [`RESERVED_FIELDS`].
    pub fn build(self) -> Result<Arc<ContextSchema>, ContextError> {
        if let Some(spec) = self
            .fields
            .iter()
            .find(|spec| RESERVED_FIELDS.contains(&spec.name.as_str()))
        {
            return Err(ContextError::ReservedField {
                field: spec.name.clone(),
            });
        }
        let index = self
            .fields
            .iter()
            .enumerate()
            .map(|(position, spec)| (spec.name.clone(), position))
            .collect();
        Ok(Arc::new(ContextSchema {
            name: self.name,
            fields: self.fields,
            index,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Arc<ContextSchema> {
        ContextSchema::builder("dashboard")
            .field("minusEightPlus10", true)
            .field("refreshSeconds", 30)
            .field("ratio", 0.5)
            .build()
            .unwrap()
    }

    #[test]
    fn builder_keeps_declaration_order() {
        let schema = schema();
        let names: Vec<&str> = schema.fields().iter().map(FieldSpec::name).collect();
        assert_eq!(names, vec!["minusEightPlus10", "refreshSeconds", "ratio"]);
        assert_eq!(schema.name(), "dashboard");
    }

    #[test]
    fn redeclaring_replaces_default() {
        let schema = ContextSchema::builder("s")
            .field("a", 1)
            .field("a", 2)
            .build()
            .unwrap();
        assert_eq!(schema.fields().len(), 1);
        assert_eq!(
            schema.field("a").unwrap().default_value(),
            &ContextValue::Int(2)
        );
    }

    #[test]
    fn check() {
        let schema = schema();
        assert!(schema.check("refreshSeconds", &ContextValue::Int(5)).is_ok());
        assert!(schema.check("ratio", &ContextValue::Int(1)).is_ok());
        assert_eq!(
            schema.check("nope", &ContextValue::Int(5)),
            Err(ContextError::UnknownField {
                field: "nope".into()
            })
        );
        assert_eq!(
            schema.check("minusEightPlus10", &ContextValue::Int(5)),
            Err(ContextError::TypeMismatch {
                field: "minusEightPlus10".into(),
                expected: ValueKind::Bool,
                found: ValueKind::Int,
            })
        );
    }

    #[test]
    fn store_level_names_are_reserved() {
        for reserved in RESERVED_FIELDS {
            let result = ContextSchema::builder("s")
                .field("flag", true)
                .field(reserved, 1)
                .build();
            assert_eq!(
                result,
                Err(ContextError::ReservedField {
                    field: reserved.to_string()
                })
            );
        }
    }
}
