//! Flat aggregate specifications.
//!
//! A [`RecordSpec`] is generated from an [`AttributeSpec`] and describes a
//! native struct with one field per attribute, a zero-initializing default
//! constructor and a value constructor taking one parameter per attribute in
//! insertion order. Array parameters arrive as views and are copied element
//! by element into the field.

use std::fmt::Write;

use sg_dtype::{AttributeSpec, DeclFlavor, RValue, ScalarKind, TypeDescriptor};

use crate::error::CodegenError;
use crate::layout::RecordLayout;

/// Native spelling of `kind`, if it is one of the kinds declarations accept.
fn native_scalar(kind: ScalarKind) -> Option<&'static str> {
    ScalarKind::ALL
        .into_iter()
        .find(|k| *k == kind)
        .map(ScalarKind::native_name)
}

/// One field of a generated record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub descriptor: TypeDescriptor,
}

impl FieldSpec {
    /// Value-constructor parameter name.
    #[must_use]
    pub fn param_name(&self) -> String {
        format!("_{}", self.name)
    }

    /// Value-constructor parameter declaration; arrays arrive as views.
    #[must_use]
    pub fn param_decl(&self) -> String {
        self.descriptor.decl(&self.param_name(), DeclFlavor::VIEW)
    }

    /// Member initializer copying the parameter into the field.
    #[must_use]
    pub fn initializer(&self) -> String {
        match self.descriptor.rvalue(&self.param_name(), None) {
            RValue::Scalar(expr) => format!("{}{{{expr}}}", self.name),
            elements @ RValue::Elements(_) => format!("{}{elements}", self.name),
        }
    }
}

/// Generated aggregate: fields in insertion order plus their C-ABI layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordSpec {
    fields: Vec<FieldSpec>,
    layout: RecordLayout,
}

impl RecordSpec {
    /// Generate the record for `attrs`.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::UnsupportedAttributeType`] if a descriptor has
    /// no native scalar spelling.
    pub fn generate(attrs: &AttributeSpec) -> Result<Self, CodegenError> {
        let fields = attrs
            .iter()
            .map(|(name, descriptor)| {
                native_scalar(descriptor.base())
                    .map(|_| FieldSpec {
                        name: name.to_string(),
                        descriptor,
                    })
                    .ok_or_else(|| CodegenError::UnsupportedAttributeType {
                        name: name.to_string(),
                        descriptor,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let layout = RecordLayout::compute(fields.iter().map(|f| f.descriptor));
        Ok(Self { fields, layout })
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    #[must_use]
    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Render the C++ struct declaration named `name`.
    ///
    /// An empty record gets only the default constructor, since a
    /// parameterless value constructor would redeclare it.
    #[must_use]
    pub fn render(&self, name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "struct {name} {{");
        for field in &self.fields {
            let _ = writeln!(out, "    {};", field.descriptor.field_decl(&field.name));
        }
        if !self.fields.is_empty() {
            out.push('\n');
        }

        if self.fields.is_empty() {
            let _ = writeln!(out, "    {name}() {{}}");
        } else {
            let zeroed: Vec<_> = self.fields.iter().map(|f| format!("{}{{}}", f.name)).collect();
            let _ = writeln!(out, "    {name}() : {} {{}}", zeroed.join(", "));

            let params: Vec<_> = self.fields.iter().map(FieldSpec::param_decl).collect();
            let inits: Vec<_> = self.fields.iter().map(FieldSpec::initializer).collect();
            let _ = writeln!(out, "    {name}({})", params.join(", "));
            let _ = writeln!(out, "        : {} {{}}", inits.join(", "));
        }
        out.push_str("};\n");
        out
    }
}

#[cfg(test)]
mod tests;
