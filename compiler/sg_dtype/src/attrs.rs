//! Ordered attribute specifications.
//!
//! Insertion order is significant: it fixes the parameter order of the
//! generated value constructor. Equality is therefore order-sensitive;
//! order-independent identity is the job of the specialization key, which
//! works on [`AttributeSpec::sorted`].

use crate::descriptor::TypeDescriptor;
use crate::error::DescriptorError;

/// C++ keywords and names the generated code already uses.
const RESERVED: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq", "self", "args", "std",
    "sg", "assert", "errno", "offsetof", "stdin", "stdout", "stderr",
];

/// Names the C and C++ standard libraries claim: `*_t` typedefs and
/// all-caps macros such as `NULL` or `INT8_MAX`.
fn is_library_name(name: &str) -> bool {
    let all_caps = name.len() > 1 && !name.bytes().any(|b| b.is_ascii_lowercase());
    name.ends_with("_t") || all_caps
}

/// Whether `name` can be used verbatim as a field and (prefixed with `_`)
/// parameter name in generated code.
#[must_use]
pub fn is_valid_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    // leading `_` would produce reserved `__x` parameter names
    first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED.contains(&name)
        && !is_library_name(name)
}

/// Ordered mapping from attribute name to descriptor with unique names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AttributeSpec {
    entries: Vec<(String, TypeDescriptor)>,
}

impl AttributeSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `(name, descriptor)` pairs, preserving their order.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid descriptor, invalid name or duplicate name.
    pub fn parse<'a, I>(pairs: I) -> Result<Self, DescriptorError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut spec = Self::new();
        for (name, descriptor) in pairs {
            spec.insert(name, TypeDescriptor::parse(descriptor)?)?;
        }
        Ok(spec)
    }

    /// Append an attribute.
    ///
    /// # Errors
    ///
    /// Fails if `name` is not a usable identifier or is already present.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        descriptor: TypeDescriptor,
    ) -> Result<(), DescriptorError> {
        let name = name.into();
        if !is_valid_attribute_name(&name) {
            return Err(DescriptorError::InvalidAttributeName { name });
        }
        if self.position(&name).is_some() {
            return Err(DescriptorError::DuplicateAttribute { name });
        }
        self.entries.push((name, descriptor));
        Ok(())
    }

    /// Builder form of [`AttributeSpec::insert`].
    ///
    /// # Errors
    ///
    /// Same as [`AttributeSpec::insert`].
    pub fn with(
        mut self,
        name: impl Into<String>,
        descriptor: TypeDescriptor,
    ) -> Result<Self, DescriptorError> {
        self.insert(name, descriptor)?;
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<TypeDescriptor> {
        self.position(name).map(|i| self.entries[i].1)
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    /// Attributes in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, TypeDescriptor)> + '_ {
        self.entries.iter().map(|(n, d)| (n.as_str(), *d))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attributes sorted by name, the order-independent view.
    #[must_use]
    pub fn sorted(&self) -> Vec<(String, TypeDescriptor)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        sorted
    }
}

#[cfg(test)]
mod tests;
