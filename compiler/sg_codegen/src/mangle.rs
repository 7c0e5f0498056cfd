//! Symbol naming for generated declarations.
//!
//! Every generated name embeds the specialization's content hash, so two
//! different specializations can never produce the same name. Backends whose
//! namespace outlives a single request (the JIT) also embed a discriminator
//! drawn from that namespace, so two registries specializing the same key in
//! one process still get distinct names.
//!
//! # Naming Scheme
//!
//! ```text
//! sg_<hash16>[_<serial>]_<Role>
//! ```
//!
//! | Role | Meaning |
//! |------|---------|
//! | `Node`, `Edge` | graph node and edge aggregates |
//! | `Graph` | graph instantiation alias |
//! | `Item`, `Point` | spatial index item and coordinate aggregates |
//! | `Index` | spatial index instantiation alias |

use std::fmt::{self, Write};

use crate::hash::ContentHash;
use crate::key::Template;

/// The prefix for all generated symbols.
pub const MANGLE_PREFIX: &str = "sg_";

/// What a generated name denotes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Node,
    Edge,
    Graph,
    Item,
    Point,
    Index,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Node => "Node",
            Role::Edge => "Edge",
            Role::Graph => "Graph",
            Role::Item => "Item",
            Role::Point => "Point",
            Role::Index => "Index",
        }
    }

    /// `(primary, secondary, alias)` roles of a template.
    #[must_use]
    pub const fn for_template(template: Template) -> (Role, Role, Role) {
        match template {
            Template::Graph => (Role::Node, Role::Edge, Role::Graph),
            Template::SpatialIndex => (Role::Item, Role::Point, Role::Index),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The names of everything one source unit declares.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolSet {
    pub primary: String,
    pub secondary: String,
    pub alias: String,
}

impl SymbolSet {
    /// Every declared name, including the exported shim functions.
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(10);
        for record in [&self.primary, &self.secondary] {
            names.push(record.clone());
            for shim in RECORD_SHIMS {
                names.push(format!("{record}{shim}"));
            }
        }
        names.push(self.alias.clone());
        names.push(format!("{}{ELEMENT_SIZE_SHIM}", self.alias));
        names
    }
}

/// Suffixes of the exported per-record functions.
pub const RECORD_SHIMS: [&str; 3] = ["_layout", "_default", "_init"];

/// Suffix of the exported element-size function.
pub const ELEMENT_SIZE_SHIM: &str = "_element_size";

/// Produces names for one specialization.
#[derive(Clone, Debug)]
pub struct Mangler {
    hash: ContentHash,
    discriminator: Option<u64>,
}

impl Mangler {
    #[must_use]
    pub fn new(hash: ContentHash) -> Self {
        Self {
            hash,
            discriminator: None,
        }
    }

    /// Embed an instance-local discriminator in every name.
    #[must_use]
    pub fn with_discriminator(mut self, discriminator: Option<u64>) -> Self {
        self.discriminator = discriminator;
        self
    }

    #[must_use]
    pub fn mangle(&self, role: Role) -> String {
        let mut result = String::with_capacity(40);
        result.push_str(MANGLE_PREFIX);
        let _ = write!(result, "{}", self.hash);
        if let Some(serial) = self.discriminator {
            let _ = write!(result, "_{serial}");
        }
        result.push('_');
        result.push_str(role.as_str());
        result
    }

    #[must_use]
    pub fn symbols(&self, template: Template) -> SymbolSet {
        let (primary, secondary, alias) = Role::for_template(template);
        SymbolSet {
            primary: self.mangle(primary),
            secondary: self.mangle(secondary),
            alias: self.mangle(alias),
        }
    }
}

#[cfg(test)]
mod tests;
