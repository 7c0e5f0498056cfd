//! Complete source units.
//!
//! A [`SourceUnit`] carries everything a backend needs for one
//! specialization: the key, the generated names, both aggregate
//! specifications, the template instantiation, and the rendered C++20
//! translation unit. The JIT backend evaluates the structured parts; the AOT
//! backend compiles the text.

use std::fmt::Write;

use sg_dtype::{AttributeSpec, ScalarKind};

use crate::error::CodegenError;
use crate::hash::{hash_str, ContentHash};
use crate::key::{SpecializationKey, Template, Topology};
use crate::mangle::{Mangler, SymbolSet, ELEMENT_SIZE_SHIM};
use crate::record::RecordSpec;
use crate::request::{GraphRequest, SpatialIndexRequest};

/// File name the generated text includes for the generic templates.
pub const TEMPLATE_PRELUDE_NAME: &str = "sg_templates.hpp";

/// Contents of [`TEMPLATE_PRELUDE_NAME`].
pub const TEMPLATE_PRELUDE: &str = include_str!("../include/sg_templates.hpp");

/// Template arguments of one instantiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instantiation {
    pub template: Template,
    /// Node identifier type for graphs, item type for spatial indexes.
    pub element: ScalarKind,
    /// Coordinate type; spatial indexes only.
    pub coord: Option<ScalarKind>,
    pub topology: Topology,
}

impl Instantiation {
    /// The instantiated template type, e.g.
    /// `sg::Graph<uint64_t, Node, Edge, sg::Topology::Directed>`.
    #[must_use]
    pub fn render_type(&self, symbols: &SymbolSet) -> String {
        match (self.template, self.topology) {
            (Template::Graph, Topology::Directed) => format!(
                "sg::Graph<{}, {}, {}, sg::Topology::Directed>",
                self.element.native_name(),
                symbols.primary,
                symbols.secondary
            ),
            (Template::Graph, _) => format!(
                "sg::Graph<{}, {}, {}, sg::Topology::Undirected>",
                self.element.native_name(),
                symbols.primary,
                symbols.secondary
            ),
            (Template::SpatialIndex, topology) => {
                let dims = match topology {
                    Topology::Dimensions(n) => n.get(),
                    _ => 1,
                };
                let coord = self.coord.unwrap_or(ScalarKind::Double);
                format!(
                    "sg::SpatialIndex<{}, {}, {}, {dims}>",
                    symbols.primary,
                    coord.native_name(),
                    symbols.secondary
                )
            }
        }
    }
}

/// One specialization, ready for a backend.
#[derive(Clone, Debug)]
pub struct SourceUnit {
    key: SpecializationKey,
    symbols: SymbolSet,
    primary: RecordSpec,
    secondary: RecordSpec,
    instantiation: Instantiation,
    text: String,
}

impl SourceUnit {
    /// Generate the unit for a graph request.
    ///
    /// # Errors
    ///
    /// Propagates [`CodegenError`] from aggregate generation.
    pub fn graph(request: &GraphRequest, discriminator: Option<u64>) -> Result<Self, CodegenError> {
        let key = SpecializationKey::for_graph(request);
        let instantiation = Instantiation {
            template: Template::Graph,
            element: request.element(),
            coord: None,
            topology: key.topology(),
        };
        Self::assemble(
            key,
            request.node_attrs(),
            request.edge_attrs(),
            instantiation,
            discriminator,
        )
    }

    /// Generate the unit for a spatial index request.
    ///
    /// # Errors
    ///
    /// Propagates [`CodegenError`] from aggregate generation.
    pub fn spatial_index(
        request: &SpatialIndexRequest,
        discriminator: Option<u64>,
    ) -> Result<Self, CodegenError> {
        let key = SpecializationKey::for_spatial_index(request);
        let instantiation = Instantiation {
            template: Template::SpatialIndex,
            element: request.item(),
            coord: Some(request.coord()),
            topology: key.topology(),
        };
        Self::assemble(
            key,
            &request.item_attrs(),
            &request.point_attrs(),
            instantiation,
            discriminator,
        )
    }

    #[tracing::instrument(level = "debug", skip_all, fields(key = %key))]
    fn assemble(
        key: SpecializationKey,
        primary: &AttributeSpec,
        secondary: &AttributeSpec,
        instantiation: Instantiation,
        discriminator: Option<u64>,
    ) -> Result<Self, CodegenError> {
        let primary = RecordSpec::generate(primary)?;
        let secondary = RecordSpec::generate(secondary)?;
        let symbols = Mangler::new(key.hash())
            .with_discriminator(discriminator)
            .symbols(key.template());
        let text = render(&key, &symbols, &primary, &secondary, &instantiation);
        tracing::debug!(alias = %symbols.alias, bytes = text.len(), "generated source unit");
        Ok(Self {
            key,
            symbols,
            primary,
            secondary,
            instantiation,
            text,
        })
    }

    #[must_use]
    pub fn key(&self) -> &SpecializationKey {
        &self.key
    }

    #[must_use]
    pub fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }

    #[must_use]
    pub fn primary(&self) -> &RecordSpec {
        &self.primary
    }

    #[must_use]
    pub fn secondary(&self) -> &RecordSpec {
        &self.secondary
    }

    #[must_use]
    pub fn instantiation(&self) -> &Instantiation {
        &self.instantiation
    }

    /// The rendered C++ translation unit.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Hash of the rendered text.
    #[must_use]
    pub fn source_hash(&self) -> ContentHash {
        hash_str(&self.text)
    }
}

fn render(
    key: &SpecializationKey,
    symbols: &SymbolSet,
    primary: &RecordSpec,
    secondary: &RecordSpec,
    instantiation: &Instantiation,
) -> String {
    let mut out = String::with_capacity(4096);
    let _ = writeln!(out, "// {key}");
    out.push_str("#include <cstddef>\n#include <cstdint>\n#include <new>\n#include <span>\n\n");
    let _ = writeln!(out, "#include \"{TEMPLATE_PRELUDE_NAME}\"\n");

    out.push_str(&primary.render(&symbols.primary));
    out.push('\n');
    out.push_str(&secondary.render(&symbols.secondary));
    out.push('\n');

    let instance = instantiation.render_type(symbols);
    let _ = writeln!(out, "using {} = {instance};", symbols.alias);
    let _ = writeln!(out, "template struct {instance};\n");

    out.push_str("extern \"C\" {\n\n");
    render_shims(&mut out, &symbols.primary, primary);
    render_shims(&mut out, &symbols.secondary, secondary);
    let _ = writeln!(
        out,
        "SG_EXPORT std::size_t {}{ELEMENT_SIZE_SHIM}() {{\n    return sizeof({}::element_type);\n}}\n",
        symbols.alias, symbols.alias
    );
    out.push_str("}  // extern \"C\"\n");
    out
}

fn render_shims(out: &mut String, name: &str, record: &RecordSpec) {
    let mut words = vec![format!("sizeof({name})"), format!("alignof({name})")];
    words.extend(
        record
            .fields()
            .iter()
            .map(|f| format!("offsetof({name}, {})", f.name)),
    );
    let _ = writeln!(
        out,
        "SG_EXPORT std::size_t {name}_layout(std::size_t* out, std::size_t cap) {{"
    );
    let _ = writeln!(out, "    const std::size_t words[] = {{{}}};", words.join(", "));
    out.push_str("    const std::size_t n = sizeof(words) / sizeof(words[0]);\n");
    out.push_str("    for (std::size_t i = 0; i < n && i < cap; ++i) {\n");
    out.push_str("        out[i] = words[i];\n    }\n    return n;\n}\n\n");

    let _ = writeln!(out, "SG_EXPORT void {name}_default(void* dst) {{");
    let _ = writeln!(out, "    new (dst) {name}();\n}}\n");

    let _ = writeln!(out, "SG_EXPORT void {name}_init(void* dst, const void* const* args) {{");
    if record.is_empty() {
        out.push_str("    (void)args;\n");
        let _ = writeln!(out, "    new (dst) {name}();");
    } else {
        let args: Vec<_> = record
            .fields()
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let native = f.descriptor.native_name();
                match f.descriptor.element_count() {
                    None => format!("*static_cast<const {native}*>(args[{i}])"),
                    Some(n) => format!(
                        "std::span<const {native}>(static_cast<const {native}*>(args[{i}]), {n})"
                    ),
                }
            })
            .collect();
        let _ = writeln!(out, "    new (dst) {name}(");
        let _ = writeln!(out, "        {});", args.join(",\n        "));
    }
    out.push_str("}\n\n");
}

#[cfg(test)]
mod tests;
