//! Native declaration generation for runtime specializations.
//!
//! Turns validated requests into everything a compilation backend needs:
//!
//! - [`RecordSpec`]: a flat aggregate per attribute specification, with its
//!   C-ABI [`RecordLayout`]
//! - [`SpecializationKey`]: the order-independent identity of a request
//! - [`Mangler`]: globally unique names derived from the key
//! - [`SourceUnit`]: structured declarations plus the rendered C++ text

mod error;
mod hash;
mod key;
mod layout;
mod mangle;
mod record;
mod request;
mod unit;

pub use error::CodegenError;
pub use hash::{hash_str, ContentHash};
pub use key::{SpecializationKey, Template, Topology};
pub use layout::{align_to, RecordLayout};
pub use mangle::{Mangler, Role, SymbolSet, ELEMENT_SIZE_SHIM, MANGLE_PREFIX, RECORD_SHIMS};
pub use record::{FieldSpec, RecordSpec};
pub use request::{GraphRequest, SpatialIndexRequest, COORD_FIELD, ITEM_FIELD};
pub use unit::{Instantiation, SourceUnit, TEMPLATE_PRELUDE, TEMPLATE_PRELUDE_NAME};
