/// AMI domain layer: lookup seam, record building, YAML rendering.
pub mod errors;
pub mod lookup;
pub mod record;

pub use errors::AmiError;
pub use lookup::AmiLookup;
pub use record::{render_yaml, resolve_override};
