/// Manifest parsers turning dependency files into declared packages
mod package_json;
mod pipfile;
mod registry;
mod requirements;

pub use package_json::PackageJsonFormat;
pub use pipfile::PipfileFormat;
pub use registry::{ManifestFormat, ManifestParserRegistry};
pub use requirements::RequirementsTxtFormat;
