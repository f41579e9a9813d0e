//! Loaders for wavefront's `.obj` and `.mtl` file formats, producing flat
//! per-material vertex and normal buffers.
//!
//! ```no_run
//! let model = wavefront_mesh::load("box.obj")?;
//! for mesh in &model.meshes {
//!   let material = model.material_or_default(mesh);
//!   // bind `material`, then draw `mesh.vertices.len() / 3` corners.
//! }
//! # Ok::<(), wavefront_mesh::Error>(())
//! ```
#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unreachable_pub)]

use std::path::Path;

pub use config::{LibraryBase, LoadOptions, NormalPolicy, PolygonPolicy};
pub use error::Error;
pub use lex::ParseError;
pub use mesh::Mesh;
pub use model::Model;
pub use mtl::{Material, MaterialMap};

mod context;
mod error;
mod lex;
mod model;

pub mod config;
pub mod mesh;
pub mod mtl;
pub mod obj;

/// Loads the `.obj` file at `path` with default options.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Model, Error> {
  load_with(path, &LoadOptions::default())
}

/// Loads the `.obj` file at `path`.
pub fn load_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Model, Error> {
  Model::load(path, options)
}
