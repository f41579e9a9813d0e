use std::path::Path;

use crate::config::LoadOptions;
use crate::error::Error;
use crate::mesh::{self, Mesh};
use crate::mtl::{Material, MaterialMap};
use crate::obj::{self, RawObj};

/// A loaded `.obj` file, ready for drawing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
  /// One mesh per material group, in material name order.
  pub meshes: Vec<Mesh>,
  /// Materials from the libraries the file named.
  pub materials: MaterialMap,
}

impl Model {
  /// Reads the `.obj` file at `path` and the material libraries it names.
  pub fn load<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Model, Error> {
    let path = path.as_ref();
    let raw = obj::load(path, options)?;
    Model::assemble(path, raw, options)
  }

  /// Builds a model from `.obj` text. See [`obj::parse`].
  pub fn parse<F>(
    origin: &Path,
    input: &str,
    options: &LoadOptions,
    load_library: F,
  ) -> Result<Model, Error>
  where
    F: FnMut(&str) -> Result<MaterialMap, Error>,
  {
    let raw = obj::parse(origin, input, options, load_library)?;
    Model::assemble(origin, raw, options)
  }

  fn assemble(origin: &Path, raw: RawObj, options: &LoadOptions) -> Result<Model, Error> {
    let meshes = mesh::assemble(&raw, options).map_err(|e| Error::parse(origin, e))?;
    let model = Model {
      meshes,
      materials: raw.materials,
    };
    log::debug!(
      "`{}`: {} mesh(es), {} triangle(s), {} material(s)",
      origin.display(),
      model.meshes.len(),
      model.triangle_count(),
      model.materials.len()
    );
    Ok(model)
  }

  /// The material a mesh was drawn with, if its library defined it.
  pub fn material(&self, mesh: &Mesh) -> Option<&Material> {
    self.materials.get(&mesh.material_name)
  }

  /// Like [`Model::material`], falling back to `Material::default()`.
  pub fn material_or_default(&self, mesh: &Mesh) -> Material {
    self.material(mesh).copied().unwrap_or_default()
  }

  /// The mesh for a material name.
  pub fn mesh(&self, material_name: &str) -> Option<&Mesh> {
    self
      .meshes
      .iter()
      .find(|mesh| mesh.material_name == material_name)
  }

  /// Number of triangles across all meshes.
  pub fn triangle_count(&self) -> usize {
    self.meshes.iter().map(Mesh::triangle_count).sum()
  }
}
