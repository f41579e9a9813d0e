//! Knobs for the few places where `.obj` files in the wild disagree with the
//! triangle-only subset this crate reads.
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// What to do with an `f` line that lists more than three corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolygonPolicy {
  /// Fail the load.
  #[default]
  Reject,
  /// Keep the first three corners and drop the rest.
  Truncate,
  /// Split the polygon into a fan of triangles around its first corner.
  Triangulate,
}

/// How a material group decides whether it has normals.
///
/// The decision is always taken from the first corner of the group's first
/// face. The policies differ in what happens when a later corner disagrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalPolicy {
  /// Tolerate disagreement. A corner without a normal in a group that has
  /// normals contributes a zero normal; normals on corners of a group
  /// without normals are dropped.
  #[default]
  FirstCorner,
  /// Fail the load when a corner disagrees with the group's first corner.
  RequireUniform,
}

/// Where `mtllib` paths are resolved from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryBase {
  /// Relative to the process working directory.
  #[default]
  WorkingDirectory,
  /// Relative to the directory holding the `.obj` file.
  ObjDirectory,
}

/// Options for [`load_with`](crate::load_with).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
  /// Handling of faces with more than three corners.
  pub polygons: PolygonPolicy,
  /// Handling of mixed normal presence within a material group.
  pub normals: NormalPolicy,
  /// Resolution of material library paths.
  pub library_base: LibraryBase,
}

impl LoadOptions {
  /// Reads options from TOML. Missing keys keep their defaults.
  ///
  /// ```toml
  /// polygons = "triangulate"
  /// normals = "require_uniform"
  /// library_base = "obj_directory"
  /// ```
  pub fn from_toml_str(s: &str) -> Result<Self, Error> {
    Ok(toml::from_str(s)?)
  }

  /// Sets [`LoadOptions::polygons`].
  pub fn polygons(mut self, policy: PolygonPolicy) -> Self {
    self.polygons = policy;
    self
  }

  /// Sets [`LoadOptions::normals`].
  pub fn normals(mut self, policy: NormalPolicy) -> Self {
    self.normals = policy;
    self
  }

  /// Sets [`LoadOptions::library_base`].
  pub fn library_base(mut self, base: LibraryBase) -> Self {
    self.library_base = base;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_the_strict_subset() {
    let options = LoadOptions::default();
    assert_eq!(options.polygons, PolygonPolicy::Reject);
    assert_eq!(options.normals, NormalPolicy::FirstCorner);
    assert_eq!(options.library_base, LibraryBase::WorkingDirectory);
  }

  #[test]
  fn reads_partial_toml() {
    let options = LoadOptions::from_toml_str("polygons = \"triangulate\"\n").unwrap();
    assert_eq!(
      options,
      LoadOptions::default().polygons(PolygonPolicy::Triangulate)
    );
  }

  #[test]
  fn reads_every_key() {
    let options = LoadOptions::from_toml_str(
      "polygons = \"truncate\"\nnormals = \"require_uniform\"\nlibrary_base = \"obj_directory\"\n",
    )
    .unwrap();
    assert_eq!(options.polygons, PolygonPolicy::Truncate);
    assert_eq!(options.normals, NormalPolicy::RequireUniform);
    assert_eq!(options.library_base, LibraryBase::ObjDirectory);
  }

  #[test]
  fn rejects_unknown_policy() {
    let err = LoadOptions::from_toml_str("polygons = \"quads\"\n").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
  }
}
