use std::collections::BTreeMap;
use std::path::Path;

use crate::config::{LoadOptions, PolygonPolicy};
use crate::error::Error;
use crate::lex::ParseError;
use crate::mtl::MaterialMap;
use crate::obj::{Corner, CornerRef, Directive, Face, Normal, RawObj, TVertex, Vertex};

/// The state of an `.obj` parse, threaded from one line to the next.
pub(crate) struct Context<'a> {
  origin: &'a Path,
  options: &'a LoadOptions,

  vertices: Vec<Vertex>,
  normals: Vec<Normal>,
  tex_vertices: Vec<TVertex>,

  material_name: String,
  faces: BTreeMap<String, Vec<Face>>,

  material_libraries: Vec<String>,
  materials: MaterialMap,
}

/// Makes a written index 0-based. Negative indices count back from the end of
/// a pool holding `len` entries.
fn resolve_index(
  line_number: usize,
  what: &str,
  index: isize,
  len: usize,
) -> Result<usize, ParseError> {
  if index > 0 {
    return Ok(index as usize - 1);
  }
  if index < 0 {
    if let Some(resolved) = len.checked_sub(index.unsigned_abs()) {
      return Ok(resolved);
    }
    return Err(ParseError::new(
      line_number,
      format!(
        "Relative {} index {} reaches before the first of {} defined.",
        what, index, len
      ),
    ));
  }
  Err(ParseError::new(
    line_number,
    format!("{} indices start at 1, but got 0.", what),
  ))
}

/// Turns the corners of one `f` line into triangles.
fn to_triangles(
  line_number: usize,
  policy: PolygonPolicy,
  corners: &[Corner],
) -> Result<Vec<[Corner; 3]>, ParseError> {
  match corners.len() {
    n if n < 3 => Err(ParseError::new(
      line_number,
      format!("Expected a face with 3 corners but got {}.", n),
    )),
    3 => Ok(vec![[corners[0], corners[1], corners[2]]]),
    n => match policy {
      PolygonPolicy::Reject => Err(ParseError::new(
        line_number,
        format!("Expected a face with 3 corners but got {}; only triangles are supported.", n),
      )),
      PolygonPolicy::Truncate => {
        log::warn!(
          "line {}: dropping {} corner(s) of a {}-sided face",
          line_number,
          n - 3,
          n
        );
        Ok(vec![[corners[0], corners[1], corners[2]]])
      }
      PolygonPolicy::Triangulate => {
        let first = corners[0];
        Ok(
          corners[1..]
            .windows(2)
            .map(|pair| [first, pair[0], pair[1]])
            .collect(),
        )
      }
    },
  }
}

impl<'a> Context<'a> {
  pub(crate) fn new(origin: &'a Path, options: &'a LoadOptions) -> Self {
    Context {
      origin,
      options,
      vertices: vec![],
      normals: vec![],
      tex_vertices: vec![],
      material_name: "".to_string(),
      faces: BTreeMap::new(),
      material_libraries: vec![],
      materials: MaterialMap::new(),
    }
  }

  pub(crate) fn finish(self) -> RawObj {
    RawObj {
      vertices: self.vertices,
      normals: self.normals,
      tex_vertices: self.tex_vertices,
      faces: self.faces,
      material_libraries: self.material_libraries,
      materials: self.materials,
    }
  }

  pub(crate) fn apply<F>(
    mut self,
    line_number: usize,
    directive: Directive<'_>,
    load_library: &mut F,
  ) -> Result<Self, Error>
  where
    F: FnMut(&str) -> Result<MaterialMap, Error>,
  {
    match directive {
      Directive::Vertex(v) => self.vertices.push(v),
      Directive::Normal(n) => self.normals.push(n),
      Directive::TexVertex(t) => self.tex_vertices.push(t),
      Directive::UseMaterial(name) => self.material_name = name.to_owned(),
      Directive::MaterialLibrary(libraries) => {
        for library in libraries {
          let loaded = load_library(library)?;
          self.materials.extend(loaded);
          self.material_libraries.push(library.to_owned());
        }
      }
      Directive::Face(corners) => {
        self
          .add_face(line_number, &corners)
          .map_err(|e| Error::parse(self.origin, e))?;
      }
    }
    Ok(self)
  }

  fn resolve_corner(&self, line_number: usize, corner: &CornerRef) -> Result<Corner, ParseError> {
    let vertex = resolve_index(line_number, "vertex", corner.vertex, self.vertices.len())?;
    let texture = corner
      .texture
      .map(|i| resolve_index(line_number, "texture", i, self.tex_vertices.len()))
      .transpose()?;
    let normal = corner
      .normal
      .map(|i| resolve_index(line_number, "normal", i, self.normals.len()))
      .transpose()?;
    Ok(Corner {
      vertex,
      texture,
      normal,
    })
  }

  fn add_face(&mut self, line_number: usize, corners: &[CornerRef]) -> Result<(), ParseError> {
    let corners = match self.options.polygons {
      PolygonPolicy::Truncate if corners.len() > 3 => &corners[..3],
      _ => corners,
    };
    let corners = corners
      .iter()
      .map(|c| self.resolve_corner(line_number, c))
      .collect::<Result<Vec<_>, _>>()?;
    let triangles = to_triangles(line_number, self.options.polygons, &corners)?;

    let group = self.faces.entry(self.material_name.clone()).or_default();
    group.extend(triangles.into_iter().map(|corners| Face {
      corners,
      line_number,
    }));
    Ok(())
  }
}
