//! A parser for the triangle subset of Wavefront's `.obj` file format.
//!
//! Recognised directives are `v`, `vt`, `vn`, `f`, `mtllib` and `usemtl`.
//! Every other line is skipped.
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{LibraryBase, LoadOptions, PolygonPolicy};
use crate::context::Context;
use crate::error::Error;
use crate::lex::{self, Line, ParseError};
use crate::mtl::{self, MaterialMap};

/// A single 3-dimensional point on the corner of an object.
pub type Vertex = [f32; 3];

/// A single 3-dimensional normal.
pub type Normal = Vertex;

/// A single 2-dimensional point on a texture. "Texture Vertex".
pub type TVertex = [f32; 2];

/// A 0-based index into [`RawObj::vertices`].
pub type VertexIndex = usize;

/// A 0-based index into [`RawObj::tex_vertices`].
pub type TextureIndex = usize;

/// A 0-based index into [`RawObj::normals`].
pub type NormalIndex = usize;

/// One corner of a face, with its indices made 0-based.
///
/// Indices are not checked against the pools until the mesh is assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Corner {
  /// Position of the corner.
  pub vertex: VertexIndex,
  /// Texture coordinate, kept only for completeness.
  pub texture: Option<TextureIndex>,
  /// Normal of the corner, if the file gave one.
  pub normal: Option<NormalIndex>,
}

/// A triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
  /// The three corners, in file order.
  pub corners: [Corner; 3],
  /// The `f` line the face came from.
  pub line_number: usize,
}

/// The indices of a corner exactly as written: 1-based, or negative when
/// relative to the end of the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerRef {
  /// Vertex index.
  pub vertex: isize,
  /// Texture index, `None` when the segment is missing or empty.
  pub texture: Option<isize>,
  /// Normal index, `None` when the segment is missing or empty.
  pub normal: Option<isize>,
}

/// One parsed line of an `.obj` file.
#[derive(Clone, Debug, PartialEq)]
pub enum Directive<'a> {
  /// `v x y z`
  Vertex(Vertex),
  /// `vt u [v]`
  TexVertex(TVertex),
  /// `vn x y z`
  Normal(Normal),
  /// `f c1 c2 c3 ...`
  Face(Vec<CornerRef>),
  /// `mtllib path...`
  MaterialLibrary(Vec<&'a str>),
  /// `usemtl name`
  UseMaterial(&'a str),
}

/// Everything read from an `.obj` file, before assembly into meshes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawObj {
  /// Vertex pool, in file order.
  pub vertices: Vec<Vertex>,
  /// Normal pool, in file order.
  pub normals: Vec<Normal>,
  /// Texture pool, in file order. Not used by the assembler.
  pub tex_vertices: Vec<TVertex>,
  /// Faces grouped by the material that was active when they were read.
  /// Faces before any `usemtl` are under `""`.
  pub faces: BTreeMap<String, Vec<Face>>,
  /// Material libraries named by `mtllib`, in file order.
  pub material_libraries: Vec<String>,
  /// Materials from all loaded libraries.
  pub materials: MaterialMap,
}

impl RawObj {
  /// Total number of faces across all material groups.
  pub fn face_count(&self) -> usize {
    self.faces.values().map(Vec::len).sum()
  }
}

fn parse_index(line_number: usize, what: &str, s: &str) -> Result<Option<isize>, ParseError> {
  if s.is_empty() {
    return Ok(None);
  }
  lex::parse_isize_from(s).map(Some).ok_or_else(|| {
    ParseError::new(
      line_number,
      format!("Expected {} index but got {}.", what, s),
    )
  })
}

fn parse_corner(line_number: usize, token: &str) -> Result<CornerRef, ParseError> {
  let mut segments = token.split('/');

  let vertex = parse_index(line_number, "a vertex", segments.next().unwrap_or(""))?;
  let texture = match segments.next() {
    Some(s) => parse_index(line_number, "a texture", s)?,
    None => None,
  };
  let normal = match segments.next() {
    Some(s) => parse_index(line_number, "a normal", s)?,
    None => None,
  };

  if segments.next().is_some() {
    return Err(ParseError::new(
      line_number,
      format!("Expected at most 3 indexes in corner {}.", token),
    ));
  }

  match vertex {
    Some(vertex) => Ok(CornerRef {
      vertex,
      texture,
      normal,
    }),
    None => Err(ParseError::new(
      line_number,
      format!("Corner {} is missing its vertex index.", token),
    )),
  }
}

/// Splits the fields of an `f` line into corners. A field that starts with
/// `/` continues the corner before it, so `1/ /2` reads as `1//2`.
///
/// Under `PolygonPolicy::Truncate` nothing after the third corner is read.
fn parse_corners(line: Line<'_>, polygons: PolygonPolicy) -> Result<Vec<CornerRef>, ParseError> {
  let line_number = line.number;
  let mut tokens: Vec<String> = Vec::new();
  let mut fields = line.rest();
  while let Some(field) = fields.next() {
    if field.starts_with('/') {
      if let Some(previous) = tokens.last_mut() {
        previous.push_str(field);
        continue;
      }
    }
    if tokens.len() == 3 && polygons == PolygonPolicy::Truncate {
      log::warn!(
        "line {}: dropping {} field(s) after the third corner",
        line_number,
        1 + fields.by_ref().count()
      );
      break;
    }
    tokens.push(field.to_owned());
  }
  tokens
    .iter()
    .map(|token| parse_corner(line_number, token))
    .collect()
}

pub(crate) fn parse_directive<'a>(
  mut line: Line<'a>,
  options: &LoadOptions,
) -> Result<Option<Directive<'a>>, ParseError> {
  let keyword = line.keyword;
  let directive = match keyword {
    "v" => Directive::Vertex(line.parse_triple()?),
    "vn" => Directive::Normal(line.parse_triple()?),
    "vt" => {
      let u = line.parse_f32("a u coordinate")?;
      let v = line.parse_optional_f32("a v coordinate")?.unwrap_or(0.);
      Directive::TexVertex([u, v])
    }
    "f" => Directive::Face(parse_corners(line, options.polygons)?),
    "mtllib" => {
      let first = line.parse_str("a material library path")?;
      let mut libraries = vec![first];
      libraries.extend(line.rest());
      Directive::MaterialLibrary(libraries)
    }
    "usemtl" => Directive::UseMaterial(line.parse_str("a material name")?),
    other => {
      log::debug!("obj: unknown tag: {}, line {}", other, line.number);
      return Ok(None);
    }
  };
  Ok(Some(directive))
}

/// Parses a single line of `.obj` text with default options. Blank lines,
/// comments and unknown directives give `Ok(None)`.
pub fn parse_line(line_number: usize, text: &str) -> Result<Option<Directive<'_>>, ParseError> {
  parse_line_with(line_number, text, &LoadOptions::default())
}

/// Like [`parse_line`], reading `f` lines as `options.polygons` asks.
pub fn parse_line_with<'a>(
  line_number: usize,
  text: &'a str,
  options: &LoadOptions,
) -> Result<Option<Directive<'a>>, ParseError> {
  match Line::new(line_number, text) {
    Some(line) => parse_directive(line, options),
    None => Ok(None),
  }
}

/// Parses `.obj` text.
///
/// `origin` names the text in errors. `load_library` is called with each
/// path listed by `mtllib`, as the directive is read.
pub fn parse<F>(
  origin: &Path,
  input: &str,
  options: &LoadOptions,
  mut load_library: F,
) -> Result<RawObj, Error>
where
  F: FnMut(&str) -> Result<MaterialMap, Error>,
{
  let context = lex::lines(input).try_fold(Context::new(origin, options), |context, line| {
    let line_number = line.number;
    match parse_directive(line, options).map_err(|e| Error::parse(origin, e))? {
      Some(directive) => context.apply(line_number, directive, &mut load_library),
      None => Ok(context),
    }
  })?;
  Ok(context.finish())
}

/// Reads and parses the `.obj` file at `path`, loading the material
/// libraries it names.
///
/// Unlike a material library, the `.obj` file itself is required: failing to
/// read it is an error.
pub fn load<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<RawObj, Error> {
  let path = path.as_ref();
  let input = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

  let base = match options.library_base {
    LibraryBase::WorkingDirectory => None,
    LibraryBase::ObjDirectory => path.parent(),
  };
  let raw = parse(path, &input, options, |library| {
    let library_path = match base {
      Some(dir) => dir.join(library),
      None => PathBuf::from(library),
    };
    mtl::load(library_path)
  })?;

  log::debug!(
    "parsed `{}`: {} vertices, {} normals, {} faces in {} group(s)",
    path.display(),
    raw.vertices.len(),
    raw.normals.len(),
    raw.face_count(),
    raw.faces.len()
  );
  Ok(raw)
}
