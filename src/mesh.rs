//! Assembly of parsed faces into flat, index-free buffers.
//!
//! Each material group becomes one [`Mesh`] whose buffers can be handed to a
//! non-indexed triangle draw call as they are.
use crate::config::{LoadOptions, NormalPolicy};
use crate::lex::ParseError;
use crate::obj::{Face, RawObj};

/// The triangles of one material group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
  /// Three floats per corner, three corners per face, in face order.
  pub vertices: Vec<f32>,
  /// Parallel to `vertices` when `has_normal` is set, empty otherwise.
  pub normals: Vec<f32>,
  /// Whether `normals` is filled.
  pub has_normal: bool,
  /// The `usemtl` name shared by the group's faces.
  pub material_name: String,
}

impl Mesh {
  /// Number of corners in the buffers.
  pub fn vertex_count(&self) -> usize {
    self.vertices.len() / 3
  }

  /// Number of triangles in the buffers.
  pub fn triangle_count(&self) -> usize {
    self.vertex_count() / 3
  }
}

fn lookup<'p>(
  pool: &'p [[f32; 3]],
  index: usize,
  face: &Face,
  what: &str,
) -> Result<&'p [f32; 3], ParseError> {
  pool.get(index).ok_or_else(|| {
    ParseError::new(
      face.line_number,
      format!(
        "Expected {} index in the range [1, {}], but got {}.",
        what,
        pool.len(),
        index + 1
      ),
    )
  })
}

fn assemble_group(
  raw: &RawObj,
  material_name: &str,
  faces: &[Face],
  policy: NormalPolicy,
) -> Result<Mesh, ParseError> {
  // Decided by the first corner of the first face only.
  let has_normal = faces
    .first()
    .map_or(false, |face| face.corners[0].normal.is_some());

  let corner_floats = faces.len() * 9;
  let mut mesh = Mesh {
    vertices: Vec::with_capacity(corner_floats),
    normals: Vec::with_capacity(if has_normal { corner_floats } else { 0 }),
    has_normal,
    material_name: material_name.to_owned(),
  };
  let mut padded = 0usize;

  for face in faces {
    for corner in &face.corners {
      let vertex = lookup(&raw.vertices, corner.vertex, face, "vertex")?;
      mesh.vertices.extend_from_slice(vertex);

      match (has_normal, corner.normal) {
        (true, Some(index)) => {
          let normal = lookup(&raw.normals, index, face, "normal")?;
          mesh.normals.extend_from_slice(normal);
        }
        (false, None) => {}
        (_, given) if policy == NormalPolicy::RequireUniform => {
          return Err(ParseError::new(
            face.line_number,
            format!(
              "Material group `{}` {} normals, but this corner {} one.",
              material_name,
              if has_normal { "has" } else { "has no" },
              if given.is_some() { "has" } else { "lacks" },
            ),
          ));
        }
        (true, None) => {
          mesh.normals.extend_from_slice(&[0.0; 3]);
          padded += 1;
        }
        (false, Some(_)) => {}
      }
    }
  }

  if padded > 0 {
    log::warn!(
      "material group `{}`: {} corner(s) without a normal were given a zero normal",
      material_name,
      padded
    );
  }
  Ok(mesh)
}

/// Builds one mesh per material group of `raw`, in material name order.
///
/// Every index is checked against its pool; an index past the end of the
/// pool fails with the line of the face that used it.
pub fn assemble(raw: &RawObj, options: &LoadOptions) -> Result<Vec<Mesh>, ParseError> {
  raw
    .faces
    .iter()
    .map(|(name, faces)| assemble_group(raw, name, faces, options.normals))
    .collect()
}
