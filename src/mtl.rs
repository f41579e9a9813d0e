//! A parser for Wavefront's `.mtl` material libraries.
//!
//! Only the fixed-function lighting terms are read: `Ka`, `Kd`, `Ks` and
//! `Ns`. Everything else in the file is skipped.
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::lex::{self, Line, ParseError};

/// Lighting terms of one material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
  /// Ambient RGBA (`Ka`).
  pub ambient: [f32; 4],
  /// Diffuse RGBA (`Kd`).
  pub diffuse: [f32; 4],
  /// Specular RGBA (`Ks`).
  pub specular: [f32; 4],
  /// Specular exponent (`Ns`).
  pub shininess: f32,
}

impl Default for Material {
  fn default() -> Self {
    Material {
      ambient: [0.5, 0.5, 0.5, 1.0],
      diffuse: [0.5, 0.5, 0.5, 1.0],
      specular: [0.2, 0.2, 0.2, 1.0],
      shininess: 80.0,
    }
  }
}

/// Materials by name.
pub type MaterialMap = BTreeMap<String, Material>;

fn set_rgb(color: &mut [f32; 4], rgb: [f32; 3]) {
  color[..3].copy_from_slice(&rgb);
}

struct Parser {
  current: String,
  materials: MaterialMap,
}

impl Parser {
  fn entry(&mut self) -> &mut Material {
    self
      .materials
      .entry(self.current.clone())
      .or_insert_with(Material::default)
  }

  fn parse_line(&mut self, mut line: Line<'_>) -> Result<(), ParseError> {
    match line.keyword {
      "newmtl" => {
        self.current = line.parse_str("a material name")?.to_owned();
        self.entry();
      }
      "Ns" => {
        let shininess = line.parse_f32("a specular exponent")?;
        self.entry().shininess = shininess;
      }
      "Kd" => {
        let rgb = line.parse_triple()?;
        set_rgb(&mut self.entry().diffuse, rgb);
      }
      "Ks" => {
        let rgb = line.parse_triple()?;
        set_rgb(&mut self.entry().specular, rgb);
      }
      "Ka" => {
        let rgb = line.parse_triple()?;
        set_rgb(&mut self.entry().ambient, rgb);
      }
      // Transparency is not supported.
      "Tr" => {}
      other => log::trace!("mtl: skipping `{}` on line {}", other, line.number),
    }
    Ok(())
  }
}

/// Parses the text of an `.mtl` file.
///
/// Property lines that come before any `newmtl` apply to the material named
/// `""`.
pub fn parse<S: AsRef<str>>(input: S) -> Result<MaterialMap, ParseError> {
  let mut parser = Parser {
    current: String::new(),
    materials: MaterialMap::new(),
  };
  for line in lex::lines(input.as_ref()) {
    parser.parse_line(line)?;
  }
  Ok(parser.materials)
}

/// Reads and parses the `.mtl` file at `path`.
///
/// A library that cannot be read is not an error: the meshes that refer to
/// it simply find no material, so an empty map is returned.
pub fn load<P: AsRef<Path>>(path: P) -> Result<MaterialMap, Error> {
  let path = path.as_ref();
  let input = match fs::read_to_string(path) {
    Ok(input) => input,
    Err(e) => {
      log::warn!("material library `{}` not loaded: {}", path.display(), e);
      return Ok(MaterialMap::new());
    }
  };
  let materials = parse(input).map_err(|e| Error::parse(path, e))?;
  log::debug!(
    "loaded {} material(s) from `{}`",
    materials.len(),
    path.display()
  );
  Ok(materials)
}
