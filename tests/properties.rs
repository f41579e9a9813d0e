//! Property tests over generated `.obj` text.

use std::fmt::Write;
use std::path::Path;

use proptest::prelude::*;
use wavefront_mesh::{LoadOptions, MaterialMap, Model};

fn build(input: &str) -> Model {
  Model::parse(
    Path::new("generated.obj"),
    input,
    &LoadOptions::default(),
    |_| Ok(MaterialMap::new()),
  )
  .unwrap()
}

fn vertex_lines(vertices: &[[i16; 3]]) -> String {
  let mut text = String::new();
  for v in vertices {
    writeln!(text, "v {} {} {}", v[0], v[1], v[2]).unwrap();
  }
  text
}

/// A vertex pool plus faces whose corners index into it (0-based).
fn pool_and_faces() -> impl Strategy<Value = (Vec<[i16; 3]>, Vec<[usize; 3]>)> {
  prop::collection::vec(prop::array::uniform3(any::<i16>()), 1..20).prop_flat_map(|vertices| {
    let n = vertices.len();
    let faces = prop::collection::vec(prop::array::uniform3(0..n), 1..30);
    (Just(vertices), faces)
  })
}

proptest! {
  #[test]
  fn vertex_only_faces_fill_nine_floats_each((vertices, faces) in pool_and_faces()) {
    let mut text = vertex_lines(&vertices);
    for f in &faces {
      writeln!(text, "f {} {} {}", f[0] + 1, f[1] + 1, f[2] + 1).unwrap();
    }

    let model = build(&text);
    prop_assert_eq!(model.meshes.len(), 1);
    let mesh = &model.meshes[0];
    prop_assert!(!mesh.has_normal);
    prop_assert_eq!(mesh.vertices.len(), 9 * faces.len());
  }

  #[test]
  fn resolved_corners_are_the_indexed_pool_entries((vertices, faces) in pool_and_faces()) {
    let mut text = vertex_lines(&vertices);
    for f in &faces {
      writeln!(text, "f {} {} {}", f[0] + 1, f[1] + 1, f[2] + 1).unwrap();
    }

    let model = build(&text);
    let corners: Vec<&[f32]> = model.meshes[0].vertices.chunks(3).collect();
    let expected = faces.iter().flat_map(|f| f.iter()).map(|&i| {
      let v = vertices[i];
      [f32::from(v[0]), f32::from(v[1]), f32::from(v[2])]
    });
    for (got, want) in corners.iter().zip(expected) {
      prop_assert_eq!(*got, &want[..]);
    }
  }

  #[test]
  fn normals_everywhere_give_parallel_buffers(
    (vertices, faces) in pool_and_faces(),
    normal_count in 1usize..5,
  ) {
    let mut text = vertex_lines(&vertices);
    for i in 0..normal_count {
      writeln!(text, "vn 0 {} 1", i).unwrap();
    }
    for (k, f) in faces.iter().enumerate() {
      let n = k % normal_count + 1;
      writeln!(text, "f {}//{} {}//{} {}//{}", f[0] + 1, n, f[1] + 1, n, f[2] + 1, n).unwrap();
    }

    let model = build(&text);
    let mesh = &model.meshes[0];
    prop_assert!(mesh.has_normal);
    prop_assert_eq!(mesh.normals.len(), mesh.vertices.len());
  }

  #[test]
  fn faces_group_under_the_material_active_when_read(
    (vertices, faces) in pool_and_faces(),
    materials in prop::collection::vec(prop::option::of(0usize..3), 1..30),
  ) {
    // `None` leaves the active material unchanged before the face.
    let names = ["Red", "Green", "Blue"];
    let mut text = vertex_lines(&vertices);
    let mut active = "";
    let mut expected: std::collections::BTreeMap<&str, usize> = Default::default();
    for (f, switch) in faces.iter().zip(materials.iter().cycle()) {
      if let Some(m) = switch {
        active = names[*m];
        writeln!(text, "usemtl {}", active).unwrap();
      }
      writeln!(text, "f {} {} {}", f[0] + 1, f[1] + 1, f[2] + 1).unwrap();
      *expected.entry(active).or_default() += 1;
    }

    let model = build(&text);
    prop_assert_eq!(model.meshes.len(), expected.len());
    for (name, count) in expected {
      let mesh = model.mesh(name).unwrap();
      prop_assert_eq!(mesh.triangle_count(), count);
    }
  }
}
