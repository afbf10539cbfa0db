/// STL loader for binary and ASCII formats
///
/// STL facets wind counterclockwise seen from outside. Mesh faces wind the
/// other way (see [`crate::render::faces_camera`]), so the second and third
/// vertex of every facet are swapped on load. Stored facet normals are
/// ignored.
use std::path::Path;

use nom::{
    bytes::complete::{tag, take},
    character::complete::{multispace0, multispace1, not_line_ending},
    combinator::map,
    multi::{count, many0},
    number::complete::{float, le_f32, le_u16, le_u32},
    sequence::{preceded, tuple},
    IResult,
};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{Face, Mesh};
use crate::math::Vec3;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

fn facet_to_face(a: Vec3, b: Vec3, c: Vec3) -> Face {
    Face::new(a, c, b)
}

// Binary

fn binary_vec3(input: &[u8]) -> IResult<&[u8], Vec3> {
    map(tuple((le_f32, le_f32, le_f32)), |(x, y, z)| Vec3::new(x, y, z))(input)
}

fn binary_facet(input: &[u8]) -> IResult<&[u8], Face> {
    let (input, _normal) = binary_vec3(input)?;
    let (input, (a, b, c)) = tuple((binary_vec3, binary_vec3, binary_vec3))(input)?;
    let (input, _attributes) = le_u16(input)?;
    Ok((input, facet_to_face(a, b, c)))
}

fn binary_header(input: &[u8]) -> IResult<&[u8], u32> {
    preceded(take(HEADER_LEN), le_u32)(input)
}

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh> {
    let (body, triangle_count) = binary_header(data)
        .map_err(|_| Error::truncated_stl(HEADER_LEN + 4, data.len()))?;

    let triangle_count = triangle_count as usize;
    let expected = HEADER_LEN + 4 + triangle_count * FACET_LEN;
    if data.len() < expected {
        return Err(Error::truncated_stl(expected, data.len()));
    }

    let (_, faces) = count(binary_facet, triangle_count)(body)
        .map_err(|e| Error::invalid_stl(&e.to_string()))?;
    Ok(Mesh::from_faces(faces))
}

// ASCII

fn ascii_vec3(input: &str) -> IResult<&str, Vec3> {
    let (input, x) = preceded(multispace1, float)(input)?;
    let (input, y) = preceded(multispace1, float)(input)?;
    let (input, z) = preceded(multispace1, float)(input)?;
    Ok((input, Vec3::new(x, y, z)))
}

fn ascii_vertex(input: &str) -> IResult<&str, Vec3> {
    preceded(preceded(multispace0, tag("vertex")), ascii_vec3)(input)
}

fn ascii_facet(input: &str) -> IResult<&str, Face> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = ascii_vec3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, (a, b, c)) = tuple((ascii_vertex, ascii_vertex, ascii_vertex))(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((input, facet_to_face(a, b, c)))
}

fn ascii_solid(input: &str) -> IResult<&str, Vec<Face>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _name) = not_line_ending(input)?;
    let (input, faces) = many0(ascii_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    Ok((input, faces))
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Mesh> {
    let (_, faces) = ascii_solid(input).map_err(|e| Error::invalid_stl(&e.to_string()))?;
    Ok(Mesh::from_faces(faces))
}

/// Detect and parse STL data (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<Mesh> {
    // Binary files may also start with "solid", so fall back on failure
    if data.starts_with(b"solid") {
        if let Ok(mesh) = std::str::from_utf8(data)
            .map_err(|e| Error::invalid_stl(&e.to_string()))
            .and_then(parse_ascii_stl)
        {
            return Ok(mesh);
        }
    }
    parse_binary_stl(data)
}

/// Read and parse an STL file from disk
pub fn load_stl(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let mesh = parse_stl(&data)?;
    debug!(path = %path.display(), faces = mesh.face_count(), "Loaded STL");
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASCII_TRIANGLE: &str = "solid tri
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1.5 0
    endloop
  endfacet
endsolid tri
";

    fn binary_triangle() -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data.extend_from_slice(&1u32.to_le_bytes());
        let floats = [0.0f32, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.5, 0.0];
        for f in floats {
            data.extend_from_slice(&f.to_le_bytes());
        }
        data.extend_from_slice(&0u16.to_le_bytes());
        data
    }

    fn assert_triangle(mesh: &Mesh) {
        assert_eq!(mesh.face_count(), 1);
        let face = mesh.faces()[0];
        assert_eq!(face.a, Vec3::new(0.0, 0.0, 0.0));
        // Winding flipped on load
        assert_eq!(face.b, Vec3::new(0.0, 1.5, 0.0));
        assert_eq!(face.c, Vec3::new(1.0, 0.0, 0.0));
        assert!(face.normal().z < 0.0);
    }

    #[test]
    fn test_parse_binary_header() {
        let mut data = vec![0u8; 84];
        // Set triangle count to 0
        data[80..84].copy_from_slice(&0u32.to_le_bytes());

        let mesh = parse_binary_stl(&data).unwrap();
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_parse_binary_triangle() {
        assert_triangle(&parse_binary_stl(&binary_triangle()).unwrap());
    }

    #[test]
    fn test_binary_truncated() {
        assert!(matches!(parse_binary_stl(&[0u8; 20]), Err(Error::Parse(_))));

        let mut data = binary_triangle();
        data.truncate(data.len() - 10);
        assert!(matches!(parse_binary_stl(&data), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_ascii_triangle() {
        assert_triangle(&parse_ascii_stl(ASCII_TRIANGLE).unwrap());
    }

    #[test]
    fn test_parse_ascii_rejects_garbage() {
        assert!(parse_ascii_stl("solid x\n facet banana\nendsolid").is_err());
    }

    #[test]
    fn test_parse_stl_detects_format() {
        assert_triangle(&parse_stl(ASCII_TRIANGLE.as_bytes()).unwrap());
        assert_triangle(&parse_stl(&binary_triangle()).unwrap());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_stl("/nonexistent/definitely/missing.stl"),
            Err(Error::Io(_))
        ));
    }
}
