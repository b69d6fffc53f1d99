//! Plain-text world file reader.
//!
//! The format is a flat stream of integers separated by whitespace or
//! commas. A `*` starts a comment that runs to the end of the line.
//!
//! ```text
//! object-count
//! per object:
//!   origin x y z
//!   angles x y z          (binary degrees)
//!   scale
//!   vertex-count
//!   vertex-count * (x y z)
//!   polygon-count
//!   polygon-count * (n, n indices, colour)
//!   convex flag           (nonzero enables backface culling)
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::info;

use super::geometry::{Object, Polygon, World};
use crate::math::ivec3::IVec3;

/// Errors from reading or parsing a world file.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    UnexpectedEof {
        expected: &'static str,
    },
    InvalidNumber {
        token: String,
        line: usize,
    },
    VertexIndexOutOfRange {
        object: usize,
        polygon: usize,
        index: i32,
    },
    DegeneratePolygon {
        object: usize,
        polygon: usize,
        vertices: i32,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use LoadError::*;
        match self {
            Io(err) => write!(f, "failed to read world file: {}", err),
            UnexpectedEof { expected } => {
                write!(f, "world file ended while reading {}", expected)
            }
            InvalidNumber { token, line } => {
                write!(f, "line {}: '{}' is not a valid number", line, token)
            }
            VertexIndexOutOfRange {
                object,
                polygon,
                index,
            } => write!(
                f,
                "object {} polygon {}: vertex index {} out of range",
                object, polygon, index
            ),
            DegeneratePolygon {
                object,
                polygon,
                vertices,
            } => write!(
                f,
                "object {} polygon {}: needs at least 3 vertices, has {}",
                object, polygon, vertices
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(x: io::Error) -> LoadError {
        LoadError::Io(x)
    }
}

struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
}

impl<'a> Tokens<'a> {
    fn new(src: &'a str) -> Self {
        let inner = src.lines().enumerate().flat_map(|(n, line)| {
            let code = line.split('*').next().unwrap_or("");
            code.split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
                .map(move |t| (n + 1, t))
        });
        Self {
            inner: Box::new(inner),
        }
    }

    fn next_int(&mut self, expected: &'static str) -> Result<i32, LoadError> {
        let (line, token) = self
            .inner
            .next()
            .ok_or(LoadError::UnexpectedEof { expected })?;
        token.parse().map_err(|_| LoadError::InvalidNumber {
            token: token.to_string(),
            line,
        })
    }

    fn next_count(&mut self, expected: &'static str) -> Result<usize, LoadError> {
        let n = self.next_int(expected)?;
        Ok(n.max(0) as usize)
    }

    fn next_ivec3(&mut self, expected: &'static str) -> Result<IVec3, LoadError> {
        Ok(IVec3::new(
            self.next_int(expected)?,
            self.next_int(expected)?,
            self.next_int(expected)?,
        ))
    }
}

/// Parses world text into a [`World`]. Every object starts dirty.
///
/// Counts in the file are not trusted for allocation; storage grows only as
/// entries are actually read.
pub fn parse_world(src: &str) -> Result<World, LoadError> {
    let mut tokens = Tokens::new(src);
    let object_count = tokens.next_count("object count")?;
    let mut objects = Vec::new();

    for obj_idx in 0..object_count {
        let origin = tokens.next_ivec3("object origin")?;
        let angles = tokens.next_ivec3("object angles")?;
        let scale = tokens.next_int("object scale")?;

        let vertex_count = tokens.next_count("vertex count")?;
        let mut vertices = Vec::new();
        for _ in 0..vertex_count {
            vertices.push(tokens.next_ivec3("vertex")?);
        }

        let polygon_count = tokens.next_count("polygon count")?;
        let mut polygons = Vec::new();
        for poly_idx in 0..polygon_count {
            let n = tokens.next_int("polygon vertex count")?;
            if n < 3 {
                return Err(LoadError::DegeneratePolygon {
                    object: obj_idx,
                    polygon: poly_idx,
                    vertices: n,
                });
            }
            let mut indices = Vec::new();
            for _ in 0..n {
                let index = tokens.next_int("polygon vertex index")?;
                if index < 0 || index as usize >= vertex_count {
                    return Err(LoadError::VertexIndexOutOfRange {
                        object: obj_idx,
                        polygon: poly_idx,
                        index,
                    });
                }
                indices.push(index as usize);
            }
            let color = tokens.next_int("polygon colour")?;
            polygons.push(Polygon::new(indices, color.clamp(0, 255) as u8));
        }

        let convex = tokens.next_int("convex flag")? != 0;

        objects.push(
            Object::new(vertices, polygons)
                .with_origin(origin)
                .with_angles(angles)
                .with_scale(scale)
                .with_convex(convex),
        );
    }

    Ok(World::new(objects))
}

/// Reads and parses a world file from disk.
pub fn load_world(path: impl AsRef<Path>) -> Result<World, LoadError> {
    let path = path.as_ref();
    let src = fs::read_to_string(path)?;
    let world = parse_world(&src)?;
    info!(
        "Loaded world {}: {} objects, {} polygons",
        path.display(),
        world.object_count(),
        world.polygon_count()
    );
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "\
* one triangle
1
10, 20, 30   * origin
0, 64, 0
2
3
0,0,0  10,0,0  0,10,0
1
3, 0,1,2, 14
1
";

    #[test]
    fn test_parse_single_object() {
        let world = parse_world(TRIANGLE).unwrap();
        assert_eq!(world.object_count(), 1);
        let obj = &world.objects()[0];
        assert_eq!(obj.origin, IVec3::new(10, 20, 30));
        assert_eq!(obj.angles, IVec3::new(0, 64, 0));
        assert_eq!(obj.scale, 2);
        assert_eq!(obj.vertices.len(), 3);
        assert_eq!(obj.vertices[1].local, IVec3::new(10, 0, 0));
        assert_eq!(obj.polygons[0].vertices, vec![0, 1, 2]);
        assert_eq!(obj.polygons[0].color, 14);
        assert!(obj.convex);
        assert!(obj.dirty);
    }

    #[test]
    fn test_truncated_file() {
        let err = parse_world("1\n0 0 0\n0 0 0\n1\n3\n").unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_invalid_token_reports_line() {
        let err = parse_world("1\n0 0 zero\n").unwrap_err();
        match err {
            LoadError::InvalidNumber { token, line } => {
                assert_eq!(token, "zero");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_index_out_of_range() {
        let src = "1  0 0 0  0 0 0  1  3  0 0 0 1 0 0 0 1 0  1  3 0 1 3 5  0";
        let err = parse_world(src).unwrap_err();
        assert!(matches!(
            err,
            LoadError::VertexIndexOutOfRange { index: 3, .. }
        ));
    }

    #[test]
    fn test_degenerate_polygon() {
        let src = "1  0 0 0  0 0 0  1  2  0 0 0 1 0 0  1  2 0 1 5  0";
        let err = parse_world(src).unwrap_err();
        assert!(matches!(
            err,
            LoadError::DegeneratePolygon { vertices: 2, .. }
        ));
    }

    #[test]
    fn test_huge_counts_end_at_eof() {
        let err = parse_world("2000000000 0 0 0").unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedEof { .. }));

        let err = parse_world("1  0 0 0  0 0 0  1  2147483647  0 0 0").unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedEof { expected: "vertex" }));

        let src = "1  0 0 0  0 0 0  1  3  0 0 0 1 0 0 0 1 0  2000000000  3 0 1 2 5";
        let err = parse_world(src).unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedEof { .. }));

        let src = "1  0 0 0  0 0 0  1  3  0 0 0 1 0 0 0 1 0  1  2147483647 0 1 2";
        let err = parse_world(src).unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnexpectedEof {
                expected: "polygon vertex index"
            }
        ));
    }

    #[test]
    fn test_bundled_world_parses() {
        let world = parse_world(include_str!("../../assets/world.wld")).unwrap();
        assert!(world.object_count() > 0);
        assert!(world.polygon_count() >= world.object_count());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_world("/nonexistent/skyward/world.wld").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
