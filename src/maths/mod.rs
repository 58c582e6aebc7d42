pub mod fbm;
pub mod geometry;
pub mod matrix;
pub mod noise;

pub use fbm::{FbmConfig, FractionalBrownianMotion, NoiseKind};
pub use geometry::{cartesian_to_spherical, cube, flat_normals, spherical_to_cartesian, Spherical};
pub use matrix::{normal_matrix, Transform2D, Transform3D};
pub use noise::{create_generator, HeightField, NoiseConfig, NoiseGenerator};
