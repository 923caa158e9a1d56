#![doc = include_str!("../README.md")]

#[macro_use]
extern crate hex_literal;
#[macro_use]
extern crate log;

pub mod classify;
pub mod compare;
mod endian;
pub mod error;
pub mod geometry;
pub mod image;
pub mod io;
pub mod layout;
pub mod oracle;
mod region;
pub mod types;

pub use classify::{classify, ClassifiedOffsets};
pub use compare::Comparison;
pub use geometry::VolumeGeometry;
pub use image::Image;
pub use layout::{cluster_to_byte_range, region_of, sector_to_byte_range, RegionBoundary};
pub use region::boot::VolumeFlags;
pub use region::Region;

