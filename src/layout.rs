//! Conversions between byte offsets, sectors, clusters and regions
//!
//! All functions are pure over an explicit [`VolumeGeometry`]

use crate::error::LayoutError;
use crate::geometry::VolumeGeometry;
use crate::region::Region;
use crate::types::{ByteRange, ClusterID, SectorID};

/// Byte offsets where the FAT region and the cluster heap begin
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RegionBoundary {
    pub fat_start: u64,
    pub heap_start: u64,
}

impl RegionBoundary {
    pub fn new(geometry: &VolumeGeometry) -> Self {
        let shift = geometry.sector_size_shift();
        Self {
            fat_start: (geometry.fat_offset_sectors() as u64) << shift,
            heap_start: (geometry.cluster_heap_offset_sectors() as u64) << shift,
        }
    }

    /// Offsets past the end of volume are still considered data
    pub fn region_of(&self, offset: u64) -> Region {
        if offset < self.fat_start {
            Region::Boot
        } else if offset < self.heap_start {
            Region::Fat
        } else {
            Region::Data
        }
    }

    /// Byte span of a region, data region is open ended
    pub fn range(&self, region: Region) -> ByteRange {
        match region {
            Region::Boot => ByteRange { start: 0, length: self.fat_start },
            Region::Fat => ByteRange { start: self.fat_start, length: self.heap_start - self.fat_start },
            Region::Data => ByteRange { start: self.heap_start, length: u64::MAX - self.heap_start },
        }
    }
}

impl VolumeGeometry {
    pub fn boundary(&self) -> RegionBoundary {
        RegionBoundary::new(self)
    }
}

pub fn region_of(geometry: &VolumeGeometry, offset: u64) -> Region {
    geometry.boundary().region_of(offset)
}

fn span(index: u64, count: u64, shift: u8) -> Result<(u64, u64), LayoutError> {
    let overflow = || LayoutError::AddressOverflow { index, count };
    let start = index.checked_mul(1 << shift).ok_or_else(overflow)?;
    let length = count.checked_mul(1 << shift).ok_or_else(overflow)?;
    start.checked_add(length).ok_or_else(overflow)?;
    Ok((start, length))
}

pub fn sector_to_byte_range(
    geometry: &VolumeGeometry,
    sector: SectorID,
    count: u64,
) -> Result<ByteRange, LayoutError> {
    let (start, length) = span(sector.into(), count, geometry.sector_size_shift())?;
    Ok(ByteRange { start, length })
}

/// Cluster `index` maps to `heap_start + (index - 2) * cluster_size`
pub fn cluster_to_byte_range(
    geometry: &VolumeGeometry,
    cluster: ClusterID,
    count: u64,
) -> Result<ByteRange, LayoutError> {
    let cluster_count = geometry.cluster_count();
    let (index, limit) = (u32::from(cluster) as u64, cluster_count as u64 + 2);
    if !cluster.valid() || index >= limit || count > limit - index {
        warn!("Cluster {} count {} out of range", cluster, count);
        let cluster = cluster.into();
        return Err(LayoutError::ClusterOutOfRange { cluster, count, cluster_count });
    }
    let (offset, length) = span(cluster.offset() as u64, count, geometry.cluster_size_shift())?;
    let heap_start = geometry.boundary().heap_start;
    Ok(ByteRange { start: heap_start + offset, length })
}
