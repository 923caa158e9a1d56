use crate::classify::{classify, ClassifiedOffsets};
use crate::error::{Error, OracleError, Result};
use crate::geometry::VolumeGeometry;
use crate::image::Image;
use crate::io;

fn first_difference(old: &[u8], new: &[u8]) -> Option<usize> {
    let position = old.iter().zip(new).position(|(old, new)| old != new);
    position.or((old.len() != new.len()).then(|| old.len().min(new.len())))
}

/// Two images verified to share size and boot sector, hence one geometry
#[derive(Copy, Clone, Debug)]
pub struct Comparison {
    geometry: VolumeGeometry,
    size: u64,
}

impl Comparison {
    pub fn new<A: io::IO, B: io::IO>(old: &mut Image<A>, new: &mut Image<B>) -> Result<Self> {
        let (old_size, new_size) = (old.size()?, new.size()?);
        if old_size != new_size {
            return Err(Error::SizeMismatch { old: old_size, new: new_size });
        }
        if let Some(offset) = first_difference(old.boot_sector(), new.boot_sector()) {
            return Err(Error::GeometryMismatch { offset });
        }
        debug!("Comparing images of {} bytes", old_size);
        Ok(Self { geometry: *old.geometry(), size: old_size })
    }

    pub fn geometry(&self) -> &VolumeGeometry {
        &self.geometry
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn classify<I>(&self, offsets: I) -> Result<ClassifiedOffsets>
    where
        I: IntoIterator<Item = core::result::Result<u64, OracleError>>,
    {
        Ok(classify(&self.geometry, offsets)?)
    }
}
