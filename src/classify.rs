use crate::error::OracleError;
use crate::geometry::VolumeGeometry;
use crate::region::Region;

/// Differing offsets partitioned by region, each in arrival order
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClassifiedOffsets {
    boot: Vec<u64>,
    fat: Vec<u64>,
    data: Vec<u64>,
}

impl ClassifiedOffsets {
    pub fn get(&self, region: Region) -> &[u64] {
        match region {
            Region::Boot => &self.boot,
            Region::Fat => &self.fat,
            Region::Data => &self.data,
        }
    }

    pub(crate) fn push(&mut self, region: Region, offset: u64) {
        match region {
            Region::Boot => self.boot.push(offset),
            Region::Fat => self.fat.push(offset),
            Region::Data => self.data.push(offset),
        }
    }

    pub fn len(&self) -> usize {
        self.boot.len() + self.fat.len() + self.data.len()
    }

    /// Empty means the two images are identical
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, &[u64])> {
        Region::ALL.into_iter().map(move |region| (region, self.get(region)))
    }
}

/// Single pass over an ascending offset stream
///
/// Stops at the first stream error or at an offset not greater than its
/// predecessor, nothing is returned in either case.
pub fn classify<I>(geometry: &VolumeGeometry, offsets: I) -> Result<ClassifiedOffsets, OracleError>
where
    I: IntoIterator<Item = Result<u64, OracleError>>,
{
    let boundary = geometry.boundary();
    debug!("Classify with boundary {:?}", boundary);
    let mut classified = ClassifiedOffsets::default();
    let mut previous: Option<u64> = None;
    for offset in offsets {
        let offset = offset?;
        if let Some(previous) = previous.filter(|&previous| offset <= previous) {
            return Err(OracleError::OutOfOrder { previous, offset });
        }
        previous = Some(offset);
        let region = boundary.region_of(offset);
        trace!("Offset {} in {} region", offset, region);
        classified.push(region, offset);
    }
    Ok(classified)
}
