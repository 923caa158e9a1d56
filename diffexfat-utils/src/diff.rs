use std::io::{self, Write};

use diffexfat::error::Error as DiffError;
use diffexfat::oracle::{offsets, ByteDiff};
use diffexfat::{ClassifiedOffsets, Comparison};

use super::{cmp, image};
use crate::error::Error;

fn print(classified: &ClassifiedOffsets) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for (region, offsets) in classified.iter() {
        writeln!(stdout, "===== {} Region =====", region)?;
        for offset in offsets {
            write!(stdout, "{} -> ", offset)?;
        }
        writeln!(stdout, "NULL")?;
    }
    stdout.flush()
}

/// Runs before any boot sector is read, a short image is a size mismatch first
fn check_sizes(old: &str, new: &str) -> Result<(), Error> {
    let (old, new) = (image::size(old)?, image::size(new)?);
    if old != new {
        return Err(DiffError::SizeMismatch { old, new }.into());
    }
    Ok(())
}

pub fn diff(old: &str, new: &str, use_cmp: bool) -> Result<(), Error> {
    check_sizes(old, new)?;
    let mut old_image = image::open(old)?;
    let mut new_image = image::open(new)?;
    let comparison = Comparison::new(&mut old_image, &mut new_image)?;
    let classified = if use_cmp {
        cmp::classify(&comparison, old, new)?
    } else {
        let diff = ByteDiff::new(image::reader(old)?, image::reader(new)?);
        comparison.classify(offsets(diff))?
    };
    info!("{} bytes differ", classified.len());
    Ok(print(&classified)?)
}
