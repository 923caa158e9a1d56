use std::fs::File;
use std::io::BufReader;

use diffexfat::io::std::FileIO;
use diffexfat::io::IO;
use diffexfat::Image;

use crate::error::Error;

fn file(path: &str) -> Result<FileIO, Error> {
    FileIO::open(path).map_err(|source| Error::Open { path: path.into(), source })
}

pub fn open(path: &str) -> Result<Image<FileIO>, Error> {
    Ok(Image::open(file(path)?)?)
}

pub fn size(path: &str) -> Result<u64, Error> {
    Ok(file(path)?.size()?)
}

pub fn reader(path: &str) -> Result<BufReader<File>, Error> {
    let file = File::open(path).map_err(|source| Error::Open { path: path.into(), source })?;
    Ok(BufReader::new(file))
}
