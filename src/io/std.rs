use std::fs;
use std::io::{Cursor, Read, Result, Seek, SeekFrom, Write};
use std::path::Path;

fn read_at<S: Read + Seek>(stream: &mut S, offset: u64, buf: &mut [u8]) -> Result<usize> {
    stream.seek(SeekFrom::Start(offset))?;
    stream.read(buf)
}

fn write_at<S: Write + Seek>(stream: &mut S, offset: u64, data: &[u8]) -> Result<usize> {
    stream.seek(SeekFrom::Start(offset))?;
    stream.write(data)
}

#[derive(Debug)]
pub struct FileIO {
    file: fs::File,
}

impl FileIO {
    /// Open for inspection only, writes will fail
    pub fn open<P: AsRef<Path>>(filepath: P) -> Result<Self> {
        let file = fs::File::open(filepath)?;
        Ok(Self { file })
    }
}

impl super::IO for FileIO {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        read_at(&mut self.file, offset, buf)
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<usize> {
        write_at(&mut self.file, offset, data)
    }

    fn size(&mut self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    fn flush(&mut self) -> Result<()> {
        self.file.flush()
    }
}

/// Image held in memory, writes never grow it
#[derive(Debug, Default)]
pub struct MemoryIO(Cursor<Vec<u8>>);

impl MemoryIO {
    pub fn new(image: Vec<u8>) -> Self {
        Self(Cursor::new(image))
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0.into_inner()
    }
}

impl super::IO for MemoryIO {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        read_at(&mut self.0, offset, buf)
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<usize> {
        let size = self.0.get_ref().len() as u64;
        let length = size.saturating_sub(offset).min(data.len() as u64) as usize;
        if length == 0 {
            return Ok(0);
        }
        write_at(&mut self.0, offset, &data[..length])
    }

    fn size(&mut self) -> Result<u64> {
        Ok(self.0.get_ref().len() as u64)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
