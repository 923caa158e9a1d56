//! Producers of the ascending stream of differing byte offsets

use std::io::{self, BufRead, Read};

use derive_more::Display;

use crate::error::OracleError;

const CHUNK_SIZE: usize = 64 * 1024;

/// A byte that differs between two images, offset counted from 0
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
#[display("{offset}: {old:#04x} -> {new:#04x}")]
pub struct Difference {
    pub offset: u64,
    pub old: u8,
    pub new: u8,
}

/// Keeps only the offsets of a difference stream
pub fn offsets<I>(differences: I) -> impl Iterator<Item = Result<u64, OracleError>>
where
    I: IntoIterator<Item = Result<Difference, OracleError>>,
{
    differences.into_iter().map(|result| result.map(|difference| difference.offset))
}

fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(size) => filled += size,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// In-process comparison of two byte streams, chunk by chunk
pub struct ByteDiff<A, B> {
    old: A,
    new: B,
    old_chunk: Vec<u8>,
    new_chunk: Vec<u8>,
    base: u64, // image offset of chunk start
    position: usize,
    length: usize,
    truncated: bool,
    done: bool,
}

impl<A: Read, B: Read> ByteDiff<A, B> {
    pub fn new(old: A, new: B) -> Self {
        Self::with_chunk_size(old, new, CHUNK_SIZE)
    }

    pub fn with_chunk_size(old: A, new: B, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            old,
            new,
            old_chunk: vec![0; chunk_size],
            new_chunk: vec![0; chunk_size],
            base: 0,
            position: 0,
            length: 0,
            truncated: false,
            done: false,
        }
    }

    fn refill(&mut self) -> io::Result<()> {
        self.base += self.length as u64;
        let old_size = fill(&mut self.old, &mut self.old_chunk)?;
        let new_size = fill(&mut self.new, &mut self.new_chunk)?;
        self.position = 0;
        self.length = old_size.min(new_size);
        self.truncated = old_size != new_size;
        Ok(())
    }
}

impl<A: Read, B: Read> Iterator for ByteDiff<A, B> {
    type Item = Result<Difference, OracleError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let (old, new) = (&self.old_chunk[..self.length], &self.new_chunk[..self.length]);
            let found = old[self.position..]
                .iter()
                .zip(&new[self.position..])
                .position(|(old, new)| old != new);
            if let Some(index) = found {
                let index = self.position + index;
                self.position = index + 1;
                let offset = self.base + index as u64;
                return Some(Ok(Difference { offset, old: old[index], new: new[index] }));
            }
            self.position = self.length;
            if self.truncated {
                self.done = true;
                return Some(Err(OracleError::LengthMismatch(self.base + self.length as u64)));
            }
            if let Err(e) = self.refill() {
                self.done = true;
                return Some(Err(e.into()));
            }
            if self.length == 0 && !self.truncated {
                self.done = true;
            }
        }
        None
    }
}

/// Parses `cmp -l` output: 1-based decimal offset, old and new byte in octal
pub struct CmpListing<R> {
    lines: io::Lines<R>,
    line: u64,
}

impl<R: BufRead> CmpListing<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), line: 0 }
    }
}

fn parse(line: u64, text: &str) -> Result<Difference, OracleError> {
    let malformed = || OracleError::Malformed { line, text: text.to_owned() };
    let mut fields = text.split_whitespace();
    let (Some(offset), Some(old), Some(new), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed());
    };
    let offset: u64 = offset.parse().map_err(|_| malformed())?;
    let old = u8::from_str_radix(old, 8).map_err(|_| malformed())?;
    let new = u8::from_str_radix(new, 8).map_err(|_| malformed())?;
    let offset = offset.checked_sub(1).ok_or_else(malformed)?;
    Ok(Difference { offset, old, new })
}

impl<R: BufRead> Iterator for CmpListing<R> {
    type Item = Result<Difference, OracleError>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = match self.lines.next()? {
            Ok(text) => text,
            Err(e) => return Some(Err(e.into())),
        };
        self.line += 1;
        Some(parse(self.line, &text))
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::{offsets, ByteDiff, CmpListing, Difference};
    use crate::error::OracleError;

    fn diff(old: &[u8], new: &[u8], chunk_size: usize) -> Vec<Difference> {
        let diff = ByteDiff::with_chunk_size(Cursor::new(old), Cursor::new(new), chunk_size);
        diff.collect::<Result<_, _>>().unwrap()
    }

    #[test]
    fn test_identical() {
        let image = vec![0x5Au8; 10000];
        assert!(diff(&image, &image, 4096).is_empty());
        assert!(diff(&[], &[], 16).is_empty());
    }

    #[test]
    fn test_differences_across_chunks() {
        let old = vec![0u8; 100];
        let mut new = old.clone();
        for offset in [0, 15, 16, 17, 63, 99] {
            new[offset] = offset as u8 + 1;
        }
        for chunk_size in [1, 7, 16, 64, 4096] {
            let found = diff(&old, &new, chunk_size);
            let offsets: Vec<u64> = found.iter().map(|d| d.offset).collect();
            assert_eq!(offsets, vec![0, 15, 16, 17, 63, 99], "chunk size {}", chunk_size);
            assert_eq!(found[1], Difference { offset: 15, old: 0, new: 16 });
        }
    }

    #[test]
    fn test_length_mismatch() {
        let old = vec![1u8; 40];
        let mut new = vec![1u8; 32];
        new[3] = 0;
        let mut diff = ByteDiff::with_chunk_size(Cursor::new(old), Cursor::new(new), 16);
        assert_eq!(diff.next().unwrap().unwrap().offset, 3);
        assert!(matches!(diff.next(), Some(Err(OracleError::LengthMismatch(32)))));
        assert!(diff.next().is_none());
    }

    #[test]
    fn test_cmp_listing() {
        let output = "    101   0 377\n  20001  12  13\n 500001 377   0\n";
        let listing = CmpListing::new(Cursor::new(output));
        let found: Vec<Difference> = listing.collect::<Result<_, _>>().unwrap();
        assert_eq!(found[0], Difference { offset: 100, old: 0, new: 0xFF });
        assert_eq!(found[1], Difference { offset: 20000, old: 0o12, new: 0o13 });

        let listing = CmpListing::new(Cursor::new(output));
        let found: Vec<u64> = offsets(listing).collect::<Result<_, _>>().unwrap();
        assert_eq!(found, vec![100, 20000, 500000]);
    }

    #[test]
    fn test_cmp_listing_malformed() {
        for text in ["cmp: EOF on b.img", "12 8 0", "0 1 2", "12 1", "12 1 2 3", "-5 1 2", "12 400 0"] {
            let output = format!("1 0 1\n{}\n", text);
            let mut listing = CmpListing::new(Cursor::new(output));
            assert!(listing.next().unwrap().is_ok());
            match listing.next() {
                Some(Err(OracleError::Malformed { line: 2, text: t })) => assert_eq!(t, text),
                other => panic!("{:?} not rejected: {:?}", text, other),
            }
        }
    }
}
