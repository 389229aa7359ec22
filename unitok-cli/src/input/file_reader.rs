//! Buffered file input with byte-order-mark detection

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use encoding_rs::Encoding;
use log::debug;

use crate::CliResult;

/// An opened input file. When a BOM was found it has been consumed and its
/// encoding is reported so the tokenizer can switch over.
pub struct FileInput {
    pub reader: BufReader<File>,
    pub bom_encoding: Option<&'static Encoding>,
}

/// Open `path`, sniff a BOM, and position the reader after it.
pub fn open(path: &Path) -> CliResult<FileInput> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let head = reader.fill_buf()?;
    let bom_encoding = match Encoding::for_bom(head) {
        Some((encoding, bom_len)) => {
            debug!("{}: {} BOM detected", path.display(), encoding.name());
            reader.consume(bom_len);
            Some(encoding)
        }
        None => None,
    };
    Ok(FileInput {
        reader,
        bom_encoding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_utf8_bom_is_consumed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xEF\xBB\xBFhello").unwrap();
        let mut input = open(file.path()).unwrap();
        assert_eq!(input.bom_encoding.map(|e| e.name()), Some("UTF-8"));
        let mut rest = String::new();
        std::io::Read::read_to_string(&mut input.reader, &mut rest).unwrap();
        assert_eq!(rest, "hello");
    }

    #[test]
    fn test_plain_file_has_no_bom() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello").unwrap();
        let input = open(file.path()).unwrap();
        assert!(input.bom_encoding.is_none());
    }
}
