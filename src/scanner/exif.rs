use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{In, Reader, Tag};

/// Ordre de préférence des dates EXIF
const DATE_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

/// Date de prise de vue, None si le fichier n'en porte pas
pub fn capture_date(path: &Path) -> Option<String> {
    let mut reader = BufReader::new(File::open(path).ok()?);
    let exif = Reader::new().read_from_container(&mut reader).ok()?;

    exif.fields()
        .filter(|field| field.ifd_num == In::PRIMARY)
        .filter_map(|field| {
            let rank = DATE_TAGS.iter().position(|tag| *tag == field.tag)?;
            Some((rank, field))
        })
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, field)| field.display_value().to_string())
        .filter(|date| !date.trim().is_empty())
}
