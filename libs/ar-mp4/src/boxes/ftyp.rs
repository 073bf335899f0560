use four_cc::FourCC;

use crate::{BoxHeader, ByteCursor, Mp4Box, Mp4BoxError};

use std::mem::size_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTypeBox {
    major_brand: FourCC,
    minor_version: u32,
    compatible_brands: Vec<FourCC>,
}

impl FileTypeBox {
    pub fn new(major_brand: FourCC, minor_version: u32, compatible_brands: Vec<FourCC>) -> Self {
        FileTypeBox {
            major_brand,
            minor_version,
            compatible_brands,
        }
    }
}

impl Mp4Box for FileTypeBox {
    const NAME: FourCC = FourCC(*b"ftyp");

    fn content_size(&self) -> u64 {
        size_of::<u32>() as u64 + // major_brand
        size_of::<u32>() as u64 + // minor_version
        size_of::<u32>() as u64 * self.compatible_brands.len() as u64 // compatible_brands
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor
            .write_fourcc(self.major_brand)
            .write_u32(self.minor_version);

        for &brand in &self.compatible_brands {
            cursor.write_fourcc(brand);
        }

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let major_brand = cursor.read_fourcc()?;
        let minor_version = cursor.read_u32()?;

        let mut rest = header.content_len().saturating_sub(8);
        let mut compatible_brands = Vec::new();

        while rest >= 4 {
            compatible_brands.push(cursor.read_fourcc()?);
            rest -= 4;
        }

        Ok(FileTypeBox {
            major_brand,
            minor_version,
            compatible_brands,
        })
    }
}

#[test]
fn round_trips() {
    let ftyp = FileTypeBox::new(
        FourCC(*b"isom"),
        0,
        vec![FourCC(*b"isom"), FourCC(*b"iso5"), FourCC(*b"dash")],
    );

    let bytes = ftyp.to_bytes().unwrap();

    assert_eq!(&bytes[4..8], b"ftyp");
    assert_eq!(bytes.len() as u64, ftyp.size());
    assert_eq!(FileTypeBox::from_bytes(&bytes).unwrap(), ftyp);
}
