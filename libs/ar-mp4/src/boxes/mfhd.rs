use four_cc::FourCC;

use crate::Mp4BoxError;
use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFragmentHeaderBox {
    pub sequence_number: u32,
}

impl Mp4Box for MovieFragmentHeaderBox {
    const NAME: FourCC = FourCC(*b"mfhd");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(0, 0))
    }

    fn content_size(&self) -> u64 {
        4
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor.write_u32(self.sequence_number);

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let _ = FullBoxHeader::read(cursor)?;

        let sequence_number = cursor.read_u32()?;

        Ok(MovieFragmentHeaderBox { sequence_number })
    }
}
