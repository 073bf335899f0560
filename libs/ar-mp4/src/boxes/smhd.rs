use four_cc::FourCC;

use crate::Mp4BoxError;
use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box};

use std::mem::size_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundMediaHeaderBox {
    pub balance: i16,
}

impl SoundMediaHeaderBox {
    pub fn new() -> Self {
        SoundMediaHeaderBox { balance: 0 }
    }
}

impl Default for SoundMediaHeaderBox {
    fn default() -> Self {
        SoundMediaHeaderBox::new()
    }
}

impl Mp4Box for SoundMediaHeaderBox {
    const NAME: FourCC = FourCC(*b"smhd");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(0, 0))
    }

    fn content_size(&self) -> u64 {
        size_of::<i16>() as u64 + // balance
        size_of::<u16>() as u64 // reserved
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor.write_i16(self.balance).write_u16(0); // reserved

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let _ = FullBoxHeader::read(cursor)?;

        let balance = cursor.read_i16()?;
        cursor.skip(2)?; // reserved

        Ok(SoundMediaHeaderBox { balance })
    }
}

#[test]
fn round_trips() {
    let smhd = SoundMediaHeaderBox { balance: -256 };
    let bytes = smhd.to_bytes().unwrap();

    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[4..8], b"smhd");
    assert_eq!(SoundMediaHeaderBox::from_bytes(&bytes).unwrap(), smhd);
}
