use four_cc::FourCC;

use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box, Mp4BoxError};

use std::mem::size_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackFragmentBaseMediaDecodeTimeBox {
    pub base_media_decode_time: u64,
}

impl Mp4Box for TrackFragmentBaseMediaDecodeTimeBox {
    const NAME: FourCC = FourCC(*b"tfdt");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(1, 0))
    }

    fn content_size(&self) -> u64 {
        size_of::<u64>() as u64 // base_media_decode_time
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor.write_u64(self.base_media_decode_time);

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let full_box = FullBoxHeader::read(cursor)?;

        let base_media_decode_time = if full_box.version() == 1 {
            cursor.read_u64()?
        } else {
            cursor.read_u32()? as u64
        };

        Ok(TrackFragmentBaseMediaDecodeTimeBox {
            base_media_decode_time,
        })
    }
}

#[test]
fn decodes_the_version_0_layout() {
    let mut bytes = vec![0, 0, 0, 16];
    bytes.extend_from_slice(b"tfdt");
    bytes.extend_from_slice(&[0, 0, 0, 0]); // version 0
    bytes.extend_from_slice(&0x01020304u32.to_be_bytes());

    let tfdt = TrackFragmentBaseMediaDecodeTimeBox::from_bytes(&bytes).unwrap();

    assert_eq!(tfdt.base_media_decode_time, 0x01020304);
}
