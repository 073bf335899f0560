use four_cc::FourCC;

use crate::Mp4BoxError;
use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box};

use std::mem::size_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerBox {
    pub handler_type: FourCC,
    pub name: String,
}

impl Mp4Box for HandlerBox {
    const NAME: FourCC = FourCC(*b"hdlr");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(0, 0))
    }

    fn content_size(&self) -> u64 {
        size_of::<u32>() as u64 + // pre_defined
        size_of::<u32>() as u64 + // handler_type
        size_of::<u32>() as u64 * 3 + // reserved
        self.name.as_bytes().len() as u64 + // name
        1
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor
            .write_u32(0) // pre_defined
            .write_fourcc(self.handler_type)
            .write_u32(0)
            .write_u32(0)
            .write_u32(0)
            .write_utf8_bytes(&self.name)
            .write_u8(0);

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let _ = FullBoxHeader::read(cursor)?;

        cursor.skip(4)?; // pre_defined
        let handler_type = cursor.read_fourcc()?;
        cursor.skip(12)?; // reserved

        let rest = (header.content_len() as usize)
            .checked_sub(FullBoxHeader::SIZE as usize + 20)
            .ok_or(Mp4BoxError::InvalidSize {
                name: Self::NAME,
                size: header.size,
            })?;

        let mut name = cursor.read_utf8_bytes(rest)?;
        if name.ends_with('\0') {
            name.pop();
        }

        Ok(HandlerBox { handler_type, name })
    }
}

#[test]
fn round_trips() {
    let hdlr = HandlerBox {
        handler_type: FourCC(*b"vide"),
        name: String::from("Video Handler"),
    };

    let decoded = HandlerBox::from_bytes(&hdlr.to_bytes().unwrap()).unwrap();

    assert_eq!(decoded, hdlr);
}

#[test]
fn rejects_a_header_too_small_for_its_fixed_fields() {
    let mut bytes = vec![0, 0, 0, 20];
    bytes.extend_from_slice(b"hdlr");
    bytes.extend_from_slice(&[0; 12]);

    assert!(matches!(
        HandlerBox::from_bytes(&bytes),
        Err(Mp4BoxError::InvalidSize { .. }) | Err(Mp4BoxError::UnexpectedEof { .. })
    ));
}
