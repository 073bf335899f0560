use four_cc::FourCC;

use crate::Mp4BoxError;
use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEntryUrlBox {
    pub location: String,
}

impl Mp4Box for DataEntryUrlBox {
    const NAME: FourCC = FourCC(*b"url ");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(0, 0x000001))
    }

    fn content_size(&self) -> u64 {
        self.location.as_bytes().len() as u64 + 1
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor.write_utf8_bytes(&self.location).write_u8(0);

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let _ = FullBoxHeader::read(cursor)?;

        let rest = (header.content_len() as usize)
            .checked_sub(FullBoxHeader::SIZE as usize)
            .ok_or(Mp4BoxError::InvalidSize {
                name: Self::NAME,
                size: header.size,
            })?;

        // a self-contained entry may omit the location entirely
        let location = if rest == 0 {
            String::new()
        } else {
            let mut location = cursor.read_utf8_bytes(rest)?;
            if location.ends_with('\0') {
                location.pop();
            }
            location
        };

        Ok(DataEntryUrlBox { location })
    }
}

#[test]
fn round_trips() {
    let url = DataEntryUrlBox {
        location: String::from("file://recording.mp4"),
    };

    let decoded = DataEntryUrlBox::from_bytes(&url.to_bytes().unwrap()).unwrap();

    assert_eq!(decoded, url);
}

#[test]
fn accepts_an_entry_without_a_location() {
    let mut bytes = vec![0, 0, 0, 12];
    bytes.extend_from_slice(b"url ");
    bytes.extend_from_slice(&[0, 0, 0, 1]);

    let url = DataEntryUrlBox::from_bytes(&bytes).unwrap();

    assert_eq!(url.location, "");
}
