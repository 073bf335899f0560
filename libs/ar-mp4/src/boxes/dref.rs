use four_cc::FourCC;
use tracing::debug;

use crate::Mp4BoxError;
use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box};

use std::mem::size_of;

use super::DataEntryUrlBox;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataReferenceBox {
    pub entries: Vec<DataEntryUrlBox>,
}

impl Mp4Box for DataReferenceBox {
    const NAME: FourCC = FourCC(*b"dref");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(0, 0))
    }

    fn content_size(&self) -> u64 {
        let mut size = size_of::<u32>() as u64; // entry_count

        for entry in &self.entries {
            size += entry.size();
        }

        size
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor.write_u32(self.entries.len() as _);

        for entry in &self.entries {
            entry.write(cursor)?;
        }

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let _ = FullBoxHeader::read(cursor)?;

        let entry_count = cursor.read_u32()?;
        let mut entries = Vec::new();

        for _ in 0..entry_count {
            let start = cursor.position();
            let child = BoxHeader::read(cursor)?;

            match &child.name.0 {
                b"url " => {
                    let entry = DataEntryUrlBox::read_box_contents(cursor, &child)?;

                    let consumed = (cursor.position() - start) as u64;
                    if consumed != child.size {
                        return Err(Mp4BoxError::SizeMismatch {
                            name: child.name,
                            declared: child.size,
                            actual: consumed,
                        });
                    }

                    entries.push(entry);
                }
                _ => {
                    debug!("skipping unrecognized '{}' data entry", child.name);
                    cursor.set_position(start + child.size as usize)?;
                }
            }
        }

        Ok(DataReferenceBox { entries })
    }
}

#[test]
fn round_trips() {
    let dref = DataReferenceBox {
        entries: vec![DataEntryUrlBox {
            location: String::new(),
        }],
    };

    let bytes = dref.to_bytes().unwrap();

    assert_eq!(bytes.len() as u64, dref.size());
    assert_eq!(DataReferenceBox::from_bytes(&bytes).unwrap(), dref);
}
