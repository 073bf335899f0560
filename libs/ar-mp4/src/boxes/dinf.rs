use four_cc::FourCC;

use crate::read_box_children;
use crate::Mp4Box;
use crate::{BoxHeader, ByteCursor, Mp4BoxError};

use super::DataReferenceBox;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataInformationBox {
    pub dref: DataReferenceBox,
}

impl Mp4Box for DataInformationBox {
    const NAME: FourCC = FourCC(*b"dinf");

    fn content_size(&self) -> u64 {
        self.dref.size()
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        self.dref.write(cursor)?;

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let mut dref = None;

        read_box_children(cursor, header, |child, cursor| {
            match &child.name.0 {
                b"dref" => dref = Some(DataReferenceBox::read_box_contents(cursor, child)?),
                _ => return Ok(false),
            }

            Ok(true)
        })?;

        Ok(DataInformationBox {
            dref: dref.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: DataReferenceBox::NAME,
            })?,
        })
    }
}
