use four_cc::FourCC;

use crate::Mp4BoxError;
use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box};

use std::mem::size_of;

/// Sample sizes are either one constant for the whole track or one entry
/// per sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleSizes {
    Constant { sample_size: u32, sample_count: u32 },
    Variable(Vec<u32>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSizeBox {
    pub sample_sizes: SampleSizes,
}

impl Mp4Box for SampleSizeBox {
    const NAME: FourCC = FourCC(*b"stsz");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(0, 0))
    }

    fn content_size(&self) -> u64 {
        let table = match &self.sample_sizes {
            SampleSizes::Constant { .. } => 0,
            SampleSizes::Variable(sizes) => size_of::<u32>() as u64 * sizes.len() as u64,
        };

        size_of::<u32>() as u64 + // sample_size
        size_of::<u32>() as u64 + // sample_count
        table
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        match &self.sample_sizes {
            SampleSizes::Constant {
                sample_size,
                sample_count,
            } => {
                cursor.write_u32(*sample_size).write_u32(*sample_count);
            }
            SampleSizes::Variable(sizes) => {
                cursor.write_u32(0).write_u32(sizes.len() as u32);

                for &size in sizes {
                    cursor.write_u32(size);
                }
            }
        }

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let _ = FullBoxHeader::read(cursor)?;

        let sample_size = cursor.read_u32()?;
        let sample_count = cursor.read_u32()?;

        let sample_sizes = if sample_size != 0 {
            SampleSizes::Constant {
                sample_size,
                sample_count,
            }
        } else {
            let mut sizes = Vec::new();

            for _ in 0..sample_count {
                sizes.push(cursor.read_u32()?);
            }

            SampleSizes::Variable(sizes)
        };

        Ok(SampleSizeBox { sample_sizes })
    }
}

#[test]
fn round_trips_both_layouts() {
    let constant = SampleSizeBox {
        sample_sizes: SampleSizes::Constant {
            sample_size: 960,
            sample_count: 42,
        },
    };
    let variable = SampleSizeBox {
        sample_sizes: SampleSizes::Variable(vec![100, 200, 300]),
    };

    for stsz in [constant, variable] {
        let bytes = stsz.to_bytes().unwrap();

        assert_eq!(bytes.len() as u64, stsz.size());
        assert_eq!(SampleSizeBox::from_bytes(&bytes).unwrap(), stsz);
    }
}
