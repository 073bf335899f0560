use four_cc::FourCC;

use crate::Mp4BoxError;
use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box};

use std::mem::size_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieHeaderBox {
    pub creation_time: u64,
    pub modification_time: u64,
    pub timescale: u32,
    pub duration: u64,
    pub next_track_id: u32,
}

impl Mp4Box for MovieHeaderBox {
    const NAME: FourCC = FourCC(*b"mvhd");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(1, 0))
    }

    fn content_size(&self) -> u64 {
        size_of::<u64>() as u64 + // creation_time
        size_of::<u64>() as u64 + // modification_time
        size_of::<u32>() as u64 + // timescale
        size_of::<u64>() as u64 + // duration
        size_of::<u32>() as u64 + // rate
        size_of::<u16>() as u64 + // volume
        size_of::<u16>() as u64 + // reserved
        size_of::<u32>() as u64 * 2 + // reserved
        size_of::<i32>() as u64 * 9 + // matrix
        size_of::<u32>() as u64 * 6 + // pre_defined
        size_of::<u32>() as u64 // next_track_ID
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor
            .write_u64(self.creation_time)
            .write_u64(self.modification_time)
            .write_u32(self.timescale)
            .write_u64(self.duration)
            .write_i32(0x00010000) // rate, 1.0
            .write_i16(0x0100) // volume, full
            .write_u16(0) // reserved
            .write_u64(0); // reserved

        // unity matrix
        cursor.write_i32(0x00010000).write_i32(0).write_i32(0);
        cursor.write_i32(0).write_i32(0x00010000).write_i32(0);
        cursor.write_i32(0).write_i32(0).write_i32(0x40000000);

        for _ in 0..6 {
            cursor.write_u32(0); // pre_defined
        }

        cursor.write_u32(self.next_track_id);

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let full_box = FullBoxHeader::read(cursor)?;

        let (creation_time, modification_time, timescale, duration) = if full_box.version() == 1 {
            (
                cursor.read_u64()?,
                cursor.read_u64()?,
                cursor.read_u32()?,
                cursor.read_u64()?,
            )
        } else {
            (
                cursor.read_u32()? as u64,
                cursor.read_u32()? as u64,
                cursor.read_u32()?,
                cursor.read_u32()? as u64,
            )
        };

        cursor.skip(76)?; // rate, volume, reserved, matrix, pre_defined
        let next_track_id = cursor.read_u32()?;

        Ok(MovieHeaderBox {
            creation_time,
            modification_time,
            timescale,
            duration,
            next_track_id,
        })
    }
}

#[test]
fn round_trips() {
    let mvhd = MovieHeaderBox {
        creation_time: 0,
        modification_time: 0,
        timescale: 1000,
        duration: 60_000,
        next_track_id: 3,
    };

    let bytes = mvhd.to_bytes().unwrap();

    assert_eq!(bytes.len() as u64, mvhd.size());
    assert_eq!(MovieHeaderBox::from_bytes(&bytes).unwrap(), mvhd);
}

#[test]
fn decodes_the_version_0_layout() {
    let mut bytes = vec![0, 0, 0, 108];
    bytes.extend_from_slice(b"mvhd");
    bytes.extend_from_slice(&[0, 0, 0, 0]); // version 0
    bytes.extend_from_slice(&1u32.to_be_bytes()); // creation_time
    bytes.extend_from_slice(&2u32.to_be_bytes()); // modification_time
    bytes.extend_from_slice(&600u32.to_be_bytes()); // timescale
    bytes.extend_from_slice(&1200u32.to_be_bytes()); // duration
    bytes.extend_from_slice(&[0; 76]);
    bytes.extend_from_slice(&7u32.to_be_bytes()); // next_track_ID

    let mvhd = MovieHeaderBox::from_bytes(&bytes).unwrap();

    assert_eq!(mvhd.creation_time, 1);
    assert_eq!(mvhd.modification_time, 2);
    assert_eq!(mvhd.timescale, 600);
    assert_eq!(mvhd.duration, 1200);
    assert_eq!(mvhd.next_track_id, 7);
}
