use four_cc::FourCC;

use crate::Mp4BoxError;
use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box};

use std::mem::size_of;

bitflags::bitflags! {
    pub struct TrackHeaderFlags: u32 {
        const ENABLED = 0x000001;
        const IN_MOVIE = 0x000002;
        const IN_PREVIEW = 0x000004;
        const SIZE_IS_ASPECT_RATIO = 0x000008;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackHeaderBox {
    pub flags: TrackHeaderFlags,
    pub creation_time: u64,
    pub modification_time: u64,
    pub track_id: u32,
    pub duration: u64,
    /// Presentation size in whole pixels, 16.16 fixed point on the wire.
    pub width: u32,
    pub height: u32,
}

impl Mp4Box for TrackHeaderBox {
    const NAME: FourCC = FourCC(*b"tkhd");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(1, self.flags.bits()))
    }

    fn content_size(&self) -> u64 {
        size_of::<u64>() as u64 + // creation_time
        size_of::<u64>() as u64 + // modification_time
        size_of::<u32>() as u64 + // track_ID
        size_of::<u32>() as u64 + // reserved
        size_of::<u64>() as u64 + // duration
        size_of::<u32>() as u64 * 2 + // reserved
        size_of::<u16>() as u64 + // layer
        size_of::<u16>() as u64 + // alternate_group
        size_of::<u16>() as u64 + // volume
        size_of::<u16>() as u64 + // reserved
        size_of::<i32>() as u64 * 9 + // matrix
        size_of::<u32>() as u64 + // width
        size_of::<u32>() as u64 // height
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor
            .write_u64(self.creation_time)
            .write_u64(self.modification_time)
            .write_u32(self.track_id)
            .write_u32(0) // reserved
            .write_u64(self.duration)
            .write_u64(0) // reserved
            .write_i16(0) // layer
            .write_i16(0) // alternate_group
            .write_i16(0) // volume
            .write_i16(0); // reserved

        // unity matrix
        cursor.write_i32(0x00010000).write_i32(0).write_i32(0);
        cursor.write_i32(0).write_i32(0x00010000).write_i32(0);
        cursor.write_i32(0).write_i32(0).write_i32(0x40000000);

        cursor.write_u32(self.width << 16).write_u32(self.height << 16);

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let full_box = FullBoxHeader::read(cursor)?;
        let flags = TrackHeaderFlags::from_bits_truncate(full_box.flags());

        let (creation_time, modification_time, track_id, duration) = if full_box.version() == 1 {
            let creation_time = cursor.read_u64()?;
            let modification_time = cursor.read_u64()?;
            let track_id = cursor.read_u32()?;
            cursor.skip(4)?; // reserved
            (creation_time, modification_time, track_id, cursor.read_u64()?)
        } else {
            let creation_time = cursor.read_u32()? as u64;
            let modification_time = cursor.read_u32()? as u64;
            let track_id = cursor.read_u32()?;
            cursor.skip(4)?; // reserved
            (
                creation_time,
                modification_time,
                track_id,
                cursor.read_u32()? as u64,
            )
        };

        cursor.skip(52)?; // reserved, layer, alternate_group, volume, matrix
        let width = cursor.read_u32()? >> 16;
        let height = cursor.read_u32()? >> 16;

        Ok(TrackHeaderBox {
            flags,
            creation_time,
            modification_time,
            track_id,
            duration,
            width,
            height,
        })
    }
}

#[test]
fn round_trips_with_flags() {
    let tkhd = TrackHeaderBox {
        flags: TrackHeaderFlags::ENABLED | TrackHeaderFlags::IN_MOVIE,
        creation_time: 10,
        modification_time: 20,
        track_id: 1,
        duration: 54_000,
        width: 1920,
        height: 1080,
    };

    let bytes = tkhd.to_bytes().unwrap();

    assert_eq!(bytes.len() as u64, tkhd.size());
    // version 1, then the 24-bit flag word
    assert_eq!(&bytes[8..12], &[1, 0, 0, 3]);
    assert_eq!(TrackHeaderBox::from_bytes(&bytes).unwrap(), tkhd);
}
