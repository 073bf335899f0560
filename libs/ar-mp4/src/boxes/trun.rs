use four_cc::FourCC;

use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box, Mp4BoxError};

use std::mem::size_of;

bitflags::bitflags! {
    pub struct TrackFragmentRunFlags: u32 {
        const DATA_OFFSET_PRESENT = 0x00000001;
        const FIRST_SAMPLE_FLAGS_PRESENT = 0x00000004;
        const SAMPLE_DURATION_PRESENT = 0x00000100;
        const SAMPLE_SIZE_PRESENT = 0x00000200;
        const SAMPLE_FLAGS_PRESENT = 0x00000400;
        const SAMPLE_COMPOSITION_TIME_OFFSET_PRESENT = 0x00000800;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackFragmentSample {
    pub duration: Option<u32>,
    pub size: Option<u32>,
    pub flags: Option<u32>,
    pub composition_time_offset: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackFragmentRunBox {
    pub data_offset: Option<i32>,
    pub first_sample_flags: Option<u32>,
    pub samples: Vec<TrackFragmentSample>,
}

impl TrackFragmentRunBox {
    fn sample_size(&self, flags: TrackFragmentRunFlags) -> u64 {
        let mut sample_size = 0;

        if flags.contains(TrackFragmentRunFlags::SAMPLE_DURATION_PRESENT) {
            sample_size += 4; // sample_duration
        }

        if flags.contains(TrackFragmentRunFlags::SAMPLE_SIZE_PRESENT) {
            sample_size += 4; // sample_size
        }

        if flags.contains(TrackFragmentRunFlags::SAMPLE_FLAGS_PRESENT) {
            sample_size += 4; // sample_flags
        }

        if flags.contains(TrackFragmentRunFlags::SAMPLE_COMPOSITION_TIME_OFFSET_PRESENT) {
            sample_size += 4; // sample_composition_time_offset
        }

        sample_size
    }

    fn flags_from_fields(&self) -> TrackFragmentRunFlags {
        let mut flags = TrackFragmentRunFlags::empty();

        if self.data_offset.is_some() {
            flags.insert(TrackFragmentRunFlags::DATA_OFFSET_PRESENT);
        }

        if self.first_sample_flags.is_some() {
            flags.insert(TrackFragmentRunFlags::FIRST_SAMPLE_FLAGS_PRESENT);
        }

        if let Some(sample) = self.samples.first() {
            if sample.duration.is_some() {
                flags.insert(TrackFragmentRunFlags::SAMPLE_DURATION_PRESENT);
            }

            if sample.size.is_some() {
                flags.insert(TrackFragmentRunFlags::SAMPLE_SIZE_PRESENT);
            }

            if sample.flags.is_some() {
                flags.insert(TrackFragmentRunFlags::SAMPLE_FLAGS_PRESENT);
            }

            if sample.composition_time_offset.is_some() {
                flags.insert(TrackFragmentRunFlags::SAMPLE_COMPOSITION_TIME_OFFSET_PRESENT);
            }
        }

        flags
    }
}

impl Mp4Box for TrackFragmentRunBox {
    const NAME: FourCC = FourCC(*b"trun");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(0, self.flags_from_fields().bits()))
    }

    fn content_size(&self) -> u64 {
        let flags = self.flags_from_fields();

        let mut size = 0;

        size += size_of::<u32>() as u64; // sample_count

        if flags.contains(TrackFragmentRunFlags::DATA_OFFSET_PRESENT) {
            size += size_of::<i32>() as u64; // data_offset
        }

        if flags.contains(TrackFragmentRunFlags::FIRST_SAMPLE_FLAGS_PRESENT) {
            size += size_of::<u32>() as u64; // first_sample_flags
        }

        size += self.sample_size(flags) * self.samples.len() as u64;

        size
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor.write_u32(self.samples.len() as u32);

        if let Some(data_offset) = self.data_offset {
            cursor.write_i32(data_offset);
        }

        if let Some(first_sample_flags) = self.first_sample_flags {
            cursor.write_u32(first_sample_flags);
        }

        let flags = self.flags_from_fields();
        for sample in &self.samples {
            ensure_sample_fields_present(sample, flags);

            if let Some(duration) = sample.duration {
                cursor.write_u32(duration);
            }

            if let Some(size) = sample.size {
                cursor.write_u32(size);
            }

            if let Some(flags) = sample.flags {
                cursor.write_u32(flags);
            }

            if let Some(composition_time_offset) = sample.composition_time_offset {
                cursor.write_i32(composition_time_offset);
            }
        }

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let full_box = FullBoxHeader::read(cursor)?;
        let flags = TrackFragmentRunFlags::from_bits_truncate(full_box.flags());

        let sample_count = cursor.read_u32()?;

        let data_offset = if flags.contains(TrackFragmentRunFlags::DATA_OFFSET_PRESENT) {
            Some(cursor.read_i32()?)
        } else {
            None
        };

        let first_sample_flags = if flags.contains(TrackFragmentRunFlags::FIRST_SAMPLE_FLAGS_PRESENT)
        {
            Some(cursor.read_u32()?)
        } else {
            None
        };

        let mut samples = Vec::new();

        for _ in 0..sample_count {
            samples.push(TrackFragmentSample {
                duration: if flags.contains(TrackFragmentRunFlags::SAMPLE_DURATION_PRESENT) {
                    Some(cursor.read_u32()?)
                } else {
                    None
                },
                size: if flags.contains(TrackFragmentRunFlags::SAMPLE_SIZE_PRESENT) {
                    Some(cursor.read_u32()?)
                } else {
                    None
                },
                flags: if flags.contains(TrackFragmentRunFlags::SAMPLE_FLAGS_PRESENT) {
                    Some(cursor.read_u32()?)
                } else {
                    None
                },
                composition_time_offset: if flags
                    .contains(TrackFragmentRunFlags::SAMPLE_COMPOSITION_TIME_OFFSET_PRESENT)
                {
                    Some(cursor.read_i32()?)
                } else {
                    None
                },
            });
        }

        Ok(TrackFragmentRunBox {
            data_offset,
            first_sample_flags,
            samples,
        })
    }
}

fn ensure_sample_fields_present(sample: &TrackFragmentSample, flags: TrackFragmentRunFlags) {
    let duration_should_be_present = flags.contains(TrackFragmentRunFlags::SAMPLE_DURATION_PRESENT);
    let size_should_be_present = flags.contains(TrackFragmentRunFlags::SAMPLE_SIZE_PRESENT);
    let flags_should_be_present = flags.contains(TrackFragmentRunFlags::SAMPLE_FLAGS_PRESENT);
    let composition_time_offset_should_be_present =
        flags.contains(TrackFragmentRunFlags::SAMPLE_COMPOSITION_TIME_OFFSET_PRESENT);

    let duration_is_present = sample.duration.is_some();
    let size_is_present = sample.size.is_some();
    let flags_is_present = sample.flags.is_some();
    let composition_time_offset_is_present = sample.composition_time_offset.is_some();

    // TODO: return error
    assert_eq!(duration_should_be_present, duration_is_present);
    assert_eq!(size_should_be_present, size_is_present);
    assert_eq!(flags_should_be_present, flags_is_present);
    assert_eq!(
        composition_time_offset_should_be_present,
        composition_time_offset_is_present
    );
}

#[test]
fn round_trips_per_sample_fields() {
    let trun = TrackFragmentRunBox {
        data_offset: Some(196),
        first_sample_flags: Some(0x10000),
        samples: vec![
            TrackFragmentSample {
                duration: Some(1800),
                size: Some(4096),
                flags: None,
                composition_time_offset: None,
            },
            TrackFragmentSample {
                duration: Some(1800),
                size: Some(2048),
                flags: None,
                composition_time_offset: None,
            },
        ],
    };

    let bytes = trun.to_bytes().unwrap();

    assert_eq!(bytes.len() as u64, trun.size());
    assert_eq!(TrackFragmentRunBox::from_bytes(&bytes).unwrap(), trun);
}
