//! MP4 box writers for ISO Base Media File Format (ISO 14496-12).
//!
//! This module writes the structural boxes of the output file: the ftyp
//! header box and the moov metadata tree built at finalize time. The mdat
//! (media data) box is written progressively by the muxer.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::{Seek, Write};

use crate::atoms::{
    box_size_placeholder, encode_language, fill_box_size, write_box_header,
    write_fixed_point_16_16, write_fixed_point_8_8, write_full_box_header, write_zeros,
};
use crate::error::MuxResult;
use crate::types::{Rational, Resolution};

/// AVC parameter-set indication: (profile, compatibility flags, level),
/// taken from bytes 1..=3 of the first SPS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AvcIndication {
    pub profile: u8,
    pub compatibility: u8,
    pub level: u8,
}

impl AvcIndication {
    /// Fallback when the stream never carried an SPS (High profile, level 3.1).
    pub const DEFAULT: Self = Self {
        profile: 0x64,
        compatibility: 0x00,
        level: 0x1F,
    };

    /// Extract the indication from an SPS NAL unit (bytes 1..=3).
    pub fn from_sps(sps: &[u8]) -> Option<Self> {
        if sps.len() < 4 {
            return None;
        }
        Some(Self {
            profile: sps[1],
            compatibility: sps[2],
            level: sps[3],
        })
    }
}

/// Everything the moov writer needs to describe the single video track.
#[derive(Debug)]
pub struct VideoTrackDesc<'a> {
    /// Frame rate; `num` is the timescale, `den` the per-sample delta.
    pub fps: Rational,
    /// Picture size.
    pub resolution: Resolution,
    /// Per-sample byte counts, in decode order.
    pub sample_sizes: &'a [u32],
    /// Deduplicated SPS NAL units.
    pub sps_set: &'a [Vec<u8>],
    /// Deduplicated PPS NAL units.
    pub pps_set: &'a [Vec<u8>],
    /// Profile/compatibility/level triple for the avcC record.
    pub indication: AvcIndication,
    /// Absolute file offset where the mdat payload starts (the single
    /// chunk offset for stco).
    pub media_data_start: u64,
}

impl VideoTrackDesc<'_> {
    /// Track duration in media timescale units: sample_count × delta.
    fn duration(&self) -> u64 {
        self.sample_sizes.len() as u64 * self.fps.den as u64
    }
}

/// Write the ftyp (File Type) box.
///
/// Major brand `isom`, minor version 0x200, compatible brands
/// isom/iso2/avc1/mp41.
pub fn write_ftyp<W: Write>(writer: &mut W) -> MuxResult<()> {
    let size: u32 = 8 + 4 + 4 + 4 * 4; // header + major + minor + 4 brands = 32
    write_box_header(writer, b"ftyp", size)?;
    writer.write_all(b"isom")?; // major brand
    writer.write_u32::<BigEndian>(0x200)?; // minor version
    writer.write_all(b"isom")?;
    writer.write_all(b"iso2")?;
    writer.write_all(b"avc1")?;
    writer.write_all(b"mp41")?;
    Ok(())
}

/// Write the complete moov (Movie) box for a single video track.
pub fn write_moov<W: Write + Seek>(writer: &mut W, track: &VideoTrackDesc<'_>) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"moov")?;

    write_mvhd(writer, track)?;
    write_trak(writer, track)?;

    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Write the mvhd (Movie Header) box — version 0.
///
/// Creation/modification times are zeroed: the output carries no
/// wall-clock semantics.
fn write_mvhd<W: Write + Seek>(writer: &mut W, track: &VideoTrackDesc<'_>) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"mvhd")?;

    writer.write_u32::<BigEndian>(0)?; // version + flags
    writer.write_u32::<BigEndian>(0)?; // creation_time
    writer.write_u32::<BigEndian>(0)?; // modification_time
    writer.write_u32::<BigEndian>(track.fps.num)?; // timescale
    writer.write_u32::<BigEndian>(track.duration() as u32)?; // duration

    write_fixed_point_16_16(writer, 1.0)?; // rate
    write_fixed_point_8_8(writer, 1.0)?; // volume
    write_zeros(writer, 10)?; // reserved

    write_identity_matrix(writer)?;

    write_zeros(writer, 24)?; // pre_defined (6 x u32)
    writer.write_u32::<BigEndian>(2)?; // next_track_ID

    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Write a complete trak (Track) box.
fn write_trak<W: Write + Seek>(writer: &mut W, track: &VideoTrackDesc<'_>) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"trak")?;

    write_tkhd(writer, track)?;
    write_mdia(writer, track)?;

    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Write the tkhd (Track Header) box — version 0, track ID 1.
fn write_tkhd<W: Write + Seek>(writer: &mut W, track: &VideoTrackDesc<'_>) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"tkhd")?;

    // version=0, flags=0x000003 (track_enabled | track_in_movie)
    writer.write_u32::<BigEndian>(0x00_000003)?;
    writer.write_u32::<BigEndian>(0)?; // creation_time
    writer.write_u32::<BigEndian>(0)?; // modification_time
    writer.write_u32::<BigEndian>(1)?; // track_ID
    write_zeros(writer, 4)?; // reserved
    writer.write_u32::<BigEndian>(track.duration() as u32)?; // duration

    write_zeros(writer, 8)?; // reserved (2 x u32)
    writer.write_i16::<BigEndian>(0)?; // layer
    writer.write_i16::<BigEndian>(0)?; // alternate_group
    write_fixed_point_8_8(writer, 0.0)?; // volume (video track)
    write_zeros(writer, 2)?; // reserved

    write_identity_matrix(writer)?;

    write_fixed_point_16_16(writer, track.resolution.width as f64)?;
    write_fixed_point_16_16(writer, track.resolution.height as f64)?;

    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Unity 3x3 transform matrix (16.16 fixed point, [2][2] in 30.2).
fn write_identity_matrix<W: Write>(writer: &mut W) -> MuxResult<()> {
    write_fixed_point_16_16(writer, 1.0)?;
    write_fixed_point_16_16(writer, 0.0)?;
    write_fixed_point_16_16(writer, 0.0)?;
    write_fixed_point_16_16(writer, 0.0)?;
    write_fixed_point_16_16(writer, 1.0)?;
    write_fixed_point_16_16(writer, 0.0)?;
    write_fixed_point_16_16(writer, 0.0)?;
    write_fixed_point_16_16(writer, 0.0)?;
    writer.write_u32::<BigEndian>(0x4000_0000)?; // 1.0 in 30.2
    Ok(())
}

/// Write the mdia (Media) box.
fn write_mdia<W: Write + Seek>(writer: &mut W, track: &VideoTrackDesc<'_>) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"mdia")?;

    write_mdhd(writer, track)?;
    write_hdlr(writer)?;
    write_minf(writer, track)?;

    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Write the mdhd (Media Header) box — version 0.
fn write_mdhd<W: Write + Seek>(writer: &mut W, track: &VideoTrackDesc<'_>) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"mdhd")?;

    writer.write_u32::<BigEndian>(0)?; // version + flags
    writer.write_u32::<BigEndian>(0)?; // creation_time
    writer.write_u32::<BigEndian>(0)?; // modification_time
    writer.write_u32::<BigEndian>(track.fps.num)?; // timescale
    writer.write_u32::<BigEndian>(track.duration() as u32)?; // duration
    writer.write_u16::<BigEndian>(encode_language("und"))?; // language
    writer.write_u16::<BigEndian>(0)?; // pre_defined

    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Write the hdlr (Handler Reference) box — fixed video handler.
fn write_hdlr<W: Write + Seek>(writer: &mut W) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"hdlr")?;

    writer.write_u32::<BigEndian>(0)?; // version + flags
    write_zeros(writer, 4)?; // pre_defined
    writer.write_all(b"vide")?; // handler_type
    write_zeros(writer, 12)?; // reserved (3 x u32)
    writer.write_all(b"VideoHandler\0")?; // name (null-terminated)

    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Write the minf (Media Information) box.
fn write_minf<W: Write + Seek>(writer: &mut W, track: &VideoTrackDesc<'_>) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"minf")?;

    // vmhd (Video Media Header)
    write_full_box_header(writer, b"vmhd", 20, 0, 0x000001)?;
    writer.write_u16::<BigEndian>(0)?; // graphicsmode
    write_zeros(writer, 6)?; // opcolor (3 x u16)

    write_dinf(writer)?;
    write_stbl(writer, track)?;

    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Write the dinf (Data Information) box with a self-contained dref/url.
fn write_dinf<W: Write + Seek>(writer: &mut W) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"dinf")?;

    let dref_size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"dref")?;
    writer.write_u32::<BigEndian>(0)?; // version + flags
    writer.write_u32::<BigEndian>(1)?; // entry_count
    write_full_box_header(writer, b"url ", 12, 0, 0x000001)?; // self-contained

    fill_box_size(writer, dref_size_pos)?;
    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Write the stbl (Sample Table) box with all sample metadata.
fn write_stbl<W: Write + Seek>(writer: &mut W, track: &VideoTrackDesc<'_>) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"stbl")?;

    write_stsd(writer, track)?;
    write_stts(writer, track)?;
    write_stsc(writer, track)?;
    write_stco(writer, track)?;
    write_stsz(writer, track)?;

    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Write the stsd (Sample Description) box with one avc1 entry.
fn write_stsd<W: Write + Seek>(writer: &mut W, track: &VideoTrackDesc<'_>) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"stsd")?;
    writer.write_u32::<BigEndian>(0)?; // version + flags
    writer.write_u32::<BigEndian>(1)?; // entry_count

    // avc1 VisualSampleEntry
    let entry_size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"avc1")?;

    write_zeros(writer, 6)?; // reserved
    writer.write_u16::<BigEndian>(1)?; // data_reference_index
    write_zeros(writer, 2)?; // pre_defined
    write_zeros(writer, 2)?; // reserved
    write_zeros(writer, 12)?; // pre_defined (3 x u32)
    writer.write_u16::<BigEndian>(track.resolution.width as u16)?;
    writer.write_u16::<BigEndian>(track.resolution.height as u16)?;
    writer.write_u32::<BigEndian>(0x0048_0000)?; // horizresolution (72 dpi)
    writer.write_u32::<BigEndian>(0x0048_0000)?; // vertresolution (72 dpi)
    write_zeros(writer, 4)?; // reserved
    writer.write_u16::<BigEndian>(1)?; // frame_count
    write_zeros(writer, 32)?; // compressorname (empty)
    writer.write_u16::<BigEndian>(0x0018)?; // depth (24-bit color)
    writer.write_i16::<BigEndian>(-1)?; // pre_defined

    write_avcc(writer, track)?;

    fill_box_size(writer, entry_size_pos)?;
    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Write the avcC (AVC Decoder Configuration Record) box.
///
/// Embeds the indication triple and every deduplicated SPS/PPS unit.
/// lengthSizeMinusOne is fixed at 3: sample data carries 4-byte NAL
/// length prefixes.
fn write_avcc<W: Write + Seek>(writer: &mut W, track: &VideoTrackDesc<'_>) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"avcC")?;

    writer.write_u8(1)?; // configurationVersion
    writer.write_u8(track.indication.profile)?; // AVCProfileIndication
    writer.write_u8(track.indication.compatibility)?; // profile_compatibility
    writer.write_u8(track.indication.level)?; // AVCLevelIndication
    writer.write_u8(0xFF)?; // reserved | lengthSizeMinusOne = 3

    writer.write_u8(0xE0 | (track.sps_set.len() as u8 & 0x1F))?; // numOfSequenceParameterSets
    for sps in track.sps_set {
        writer.write_u16::<BigEndian>(sps.len() as u16)?;
        writer.write_all(sps)?;
    }

    writer.write_u8(track.pps_set.len() as u8)?; // numOfPictureParameterSets
    for pps in track.pps_set {
        writer.write_u16::<BigEndian>(pps.len() as u16)?;
        writer.write_all(pps)?;
    }

    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Write the stts (Decoding Time to Sample) box — a single run: every
/// sample lasts `fps.den` ticks.
fn write_stts<W: Write + Seek>(writer: &mut W, track: &VideoTrackDesc<'_>) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"stts")?;
    writer.write_u32::<BigEndian>(0)?; // version + flags
    writer.write_u32::<BigEndian>(1)?; // entry_count
    writer.write_u32::<BigEndian>(track.sample_sizes.len() as u32)?; // sample_count
    writer.write_u32::<BigEndian>(track.fps.den)?; // sample_delta

    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Write the stsc (Sample to Chunk) box — one chunk holds every sample.
fn write_stsc<W: Write + Seek>(writer: &mut W, track: &VideoTrackDesc<'_>) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"stsc")?;
    writer.write_u32::<BigEndian>(0)?; // version + flags
    writer.write_u32::<BigEndian>(1)?; // entry_count
    writer.write_u32::<BigEndian>(1)?; // first_chunk
    writer.write_u32::<BigEndian>(track.sample_sizes.len() as u32)?; // samples_per_chunk
    writer.write_u32::<BigEndian>(1)?; // sample_description_index

    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Write the stco (Chunk Offset) box — the single chunk starts where the
/// mdat payload starts.
fn write_stco<W: Write + Seek>(writer: &mut W, track: &VideoTrackDesc<'_>) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"stco")?;
    writer.write_u32::<BigEndian>(0)?; // version + flags
    writer.write_u32::<BigEndian>(1)?; // entry_count
    writer.write_u32::<BigEndian>(track.media_data_start as u32)?; // chunk_offset

    fill_box_size(writer, size_pos)?;
    Ok(())
}

/// Write the stsz (Sample Size) box — verbatim per-sample size list.
fn write_stsz<W: Write + Seek>(writer: &mut W, track: &VideoTrackDesc<'_>) -> MuxResult<()> {
    let size_pos = box_size_placeholder(writer)?;
    writer.write_all(b"stsz")?;
    writer.write_u32::<BigEndian>(0)?; // version + flags
    writer.write_u32::<BigEndian>(0)?; // sample_size = 0 (per-sample entries)
    writer.write_u32::<BigEndian>(track.sample_sizes.len() as u32)?; // sample_count
    for &size in track.sample_sizes {
        writer.write_u32::<BigEndian>(size)?;
    }

    fill_box_size(writer, size_pos)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn box_size_at(buf: &[u8], offset: usize) -> u32 {
        u32::from_be_bytes(buf[offset..offset + 4].try_into().unwrap())
    }

    fn box_type_at(buf: &[u8], offset: usize) -> &[u8] {
        &buf[offset + 4..offset + 8]
    }

    fn test_desc<'a>(sizes: &'a [u32], sps: &'a [Vec<u8>], pps: &'a [Vec<u8>]) -> VideoTrackDesc<'a> {
        VideoTrackDesc {
            fps: Rational::FPS_30,
            resolution: Resolution::new(640, 480),
            sample_sizes: sizes,
            sps_set: sps,
            pps_set: pps,
            indication: AvcIndication::DEFAULT,
            media_data_start: 40,
        }
    }

    #[test]
    fn ftyp_layout() {
        let mut buf = Vec::new();
        write_ftyp(&mut buf).unwrap();
        assert_eq!(buf.len(), 32);
        assert_eq!(box_size_at(&buf, 0), 32);
        assert_eq!(box_type_at(&buf, 0), b"ftyp");
        assert_eq!(&buf[8..12], b"isom");
        assert_eq!(&buf[12..16], &[0x00, 0x00, 0x02, 0x00]);
        assert_eq!(&buf[16..20], b"isom");
        assert_eq!(&buf[20..24], b"iso2");
        assert_eq!(&buf[24..28], b"avc1");
        assert_eq!(&buf[28..32], b"mp41");
    }

    #[test]
    fn indication_from_sps() {
        let sps = [0x67, 0x42, 0xC0, 0x1F, 0xDA];
        let ind = AvcIndication::from_sps(&sps).unwrap();
        assert_eq!(ind.profile, 0x42);
        assert_eq!(ind.compatibility, 0xC0);
        assert_eq!(ind.level, 0x1F);
    }

    #[test]
    fn indication_from_short_sps() {
        assert!(AvcIndication::from_sps(&[0x67, 0x42]).is_none());
    }

    #[test]
    fn moov_contains_required_boxes() {
        let sps = vec![vec![0x67, 0x42, 0xC0, 0x1F]];
        let pps = vec![vec![0x68, 0xCE, 0x38]];
        let sizes = [1000, 2000];

        let mut cursor = Cursor::new(Vec::new());
        write_moov(&mut cursor, &test_desc(&sizes, &sps, &pps)).unwrap();
        let buf = cursor.into_inner();

        assert_eq!(box_type_at(&buf, 0), b"moov");
        assert_eq!(box_size_at(&buf, 0) as usize, buf.len());
        for tag in [
            b"mvhd", b"trak", b"tkhd", b"mdia", b"mdhd", b"hdlr", b"minf", b"vmhd", b"dinf",
            b"dref", b"url ", b"stbl", b"stsd", b"avc1", b"avcC", b"stts", b"stsc", b"stco",
            b"stsz", b"vide",
        ] {
            assert!(
                buf.windows(4).any(|w| w == tag),
                "missing {:?}",
                std::str::from_utf8(tag)
            );
        }
    }

    #[test]
    fn avcc_embeds_all_parameter_sets() {
        let sps = vec![vec![0x67, 0x42, 0xC0, 0x1F]];
        let pps = vec![vec![0x68, 0xCE], vec![0x68, 0xEE, 0x01]];
        let sizes = [100];

        let mut cursor = Cursor::new(Vec::new());
        let desc = VideoTrackDesc {
            indication: AvcIndication {
                profile: 0x42,
                compatibility: 0xC0,
                level: 0x1F,
            },
            ..test_desc(&sizes, &sps, &pps)
        };
        write_avcc(&mut cursor, &desc).unwrap();
        let buf = cursor.into_inner();

        assert_eq!(box_type_at(&buf, 0), b"avcC");
        // configurationVersion, profile, compat, level, 0xFF
        assert_eq!(&buf[8..13], &[0x01, 0x42, 0xC0, 0x1F, 0xFF]);
        // numOfSequenceParameterSets = 0xE0 | 1
        assert_eq!(buf[13], 0xE1);
        // SPS length + bytes
        assert_eq!(&buf[14..16], &[0x00, 0x04]);
        assert_eq!(&buf[16..20], &[0x67, 0x42, 0xC0, 0x1F]);
        // numOfPictureParameterSets = 2
        assert_eq!(buf[20], 2);
        assert_eq!(&buf[21..23], &[0x00, 0x02]);
        assert_eq!(&buf[23..25], &[0x68, 0xCE]);
        assert_eq!(&buf[25..27], &[0x00, 0x03]);
        assert_eq!(&buf[27..30], &[0x68, 0xEE, 0x01]);
        assert_eq!(box_size_at(&buf, 0) as usize, buf.len());
    }

    #[test]
    fn stts_single_run() {
        let sizes = [10, 20, 30];
        let mut cursor = Cursor::new(Vec::new());
        write_stts(&mut cursor, &test_desc(&sizes, &[], &[])).unwrap();
        let buf = cursor.into_inner();

        assert_eq!(box_type_at(&buf, 0), b"stts");
        assert_eq!(box_size_at(&buf, 0), 24);
        // entry_count = 1
        assert_eq!(&buf[12..16], &[0, 0, 0, 1]);
        // sample_count = 3, sample_delta = 1
        assert_eq!(&buf[16..20], &[0, 0, 0, 3]);
        assert_eq!(&buf[20..24], &[0, 0, 0, 1]);
    }

    #[test]
    fn stsz_verbatim_list() {
        let sizes = [120, 120, 96];
        let mut cursor = Cursor::new(Vec::new());
        write_stsz(&mut cursor, &test_desc(&sizes, &[], &[])).unwrap();
        let buf = cursor.into_inner();

        // sample_size = 0 (variable form, even when sizes repeat)
        assert_eq!(&buf[12..16], &[0, 0, 0, 0]);
        // sample_count = 3
        assert_eq!(&buf[16..20], &[0, 0, 0, 3]);
        assert_eq!(u32::from_be_bytes(buf[20..24].try_into().unwrap()), 120);
        assert_eq!(u32::from_be_bytes(buf[24..28].try_into().unwrap()), 120);
        assert_eq!(u32::from_be_bytes(buf[28..32].try_into().unwrap()), 96);
    }

    #[test]
    fn stco_single_chunk_at_media_start() {
        let sizes = [10];
        let mut cursor = Cursor::new(Vec::new());
        write_stco(&mut cursor, &test_desc(&sizes, &[], &[])).unwrap();
        let buf = cursor.into_inner();

        assert_eq!(&buf[12..16], &[0, 0, 0, 1]); // entry_count
        assert_eq!(&buf[16..20], &[0, 0, 0, 40]); // chunk_offset
    }

    #[test]
    fn stsc_all_samples_in_one_chunk() {
        let sizes = [10, 20, 30, 40];
        let mut cursor = Cursor::new(Vec::new());
        write_stsc(&mut cursor, &test_desc(&sizes, &[], &[])).unwrap();
        let buf = cursor.into_inner();

        assert_eq!(&buf[12..16], &[0, 0, 0, 1]); // entry_count
        assert_eq!(&buf[16..20], &[0, 0, 0, 1]); // first_chunk
        assert_eq!(&buf[20..24], &[0, 0, 0, 4]); // samples_per_chunk
        assert_eq!(&buf[24..28], &[0, 0, 0, 1]); // sample_description_index
    }

    #[test]
    fn durations_use_rational_parts() {
        let sizes = [1, 1, 1];
        let desc = VideoTrackDesc {
            fps: Rational::FPS_29_97,
            ..test_desc(&sizes, &[], &[])
        };
        // 3 samples × 1001 ticks at a 30000 Hz clock
        assert_eq!(desc.duration(), 3003);

        let mut cursor = Cursor::new(Vec::new());
        write_mdhd(&mut cursor, &desc).unwrap();
        let buf = cursor.into_inner();
        // timescale at offset 20, duration at 24
        assert_eq!(u32::from_be_bytes(buf[20..24].try_into().unwrap()), 30000);
        assert_eq!(u32::from_be_bytes(buf[24..28].try_into().unwrap()), 3003);
    }
}
