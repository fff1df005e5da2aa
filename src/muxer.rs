//! Streaming Annex-B → MP4 muxer.
//!
//! Usage:
//! ```ignore
//! let mut muxer = Mp4Muxer::create("output.mp4")?;
//!
//! // Feed NAL unit bytes as the encoder produces them. A unit may span
//! // several calls; `is_complete` marks the last chunk of a unit.
//! muxer.append(&chunk, is_parameter_set, is_complete)?;
//!
//! // Finalize: writes the moov box and patches the deferred size fields.
//! muxer.finalize(Rational::FPS_30, Resolution::new(1280, 720))?;
//! ```
//!
//! Ordinary sample bytes stream straight through to the sink; only
//! parameter sets (SPS/PPS) are buffered, because they must be pulled out
//! of the sample stream and embedded in the avcC box. Two values cannot be
//! known at write time — the mdat size and every sample's NAL length
//! prefix — so the muxer writes placeholders, keeps a ledger of patch
//! offsets, and rewrites them all during `finalize`.

use byteorder::{BigEndian, WriteBytesExt};
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use crate::atoms::{patch_u32, write_box_header, BOX_HEADER_LEN};
use crate::boxes::{self, AvcIndication, VideoTrackDesc};
use crate::error::{MuxError, MuxResult};
use crate::nal::{self, NalType, START_CODE, START_CODE_LEN};
use crate::types::{Rational, Resolution};

/// A deferred 4-byte length rewrite: at `offset` within the mdat payload,
/// write `value` big-endian over the start code once the stream has ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct NalSizePatch {
    offset: u64,
    value: u32,
}

/// Incremental H.264 Annex-B to MP4 muxer over a seekable byte sink.
///
/// Writes ftyp and an mdat placeholder up front, streams sample data as it
/// arrives, and completes the file in `finalize`. Single-threaded by
/// construction: every operation takes `&mut self`.
pub struct Mp4Muxer<W: Write + Seek> {
    writer: W,
    /// Position of the mdat 4-byte size field.
    mdat_size_pos: u64,
    /// Absolute offset where the mdat payload starts.
    media_data_start: u64,
    /// mdat payload bytes written so far (excludes the box header).
    media_payload_size: u64,
    /// Bytes of the in-flight sample accumulated across `append` calls.
    current_sample_bytes: u64,
    /// Annex-B parameter-set bytes of the in-flight sample.
    param_set_buf: Vec<u8>,
    /// Unique SPS units, in first-seen order.
    sps_set: Vec<Vec<u8>>,
    /// Unique PPS units, in first-seen order.
    pps_set: Vec<Vec<u8>>,
    /// Profile/compatibility/level from the first SPS.
    indication: Option<AvcIndication>,
    /// Per-sample byte counts in decode order.
    sample_sizes: Vec<u32>,
    /// Length-prefix rewrites to apply at finalize.
    patches: Vec<NalSizePatch>,
    /// Whether the previous completed sample was a parameter-set group.
    last_was_parameter_set: bool,
    finalized: bool,
}

impl Mp4Muxer<BufWriter<File>> {
    /// Create a muxer writing to a new file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> MuxResult<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write + Seek> Mp4Muxer<W> {
    /// Create a muxer over an arbitrary seekable sink.
    ///
    /// Writes the ftyp box and the mdat header with a zero size
    /// placeholder; the size is patched during `finalize`.
    pub fn new(mut writer: W) -> MuxResult<Self> {
        boxes::write_ftyp(&mut writer)?;

        let mdat_size_pos = writer.stream_position()?;
        write_box_header(&mut writer, b"mdat", 0)?;
        let media_data_start = writer.stream_position()?;

        Ok(Self {
            writer,
            mdat_size_pos,
            media_data_start,
            media_payload_size: 0,
            current_sample_bytes: 0,
            param_set_buf: Vec::new(),
            sps_set: Vec::new(),
            pps_set: Vec::new(),
            indication: None,
            sample_sizes: Vec::new(),
            patches: Vec::new(),
            last_was_parameter_set: false,
            finalized: false,
        })
    }

    /// Feed encoder output for the current NAL unit.
    ///
    /// `data` is raw Annex-B bytes including the 4-byte start code. A unit
    /// may arrive in several chunks; `is_complete` marks the final chunk.
    /// Parameter-set bytes are buffered until completion, everything else
    /// streams straight to the sink.
    pub fn append(&mut self, data: &[u8], is_parameter_set: bool, is_complete: bool) -> MuxResult<()> {
        if self.finalized {
            return Err(MuxError::Precondition("append after finalize".into()));
        }

        self.current_sample_bytes += data.len() as u64;

        if is_parameter_set {
            self.param_set_buf.extend_from_slice(data);
        } else {
            self.writer.write_all(data)?;
        }

        if is_complete {
            let frame_bytes = self.current_sample_bytes;
            let was_parameter_set = !self.param_set_buf.is_empty();
            if was_parameter_set {
                let buf = std::mem::take(&mut self.param_set_buf);
                self.flush_parameter_sets(&buf)?;
            }
            self.record_sample(frame_bytes, was_parameter_set)?;
            self.current_sample_bytes = 0;
        }

        Ok(())
    }

    /// Convert a buffered parameter-set group from Annex-B to
    /// length-prefixed framing and collect the units.
    ///
    /// The prefixes here are final — the group is held in full before this
    /// runs — so these bytes never enter the patch ledger.
    fn flush_parameter_sets(&mut self, buf: &[u8]) -> MuxResult<()> {
        if !buf.starts_with(&START_CODE) {
            return Err(MuxError::Precondition(
                "parameter-set buffer does not begin with an Annex-B start code".into(),
            ));
        }

        for unit in nal::units(buf) {
            self.writer.write_u32::<BigEndian>(unit.len() as u32)?;
            self.writer.write_all(unit)?;

            match nal::unit_type(unit) {
                NalType::Sps => {
                    if self.indication.is_none() {
                        self.indication = AvcIndication::from_sps(unit);
                    }
                    if !self.sps_set.iter().any(|s| s == unit) {
                        tracing::debug!(len = unit.len(), "captured SPS");
                        self.sps_set.push(unit.to_vec());
                    }
                }
                NalType::Pps => {
                    if !self.pps_set.iter().any(|p| p == unit) {
                        tracing::debug!(len = unit.len(), "captured PPS");
                        self.pps_set.push(unit.to_vec());
                    }
                }
                NalType::Other(_) => {}
            }
        }

        Ok(())
    }

    /// Record a completed sample in the size list and patch ledger.
    ///
    /// A parameter-set group never gets its own size entry for long: the
    /// next ordinary sample absorbs its byte count, because the format has
    /// no zero-duration samples.
    fn record_sample(&mut self, frame_bytes: u64, was_parameter_set: bool) -> MuxResult<()> {
        match self.sample_sizes.last_mut() {
            // merge into the pending parameter-set entry
            Some(last) if self.last_was_parameter_set => *last += frame_bytes as u32,
            _ => self.sample_sizes.push(frame_bytes as u32),
        }

        if !was_parameter_set {
            if frame_bytes < START_CODE_LEN as u64 {
                return Err(MuxError::Precondition(format!(
                    "completed sample of {frame_bytes} bytes is shorter than a start code"
                )));
            }
            // The start code occupies the first 4 bytes of the sample as
            // written; the patch overwrites it with the NAL length.
            self.patches.push(NalSizePatch {
                offset: self.media_payload_size,
                value: (frame_bytes - START_CODE_LEN as u64) as u32,
            });
        }

        self.media_payload_size += frame_bytes;
        self.last_was_parameter_set = was_parameter_set;
        Ok(())
    }

    /// End the stream: append the moov box, then rewrite the two deferred
    /// quantities — the mdat size and every recorded NAL length prefix.
    ///
    /// Must be called exactly once, after at least one completed sample.
    pub fn finalize(&mut self, fps: Rational, resolution: Resolution) -> MuxResult<()> {
        if self.finalized {
            return Err(MuxError::Precondition("finalize called twice".into()));
        }
        if self.sample_sizes.is_empty() {
            return Err(MuxError::Precondition(
                "finalize before any completed sample".into(),
            ));
        }
        if self.current_sample_bytes != 0 {
            return Err(MuxError::Precondition(
                "finalize with an incomplete sample in flight".into(),
            ));
        }

        let indication = match self.indication {
            Some(ind) => ind,
            None => {
                tracing::warn!("no SPS observed; using default AVC indication");
                AvcIndication::DEFAULT
            }
        };

        let desc = VideoTrackDesc {
            fps,
            resolution,
            sample_sizes: &self.sample_sizes,
            sps_set: &self.sps_set,
            pps_set: &self.pps_set,
            indication,
            media_data_start: self.media_data_start,
        };
        boxes::write_moov(&mut self.writer, &desc)?;

        // Patch pass 1: the mdat size field.
        let mdat_size = self.media_payload_size + BOX_HEADER_LEN;
        if mdat_size > u32::MAX as u64 {
            return Err(MuxError::BoxTooLarge(mdat_size));
        }
        patch_u32(&mut self.writer, self.mdat_size_pos, mdat_size as u32)?;

        // Patch pass 2: every sample's length prefix.
        for patch in self.patches.drain(..) {
            patch_u32(
                &mut self.writer,
                self.media_data_start + patch.offset,
                patch.value,
            )?;
        }

        self.writer.seek(SeekFrom::End(0))?;
        self.writer.flush()?;
        self.finalized = true;

        tracing::info!(
            samples = self.sample_sizes.len(),
            payload_bytes = self.media_payload_size,
            %fps,
            %resolution,
            "MP4 stream finalized"
        );
        Ok(())
    }

    /// Number of completed samples recorded so far.
    pub fn sample_count(&self) -> usize {
        self.sample_sizes.len()
    }

    /// mdat payload bytes written so far (excludes the box header).
    pub fn media_bytes_written(&self) -> u64 {
        self.media_payload_size
    }

    /// Consume the muxer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
