//! `avcmux` — incremental H.264 Annex-B to MP4 (ISO BMFF) muxer.
//!
//! Consumes a live stream of Annex-B NAL units from a video encoder and
//! produces a valid, self-contained MP4 file without ever holding the full
//! encoded stream in memory.
//!
//! # Architecture
//!
//! - **True streaming** — ordinary sample bytes go straight to the sink as
//!   they arrive; only SPS/PPS units are buffered (they belong in the avcC
//!   box, not the sample stream)
//! - **Deferred patching** — the mdat size and every sample's 4-byte NAL
//!   length prefix cannot be known at write time, so the muxer records a
//!   ledger of (offset, value) rewrites and applies them during `finalize`
//! - **Moov-at-end** — the moov (metadata) box is appended after all media
//!   data, so the sink only needs sequential writes plus seek-and-overwrite
//!
//! # Usage
//!
//! ```ignore
//! use avcmux::{Mp4Muxer, Rational, Resolution};
//!
//! let mut muxer = Mp4Muxer::create("capture.mp4")?;
//!
//! // One call per fragment of encoder output, in stream order.
//! muxer.append(&nal_bytes, is_parameter_set, is_unit_complete)?;
//!
//! // After the last unit: write metadata and patch the deferred fields.
//! muxer.finalize(Rational::FPS_30, Resolution::new(1280, 720))?;
//! ```

pub mod atoms;
pub mod boxes;
pub mod error;
pub mod muxer;
pub mod nal;
pub mod types;

// Re-export primary API types
pub use error::{MuxError, MuxResult};
pub use muxer::Mp4Muxer;
pub use types::{Rational, Resolution};
