//! On-disk snapshot codec for the replay buffer.
//!
//! Layout: a big-endian `u32` header length, a JSON-encoded [`SnapshotMeta`],
//! then the three `f32` backings (`x`, `log_w`, `log_q_old`) as raw
//! native-endian payload sections. Section lengths are derived from the
//! metadata, so the file needs no framing beyond the header prefix.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

type Header = u32;
const HEADER_SIZE: usize = size_of::<Header>();

/// Scalar buffer state persisted alongside the array payloads.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) struct SnapshotMeta {
    pub capacity: usize,
    pub dim: usize,
    pub write_cursor: usize,
    pub is_full: bool,
    pub can_sample: bool,
}

/// Writes a snapshot with the given metadata and payload sections.
pub(crate) fn write(path: &Path, meta: &SnapshotMeta, sections: [&[f32]; 3]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    let meta_buf = serde_json::to_vec(meta)?;
    let header = (meta_buf.len() as Header).to_be_bytes();
    file.write_all(&header)?;
    file.write_all(&meta_buf)?;

    for section in sections {
        file.write_all(bytemuck::cast_slice(section))?;
    }

    file.flush()
}

/// Reads a snapshot back, returning the metadata and the three payload
/// sections sized from it.
pub(crate) fn read(path: &Path) -> io::Result<(SnapshotMeta, Vec<f32>, Vec<f32>, Vec<f32>)> {
    let mut file = BufReader::new(File::open(path)?);

    let mut header = [0u8; HEADER_SIZE];
    file.read_exact(&mut header)?;
    let meta_len = Header::from_be_bytes(header) as usize;

    let mut meta_buf = vec![0u8; meta_len];
    file.read_exact(&mut meta_buf)?;
    let meta: SnapshotMeta = serde_json::from_slice(&meta_buf)?;

    let mut x = vec![0.0f32; meta.capacity * meta.dim];
    let mut log_w = vec![0.0f32; meta.capacity];
    let mut log_q_old = vec![0.0f32; meta.capacity];

    file.read_exact(bytemuck::cast_slice_mut(x.as_mut_slice()))?;
    file.read_exact(bytemuck::cast_slice_mut(log_w.as_mut_slice()))?;
    file.read_exact(bytemuck::cast_slice_mut(log_q_old.as_mut_slice()))?;

    Ok((meta, x, log_w, log_q_old))
}
