//! Flat-image loader.
//!
//! Programs are raw little-endian instruction streams with no container
//! format; the image is copied into guest memory as-is.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::common::error::MemFault;
use crate::core::Machine;

/// A failed program load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    /// The image does not fit in guest memory at the requested address.
    #[error(transparent)]
    Mem(#[from] MemFault),
}

/// Reads a flat binary image and copies it into guest memory.
///
/// # Arguments
///
/// * `mach` - The target machine.
/// * `path` - Path to the image file.
/// * `addr` - Guest address for the first byte of the image.
///
/// # Returns
///
/// The image size in bytes.
///
/// # Errors
///
/// `LoadError::Io` if the file cannot be read, `LoadError::Mem` if the
/// image does not fit at `addr`.
pub fn load_flat_binary(
    mach: &mut Machine,
    path: impl AsRef<Path>,
    addr: u64,
) -> Result<usize, LoadError> {
    let path = path.as_ref();
    let image = fs::read(path)?;
    mach.mem.load_image(addr, &image)?;
    info!(
        target: "armsim::loader",
        path = %path.display(),
        addr = format_args!("{addr:#x}"),
        bytes = image.len(),
        "image loaded"
    );
    Ok(image.len())
}
