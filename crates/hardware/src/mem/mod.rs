//! Byte-addressable memory model.
//!
//! A flat little-endian RAM with a configurable base address. Accessors
//! exist for every width the instruction set touches (byte, half-word,
//! word, double-word) and report faults explicitly: out-of-range for
//! accesses outside the modeled region, misaligned for addresses that are
//! not a multiple of the access width. The engine core never inspects the
//! fault beyond success-vs-failure; the taxonomy lives here.

use crate::common::error::MemFault;

/// Flat RAM region starting at a base address.
#[derive(Debug)]
pub struct Memory {
    base: u64,
    data: Vec<u8>,
}

impl Memory {
    /// Creates a zero-filled memory region.
    ///
    /// # Arguments
    ///
    /// * `base` - Lowest valid guest address.
    /// * `size` - Region size in bytes.
    pub fn new(base: u64, size: usize) -> Self {
        Self {
            base,
            data: vec![0; size],
        }
    }

    /// Lowest valid guest address.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Region size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the region is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copies an image into memory at a guest address.
    ///
    /// # Arguments
    ///
    /// * `addr` - Guest address of the first byte.
    /// * `image` - Bytes to copy.
    ///
    /// # Errors
    ///
    /// `MemFault::OutOfRange` if any byte of the image falls outside the
    /// region.
    pub fn load_image(&mut self, addr: u64, image: &[u8]) -> Result<(), MemFault> {
        let off = self.offset(addr, image.len() as u64, 1)?;
        self.data[off..off + image.len()].copy_from_slice(image);
        Ok(())
    }

    fn offset(&self, addr: u64, len: u64, align: u64) -> Result<usize, MemFault> {
        if align > 1 && addr % align != 0 {
            return Err(MemFault::Misaligned {
                addr,
                width: align as u8,
            });
        }
        let end = addr.checked_add(len).ok_or(MemFault::OutOfRange {
            addr,
            width: len as u8,
        })?;
        if addr < self.base || end > self.base + self.data.len() as u64 {
            return Err(MemFault::OutOfRange {
                addr,
                width: len as u8,
            });
        }
        Ok((addr - self.base) as usize)
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// `MemFault::OutOfRange` if the address is outside the region.
    pub fn read_u8(&self, addr: u64) -> Result<u8, MemFault> {
        let off = self.offset(addr, 1, 1)?;
        Ok(self.data[off])
    }

    /// Reads a little-endian half-word.
    ///
    /// # Errors
    ///
    /// `MemFault` on out-of-range or misaligned addresses.
    pub fn read_u16(&self, addr: u64) -> Result<u16, MemFault> {
        let off = self.offset(addr, 2, 2)?;
        Ok(u16::from_le_bytes([self.data[off], self.data[off + 1]]))
    }

    /// Reads a little-endian word.
    ///
    /// # Errors
    ///
    /// `MemFault` on out-of-range or misaligned addresses.
    pub fn read_u32(&self, addr: u64) -> Result<u32, MemFault> {
        let off = self.offset(addr, 4, 4)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[off..off + 4]);
        Ok(u32::from_le_bytes(bytes))
    }

    /// Reads a little-endian double-word.
    ///
    /// # Errors
    ///
    /// `MemFault` on out-of-range or misaligned addresses.
    pub fn read_u64(&self, addr: u64) -> Result<u64, MemFault> {
        let off = self.offset(addr, 8, 8)?;
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.data[off..off + 8]);
        Ok(u64::from_le_bytes(bytes))
    }

    /// Writes one byte.
    ///
    /// # Errors
    ///
    /// `MemFault::OutOfRange` if the address is outside the region.
    pub fn write_u8(&mut self, addr: u64, val: u8) -> Result<(), MemFault> {
        let off = self.offset(addr, 1, 1)?;
        self.data[off] = val;
        Ok(())
    }

    /// Writes a little-endian half-word.
    ///
    /// # Errors
    ///
    /// `MemFault` on out-of-range or misaligned addresses.
    pub fn write_u16(&mut self, addr: u64, val: u16) -> Result<(), MemFault> {
        let off = self.offset(addr, 2, 2)?;
        self.data[off..off + 2].copy_from_slice(&val.to_le_bytes());
        Ok(())
    }

    /// Writes a little-endian word.
    ///
    /// # Errors
    ///
    /// `MemFault` on out-of-range or misaligned addresses.
    pub fn write_u32(&mut self, addr: u64, val: u32) -> Result<(), MemFault> {
        let off = self.offset(addr, 4, 4)?;
        self.data[off..off + 4].copy_from_slice(&val.to_le_bytes());
        Ok(())
    }

    /// Writes a little-endian double-word.
    ///
    /// # Errors
    ///
    /// `MemFault` on out-of-range or misaligned addresses.
    pub fn write_u64(&mut self, addr: u64, val: u64) -> Result<(), MemFault> {
        let off = self.offset(addr, 8, 8)?;
        self.data[off..off + 8].copy_from_slice(&val.to_le_bytes());
        Ok(())
    }
}
