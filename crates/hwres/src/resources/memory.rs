use serde::{Deserialize, Serialize};

use crate::common::format::human_size;

const BYTES_PER_MEBIBYTE: u64 = 1024 * 1024;

/// Amount of memory in bytes.
#[derive(
    Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct MemorySize(u64);

impl MemorySize {
    pub const ZERO: MemorySize = MemorySize(0);

    pub const fn from_bytes(bytes: u64) -> Self {
        MemorySize(bytes)
    }

    pub const fn of_mebi_bytes(mebi_bytes: u64) -> Self {
        MemorySize(mebi_bytes * BYTES_PER_MEBIBYTE)
    }

    #[inline]
    pub fn bytes(&self) -> u64 {
        self.0
    }

    /// Size in whole mebibytes, rounded down.
    #[inline]
    pub fn mebi_bytes(&self) -> u64 {
        self.0 / BYTES_PER_MEBIBYTE
    }

    pub fn saturating_add(self, other: MemorySize) -> MemorySize {
        MemorySize(self.0.saturating_add(other.0))
    }

    pub fn checked_sub(self, other: MemorySize) -> Option<MemorySize> {
        self.0.checked_sub(other.0).map(MemorySize)
    }
}

impl std::fmt::Display for MemorySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&human_size(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::MemorySize;

    #[test]
    fn test_memory_size_units() {
        let size = MemorySize::of_mebi_bytes(3);
        assert_eq!(size.bytes(), 3 * 1024 * 1024);
        assert_eq!(size.mebi_bytes(), 3);
        assert_eq!(MemorySize::from_bytes(1024 * 1024 - 1).mebi_bytes(), 0);
        assert_eq!(size.to_string(), "3.00 MiB");
    }

    #[test]
    fn test_memory_size_arithmetic() {
        let a = MemorySize::of_mebi_bytes(10);
        let b = MemorySize::of_mebi_bytes(4);
        assert_eq!(a.saturating_add(b), MemorySize::of_mebi_bytes(14));
        assert_eq!(a.checked_sub(b), Some(MemorySize::of_mebi_bytes(6)));
        assert_eq!(b.checked_sub(a), None);
    }
}
