//! Explicit driver registry: matches bus devices to drivers by a
//! compatibility string.

use heapless::Vec;

/// Compatibility string of the Nunchuk.
pub const NUNCHUK_COMPATIBLE: &str = "nintendo,nunchuk";

/// One driver and the device identifiers it handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverEntry {
    pub name: &'static str,
    pub compatible: &'static [&'static str],
}

impl DriverEntry {
    #[inline]
    #[must_use]
    pub fn matches(&self, compatible: &str) -> bool {
        self.compatible.iter().any(|c| *c == compatible)
    }
}

/// The Nunchuk driver entry.
pub const NUNCHUK_DRIVER: DriverEntry = DriverEntry {
    name: "nunchuk",
    compatible: &[NUNCHUK_COMPATIBLE],
};

/// Error type for registry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// No room for another driver.
    Full,
    /// A driver with the same name is already registered.
    Duplicate,
}

/// Bounded table of drivers, owned by whoever performs device matching.
#[derive(Clone, Debug, Default)]
pub struct DriverRegistry<const N: usize> {
    entries: Vec<DriverEntry, N>,
}

impl<const N: usize> DriverRegistry<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add a driver.
    pub fn register(&mut self, entry: DriverEntry) -> Result<(), RegistryError> {
        if self.entries.iter().any(|e| e.name == entry.name) {
            return Err(RegistryError::Duplicate);
        }
        self.entries.push(entry).map_err(|_| RegistryError::Full)
    }

    /// Find the driver handling `compatible`.
    #[must_use]
    pub fn find(&self, compatible: &str) -> Option<&DriverEntry> {
        self.entries.iter().find(|e| e.matches(compatible))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OTHER: DriverEntry = DriverEntry {
        name: "classic",
        compatible: &["nintendo,classic-controller"],
    };

    #[test]
    fn test_find_by_compatible() {
        let mut registry = DriverRegistry::<2>::new();
        registry.register(NUNCHUK_DRIVER).unwrap();
        registry.register(OTHER).unwrap();

        assert_eq!(registry.find("nintendo,nunchuk"), Some(&NUNCHUK_DRIVER));
        assert_eq!(registry.find("nintendo,classic-controller"), Some(&OTHER));
        assert_eq!(registry.find("acme,joystick"), None);
    }

    #[test]
    fn test_register_limits() {
        let mut registry = DriverRegistry::<1>::new();
        assert!(registry.is_empty());
        registry.register(NUNCHUK_DRIVER).unwrap();
        assert_eq!(registry.register(NUNCHUK_DRIVER), Err(RegistryError::Duplicate));
        assert_eq!(registry.register(OTHER), Err(RegistryError::Full));
        assert_eq!(registry.len(), 1);
    }
}
