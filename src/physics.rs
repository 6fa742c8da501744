// ---------------------------------------------------------------------------
// Balmer-series helper
// ---------------------------------------------------------------------------

/// Read-only table of the physical constants the Balmer helper needs
/// (CODATA 2018 values, SI units).
#[derive(Debug, Clone, Copy)]
pub struct PhysicalConstants {
    /// Rydberg constant for an infinitely heavy nucleus, 1/m.
    pub rydberg: f64,
    /// Electron mass, kg.
    pub electron_mass: f64,
    /// Proton mass, kg.
    pub proton_mass: f64,
    /// Neutron mass, kg.
    pub neutron_mass: f64,
}

/// CODATA 2018 constants.
pub const CODATA: PhysicalConstants = PhysicalConstants {
    rydberg: 1.097_373_156_816_0e7,
    electron_mass: 9.109_383_701_5e-31,
    proton_mass: 1.672_621_923_69e-27,
    neutron_mass: 1.674_927_498_04e-27,
};

/// Wavelength (in meters) of the Balmer line emitted when a hydrogen
/// electron drops from level `n` to level 2. Returns `None` for `n < 3`,
/// where no such transition exists.
///
/// Uses the Rydberg constant corrected for the finite hydrogen nucleus mass.
pub fn balmer_wavelength(n: u32) -> Option<f64> {
    balmer_wavelength_with(n, &CODATA)
}

/// [`balmer_wavelength`] over an explicit constants table.
pub fn balmer_wavelength_with(n: u32, constants: &PhysicalConstants) -> Option<f64> {
    if n < 3 {
        return None;
    }
    let rydberg_hydrogen = constants.rydberg
        / (1.0 + constants.electron_mass / (constants.proton_mass + constants.neutron_mass));
    let n = n as f64;
    Some(1.0 / (rydberg_hydrogen * (0.25 - 1.0 / (n * n))))
}
