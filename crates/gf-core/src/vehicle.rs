//! Vehicle category enum shared by the planner, simulation and output crates.

/// Which planner category an agent's path came from.
///
/// Both categories move identically; the kind is carried for reporting and
/// for the HUD's collected counter (only tractors collect).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VehicleKind {
    #[default]
    Tractor,
    Cart,
}

impl VehicleKind {
    /// Human-readable label, used as the CSV/SQLite column value.
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleKind::Tractor => "tractor",
            VehicleKind::Cart    => "cart",
        }
    }
}

impl std::fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
