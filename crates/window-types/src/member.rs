use serde::{Deserialize, Serialize};

/// Grouping used to keep BOM output in fabrication order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Frame,
    Sash,
    Mullion,
    HorizontalDivision,
    VerticalDivision,
    TenonedRail,
}

/// A timber part with its true size. Values stay unrounded until the BOM is
/// assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralMember {
    pub name: String,
    pub kind: MemberKind,
    pub length_mm: f64,
    pub width_mm: f64,
    pub thickness_mm: f64,
}

impl StructuralMember {
    pub fn new(
        kind: MemberKind,
        name: impl Into<String>,
        length_mm: f64,
        width_mm: f64,
        thickness_mm: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            length_mm,
            width_mm,
            thickness_mm,
        }
    }
}
