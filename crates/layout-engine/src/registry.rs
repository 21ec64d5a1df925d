//! Per-window panel state: the only owner of infill assignments.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};
use window_types::{InfillType, MaterialDefaults, Panel, PanelRecord, PanelSize};

#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    pub panel: Panel,
    /// Infill was chosen explicitly rather than left at the default.
    pub assigned: bool,
    pub thickness_override: Option<f64>,
    pub overlap_override: Option<f64>,
    /// True size from the mm calculator or an external provider.
    pub size_mm: Option<PanelSize>,
}

/// Panels of one window instance, in layout order.
#[derive(Debug, Clone, Default)]
pub struct PanelRegistry {
    entries: Vec<RegistryEntry>,
    index: HashMap<String, usize>,
    materials: MaterialDefaults,
}

impl PanelRegistry {
    pub fn new(materials: MaterialDefaults) -> Self {
        Self {
            materials,
            ..Self::default()
        }
    }

    pub fn materials(&self) -> &MaterialDefaults {
        &self.materials
    }

    /// Changes the defaults used by later type changes. Existing panels keep
    /// their values.
    pub fn set_materials(&mut self, materials: MaterialDefaults) {
        self.materials = materials;
    }

    /// Replaces the whole registry with a fresh set of panels.
    pub fn initialize(&mut self, panels: Vec<Panel>) {
        self.index.clear();
        self.entries = panels
            .into_iter()
            .enumerate()
            .map(|(i, panel)| {
                if self.index.insert(panel.id.clone(), i).is_some() {
                    warn!(id = %panel.id, "duplicate panel id, later entry wins lookups");
                }
                RegistryEntry {
                    panel,
                    assigned: false,
                    thickness_override: None,
                    overlap_override: None,
                    size_mm: None,
                }
            })
            .collect();
        debug!(count = self.entries.len(), "panel registry initialized");
    }

    fn entry_mut(&mut self, id: &str) -> Option<&mut RegistryEntry> {
        let i = *self.index.get(id)?;
        self.entries.get_mut(i)
    }

    /// Sets a panel's infill and re-derives thickness and overlap from the
    /// material defaults, unless overridden. Unknown ids are logged and
    /// ignored; the return value says whether anything changed.
    pub fn set_infill_type(&mut self, id: &str, infill: InfillType) -> bool {
        let materials = self.materials;
        let Some(entry) = self.entry_mut(id) else {
            warn!(id, "set_infill_type on unknown panel, ignoring");
            return false;
        };
        let spec = materials.for_type(infill);
        entry.panel.infill_type = infill;
        entry.panel.thickness = entry.thickness_override.unwrap_or(spec.thickness);
        entry.panel.overlap = entry.overlap_override.unwrap_or(spec.overlap);
        entry.assigned = true;
        debug!(id, ?infill, thickness = entry.panel.thickness, "panel infill changed");
        true
    }

    /// Pins thickness and/or overlap for one panel across type changes.
    pub fn set_overrides(&mut self, id: &str, thickness: Option<f64>, overlap: Option<f64>) -> bool {
        let Some(entry) = self.entry_mut(id) else {
            warn!(id, "set_overrides on unknown panel, ignoring");
            return false;
        };
        entry.thickness_override = thickness;
        entry.overlap_override = overlap;
        if let Some(t) = thickness {
            entry.panel.thickness = t;
        }
        if let Some(o) = overlap {
            entry.panel.overlap = o;
        }
        true
    }

    pub fn get(&self, id: &str) -> Option<&Panel> {
        self.entry(id).map(|e| &e.panel)
    }

    pub fn entry(&self, id: &str) -> Option<&RegistryEntry> {
        self.index.get(id).and_then(|&i| self.entries.get(i))
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn get_all(&self) -> Vec<Panel> {
        self.entries.iter().map(|e| e.panel.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlap to add to a panel's nominal size, if the panel is known.
    pub fn overlap_for(&self, id: &str) -> Option<f64> {
        self.get(id).map(|p| p.overlap)
    }

    pub fn to_serializable(&self) -> Vec<PanelRecord> {
        self.entries.iter().map(|e| PanelRecord::from(&e.panel)).collect()
    }

    /// Restores infill state from persisted records onto a registry of the
    /// same topology. Records for ids not present are logged and skipped.
    /// Returns how many records were applied.
    pub fn apply_records(&mut self, records: &[PanelRecord]) -> usize {
        let mut applied = 0;
        for record in records {
            let Some(entry) = self.entry_mut(&record.id) else {
                warn!(id = %record.id, "saved panel has no counterpart in this layout");
                continue;
            };
            entry.panel.infill_type = record.infill_type;
            entry.panel.thickness = record.thickness;
            entry.panel.overlap = record.overlap;
            entry.assigned = true;
            applied += 1;
        }
        debug!(applied, total = records.len(), "panel records applied");
        applied
    }

    /// Records true mm sizes against the panels they belong to.
    pub fn attach_sizes(&mut self, sizes: &BTreeMap<String, PanelSize>) {
        for entry in &mut self.entries {
            entry.size_mm = sizes.get(&entry.panel.id).copied();
        }
    }
}
