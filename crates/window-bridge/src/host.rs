use bom_format::BomDocument;

/// Failures reported by the fabrication host.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HostError {
    #[error("component host rejected the bill of materials: {reason}")]
    Rejected { reason: String },
}

/// Receives finished bills of materials and generates the physical parts.
pub trait ComponentHost {
    fn generate_parts(&mut self, document: &BomDocument) -> Result<(), HostError>;
}

/// Text shown to the user when no host can take the BOM.
pub const MISSING_HOST_MESSAGE: &str =
    "No component host is connected, so the window parts cannot be generated.";
