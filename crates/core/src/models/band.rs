use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Colour given to bands created without one.
pub const DEFAULT_BAND_COLOR: &str = "#000000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBandRequest {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewBand {
    pub name: String,
    pub color: String,
}
