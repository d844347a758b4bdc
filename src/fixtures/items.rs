//! Item Fixtures

use serde::Deserialize;

/// Wrapper for a scan list in YAML
#[derive(Debug, Deserialize)]
pub struct ItemsFixture {
    /// Product codes in scan order
    pub items: Vec<String>,
}
