//! Legal-use classifications attached to marketplace offerings.

use std::fmt::{Display, Formatter, Result as FormatResult};

use serde::{Deserialize, Serialize};

/// The license under which an offering's data may be used.
///
/// A closed wire vocabulary, like [`crate::PricingModel`]: the compiled
/// query carries the symbolic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseType {
    OpenDataLicense,
    CreativeCommons,
    NonCommercialDataLicense,
    ProjectInternalUseOnly,
}

impl LicenseType {
    /// The symbolic name as it appears in compiled query text.
    pub fn as_query_literal(&self) -> &'static str {
        match self {
            LicenseType::OpenDataLicense => "OPEN_DATA_LICENSE",
            LicenseType::CreativeCommons => "CREATIVE_COMMONS",
            LicenseType::NonCommercialDataLicense => "NON_COMMERCIAL_DATA_LICENSE",
            LicenseType::ProjectInternalUseOnly => "PROJECT_INTERNAL_USE_ONLY",
        }
    }
}

impl Display for LicenseType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{}", self.as_query_literal())
    }
}
