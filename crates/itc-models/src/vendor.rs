//! Vendor and region listings

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Vendor number as returned by `getVendors`
pub type VendorId = String;

/// One region a vendor can pull financial reports for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
  /// Region code, e.g. `US` or `JP`
  pub code: String,

  /// Report names available for this region, in document order
  pub reports: Vec<String>,
}

/// A vendor and the regions it reports in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorRegions {
  /// Vendor number
  pub id: VendorId,

  /// Regions in document order
  pub regions: Vec<Region>,
}

/// `getVendorsAndRegions` result keyed by vendor number
pub type VendorRegionMap = HashMap<VendorId, VendorRegions>;
