//! XML metadata documents

use chrono::NaiveDate;
use itc_core::{Error, Result};
use itc_models::{Region, TokenInfo, VendorRegionMap, VendorRegions};
use roxmltree::{Document, Node};

const EXPIRATION_DATE_FORMAT: &str = "%Y-%m-%d";

// The service prefixes bodies with a newline, which is not allowed before the
// XML declaration.
fn parse(xml: &str) -> Result<Document<'_>> {
  Document::parse(xml.trim()).map_err(|e| Error::Decode(format!("malformed XML: {e}")))
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
  node.children().filter(|n| n.is_element())
}

fn text_of(node: Node<'_, '_>) -> String {
  node.text().unwrap_or_default().to_string()
}

/// Text of every direct child of the root, in document order.
///
/// Used for `<Vendors><Vendor>80012345</Vendor>...</Vendors>`.
pub fn decode_vendor_list(xml: &str) -> Result<Vec<String>> {
  let doc = parse(xml)?;
  Ok(elements(doc.root_element()).map(text_of).collect())
}

/// Decode a `<VendorsAndRegions>` tree.
///
/// Each vendor's first child holds its number; of the remaining children only
/// `Region` elements are read. A region's first child is its code and the
/// children of its second child are the report names.
pub fn decode_vendors_and_regions(xml: &str) -> Result<VendorRegionMap> {
  let doc = parse(xml)?;
  let mut vendors = VendorRegionMap::new();

  for vendor in elements(doc.root_element()) {
    let mut children = elements(vendor);
    let id = children.next().map(text_of).ok_or_else(|| Error::missing("vendor number"))?;

    let regions = children
      .filter(|child| child.has_tag_name("Region"))
      .map(decode_region)
      .collect::<Result<Vec<_>>>()?;

    vendors.insert(id.clone(), VendorRegions { id, regions });
  }

  Ok(vendors)
}

fn decode_region(region: Node<'_, '_>) -> Result<Region> {
  let mut children = elements(region);
  let code = children.next().map(text_of).ok_or_else(|| Error::missing("region code"))?;
  let reports = children.next().ok_or_else(|| Error::missing("region report list"))?;

  Ok(Region { code, reports: elements(reports).map(text_of).collect() })
}

/// Decode a `<ViewToken>` document.
///
/// All three elements are optional; an `ExpirationDate` that is present but
/// not `YYYY-MM-DD` is an error.
pub fn decode_token_info(xml: &str) -> Result<TokenInfo> {
  let doc = parse(xml)?;
  let root = doc.root_element();
  let find = |tag: &str| elements(root).find(|n| n.has_tag_name(tag)).map(text_of);

  let expiration_date = find("ExpirationDate")
    .map(|raw| {
      NaiveDate::parse_from_str(raw.trim(), EXPIRATION_DATE_FORMAT)
        .map_err(|e| Error::Decode(format!("invalid ExpirationDate {raw:?}: {e}")))
    })
    .transpose()?;

  Ok(TokenInfo {
    access_token: find("AccessToken").map(|t| t.trim().to_string()),
    expiration_date,
    message: find("Message"),
  })
}
