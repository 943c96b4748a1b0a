//! Response body decoders
//!
//! Metadata queries answer with small XML documents; report downloads answer
//! with gzip-compressed tab-separated text.

pub mod report;
pub mod xml;

pub use report::decode_report;
pub use xml::{decode_token_info, decode_vendor_list, decode_vendors_and_regions};
