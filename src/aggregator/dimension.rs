//! Aggregation dimensions.

use crate::parser::schema::{EntityId, FlatRecord};
use std::fmt;
use std::str::FromStr;

/// Axis along which profit is aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Offer,
    Affiliate,
    Advertiser,
}

impl Dimension {
    /// All dimensions, in chart order
    pub const ALL: [Dimension; 3] = [Dimension::Offer, Dimension::Affiliate, Dimension::Advertiser];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Offer => "offer",
            Dimension::Affiliate => "affiliate",
            Dimension::Advertiser => "advertiser",
        }
    }

    /// Selector name used on the command line
    pub fn plural(&self) -> &'static str {
        match self {
            Dimension::Offer => "offers",
            Dimension::Affiliate => "affiliates",
            Dimension::Advertiser => "advertisers",
        }
    }

    /// Chart file name without extension
    pub fn file_stem(&self) -> String {
        format!("profit_by_{}", self.as_str())
    }

    /// Grouping key of a record for this dimension
    pub fn key<'a>(&self, record: &'a FlatRecord) -> (Option<&'a EntityId>, Option<&'a str>) {
        match self {
            Dimension::Offer => (record.offer_id.as_ref(), record.offer_name.as_deref()),
            Dimension::Affiliate => (
                record.affiliate_id.as_ref(),
                record.affiliate_name.as_deref(),
            ),
            Dimension::Advertiser => (
                record.advertiser_id.as_ref(),
                record.advertiser_name.as_deref(),
            ),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "offer" | "offers" => Ok(Dimension::Offer),
            "affiliate" | "affiliates" => Ok(Dimension::Affiliate),
            "advertiser" | "advertisers" => Ok(Dimension::Advertiser),
            other => Err(format!("unknown dimension: {}", other)),
        }
    }
}
