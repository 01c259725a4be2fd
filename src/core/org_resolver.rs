use regex::Regex;
use tracing::{info, warn};

use crate::core::portal::PortalClient;
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrgIdLookup {
    Found(u64),
    Missing,
    /// More than one candidate id; never resolved by picking one.
    Ambiguous(usize),
}

impl OrgIdLookup {
    pub fn org_id(&self) -> Option<u64> {
        match self {
            OrgIdLookup::Found(id) => Some(*id),
            _ => None,
        }
    }
}

/// Finds the organization id the landing page embeds in its escaped initial
/// data, e.g. `{\"OrgId\":\"12345\",...`. Only an `OrgId` opening an object counts.
pub struct OrgIdResolver {
    org_id_regex: Regex,
}

impl Default for OrgIdResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OrgIdResolver {
    pub fn new() -> Self {
        OrgIdResolver {
            org_id_regex: Regex::new(r#"\{\\"OrgId\\":\\"(\d+)\\""#).unwrap(),
        }
    }

    pub fn parse(&self, body: &str) -> OrgIdLookup {
        let ids: Vec<&str> = self
            .org_id_regex
            .captures_iter(body)
            .filter_map(|captures| captures.get(1))
            .map(|m| m.as_str())
            .collect();

        match ids.as_slice() {
            [] => OrgIdLookup::Missing,
            [id] => id
                .parse()
                .map(OrgIdLookup::Found)
                .unwrap_or(OrgIdLookup::Missing),
            many => OrgIdLookup::Ambiguous(many.len()),
        }
    }

    pub async fn resolve(&self, client: &PortalClient) -> Result<OrgIdLookup> {
        let body = client.landing_page().await?;
        let lookup = self.parse(&body);

        match lookup {
            OrgIdLookup::Found(id) => info!("Resolved org id {} from {}", id, client.base_url()),
            OrgIdLookup::Missing => warn!("No org id found on {}", client.base_url()),
            OrgIdLookup::Ambiguous(count) => {
                warn!("{} org ids found on {}, refusing to guess", count, client.base_url())
            }
        }

        Ok(lookup)
    }
}
