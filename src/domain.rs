// src/domain.rs

//! Domain index: grouping catalog records by their owning domain
//!
//! Every record belongs to a domain (an application bundle, `HomeDomain`,
//! `MediaDomain`, ...). Domains are offered for selection through their
//! "naked" placeholder records, the ones with an empty relative path.

use crate::db::models::CatalogRecord;
use tracing::debug;

/// All records that share one domain, in catalog order
#[derive(Debug, Clone)]
pub struct DomainGroup<'a> {
    pub name: String,
    pub records: Vec<&'a CatalogRecord>,
}

impl<'a> DomainGroup<'a> {
    /// Build the group for `name` from a full record list
    pub fn collect(records: &'a [CatalogRecord], name: &str) -> Self {
        Self {
            name: name.to_string(),
            records: select_domain(records, name),
        }
    }

    /// Number of records carrying a copyable payload
    pub fn regular_file_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_regular_file()).count()
    }

    /// True if at least one record has a relative path
    pub fn has_file_tree(&self) -> bool {
        self.records.iter().any(|r| !r.is_naked())
    }
}

/// Collect the domain names of all naked records, sorted ascending
///
/// With `dedupe` off, a domain with several naked records appears once per
/// record.
pub fn build_naked_domain_list(records: &[CatalogRecord], dedupe: bool) -> Vec<String> {
    let mut domains: Vec<String> = records
        .iter()
        .filter(|r| r.is_naked())
        .map(|r| r.domain.clone())
        .collect();

    domains.sort();
    if dedupe {
        domains.dedup();
    }

    debug!(
        "Built naked domain list: {} entries (dedupe: {})",
        domains.len(),
        dedupe
    );
    domains
}

/// Select every record of a domain, preserving catalog order
pub fn select_domain<'a>(records: &'a [CatalogRecord], domain: &str) -> Vec<&'a CatalogRecord> {
    records.iter().filter(|r| r.domain == domain).collect()
}

/// Catalog indices of every record of a domain, ascending
pub fn domain_rows(records: &[CatalogRecord], domain: &str) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.domain == domain)
        .map(|(idx, _)| idx)
        .collect()
}

/// First domain in list order whose name contains `search`
///
/// Returns the zero-based position alongside the name.
pub fn find_first_match<'a>(domains: &'a [String], search: &str) -> Option<(usize, &'a str)> {
    domains
        .iter()
        .enumerate()
        .find(|(_, name)| name.contains(search))
        .map(|(idx, name)| (idx, name.as_str()))
}
