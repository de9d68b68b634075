use crate::url::domain::{extract_domain, site_host};
use crate::url::matcher::matches_wildcard;
use url::Url;

/// The set of hosts a crawl may visit
///
/// Built once from the seed URLs. Hosts are compared case-insensitively and
/// with any leading `www.` removed. Whether subdomains of a seed host are in
/// scope is the single explicit `include_subdomains` switch.
#[derive(Debug, Clone)]
pub struct CrawlScope {
    hosts: Vec<String>,
    include_subdomains: bool,
}

impl CrawlScope {
    /// Builds the scope from seed URLs
    pub fn from_seeds<'a>(seeds: impl IntoIterator<Item = &'a Url>, include_subdomains: bool) -> Self {
        let mut hosts: Vec<String> = Vec::new();
        for seed in seeds {
            if let Some(host) = extract_domain(seed) {
                let host = site_host(&host).to_string();
                if !hosts.contains(&host) {
                    hosts.push(host);
                }
            }
        }

        Self {
            hosts,
            include_subdomains,
        }
    }

    /// Returns true if the URL's host is inside the allowed domain set
    pub fn allows(&self, url: &Url) -> bool {
        let Some(host) = extract_domain(url) else {
            return false;
        };
        let host = site_host(&host);

        self.hosts.iter().any(|allowed| {
            if self.include_subdomains {
                matches_wildcard(&format!("*.{}", allowed), host)
            } else {
                host == allowed
            }
        })
    }

    /// The allowed hosts, in seed order
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }
}
