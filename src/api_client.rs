use crate::institution::Institution;
use anyhow::{anyhow, Context, Result};

pub const DEFAULT_SEARCH_URL: &str = "http://universities.hipolabs.com";
pub const DEFAULT_LOGO_URL: &str = "https://logo.clearbit.com";

/// `<base>/<domain>`, the address both probed and shown as the image source
pub fn logo_url(base_url: &str, domain: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), domain)
}

/// Client for the universities directory search endpoint
#[derive(Clone)]
pub struct DirectoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl DirectoryClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `<base>/search?name=<term>`. Results come back in the order the
    /// directory ranked them.
    pub async fn search(&self, term: &str) -> Result<Vec<Institution>> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("name", term)])
            .send()
            .await
            .with_context(|| format!("search request for '{}' failed", term))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "search for '{}' returned {}",
                term,
                response.status()
            ));
        }

        let institutions: Vec<Institution> = response
            .json()
            .await
            .context("search response was not a list of institutions")?;
        Ok(institutions)
    }
}

/// Client for the logo service. The probe URL doubles as the image source.
#[derive(Clone)]
pub struct LogoClient {
    base_url: String,
    client: reqwest::Client,
}

impl LogoClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn logo_url(&self, domain: &str) -> String {
        logo_url(&self.base_url, domain)
    }

    /// Fetch the logo once to check it exists. Returns the URL on success.
    pub async fn probe(&self, domain: &str) -> Result<String> {
        let url = self.logo_url(domain);
        self.probe_url(&url).await?;
        Ok(url)
    }

    pub async fn probe_url(&self, url: &str) -> Result<()> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("logo request to {} failed", url))?;

        if !response.status().is_success() {
            return Err(anyhow!("logo at {} returned {}", url, response.status()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_url() {
        let client = LogoClient::new(DEFAULT_LOGO_URL);
        assert_eq!(client.logo_url("mit.edu"), "https://logo.clearbit.com/mit.edu");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = LogoClient::new("https://logo.example.com/");
        assert_eq!(client.logo_url("ox.ac.uk"), "https://logo.example.com/ox.ac.uk");

        let directory = DirectoryClient::new("http://localhost:8080/");
        assert_eq!(directory.base_url(), "http://localhost:8080");
    }
}
