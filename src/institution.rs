use serde::{Deserialize, Serialize};

/// One entry returned by the universities directory.
///
/// The directory sends more fields than this (country, web pages, state),
/// they are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,
    #[serde(default)]
    pub domains: Vec<String>,
}

impl Institution {
    pub fn new(name: impl Into<String>, domains: Vec<String>) -> Self {
        Self {
            name: name.into(),
            domains,
        }
    }

    /// The domain used for the logo lookup
    pub fn primary_domain(&self) -> Option<&str> {
        self.domains.first().map(|d| d.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignores_extra_fields() {
        let json = r#"[{
            "name": "Massachusetts Institute of Technology",
            "domains": ["mit.edu"],
            "web_pages": ["http://web.mit.edu/"],
            "alpha_two_code": "US",
            "state-province": null,
            "country": "United States"
        }]"#;

        let parsed: Vec<Institution> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "Massachusetts Institute of Technology");
        assert_eq!(parsed[0].primary_domain(), Some("mit.edu"));
    }

    #[test]
    fn test_missing_domains() {
        let parsed: Institution = serde_json::from_str(r#"{"name": "Nowhere College"}"#).unwrap();
        assert!(parsed.domains.is_empty());
        assert_eq!(parsed.primary_domain(), None);
    }

    #[test]
    fn test_primary_domain_is_first() {
        let inst = Institution::new(
            "University of Cambridge",
            vec!["cam.ac.uk".to_string(), "cambridge.ac.uk".to_string()],
        );
        assert_eq!(inst.primary_domain(), Some("cam.ac.uk"));
    }
}
