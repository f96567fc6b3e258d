//! MediaWiki Action API client.
//!
//! Resolves category listings (`list=categorymembers`) and article text
//! (`prop=extracts`) and exposes them through [`ContentSource`].

use std::collections::BTreeMap;

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use wikicorpus_shared::{
    ApiConfig, CategoryMember, ContentSource, Result, WikiCorpusError, WikiPage,
};

use crate::sections::parse_extract;

/// Largest `cmlimit` accepted for anonymous clients.
const CATEGORY_PAGE_LIMIT: &str = "500";

// ---------------------------------------------------------------------------
// Response shapes (formatversion=2)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiResponse<Q> {
    query: Option<Q>,
    /// Continuation parameters to send back verbatim for the next batch.
    #[serde(rename = "continue", default)]
    cont: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct CategoryMembersQuery {
    #[serde(default)]
    categorymembers: Vec<CategoryMember>,
}

#[derive(Debug, Deserialize)]
struct ExtractsQuery {
    #[serde(default)]
    pages: Vec<ExtractPage>,
}

#[derive(Debug, Deserialize)]
struct ExtractPage {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
}

// ---------------------------------------------------------------------------
// WikiClient
// ---------------------------------------------------------------------------

/// HTTP client bound to one wiki's `api.php` endpoint.
pub struct WikiClient {
    client: Client,
    endpoint: Url,
}

impl WikiClient {
    /// Create a client for the given language using the configured endpoint template.
    pub fn new(lang: &str, api: &ApiConfig) -> Result<Self> {
        if lang.is_empty() || !lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(WikiCorpusError::validation(format!(
                "invalid language code '{lang}'"
            )));
        }

        let raw = api.endpoint_for(lang);
        let endpoint = Url::parse(&raw)
            .map_err(|e| WikiCorpusError::config(format!("invalid API endpoint '{raw}': {e}")))?;
        Self::with_endpoint(endpoint, &api.user_agent)
    }

    /// Create a client for an explicit endpoint URL.
    pub fn with_endpoint(endpoint: Url, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| WikiCorpusError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }

    /// The `api.php` URL requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Issue one `action=query` request and decode its body.
    async fn query<Q: DeserializeOwned>(
        &self,
        params: &[(&str, String)],
    ) -> Result<ApiResponse<Q>> {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("action", "query")
                .append_pair("format", "json")
                .append_pair("formatversion", "2");
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }

        debug!(%url, "api request");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| WikiCorpusError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WikiCorpusError::Network(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WikiCorpusError::Network(format!("{url}: body read failed: {e}")))?;

        let mut decoded: ApiResponse<Q> = serde_json::from_str(&body)
            .map_err(|e| WikiCorpusError::parse(format!("{url}: {e}")))?;

        if let Some(err) = decoded.error.take() {
            return Err(WikiCorpusError::Api {
                code: err.code,
                info: err.info,
            });
        }

        Ok(decoded)
    }
}

impl ContentSource for WikiClient {
    #[instrument(skip(self))]
    async fn category_members(&self, category: &str) -> Result<Vec<CategoryMember>> {
        let mut members = Vec::new();
        let mut cont: BTreeMap<String, serde_json::Value> = BTreeMap::new();

        loop {
            let mut params = vec![
                ("list", "categorymembers".to_string()),
                ("cmtitle", category.to_string()),
                ("cmlimit", CATEGORY_PAGE_LIMIT.to_string()),
                ("cmprop", "ids|title".to_string()),
            ];
            for (key, value) in &cont {
                params.push((key.as_str(), continuation_value(value)));
            }

            let response: ApiResponse<CategoryMembersQuery> = self.query(&params).await?;
            if let Some(query) = response.query {
                members.extend(query.categorymembers);
            }

            match response.cont {
                Some(next) if !next.is_empty() => cont = next,
                _ => break,
            }
        }

        debug!(count = members.len(), "category members resolved");
        Ok(members)
    }

    #[instrument(skip(self))]
    async fn fetch_page(&self, title: &str) -> Result<WikiPage> {
        let params = [
            ("prop", "extracts".to_string()),
            ("explaintext", "1".to_string()),
            ("exsectionformat", "wiki".to_string()),
            ("titles", title.to_string()),
        ];

        let response: ApiResponse<ExtractsQuery> = self.query(&params).await?;
        let page = response.query.and_then(|q| q.pages.into_iter().next());

        let Some(page) = page else {
            debug!("no page in response, treating as missing");
            return Ok(WikiPage::missing(title));
        };

        if page.missing || page.invalid {
            debug!("page does not exist");
            return Ok(WikiPage::missing(page.title));
        }

        let (summary, sections) = parse_extract(page.extract.as_deref().unwrap_or_default());

        Ok(WikiPage {
            title: page.title,
            exists: true,
            summary,
            sections,
        })
    }
}

/// Render a continuation value the way the API expects it back.
fn continuation_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> WikiClient {
        let endpoint = Url::parse(&format!("{}/w/api.php", server.uri())).unwrap();
        WikiClient::with_endpoint(endpoint, "WikiCorpus-test/0.0").unwrap()
    }

    #[test]
    fn new_uses_language_endpoint() {
        let client = WikiClient::new("de", &ApiConfig::default()).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://de.wikipedia.org/w/api.php"
        );
    }

    #[test]
    fn new_rejects_invalid_endpoint() {
        let api = ApiConfig {
            endpoint: "not a url".into(),
            ..ApiConfig::default()
        };
        assert!(matches!(
            WikiClient::new("de", &api),
            Err(WikiCorpusError::Config { .. })
        ));
    }

    #[test]
    fn new_rejects_bad_language_code() {
        for lang in ["", "de/..", "en wiki"] {
            assert!(matches!(
                WikiClient::new(lang, &ApiConfig::default()),
                Err(WikiCorpusError::Validation { .. })
            ));
        }
        assert!(WikiClient::new("zh-min-nan", &ApiConfig::default()).is_ok());
    }

    #[test]
    fn response_without_query_decodes() {
        let body = r#"{"batchcomplete": true}"#;
        let decoded: ApiResponse<ExtractsQuery> = serde_json::from_str(body).unwrap();
        assert!(decoded.query.is_none());
        assert!(decoded.cont.is_none());
        assert!(decoded.error.is_none());
    }

    #[tokio::test]
    async fn fetch_page_without_query_is_missing() {
        let server = MockServer::start().await;

        let body = serde_json::json!({"batchcomplete": true});

        Mock::given(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let page = client.fetch_page("Altersrente").await.unwrap();

        assert!(!page.exists);
        assert_eq!(page.title, "Altersrente");
    }

    #[tokio::test]
    async fn category_members_follow_continuation() {
        let server = MockServer::start().await;

        let second = serde_json::json!({
            "batchcomplete": true,
            "query": {"categorymembers": [
                {"pageid": 3, "ns": 14, "title": "Kategorie:Rente"}
            ]}
        });
        let first = serde_json::json!({
            "continue": {"cmcontinue": "page|52454e5445|3", "continue": "-||"},
            "query": {"categorymembers": [
                {"pageid": 1, "ns": 0, "title": "Altersrente"},
                {"pageid": 2, "ns": 0, "title": "Liste von Rentenarten"}
            ]}
        });

        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("cmcontinue", "page|52454e5445|3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(second))
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("list", "categorymembers"))
            .and(query_param("cmtitle", "Kategorie:Wirtschaft"))
            .respond_with(ResponseTemplate::new(200).set_body_json(first))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let members = client
            .category_members("Kategorie:Wirtschaft")
            .await
            .unwrap();

        let titles: Vec<&str> = members.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Altersrente", "Liste von Rentenarten", "Kategorie:Rente"]
        );
        assert_eq!(members[2].ns, 14);
    }

    #[tokio::test]
    async fn fetch_page_parses_extract() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "batchcomplete": true,
            "query": {"pages": [{
                "pageid": 1, "ns": 0, "title": "Altersrente",
                "extract": "Eine Rente.\n\n== Geschichte ==\nAlt.\n\n== Weblinks ==\nLink"
            }]}
        });

        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("prop", "extracts"))
            .and(query_param("titles", "Altersrente"))
            .and(query_param("explaintext", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let page = client.fetch_page("Altersrente").await.unwrap();

        assert!(page.exists);
        assert_eq!(page.summary, "Eine Rente.");
        assert_eq!(page.sections.len(), 2);
        assert_eq!(page.sections[0].title, "Geschichte");
        assert_eq!(page.sections[1].text, "Link");
    }

    #[tokio::test]
    async fn fetch_page_missing_is_not_an_error() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "query": {"pages": [{"ns": 0, "title": "Gibt es nicht", "missing": true}]}
        });

        Mock::given(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let page = client.fetch_page("Gibt es nicht").await.unwrap();

        assert!(!page.exists);
        assert!(page.summary.is_empty());
        assert!(page.sections.is_empty());
    }

    #[tokio::test]
    async fn api_error_object_is_surfaced() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "error": {"code": "invalidcategory", "info": "Invalid category name."}
        });

        Mock::given(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.category_members("Wirtschaft").await.unwrap_err();

        match err {
            WikiCorpusError::Api { code, .. } => assert_eq!(code, "invalidcategory"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_failure_is_network_error() {
        let server = MockServer::start().await;

        Mock::given(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.fetch_page("Altersrente").await.unwrap_err();
        assert!(matches!(err, WikiCorpusError::Network(_)));
    }
}
