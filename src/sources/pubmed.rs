//! PubMed source implementation using the E-utilities JSON API.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::classify::{company_affiliations, non_academic_authors};
use crate::config::PubMedConfig;
use crate::models::{AuthorEntry, PaperRecord, SearchQuery, NOT_AVAILABLE};
use crate::sources::SourceError;
use crate::utils::HttpClient;

/// PubMed E-utilities API base URLs
pub const PUBMED_ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
pub const PUBMED_ESUMMARY_URL: &str =
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi";

// Absent and null keys both mean "no identifiers"
#[derive(Debug, Default, Deserialize)]
struct ESearchResponse {
    #[serde(default)]
    esearchresult: Option<ESearchResult>,
}

#[derive(Debug, Default, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    idlist: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct ESummaryResponse {
    // Keyed by PMID, plus a "uids" array
    #[serde(default)]
    result: Map<String, Value>,
}

/// PubMed research source
///
/// Issues one esearch request and, when it yields identifiers, one batched
/// esummary request. Requests are never retried.
#[derive(Debug, Clone)]
pub struct PubMedSource {
    client: Arc<HttpClient>,
    esearch_url: String,
    esummary_url: String,
}

impl PubMedSource {
    /// Create a new PubMed source against the public NCBI endpoints
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self::with_client(Arc::new(HttpClient::new()?)))
    }

    /// Create with a custom HTTP client
    pub fn with_client(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            esearch_url: PUBMED_ESEARCH_URL.to_string(),
            esummary_url: PUBMED_ESUMMARY_URL.to_string(),
        }
    }

    /// Create from configuration (endpoint overrides and user agent)
    pub fn from_config(config: &PubMedConfig) -> Result<Self, SourceError> {
        let client = match &config.user_agent {
            Some(agent) => HttpClient::with_user_agent(agent)?,
            None => HttpClient::new()?,
        };
        Ok(Self::with_client(Arc::new(client))
            .endpoints(config.esearch_url.clone(), config.esummary_url.clone()))
    }

    /// Point the source at different esearch/esummary URLs (mirrors, tests)
    pub fn endpoints(
        mut self,
        esearch_url: impl Into<String>,
        esummary_url: impl Into<String>,
    ) -> Self {
        self.esearch_url = esearch_url.into();
        self.esummary_url = esummary_url.into();
        self
    }

    /// Build esearch URL
    fn build_search_url(&self, query: &SearchQuery) -> String {
        let params = [
            ("db", "pubmed".to_string()),
            ("term", query.query.clone()),
            ("retmode", "json".to_string()),
            ("retmax", query.max_results.to_string()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.esearch_url, query_string)
    }

    /// Build esummary URL for a batch of PubMed IDs
    fn build_summary_url(&self, ids: &[String]) -> String {
        format!(
            "{}?db=pubmed&id={}&retmode=json",
            self.esummary_url,
            ids.join(",")
        )
    }

    /// Parse an esearch JSON body into the identifier list
    fn parse_search_response(json: &str) -> Result<Vec<String>, SourceError> {
        let response: ESearchResponse = serde_json::from_str(json)
            .map_err(|e| SourceError::Parse(format!("Failed to parse PubMed search JSON: {}", e)))?;

        Ok(response
            .esearchresult
            .and_then(|result| result.idlist)
            .unwrap_or_default())
    }

    /// Parse an esummary JSON body into one record per requested identifier
    fn parse_summary_response(json: &str, ids: &[String]) -> Result<Vec<PaperRecord>, SourceError> {
        let response: ESummaryResponse = serde_json::from_str(json).map_err(|e| {
            SourceError::Parse(format!("Failed to parse PubMed summary JSON: {}", e))
        })?;

        let papers = ids
            .iter()
            .map(|id| {
                let doc = response.result.get(id).and_then(Value::as_object);
                if doc.is_none() {
                    tracing::debug!(pmid = %id, "PubMed summary missing document");
                }
                Self::build_record(id, doc)
            })
            .collect();

        Ok(papers)
    }

    fn build_record(id: &str, doc: Option<&Map<String, Value>>) -> PaperRecord {
        let field = |key: &str| {
            doc.and_then(|d| d.get(key))
                .and_then(Value::as_str)
                .unwrap_or(NOT_AVAILABLE)
                .to_string()
        };

        let authors = AuthorEntry::list_from_value(doc.and_then(|d| d.get("authors")));

        PaperRecord::new(id)
            .title(field("title"))
            .publication_date(field("pubdate"))
            .non_academic_authors(non_academic_authors(&authors))
            .company_affiliations(company_affiliations(&authors))
    }

    async fn get_text(&self, url: &str, action: &str) -> Result<String, SourceError> {
        tracing::debug!(%url, "PubMed request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to {}: {}", action, e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "PubMed API returned status: {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))
    }

    /// Search PubMed and return matching identifiers in response order
    pub async fn search_ids(&self, query: &SearchQuery) -> Result<Vec<String>, SourceError> {
        let url = self.build_search_url(query);
        let json = self.get_text(&url, "search PubMed").await?;
        let ids = Self::parse_search_response(&json)?;

        tracing::debug!(query = %query.query, count = ids.len(), "PubMed search complete");
        Ok(ids)
    }

    /// Fetch summaries for `ids` and classify their authors
    ///
    /// Always returns exactly one record per identifier, in the given order.
    /// An empty slice returns an empty list without touching the network.
    pub async fn fetch_details(&self, ids: &[String]) -> Result<Vec<PaperRecord>, SourceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.build_summary_url(ids);
        let json = self.get_text(&url, "fetch PubMed details").await?;
        let papers = Self::parse_summary_response(&json, ids)?;

        tracing::debug!(count = papers.len(), "PubMed summaries parsed");
        Ok(papers)
    }

    /// Run the full search → details pipeline
    ///
    /// When the search yields nothing the summary endpoint is not called.
    pub async fn fetch_papers(&self, query: &SearchQuery) -> Result<Vec<PaperRecord>, SourceError> {
        let ids = self.search_ids(query).await?;

        if ids.is_empty() {
            tracing::debug!(query = %query.query, "No papers found");
            return Ok(Vec::new());
        }

        let papers = self.fetch_details(&ids).await?;
        tracing::debug!(
            count = papers.len(),
            with_company = papers.iter().filter(|p| p.has_company_affiliation()).count(),
            "Fetched PubMed papers"
        );
        Ok(papers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_search_url() {
        let source = PubMedSource::new().unwrap();
        let query = SearchQuery::new("machine learning").max_results(10);
        let url = source.build_search_url(&query);

        assert!(url.starts_with(PUBMED_ESEARCH_URL));
        assert!(url.contains("db=pubmed"));
        assert!(url.contains("term=machine%20learning"));
        assert!(url.contains("retmode=json"));
        assert!(url.contains("retmax=10"));
    }

    #[test]
    fn test_build_search_url_encodes_query_syntax() {
        let source = PubMedSource::new().unwrap();
        let query = SearchQuery::new("cancer[Title] AND pharma&co");
        let url = source.build_search_url(&query);

        assert!(url.contains("term=cancer%5BTitle%5D%20AND%20pharma%26co"));
    }

    #[test]
    fn test_build_summary_url() {
        let source = PubMedSource::new().unwrap();
        let url = source.build_summary_url(&ids(&["1", "22", "333"]));

        assert_eq!(
            url,
            format!("{}?db=pubmed&id=1,22,333&retmode=json", PUBMED_ESUMMARY_URL)
        );
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{"header":{},"esearchresult":{"count":"2","idlist":["39","38"]}}"#;
        assert_eq!(
            PubMedSource::parse_search_response(json).unwrap(),
            ids(&["39", "38"])
        );
    }

    #[test]
    fn test_parse_search_response_missing_keys() {
        assert!(PubMedSource::parse_search_response("{}").unwrap().is_empty());
        assert!(PubMedSource::parse_search_response(r#"{"esearchresult":{}}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_parse_search_response_null_keys() {
        let null_idlist = r#"{"esearchresult":{"count":"0","idlist":null}}"#;
        assert!(PubMedSource::parse_search_response(null_idlist)
            .unwrap()
            .is_empty());
        assert!(PubMedSource::parse_search_response(r#"{"esearchresult":null}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_parse_search_response_not_json() {
        let err = PubMedSource::parse_search_response("<html>").unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_parse_summary_response() {
        let json = r#"{
            "result": {
                "uids": ["1", "2"],
                "1": {
                    "uid": "1",
                    "title": "Kinase inhibitors",
                    "pubdate": "2024 Feb",
                    "authors": [
                        {"name": "A", "affiliation": "Acme Pharma Inc"},
                        {"name": "B", "affiliation": "MIT Lab"},
                        "garbage"
                    ]
                },
                "2": {"uid": "2", "title": "Untitled", "authors": [{"name": "C"}]}
            }
        }"#;

        let papers = PubMedSource::parse_summary_response(json, &ids(&["1", "2"])).unwrap();
        assert_eq!(papers.len(), 2);

        assert_eq!(papers[0].pubmed_id, "1");
        assert_eq!(papers[0].title, "Kinase inhibitors");
        assert_eq!(papers[0].publication_date, "2024 Feb");
        assert_eq!(papers[0].non_academic_authors, "A");
        assert_eq!(papers[0].company_affiliations, "Acme Pharma Inc");

        assert_eq!(papers[1].publication_date, NOT_AVAILABLE);
        assert_eq!(papers[1].non_academic_authors, "");
        assert_eq!(papers[1].company_affiliations, "");
    }

    #[test]
    fn test_parse_summary_response_keeps_order_and_missing_ids() {
        let json = r#"{"result": {"b": {"title": "B"}, "a": {"title": "A"}}}"#;
        let papers = PubMedSource::parse_summary_response(json, &ids(&["a", "x", "b"])).unwrap();

        let order: Vec<_> = papers.iter().map(|p| p.pubmed_id.as_str()).collect();
        assert_eq!(order, ["a", "x", "b"]);
        assert_eq!(papers[0].title, "A");
        assert_eq!(papers[1].title, NOT_AVAILABLE);
        assert_eq!(papers[1].publication_date, NOT_AVAILABLE);
        assert_eq!(papers[2].title, "B");
    }

    #[test]
    fn test_parse_summary_response_without_result() {
        let papers = PubMedSource::parse_summary_response("{}", &ids(&["7"])).unwrap();
        assert_eq!(papers, vec![PaperRecord::new("7")]);
    }

    #[test]
    fn test_parse_summary_response_odd_shapes() {
        let json = r#"{"result": {"1": "not an object", "2": {"title": 5, "authors": "x"}}}"#;
        let papers = PubMedSource::parse_summary_response(json, &ids(&["1", "2"])).unwrap();

        assert_eq!(papers[0], PaperRecord::new("1"));
        assert_eq!(papers[1], PaperRecord::new("2"));
    }

    #[test]
    fn test_parse_summary_response_keeps_empty_title() {
        let json = r#"{"result": {"1": {"title": ""}}}"#;
        let papers = PubMedSource::parse_summary_response(json, &ids(&["1"])).unwrap();
        assert_eq!(papers[0].title, "");
    }

    #[test]
    fn test_email_always_unavailable() {
        let json = r#"{"result": {"1": {"title": "T", "email": "x@example.com"}}}"#;
        let papers = PubMedSource::parse_summary_response(json, &ids(&["1"])).unwrap();
        assert_eq!(papers[0].corresponding_author_email, NOT_AVAILABLE);
    }

    fn mock_source(server: &mockito::ServerGuard) -> PubMedSource {
        PubMedSource::new().unwrap().endpoints(
            format!("{}/esearch.fcgi", server.url()),
            format!("{}/esummary.fcgi", server.url()),
        )
    }

    #[tokio::test]
    async fn test_search_ids_sends_expected_params() {
        let mut server = mockito::Server::new_async().await;
        let search = server
            .mock("GET", "/esearch.fcgi")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("db".into(), "pubmed".into()),
                Matcher::UrlEncoded("term".into(), "gene therapy".into()),
                Matcher::UrlEncoded("retmode".into(), "json".into()),
                Matcher::UrlEncoded("retmax".into(), "3".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(r#"{"esearchresult":{"idlist":["3","1","2"]}}"#)
            .expect(1)
            .create_async()
            .await;

        let source = mock_source(&server);
        let found = source
            .search_ids(&SearchQuery::new("gene therapy").max_results(3))
            .await
            .unwrap();

        assert_eq!(found, ids(&["3", "1", "2"]));
        search.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_ids_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _search = server
            .mock("GET", "/esearch.fcgi")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let err = mock_source(&server)
            .search_ids(&SearchQuery::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Api(_)));
    }

    #[tokio::test]
    async fn test_fetch_details_batches_ids() {
        let mut server = mockito::Server::new_async().await;
        let summary = server
            .mock("GET", "/esummary.fcgi")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("db".into(), "pubmed".into()),
                Matcher::UrlEncoded("id".into(), "10,20".into()),
                Matcher::UrlEncoded("retmode".into(), "json".into()),
            ]))
            .with_body(r#"{"result":{"20":{"title":"Twenty"}}}"#)
            .expect(1)
            .create_async()
            .await;

        let papers = mock_source(&server)
            .fetch_details(&ids(&["10", "20"]))
            .await
            .unwrap();

        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].title, NOT_AVAILABLE);
        assert_eq!(papers[1].title, "Twenty");
        summary.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_details_empty_ids_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let summary = server
            .mock("GET", "/esummary.fcgi")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let papers = mock_source(&server).fetch_details(&[]).await.unwrap();
        assert!(papers.is_empty());
        summary.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_papers_short_circuits_on_empty_search() {
        let mut server = mockito::Server::new_async().await;
        let search = server
            .mock("GET", "/esearch.fcgi")
            .match_query(Matcher::Any)
            .with_body(r#"{"esearchresult":{"count":"0","idlist":[]}}"#)
            .expect(1)
            .create_async()
            .await;
        let summary = server
            .mock("GET", "/esummary.fcgi")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let papers = mock_source(&server)
            .fetch_papers(&SearchQuery::new("nothing matches this"))
            .await
            .unwrap();

        assert!(papers.is_empty());
        search.assert_async().await;
        summary.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_papers_empty_search_is_quiet_at_info_level() {
        use crate::utils::log_capture::LogCapture;

        let mut server = mockito::Server::new_async().await;
        let _search = server
            .mock("GET", "/esearch.fcgi")
            .match_query(Matcher::Any)
            .with_body(r#"{"esearchresult":{"idlist":[]}}"#)
            .create_async()
            .await;

        let capture = LogCapture::default();
        let _default = tracing::subscriber::set_default(capture.subscriber());
        tracing::info!("capture active");

        let papers = mock_source(&server)
            .fetch_papers(&SearchQuery::new("nothing"))
            .await
            .unwrap();

        assert!(papers.is_empty());
        let logs = capture.contents();
        assert!(logs.contains("capture active"));
        assert!(!logs.contains("No papers found"));
    }

    #[tokio::test]
    async fn test_fetch_papers_summary_not_json() {
        let mut server = mockito::Server::new_async().await;
        let _search = server
            .mock("GET", "/esearch.fcgi")
            .match_query(Matcher::Any)
            .with_body(r#"{"esearchresult":{"idlist":["1"]}}"#)
            .create_async()
            .await;
        let _summary = server
            .mock("GET", "/esummary.fcgi")
            .match_query(Matcher::Any)
            .with_body("<eSummaryResult><ERROR>bad</ERROR></eSummaryResult>")
            .create_async()
            .await;

        let err = mock_source(&server)
            .fetch_papers(&SearchQuery::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }
}
