//! Search-index sink: one indexed document per message
//!
//! Messages are rendered with the JSON formatter and POSTed to
//! `<address>/<index>/_doc`. A write only succeeds when the server answers
//! with a success status and `"result": "created"`.

use crate::core::{LogLevel, LoggerError, Output, Result};
use crate::formatters;
use crate::processors::{print_only_if_not_tagged_with, print_only_if_tagged};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

/// Tag key matching every message not claimed by another tag
pub const CATCH_ALL_TAG: &str = "*";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Index name provider, evaluated on every write
pub type IndexNameFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Connection settings
#[derive(Debug, Clone)]
pub struct ElasticsearchConfig {
    /// Base URLs; writes go to the first one
    pub addresses: Vec<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            addresses: vec!["http://localhost:9200".to_string()],
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ElasticsearchConfig {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn address(&self) -> Result<String> {
        self.addresses
            .iter()
            .map(|a| a.trim().trim_end_matches('/'))
            .find(|a| !a.is_empty())
            .map(str::to_string)
            .ok_or_else(|| LoggerError::config("elasticsearch", "no address configured"))
    }

    fn client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| LoggerError::config("elasticsearch", e.to_string()))
    }
}

/// Level and index for one tag of [`elasticsearch_with_tag_map`]
#[derive(Clone)]
pub struct TagMapItem {
    pub max_level: LogLevel,
    pub index: IndexNameFn,
}

impl TagMapItem {
    pub fn new<F>(max_level: LogLevel, index: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            max_level,
            index: Arc::new(index),
        }
    }

    /// Fixed index name
    pub fn fixed(max_level: LogLevel, index: impl Into<String>) -> Self {
        let index = index.into();
        Self::new(max_level, move || index.clone())
    }
}

impl fmt::Debug for TagMapItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagMapItem")
            .field("max_level", &self.max_level)
            .field("index", &(self.index)())
            .finish()
    }
}

struct IndexWriter {
    client: Client,
    address: String,
    index: IndexNameFn,
    username: Option<String>,
    password: Option<String>,
}

impl IndexWriter {
    fn new(config: &ElasticsearchConfig, index: IndexNameFn) -> Result<Self> {
        Ok(Self {
            client: config.client()?,
            address: config.address()?,
            index,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn index_document(&self, document: &str) -> io::Result<()> {
        let url = format!("{}/{}/_doc", self.address, (self.index)());

        let mut request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(document.to_string());
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_ref());
        }

        let response = request.send().map_err(io::Error::other)?;
        let status = response.status();
        if !status.is_success() {
            return Err(io::Error::other(format!(
                "indexing into {} failed with status {}",
                url, status
            )));
        }

        let body: serde_json::Value = response.json().map_err(io::Error::other)?;
        match body.get("result").and_then(serde_json::Value::as_str) {
            Some("created") => Ok(()),
            other => Err(io::Error::other(format!(
                "indexing into {} returned result {:?}",
                url, other
            ))),
        }
    }
}

impl Write for IndexWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let document = String::from_utf8_lossy(buf);
        let document = document.trim_end_matches(['\n', '\r']);
        if !document.is_empty() {
            self.index_document(document)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn index_output(name: String, max_level: LogLevel, index: IndexNameFn, config: &ElasticsearchConfig) -> Result<Output> {
    let writer = IndexWriter::new(config, index)?;
    Ok(Output::new(name, max_level, writer).with_formatter(formatters::json()))
}

/// "ElasticSearch": every message indexed into `index`
pub fn elasticsearch(index: impl Into<String>, config: &ElasticsearchConfig, max_level: LogLevel) -> Result<Output> {
    let index = index.into();
    index_output(
        "ElasticSearch".to_string(),
        max_level,
        Arc::new(move || index.clone()),
        config,
    )
}

/// One output per tag, named `ElasticSearch-<tag>`.
///
/// A tagged output only prints messages carrying its tag. The `*` entry
/// prints messages carrying none of the other mapped tags.
pub fn elasticsearch_with_tag_map(
    tag_map: BTreeMap<String, TagMapItem>,
    config: &ElasticsearchConfig,
) -> Result<Vec<Output>> {
    let named_tags: Vec<String> = tag_map
        .keys()
        .filter(|tag| tag.as_str() != CATCH_ALL_TAG)
        .cloned()
        .collect();

    tag_map
        .into_iter()
        .map(|(tag, item)| {
            let guard = if tag == CATCH_ALL_TAG {
                print_only_if_not_tagged_with(named_tags.iter().cloned())
            } else {
                print_only_if_tagged(tag.as_str())
            };
            let output = index_output(format!("ElasticSearch-{}", tag), item.max_level, item.index, config)?;
            Ok(output.with_processors([guard]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Message, WriteOutcome};
    use std::io::{BufRead, BufReader, Read};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one request, answer with `status` and `body`, hand back the request
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
                let done = line == "\r\n";
                head.push_str(&line);
                if done {
                    break;
                }
            }
            let mut body_bytes = vec![0u8; content_length];
            reader.read_exact(&mut body_bytes).unwrap();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let mut stream = stream;
            stream.write_all(response.as_bytes()).unwrap();

            head + &String::from_utf8(body_bytes).unwrap()
        });

        (address, handle)
    }

    #[test]
    fn test_indexes_json_document() {
        let (address, server) = serve_once("201 Created", r#"{"result":"created"}"#);
        let config = ElasticsearchConfig::new([address]);
        let output = elasticsearch("logs", &config, LogLevel::Info).unwrap();

        let mut message = Message::new(LogLevel::Info, "indexed");
        assert_eq!(output.write(&mut message).unwrap(), WriteOutcome::Written);

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /logs/_doc"));
        assert!(request.contains(r#""message":"indexed""#));
    }

    #[test]
    fn test_rejects_unexpected_result() {
        let (address, server) = serve_once("200 OK", r#"{"result":"updated"}"#);
        let config = ElasticsearchConfig::new([address]);
        let output = elasticsearch("logs", &config, LogLevel::Info).unwrap();

        let mut message = Message::new(LogLevel::Info, "x");
        assert!(output.write(&mut message).is_err());
        server.join().unwrap();
    }

    #[test]
    fn test_rejects_error_status() {
        let (address, server) = serve_once("500 Internal Server Error", "{}");
        let config = ElasticsearchConfig::new([address]);
        let output = elasticsearch("logs", &config, LogLevel::Info).unwrap();

        let mut message = Message::new(LogLevel::Error, "x");
        assert!(output.write(&mut message).is_err());
        server.join().unwrap();
    }

    #[test]
    fn test_requires_an_address() {
        let config = ElasticsearchConfig::new(Vec::<String>::new());
        assert!(matches!(
            elasticsearch("logs", &config, LogLevel::Info),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_tag_map_outputs() {
        let mut tag_map = BTreeMap::new();
        tag_map.insert("audit".to_string(), TagMapItem::fixed(LogLevel::Info, "audit-logs"));
        tag_map.insert("*".to_string(), TagMapItem::new(LogLevel::Warn, || "other-logs".to_string()));

        let outputs = elasticsearch_with_tag_map(tag_map, &ElasticsearchConfig::default()).unwrap();
        let names: Vec<&str> = outputs.iter().map(Output::name).collect();
        assert_eq!(names, vec!["ElasticSearch-*", "ElasticSearch-audit"]);

        assert_eq!(outputs[0].max_level(), LogLevel::Warn);
        assert_eq!(outputs[0].processors_names(), vec!["PrintOnlyIfNotTaggedWith"]);
        assert_eq!(outputs[1].processors_names(), vec!["PrintOnlyIfTagged"]);
        assert_eq!(outputs[1].formatter().unwrap().name(), "JSON");
    }
}
