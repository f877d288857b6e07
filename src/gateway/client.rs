use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::Client;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::api::request_body::RequestBody;
use crate::domain::overlay::{NETWORK_EXTENSION, OverlaySource};
use crate::error::{Error, Result};
use crate::gateway::archive::{Archive, PARTIAL_EXTENSION, decode_error_detail, suggested_file_name};
use crate::gateway::endpoint::SimulationEndpoint;
use crate::settings::GatewaySettings;

/// HTTP client of the generation service.
#[derive(Debug, Clone)]
pub struct SimulationGateway {
    client: Client,
    settings: GatewaySettings,
}

impl SimulationGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self> {
        // Generation plus download can outlast any fixed limit, so only the
        // connect is bounded here. Short lookups set their own timeout.
        let client = Client::builder().connect_timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    fn url(&self, endpoint: SimulationEndpoint) -> String {
        format!("{}{}", self.settings.api_base_url, endpoint.path())
    }

    /// Road network files the service can generate scenarios for.
    pub async fn list_maps(&self) -> Result<Vec<String>> {
        let url = self.url(SimulationEndpoint::Maps);
        log::debug!("Fetching map list from {}.", url);

        let maps: Vec<String> = self
            .client
            .get(&url)
            .timeout(self.settings.timeout)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let maps: Vec<String> = maps.into_iter().filter(|name| name.ends_with(NETWORK_EXTENSION)).collect();
        log::info!("Service offers {} map(s).", maps.len());
        Ok(maps)
    }

    /// Posts `body` to the endpoint of its mode and streams the returned
    /// archive into `output_dir`.
    pub async fn submit(&self, body: &RequestBody, output_dir: &Path) -> Result<Archive> {
        let endpoint = body.endpoint();
        let url = self.url(endpoint);
        log::info!("Submitting scenario '{}' to {}.", body.scenario_name(), url);

        let response = self
            .client
            .request(endpoint.method(), &url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_json_bytes()?)
            .send()
            .await
            .map_err(|e| {
                log::error!("Submission of '{}' failed: {}", body.scenario_name(), e);
                Error::Submission { status: None, detail: format!("Failed to connect to backend: {}", e) }
            })?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.bytes().await.unwrap_or_default();
            let detail = decode_error_detail(&raw);
            log::error!("Generation of '{}' rejected with status {}: {}", body.scenario_name(), status, detail);
            return Err(Error::Submission { status: Some(status.as_u16()), detail });
        }

        let content_disposition = response.headers().get(CONTENT_DISPOSITION).and_then(|value| value.to_str().ok()).map(str::to_string);
        let file_name = suggested_file_name(content_disposition.as_deref(), body.scenario_name());
        let path = output_dir.join(&file_name);

        tokio::fs::create_dir_all(output_dir).await?;
        let size = write_stream(&path, response.bytes_stream()).await?;

        log::info!("Saved archive '{}' ({} bytes).", path.display(), size);
        Ok(Archive { file_name, path, size })
    }
}

/// Sibling file the archive is streamed into before it is moved to `path`.
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    name.push(PARTIAL_EXTENSION);
    path.with_file_name(name)
}

/// Writes every chunk of `chunks` to `path`. Returns the number of bytes
/// written. Nothing is left at `path` or its partial sibling when the
/// download fails.
pub async fn write_stream<S, E>(path: &Path, chunks: S) -> Result<u64>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: std::fmt::Display,
{
    let partial = partial_path(path);

    match write_chunks(&partial, chunks).await {
        Ok(size) => {
            tokio::fs::rename(&partial, path).await?;
            Ok(size)
        }
        Err(e) => {
            if let Err(remove_error) = tokio::fs::remove_file(&partial).await {
                log::warn!("Could not remove partial download '{}': {}", partial.display(), remove_error);
            }
            Err(e)
        }
    }
}

async fn write_chunks<S, E>(path: &Path, chunks: S) -> Result<u64>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: std::fmt::Display,
{
    futures::pin_mut!(chunks);
    let mut file = tokio::fs::File::create(path).await?;
    let mut size = 0u64;

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(|e| Error::Submission { status: None, detail: format!("Archive download interrupted: {}", e) })?;
        file.write_all(&chunk).await?;
        size += chunk.len() as u64;
    }
    file.flush().await?;

    Ok(size)
}

#[async_trait]
impl OverlaySource for SimulationGateway {
    async fn fetch_overlay(&self, file_name: &str) -> Result<Option<Value>> {
        let url = format!("{}/maps/{}", self.settings.static_base_url, file_name);
        log::debug!("Fetching overlay from {}.", url);

        let response = self.client.get(&url).timeout(self.settings.timeout).send().await.map_err(|e| Error::Transport(e.to_string()))?;
        if !response.status().is_success() {
            log::debug!("Overlay '{}' not available (status {}).", file_name, response.status());
            return Ok(None);
        }

        let document = response.json::<Value>().await.map_err(|e| Error::Transport(e.to_string()))?;
        Ok(Some(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::ScenarioBuilder;
    use crate::domain::global_config::global_config::AuthoringMode;

    #[tokio::test]
    async fn stream_chunks_are_written_in_order() {
        let dir = std::env::temp_dir().join(format!("scenario_builder_stream_{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("out.zip");

        let chunks = futures::stream::iter(vec![Ok::<_, std::io::Error>(Bytes::from_static(b"PK")), Ok(Bytes::from_static(b"\x03\x04"))]);
        let size = write_stream(&path, chunks).await.unwrap();

        assert_eq!(size, 4);
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"PK\x03\x04");
        assert!(!partial_path(&path).exists());
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn failed_chunk_aborts_download() {
        let dir = std::env::temp_dir().join(format!("scenario_builder_abort_{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let path = dir.join("out.zip");

        let chunks = futures::stream::iter(vec![Ok(Bytes::from_static(b"PK")), Err("connection reset")]);
        let result = write_stream(&path, chunks).await;

        assert!(matches!(result, Err(Error::Submission { status: None, .. })));
        assert!(!path.exists());
        assert!(!partial_path(&path).exists());
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[test]
    fn partial_download_sits_next_to_archive() {
        assert_eq!(partial_path(Path::new("/tmp/out/scenario.zip")), PathBuf::from("/tmp/out/scenario.zip.part"));
    }

    #[tokio::test]
    async fn slow_archive_download_outlasts_lookup_timeout() {
        use std::time::Duration;
        use tokio::io::AsyncReadExt;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 8192];
            let _ = socket.read(&mut request).await.unwrap();
            let head = "HTTP/1.1 200 OK\r\ncontent-type: application/zip\r\ncontent-length: 4\r\n\
                        content-disposition: attachment; filename=\"slow.zip\"\r\n\r\n";
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(b"PK").await.unwrap();
            tokio::time::sleep(Duration::from_millis(400)).await;
            socket.write_all(b"\x03\x04").await.unwrap();
        });

        let settings = GatewaySettings::default().with_api_base_url(format!("http://{}", address)).with_timeout(Duration::from_millis(100));
        let gateway = SimulationGateway::new(settings).unwrap();

        let mut builder = ScenarioBuilder::new(AuthoringMode::Simplified);
        builder.select_map("grid.net.xml");
        let body = builder.assemble().unwrap().body;

        let dir = std::env::temp_dir().join(format!("scenario_builder_slow_{}", std::process::id()));
        let archive = gateway.submit(&body, &dir).await.unwrap();

        assert_eq!(archive.file_name, "slow.zip");
        assert_eq!(tokio::fs::read(&archive.path).await.unwrap(), b"PK\x03\x04");
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[test]
    fn urls_join_base_and_path() {
        let gateway = SimulationGateway::new(GatewaySettings::default().with_api_base_url("http://backend:9000/")).unwrap();
        assert_eq!(gateway.url(SimulationEndpoint::Maps), "http://backend:9000/api/maps");
        assert_eq!(gateway.url(SimulationEndpoint::GenerateExpertZip), "http://backend:9000/api/simulations/generate_expert_zip");
    }
}
