use anyhow::{Context, Result, ensure};
use reqwest::{Client, Url};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::{Go2rtcConfig, Init7Config, StreamConfig},
    playlist::{self, StreamEntry},
};

/// Fetches a remote playlist document
///
/// # Errors
/// Errors on network failure, a non-success status or an undecodable body
#[instrument(skip(client))]
pub async fn fetch_remote(client: &Client, url: &str) -> Result<String> {
    let res = client
        .get(url)
        .send()
        .await
        .context("Fetching remote playlist")?;

    ensure!(
        res.status().is_success(),
        "Remote playlist request failed with status {}",
        res.status()
    );

    res.text().await.context("Decoding remote playlist")
}

/// Loads the Init7 channel list
///
/// A disabled source or a missing URL yields no entries.
///
/// # Errors
/// Errors when the enabled source can't be fetched
#[instrument(skip_all)]
pub async fn collect_remote_entries(
    client: &Client,
    init7: &Init7Config,
) -> Result<Vec<StreamEntry>> {
    if !init7.enabled {
        info!("Init7 streams disabled");
        return Ok(Vec::new());
    }

    let Some(url) = init7.url.as_deref().filter(|u| !u.is_empty()) else {
        warn!("Init7 is enabled but no URL is configured");
        return Ok(Vec::new());
    };

    info!("Loading Init7 streams from {url}");
    let content = fetch_remote(client, url)
        .await
        .with_context(|| format!("Loading Init7 streams from {url}"))?;

    let entries = playlist::parse(&content);
    info!("Loaded {} Init7 streams", entries.len());

    Ok(entries)
}

/// Turns the configured go2rtc streams into entries, skipping the ones without URL
#[must_use]
pub fn collect_local_entries(go2rtc: &Go2rtcConfig) -> Vec<StreamEntry> {
    if !go2rtc.enabled {
        info!("go2rtc streams disabled");
        return Vec::new();
    }

    if go2rtc.streams.is_empty() {
        info!("No go2rtc streams configured");
        return Vec::new();
    }

    let base_url = match Url::parse(&go2rtc.base_url) {
        Ok(u) => Some(u),
        Err(e) => {
            warn!("Invalid go2rtc base_url {:?}: {e}", go2rtc.base_url);
            None
        }
    };

    let entries = go2rtc
        .streams
        .iter()
        .filter_map(|stream| local_entry(stream, base_url.as_ref()))
        .collect::<Vec<_>>();

    info!("Added {} go2rtc streams", entries.len());
    entries
}

fn local_entry(stream: &StreamConfig, base_url: Option<&Url>) -> Option<StreamEntry> {
    let Some(entry) = StreamEntry::new(&stream.name, resolve_url(&stream.url, base_url)) else {
        debug!("Skipping go2rtc stream {:?} without URL", stream.name);
        return None;
    };

    Some(
        entry
            .with_tvg_logo(&stream.logo)
            .with_group_title(&stream.group),
    )
}

/// Absolute URLs pass through untouched, anything else is joined onto `base_url`
fn resolve_url(url: &str, base_url: Option<&Url>) -> String {
    if url.is_empty() || Url::parse(url).is_ok() {
        return url.to_string();
    }

    match base_url.map(|b| b.join(url)) {
        Some(Ok(joined)) => joined.to_string(),
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;

    fn stream(name: &str, url: &str) -> StreamConfig {
        StreamConfig {
            name: name.to_string(),
            url: url.to_string(),
            ..StreamConfig::default()
        }
    }

    fn go2rtc(streams: Vec<StreamConfig>) -> Go2rtcConfig {
        Go2rtcConfig {
            enabled: true,
            streams,
            ..Go2rtcConfig::default()
        }
    }

    /// Serves `body` with `status` to a single HTTP request
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await.unwrap();
            let res = format!(
                "HTTP/1.1 {status}\r\nContent-Type: audio/x-mpegurl\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(res.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}/tvchannels.m3u")
    }

    #[test]
    fn local_entries_map_stream_fields() {
        let mut door = stream("Front door", "rtsp://cam/door");
        door.logo = "http://nas/door.png".to_string();
        door.group = "Cameras".to_string();

        let entries = collect_local_entries(&go2rtc(vec![door, stream("Garden", "rtsp://cam/garden")]));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name(), "Front door");
        assert_eq!(entries[0].url(), "rtsp://cam/door");
        assert_eq!(entries[0].tvg_logo(), "http://nas/door.png");
        assert_eq!(entries[0].group_title(), "Cameras");
        assert_eq!(entries[0].tvg_id(), "");
        assert_eq!(entries[1].group_title(), "go2rtc");
    }

    #[test]
    fn local_entries_skip_streams_without_url() {
        let entries = collect_local_entries(&go2rtc(vec![
            stream("Broken", ""),
            stream("Working", "rtsp://cam/1"),
        ]));

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "Working");
    }

    #[test]
    fn local_relative_urls_use_base_url() {
        let mut config = go2rtc(vec![stream("Door", "/api/stream.m3u8?src=door")]);
        config.base_url = "http://nas.local:1984".to_string();

        let entries = collect_local_entries(&config);
        assert_eq!(
            entries[0].url(),
            "http://nas.local:1984/api/stream.m3u8?src=door"
        );
    }

    #[test]
    fn disabled_local_source_is_empty() {
        let mut config = go2rtc(vec![stream("Door", "rtsp://cam/door")]);
        config.enabled = false;

        assert!(collect_local_entries(&config).is_empty());
    }

    #[tokio::test]
    async fn disabled_remote_source_is_empty() {
        let client = Client::new();
        let init7 = Init7Config {
            enabled: false,
            url: Some("http://unreachable.invalid/list.m3u".to_string()),
        };

        assert!(collect_remote_entries(&client, &init7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remote_source_without_url_is_empty() {
        let client = Client::new();
        let init7 = Init7Config {
            enabled: true,
            url: None,
        };

        assert!(collect_remote_entries(&client, &init7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remote_entries_are_fetched_and_parsed() {
        let url = serve_once(
            "200 OK",
            "#EXTM3U\n#EXTINF:-1 tvg-id=\"srf1.ch\" group-title=\"CH\",SRF 1\nhttp://example.com/srf1\n",
        )
        .await;
        let init7 = Init7Config {
            enabled: true,
            url: Some(url),
        };

        let entries = collect_remote_entries(&Client::new(), &init7).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "SRF 1");
        assert_eq!(entries[0].tvg_id(), "srf1.ch");
        assert_eq!(entries[0].group_title(), "CH");
    }

    #[tokio::test]
    async fn remote_error_status_is_propagated() {
        let url = serve_once("404 Not Found", "").await;

        let err = fetch_remote(&Client::new(), &url).await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }
}
