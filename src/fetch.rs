use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{info, warn};

pub const IMDB_URL: &str = "https://www.imdb.com";
pub const IMDB_HOST: &str = "www.imdb.com";
const BASE_LIST_URL: &str = "https://www.imdb.com/list";

const CONCURRENCY: usize = 4;
const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 2000;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("not an IMDb url: expected host {IMDB_HOST}, got {0:?}")]
    WrongHost(Option<String>),
    #[error("upstream returned status {status}")]
    Upstream { status: u16 },
    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

pub fn client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent("Mozilla/5.0 (compatible; lister/0.1)")
        .build()?)
}

/// Canonical list URL for a list id.
pub fn list_url(id: &str) -> String {
    format!("{BASE_LIST_URL}/{id}/")
}

/// Accept only URLs pointing at the IMDb host; the source serves nothing
/// useful for anything else and free-form input is easy to get wrong.
pub fn validate_list_url(raw: &str) -> Result<String, FetchError> {
    let url = reqwest::Url::parse(raw).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    match url.host_str() {
        Some(host) if host == IMDB_HOST => Ok(url.into()),
        other => Err(FetchError::WrongHost(other.map(str::to_string))),
    }
}

/// GET one list page. The Origin header is required by the source; a
/// non-success status surfaces as `FetchError::Upstream` and the parsing
/// core is never invoked for it.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, FetchError> {
    let resp = client.get(url).header("Origin", IMDB_URL).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Upstream {
            status: status.as_u16(),
        });
    }
    Ok(resp.text().await?)
}

async fn fetch_with_retry(client: &Client, url: &str) -> Result<String, FetchError> {
    let mut attempt = 0u32;
    loop {
        match fetch_html(client, url).await {
            Err(FetchError::Upstream { status })
                if matches!(status, 429 | 500 | 502 | 503) && attempt < MAX_RETRIES =>
            {
                let backoff = Duration::from_millis(BASE_BACKOFF_MS * 2u64.pow(attempt));
                warn!(
                    "Got {} from {} (attempt {}/{}), backing off {:.1}s",
                    status,
                    url,
                    attempt + 1,
                    MAX_RETRIES,
                    backoff.as_secs_f64()
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

/// Outcome of fetching one list in a batch.
pub struct FetchedList {
    pub id: String,
    pub url: String,
    pub html: Option<String>,
    pub error: Option<String>,
}

pub struct FetchStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

/// Fetch several lists concurrently. Results come back in the order the ids
/// were given; a failed fetch carries its error instead of aborting the
/// whole batch.
pub async fn fetch_lists(ids: &[String]) -> Result<(Vec<FetchedList>, FetchStats)> {
    let client = Arc::new(client()?);
    let semaphore = Arc::new(Semaphore::new(CONCURRENCY));
    let total = ids.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let (tx, mut rx) = tokio::sync::mpsc::channel::<(usize, FetchedList)>(CONCURRENCY * 2);

    for (idx, id) in ids.iter().enumerate() {
        let id = id.clone();
        let url = list_url(&id);
        let client = Arc::clone(&client);
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();

        tokio::spawn(async move {
            let _permit = sem.acquire().await.unwrap();
            let fetched = match fetch_with_retry(&client, &url).await {
                Ok(html) => FetchedList {
                    id,
                    url,
                    html: Some(html),
                    error: None,
                },
                Err(e) => {
                    warn!("Fetch failed for {}: {}", id, e);
                    FetchedList {
                        id,
                        url,
                        html: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            let _ = tx.send((idx, fetched)).await;
        });
    }

    // Drop our copy of tx so rx closes when all spawned tasks finish
    drop(tx);

    let mut ok = 0usize;
    let mut errors = 0usize;
    let mut results: Vec<(usize, FetchedList)> = Vec::with_capacity(total);

    while let Some((idx, fetched)) = rx.recv().await {
        if fetched.error.is_some() {
            errors += 1;
        } else {
            ok += 1;
        }
        results.push((idx, fetched));
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Fetched {} lists ({} ok, {} errors)", total, ok, errors);

    // Back to the order the ids were given in
    results.sort_by_key(|(idx, _)| *idx);
    let results = results.into_iter().map(|(_, f)| f).collect();

    Ok((results, FetchStats { total, ok, errors }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_url_from_id() {
        assert_eq!(list_url("ls080427652"), "https://www.imdb.com/list/ls080427652/");
    }

    #[test]
    fn accepts_imdb_urls_only() {
        assert!(validate_list_url("https://www.imdb.com/list/ls002448041/").is_ok());
        assert!(validate_list_url(
            "https://www.imdb.com/search/title/?groups=top_250&sort=user_rating"
        )
        .is_ok());
        assert!(matches!(
            validate_list_url("https://example.com/list/ls002448041/"),
            Err(FetchError::WrongHost(Some(_)))
        ));
        assert!(matches!(
            validate_list_url("not a url"),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
