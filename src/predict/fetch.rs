use std::path::{Path, PathBuf};

use crate::predict::error::PredictError;

/// Download every TLE list in `urls` into `tle_dir`, one file per URL named
/// after the last path segment. Returns the files written; fails only when
/// no URL could be fetched.
pub async fn fetch_tle_files(urls: &[String], tle_dir: &Path) -> Result<Vec<PathBuf>, PredictError> {
    tokio::fs::create_dir_all(tle_dir).await?;

    let client = reqwest::Client::new();
    let mut written = Vec::new();
    let mut last_error = None;

    for url in urls {
        match fetch_one(&client, url, tle_dir).await {
            Ok(path) => {
                log::info!("Fetched {} into {}", url, path.display());
                written.push(path);
            }
            Err(e) => {
                log::warn!("{}", e);
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if written.is_empty() => Err(e),
        _ => Ok(written),
    }
}

async fn fetch_one(
    client: &reqwest::Client,
    url: &str,
    tle_dir: &Path,
) -> Result<PathBuf, PredictError> {
    let fetch_error = |message: String| PredictError::Fetch {
        url: url.to_string(),
        message,
    };

    let body = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| fetch_error(e.to_string()))?
        .text()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    let path = tle_dir.join(file_name_for(url));
    tokio::fs::write(&path, body).await?;
    Ok(path)
}

/// `http://celestrak.com/NORAD/elements/amateur.txt` -> `amateur.txt`,
/// `.../gp.php?GROUP=cubesat&FORMAT=tle` -> `cubesat.tle`
fn file_name_for(url: &str) -> String {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or("");

    let has_tle_extension = Path::new(segment)
        .extension()
        .is_some_and(|ext| ext == "tle" || ext == "txt");
    if has_tle_extension {
        return segment.to_string();
    }

    let group = query
        .split('&')
        .find_map(|kv| kv.strip_prefix("GROUP="))
        .filter(|g| !g.is_empty());
    match group {
        Some(group) => format!("{group}.tle"),
        None if segment.is_empty() || segment.contains(':') => "download.tle".to_string(),
        None => format!("{segment}.tle"),
    }
}
