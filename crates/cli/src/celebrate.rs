use serde::Deserialize;
use std::time::Duration;

const CAT_API_URL: &str =
    "https://api.thecatapi.com/v1/images/search?size=small&mime_types=jpg,png,gif&order=RANDOM&limit=1";

#[derive(Debug, Deserialize)]
struct CatImage {
    url: Option<String>,
}

/// One random celebration image URL. Any failure means no image.
pub fn random_cat_url() -> Option<String> {
    match fetch() {
        Ok(url) => url,
        Err(err) => {
            tracing::debug!(error = %err, "celebration image unavailable");
            None
        }
    }
}

fn fetch() -> Result<Option<String>, reqwest::Error> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;
    let images: Vec<CatImage> = client.get(CAT_API_URL).send()?.error_for_status()?.json()?;
    Ok(first_url(images))
}

fn first_url(images: Vec<CatImage>) -> Option<String> {
    images
        .into_iter()
        .next()
        .and_then(|image| image.url)
        .filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_the_first_url() {
        let images: Vec<CatImage> = serde_json::from_str(
            r#"[{"id":"a","url":"https://cdn2.thecatapi.com/images/a.jpg","width":10},{"url":"b"}]"#,
        )
        .expect("parse");
        assert_eq!(
            first_url(images).as_deref(),
            Some("https://cdn2.thecatapi.com/images/a.jpg")
        );
    }

    #[test]
    fn empty_or_missing_urls_give_nothing() {
        assert_eq!(first_url(Vec::new()), None);
        let images: Vec<CatImage> = serde_json::from_str(r#"[{"id":"a"}]"#).expect("parse");
        assert_eq!(first_url(images), None);
    }
}
