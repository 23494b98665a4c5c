use dashboard_core::{ArticleId, NewsArticle, NewsItem};
use sha2::{Digest, Sha256};

/// Content-derived identity: the first 8 bytes of SHA-256 over title, url and
/// publication time, hex encoded.
pub fn article_id(article: &NewsArticle) -> ArticleId {
    let mut hasher = Sha256::new();
    hasher.update(article.title.as_bytes());
    hasher.update([0x1f]);
    hasher.update(article.url.as_bytes());
    hasher.update([0x1f]);
    hasher.update(article.published_at.as_deref().unwrap_or("").as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(16);
    for byte in digest.iter().take(8) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    ArticleId::new(hex)
}

pub fn identify(articles: Vec<NewsArticle>) -> Vec<NewsItem> {
    articles
        .into_iter()
        .map(|article| NewsItem::new(article_id(&article), article))
        .collect()
}
