use async_trait::async_trait;
use marquee_lookup::{LookupError, MovieLookup, SEARCH_RESULT_LIMIT};
use marquee_models::{Movie, SearchCandidate, NOT_AVAILABLE};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub fn movie(imdb_id: &str, title: &str) -> Movie {
    Movie {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "2010".to_string(),
        poster: NOT_AVAILABLE.to_string(),
        plot: "Plot".to_string(),
        genre: "Drama".to_string(),
        imdb_rating: "8.0".to_string(),
        director: "Director".to_string(),
        actors: "Actor".to_string(),
        category: None,
    }
}

pub fn candidate(imdb_id: &str, title: &str) -> SearchCandidate {
    SearchCandidate {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "2010".to_string(),
        poster: NOT_AVAILABLE.to_string(),
        media_type: "movie".to_string(),
    }
}

/// Lookup backed by a fixed list of movies, counting calls
pub struct FakeLookup {
    movies: Vec<Movie>,
    /// Ids whose detail fetch fails even though search returns them
    broken_details: Vec<String>,
    searches: AtomicUsize,
    details: AtomicUsize,
}

impl FakeLookup {
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies,
            broken_details: Vec::new(),
            searches: AtomicUsize::new(0),
            details: AtomicUsize::new(0),
        }
    }

    pub fn with_broken_details(mut self, imdb_id: &str) -> Self {
        self.broken_details.push(imdb_id.to_string());
        self
    }

    pub fn search_calls(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.details.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MovieLookup for FakeLookup {
    async fn search(&self, title: &str) -> Result<Vec<SearchCandidate>, LookupError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        let needle = title.to_lowercase();
        let hits: Vec<SearchCandidate> = self
            .movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .take(SEARCH_RESULT_LIMIT)
            .map(|m| candidate(&m.imdb_id, &m.title))
            .collect();
        if hits.is_empty() {
            return Err(LookupError::NotFound("Movie not found!".to_string()));
        }
        Ok(hits)
    }

    async fn details(&self, imdb_id: &str) -> Result<Movie, LookupError> {
        self.details.fetch_add(1, Ordering::SeqCst);
        if self.broken_details.iter().any(|id| id == imdb_id) {
            return Err(LookupError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        self.movies
            .iter()
            .find(|m| m.imdb_id == imdb_id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound("Incorrect IMDb ID.".to_string()))
    }
}

/// Local HTTP endpoint answering one request with a canned response; returns its base URL
pub async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{}/", addr)
}
