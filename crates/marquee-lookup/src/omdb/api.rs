use crate::error::LookupError;
use marquee_models::{Movie, SearchCandidate, NOT_AVAILABLE};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

/// Maximum number of candidates a title search hands back
pub const SEARCH_RESULT_LIMIT: usize = 3;

pub fn create_omdb_client() -> Client {
    Client::builder()
        .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Title search (`?s=<title>&type=movie`)
pub async fn search_movies(
    client: &Client,
    base_url: &str,
    api_key: &str,
    title: &str,
) -> Result<Vec<SearchCandidate>, LookupError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(LookupError::EmptyQuery);
    }

    debug!("Searching movie database for {:?}", title);
    let document = fetch_document(
        client,
        base_url,
        &[("s", title), ("type", "movie"), ("apikey", api_key)],
    )
    .await?;

    parse_search_response(&document)
}

/// Detail fetch by external id (`?i=<id>`)
pub async fn get_movie(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<Movie, LookupError> {
    let imdb_id = imdb_id.trim();
    if imdb_id.is_empty() {
        return Err(LookupError::Malformed("movie id is empty".to_string()));
    }

    debug!("Fetching movie details for {}", imdb_id);
    let document = fetch_document(client, base_url, &[("i", imdb_id), ("apikey", api_key)]).await?;

    parse_movie_response(&document)
}

async fn fetch_document(
    client: &Client,
    base_url: &str,
    query: &[(&str, &str)],
) -> Result<Value, LookupError> {
    let response = client
        .get(base_url)
        .query(query)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| {
            warn!("Movie database request failed: {}", e);
            LookupError::Transport(e)
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("Movie database returned {}: {}", status, body);
        return Err(LookupError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        warn!("Movie database returned a non-JSON body: {}", e);
        LookupError::Malformed(format!("response is not JSON: {}", e))
    })
}

/// Fails unless the payload carries `Response: "True"`
fn ensure_success(document: &Value, fallback: &str) -> Result<(), LookupError> {
    match document.get("Response").and_then(Value::as_str) {
        Some("True") => Ok(()),
        Some(_) => {
            let message = document
                .get("Error")
                .and_then(Value::as_str)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(fallback);
            Err(LookupError::NotFound(message.to_string()))
        }
        None => Err(LookupError::Malformed("missing Response field".to_string())),
    }
}

fn required_str(document: &Value, field: &str) -> Result<String, LookupError> {
    document
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| LookupError::Malformed(format!("missing {}", field)))
}

fn optional_str(document: &Value, field: &str) -> String {
    document
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

pub fn parse_search_response(document: &Value) -> Result<Vec<SearchCandidate>, LookupError> {
    ensure_success(document, "No movies found.")?;

    let entries = document
        .get("Search")
        .and_then(Value::as_array)
        .ok_or_else(|| LookupError::NotFound("No movies found.".to_string()))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let (imdb_id, title) = match (required_str(entry, "imdbID"), required_str(entry, "Title")) {
            (Ok(id), Ok(title)) => (id, title),
            _ => {
                debug!("Skipping search entry without imdbID/Title: {}", entry);
                continue;
            }
        };
        candidates.push(SearchCandidate {
            imdb_id,
            title,
            year: optional_str(entry, "Year"),
            poster: optional_str(entry, "Poster"),
            media_type: optional_str(entry, "Type"),
        });
        if candidates.len() == SEARCH_RESULT_LIMIT {
            break;
        }
    }

    if candidates.is_empty() {
        return Err(LookupError::NotFound(
            "No movies found. Please try a different search term.".to_string(),
        ));
    }

    Ok(candidates)
}

pub fn parse_movie_response(document: &Value) -> Result<Movie, LookupError> {
    ensure_success(document, "Movie not found!")?;

    Ok(Movie {
        imdb_id: required_str(document, "imdbID")?,
        title: required_str(document, "Title")?,
        year: optional_str(document, "Year"),
        poster: optional_str(document, "Poster"),
        plot: optional_str(document, "Plot"),
        genre: optional_str(document, "Genre"),
        imdb_rating: optional_str(document, "imdbRating"),
        director: optional_str(document, "Director"),
        actors: optional_str(document, "Actors"),
        category: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer a single request with a canned response; returns the base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut request = [0u8; 4096];
                let _ = socket.read(&mut request).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
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

    #[tokio::test]
    async fn test_error_status_is_reported_with_body() {
        let base_url = serve_once("500 Internal Server Error", "boom").await;
        let err = search_movies(&create_omdb_client(), &base_url, "key", "Inception")
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Status { status: 500, ref body } if body == "boom"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let base_url = serve_once("200 OK", "<html>down for maintenance</html>").await;
        let err = get_movie(&create_omdb_client(), &base_url, "key", "tt1375666")
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_detail_document_is_parsed_from_the_wire() {
        let base_url = serve_once(
            "200 OK",
            r#"{"Response":"True","imdbID":"tt1375666","Title":"Inception","Year":"2010"}"#,
        )
        .await;
        let movie = get_movie(&create_omdb_client(), &base_url, "key", "tt1375666")
            .await
            .unwrap();
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.plot, NOT_AVAILABLE);
    }

    fn search_entry(id: &str, title: &str) -> Value {
        json!({"imdbID": id, "Title": title, "Year": "2010", "Poster": "N/A", "Type": "movie"})
    }

    #[test]
    fn test_parse_search_single_match() {
        let document = json!({
            "Response": "True",
            "totalResults": "1",
            "Search": [search_entry("tt1375666", "Inception")]
        });
        let candidates = parse_search_response(&document).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].imdb_id, "tt1375666");
        assert_eq!(candidates[0].media_type, "movie");
    }

    #[test]
    fn test_parse_search_caps_results() {
        let document = json!({
            "Response": "True",
            "Search": [
                search_entry("tt1", "One"),
                search_entry("tt2", "Two"),
                search_entry("tt3", "Three"),
                search_entry("tt4", "Four"),
                search_entry("tt5", "Five"),
            ]
        });
        let candidates = parse_search_response(&document).unwrap();
        assert_eq!(candidates.len(), SEARCH_RESULT_LIMIT);
        assert_eq!(candidates[2].imdb_id, "tt3");
    }

    #[test]
    fn test_parse_search_skips_entries_without_id() {
        let document = json!({
            "Response": "True",
            "Search": [{"Title": "No id"}, search_entry("tt2", "Two")]
        });
        let candidates = parse_search_response(&document).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Two");
    }

    #[test]
    fn test_parse_search_false_response_carries_error() {
        let document = json!({"Response": "False", "Error": "Movie not found!"});
        match parse_search_response(&document) {
            Err(LookupError::NotFound(msg)) => assert_eq!(msg, "Movie not found!"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_key_failure_maps_to_not_found() {
        let document = json!({"Response": "False", "Error": "Invalid API key!"});
        assert!(matches!(
            parse_search_response(&document),
            Err(LookupError::NotFound(_))
        ));
    }

    #[test]
    fn test_parse_search_without_response_is_malformed() {
        let document = json!({"Search": []});
        assert!(matches!(
            parse_search_response(&document),
            Err(LookupError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_movie_fills_missing_fields() {
        let document = json!({
            "Response": "True",
            "imdbID": "tt1375666",
            "Title": "Inception",
            "Year": "2010",
            "Genre": "Action, Adventure, Sci-Fi",
            "imdbRating": "8.8",
            "Director": "Christopher Nolan"
        });
        let movie = parse_movie_response(&document).unwrap();
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.plot, NOT_AVAILABLE);
        assert_eq!(movie.actors, NOT_AVAILABLE);
        assert_eq!(movie.category, None);
    }

    #[test]
    fn test_parse_movie_requires_id() {
        let document = json!({"Response": "True", "Title": "Inception"});
        assert!(matches!(
            parse_movie_response(&document),
            Err(LookupError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_movie_false_response_without_error_message() {
        let document = json!({"Response": "False"});
        match parse_movie_response(&document) {
            Err(LookupError::NotFound(msg)) => assert_eq!(msg, "Movie not found!"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
