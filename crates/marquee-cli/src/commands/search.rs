use super::tables;
use super::ui::{is_interactive, LookupSpinner};
use super::{notice, prompts, Context};
use crate::output::Output;
use color_eyre::Result;
use marquee_core::{MarqueeError, Session};
use marquee_lookup::{MovieLookup, OmdbClient};
use marquee_models::{SearchCandidate, Theme};
use serde_json::json;

pub async fn run_search(ctx: &Context, title: &str, details: bool, output: &Output) -> Result<()> {
    let session = ctx.open_session()?;
    let lookup = ctx.lookup()?;
    let theme = session.theme.get()?;

    if !details {
        let Some(candidates) = stage(&session, &lookup, title, output).await? else {
            return Ok(());
        };
        output.println(tables::candidates_table(theme, &candidates).to_string());
        output.data(&candidates);
        return Ok(());
    }

    let spinner = LookupSpinner::start(format!("Searching for \"{}\"...", title.trim()));
    let result = session.catalog.search_with_details(&lookup, title).await;
    spinner.finish();
    let Some(movies) = notice(output, result)? else {
        return Ok(());
    };
    for movie in &movies {
        output.println(tables::movie_card(theme, movie).to_string());
    }
    output.data(&movies);
    Ok(())
}

pub async fn run_movie(ctx: &Context, imdb_id: &str, output: &Output) -> Result<()> {
    let session = ctx.open_session()?;
    let lookup = ctx.lookup()?;
    let theme = session.theme.get()?;

    let spinner = LookupSpinner::start(format!("Loading {}...", imdb_id));
    let result = lookup.details(imdb_id).await.map_err(MarqueeError::from);
    spinner.finish();
    let Some(mut movie) = notice(output, result)? else {
        return Ok(());
    };
    if let Some(stored) = session.catalog.get(imdb_id) {
        movie.category = stored.category.clone();
    }

    let reviews = session.reviews.for_movie(imdb_id);
    output.println(tables::movie_card(theme, &movie).to_string());
    if reviews.is_empty() {
        output.info("No reviews yet.");
    } else {
        output.println(tables::reviews_table(theme, &reviews).to_string());
    }
    output.data(&json!({ "movie": movie, "reviews": reviews }));
    Ok(())
}

/// Run a title search behind a spinner. Notices end with `None`.
pub async fn stage(
    session: &Session,
    lookup: &OmdbClient,
    title: &str,
    output: &Output,
) -> Result<Option<Vec<SearchCandidate>>> {
    let spinner = LookupSpinner::start(format!("Searching for \"{}\"...", title.trim()));
    let result = session.catalog.search_and_stage(lookup, title).await;
    spinner.finish();
    notice(output, result)
}

/// Choose one staged candidate: the only one, the `--pick` index, or an interactive choice.
pub fn pick_candidate(
    theme: Theme,
    candidates: &[SearchCandidate],
    pick: Option<usize>,
    output: &Output,
) -> Result<Option<SearchCandidate>> {
    if let Some(n) = pick {
        if n == 0 || n > candidates.len() {
            output.error(format!("--pick must be between 1 and {}", candidates.len()));
            return Ok(None);
        }
        return Ok(Some(candidates[n - 1].clone()));
    }

    if let [only] = candidates {
        return Ok(Some(only.clone()));
    }

    if !is_interactive() {
        output.println(tables::candidates_table(theme, candidates).to_string());
        output.error("Several movies match. Rerun with --pick N to choose one.");
        return Ok(None);
    }

    let labels: Vec<String> = candidates
        .iter()
        .map(|c| format!("{} ({}) [{}]", c.title, c.year, c.imdb_id))
        .collect();
    let index = prompts::prompt_select("Which movie?", &labels)?;
    Ok(candidates.get(index).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    fn candidates() -> Vec<SearchCandidate> {
        ["tt1", "tt2"]
            .iter()
            .map(|id| SearchCandidate {
                imdb_id: id.to_string(),
                title: format!("Movie {}", id),
                year: "2010".to_string(),
                poster: "N/A".to_string(),
                media_type: "movie".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_pick_by_index() {
        let output = Output::new(OutputFormat::Json, true);
        let picked = pick_candidate(Theme::Dark, &candidates(), Some(2), &output).unwrap();
        assert_eq!(picked.unwrap().imdb_id, "tt2");
    }

    #[test]
    fn test_pick_out_of_range_is_a_notice() {
        let output = Output::new(OutputFormat::Json, true);
        assert!(pick_candidate(Theme::Dark, &candidates(), Some(3), &output)
            .unwrap()
            .is_none());
        assert!(pick_candidate(Theme::Dark, &candidates(), Some(0), &output)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_single_candidate_needs_no_pick() {
        let output = Output::new(OutputFormat::Json, true);
        let all = candidates();
        let picked = pick_candidate(Theme::Dark, &all[..1], None, &output).unwrap();
        assert_eq!(picked.unwrap().imdb_id, "tt1");
    }
}
