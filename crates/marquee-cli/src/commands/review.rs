use super::search::{pick_candidate, stage};
use super::ui::is_interactive;
use super::{notice, prompts, tables, Context};
use crate::output::Output;
use crate::ReviewCommands;
use color_eyre::Result;
use marquee_core::{ReviewDraft, Session};
use marquee_models::{Recommend, Review};

pub async fn run_review(ctx: &Context, cmd: ReviewCommands, output: &Output) -> Result<()> {
    let mut session = ctx.open_session()?;
    match cmd {
        ReviewCommands::Add {
            movie_id,
            name,
            rating,
            comment,
            recommend,
        } => {
            let movie_id = match movie_id {
                Some(id) => id,
                None => match select_movie(ctx, &session, output).await? {
                    Some(id) => id,
                    None => return Ok(()),
                },
            };
            let form = ReviewForm {
                name,
                rating,
                comment,
                recommend,
            };
            let Some(draft) = form.into_draft(movie_id, output)? else {
                return Ok(());
            };
            if let Some(review) = notice(output, session.reviews.submit(draft))? {
                output.success(format!(
                    "Review saved for {} ({})",
                    review.movie_id,
                    tables::stars(review.rating)
                ));
                output.data(review);
            }
            Ok(())
        }
        ReviewCommands::List { movie } => {
            let reviews: Vec<&Review> = match &movie {
                Some(id) => session.reviews.for_movie(id),
                None => session.reviews.reviews().iter().collect(),
            };
            list_reviews(&session, &reviews, output)
        }
        ReviewCommands::Delete { id } => delete_review(&mut session, &id, output),
        ReviewCommands::Clear { yes } => clear_reviews(&mut session, yes, output),
    }
}

pub fn list_reviews(session: &Session, reviews: &[&Review], output: &Output) -> Result<()> {
    if reviews.is_empty() {
        output.info("No reviews yet.");
    } else {
        let theme = session.theme.get()?;
        output.println(tables::reviews_table(theme, reviews).to_string());
    }
    output.data(reviews);
    Ok(())
}

pub fn delete_review(session: &mut Session, id: &str, output: &Output) -> Result<()> {
    match notice(output, session.reviews.delete(id))? {
        Some(Some(removed)) => output.success(format!("Deleted review {} by {}", removed.id, removed.name)),
        Some(None) => output.warn(format!("No review with id {}", id)),
        None => {}
    }
    Ok(())
}

pub fn clear_reviews(session: &mut Session, yes: bool, output: &Output) -> Result<()> {
    if session.reviews.is_empty() {
        output.info("There are no reviews to delete.");
        return Ok(());
    }
    let prompt = format!("Delete all {} reviews? This cannot be undone.", session.reviews.len());
    if !confirm(&prompt, yes, output)? {
        return Ok(());
    }
    if let Some(removed) = notice(output, session.reviews.clear_all())? {
        output.success(format!("Deleted {} reviews", removed));
    }
    Ok(())
}

/// `--yes` skips the prompt; without a terminal the action is refused
pub fn confirm(prompt: &str, yes: bool, output: &Output) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !is_interactive() {
        output.error("Refusing to continue without confirmation. Pass --yes to confirm.");
        return Ok(false);
    }
    let confirmed = prompts::prompt_yes_no(prompt, false)?;
    if !confirmed {
        output.info("Cancelled.");
    }
    Ok(confirmed)
}

async fn select_movie(ctx: &Context, session: &Session, output: &Output) -> Result<Option<String>> {
    if !is_interactive() {
        output.error("Select a movie first: pass its IMDb id");
        return Ok(None);
    }
    let lookup = ctx.lookup()?;
    let title = prompts::prompt_string("Movie title", None)?;
    let Some(candidates) = stage(session, &lookup, &title, output).await? else {
        return Ok(None);
    };
    let theme = session.theme.get()?;
    Ok(pick_candidate(theme, &candidates, None, output)?.map(|c| c.imdb_id))
}

/// Review fields given on the command line; missing ones are prompted for
struct ReviewForm {
    name: Option<String>,
    rating: Option<i64>,
    comment: Option<String>,
    recommend: Option<String>,
}

impl ReviewForm {
    fn into_draft(self, movie_id: String, output: &Output) -> Result<Option<ReviewDraft>> {
        let recommend = match self.recommend.as_deref().map(str::parse::<Recommend>) {
            Some(Ok(r)) => Some(r),
            Some(Err(e)) => {
                output.error(e);
                return Ok(None);
            }
            None => None,
        };

        let complete = self.name.is_some() && self.rating.is_some() && self.comment.is_some();
        if !complete && !is_interactive() {
            return Ok(Some(ReviewDraft {
                movie_id,
                name: self.name.unwrap_or_default(),
                rating: self.rating.unwrap_or_default(),
                comment: self.comment.unwrap_or_default(),
                recommend,
            }));
        }

        let name = match self.name {
            Some(name) => name,
            None => prompts::prompt_string("Your name", None)?,
        };
        let rating = match self.rating {
            Some(rating) => rating,
            None => prompts::prompt_number("Rating (1-5)")?,
        };
        let comment = match self.comment {
            Some(comment) => comment,
            None => prompts::prompt_string("Your review", None)?,
        };
        let recommend = match (recommend, complete) {
            (Some(r), _) => Some(r),
            (None, true) => None,
            (None, false) => Some(if prompts::prompt_yes_no("Would you recommend it?", true)? {
                Recommend::Yes
            } else {
                Recommend::No
            }),
        };

        Ok(Some(ReviewDraft {
            movie_id,
            name,
            rating,
            comment,
            recommend,
        }))
    }
}
