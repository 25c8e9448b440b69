use super::review::{clear_reviews, confirm, delete_review, list_reviews};
use super::search::{pick_candidate, stage};
use super::ui::LookupSpinner;
use super::{notice, prompts, require_admin, tables, Context};
use crate::output::Output;
use crate::{AdminCommands, AdminMovieCommands, AdminReviewCommands};
use color_eyre::Result;
use comfy_table::Cell;
use marquee_core::{AdminState, MovieFilter, Session};
use marquee_models::Movie;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_admin(ctx: &Context, cmd: AdminCommands, output: &Output) -> Result<()> {
    let mut session = ctx.open_session()?;
    match cmd {
        AdminCommands::Login { password } => login(&session, password, output),
        AdminCommands::Logout => {
            if notice(output, session.admin.logout())?.is_some() {
                output.success("Logged out of the admin area");
            }
            Ok(())
        }
        AdminCommands::Status => {
            let state = session.admin.state()?;
            let label = match state {
                AdminState::LoggedIn => "logged in",
                AdminState::LoggedOut => "logged out",
            };
            output.info(format!("Admin: {}", label));
            output.data(&json!({ "authenticated": state == AdminState::LoggedIn }));
            Ok(())
        }
        AdminCommands::Dashboard => {
            if !require_admin(&session, output)? {
                return Ok(());
            }
            dashboard(&session, output)
        }
        AdminCommands::Categories => {
            if !require_admin(&session, output)? {
                return Ok(());
            }
            let categories = session.categories();
            for category in &categories {
                let filter = MovieFilter::Category(category.clone());
                let count = session
                    .catalog
                    .movies()
                    .iter()
                    .filter(|m| filter.matches(m))
                    .count();
                output.println(format!("{} ({})", category, count));
            }
            output.data(&categories);
            Ok(())
        }
        AdminCommands::Movies { cmd } => {
            if !require_admin(&session, output)? {
                return Ok(());
            }
            run_movies(ctx, &mut session, cmd, output).await
        }
        AdminCommands::Reviews { cmd } => {
            if !require_admin(&session, output)? {
                return Ok(());
            }
            match cmd {
                AdminReviewCommands::List => {
                    let reviews: Vec<_> = session.reviews.reviews().iter().collect();
                    list_reviews(&session, &reviews, output)
                }
                AdminReviewCommands::Delete { id } => delete_review(&mut session, &id, output),
                AdminReviewCommands::Clear { yes } => clear_reviews(&mut session, yes, output),
            }
        }
    }
}

fn login(session: &Session, password: Option<String>, output: &Output) -> Result<()> {
    if session.admin.state()? == AdminState::LoggedIn {
        output.info("Already logged in.");
        return Ok(());
    }
    let password = match password {
        Some(p) => p,
        None => prompts::prompt_password("Admin password")?,
    };
    if notice(output, session.admin.login(&password))?.is_some() {
        output.success("Logged in to the admin area");
    }
    Ok(())
}

async fn run_movies(
    ctx: &Context,
    session: &mut Session,
    cmd: AdminMovieCommands,
    output: &Output,
) -> Result<()> {
    let theme = session.theme.get()?;
    match cmd {
        AdminMovieCommands::List { search, category } => {
            let movies = session
                .catalog
                .filter(search.as_deref().unwrap_or(""), category.as_deref());
            if movies.is_empty() {
                output.info("No movies match.");
            } else {
                output.println(tables::movies_table(theme, &movies).to_string());
                output.info(format!("{} of {} movies", movies.len(), session.catalog.len()));
            }
            output.data(&movies);
        }
        AdminMovieCommands::Add {
            title,
            category,
            pick,
        } => {
            let lookup = ctx.lookup()?;
            let Some(candidates) = stage(session, &lookup, &title, output).await? else {
                return Ok(());
            };
            let Some(candidate) = pick_candidate(theme, &candidates, pick, output)? else {
                return Ok(());
            };

            let spinner = LookupSpinner::start(format!("Adding {}...", candidate.title));
            let result = session
                .catalog
                .add(&lookup, &candidate, category.as_deref())
                .await;
            spinner.finish();
            if let Some(movie) = notice(output, result)? {
                output.success(format!(
                    "Added \"{}\" ({}) to {}",
                    movie.title,
                    movie.year,
                    movie.category_or_default()
                ));
                output.data(movie);
            }
        }
        AdminMovieCommands::SetCategory { id, category } => {
            match notice(output, session.catalog.update_category(&id, &category))? {
                Some(true) => output.success(format!("Moved {} to {}", id, category.trim())),
                Some(false) => output.warn(format!("No catalog movie with id {}", id)),
                None => {}
            }
        }
        AdminMovieCommands::Delete { id } => match notice(output, session.catalog.delete(&id))? {
            Some(Some(removed)) => output.success(format!("Removed \"{}\" from the catalog", removed.title)),
            Some(None) => output.warn(format!("No catalog movie with id {}", id)),
            None => {}
        },
        AdminMovieCommands::DeleteAll { category, yes } => {
            let filter = match category {
                Some(c) => MovieFilter::Category(c),
                None => MovieFilter::All,
            };
            let matching = session
                .catalog
                .movies()
                .iter()
                .filter(|m| filter.matches(m))
                .count();
            if matching == 0 {
                output.info("No movies to delete.");
                return Ok(());
            }
            let scope = match &filter {
                MovieFilter::All => "the catalog".to_string(),
                MovieFilter::Category(c) => format!("category {}", c),
            };
            let prompt = format!("Delete {} movies from {}?", matching, scope);
            if !confirm(&prompt, yes, output)? {
                return Ok(());
            }
            if let Some(removed) = notice(output, session.catalog.bulk_delete(&filter))? {
                output.success(format!("Deleted {} movies from {}", removed, scope));
            }
        }
    }
    Ok(())
}

fn dashboard(session: &Session, output: &Output) -> Result<()> {
    let stats = session.dashboard();
    let theme = session.theme.get()?;

    if output.is_human() {
        output.println(format!("\n{}", "Dashboard".bright_cyan().bold()));

        let mut totals = tables::themed_table(theme);
        totals.set_header(vec!["Movies", "Reviews", "Categories", "Average rating"]);
        totals.add_row(vec![
            Cell::new(stats.total_movies),
            Cell::new(stats.total_reviews),
            Cell::new(stats.categories),
            Cell::new(&stats.average_rating),
        ]);
        output.println(totals.to_string());

        if !stats.recent_movies.is_empty() {
            output.println("Recently added movies".bold().to_string());
            let recent: Vec<&Movie> = stats.recent_movies.iter().collect();
            output.println(tables::movies_table(theme, &recent).to_string());
        }
        if !stats.recent_reviews.is_empty() {
            output.println("Recent reviews".bold().to_string());
            let recent: Vec<_> = stats.recent_reviews.iter().collect();
            output.println(tables::reviews_table(theme, &recent).to_string());
        }
    }
    output.data(&stats);
    Ok(())
}
