use super::{notice, tables, Context};
use crate::output::Output;
use crate::RecommendCommands;
use color_eyre::Result;

pub fn run_recommend(ctx: &Context, cmd: RecommendCommands, output: &Output) -> Result<()> {
    let mut session = ctx.open_session()?;
    match cmd {
        RecommendCommands::Add { title, reason } => {
            if let Some(rec) = notice(output, session.recommendations.recommend(&title, &reason))? {
                output.success(format!("Recommended \"{}\"", rec.title));
                output.data(rec);
            }
        }
        RecommendCommands::List => {
            let recommendations = session.recommendations.recommendations();
            if recommendations.is_empty() {
                output.info("No recommendations yet.");
            } else {
                let theme = session.theme.get()?;
                output.println(tables::recommendations_table(theme, recommendations).to_string());
            }
            output.data(recommendations);
        }
        RecommendCommands::Delete { id } => match notice(output, session.recommendations.delete(&id))? {
            Some(Some(removed)) => output.success(format!("Deleted recommendation for \"{}\"", removed.title)),
            Some(None) => output.warn(format!("No recommendation with id {}", id)),
            None => {}
        },
    }
    Ok(())
}
