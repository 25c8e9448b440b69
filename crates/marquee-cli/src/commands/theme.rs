use super::Context;
use crate::output::Output;
use crate::ThemeMode;
use color_eyre::Result;
use marquee_models::Theme;
use serde_json::json;

pub fn run_theme(ctx: &Context, mode: Option<ThemeMode>, output: &Output) -> Result<()> {
    let preference = ctx.theme_preference()?;

    let theme = match mode {
        None => {
            let current = preference.get()?;
            output.info(format!("Current theme: {}", current.as_str()));
            output.data(&json!({ "theme": current }));
            return Ok(());
        }
        Some(ThemeMode::Toggle) => preference.toggle()?,
        Some(ThemeMode::Dark) => preference.set(Theme::Dark)?,
        Some(ThemeMode::Light) => preference.set(Theme::Light)?,
    };

    output.success(format!("Theme set to {}", theme.as_str()));
    output.data(&json!({ "theme": theme }));
    Ok(())
}
