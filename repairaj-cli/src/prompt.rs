//! Terminal model picker.

use anyhow::Context;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use repairaj_core::ports::{Choice, Chooser};

/// Arrow-key picker on the controlling terminal. Esc or `q` cancels.
#[derive(Debug, Default)]
pub struct TerminalChooser;

impl Chooser for TerminalChooser {
    fn choose(&self, label: &str, options: &[String]) -> anyhow::Result<Choice> {
        let picked = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .default(0)
            .items(options)
            .interact_opt()
            .context("model selection needs an interactive terminal; pass --model instead")?;

        Ok(match picked {
            Some(i) => Choice::Selected(options[i].clone()),
            None => Choice::Cancelled,
        })
    }
}
