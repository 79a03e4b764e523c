//! Interactive menu

use anyhow::Result;

use super::session::Session;
use crate::prompt::Choice;

/// Top-level actions offered by the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Download,
    PrepareDependencies,
    RunDevServer,
    Build,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Download,
        Action::PrepareDependencies,
        Action::RunDevServer,
        Action::Build,
    ];

    fn choice(self) -> Choice {
        match self {
            Action::Download => Choice::described(
                "Download Project",
                "Download a repository by writing its name.",
            ),
            Action::PrepareDependencies => Choice::described(
                "Prepare Dependencies",
                "Download the additional repositories a project requires.",
            ),
            Action::RunDevServer => Choice::described(
                "Run Development Server",
                "Install core dependencies and start the transpile watcher.",
            ),
            Action::Build => Choice::described(
                "Build Project",
                "Create a build folder within the project folder.",
            ),
        }
    }
}

/// Ask for an action and run it
pub async fn run(session: &Session<'_>) -> Result<()> {
    let choices: Vec<Choice> = Action::ALL.iter().map(|a| a.choice()).collect();
    let index = session.prompter.select("What do you want to do?", &choices)?;

    match Action::ALL[index] {
        Action::Download => {
            let name = session
                .prompter
                .input("What project do you want to download?")?;
            session.download(&name).await
        }
        Action::PrepareDependencies => {
            let project = session.choose_project("What project do you want to prepare?")?;
            session.prepare(&project).await
        }
        Action::RunDevServer => session.confirm_dev_server().await,
        Action::Build => {
            let project = session.choose_project("What project do you want to build?")?;
            session.build(&project).await
        }
    }
}
