use std::{
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

use chrono::Utc;
use nutriscan_core::domain::{
    food_analysis::{ports::FoodAnalysisService, value_objects::AnalyzeFoodInput},
    session::{entities::Session, errors::SessionError},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use crate::application::{
    image_loader::load_image,
    render::{render_analysis, render_history, success_message},
};

const HELP: &str = "\
Commands:
  open <path>    select an image (jpg, png, webp)
  analyze        analyze the selected image
  clear          drop the selected image and result
  history        list past analyses, newest first
  show <n|id>    show a past analysis by list number or id
  help           show this help
  quit           leave the session
";

const ANALYSIS_FAILED: &str = "Analysis failed. Check that the image is clear, then try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Open(PathBuf),
    Analyze,
    Clear,
    History,
    Show(HistoryRef),
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRef {
    /// 1-based position in the newest-first list
    Position(usize),
    Id(Uuid),
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "" => Ok(ShellCommand::Empty),
            "open" if rest.is_empty() => Err("usage: open <path>".to_string()),
            "open" => Ok(ShellCommand::Open(PathBuf::from(rest))),
            "analyze" => Ok(ShellCommand::Analyze),
            "clear" => Ok(ShellCommand::Clear),
            "history" => Ok(ShellCommand::History),
            "show" => rest.parse().map(ShellCommand::Show),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}

impl FromStr for HistoryRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(position) = s.parse::<usize>() {
            return Ok(HistoryRef::Position(position));
        }
        Uuid::parse_str(s)
            .map(HistoryRef::Id)
            .map_err(|_| "usage: show <n|id>".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs one command against the session, writing user-facing output to `out`.
pub async fn handle_command<S, W>(
    session: &mut Session,
    service: &S,
    command: ShellCommand,
    out: &mut W,
) -> std::io::Result<Flow>
where
    S: FoodAnalysisService,
    W: Write,
{
    match command {
        ShellCommand::Empty => {}
        ShellCommand::Help => write!(out, "{HELP}")?,
        ShellCommand::Quit => return Ok(Flow::Quit),
        ShellCommand::Open(path) => match load_image(&path).await {
            Ok(image) => {
                session.select_image(path.display().to_string(), image);
                writeln!(out, "Selected {}", path.display())?;
            }
            Err(e) => writeln!(out, "{e}")?,
        },
        ShellCommand::Clear => {
            session.clear();
            writeln!(out, "Cleared.")?;
        }
        ShellCommand::Analyze => match session.analyze(service).await {
            Ok(entry) => {
                writeln!(out, "{}", success_message(&entry.analysis))?;
                write!(out, "{}", render_analysis(&entry.analysis))?;
            }
            Err(SessionError::NoImageSelected) => {
                writeln!(out, "No image selected. Use `open <path>` first.")?
            }
            Err(SessionError::Analysis(_)) => writeln!(out, "{ANALYSIS_FAILED}")?,
        },
        ShellCommand::History => write!(out, "{}", render_history(session.history(), Utc::now()))?,
        ShellCommand::Show(reference) => {
            let id = match reference {
                HistoryRef::Id(id) => Some(id),
                HistoryRef::Position(position) => position
                    .checked_sub(1)
                    .and_then(|index| session.history().list().get(index))
                    .map(|entry| entry.id),
            };

            let selected = match id {
                Some(id) => session.select_history(id),
                None => None,
            };

            match selected {
                Some(entry) => {
                    writeln!(out, "{}", entry.image_ref)?;
                    write!(out, "{}", render_analysis(&entry.analysis))?;
                }
                None => writeln!(out, "No such history entry.")?,
            }
        }
    }

    Ok(Flow::Continue)
}

/// Interactive loop over stdin. Failed commands are reported and the loop
/// keeps going so the user can retry.
pub async fn run_shell<S>(service: &S) -> anyhow::Result<()>
where
    S: FoodAnalysisService,
{
    let mut session = Session::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    write!(stdout, "NutriScan session. Type `help` for commands.\n> ")?;
    stdout.flush()?;

    while let Some(line) = lines.next_line().await? {
        let flow = match line.parse::<ShellCommand>() {
            Ok(command) => handle_command(&mut session, service, command, &mut stdout).await?,
            Err(message) => {
                writeln!(stdout, "{message}")?;
                Flow::Continue
            }
        };

        if flow == Flow::Quit {
            break;
        }

        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    Ok(())
}

/// One-shot analysis of a single image.
pub async fn run_analyze<S>(service: &S, path: &Path, json: bool) -> anyhow::Result<()>
where
    S: FoodAnalysisService,
{
    let image = load_image(path).await?;
    let analysis = service.analyze_food(AnalyzeFoodInput::new(image)).await?;

    let mut stdout = std::io::stdout();
    if json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&analysis)?)?;
    } else {
        writeln!(stdout, "{}", success_message(&analysis))?;
        write!(stdout, "{}", render_analysis(&analysis))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use nutriscan_core::domain::food_analysis::services::OfflineFoodAnalysisService;

    use super::*;

    async fn run(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        let command = line.parse::<ShellCommand>().unwrap();
        handle_command(session, &OfflineFoodAnalysisService::new(), command, &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            "open  my meal.jpg ".parse::<ShellCommand>(),
            Ok(ShellCommand::Open(PathBuf::from("my meal.jpg")))
        );
        assert_eq!("analyze".parse::<ShellCommand>(), Ok(ShellCommand::Analyze));
        assert_eq!(
            "show 2".parse::<ShellCommand>(),
            Ok(ShellCommand::Show(HistoryRef::Position(2)))
        );
        assert_eq!("".parse::<ShellCommand>(), Ok(ShellCommand::Empty));
        assert_eq!("exit".parse::<ShellCommand>(), Ok(ShellCommand::Quit));
        assert!("open".parse::<ShellCommand>().is_err());
        assert!("show abc".parse::<ShellCommand>().is_err());
        assert!("dance".parse::<ShellCommand>().is_err());
    }

    #[test]
    fn parses_show_by_id() {
        let id = Uuid::now_v7();
        assert_eq!(
            format!("show {id}").parse::<ShellCommand>(),
            Ok(ShellCommand::Show(HistoryRef::Id(id)))
        );
    }

    #[tokio::test]
    async fn analyze_without_image_asks_for_one() {
        let mut session = Session::new();
        let out = run(&mut session, "analyze").await;
        assert!(out.contains("No image selected"));
    }

    #[tokio::test]
    async fn open_analyze_history_and_show() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lunch.jpg");
        std::fs::write(&path, [0xffu8, 0xd8, 0xff]).unwrap();

        let mut session = Session::new();
        let out = run(&mut session, &format!("open {}", path.display())).await;
        assert!(out.starts_with("Selected"));

        let out = run(&mut session, "analyze").await;
        assert!(out.contains("Recognized 3 foods, 675 kcal total"));
        assert_eq!(session.history().len(), 1);

        let out = run(&mut session, "history").await;
        assert!(out.contains("1 records"));
        assert!(out.contains("675 kcal"));

        session.clear();
        let out = run(&mut session, "show 1").await;
        assert!(out.contains("lunch.jpg"));
        assert!(session.current_analysis().is_some());

        let out = run(&mut session, "show 5").await;
        assert!(out.contains("No such history entry."));
    }

    #[tokio::test]
    async fn open_reports_unsupported_files() {
        let mut session = Session::new();
        let out = run(&mut session, "open notes.txt").await;
        assert!(out.contains("Unsupported image format"));
        assert!(session.current_image().is_none());
    }
}
