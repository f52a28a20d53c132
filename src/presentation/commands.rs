// Manual controls - Commands read from stdin
use crate::application::refresh_service::RefreshService;
use crate::domain::filter::VehicleFilter;
use crate::presentation::surface::{present, MemorySurface};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Show(String),
    Filter(VehicleFilter),
    Details(String),
    Sidebar,
    Quit,
}

/// Why [`run_commands`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandsEnded {
    Quit,
    /// Input reached end of file
    Closed,
}

pub const USAGE: &str = "commands: refresh | show <section> | filter <type|all> <status|all> \
     | details <id> | sidebar | quit";

pub fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let command = match (words.next()?, words.next(), words.next()) {
        ("refresh" | "r", None, _) => Command::Refresh,
        ("show", Some(section), None) => Command::Show(section.to_string()),
        ("filter", Some(vehicle_type), status) => {
            Command::Filter(VehicleFilter::from_controls(vehicle_type, status.unwrap_or("all")))
        }
        ("details", Some(id), None) => Command::Details(id.to_string()),
        ("sidebar", None, _) => Command::Sidebar,
        ("quit" | "q" | "exit", None, _) => Command::Quit,
        _ => return None,
    };

    if words.next().is_some() {
        return None;
    }
    Some(command)
}

/// Prints the view after every settled refresh, scheduled or manual.
pub fn spawn_presenter(service: Arc<RefreshService<MemorySurface>>) -> JoinHandle<()> {
    let mut settled = service.subscribe();
    tokio::spawn(async move {
        while settled.changed().await.is_ok() {
            let mut view = service.view().lock().await;
            println!("{}", present(view.surface_mut()));
        }
    })
}

/// Reads commands until `quit` or end of input.
///
/// Refresh results are printed by [`spawn_presenter`], not here.
pub async fn run_commands<R>(
    service: Arc<RefreshService<MemorySurface>>,
    reader: R,
) -> anyhow::Result<CommandsEnded>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    println!("{}", USAGE);

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = parse_command(&line) else {
            println!("{}", USAGE);
            continue;
        };

        match command {
            Command::Refresh => {
                service.refresh_all().await;
                continue;
            }
            Command::Show(section) => {
                if let Err(e) = service.view().lock().await.show_section(&section) {
                    println!("! {}", e);
                    continue;
                }
            }
            Command::Filter(filter) => service.view().lock().await.set_filter(filter),
            Command::Details(id) => {
                match service.view().lock().await.vehicle_details(&id) {
                    Some(vehicle) => println!("{:#?}", vehicle),
                    None => println!("! No vehicle with id {}", id),
                }
                continue;
            }
            Command::Sidebar => {
                service.view().lock().await.toggle_sidebar();
            }
            Command::Quit => return Ok(CommandsEnded::Quit),
        }

        let mut view = service.view().lock().await;
        println!("{}", present(view.surface_mut()));
    }

    Ok(CommandsEnded::Closed)
}
