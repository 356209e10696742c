//! Session interactive en terminal
//!
//! Reproduit la coquille mobile : un écran courant (Scanner, Rapport,
//! Assistant) et une barre de navigation sous forme de menu.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressDrawTarget};
use tracing::debug;

use diagelec_common::report::EMPTY_REPORTS_MESSAGE;
use diagelec_common::{ReportCard, Role, ViewState};

use crate::error::Result;
use crate::export::{export_reports, ExportFormat};
use crate::gateway::AiGateway;
use crate::scanner;
use crate::shell::Shell;

/// Actions proposées dans le menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Scan,
    Export,
    Delete,
    Navigate(ViewState),
    Quit,
}

impl MenuAction {
    pub fn label(&self) -> String {
        match self {
            MenuAction::Scan => "📷 Analyser une photo".to_string(),
            MenuAction::Export => "🖨  Imprimer / exporter".to_string(),
            MenuAction::Delete => "🗑  Supprimer un rapport".to_string(),
            MenuAction::Navigate(view) => format!("{} {}", view.icon(), view.label()),
            MenuAction::Quit => "Quitter".to_string(),
        }
    }
}

/// Menu de l'écran courant : actions de l'écran puis navigation
pub fn menu_actions(session: &diagelec_common::Session) -> Vec<MenuAction> {
    let view = session.view().canonical();
    let mut actions = Vec::new();

    match view {
        ViewState::Scan => actions.push(MenuAction::Scan),
        ViewState::Report => {
            if session.can_export() {
                actions.push(MenuAction::Export);
                actions.push(MenuAction::Delete);
            } else {
                // bouton « Commencer » de l'état vide
                actions.push(MenuAction::Navigate(ViewState::Scan));
            }
        }
        _ => {}
    }

    for target in ViewState::NAVIGABLE {
        let action = MenuAction::Navigate(target);
        if target != view && !actions.contains(&action) {
            actions.push(action);
        }
    }
    actions.push(MenuAction::Quit);
    actions
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

pub async fn run<G: AiGateway>(shell: &mut Shell<G>, max_image_size: u32) -> Result<()> {
    println!("⚡ DiagElec AI - Pré-diagnostic NF C 16-600");
    println!("   Ctrl-C pendant une attente abandonne l'action en cours.\n");

    loop {
        render_view(shell);

        if let Some(notice) = shell.session().error() {
            println!("\n⚠️  {}", notice);
        }
        shell.session_mut().dismiss_error();

        let actions = menu_actions(shell.session());
        let labels: Vec<String> = actions.iter().map(MenuAction::label).collect();
        let choice = Select::new()
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice] {
            MenuAction::Scan => scan(shell, max_image_size).await?,
            MenuAction::Export => export(shell)?,
            MenuAction::Delete => delete(shell)?,
            MenuAction::Navigate(ViewState::Chat) => {
                shell.navigate(ViewState::Chat);
                chat_loop(shell).await?;
            }
            MenuAction::Navigate(view) => shell.navigate(view),
            MenuAction::Quit => break,
        }
    }

    Ok(())
}

fn render_view<G: AiGateway>(shell: &Shell<G>) {
    let session = shell.session();
    let view = session.view();
    println!("\n━━━━━━━━ {} {} ━━━━━━━━", view.icon(), view.label());

    match view.canonical() {
        ViewState::Scan => {
            println!("Rapports : {}", session.report_count());
            println!("Anomalies : {}", session.total_anomalies());
        }
        ViewState::Report => {
            if session.reports().is_empty() {
                println!("{}", EMPTY_REPORTS_MESSAGE);
            }
            for report in session.reports() {
                println!("\n{}", ReportCard::new(report).render_text());
            }
        }
        _ => {}
    }
}

async fn scan<G: AiGateway>(shell: &mut Shell<G>, max_image_size: u32) -> Result<()> {
    let input: String = Input::new()
        .with_prompt("Photo (chemin, vide pour annuler)")
        .allow_empty(true)
        .interact_text()?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    let images = scanner::scan_paths(&[PathBuf::from(trimmed)])?;
    for info in images {
        let image = match scanner::load_image(&info.path, max_image_size) {
            Ok(image) => image,
            Err(e) => {
                println!("✘ {}", e);
                continue;
            }
        };

        let pb = spinner(&format!("Analyse de {}...", info.file_name));
        let outcome = tokio::select! {
            result = shell.scan_image(image, info.date.clone()) => {
                Some(result.map(|report| (report.id.clone(), report.anomalies.len())))
            }
            _ = tokio::signal::ctrl_c() => None,
        };
        pb.finish_and_clear();

        match outcome {
            Some(Ok((id, anomalies))) => {
                println!("✔ {} : rapport {} ({} anomalie(s))", info.file_name, id, anomalies);
            }
            Some(Err(e)) if e.is_gateway_error() => {
                debug!(error = %e, "Analyse en échec");
                println!("✘ {} : {}", info.file_name, e);
            }
            // refus de la session : la notice est déjà posée
            Some(Err(_)) => {}
            None => {
                println!("↩ Analyse abandonnée");
                break;
            }
        }
    }
    Ok(())
}

pub async fn chat_loop<G: AiGateway>(shell: &mut Shell<G>) -> Result<()> {
    for message in shell.session().transcript().messages() {
        print_message(message.role, &message.text);
    }
    println!("(ligne vide pour revenir au menu)");

    loop {
        let input: String = Input::new()
            .with_prompt("Vous")
            .allow_empty(true)
            .interact_text()?;
        if input.trim().is_empty() {
            return Ok(());
        }

        let pb = spinner("L'assistant réfléchit...");
        let reply = tokio::select! {
            result = shell.send_chat(&input) => Some(result.map(|m| m.text.clone())),
            _ = tokio::signal::ctrl_c() => None,
        };
        pb.finish_and_clear();

        match reply {
            Some(Ok(text)) => print_message(Role::Model, &text),
            Some(Err(e)) => println!("✘ {}", e),
            None => {
                shell.abandon_chat();
                if let Some(last) = shell.session().transcript().messages().last() {
                    print_message(last.role, &last.text);
                }
            }
        }
    }
}

fn print_message(role: Role, text: &str) {
    match role {
        Role::User => println!("🧑 {}", text),
        Role::Model => println!("🤖 {}", text),
    }
}

fn export<G: AiGateway>(shell: &Shell<G>) -> Result<()> {
    let output: String = Input::new()
        .with_prompt("Dossier ou fichier de sortie")
        .default(".".to_string())
        .interact_text()?;

    let formats = ["HTML (impression)", "Excel", "Les deux"];
    let choice = Select::new()
        .with_prompt("Format")
        .items(&formats)
        .default(0)
        .interact()?;
    let format = match choice {
        0 => ExportFormat::Html,
        1 => ExportFormat::Excel,
        _ => ExportFormat::Both,
    };

    let written = export_reports(shell.session().reports(), format, Path::new(&output), "diagnostic")?;
    for path in written {
        println!("✔ {}", path.display());
    }
    Ok(())
}

fn delete<G: AiGateway>(shell: &mut Shell<G>) -> Result<()> {
    let reports = shell.session().reports();
    if reports.is_empty() {
        return Ok(());
    }

    let mut labels: Vec<String> = reports
        .iter()
        .map(|r| {
            let summary: String = r.summary.chars().take(50).collect();
            format!("{}  {}", r.id, summary)
        })
        .collect();
    labels.push("Annuler".to_string());

    let choice = Select::new()
        .with_prompt("Rapport à supprimer")
        .items(&labels)
        .default(labels.len() - 1)
        .interact()?;

    let selected = reports.get(choice).map(|r| r.id.clone());
    if let Some(id) = selected {
        shell.delete_report(&id);
        println!("✔ Rapport {} supprimé", id);
    }
    Ok(())
}
