use anyhow::Context;
use clap::Parser;
use diagelec::{cli, config, error, export, gateway, interactive, logging, scanner, shell};
use cli::{Cli, Commands};
use config::Config;
use diagelec_common::{ReportCard, Severity};
use gateway::GeminiGateway;
use shell::Shell;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = Config::load().context("lecture de la configuration")?;
    if let Some(model) = cli.model.clone() {
        config.model = model;
    }

    match cli.command {
        Some(Commands::Analyze { paths, output, export: export_target, format, title }) => {
            println!("⚡ diagelec - analyse NF C 16-600\n");

            // 1. Recherche des photos
            println!("[1/3] Recherche des photos...");
            let images = scanner::scan_paths(&paths)?;
            if images.is_empty() {
                let listed: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                return Err(error::DiagError::NoImagesFound(listed.join(", ")).into());
            }
            println!("✔ {} photo(s)\n", images.len());

            // 2. Analyse
            let gateway = GeminiGateway::new(&config)?;
            println!("[2/3] Analyse IA ({})...", gateway.model());
            let mut shell = Shell::new(gateway);
            let mut failures = 0usize;

            for info in &images {
                let image = match scanner::load_image(&info.path, config.max_image_size) {
                    Ok(image) => image,
                    Err(e) => {
                        failures += 1;
                        println!("✘ {}", e);
                        continue;
                    }
                };

                let outcome = tokio::select! {
                    result = shell.scan_image(image, info.date.clone()) => {
                        Some(result.map(|report| ReportCard::new(report).render_text()))
                    }
                    _ = tokio::signal::ctrl_c() => None,
                };

                match outcome {
                    Some(Ok(card)) => println!("\n📷 {}\n{}", info.file_name, card),
                    Some(Err(e)) => {
                        failures += 1;
                        println!("✘ {} : {}", info.file_name, e);
                    }
                    None => {
                        println!("↩ Analyse interrompue");
                        break;
                    }
                }
            }
            let reports = shell.session().reports();
            let dangers: usize = reports
                .iter()
                .map(|r| r.count_by_severity(Severity::Danger))
                .sum();
            println!(
                "✔ {} rapport(s), {} anomalie(s) dont {} DANGER, {} échec(s)\n",
                reports.len(),
                shell.session().total_anomalies(),
                dangers,
                failures
            );

            // 3. Sauvegarde / export
            println!("[3/3] Sortie...");
            if let Some(output) = output {
                let json = serde_json::to_string_pretty(reports)?;
                std::fs::write(&output, json)
                    .with_context(|| format!("écriture de {}", output.display()))?;
                println!("✔ Rapports JSON : {}", output.display());
            }
            if let Some(target) = export_target {
                if reports.is_empty() {
                    println!("- Rien à exporter");
                } else {
                    for path in export::export_reports(reports, format, &target, &title)? {
                        println!("✔ Export : {}", path.display());
                    }
                }
            }

            println!("\n✅ Terminé");
        }

        Some(Commands::Chat { message }) => {
            let mut shell = Shell::new(GeminiGateway::new(&config)?);
            match message {
                Some(text) => {
                    let reply = shell.send_chat(&text).await?;
                    println!("🤖 {}", reply.text);
                }
                None => interactive::chat_loop(&mut shell).await?,
            }
        }

        Some(Commands::Session) | None => {
            let mut shell = Shell::new(GeminiGateway::new(&config)?);
            interactive::run(&mut shell, config.max_image_size).await?;
        }

        Some(Commands::Config { set_api_key, show }) => {
            if let Some(key) = set_api_key {
                // sans l'éventuel --model de la ligne de commande
                let mut stored = Config::load()?;
                stored.set_api_key(key)?;
                println!("✔ Clé d'API enregistrée");
            }

            if show {
                println!("Configuration ({}):", Config::config_path()?.display());
                println!("  Modèle : {}", config.model);
                println!("  API : {}", config.api_base_url);
                println!("  Taille max. des images : {}px", config.max_image_size);
                println!("  Délai : {}s", config.timeout_seconds);
                println!("  Température : {}", config.temperature);
                println!(
                    "  Clé d'API : {}",
                    if config.api_key().is_some() { "définie" } else { "absente" }
                );
            }
        }
    }

    Ok(())
}
