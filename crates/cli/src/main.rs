use admin_forms_core::constants::BLOCK_PREFIX;
use admin_forms_core::{ConfigManager, FormOptions, FormSubmission, FormTypeRegistry, FormView};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "admin-forms")]
#[command(about = "Admin form builder CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a configuration file and list its entity views
    Check {
        /// Path to the entity configuration YAML
        config: PathBuf,
    },
    /// Build a form and print it as JSON
    Render {
        /// Path to the entity configuration YAML
        config: PathBuf,
        /// Entity name
        entity: String,
        /// View name (e.g. new, edit)
        view: String,
        /// JSON file with validation errors keyed by field name, routed to tabs before printing
        #[arg(long)]
        errors: Option<PathBuf>,
        /// Form type identifier
        #[arg(long = "type", default_value = BLOCK_PREFIX)]
        form_type: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check { config }) => {
            let config = ConfigManager::from_path(&config)?;
            let mut any = false;
            for entity in config.entities() {
                for view in entity.views() {
                    any = true;
                    println!(
                        "{} ({}) {}: {} field(s)",
                        entity.name(),
                        entity.class(),
                        view,
                        entity.view_fields(view).len()
                    );
                }
            }
            if !any {
                println!("No entity views found.");
            }
        }
        Some(Commands::Render {
            config,
            entity,
            view,
            errors,
            form_type,
        }) => {
            let config = ConfigManager::from_path(&config)?;
            let assembler = FormTypeRegistry::with_defaults().get(&form_type)?;
            let mut form = assembler.build_form(&config, FormOptions::new(entity, view))?;

            if let Some(path) = errors {
                let submission = read_submission(&path)?;
                form.submit(&submission)?;
            }

            println!(
                "{}",
                serde_json::to_string_pretty(&FormView::from_form(&form))?
            );
        }
        None => {
            println!("Use 'admin-forms --help' for commands");
        }
    }

    Ok(())
}

/// Read `{ "field": ["message", ...] }` into a submission.
fn read_submission(path: &Path) -> Result<FormSubmission, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let errors = serde_json::from_str(&text)?;
    Ok(FormSubmission { errors })
}
