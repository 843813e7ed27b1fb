//! Command execution

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::demo::{delivery_examples, sample_orders};
use crate::application::services::Quote;
use crate::cli::args::{Cli, Commands, ConfigCommands, DemoKind};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::RenderStyle;
use crate::infrastructure::di::ServiceContainer;

/// Execute the CLI command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Demo { kind } => cmd_demo(cli, *kind),
        Commands::Render { file, tree } => cmd_render(cli, file, *tree),
        Commands::Quote { file } => cmd_quote(cli, file),
        Commands::Config { command } => cmd_config(cli, command),
        Commands::Completion { shell } => cmd_completion(*shell),
    }
}

fn load_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings loaded: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

// ============================================================
// Demo
// ============================================================

#[instrument(level = "debug", skip(cli))]
fn cmd_demo(cli: &Cli, kind: DemoKind) -> CliResult<()> {
    let container = load_container(cli)?;
    let style = container.settings.render.to_style();

    if matches!(kind, DemoKind::Orders | DemoKind::All) {
        demo_orders(&style)?;
    }
    if kind == DemoKind::All {
        output::blank();
    }
    if matches!(kind, DemoKind::Delivery | DemoKind::All) {
        demo_delivery(&style);
    }
    Ok(())
}

fn demo_orders(style: &RenderStyle) -> CliResult<()> {
    let mut samples = sample_orders()?;

    output::header("Orders");
    for order in &samples.orders {
        output::info(&samples.tree.render(*order, style)?);
        output::blank();
    }

    let (outer, inner) = samples.removable;
    samples.tree.remove(outer, inner)?;
    if let Some(last) = samples.orders.last() {
        output::header("After removing Inner box");
        output::info(&samples.tree.render(*last, style)?);
    }
    Ok(())
}

fn demo_delivery(style: &RenderStyle) {
    output::header("Deliveries");
    for example in delivery_examples() {
        output::action(example.title, &example.delivery.description());
        output::detail(&format!("Cost: {}", style.price(example.delivery.cost())));
        if let Some(surcharge) = example.surcharge {
            output::detail(&format!("Express surcharge: {}", style.price(surcharge)));
        }
    }
}

// ============================================================
// Orders
// ============================================================

#[instrument(level = "debug", skip(cli))]
fn cmd_render(cli: &Cli, file: &Path, tree: bool) -> CliResult<()> {
    let container = load_container(cli)?;
    let rendered = container.quote_service().render(file, tree)?;
    output::info(&rendered);
    Ok(())
}

#[instrument(level = "debug", skip(cli))]
fn cmd_quote(cli: &Cli, file: &Path) -> CliResult<()> {
    let container = load_container(cli)?;
    let service = container.quote_service();
    let quote = service.quote(file)?;
    print_quote(&quote, service.style());
    Ok(())
}

fn print_quote(quote: &Quote, style: &RenderStyle) {
    output::info(&quote.rendered);
    output::blank();
    output::action("Order total", &style.price(quote.order_total));
    match &quote.delivery {
        Some(delivery) => {
            output::action("Delivery", &delivery.description);
            output::action("Delivery cost", &style.price(delivery.cost));
        }
        None => output::action("Delivery", "none"),
    }
    output::action("Grand total", &style.price(quote.grand_total));
}

// ============================================================
// Config
// ============================================================

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "exists" } else { "not found" };
                    output::action("Global", &format!("{} ({})", path.display(), state));
                }
                None => output::action("Global", "unavailable (no home directory)"),
            }
            if let Some(path) = &cli.config {
                output::action("Explicit", &path.display());
            }
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

fn cmd_completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
