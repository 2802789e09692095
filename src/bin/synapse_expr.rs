//! Command-line front end for the predefined function library
//!
//! Evaluates a single function call over literal JSON arguments, or prints the
//! function catalogue.

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value as JsonValue;
use synapse_expr::{
    EngineConfig, ExpressionNode, ExpressionNodeRef, ExpressionResult, FunctionCatalogue,
    InMemoryContext, LiteralNode, PredefinedFunctionNode,
};

#[derive(Parser)]
#[command(name = "synapse-expr")]
#[command(about = "Evaluate predefined mediation-expression functions")]
#[command(version)]
#[command(author = "OctoFHIR Team <funyloony@gmail.com>")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a function over literal arguments
    Eval {
        /// Function name, e.g. `substring`
        function: String,
        /// Arguments as JSON; text that is not valid JSON is taken as a string
        arguments: Vec<String>,
        /// JSON fixture with registry resources, secrets and XPath results
        #[arg(short, long)]
        context: Option<String>,
        /// JSON engine configuration
        #[arg(long)]
        config: Option<String>,
        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// List the predefined functions
    Functions {
        /// Print the catalogue as JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Eval {
            function,
            arguments,
            context,
            config,
            pretty,
        } => handle_eval(
            &function,
            &arguments,
            context.as_deref(),
            config.as_deref(),
            pretty,
        ),
        Commands::Functions { json } => handle_functions(json),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn handle_eval(
    function: &str,
    arguments: &[String],
    context_file: Option<&str>,
    config_file: Option<&str>,
    pretty: bool,
) -> Result<()> {
    let config = match config_file {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let mut context = match context_file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Error reading context file '{path}'"))?;
            InMemoryContext::from_json_str(&content)
                .with_context(|| format!("Error parsing context file '{path}'"))?
        }
        None => InMemoryContext::new(),
    }
    .with_vault_lookup_prefix(config.vault_lookup_prefix.clone());

    let nodes: Vec<ExpressionNodeRef> = arguments
        .iter()
        .map(|argument| Box::new(LiteralNode::new(parse_argument(argument))) as ExpressionNodeRef)
        .collect();
    let call = PredefinedFunctionNode::new(function, nodes).with_config(Arc::new(config));

    let result = call
        .evaluate(&mut context)
        .with_context(|| format!("Error evaluating {function}"))?;
    log::debug!("{function} returned {}", result.type_name());

    let output = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{output}");
    Ok(())
}

fn parse_argument(argument: &str) -> ExpressionResult {
    match serde_json::from_str::<JsonValue>(argument) {
        Ok(value) => ExpressionResult::from_json(value),
        Err(_) => ExpressionResult::from(argument),
    }
}

fn handle_functions(json: bool) -> Result<()> {
    let catalogue = FunctionCatalogue::new();
    if json {
        let docs = catalogue.generate_function_docs_json();
        println!("{}", serde_json::to_string_pretty(&docs)?);
    } else {
        print!("{}", catalogue.generate_function_docs());
    }
    Ok(())
}
