//! boxforge - Parametric box generator with a web front end
//!
//! CLI entry point

use boxforge::{
    exit_codes,
    // CLI
    Cli, Commands, GenerateArgs, ListArgs, ServeArgs,
    // Config
    CliOverrides, Config,
    // Generators
    run_generator,
    // Web server
    ServerConfig, WebServer,
};
use clap::Parser;
use std::path::PathBuf;

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => run_serve(&args),
        Commands::List(args) => run_list(&args),
        Commands::Generate(args) => run_generate(&args),
        Commands::Info => run_info(),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("boxforge=info,tower_http=warn")),
        )
        .init();
}

// ============ Serve Command (Web Server) ============

fn run_serve(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Load config file if specified, otherwise search the default locations
    let file_config = match &args.config {
        Some(config_path) => Config::load_from_path(config_path),
        None => Config::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config file: {}", e);
        Config::default()
    });

    // Merge config file with CLI arguments (CLI takes precedence)
    let settings = file_config.merge_with_cli(&create_cli_overrides(args));

    if settings.dev_reload {
        let paths = if settings.watch.is_empty() {
            boxforge::web::default_watch_paths()?
        } else {
            settings.watch.clone()
        };
        boxforge::web::spawn_reload(paths)?;
    }

    let config = ServerConfig::default()
        .with_port(settings.port)
        .with_bind(&settings.bind)
        .with_language(&settings.language);

    let registry = boxforge::generators::registry();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let server = WebServer::with_config(config, registry);
        server.run().await.map_err(|e| e.to_string())
    })?;

    Ok(())
}

/// Only carry flags the user actually gave, so config file values survive
fn create_cli_overrides(args: &ServeArgs) -> CliOverrides {
    let mut overrides = CliOverrides::new();
    overrides.bind = args.bind.clone();
    overrides.port = args.port;
    overrides.language = args.language.clone();
    if args.dev_reload {
        overrides.dev_reload = Some(true);
    }
    overrides
}

// ============ List Command ============

fn run_list(args: &ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let registry = boxforge::generators::registry();

    for (group, entries) in registry.by_group() {
        println!("{}:", group.title());
        for entry in entries {
            println!("  {:<16} {}", entry.name(), entry.summary());
        }
        println!();
    }

    if args.all {
        let hidden: Vec<_> = registry.entries().filter(|e| e.hidden()).collect();
        if !hidden.is_empty() {
            println!("Hidden:");
            for entry in hidden {
                println!("  {:<16} {}", entry.name(), entry.summary());
            }
            println!();
        }
    }

    println!("{} generators", registry.len());
    Ok(())
}

// ============ Generate Command ============

fn run_generate(args: &GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let registry = boxforge::generators::registry();

    let entry = match registry.get(&args.name) {
        Some(entry) => entry,
        None => {
            eprintln!("Error: Unknown generator: {}", args.name);
            eprintln!("Run `boxforge list` to see what is available.");
            std::process::exit(exit_codes::UNKNOWN_GENERATOR);
        }
    };
    let generator = entry.instantiate();

    let pairs = match parse_set_pairs(&args.set) {
        Ok(pairs) => pairs,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            std::process::exit(exit_codes::INVALID_ARGS);
        }
    };

    // Unlike the web form, absent arguments keep their declared defaults
    let mut parsed = boxforge::ParsedArgs::defaults(generator.arg_groups());
    for (key, value) in &pairs {
        if let Err(e) = parsed.set(generator.arg_groups(), key, value) {
            eprintln!("Error: {}", e);
            std::process::exit(exit_codes::INVALID_ARGS);
        }
    }

    let rendered = run_generator(generator.as_ref(), &parsed)?;

    let output = match &args.output {
        Some(path) => path.clone(),
        None => PathBuf::from(format!("{}.{}", args.name, rendered.format().extension())),
    };
    rendered.save(&output)?;

    println!(
        "Wrote {} ({} bytes)",
        output.display(),
        rendered.bytes().len()
    );
    Ok(())
}

/// Split repeated `--set key=value` flags into query pairs
fn parse_set_pairs(set: &[String]) -> Result<Vec<(String, String)>, String> {
    let mut pairs = Vec::with_capacity(set.len());
    for item in set {
        match item.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                pairs.push((key.to_string(), value.to_string()));
            }
            _ => return Err(format!("expected KEY=VALUE, got {:?}", item)),
        }
    }
    Ok(pairs)
}

// ============ Info Command ============

fn run_info() -> Result<(), Box<dyn std::error::Error>> {
    println!("boxforge v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);

    let registry = boxforge::generators::registry();
    println!();
    println!("Generators:");
    println!("  Registered: {}", registry.len());
    println!("  Visible: {}", registry.visible().count());

    println!();
    println!("Languages:");
    for tag in boxforge::i18n::available() {
        println!("  {}", tag);
    }

    println!();
    println!("Config File Locations:");
    println!("  Local: ./{}", boxforge::config::LOCAL_CONFIG_FILE);
    if let Some(user) = Config::user_config_path() {
        println!("  User:  {}", user.display());
    }

    Ok(())
}
