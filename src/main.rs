use college_picker::api_client::{DirectoryClient, LogoClient};
use college_picker::config::Config;
use college_picker::logging::init_tracing;
use college_picker::table_display::display_institutions;
use college_picker::widgets::college_autocomplete::LOGO_UNAVAILABLE;
use crossterm::style::Stylize;

fn print_help() {
    println!("{}", "College Picker - search colleges as you type".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  college-picker [OPTIONS]");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}  - Print matching colleges and exit", "--search <name>".green());
    println!("  {}  - Check a college logo and exit", "--logo <domain>".green());
    println!(
        "  {}  - Write config file with defaults",
        "--generate-config".green()
    );
    println!("  {}             - Show this help", "--help".green());
    println!();
    println!("{}", "Keys:".yellow());
    println!("  {}    - Move through options", "Up/Down".green());
    println!("  {}      - Select highlighted college", "Enter".green());
    println!("  {}     - Clear selection", "Ctrl+X".green());
    println!("  {}     - Clear search text", "Ctrl+U".green());
    println!("  {}        - Toggle log pane", "F12".green());
    println!("  {}        - Quit", "Esc".green());
    println!();
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}

fn generate_config() -> anyhow::Result<()> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::create_default_with_comments())?;
    println!("Configuration file created at: {:?}", path);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.contains(&"--generate-config".to_string()) {
        return generate_config();
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format!("Error loading config: {:#}", e).red());
            eprintln!("Falling back to defaults");
            Config::default()
        }
    };
    let log_buffer = init_tracing(&config.logging.level);

    if let Some(term) = flag_value(&args, "--search") {
        let runtime = tokio::runtime::Runtime::new()?;
        let client = DirectoryClient::new(&config.endpoints.search_url);
        let institutions = runtime.block_on(client.search(&term))?;
        display_institutions(&institutions);
        return Ok(());
    }

    if let Some(domain) = flag_value(&args, "--logo") {
        let runtime = tokio::runtime::Runtime::new()?;
        let client = LogoClient::new(&config.endpoints.logo_url);
        match runtime.block_on(client.probe(&domain)) {
            Ok(url) => println!("{}", url.green()),
            Err(e) => {
                eprintln!("{}", LOGO_UNAVAILABLE.red());
                eprintln!("{:#}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    college_picker::tui_app::run_tui(&config, log_buffer)
}
