use clap::Parser;
use md2text::{Cli, Md2Text, Md2TextError, OutputFormatter, OutputMode, UserFriendlyError};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let md2text = match Md2Text::from_cli(&cli) {
        Ok(md2text) => md2text,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    if cli.dry_run {
        return handle_dry_run(&cli, &md2text);
    }

    match md2text.convert(cli.input_path()) {
        Ok(report) => {
            md2text.output_formatter().print_conversion_report(&report);
            md2text.output_formatter().success("Done");

            if report.errors.is_empty() {
                0 // Success
            } else {
                2 // Success with warnings
            }
        }
        Err(e) => {
            md2text.handle_error(&e);

            match e {
                Md2TextError::Config { .. } => 2,
                Md2TextError::OutputDirectory { .. } => 3,
                Md2TextError::OutputWrite { .. } => 4,
                Md2TextError::Permission { .. } => 7,
                _ => 1, // General error
            }
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "md2text.toml".to_string());

    match Md2Text::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  md2text --input <path> --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(cli: &Cli, md2text: &Md2Text) -> i32 {
    let formatter = md2text.output_formatter();
    let config = md2text.config();
    let input = cli.input_path();

    formatter.info("DRY RUN MODE - No files will be converted");
    formatter.print_separator();

    formatter.info("Configuration that would be used:");
    println!("  Extensions: {}", config.filters.extensions.join(", "));
    println!("  Max file size: {} bytes", config.filters.max_file_size);
    println!(
        "  Exclude directories: {}",
        config.filters.exclude_dirs.join(", ")
    );
    println!("  Output file: {}", config.output.destination.display());

    formatter.print_separator();

    formatter.info("Conversion plan:");
    if md2text::cli::is_zip_input(input) {
        println!("  Input archive: {} (would be extracted first)", input.display());
    } else {
        println!("  Input directory: {}", input.display());
    }

    if !input.exists() {
        formatter.warning(&format!(
            "Input path does not exist: {} (run would find zero files)",
            input.display()
        ));
    }

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to perform actual conversion");

    0
}

fn print_startup_error(error: &Md2TextError) {
    // Basic formatter for errors raised before configuration is loaded
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
