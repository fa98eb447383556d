use clap::Parser;
use miette::Result;
use gcpanel::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => gcpanel::cli::commands::init::run(args),
        Commands::Contract(cmd) => gcpanel::cli::commands::contract::run(cmd, &global),
        Commands::Co(cmd) => gcpanel::cli::commands::change_order::run(cmd, &global),
        Commands::Sub(cmd) => gcpanel::cli::commands::subcontract::run(cmd, &global),
        Commands::Invoice(cmd) => gcpanel::cli::commands::invoice::run(cmd, &global),
        Commands::Settings(cmd) => gcpanel::cli::commands::settings::run(cmd, &global),
        Commands::Status(args) => gcpanel::cli::commands::status::run(args, &global),
        Commands::Completions(args) => gcpanel::cli::commands::completions::run(args),
    }
}
