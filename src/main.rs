use clap::Parser;
use contactsync::cli::{logging, Cli, Commands};
use contactsync::core::Config;
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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

    // Config errors surface from the command itself; here we only need the log path
    let log_file = global.log_file.clone().or_else(|| {
        Config::load(global.config.as_deref())
            .ok()
            .and_then(|c| c.log_file)
    });
    let _log_guard = logging::init(global.verbose, log_file.as_deref());

    match cli.command {
        Commands::Import(args) => contactsync::cli::commands::import::run(args, &global),
        Commands::List(args) => contactsync::cli::commands::list::run(args, &global),
        Commands::Template(args) => contactsync::cli::commands::template::run(args, &global),
        Commands::Config(cmd) => contactsync::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => contactsync::cli::commands::completions::run(args),
    }
}
