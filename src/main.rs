use std::process::ExitCode;

use appid_extract::{
    cli,
    clock::{Clock, Stopwatch, format_elapsed},
    config,
    console::{Console, LineEnd, TerminalConsole, console_width},
    logging, markup,
};

fn main() -> ExitCode {
    let watch = Stopwatch::started();
    let cli_opts = cli::parse();
    logging::init_logging(cli_opts.log_json);

    let loaded = config::load_config(cli_opts.config_path.as_deref());
    let color = !cli_opts.no_color && loaded.as_ref().map(|l| l.config.color).unwrap_or(true);
    let mut console = TerminalConsole::stdout(color);
    show_header(&mut console);

    let code = match cli::run(&cli_opts, loaded, &mut console) {
        Ok(_) => 0,
        Err(err) => {
            cli::report(&mut console, &err);
            err.exit_code()
        }
    };

    console.message(
        &format!(
            "\n<c:DarkCyan>Time elapsed: <c:DarkGray>{}",
            format_elapsed(watch.elapsed())
        ),
        LineEnd::Newline,
    );
    ExitCode::from(code)
}

fn show_header(console: &mut dyn Console) {
    let header = format!(
        "{} v <c:White>{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    console.message(
        &format!("\n{}\n", markup::centered_header(&header, console_width())),
        LineEnd::Newline,
    );
}
