use tracing_subscriber::util::SubscriberInitExt;

pub(crate) mod config;
pub(crate) mod hn_api;
pub(crate) mod page;
pub(crate) mod widget;

pub(crate) static CLIENT: std::sync::LazyLock<reqwest::Client> =
    std::sync::LazyLock::new(reqwest::Client::new);

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    #[arg(help = "HTML page to update, defaults to LATEST_HN_PAGE or index.html")]
    page: Option<std::path::PathBuf>,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Print the link instead of writing it into the page")]
    stdout: bool,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Log to console")]
    log_to_console: bool,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let widget = widget::TopStoryWidget::new(
        hn_api::HnClient::default(),
        config::config().target_element.clone(),
    );

    if args.stdout {
        println!("{}", widget.fetch_anchor().await?);
        return Ok(());
    }

    let path = args
        .page
        .unwrap_or_else(|| config::config().page_path.clone());
    let mut page = page::HtmlFile::open(path)?;

    widget.init(&mut page).await?;
    page.save()?;

    tracing::info!(page =? page.path(), "Saved page");

    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;

    use clap::Parser;
    let args = Args::parse();

    let file_appender =
        tracing_appender::rolling::daily(&config::config().log_dir, "latest_hn.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    let pretty_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stdout)
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    let registry = tracing_subscriber::registry().with(file_layer);

    // Keep stdout clean when it carries the link itself.
    if (config::config().log_to_console || args.log_to_console) && !args.stdout {
        registry.with(pretty_layer).init();
    } else {
        registry.init();
    };

    tracing::info!(
        config =? config::config(),
        args =? args,
        "Starting latest-hn"
    );

    match run(args).await {
        Ok(()) => {
            tracing::info!("latest-hn finished");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error =? e, "Error when updating latest story");
            eprintln!("Error: {e:#}");
            std::process::ExitCode::FAILURE
        }
    }
}
