use clap::{Parser, Subcommand};
use labubu_city::routes::{self, RouteError};
use labubu_city::site::Site;
use labubu_city::{config, generate, output, sitemap};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Exit status for `render` on a locale prefix the site does not serve.
const EXIT_UNSUPPORTED_LOCALE: i32 = 2;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "labubu-city")]
#[command(about = "Static site generator for the Labubu.city fan hub")]
#[command(long_about = "\
Static site generator for the Labubu.city fan hub

Every page is rendered once per configured locale. The default locale lives
at the site root; every other locale gets a /<locale> prefix (or all of them
do, with locale_prefix = \"always\").

Source structure:

  content/
  ├── config.toml      # Site config (optional, overrides stock defaults)
  └── public/          # Copied verbatim to the output root (optional)

Output:

  dist/
  ├── index.html, series/, labubu-wallpapers/, about/
  ├── zh/...           # One tree per prefixed locale
  ├── 404.html         # Soft not-found page per locale
  ├── sitemap.xml      # Every URL with its hreflang alternates
  └── robots.txt

Run 'labubu-city gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Source directory holding config.toml and public/
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Site origin, overriding [site] origin in config.toml
    #[arg(long, env = "SITE_URL", global = true)]
    origin: Option<String>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page and write the full site
    Build,
    /// Validate config and print the resolved locale table
    Check,
    /// Print every canonical URL with its alternates
    Urls,
    /// Print sitemap.xml to stdout
    Sitemap,
    /// Render one request path (e.g. /zh/series/zimomo) to stdout
    Render {
        /// Request path, optionally prefixed with a locale
        path: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Command::Build => {
            let site = load_site(&cli)?;
            init_thread_pool(&site.config.build);
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let public = cli.source.join("public");
            let report = generate::build(&site, &cli.output, Some(public.as_path()), today())?;
            output::print_build_output(&report, &cli.output);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let site = load_site(&cli)?;
            let config_file = cli.source.join("config.toml");
            let config_file = config_file.is_file().then_some(config_file.as_path());
            output::print_check_output(&site, config_file, sitemap::site_paths().len());
            println!("==> Config is valid");
        }
        Command::Urls => {
            let site = load_site(&cli)?;
            output::print_url_inventory(&sitemap::enumerate(&site.urls, today()));
        }
        Command::Sitemap => {
            let site = load_site(&cli)?;
            let entries = sitemap::enumerate(&site.urls, today());
            print!("{}", sitemap::render_sitemap_xml(&entries));
        }
        Command::Render { path } => {
            let site = load_site(&cli)?;
            match routes::resolve(site.routing(), site.mapper(), path) {
                Ok((locale, route)) => {
                    tracing::info!(locale, path = %route.path(), "rendering");
                    println!("{}", generate::render_route(&site, locale, &route).into_string());
                }
                Err(err @ RouteError::UnsupportedLocale(_)) => {
                    eprintln!("error: {err}");
                    std::process::exit(EXIT_UNSUPPORTED_LOCALE);
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config from the source directory, apply the origin override, and
/// assemble the site. Any routing misconfiguration stops here.
fn load_site(cli: &Cli) -> Result<Site, Box<dyn std::error::Error>> {
    let mut config = config::load_config(&cli.source)?;
    if let Some(origin) = &cli.origin {
        config.override_origin(origin)?;
    }
    Ok(Site::from_config(config)?)
}

/// Log to stderr. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initialize the rayon thread pool based on build config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(build: &config::BuildConfig) {
    let threads = config::effective_threads(build);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Today's UTC date, the `lastmod` of every sitemap entry.
fn today() -> time::Date {
    time::OffsetDateTime::now_utc().date()
}
