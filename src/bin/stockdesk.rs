use stockdesk::config::Config;
use stockdesk::formatters::{build_view, EasternClock, FormatOptions};
use stockdesk::models::category::{Period, QueryCategory};
use stockdesk::models::envelope::ResponseEnvelope;
use stockdesk::services::{DisplayState, Output, QueryOutcome, QueryService, GENERIC_ERROR};
use stockdesk::transport::HttpTransport;

use anyhow::{bail, Context};
use clap::{App, Arg, ArgMatches, SubCommand};
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Clone, Copy, PartialEq)]
enum OutputFormat {
    Html,
    Text,
}

fn output_format(matches: &ArgMatches) -> OutputFormat {
    match matches.value_of("format") {
        Some("html") => OutputFormat::Html,
        _ => OutputFormat::Text,
    }
}

fn period_arg(matches: &ArgMatches, config: &Config) -> anyhow::Result<Period> {
    match matches.value_of("period") {
        Some(p) => Ok(p.parse::<Period>()?),
        None => Ok(config.default_period),
    }
}

// 命令行参数覆盖环境变量配置
fn build_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    let mut config = Config::from_env();
    if let Some(url) = matches.value_of("base-url") {
        config = config.with_base_url(url);
    }
    if let Some(secs) = matches.value_of("timeout") {
        let secs = secs.parse::<u64>().context("--timeout must be a whole number of seconds")?;
        config = config.with_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(clock) = matches.value_of("eastern-clock") {
        config = config.with_eastern_clock(clock.parse::<EasternClock>()?);
    }
    if let Some(user_agent) = matches.value_of("user-agent") {
        config = config.with_user_agent(user_agent);
    }
    config.validate()?;
    Ok(config)
}

fn emit(content: &str, output: Option<&str>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("writing {}", path))?;
            info!("Wrote {} bytes to {}", content.len(), path);
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn show(state: &DisplayState, format: OutputFormat, output: Option<&str>) -> anyhow::Result<()> {
    if !state.error.is_empty() {
        eprintln!("{}", state.error);
    }
    if !state.description.is_empty() {
        println!("{}\n", state.description);
    }
    let rendered = match format {
        OutputFormat::Html => state.output.to_html(),
        OutputFormat::Text => state.output.to_text(),
    };
    if !rendered.is_empty() {
        emit(&rendered, output)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init();

    let connection_args = [
        Arg::with_name("base-url")
            .long("base-url")
            .value_name("URL")
            .help("Backend base URL (default http://127.0.0.1:5000)")
            .takes_value(true),
        Arg::with_name("timeout")
            .long("timeout")
            .value_name("SECONDS")
            .help("Request timeout; the transport default applies when omitted")
            .takes_value(true),
        Arg::with_name("eastern-clock")
            .long("eastern-clock")
            .value_name("CLOCK")
            .help("Intraday time conversion: fixed (UTC+5h, default) or calendar")
            .takes_value(true),
        Arg::with_name("user-agent")
            .long("user-agent")
            .value_name("UA")
            .help("User-Agent header sent with each request")
            .takes_value(true),
    ];
    let format_arg = Arg::with_name("format")
        .long("format")
        .value_name("FORMAT")
        .help("Render as text or html")
        .possible_values(["text", "html"])
        .default_value("text")
        .takes_value(true);
    let function_arg = Arg::with_name("function")
        .short('f')
        .long("function")
        .value_name("FUNCTION")
        .help("Query type, e.g. \"Company Profile\", \"Intraday Data\"")
        .takes_value(true)
        .default_value("Company Profile");
    let period_arg_def = Arg::with_name("period")
        .short('p')
        .long("period")
        .value_name("PERIOD")
        .help("Intraday period: 1min, 5min, 15min, 30min, 1hour, 4hour, 1day (default from STOCKDESK_DEFAULT_PERIOD, else 30min)")
        .takes_value(true);

    let app = App::new("stockdesk")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Query the stock data backend and render the results")
        .subcommand(
            SubCommand::with_name("query")
                .about("Run a single query")
                .arg(
                    Arg::with_name("symbol")
                        .short('s')
                        .long("symbol")
                        .value_name("SYMBOL")
                        .help("Stock symbol or search term")
                        .required(true)
                        .takes_value(true),
                )
                .arg(function_arg.clone())
                .arg(period_arg_def.clone())
                .arg(format_arg.clone())
                .arg(
                    Arg::with_name("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Write the rendered output to a file")
                        .takes_value(true),
                )
                .args(&connection_args),
        )
        .subcommand(
            SubCommand::with_name("interactive")
                .about("Read symbols from stdin; Enter submits, :category and :period switch")
                .arg(function_arg.clone())
                .arg(period_arg_def.clone())
                .arg(format_arg.clone())
                .args(&connection_args),
        )
        .subcommand(
            SubCommand::with_name("render")
                .about("Render a saved response envelope or raw data file without a request")
                .arg(
                    Arg::with_name("input")
                        .short('i')
                        .long("input")
                        .value_name("FILE")
                        .help("JSON file holding an envelope or bare data")
                        .required(true)
                        .takes_value(true),
                )
                .arg(function_arg)
                .arg(period_arg_def)
                .arg(format_arg)
                .arg(
                    Arg::with_name("eastern-clock")
                        .long("eastern-clock")
                        .value_name("CLOCK")
                        .takes_value(true),
                ),
        )
        .subcommand(SubCommand::with_name("categories").about("List query types and periods"));

    let matches = app.get_matches();

    if let Some(matches) = matches.subcommand_matches("query") {
        let config = build_config(matches)?;
        let period = period_arg(matches, &config)?;
        let function = matches.value_of("function").unwrap_or("Company Profile");
        let symbol = matches.value_of("symbol").unwrap_or_default();

        let transport = HttpTransport::new(&config)?;
        let mut service = QueryService::new(&config, transport, DisplayState::default());
        service.select_category(function);
        service.select_period(period);

        let outcome = service.submit(symbol).await;
        show(service.sink(), output_format(matches), matches.value_of("output"))?;
        match outcome {
            QueryOutcome::Rendered(_) => {}
            QueryOutcome::Rejected(message) | QueryOutcome::ServerError(message) => bail!(message),
            QueryOutcome::TransportFailed(detail) => bail!("request failed: {}", detail),
        }
    } else if let Some(matches) = matches.subcommand_matches("interactive") {
        let config = build_config(matches)?;
        let format = output_format(matches);
        let transport = HttpTransport::new(&config)?;
        let mut service = QueryService::new(&config, transport, DisplayState::default());
        service.select_category(matches.value_of("function").unwrap_or("Company Profile"));
        service.select_period(period_arg(matches, &config)?);

        info!("Interactive mode against {}", config.endpoint_url());
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if let Some(label) = line.strip_prefix(":category ") {
                service.select_category(label.trim());
                println!("category: {}", service.category_label());
            } else if let Some(p) = line.strip_prefix(":period ") {
                match p.parse::<Period>() {
                    Ok(p) => service.select_period(p),
                    Err(e) => warn!("{}", e),
                }
                println!("period: {}", service.period());
            } else if line == ":quit" {
                break;
            } else {
                let outcome = service.submit(line).await;
                if outcome.refreshes_output() {
                    show(service.sink(), format, None)?;
                } else {
                    // 校验失败只提示，不重复输出上一次的结果
                    eprintln!("{}", service.sink().error);
                }
            }
        }
    } else if let Some(matches) = matches.subcommand_matches("render") {
        let path = matches.value_of("input").unwrap_or_default();
        let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
        let value: Value = serde_json::from_str(&raw)?;
        let function = matches.value_of("function").unwrap_or("Company Profile");
        let config = Config::from_env();
        let period = period_arg(matches, &config)?;
        let clock = match matches.value_of("eastern-clock") {
            Some(c) => c.parse::<EasternClock>()?,
            None => config.eastern_clock,
        };

        // 带 success 字段的视为完整包装，否则当作裸数据
        let envelope = if value.get("success").is_some() {
            serde_json::from_value::<ResponseEnvelope>(value)?
        } else {
            ResponseEnvelope::ok(value)
        };
        let mut state = DisplayState::default();
        if envelope.success {
            let options = FormatOptions::new(period.granularity()).with_clock(clock);
            state.output = Output::View(build_view(envelope.payload(), function, options));
            state.description = envelope.description_text().unwrap_or_default().to_string();
        } else {
            state.error = envelope.error_text().unwrap_or(GENERIC_ERROR).to_string();
        }
        show(&state, output_format(matches), None)?;
    } else if matches.subcommand_matches("categories").is_some() {
        for category in QueryCategory::ALL {
            println!("{}", category);
        }
        let periods: Vec<&str> = Period::ALL.iter().map(|p| p.as_str()).collect();
        println!("\nperiods (Intraday Data): {}", periods.join(", "));
    } else {
        info!("No command specified. Use --help for usage information.");
    }

    Ok(())
}
