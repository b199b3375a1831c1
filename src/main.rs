use log::{error, info, warn, LevelFilter};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;
use std::error::Error;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tempcast::{
    chart, notify, EtsModel, FetchProgress, ForecastError, ForecastRun, Forecaster, FormInput,
    InputForm, PreferenceStore, WeatherFetcher, FORM_DATE_FORMAT,
};
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};

const LOG_FILE_NAME: &str = "tempcast.log";
const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

fn main() -> Result<(), Box<dyn Error>> {
    let store = PreferenceStore::open_default()?;
    init_logging(&store.path().with_file_name(LOG_FILE_NAME))?;
    info!("Starting tempcast {}", env!("CARGO_PKG_VERSION"));

    let runtime = Runtime::new()?;
    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
    let fetcher = WeatherFetcher::builder().progress(progress_tx).build()?;

    let mut defaults = FormInput::from(store.load());
    let forecaster = Arc::new(
        Forecaster::<EtsModel>::builder()
            .fetcher(fetcher)
            .store(store)
            .build(),
    );

    let mut form = InputForm::new(io::stdin().lock(), io::stdout());
    while let Some(input) = form.prompt(&defaults)? {
        defaults = input.clone();
        let outcome = runtime.block_on(run_in_background(
            Arc::clone(&forecaster),
            input,
            &mut progress_rx,
        ));

        match outcome {
            Ok(run) => {
                notify::show_forecast(&mut io::stdout(), &run)?;
                if let Err(e) = chart::render(&run.combined) {
                    error!("Failed to render chart: {}", e);
                }
            }
            Err(e) => {
                warn!("Forecast failed ({}): {}", e.kind(), e);
                notify::show_error(&mut io::stderr(), &e)?;
            }
        }
    }

    info!("Input closed, exiting");
    Ok(())
}

/// Everything goes to the log file; errors also reach stderr.
fn init_logging(log_file: &Path) -> Result<(), Box<dyn Error>> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(log_file)?;
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})}: {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Error)))
                .build("console", Box::new(console)),
        )
        .logger(Logger::builder().build("tempcast", LevelFilter::Debug))
        .build(
            Root::builder()
                .appender("file")
                .appender("console")
                .build(LevelFilter::Info),
        )?;
    log4rs::init_config(config)?;
    Ok(())
}

/// Spawns the run on the runtime and prints fetch progress until it reports back.
async fn run_in_background(
    forecaster: Arc<Forecaster<EtsModel>>,
    input: FormInput,
    progress: &mut mpsc::UnboundedReceiver<FetchProgress>,
) -> Result<ForecastRun, ForecastError> {
    while progress.try_recv().is_ok() {}

    let (done_tx, mut done_rx) = oneshot::channel();
    tokio::spawn(async move {
        // The receiver only goes away if the form loop is gone.
        let _ = done_tx.send(forecaster.run(input).await);
    });

    let mut reported = false;
    let outcome = loop {
        tokio::select! {
            biased;
            Some(step) = progress.recv() => {
                show_progress(step);
                reported = true;
            }
            outcome = &mut done_rx => break outcome,
        }
    };
    if reported {
        println!();
    }
    outcome.unwrap_or(Err(ForecastError::RunAborted))
}

fn show_progress(step: FetchProgress) {
    let mut stdout = io::stdout();
    let _ = write!(
        stdout,
        "\rFetched {}/{} days ({})",
        step.done,
        step.total,
        step.date.format(FORM_DATE_FORMAT)
    );
    let _ = stdout.flush();
}
