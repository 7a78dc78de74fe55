use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use log::{error, info};
use poem_rhyme_rs::{
    AugmentError, LineSegmenter, PoemAugmenter, Scheme, TextProcessor, corpus,
    stats::{REGULATED_TYPES, summarize_by_type},
};

#[derive(Parser, Debug)]
#[command(version, about = "Annotate classical poems with pinyin, jyutping and Tupa rhymes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Segment and annotate a poem corpus
    Augment {
        #[arg(long, default_value = "data/poems.json")]
        input: PathBuf,
        #[arg(long, default_value = "data/poems_augmented.json")]
        output: PathBuf,
        /// JSON map of hex code points to jyutping
        #[arg(long, env = "JYUTPING_DICT")]
        jyutping_dict: Option<PathBuf>,
        /// Tab-separated `char<TAB>tupa` dictionary
        #[arg(long, env = "TUPA_DICT")]
        tupa_dict: Option<PathBuf>,
        /// Where the full diagnostic goes when the run fails
        #[arg(long, default_value = "error_log.txt")]
        error_log: PathBuf,
        /// Ideographs needed before a terminator may end a line
        #[arg(long, default_value_t = 10)]
        min_content_chars: usize,
    },
    /// Print rhyme pass counts per regulated poem type
    Stats {
        #[arg(long, default_value = "data/poems_augmented.json")]
        input: PathBuf,
        /// Scheme to report on (cmn, yue or lzt); all three when omitted
        #[arg(long)]
        scheme: Option<Scheme>,
    },
}

fn augment(
    input: PathBuf,
    output: PathBuf,
    jyutping_dict: Option<PathBuf>,
    tupa_dict: Option<PathBuf>,
    min_content_chars: usize,
) -> Result<(), AugmentError> {
    let text_processor = TextProcessor::with_dictionaries(jyutping_dict, tupa_dict)?;
    let augmenter = PoemAugmenter::new(text_processor).with_segmenter(LineSegmenter {
        min_content_chars,
        ..LineSegmenter::init()
    });
    let count = augmenter.augment_file(&input, &output)?;
    info!("Wrote {} poems to {}", count, output.display());
    Ok(())
}

fn print_stats(input: PathBuf, scheme: Option<Scheme>) -> Result<(), AugmentError> {
    let poems = corpus::read_augmented(&input)?;
    let schemes = match scheme {
        Some(s) => vec![s],
        None => vec![Scheme::MiddleChinese, Scheme::Cantonese, Scheme::Mandarin],
    };
    for scheme in schemes {
        println!("[{}]", scheme);
        for summary in summarize_by_type(&poems, &REGULATED_TYPES, scheme) {
            println!(
                "  {}: {}/{} poems rhyme",
                summary.poem_type, summary.passed, summary.poems
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Augment {
            input,
            output,
            jyutping_dict,
            tupa_dict,
            error_log,
            min_content_chars,
        } => match augment(input, output, jyutping_dict, tupa_dict, min_content_chars) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", e);
                e.write_report(&error_log);
                ExitCode::FAILURE
            }
        },
        Command::Stats { input, scheme } => match print_stats(input, scheme) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        },
    }
}
