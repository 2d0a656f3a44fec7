//! Recognizes hand signs in recorded hand landmark network output.
//!
//! Every non-empty input line is one frame: 63 (or 42, without depth) whitespace-separated
//! landmark coordinates in network output order, optionally followed by `score=<confidence>`.
//! Lines starting with `#` are comments.

use std::{
    env,
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

use anyhow::{bail, Context};
use argh::FromArgs;
use handsign::{
    extract::LandmarkExtractor,
    gesture::GestureClassifier,
    landmark::Handedness,
    nn::tensor::Tensor,
    recognizer::{Recognition, Recognizer},
};

const ENV_VAR_THRESHOLD: &str = "HANDSIGN_THRESHOLD";

#[derive(FromArgs)]
/// Recognize manual alphabet letters in recorded hand landmarks.
struct Args {
    /// which hand the landmarks belong to (`left` or `right`)
    #[argh(option, default = "Handedness::Right")]
    hand: Handedness,

    /// file to read frames from (default: stdin)
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// minimum detection confidence (default: $HANDSIGN_THRESHOLD or 0.5)
    #[argh(option)]
    threshold: Option<f32>,
}

struct Frame {
    coords: Vec<f32>,
    score: Option<f32>,
}

fn parse_frame(line: &str) -> anyhow::Result<Frame> {
    let mut coords = Vec::with_capacity(63);
    let mut score = None;
    for token in line.split_whitespace() {
        if let Some(value) = token.strip_prefix("score=") {
            if score.is_some() {
                bail!("duplicate score");
            }
            let value = value
                .parse::<f32>()
                .with_context(|| format!("invalid score `{value}`"))?;
            score = Some(value);
        } else {
            coords.push(
                token
                    .parse::<f32>()
                    .with_context(|| format!("invalid coordinate `{token}`"))?,
            );
        }
    }
    Ok(Frame { coords, score })
}

fn threshold(args: &Args) -> anyhow::Result<f32> {
    if let Some(threshold) = args.threshold {
        return Ok(threshold);
    }
    match env::var(ENV_VAR_THRESHOLD) {
        Ok(value) => value
            .parse::<f32>()
            .with_context(|| format!("invalid {ENV_VAR_THRESHOLD} `{value}`")),
        Err(_) => Ok(LandmarkExtractor::DEFAULT_THRESHOLD),
    }
}

fn main() -> anyhow::Result<()> {
    handsign::init_logger!();

    let args: Args = argh::from_env();

    let mut extractor = LandmarkExtractor::new();
    extractor.set_threshold(threshold(&args)?);
    log::debug!(
        "recognizing {} hand, confidence threshold {}",
        args.hand,
        extractor.threshold()
    );
    let recognizer = Recognizer::new(extractor, GestureClassifier::new());

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut frame_no = 0;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.context("failed to read input")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let frame = parse_frame(line).with_context(|| format!("line {}", line_no + 1))?;
        let tensor = Tensor::from_iter(&[1, frame.coords.len()], frame.coords);
        let result = recognizer.recognize_tensor(&tensor, frame.score, args.hand);

        match result {
            Recognition::NoHand(rejection) => println!("{frame_no}: no hand ({rejection})"),
            Recognition::Hand {
                gesture: Some(gesture),
                ..
            } => println!("{frame_no}: {gesture}"),
            Recognition::Hand { gesture: None, .. } => println!("{frame_no}: -"),
        }
        frame_no += 1;
    }

    Ok(())
}
