use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use ndarray::Array1;

use wernicke::{Encoder, EntityLabel, NluConfig, Resolver, TokenTagger};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the catalog configuration file
    #[arg(short, long, default_value = "data/airline.json")]
    config: PathBuf,

    /// Utterances to resolve; reads lines from stdin when omitted
    utterances: Vec<String>,
}

/// Character-trigram hashing encoder, a deterministic stand-in for the
/// trained sentence encoder so the demo runs without model weights. Related
/// surface forms land near each other because they share trigrams.
struct HashingEncoder {
    dimension: usize,
}

impl HashingEncoder {
    fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Encoder for HashingEncoder {
    fn encode(&self, text: &str) -> wernicke::Result<Array1<f32>> {
        let mut counts = vec![0f32; self.dimension];
        let normalized = text.to_lowercase();
        let chars: Vec<char> = normalized.chars().collect();
        for window in chars.windows(3) {
            let mut hasher = DefaultHasher::new();
            window.hash(&mut hasher);
            counts[(hasher.finish() % self.dimension as u64) as usize] += 1.0;
        }
        let norm = counts.iter().map(|&x| x * x).sum::<f32>().sqrt();
        if norm > 1e-10 {
            for count in counts.iter_mut() {
                *count /= norm;
            }
        }
        Ok(Array1::from_vec(counts))
    }
}

/// Keyword-lexicon tagger standing in for the trained token classifier:
/// scores 1.0 for lexicon hits and 0.0 everywhere else.
struct KeywordTagger {
    lexicon: HashMap<EntityLabel, Vec<&'static str>>,
}

impl KeywordTagger {
    fn airline_demo() -> Self {
        let lexicon = HashMap::from([
            (
                EntityLabel::from("city_name"),
                vec![
                    "boston",
                    "denver",
                    "atlanta",
                    "dallas",
                    "baltimore",
                    "philadelphia",
                    "pittsburgh",
                    "oakland",
                ],
            ),
            (
                EntityLabel::from("day_name"),
                vec![
                    "monday",
                    "tuesday",
                    "wednesday",
                    "thursday",
                    "friday",
                    "saturday",
                    "sunday",
                ],
            ),
            (
                EntityLabel::from("period_of_day"),
                vec!["morning", "afternoon", "evening", "night"],
            ),
            (
                EntityLabel::from("airline_name"),
                vec!["delta", "united", "continental", "american"],
            ),
            (
                EntityLabel::from("flight_mod"),
                vec!["cheapest", "earliest", "latest", "nonstop", "direct"],
            ),
            (
                EntityLabel::from("time_relative"),
                vec!["before", "after", "around"],
            ),
            (EntityLabel::from("round_trip"), vec!["round", "return"]),
        ]);
        Self { lexicon }
    }
}

impl TokenTagger for KeywordTagger {
    fn tag_tokens(&self, tokens: &[String]) -> wernicke::Result<HashMap<EntityLabel, Vec<f32>>> {
        let lowered: Vec<String> = tokens
            .iter()
            .map(|token| {
                token
                    .trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .collect();

        let mut scores = HashMap::new();
        for (entity, keywords) in &self.lexicon {
            let row: Vec<f32> = lowered
                .iter()
                .map(|token| {
                    if keywords.contains(&token.as_str()) {
                        1.0
                    } else {
                        0.0
                    }
                })
                .collect();
            if row.iter().any(|&score| score > 0.0) {
                scores.insert(entity.clone(), row);
            }
        }
        Ok(scores)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = NluConfig::from_file(&args.config)
        .with_context(|| format!("loading catalog configuration from {}", args.config.display()))?;
    let dimension = config.embedding_dimension;

    let resolver = Resolver::builder()
        .with_config(config)
        .with_encoder(Arc::new(HashingEncoder::new(dimension)))
        .with_tagger(Arc::new(KeywordTagger::airline_demo()))
        .build()?;

    let info = resolver.info();
    info!(
        "Resolver ready: {} intents, {} entities, dimension {}",
        info.num_intents, info.num_entities, info.embedding_dimension
    );

    if args.utterances.is_empty() {
        interactive(&resolver)
    } else {
        for (index, utterance) in args.utterances.iter().enumerate() {
            print_resolution(&resolver, utterance, format!("utt-{}", index + 1))?;
        }
        Ok(())
    }
}

fn interactive(resolver: &Resolver) -> Result<()> {
    let stdin = io::stdin();
    let mut index = 0;
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        index += 1;
        print_resolution(resolver, line, format!("utt-{}", index))?;
    }
}

fn print_resolution(resolver: &Resolver, utterance: &str, id: String) -> Result<()> {
    let result = resolver.resolve(utterance, id)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
